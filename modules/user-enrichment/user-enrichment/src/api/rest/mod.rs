//! REST transport: axum routes, DTOs, query parsing and Problem responses.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod query;
pub mod routes;
