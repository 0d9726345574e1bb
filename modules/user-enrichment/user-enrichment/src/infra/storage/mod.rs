//! Infrastructure storage layer - database persistence and query building.
//!
//! ## Architecture
//!
//! This module contains ALL SeaORM-specific code and database operations:
//! - `entity/` - SeaORM entity definition of the `users` table
//! - `mapper.rs` - Conversions between SeaORM models and SDK contract types
//! - `filter.rs` - `UserFilter` / `UserSort` / `PageRequest` to a parameterized `SELECT`
//! - `db.rs` - Storage error classification and per-statement timeouts
//! - `schema.rs` - `users` table creation from the entity
//!
//! ## Layering Rules
//!
//! The infrastructure layer:
//! - **Contains**: ALL SeaORM imports and database-specific code
//! - **Uses**: `user_enrichment_sdk` contract types as the domain model

pub mod db;
pub mod entity;
pub mod filter;
pub mod mapper;
pub mod schema;
mod users_sea_repo;

pub use users_sea_repo::OrmUsersRepository;
