//! Domain layer: business rules, ports and the persistence contract.
//!
//! The domain never imports `api::*` or SeaORM/reqwest types; adapters in
//! `infra` implement the traits declared here.

pub mod error;
pub mod ports;
pub mod repos;
pub mod service;
