//! User Enrichment Module
//!
//! Stores user records whose age, gender and country are inferred from the
//! first name by three external lookup services, and serves them over REST
//! with filtering, ordering and offset paging.
//!
//! ## Public API
//!
//! The public API is defined in the `user-enrichment-sdk` crate and re-exported here:
//! - `UserEnrichmentApi` - trait for in-process callers
//! - `User`, `NewUser`, `UserFilter`, `UserSort`, `PageRequest` - data models
//! - `UserEnrichmentError` - error types
//!
//! Obtain a client with [`UserEnrichmentModule::client`].
// === PUBLIC API (from SDK) ===
pub use user_enrichment_sdk::{
    NewUser, PageRequest, User, UserEnrichmentApi, UserEnrichmentError, UserFilter, UserSort,
};

// === MODULE DEFINITION ===
pub mod module;
pub use module::UserEnrichmentModule;

// === LOCAL CLIENT ===
pub mod local_client;

// === INTERNAL MODULES ===
// WARNING: These modules are internal implementation details!
// They are exposed only for comprehensive testing and should NOT be used by external consumers.
// Only use the SDK types for stable public APIs.
#[doc(hidden)]
pub mod api;
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

pub use config::UserEnrichmentConfig;
