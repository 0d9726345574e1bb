//! User Enrichment SDK
//!
//! This crate provides the public API for the `user-enrichment` module:
//! - `UserEnrichmentApi` trait
//! - Model types for users and the filter/sort/page query specification
//! - Error type (`UserEnrichmentError`) and its stable `ErrorKind`
//!
//! ## Usage
//!
//! Consumers obtain the client from the module and never touch storage or
//! enrichment providers directly:
//! ```ignore
//! use user_enrichment_sdk::{NewUser, UserEnrichmentApi};
//!
//! let client = module.client();
//! let id = client.create_user(NewUser::new("Alice", "Smith")).await?;
//! let user = client.get_user(id).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::UserEnrichmentApi;
pub use errors::{ErrorKind, UserEnrichmentError};
pub use models::{
    AgeOperator, Enrichment, NewUser, PageRequest, SortField, SortOrder, User, UserFilter,
    UserSort,
};
