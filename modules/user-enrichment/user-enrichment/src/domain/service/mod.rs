//! Domain service layer - business logic and rules.
//!
//! ## Architecture
//!
//! - `users` - validation and CRUD pass-through to the `UsersRepository`
//! - `enrichment` - concurrent fan-out to the `EnrichmentProvider` with
//!   all-or-nothing fan-in
//!
//! ## Layering Rules
//!
//! The domain layer:
//! - **MAY** import: `user_enrichment_sdk` (contract types), domain ports and repos
//! - **MUST NOT** import: `api::*` or `infra::*`
//! - **Uses**: SDK contract types (`User`, `NewUser`, etc.) as primary domain models

use std::sync::Arc;
use std::time::Duration;

use user_enrichment_sdk::{NewUser, PageRequest, User, UserFilter, UserSort};

use crate::domain::error::DomainError;
use crate::domain::ports::EnrichmentProvider;
use crate::domain::repos::UsersRepository;

mod enrichment;
mod users;

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Upper bound for the whole enrichment fan-out of one creation call.
    pub enrichment_deadline: Duration,
    pub max_page_size: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            enrichment_deadline: Duration::from_millis(4500),
            max_page_size: 1000,
        }
    }
}

/// Orchestrates enrichment and persistence of users.
pub struct Service<R: UsersRepository> {
    repo: Arc<R>,
    enrichment: Arc<dyn EnrichmentProvider>,
    config: ServiceConfig,
}

impl<R: UsersRepository> Service<R> {
    #[must_use]
    pub fn new(
        repo: Arc<R>,
        enrichment: Arc<dyn EnrichmentProvider>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            enrichment,
            config,
        }
    }

    /// Validate, enrich and persist a new user.
    ///
    /// # Errors
    /// `EmptyField` for a blank name or surname, `EnrichmentUnavailable` when any
    /// provider fails (nothing is persisted), or any storage error.
    pub async fn create_user(&self, new_user: NewUser) -> Result<i32, DomainError> {
        users::create_user(self, new_user).await
    }

    /// # Errors
    /// Storage errors only; an empty result is `Ok`.
    pub async fn list_users(
        &self,
        page: PageRequest,
        filter: &UserFilter,
        sort: UserSort,
    ) -> Result<Vec<User>, DomainError> {
        users::list_users(self, page, filter, sort).await
    }

    /// # Errors
    /// `InvalidValue` for a non-positive id, `NotFound` when absent.
    pub async fn get_user(&self, id: i32) -> Result<User, DomainError> {
        users::get_user(self, id).await
    }

    /// # Errors
    /// Validation errors, `NotFound`, `AlreadyExists` or `Internal`.
    pub async fn update_user(&self, user: User) -> Result<i32, DomainError> {
        users::update_user(self, user).await
    }

    /// # Errors
    /// `InvalidValue` for a non-positive id, `NotFound` when absent.
    pub async fn delete_user(&self, id: i32) -> Result<i32, DomainError> {
        users::delete_user(self, id).await
    }
}
