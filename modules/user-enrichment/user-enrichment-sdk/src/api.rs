//! `UserEnrichmentApi` trait definition.
//!
//! This trait defines the public API for the `user-enrichment` module.

use async_trait::async_trait;

use crate::errors::UserEnrichmentError;
use crate::models::{NewUser, PageRequest, User, UserFilter, UserSort};

/// Public API trait for the `user-enrichment` module.
///
/// Obtained from the module as `Arc<dyn UserEnrichmentApi>`:
/// ```ignore
/// let client = module.client();
/// let users = client
///     .list_users(PageRequest::default(), UserFilter::default(), UserSort::default())
///     .await?;
/// ```
#[async_trait]
pub trait UserEnrichmentApi: Send + Sync {
    /// Infer demographics for the name and persist a new user.
    ///
    /// Nothing is persisted unless every enrichment provider succeeds.
    async fn create_user(&self, new_user: NewUser) -> Result<i32, UserEnrichmentError>;

    /// List one page of users. An empty page is not an error.
    async fn list_users(
        &self,
        page: PageRequest,
        filter: UserFilter,
        sort: UserSort,
    ) -> Result<Vec<User>, UserEnrichmentError>;

    /// Get a user by ID.
    async fn get_user(&self, id: i32) -> Result<User, UserEnrichmentError>;

    /// Replace every mutable field of the user identified by `user.id`.
    async fn update_user(&self, user: User) -> Result<i32, UserEnrichmentError>;

    /// Delete a user by ID, returning the deleted ID.
    async fn delete_user(&self, id: i32) -> Result<i32, UserEnrichmentError>;
}
