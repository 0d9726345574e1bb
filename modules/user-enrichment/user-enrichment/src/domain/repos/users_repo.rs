use async_trait::async_trait;
use user_enrichment_sdk::{Enrichment, NewUser, PageRequest, User, UserFilter, UserSort};

use crate::domain::error::DomainError;

/// Repository trait for User persistence operations.
///
/// This trait abstracts persistence operations for users, allowing the domain service
/// to remain independent of the underlying storage implementation.
///
/// Implementations classify storage failures: unique violations become
/// `AlreadyExists`, dangling references `NotFound`, anything else `Internal`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Insert a user built from the request and its enrichment, returning the new ID.
    async fn create(&self, new_user: &NewUser, enrichment: &Enrichment)
    -> Result<i32, DomainError>;

    /// One page of users matching the filter, in the requested order.
    async fn list(
        &self,
        page: PageRequest,
        filter: &UserFilter,
        sort: UserSort,
    ) -> Result<Vec<User>, DomainError>;

    /// Find a user by ID; `NotFound` when absent.
    async fn get(&self, id: i32) -> Result<User, DomainError>;

    /// Replace all mutable fields of the user with `user.id`.
    async fn update(&self, user: &User) -> Result<i32, DomainError>;

    /// Delete a user by ID; `NotFound` when absent.
    async fn delete(&self, id: i32) -> Result<i32, DomainError>;
}
