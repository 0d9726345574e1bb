//! Local implementation of `UserEnrichmentApi`.
//!
//! Used for in-process calls. It delegates to the domain service and converts
//! errors to SDK error types.

use std::sync::Arc;

use async_trait::async_trait;
use user_enrichment_sdk::{
    NewUser, PageRequest, User, UserEnrichmentApi, UserEnrichmentError, UserFilter, UserSort,
};

use crate::domain::repos::UsersRepository;
use crate::domain::service::Service;

/// Local implementation of the `UserEnrichmentApi` trait that delegates to the domain service.
pub struct UserEnrichmentLocalClient<R: UsersRepository> {
    service: Arc<Service<R>>,
}

impl<R: UsersRepository> UserEnrichmentLocalClient<R> {
    #[must_use]
    pub fn new(service: Arc<Service<R>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R: UsersRepository + 'static> UserEnrichmentApi for UserEnrichmentLocalClient<R> {
    async fn create_user(&self, new_user: NewUser) -> Result<i32, UserEnrichmentError> {
        self.service.create_user(new_user).await.map_err(Into::into)
    }

    async fn list_users(
        &self,
        page: PageRequest,
        filter: UserFilter,
        sort: UserSort,
    ) -> Result<Vec<User>, UserEnrichmentError> {
        self.service
            .list_users(page, &filter, sort)
            .await
            .map_err(Into::into)
    }

    async fn get_user(&self, id: i32) -> Result<User, UserEnrichmentError> {
        self.service.get_user(id).await.map_err(Into::into)
    }

    async fn update_user(&self, user: User) -> Result<i32, UserEnrichmentError> {
        self.service.update_user(user).await.map_err(Into::into)
    }

    async fn delete_user(&self, id: i32) -> Result<i32, UserEnrichmentError> {
        self.service.delete_user(id).await.map_err(Into::into)
    }
}
