#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support utilities for `user-enrichment` integration tests.
//!
//! Provides an in-memory database with the `users` table, a scripted
//! enrichment provider and seeding helpers.

#![allow(dead_code)] // Support module provides utilities that may not all be used

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait};

use user_enrichment::domain::error::DomainError;
use user_enrichment::domain::ports::{EnrichmentProvider, Provider};
use user_enrichment::infra::storage::entity::Entity as UserEntity;
use user_enrichment::infra::storage::schema::ensure_users_table;
use user_enrichment::infra::storage::OrmUsersRepository;
use user_enrichment::UserEnrichmentConfig;
use user_enrichment_sdk::{Enrichment, NewUser};

/// Create an in-memory `SQLite` database with the `users` table.
///
/// The pool is pinned to a single connection so every query sees the same
/// in-memory database.
pub async fn inmem_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory database");

    ensure_users_table(&db)
        .await
        .expect("Failed to create users table");

    db
}

pub fn repo(db: &DatabaseConnection) -> OrmUsersRepository {
    OrmUsersRepository::new(db.clone(), Duration::from_secs(5))
}

pub async fn count_users(db: &DatabaseConnection) -> u64 {
    UserEntity::find().count(db).await.unwrap()
}

pub fn enrichment(age: u32, gender: &str, country: &str) -> Enrichment {
    Enrichment {
        age,
        gender: gender.to_owned(),
        country: country.to_owned(),
    }
}

/// Insert a user directly through the repository, bypassing enrichment.
pub async fn seed_user(
    repo: &OrmUsersRepository,
    name: &str,
    surname: &str,
    patronymic: Option<&str>,
    enrichment: Enrichment,
) -> i32 {
    use user_enrichment::domain::repos::UsersRepository;

    let mut new_user = NewUser::new(name, surname);
    new_user.patronymic = patronymic.map(str::to_owned);
    repo.create(&new_user, &enrichment).await.unwrap()
}

/// Provider that answers the same values for every name and counts calls.
pub struct StaticProvider {
    pub age: u32,
    pub gender: String,
    pub country: String,
    pub fail: Option<Provider>,
    pub calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new(age: u32, gender: &str, country: &str) -> Self {
        Self {
            age,
            gender: gender.to_owned(),
            country: country.to_owned(),
            fail: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(provider: Provider) -> Self {
        Self {
            fail: Some(provider),
            ..Self::new(30, "male", "US")
        }
    }

    fn answer<T>(&self, provider: Provider, value: T) -> Result<T, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail == Some(provider) {
            return Err(DomainError::enrichment_unavailable(provider, "scripted failure"));
        }
        Ok(value)
    }
}

#[async_trait]
impl EnrichmentProvider for StaticProvider {
    async fn infer_age(&self, _name: &str) -> Result<u32, DomainError> {
        self.answer(Provider::Age, self.age)
    }

    async fn infer_gender(&self, _name: &str) -> Result<String, DomainError> {
        self.answer(Provider::Gender, self.gender.clone())
    }

    async fn infer_country(&self, _name: &str) -> Result<String, DomainError> {
        self.answer(Provider::Country, self.country.clone())
    }
}

/// Module config pointing every provider at `base_url`.
pub fn config_for(base_url: &str) -> UserEnrichmentConfig {
    UserEnrichmentConfig {
        age_provider_url: format!("{base_url}/age"),
        gender_provider_url: format!("{base_url}/gender"),
        country_provider_url: format!("{base_url}/country"),
        ..UserEnrichmentConfig::default()
    }
}

pub fn static_provider(age: u32, gender: &str, country: &str) -> Arc<StaticProvider> {
    Arc::new(StaticProvider::new(age, gender, country))
}

pub type OrmRepo = OrmUsersRepository;
