use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tracing::info;
use user_enrichment_sdk::UserEnrichmentApi;

use crate::api::rest::query::ListDefaults;
use crate::api::rest::routes::register_routes;
use crate::config::UserEnrichmentConfig;
use crate::domain::ports::EnrichmentProvider;
use crate::domain::service::Service;
use crate::infra::enrichment::HttpEnrichmentClient;
use crate::infra::storage::OrmUsersRepository;
use crate::local_client::UserEnrichmentLocalClient;

/// Concrete service type wired by this module.
pub type ConcreteService = Service<OrmUsersRepository>;

/// The user-enrichment module: wires config, providers, storage and REST.
pub struct UserEnrichmentModule {
    service: Arc<ConcreteService>,
    config: UserEnrichmentConfig,
}

impl UserEnrichmentModule {
    /// Build the module with the HTTP enrichment client.
    ///
    /// # Errors
    /// Fails on invalid configuration or when the HTTP client cannot be built.
    pub fn init(db: DatabaseConnection, config: UserEnrichmentConfig) -> anyhow::Result<Self> {
        let provider =
            HttpEnrichmentClient::new(config.provider_urls()?, config.provider_timeout())?;
        Self::with_provider(db, config, Arc::new(provider))
    }

    /// Build the module around a caller-supplied enrichment provider.
    ///
    /// # Errors
    /// Fails on invalid configuration.
    pub fn with_provider(
        db: DatabaseConnection,
        config: UserEnrichmentConfig,
        provider: Arc<dyn EnrichmentProvider>,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        let repo = OrmUsersRepository::new(db, config.storage_timeout());
        let service = Service::new(Arc::new(repo), provider, config.service_config());
        info!(
            enrichment_deadline_ms = config.enrichment_deadline_ms,
            max_page_size = config.max_page_size,
            "User enrichment module initialized"
        );
        Ok(Self {
            service: Arc::new(service),
            config,
        })
    }

    /// In-process client for other components.
    #[must_use]
    pub fn client(&self) -> Arc<dyn UserEnrichmentApi> {
        Arc::new(UserEnrichmentLocalClient::new(Arc::clone(&self.service)))
    }

    /// Mount the REST routes on `router`.
    #[must_use]
    pub fn register_rest(&self, router: Router) -> Router {
        register_routes(
            router,
            Arc::clone(&self.service),
            ListDefaults {
                page_size: self.config.default_page_size,
            },
            self.config.request_timeout(),
        )
    }
}
