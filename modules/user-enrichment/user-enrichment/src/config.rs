use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::service::ServiceConfig;

/// Configuration for the user-enrichment module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserEnrichmentConfig {
    /// Base URL of the age provider (queried as `?name=`).
    pub age_provider_url: String,
    pub gender_provider_url: String,
    pub country_provider_url: String,

    /// Timeout for a single provider request.
    pub provider_timeout_ms: u64,
    /// Upper bound for the whole fan-out of one creation call.
    pub enrichment_deadline_ms: u64,
    /// Upper bound for one storage operation.
    pub storage_timeout_ms: u64,
    /// Upper bound for one inbound REST request.
    pub request_timeout_ms: u64,

    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for UserEnrichmentConfig {
    fn default() -> Self {
        Self {
            age_provider_url: "https://api.agify.io".to_owned(),
            gender_provider_url: "https://api.genderize.io".to_owned(),
            country_provider_url: "https://api.nationalize.io".to_owned(),
            provider_timeout_ms: 4000,
            enrichment_deadline_ms: 4500,
            storage_timeout_ms: 4500,
            request_timeout_ms: 5000,
            default_page_size: 10,
            max_page_size: 1000,
        }
    }
}

/// Provider endpoints after validation.
#[derive(Debug, Clone)]
pub struct ProviderUrls {
    pub age: Url,
    pub gender: Url,
    pub country: Url,
}

impl UserEnrichmentConfig {
    /// Parse the provider URLs.
    ///
    /// # Errors
    /// Names the offending key when a URL does not parse or is not http(s).
    pub fn provider_urls(&self) -> anyhow::Result<ProviderUrls> {
        fn parse(key: &str, raw: &str) -> anyhow::Result<Url> {
            let url = Url::parse(raw)
                .map_err(|e| anyhow::anyhow!("{key}: invalid URL '{raw}': {e}"))?;
            if !matches!(url.scheme(), "http" | "https") {
                anyhow::bail!("{key}: unsupported scheme '{}'", url.scheme());
            }
            Ok(url)
        }

        Ok(ProviderUrls {
            age: parse("age_provider_url", &self.age_provider_url)?,
            gender: parse("gender_provider_url", &self.gender_provider_url)?,
            country: parse("country_provider_url", &self.country_provider_url)?,
        })
    }

    /// Check ranges that serde cannot express.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.provider_urls()?;
        if self.max_page_size == 0 {
            anyhow::bail!("max_page_size must be positive");
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            anyhow::bail!(
                "default_page_size must be in 1..={}, got {}",
                self.max_page_size,
                self.default_page_size
            );
        }
        for (key, value) in [
            ("provider_timeout_ms", self.provider_timeout_ms),
            ("enrichment_deadline_ms", self.enrichment_deadline_ms),
            ("storage_timeout_ms", self.storage_timeout_ms),
            ("request_timeout_ms", self.request_timeout_ms),
        ] {
            if value == 0 {
                anyhow::bail!("{key} must be positive");
            }
        }
        // Inner budgets expire before the request layer's 504.
        if self.provider_timeout_ms > self.enrichment_deadline_ms {
            anyhow::bail!(
                "provider_timeout_ms ({}) must not exceed enrichment_deadline_ms ({})",
                self.provider_timeout_ms,
                self.enrichment_deadline_ms
            );
        }
        for (key, value) in [
            ("enrichment_deadline_ms", self.enrichment_deadline_ms),
            ("storage_timeout_ms", self.storage_timeout_ms),
        ] {
            if value >= self.request_timeout_ms {
                anyhow::bail!(
                    "{key} ({value}) must be below request_timeout_ms ({})",
                    self.request_timeout_ms
                );
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    #[must_use]
    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage_timeout_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            enrichment_deadline: Duration::from_millis(self.enrichment_deadline_ms),
            max_page_size: self.max_page_size,
        }
    }
}
