use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::config::ProviderUrls;
use crate::domain::error::DomainError;
use crate::domain::ports::{EnrichmentProvider, Provider};

#[derive(Debug, Deserialize)]
struct AgeResponse {
    age: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenderResponse {
    gender: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CountryResponse {
    #[serde(default)]
    country: Vec<CountryCandidate>,
}

#[derive(Debug, Deserialize)]
struct CountryCandidate {
    country_id: Option<String>,
}

/// HTTP adapter implementing the `EnrichmentProvider` port against the
/// agify / genderize / nationalize style APIs.
///
/// One pooled `reqwest::Client` serves all three providers.
pub struct HttpEnrichmentClient {
    client: reqwest::Client,
    urls: ProviderUrls,
}

impl HttpEnrichmentClient {
    /// # Errors
    /// Fails when the TLS backend cannot be initialized.
    pub fn new(urls: ProviderUrls, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build enrichment HTTP client: {e}"))?;
        Ok(Self { client, urls })
    }

    fn base(&self, provider: Provider) -> &Url {
        match provider {
            Provider::Age => &self.urls.age,
            Provider::Gender => &self.urls.gender,
            Provider::Country => &self.urls.country,
        }
    }

    /// One GET `?name=` against the provider, decoded into `T`.
    #[instrument(skip_all, fields(provider = %provider))]
    async fn fetch<T: DeserializeOwned>(
        &self,
        provider: Provider,
        name: &str,
    ) -> Result<T, DomainError> {
        let mut url = self.base(provider).clone();
        url.query_pairs_mut().append_pair("name", name);

        let response = self.client.get(url).send().await.map_err(|e| {
            let reason = if e.is_timeout() {
                "request timed out"
            } else {
                "request failed"
            };
            tracing::warn!(error = %e, "{reason}");
            DomainError::enrichment_unavailable(provider, reason).with_source(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "Provider answered with an error status");
            return Err(DomainError::enrichment_unavailable(
                provider,
                format!("HTTP {status}"),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::warn!(error = %e, "Malformed provider response");
            DomainError::enrichment_unavailable(provider, "malformed response body").with_source(e)
        })
    }
}

fn missing(provider: Provider, what: &str) -> DomainError {
    tracing::warn!(%provider, "Provider returned no {what}");
    DomainError::enrichment_unavailable(provider, format!("no {what} in response"))
}

#[async_trait]
impl EnrichmentProvider for HttpEnrichmentClient {
    async fn infer_age(&self, name: &str) -> Result<u32, DomainError> {
        let body: AgeResponse = self.fetch(Provider::Age, name).await?;
        body.age.ok_or_else(|| missing(Provider::Age, "age"))
    }

    async fn infer_gender(&self, name: &str) -> Result<String, DomainError> {
        let body: GenderResponse = self.fetch(Provider::Gender, name).await?;
        body.gender
            .filter(|g| !g.trim().is_empty())
            .ok_or_else(|| missing(Provider::Gender, "gender"))
    }

    async fn infer_country(&self, name: &str) -> Result<String, DomainError> {
        let body: CountryResponse = self.fetch(Provider::Country, name).await?;
        body.country
            .into_iter()
            .next()
            .and_then(|c| c.country_id)
            .filter(|c| !c.trim().is_empty())
            .map(|c| c.to_uppercase())
            .ok_or_else(|| missing(Provider::Country, "country candidates"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;
    use user_enrichment_sdk::ErrorKind;

    use super::*;

    fn client_for(server: &MockServer, timeout: Duration) -> HttpEnrichmentClient {
        let base = Url::parse(&server.base_url()).unwrap();
        HttpEnrichmentClient::new(
            ProviderUrls {
                age: base.join("age").unwrap(),
                gender: base.join("gender").unwrap(),
                country: base.join("country").unwrap(),
            },
            timeout,
        )
        .unwrap()
    }

    fn reason(err: &DomainError) -> String {
        match err {
            DomainError::EnrichmentUnavailable { reason, .. } => reason.clone(),
            other => panic!("expected EnrichmentUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn infers_all_three_attributes() {
        let server = MockServer::start_async().await;
        let age = server
            .mock_async(|when, then| {
                when.method(GET).path("/age").query_param("name", "Alice");
                then.status(200)
                    .json_body(json!({"count": 1, "name": "Alice", "age": 34}));
            })
            .await;
        let gender = server
            .mock_async(|when, then| {
                when.method(GET).path("/gender").query_param("name", "Alice");
                then.status(200).json_body(
                    json!({"count": 1, "name": "Alice", "gender": "female", "probability": 0.98}),
                );
            })
            .await;
        let country = server
            .mock_async(|when, then| {
                when.method(GET).path("/country").query_param("name", "Alice");
                then.status(200).json_body(json!({
                    "count": 1,
                    "name": "Alice",
                    "country": [
                        {"country_id": "us", "probability": 0.4},
                        {"country_id": "GB", "probability": 0.2}
                    ]
                }));
            })
            .await;
        let client = client_for(&server, Duration::from_secs(5));

        assert_eq!(client.infer_age("Alice").await.unwrap(), 34);
        assert_eq!(client.infer_gender("Alice").await.unwrap(), "female");
        assert_eq!(client.infer_country("Alice").await.unwrap(), "US");

        age.assert_async().await;
        gender.assert_async().await;
        country.assert_async().await;
    }

    #[tokio::test]
    async fn null_age_is_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/age");
                then.status(200)
                    .json_body(json!({"count": 0, "name": "Zzz", "age": null}));
            })
            .await;
        let client = client_for(&server, Duration::from_secs(5));

        let err = client.infer_age("Zzz").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EnrichmentUnavailable);
        assert_eq!(reason(&err), "no age in response");
    }

    #[tokio::test]
    async fn malformed_body_is_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/gender");
                then.status(200)
                    .header("content-type", "application/json")
                    .body("{not json");
            })
            .await;
        let client = client_for(&server, Duration::from_secs(5));

        let err = client.infer_gender("Alice").await.unwrap_err();
        assert_eq!(reason(&err), "malformed response body");
    }

    #[tokio::test]
    async fn empty_country_list_is_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/country");
                then.status(200)
                    .json_body(json!({"count": 0, "name": "Zzz", "country": []}));
            })
            .await;
        let client = client_for(&server, Duration::from_secs(5));

        let err = client.infer_country("Zzz").await.unwrap_err();
        assert_eq!(reason(&err), "no country candidates in response");
    }

    #[tokio::test]
    async fn error_status_is_unavailable() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/age");
                then.status(500).body("Internal Server Error");
            })
            .await;
        let client = client_for(&server, Duration::from_secs(5));

        let err = client.infer_age("Alice").await.unwrap_err();
        assert!(reason(&err).starts_with("HTTP 500"), "{err}");
        // Exactly one request, no retries.
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/gender");
                then.status(200)
                    .delay(Duration::from_secs(2))
                    .json_body(json!({"gender": "male"}));
            })
            .await;
        let client = client_for(&server, Duration::from_millis(200));

        let err = client.infer_gender("Bob").await.unwrap_err();
        assert_eq!(reason(&err), "request timed out");
    }
}
