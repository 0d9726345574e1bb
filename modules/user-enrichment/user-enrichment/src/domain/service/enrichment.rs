use std::time::Duration;

use user_enrichment_sdk::Enrichment;

use crate::domain::error::DomainError;
use crate::domain::ports::{EnrichmentProvider, Provider};

/// Run the three inferences concurrently and collect them into one `Enrichment`.
///
/// The first failure observed wins and drops the lookups still in flight. When
/// several results are ready at the same poll they are inspected in the order
/// age, gender, country, which makes the reported failure deterministic.
pub(super) async fn enrich(
    provider: &dyn EnrichmentProvider,
    name: &str,
    deadline: Duration,
) -> Result<Enrichment, DomainError> {
    let age_lookup = provider.infer_age(name);
    let gender_lookup = provider.infer_gender(name);
    let country_lookup = provider.infer_country(name);
    let expired = tokio::time::sleep(deadline);
    tokio::pin!(age_lookup, gender_lookup, country_lookup, expired);

    let mut age = None;
    let mut gender = None;
    let mut country = None;

    while age.is_none() || gender.is_none() || country.is_none() {
        tokio::select! {
            biased;
            res = &mut age_lookup, if age.is_none() => age = Some(res?),
            res = &mut gender_lookup, if gender.is_none() => gender = Some(res?),
            res = &mut country_lookup, if country.is_none() => country = Some(res?),
            () = &mut expired => {
                let pending = if age.is_none() {
                    Provider::Age
                } else if gender.is_none() {
                    Provider::Gender
                } else {
                    Provider::Country
                };
                tracing::warn!(provider = %pending, ?deadline, "Enrichment deadline exceeded");
                return Err(DomainError::enrichment_unavailable(
                    pending,
                    format!("no answer within {}ms", deadline.as_millis()),
                ));
            }
        }
    }

    let (Some(age), Some(gender), Some(country)) = (age, gender, country) else {
        return Err(DomainError::internal("enrichment fan-in finished incomplete"));
    };

    Ok(Enrichment {
        age,
        gender,
        country: country.to_uppercase(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use user_enrichment_sdk::ErrorKind;

    use super::*;

    /// Provider whose answers and latencies are scripted per inference.
    struct Scripted {
        age: (Duration, Result<u32, &'static str>),
        gender: (Duration, Result<&'static str, &'static str>),
        country: (Duration, Result<&'static str, &'static str>),
        country_finished: Arc<AtomicBool>,
    }

    impl Scripted {
        fn ok() -> Self {
            Self {
                age: (Duration::ZERO, Ok(34)),
                gender: (Duration::ZERO, Ok("female")),
                country: (Duration::ZERO, Ok("us")),
                country_finished: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    #[async_trait]
    impl EnrichmentProvider for Scripted {
        async fn infer_age(&self, _name: &str) -> Result<u32, DomainError> {
            tokio::time::sleep(self.age.0).await;
            self.age
                .1
                .map_err(|e| DomainError::enrichment_unavailable(Provider::Age, e))
        }

        async fn infer_gender(&self, _name: &str) -> Result<String, DomainError> {
            tokio::time::sleep(self.gender.0).await;
            self.gender
                .1
                .map(str::to_owned)
                .map_err(|e| DomainError::enrichment_unavailable(Provider::Gender, e))
        }

        async fn infer_country(&self, _name: &str) -> Result<String, DomainError> {
            tokio::time::sleep(self.country.0).await;
            self.country_finished.store(true, Ordering::SeqCst);
            self.country
                .1
                .map(str::to_owned)
                .map_err(|e| DomainError::enrichment_unavailable(Provider::Country, e))
        }
    }

    fn failed_provider(err: &DomainError) -> Option<Provider> {
        match err {
            DomainError::EnrichmentUnavailable { provider, .. } => Some(*provider),
            _ => None,
        }
    }

    #[tokio::test]
    async fn collects_all_three_and_uppercases_country() {
        let provider = Scripted::ok();
        let enrichment = enrich(&provider, "Alice", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(
            enrichment,
            Enrichment {
                age: 34,
                gender: "female".to_owned(),
                country: "US".to_owned(),
            }
        );
    }

    #[tokio::test]
    async fn simultaneous_failures_report_age_first() {
        let provider = Scripted {
            age: (Duration::ZERO, Err("down")),
            gender: (Duration::ZERO, Err("down")),
            country: (Duration::ZERO, Err("down")),
            ..Scripted::ok()
        };
        let err = enrich(&provider, "Alice", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(failed_provider(&err), Some(Provider::Age));
    }

    #[tokio::test]
    async fn gender_beats_country_when_both_fail_together() {
        let provider = Scripted {
            gender: (Duration::ZERO, Err("down")),
            country: (Duration::ZERO, Err("down")),
            ..Scripted::ok()
        };
        let err = enrich(&provider, "Alice", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(failed_provider(&err), Some(Provider::Gender));
    }

    #[tokio::test(start_paused = true)]
    async fn first_failure_cancels_slow_lookups() {
        let provider = Scripted {
            gender: (Duration::from_millis(10), Err("bad payload")),
            country: (Duration::from_secs(3), Ok("US")),
            ..Scripted::ok()
        };
        let finished = Arc::clone(&provider.country_finished);

        let err = enrich(&provider, "Alice", Duration::from_secs(5))
            .await
            .unwrap_err();

        assert_eq!(failed_provider(&err), Some(Provider::Gender));
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!finished.load(Ordering::SeqCst), "country lookup was not dropped");
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_reports_first_pending_provider() {
        let provider = Scripted {
            gender: (Duration::from_secs(60), Ok("male")),
            ..Scripted::ok()
        };
        let err = enrich(&provider, "Bob", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EnrichmentUnavailable);
        assert_eq!(failed_provider(&err), Some(Provider::Gender));
    }
}
