use std::fmt;

use async_trait::async_trait;

use crate::domain::error::DomainError;

/// Which inference a provider performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Age,
    Gender,
    Country,
}

impl Provider {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Country => "country",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output port: demographic inference by first name.
///
/// Each call performs exactly one lookup with no retries; every failure is
/// reported as `DomainError::EnrichmentUnavailable`.
#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    async fn infer_age(&self, name: &str) -> Result<u32, DomainError>;

    async fn infer_gender(&self, name: &str) -> Result<String, DomainError>;

    /// Most probable country code. An empty candidate list is a failure.
    async fn infer_country(&self, name: &str) -> Result<String, DomainError>;
}
