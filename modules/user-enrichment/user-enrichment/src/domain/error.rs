use thiserror::Error;
use user_enrichment_sdk::{ErrorKind, UserEnrichmentError};

use crate::domain::ports::Provider;

/// Boxed underlying cause kept for diagnostics only.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{field} is empty")]
    EmptyField { field: &'static str },

    #[error("invalid {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },

    #[error("{message}")]
    AlreadyExists {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("{provider} provider unavailable: {reason}")]
    EnrichmentUnavailable {
        provider: Provider,
        reason: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl DomainError {
    #[must_use]
    pub fn empty_field(field: &'static str) -> Self {
        Self::EmptyField { field }
    }

    #[must_use]
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn user_not_found(id: i32) -> Self {
        Self::not_found(format!("user {id} not found"))
    }

    #[must_use]
    pub fn enrichment_unavailable(provider: Provider, reason: impl Into<String>) -> Self {
        Self::EnrichmentUnavailable {
            provider,
            reason: reason.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Attach an underlying cause. Has no effect on validation errors.
    #[must_use]
    pub fn with_source(mut self, cause: impl Into<BoxError>) -> Self {
        match &mut self {
            Self::AlreadyExists { source, .. }
            | Self::NotFound { source, .. }
            | Self::EnrichmentUnavailable { source, .. }
            | Self::Internal { source, .. } => *source = Some(cause.into()),
            Self::EmptyField { .. } | Self::InvalidValue { .. } => {}
        }
        self
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyField { .. } => ErrorKind::EmptyField,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::EnrichmentUnavailable { .. } => ErrorKind::EnrichmentUnavailable,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}

/// Convert domain errors to SDK errors for public API consumption.
///
/// Diagnostic text of internal and enrichment failures is dropped here.
impl From<DomainError> for UserEnrichmentError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::EmptyField { field } => UserEnrichmentError::empty_field(field),
            DomainError::InvalidValue { field, message } => {
                UserEnrichmentError::invalid_value(field, message)
            }
            DomainError::AlreadyExists { message, .. } => {
                UserEnrichmentError::already_exists(message)
            }
            DomainError::NotFound { message, .. } => UserEnrichmentError::not_found(message),
            DomainError::EnrichmentUnavailable { .. } => {
                UserEnrichmentError::enrichment_unavailable()
            }
            DomainError::Internal { .. } => UserEnrichmentError::internal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn sdk_conversion_strips_internal_detail() {
        let err = DomainError::internal("connection refused to 10.0.0.5:5432");
        let public: UserEnrichmentError = err.into();
        assert_eq!(public, UserEnrichmentError::Internal);
        assert!(!public.to_string().contains("10.0.0.5"));

        let err = DomainError::enrichment_unavailable(Provider::Gender, "HTTP 503");
        let public: UserEnrichmentError = err.into();
        assert_eq!(public.kind(), ErrorKind::EnrichmentUnavailable);
        assert!(!public.to_string().contains("503"));
    }

    #[test]
    fn sdk_conversion_keeps_public_messages() {
        let public: UserEnrichmentError = DomainError::user_not_found(7).into();
        assert_eq!(public, UserEnrichmentError::not_found("user 7 not found"));

        let public: UserEnrichmentError = DomainError::empty_field("surname").into();
        assert_eq!(public.to_string(), "surname is empty");
    }

    #[test]
    fn source_is_kept_for_diagnostics() {
        let cause = std::io::Error::other("socket closed");
        let err = DomainError::internal("query failed").with_source(cause);
        assert_eq!(err.kind(), ErrorKind::Internal);
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("socket closed"));
    }

    #[test]
    fn validation_errors_ignore_sources() {
        let err = DomainError::empty_field("name").with_source(std::io::Error::other("x"));
        assert!(err.source().is_none());
        assert_eq!(err.kind(), ErrorKind::EmptyField);
    }
}
