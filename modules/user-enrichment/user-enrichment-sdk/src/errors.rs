//! Public error types for the `user-enrichment` module.
//!
//! These errors are safe to expose to other modules and consumers. The
//! `Internal` and `EnrichmentUnavailable` variants carry no diagnostic text.

use std::fmt;

use thiserror::Error;

/// Stable discriminator of an error, independent of its message or cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyField,
    InvalidValue,
    AlreadyExists,
    NotFound,
    Internal,
    EnrichmentUnavailable,
}

impl ErrorKind {
    /// Numeric id of the kind. These values never change between releases.
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::EmptyField => 1,
            Self::InvalidValue => 2,
            Self::AlreadyExists => 3,
            Self::NotFound => 4,
            Self::Internal => 5,
            Self::EnrichmentUnavailable => 6,
        }
    }

    /// Machine-readable code, e.g. `"not_found"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EmptyField => "empty_field",
            Self::InvalidValue => "invalid_value",
            Self::AlreadyExists => "already_exists",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
            Self::EnrichmentUnavailable => "enrichment_unavailable",
        }
    }

    /// Whether the error message may be shown to untrusted callers verbatim.
    #[must_use]
    pub const fn is_public(self) -> bool {
        !matches!(self, Self::Internal | Self::EnrichmentUnavailable)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors that can be returned by the `UserEnrichmentApi`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserEnrichmentError {
    /// A required field was missing or blank.
    #[error("{field} is empty")]
    EmptyField { field: String },

    /// A field carried a value outside its domain.
    #[error("invalid {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// The record collides with an existing one.
    #[error("{message}")]
    AlreadyExists { message: String },

    /// The record (or something it references) does not exist.
    #[error("{message}")]
    NotFound { message: String },

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,

    /// One of the enrichment providers could not produce a value.
    #[error("Enrichment unavailable")]
    EnrichmentUnavailable,
}

impl UserEnrichmentError {
    /// Create an `EmptyField` error.
    #[must_use]
    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::EmptyField {
            field: field.into(),
        }
    }

    /// Create an `InvalidValue` error.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an `AlreadyExists` error.
    #[must_use]
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            message: message.into(),
        }
    }

    /// Create a `NotFound` error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an `Internal` error.
    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }

    /// Create an `EnrichmentUnavailable` error.
    #[must_use]
    pub fn enrichment_unavailable() -> Self {
        Self::EnrichmentUnavailable
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyField { .. } => ErrorKind::EmptyField,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Internal => ErrorKind::Internal,
            Self::EnrichmentUnavailable => ErrorKind::EnrichmentUnavailable,
        }
    }
}
