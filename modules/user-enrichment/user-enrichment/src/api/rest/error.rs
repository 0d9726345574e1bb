//! RFC 9457 Problem Details and the mapping from `DomainError`.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Serialize, Serializer};
use user_enrichment_sdk::ErrorKind;

use crate::domain::error::DomainError;

/// Content type for Problem Details as per RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

/// RFC 9457 Problem Details for HTTP APIs.
#[derive(Debug, Clone, Serialize)]
#[must_use]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: String,
    #[serde(serialize_with = "serialize_status_code")]
    pub status: StatusCode,
    pub detail: String,
    pub instance: String,
    /// Machine-readable error kind, e.g. `not_found`.
    pub code: String,
    /// Distributed trace id. No tracer is wired in, so this is always null.
    pub trace_id: Option<String>,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_owned(),
            title: title.into(),
            status,
            detail: detail.into(),
            instance: String::new(),
            code: String::new(),
            trace_id: None,
        }
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = uri.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status;
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp
    }
}

pub type ApiResult<T> = Result<T, Problem>;

const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::EmptyField | ErrorKind::InvalidValue => StatusCode::BAD_REQUEST,
        ErrorKind::AlreadyExists => StatusCode::CONFLICT,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::EnrichmentUnavailable => StatusCode::BAD_GATEWAY,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a domain error to a Problem.
///
/// Internal and enrichment failures are logged with their full chain and
/// answered with a generic detail.
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let kind = e.kind();
    let status = status_for(kind);
    let detail = match kind {
        ErrorKind::Internal => {
            tracing::error!(error = ?e, "Internal error occurred");
            "An internal error occurred".to_owned()
        }
        ErrorKind::EnrichmentUnavailable => {
            tracing::warn!(error = ?e, "Enrichment failed");
            "Demographic enrichment is currently unavailable".to_owned()
        }
        _ => e.to_string(),
    };

    Problem::new(status, status.canonical_reason().unwrap_or("Error"), detail)
        .with_code(kind.code())
        .with_instance(instance)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::domain::ports::Provider;

    use super::*;

    #[test]
    fn status_mapping_follows_kind() {
        let cases = [
            (DomainError::empty_field("name"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_value("id", "bad"), StatusCode::BAD_REQUEST),
            (DomainError::already_exists("dup"), StatusCode::CONFLICT),
            (DomainError::user_not_found(1), StatusCode::NOT_FOUND),
            (
                DomainError::enrichment_unavailable(Provider::Age, "HTTP 503"),
                StatusCode::BAD_GATEWAY,
            ),
            (DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(domain_error_to_problem(&err, "/api/v1/user").status, status, "{err}");
        }
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = DomainError::internal("password=hunter2 rejected by 10.0.0.5");
        let p = domain_error_to_problem(&err, "/api/v1/user/1");
        assert!(!p.detail.contains("hunter2"));
        assert_eq!(p.code, "internal");
        assert_eq!(p.instance, "/api/v1/user/1");
    }

    #[test]
    fn public_detail_is_kept_and_status_serializes_as_number() {
        let p = domain_error_to_problem(&DomainError::empty_field("surname"), "/api/v1/user");
        assert_eq!(p.detail, "surname is empty");

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["status"], 400);
        assert_eq!(json["code"], "empty_field");
        assert_eq!(json["type"], "about:blank");
    }

    #[test]
    fn span_ids_do_not_leak_as_trace_ids() {
        let subscriber = tracing_subscriber::fmt().with_test_writer().finish();
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("http_request");
            let _entered = span.enter();
            assert!(tracing::Span::current().id().is_some());

            let p = domain_error_to_problem(&DomainError::user_not_found(7), "/api/v1/user/7");
            assert_eq!(p.trace_id, None);
            let json = serde_json::to_value(&p).unwrap();
            assert!(json["trace_id"].is_null());
        });
    }
}
