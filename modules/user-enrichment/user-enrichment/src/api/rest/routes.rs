use std::sync::Arc;
use std::time::Duration;

use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use axum::{Extension, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api::rest::handlers;
use crate::api::rest::query::ListDefaults;
use crate::domain::repos::UsersRepository;
use crate::domain::service::Service;

/// Register the `/api/v1/user` routes on `router`.
///
/// Every request is bounded by `request_timeout`; expiry drops the handler
/// future and answers 504.
#[must_use]
pub fn register_routes<R: UsersRepository + 'static>(
    router: Router,
    svc: Arc<Service<R>>,
    defaults: ListDefaults,
    request_timeout: Duration,
) -> Router {
    let users = Router::new()
        .route(
            "/api/v1/user",
            post(handlers::create_user::<R>).get(handlers::list_users::<R>),
        )
        .route(
            "/api/v1/user/{id}",
            get(handlers::get_user::<R>)
                .put(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .layer(Extension(svc))
        .layer(Extension(defaults))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            request_timeout,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<axum::body::Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    module = "user_enrichment",
                )
            }),
        );

    router.merge(users)
}
