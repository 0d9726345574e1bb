use std::sync::Arc;

use axum::extract::{Path, RawQuery};
use axum::http::{StatusCode, Uri};
use axum::{Extension, Json};
use tracing::info;

use crate::api::rest::dto::{CreateUserReq, IdResponse, UpdateUserReq, UserDto};
use crate::api::rest::error::{domain_error_to_problem, ApiResult, Problem};
use crate::api::rest::query::{parse_list_query, ListDefaults};
use crate::domain::error::DomainError;
use crate::domain::repos::UsersRepository;
use crate::domain::service::Service;

fn problem(e: &DomainError, uri: &Uri) -> Problem {
    domain_error_to_problem(e, uri.path())
}

/// Path ids that are not positive integers are rejected before the service.
fn parse_id(raw: &str, uri: &Uri) -> ApiResult<i32> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            problem(
                &DomainError::invalid_value("id", format!("'{raw}' is not a positive integer")),
                uri,
            )
        })
}

/// Create a user; demographics are inferred from the name.
#[tracing::instrument(skip_all, fields(name = %req.name))]
pub async fn create_user<R: UsersRepository + 'static>(
    uri: Uri,
    Extension(svc): Extension<Arc<Service<R>>>,
    Json(req): Json<CreateUserReq>,
) -> ApiResult<(StatusCode, Json<IdResponse>)> {
    let id = svc
        .create_user(req.into())
        .await
        .map_err(|e| problem(&e, &uri))?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// List users with filters, ordering and offset paging from the query string.
#[tracing::instrument(skip_all)]
pub async fn list_users<R: UsersRepository + 'static>(
    uri: Uri,
    Extension(svc): Extension<Arc<Service<R>>>,
    Extension(defaults): Extension<ListDefaults>,
    RawQuery(raw): RawQuery,
) -> ApiResult<Json<Vec<UserDto>>> {
    let params = parse_list_query(raw.as_deref(), defaults);
    info!(
        limit = params.page.limit,
        offset = params.page.offset,
        "Listing users"
    );

    let users = svc
        .list_users(params.page, &params.filter, params.sort)
        .await
        .map_err(|e| problem(&e, &uri))?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

#[tracing::instrument(skip_all, fields(user.id = %id))]
pub async fn get_user<R: UsersRepository + 'static>(
    uri: Uri,
    Extension(svc): Extension<Arc<Service<R>>>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserDto>> {
    let id = parse_id(&id, &uri)?;
    let user = svc.get_user(id).await.map_err(|e| problem(&e, &uri))?;
    Ok(Json(UserDto::from(user)))
}

#[tracing::instrument(skip_all, fields(user.id = %id))]
pub async fn update_user<R: UsersRepository + 'static>(
    uri: Uri,
    Extension(svc): Extension<Arc<Service<R>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserReq>,
) -> ApiResult<Json<IdResponse>> {
    let id = parse_id(&id, &uri)?;
    info!("Updating user");
    let id = svc
        .update_user(req.into_user(id))
        .await
        .map_err(|e| problem(&e, &uri))?;
    Ok(Json(IdResponse { id }))
}

#[tracing::instrument(skip_all, fields(user.id = %id))]
pub async fn delete_user<R: UsersRepository + 'static>(
    uri: Uri,
    Extension(svc): Extension<Arc<Service<R>>>,
    Path(id): Path<String>,
) -> ApiResult<Json<IdResponse>> {
    let id = parse_id(&id, &uri)?;
    info!("Deleting user");
    let id = svc.delete_user(id).await.map_err(|e| problem(&e, &uri))?;
    Ok(Json(IdResponse { id }))
}
