use user_enrichment_sdk::{NewUser, PageRequest, User, UserFilter, UserSort};

use super::{enrichment, Service};
use crate::domain::error::DomainError;
use crate::domain::repos::UsersRepository;

fn required(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::empty_field(field));
    }
    Ok(trimmed.to_owned())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn ensure_id(id: i32) -> Result<(), DomainError> {
    if id <= 0 {
        return Err(DomainError::invalid_value("id", "must be a positive integer"));
    }
    Ok(())
}

fn validate_new_user(new_user: NewUser) -> Result<NewUser, DomainError> {
    Ok(NewUser {
        name: required("name", &new_user.name)?,
        surname: required("surname", &new_user.surname)?,
        patronymic: optional(new_user.patronymic),
    })
}

fn validate_user(user: User) -> Result<User, DomainError> {
    ensure_id(user.id)?;
    let user = User {
        id: user.id,
        name: required("name", &user.name)?,
        surname: required("surname", &user.surname)?,
        patronymic: optional(user.patronymic),
        age: user.age,
        gender: required("gender", &user.gender)?.to_lowercase(),
        country: required("country", &user.country)?.to_uppercase(),
    };
    if user.age == 0 {
        return Err(DomainError::invalid_value("age", "must be positive"));
    }
    if i32::try_from(user.age).is_err() {
        return Err(DomainError::invalid_value("age", "out of range"));
    }
    Ok(user)
}

pub(super) async fn create_user<R: UsersRepository>(
    svc: &Service<R>,
    new_user: NewUser,
) -> Result<i32, DomainError> {
    let new_user = validate_new_user(new_user)?;
    tracing::debug!(name = %new_user.name, "Enriching new user");

    let enrichment = enrichment::enrich(
        svc.enrichment.as_ref(),
        &new_user.name,
        svc.config.enrichment_deadline,
    )
    .await?;

    let id = svc.repo.create(&new_user, &enrichment).await?;
    tracing::info!(
        user_id = id,
        age = enrichment.age,
        gender = %enrichment.gender,
        country = %enrichment.country,
        "Created user"
    );
    Ok(id)
}

pub(super) async fn list_users<R: UsersRepository>(
    svc: &Service<R>,
    page: PageRequest,
    filter: &UserFilter,
    sort: UserSort,
) -> Result<Vec<User>, DomainError> {
    let page = PageRequest::new(page.limit.min(svc.config.max_page_size), page.offset).clamped();
    tracing::debug!(
        limit = page.limit,
        offset = page.offset,
        sort_by = %sort.field,
        "Listing users"
    );
    svc.repo.list(page, filter, sort).await
}

pub(super) async fn get_user<R: UsersRepository>(
    svc: &Service<R>,
    id: i32,
) -> Result<User, DomainError> {
    ensure_id(id)?;
    tracing::debug!(user_id = id, "Getting user by id");
    svc.repo.get(id).await
}

pub(super) async fn update_user<R: UsersRepository>(
    svc: &Service<R>,
    user: User,
) -> Result<i32, DomainError> {
    let user = validate_user(user)?;
    let id = svc.repo.update(&user).await?;
    tracing::info!(user_id = id, "Updated user");
    Ok(id)
}

pub(super) async fn delete_user<R: UsersRepository>(
    svc: &Service<R>,
    id: i32,
) -> Result<i32, DomainError> {
    ensure_id(id)?;
    let id = svc.repo.delete(id).await?;
    tracing::info!(user_id = id, "Deleted user");
    Ok(id)
}
