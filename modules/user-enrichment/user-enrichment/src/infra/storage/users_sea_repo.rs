use std::time::Duration;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::instrument;
use user_enrichment_sdk::{Enrichment, NewUser, PageRequest, User, UserFilter, UserSort};

use crate::domain::error::DomainError;
use crate::domain::repos::UsersRepository;
use crate::infra::storage::db::bounded;
use crate::infra::storage::entity::{Column, Entity as UserEntity};
use crate::infra::storage::filter::list_query;
use crate::infra::storage::mapper::{age_column, new_user_active_model};

/// ORM-based implementation of the `UsersRepository` trait.
///
/// Every statement runs under the configured storage timeout.
#[derive(Clone)]
pub struct OrmUsersRepository {
    db: DatabaseConnection,
    timeout: Duration,
}

impl OrmUsersRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }
}

#[async_trait]
impl UsersRepository for OrmUsersRepository {
    #[instrument(skip_all)]
    async fn create(
        &self,
        new_user: &NewUser,
        enrichment: &Enrichment,
    ) -> Result<i32, DomainError> {
        let m = new_user_active_model(new_user, enrichment)?;
        let res = bounded(
            self.timeout,
            "insert user",
            UserEntity::insert(m).exec(&self.db),
        )
        .await?;
        Ok(res.last_insert_id)
    }

    #[instrument(skip_all, fields(limit = page.limit, offset = page.offset))]
    async fn list(
        &self,
        page: PageRequest,
        filter: &UserFilter,
        sort: UserSort,
    ) -> Result<Vec<User>, DomainError> {
        let rows = bounded(
            self.timeout,
            "list users",
            list_query(page, filter, sort).all(&self.db),
        )
        .await?;
        rows.into_iter().map(User::try_from).collect()
    }

    #[instrument(skip_all, fields(user_id = id))]
    async fn get(&self, id: i32) -> Result<User, DomainError> {
        let found = bounded(
            self.timeout,
            "get user",
            UserEntity::find_by_id(id).one(&self.db),
        )
        .await?;
        found
            .ok_or_else(|| DomainError::user_not_found(id))
            .and_then(User::try_from)
    }

    #[instrument(skip_all, fields(user_id = user.id))]
    async fn update(&self, user: &User) -> Result<i32, DomainError> {
        let res = bounded(
            self.timeout,
            "update user",
            UserEntity::update_many()
                .col_expr(Column::Name, Expr::value(user.name.clone()))
                .col_expr(Column::Surname, Expr::value(user.surname.clone()))
                .col_expr(Column::Patronymic, Expr::value(user.patronymic.clone()))
                .col_expr(Column::Age, Expr::value(age_column(user.age)?))
                .col_expr(Column::Gender, Expr::value(user.gender.clone()))
                .col_expr(Column::Country, Expr::value(user.country.clone()))
                .filter(Column::Id.eq(user.id))
                .exec(&self.db),
        )
        .await?;

        if res.rows_affected == 0 {
            return Err(DomainError::user_not_found(user.id));
        }
        Ok(user.id)
    }

    #[instrument(skip_all, fields(user_id = id))]
    async fn delete(&self, id: i32) -> Result<i32, DomainError> {
        let res = bounded(
            self.timeout,
            "delete user",
            UserEntity::delete_by_id(id).exec(&self.db),
        )
        .await?;

        if res.rows_affected == 0 {
            return Err(DomainError::user_not_found(id));
        }
        Ok(id)
    }
}
