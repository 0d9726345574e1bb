//! Translation of `UserFilter` / `UserSort` / `PageRequest` into one `SELECT`.
//!
//! Every user-provided value is bound as a parameter. Column names come only
//! from `SortField` and the fixed columns below, never from request text.

use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{Condition, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Select};
use user_enrichment_sdk::{AgeOperator, PageRequest, SortField, SortOrder, UserFilter, UserSort};

use crate::infra::storage::entity::{Column, Entity as UserEntity};

const LIKE_ESCAPE: char = '\\';

/// Map a sort field to its column.
#[must_use]
pub fn sort_column(field: SortField) -> Column {
    match field {
        SortField::Id => Column::Id,
        SortField::Name => Column::Name,
        SortField::Surname => Column::Surname,
        SortField::Patronymic => Column::Patronymic,
        SortField::Age => Column::Age,
        SortField::Gender => Column::Gender,
        SortField::Country => Column::Country,
    }
}

fn order(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Escape LIKE wildcards so the value matches literally.
fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// `LOWER(column) LIKE '%value%'`, case-insensitive substring match.
///
/// The needle is lowercased with full Unicode rules, as Postgres `LOWER` folds
/// the column. SQLite's built-in `LOWER` folds ASCII only, so there non-ASCII
/// text matches only where the stored text is already lowercase.
fn contains(column: Column, value: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&value.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

fn age_clause(op: AgeOperator, age: u32) -> SimpleExpr {
    let age = i32::try_from(age).unwrap_or(i32::MAX);
    let col = Expr::col(Column::Age);
    match op {
        AgeOperator::Eq => col.eq(age),
        AgeOperator::Ne => col.ne(age),
        AgeOperator::Gt => col.gt(age),
        AgeOperator::Ge => col.gte(age),
        AgeOperator::Lt => col.lt(age),
        AgeOperator::Le => col.lte(age),
    }
}

/// AND of all present constraints. An empty filter yields an empty condition.
#[must_use]
pub fn filter_condition(filter: &UserFilter) -> Condition {
    let mut cond = Condition::all();

    for (column, value) in [
        (Column::Name, &filter.name),
        (Column::Surname, &filter.surname),
        (Column::Patronymic, &filter.patronymic),
    ] {
        if let Some(v) = non_blank(value.as_deref()) {
            cond = cond.add(contains(column, v));
        }
    }

    if let Some((op, age)) = filter.age_condition() {
        cond = cond.add(age_clause(op, age));
    }

    let genders = filter
        .genders
        .iter()
        .filter_map(|g| non_blank(Some(g.as_str())))
        .fold(Condition::any(), |any, g| {
            any.add(Expr::expr(Func::lower(Expr::col(Column::Gender))).eq(g.to_lowercase()))
        });
    if !genders.is_empty() {
        cond = cond.add(genders);
    }

    let countries = filter
        .countries
        .iter()
        .filter_map(|c| non_blank(Some(c.as_str())))
        .fold(Condition::any(), |any, c| {
            any.add(Expr::col(Column::Country).eq(c.to_uppercase()))
        });
    if !countries.is_empty() {
        cond = cond.add(countries);
    }

    cond
}

/// Build the listing query. A secondary `id ASC` keeps pages stable when the
/// primary sort column has duplicates.
#[must_use]
pub fn list_query(page: PageRequest, filter: &UserFilter, sort: UserSort) -> Select<UserEntity> {
    let cond = filter_condition(filter);
    let mut query = UserEntity::find();
    if !cond.is_empty() {
        query = query.filter(cond);
    }
    query = query.order_by(sort_column(sort.field), order(sort.order));
    if sort.field != SortField::Id {
        query = query.order_by(Column::Id, Order::Asc);
    }
    let page = page.clamped();
    query.limit(page.limit).offset(page.offset)
}
