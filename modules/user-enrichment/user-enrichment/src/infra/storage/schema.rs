use sea_orm::{ConnectionTrait, DbErr, Schema};

use crate::infra::storage::entity::Entity as UserEntity;

/// Create the `users` table from the entity definition when it is missing.
///
/// # Errors
/// Returns the engine error when the DDL statement fails.
pub async fn ensure_users_table<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(UserEntity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    tracing::debug!(?backend, "users table ensured");
    Ok(())
}
