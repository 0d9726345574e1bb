use sea_orm::ActiveValue::{NotSet, Set};
use user_enrichment_sdk::{Enrichment, NewUser, User};

use crate::domain::error::DomainError;
use crate::infra::storage::entity::{ActiveModel as UserAM, Model as UserEntity};

/// Convert a database row to a contract model.
///
/// A negative stored age can only come from outside this service and is
/// reported as an internal error.
impl TryFrom<UserEntity> for User {
    type Error = DomainError;

    fn try_from(e: UserEntity) -> Result<Self, Self::Error> {
        let age = u32::try_from(e.age).map_err(|_| {
            DomainError::internal(format!("user {} has negative age {}", e.id, e.age))
        })?;
        Ok(Self {
            id: e.id,
            name: e.name,
            surname: e.surname,
            patronymic: e.patronymic,
            age,
            gender: e.gender,
            country: e.country,
        })
    }
}

pub(crate) fn age_column(age: u32) -> Result<i32, DomainError> {
    i32::try_from(age).map_err(|_| DomainError::invalid_value("age", "out of range"))
}

/// Build the insert model from a validated request and its enrichment.
pub(crate) fn new_user_active_model(
    new_user: &NewUser,
    enrichment: &Enrichment,
) -> Result<UserAM, DomainError> {
    Ok(UserAM {
        id: NotSet,
        name: Set(new_user.name.clone()),
        surname: Set(new_user.surname.clone()),
        patronymic: Set(new_user.patronymic.clone()),
        age: Set(age_column(enrichment.age)?),
        gender: Set(enrichment.gender.clone()),
        country: Set(enrichment.country.clone()),
    })
}
