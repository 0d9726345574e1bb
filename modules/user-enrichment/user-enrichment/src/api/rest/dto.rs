use serde::{Deserialize, Serialize};
use user_enrichment_sdk::{NewUser, User};

/// REST DTO for user representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub age: u32,
    pub gender: String,
    pub country: String,
}

/// REST DTO for creating a new user.
///
/// Missing names decode as empty strings so they are reported as empty fields
/// rather than as a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateUserReq {
    pub name: String,
    pub surname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,
}

/// REST DTO for replacing a user. The id comes from the path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateUserReq {
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub age: u32,
    pub gender: String,
    pub country: String,
}

/// Body of create/update/delete responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: i32,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            patronymic: user.patronymic,
            age: user.age,
            gender: user.gender,
            country: user.country,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            name: req.name,
            surname: req.surname,
            patronymic: req.patronymic,
        }
    }
}

impl UpdateUserReq {
    #[must_use]
    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            name: self.name,
            surname: self.surname,
            patronymic: self.patronymic,
            age: self.age,
            gender: self.gender,
            country: self.country,
        }
    }
}
