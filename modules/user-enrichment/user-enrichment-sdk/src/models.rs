//! Public models for the `user-enrichment` module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the module and its consumers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A persisted user with inferred demographic attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub age: u32,
    pub gender: String,
    /// Upper-case country code, e.g. `"US"`.
    pub country: String,
}

/// Data for creating a new user. Demographics are inferred, never supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
}

impl NewUser {
    #[must_use]
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            patronymic: None,
        }
    }

    #[must_use]
    pub fn with_patronymic(mut self, patronymic: impl Into<String>) -> Self {
        self.patronymic = Some(patronymic.into());
        self
    }
}

/// Demographics inferred from a name. Lives only for one creation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub age: u32,
    pub gender: String,
    pub country: String,
}

/// Returned when a textual enum value is not one of the accepted names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {what}: '{value}'")]
pub struct ParseEnumError {
    pub what: &'static str,
    pub value: String,
}

impl ParseEnumError {
    fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_owned(),
        }
    }
}

/// Comparison applied to the age column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeOperator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl AgeOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
        }
    }
}

impl FromStr for AgeOperator {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Self::Eq),
            "ne" => Ok(Self::Ne),
            "gt" => Ok(Self::Gt),
            "ge" => Ok(Self::Ge),
            "lt" => Ok(Self::Lt),
            "le" => Ok(Self::Le),
            other => Err(ParseEnumError::new("age operator", other)),
        }
    }
}

/// Constraints narrowing a user listing. A `None` or empty field means
/// "no constraint", never "match empty".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserFilter {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub age: Option<u32>,
    pub age_operator: Option<AgeOperator>,
    /// Accepted genders, OR-combined, case-insensitive.
    pub genders: Vec<String>,
    /// Accepted countries, OR-combined, case-insensitive.
    pub countries: Vec<String>,
}

impl UserFilter {
    /// The effective age comparison.
    ///
    /// An age of `0` (or no age at all) and a missing operator both disable the
    /// comparison, so it is impossible to filter for `age <= 0`.
    #[must_use]
    pub fn age_condition(&self) -> Option<(AgeOperator, u32)> {
        match (self.age_operator, self.age) {
            (Some(op), Some(age)) if age > 0 => Some((op, age)),
            _ => None,
        }
    }
}

/// Columns a listing may be ordered by. Nothing outside this set can reach
/// the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    #[default]
    Id,
    Name,
    Surname,
    Patronymic,
    Age,
    Gender,
    Country,
}

impl SortField {
    pub const ALL: [Self; 7] = [
        Self::Id,
        Self::Name,
        Self::Surname,
        Self::Patronymic,
        Self::Age,
        Self::Gender,
        Self::Country,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Surname => "surname",
            Self::Patronymic => "patronymic",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Country => "country",
        }
    }
}

impl FromStr for SortField {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("sort field", s))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ParseEnumError::new("sort order", other)),
        }
    }
}

/// Ordering of a listing. Defaults to newest first (`id desc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl UserSort {
    #[must_use]
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

/// Offset-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u64 = 10;
    /// Largest limit or offset a SQL backend can bind (`i64::MAX`).
    pub const MAX_WINDOW: u64 = u64::MAX >> 1;

    #[must_use]
    pub const fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// Both bounds clamped to [`Self::MAX_WINDOW`].
    #[must_use]
    pub fn clamped(self) -> Self {
        Self::new(self.limit.min(Self::MAX_WINDOW), self.offset.min(Self::MAX_WINDOW))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT, 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_accepts_only_known_columns() {
        for field in SortField::ALL {
            assert_eq!(field.as_str().parse::<SortField>(), Ok(field));
        }
        assert!("id; DROP TABLE users".parse::<SortField>().is_err());
        assert!("ID".parse::<SortField>().is_err());
        assert!("".parse::<SortField>().is_err());
    }

    #[test]
    fn age_condition_requires_operator_and_positive_value() {
        let mut filter = UserFilter {
            age: Some(30),
            ..UserFilter::default()
        };
        assert_eq!(filter.age_condition(), None);

        filter.age_operator = Some(AgeOperator::Ge);
        assert_eq!(filter.age_condition(), Some((AgeOperator::Ge, 30)));

        filter.age = Some(0);
        assert_eq!(filter.age_condition(), None);

        filter.age = None;
        assert_eq!(filter.age_condition(), None);
    }

    #[test]
    fn age_operator_parses_short_names() {
        assert_eq!("le".parse::<AgeOperator>(), Ok(AgeOperator::Le));
        let err = "<=".parse::<AgeOperator>().unwrap_err();
        assert_eq!(err.to_string(), "unknown age operator: '<='");
    }

    #[test]
    fn defaults_match_listing_contract() {
        assert_eq!(PageRequest::default(), PageRequest::new(10, 0));
        let bound = u64::try_from(i64::MAX).unwrap();
        assert_eq!(
            PageRequest::new(u64::MAX, u64::MAX).clamped(),
            PageRequest::new(bound, bound)
        );
        assert_eq!(
            UserSort::default(),
            UserSort::new(SortField::Id, SortOrder::Desc)
        );
    }
}
