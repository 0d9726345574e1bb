//! Lenient parsing of the listing query string.
//!
//! Bad values never fail the request; each falls back to its default.

use url::form_urlencoded;
use user_enrichment_sdk::{AgeOperator, PageRequest, SortField, SortOrder, UserFilter, UserSort};

/// Defaults the transport applies when a query parameter is missing or invalid.
#[derive(Debug, Clone, Copy)]
pub struct ListDefaults {
    pub page_size: u64,
}

impl Default for ListDefaults {
    fn default() -> Self {
        Self {
            page_size: PageRequest::DEFAULT_LIMIT,
        }
    }
}

/// Parsed listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: PageRequest,
    pub filter: UserFilter,
    pub sort: UserSort,
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Parse a raw query string. Repeated `gender` and `country` keys accumulate;
/// for every other key the last occurrence wins.
#[must_use]
pub fn parse_list_query(raw: Option<&str>, defaults: ListDefaults) -> ListParams {
    let mut filter = UserFilter::default();
    let mut sort = UserSort::default();
    let mut page = PageRequest::new(defaults.page_size, 0);

    for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
        let value = value.into_owned();
        match key.as_ref() {
            "name" => filter.name = non_empty(value),
            "surname" => filter.surname = non_empty(value),
            "patronymic" => filter.patronymic = non_empty(value),
            "age" => filter.age = value.parse::<u32>().ok(),
            "age_sort_operator" => filter.age_operator = value.parse::<AgeOperator>().ok(),
            "gender" => filter.genders.push(value),
            "country" => filter.countries.push(value),
            "sort_by" => sort.field = value.parse::<SortField>().unwrap_or_default(),
            "sort_order" => sort.order = value.parse::<SortOrder>().unwrap_or_default(),
            "limit" => {
                page.limit = value
                    .parse::<u64>()
                    .ok()
                    .filter(|l| *l > 0)
                    .unwrap_or(defaults.page_size);
            }
            "offset" => {
                page.offset = value
                    .parse::<u64>()
                    .map_or(0, |o| o.min(PageRequest::MAX_WINDOW));
            }
            _ => {}
        }
    }

    ListParams { page, filter, sort }
}
