//! Request types for the employee API
//!
//! Query-string structures with their defaults, plus the sort resolution
//! rules shared by every paged listing.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Largest page size a caller may request (the `range` bound on `PageQuery`
/// and `EmployeeSearch`)
pub const MAX_PAGE_SIZE: i64 = 1000;

pub(crate) fn default_page() -> i64 {
    0
}

pub(crate) fn default_size() -> i64 {
    10
}

pub(crate) fn default_sort_by() -> String {
    "id".to_string()
}

pub(crate) fn default_sort_direction() -> String {
    "asc".to_string()
}

/// Pagination and ordering query parameters (`GET /paginated`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// Page index (0-based, default: 0)
    #[serde(default = "default_page")]
    #[validate(range(min = 0, message = "Page index must not be less than zero"))]
    pub page: i64,

    /// Items per page (default: 10)
    #[serde(default = "default_size")]
    #[validate(range(
        min = 1,
        max = 1000,
        message = "Page size must be between 1 and 1000"
    ))]
    pub size: i64,

    /// Sort field (default: id)
    #[serde(default = "default_sort_by")]
    pub sort_by: String,

    /// Sort direction (default: asc)
    #[serde(default = "default_sort_direction")]
    pub sort_direction: String,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
            sort_by: default_sort_by(),
            sort_direction: default_sort_direction(),
        }
    }
}

/// `GET /search/name` parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameSearchQuery {
    pub name: String,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

/// `GET /search/department` parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentSearchQuery {
    pub department: String,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

/// Sort direction of a paged listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Resolve a caller-supplied direction.
    ///
    /// Only a case-insensitive `"desc"` sorts descending; every other value,
    /// including the empty string and typos, falls back to ascending.
    pub fn resolve(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Employee attributes a listing may be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Id,
    Name,
    Email,
    Department,
}

impl SortField {
    pub const ALL: [SortField; 4] = [Self::Id, Self::Name, Self::Email, Self::Department];

    /// Match a caller-supplied field name exactly (`id`, `name`, `email`, `department`)
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == raw)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Department => "department",
        }
    }
}
