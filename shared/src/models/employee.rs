//! Employee Model

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidateEmail, ValidationError};

use crate::request::{default_page, default_size, default_sort_by, default_sort_direction};

/// Employee entity (row of the `employees` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: String,
}

/// Create / update employee payload
///
/// Missing and `null` fields deserialize as empty strings so they are
/// reported by validation (400 with field messages) rather than by the JSON
/// decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EmployeeRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_department"))]
    pub department: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl EmployeeRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            department: department.into(),
        }
    }
}

/// Employee as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: String,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            department: employee.department,
        }
    }
}

/// Search criteria (`POST /search` body)
///
/// An absent or empty `name` / `department` means "no filter on that field".
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSearch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default = "default_page")]
    #[validate(range(min = 0, message = "Page index must not be less than zero"))]
    pub page: i64,
    #[serde(default = "default_size")]
    #[validate(range(
        min = 1,
        max = 1000,
        message = "Page size must be between 1 and 1000"
    ))]
    pub size: i64,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_direction")]
    pub sort_direction: String,
}

impl Default for EmployeeSearch {
    fn default() -> Self {
        Self {
            name: None,
            department: None,
            page: default_page(),
            size: default_size(),
            sort_by: default_sort_by(),
            sort_direction: default_sort_direction(),
        }
    }
}

impl EmployeeSearch {
    /// Name filter, if present and non-empty
    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    /// Department filter, if present and non-empty
    pub fn department_filter(&self) -> Option<&str> {
        self.department.as_deref().filter(|s| !s.is_empty())
    }
}

/// Page envelope returned by every paged listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedEmployeeResponse {
    pub employees: Vec<EmployeeResponse>,
    pub current_page: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

// ── Field validators ──

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "Name is required"));
    }
    Ok(())
}

fn validate_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "Email is required"));
    }
    if !value.validate_email() {
        return Err(invalid("email", "Email should be valid"));
    }
    Ok(())
}

fn validate_department(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "Department is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_messages(req: &EmployeeRequest) -> Vec<(String, String)> {
        let errors = req.validate().unwrap_err();
        let mut out: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter()
                    .map(|e| (field.to_string(), e.message.clone().unwrap().to_string()))
                    .collect::<Vec<_>>()
            })
            .collect();
        out.sort();
        out
    }

    #[test]
    fn test_valid_request() {
        let req = EmployeeRequest::new("Ann", "ann@x.com", "Eng");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_blank_fields_rejected() {
        let req = EmployeeRequest::new("  ", "", "\t");
        assert_eq!(
            field_messages(&req),
            vec![
                ("department".to_string(), "Department is required".to_string()),
                ("email".to_string(), "Email is required".to_string()),
                ("name".to_string(), "Name is required".to_string()),
            ]
        );
    }

    #[test]
    fn test_malformed_email_rejected() {
        let req = EmployeeRequest::new("Ann", "not-an-email", "Eng");
        assert_eq!(
            field_messages(&req),
            vec![("email".to_string(), "Email should be valid".to_string())]
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let req: EmployeeRequest = serde_json::from_str(r#"{"name":"Ann"}"#).unwrap();
        assert_eq!(req.email, "");
        assert_eq!(req.department, "");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_response_from_entity() {
        let employee = Employee {
            id: 7,
            name: "Ann".into(),
            email: "ann@x.com".into(),
            department: "Eng".into(),
        };
        let response = EmployeeResponse::from(employee);
        assert_eq!(response.id, 7);
        assert_eq!(response.email, "ann@x.com");
    }

    #[test]
    fn test_null_fields_default_to_empty() {
        let req: EmployeeRequest =
            serde_json::from_str(r#"{"name":null,"email":"ann@x.com","department":null}"#).unwrap();
        assert_eq!(req.name, "");
        assert_eq!(req.department, "");
        assert_eq!(
            field_messages(&req),
            vec![
                ("department".to_string(), "Department is required".to_string()),
                ("name".to_string(), "Name is required".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_page_size_bound() {
        let largest = EmployeeSearch {
            size: crate::request::MAX_PAGE_SIZE,
            ..EmployeeSearch::default()
        };
        assert!(largest.validate().is_ok());

        let too_large = EmployeeSearch {
            size: crate::request::MAX_PAGE_SIZE + 1,
            ..EmployeeSearch::default()
        };
        assert!(too_large.validate().is_err());
    }

    #[test]
    fn test_search_defaults_and_filters() {
        let search: EmployeeSearch = serde_json::from_str(r#"{"name":"","department":"Eng"}"#).unwrap();
        assert_eq!(search.page, 0);
        assert_eq!(search.size, 10);
        assert_eq!(search.sort_by, "id");
        assert_eq!(search.sort_direction, "asc");
        assert_eq!(search.name_filter(), None);
        assert_eq!(search.department_filter(), Some("Eng"));
    }

    #[test]
    fn test_paged_response_wire_names() {
        let page = PagedEmployeeResponse {
            employees: vec![],
            current_page: 1,
            total_items: 11,
            total_pages: 2,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "employees": [],
                "currentPage": 1,
                "totalItems": 11,
                "totalPages": 2
            })
        );
    }
}
