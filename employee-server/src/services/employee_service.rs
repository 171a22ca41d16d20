//! Employee Service
//!
//! Business rules on top of the employee repository: email uniqueness on
//! create and update, typed not-found failures, and selection of the paged
//! query that matches a search.

use shared::error::{AppError, ErrorCode};
use shared::models::{Employee, EmployeeRequest, EmployeeResponse, EmployeeSearch, PagedEmployeeResponse};
use shared::request::{PageQuery, SortDirection, SortField};
use sqlx::SqlitePool;
use validator::Validate;

use crate::db::repository::RepoError;
use crate::db::repository::employee::{self, EmployeeFilter, EmployeePage, PageRequest};
use crate::error::{ServiceError, ServiceResult};

/// Employee CRUD, listing and search
#[derive(Debug, Clone)]
pub struct EmployeeService {
    pool: SqlitePool,
}

impl EmployeeService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an employee. The email must not be in use.
    pub async fn create(&self, request: EmployeeRequest) -> ServiceResult<EmployeeResponse> {
        if employee::exists_by_email(&self.pool, &request.email).await? {
            tracing::debug!(email = %request.email, "Create rejected: email exists");
            return Err(create_conflict(&request.email).into());
        }

        // The unique index catches a concurrent insert that passed the check above
        let created = employee::insert(
            &self.pool,
            &request.name,
            &request.email,
            &request.department,
        )
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => create_conflict(&request.email).into(),
            other => ServiceError::from(other),
        })?;

        tracing::info!(id = created.id, "Employee created");
        Ok(created.into())
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<EmployeeResponse> {
        self.find_existing(id).await.map(Into::into)
    }

    /// All employees in id order
    pub async fn get_all(&self) -> ServiceResult<Vec<EmployeeResponse>> {
        let employees = employee::find_all(&self.pool).await?;
        Ok(employees.into_iter().map(Into::into).collect())
    }

    /// Overwrite name, email and department of an existing employee.
    ///
    /// Keeping the current email is never a conflict; switching to an email
    /// held by another employee is.
    pub async fn update(&self, id: i64, request: EmployeeRequest) -> ServiceResult<EmployeeResponse> {
        let existing = self.find_existing(id).await?;

        if existing.email != request.email
            && employee::exists_by_email(&self.pool, &request.email).await?
        {
            tracing::debug!(id, email = %request.email, "Update rejected: email in use");
            return Err(update_conflict(&request.email).into());
        }

        let updated = employee::update(
            &self.pool,
            id,
            &request.name,
            &request.email,
            &request.department,
        )
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => update_conflict(&request.email).into(),
            RepoError::NotFound(_) => AppError::employee_not_found(id).into(),
            other => ServiceError::from(other),
        })?;

        tracing::info!(id, "Employee updated");
        Ok(updated.into())
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if !employee::exists_by_id(&self.pool, id).await? {
            tracing::warn!(id, "Delete rejected: employee not found");
            return Err(AppError::employee_not_found(id).into());
        }
        if !employee::delete_by_id(&self.pool, id).await? {
            return Err(AppError::employee_not_found(id).into());
        }
        tracing::info!(id, "Employee deleted");
        Ok(())
    }

    /// One page of all employees
    pub async fn get_all_paginated(&self, query: &PageQuery) -> ServiceResult<PagedEmployeeResponse> {
        query.validate().map_err(AppError::from)?;
        let page = page_request(query.page, query.size, &query.sort_by, &query.sort_direction)?;
        let result = employee::find_all_paged(&self.pool, page).await?;
        Ok(paged_response(result, page))
    }

    /// One page of employees matching the non-empty criteria (AND)
    pub async fn search(&self, criteria: &EmployeeSearch) -> ServiceResult<PagedEmployeeResponse> {
        criteria.validate().map_err(AppError::from)?;
        let page = page_request(
            criteria.page,
            criteria.size,
            &criteria.sort_by,
            &criteria.sort_direction,
        )?;
        let filter = EmployeeFilter::from_terms(criteria.name_filter(), criteria.department_filter());
        tracing::debug!(?filter, page = page.page, size = page.size, "Searching employees");

        let result = match filter {
            EmployeeFilter::NameAndDepartment { name, department } => {
                employee::find_by_name_and_department_containing(&self.pool, name, department, page)
                    .await?
            }
            EmployeeFilter::Name(name) => {
                employee::find_by_name_containing(&self.pool, name, page).await?
            }
            EmployeeFilter::Department(department) => {
                employee::find_by_department_containing(&self.pool, department, page).await?
            }
            EmployeeFilter::All => employee::find_all_paged(&self.pool, page).await?,
        };
        Ok(paged_response(result, page))
    }

    async fn find_existing(&self, id: i64) -> ServiceResult<Employee> {
        employee::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::employee_not_found(id).into())
    }
}

fn create_conflict(email: &str) -> AppError {
    AppError::email_exists(format!("Employee with email {email} already exists"), email)
}

fn update_conflict(email: &str) -> AppError {
    AppError::email_exists(format!("Email already in use: {email}"), email)
}

/// Build a page request from already validated paging parameters.
///
/// An unknown sort field is a validation failure; the direction falls back
/// to ascending unless it reads `desc`.
fn page_request(page: i64, size: i64, sort_by: &str, sort_direction: &str) -> ServiceResult<PageRequest> {
    let sort = SortField::parse(sort_by).ok_or_else(|| {
        let allowed: Vec<&str> = SortField::ALL.iter().map(SortField::as_str).collect();
        AppError::with_message(
            ErrorCode::ValidationFailed,
            format!("Unknown sort field: {sort_by}"),
        )
        .with_detail("sortBy", sort_by)
        .with_detail("allowed", allowed)
    })?;
    Ok(PageRequest::new(page, size).sorted(sort, SortDirection::resolve(sort_direction)))
}

fn paged_response(result: EmployeePage, page: PageRequest) -> PagedEmployeeResponse {
    PagedEmployeeResponse {
        employees: result.employees.into_iter().map(Into::into).collect(),
        current_page: page.page,
        total_items: result.total_items,
        total_pages: result.total_pages,
    }
}
