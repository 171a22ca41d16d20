//! Employee API Handlers

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use validator::Validate;

use shared::models::{EmployeeRequest, EmployeeResponse, EmployeeSearch, PagedEmployeeResponse};
use shared::request::{DepartmentSearchQuery, NameSearchQuery, PageQuery};
use shared::{AppError, AppResult};

use crate::state::AppState;

fn bad_json(rejection: JsonRejection) -> AppError {
    AppError::invalid_request(rejection.body_text())
}

fn bad_query(rejection: QueryRejection) -> AppError {
    AppError::invalid_request(rejection.body_text())
}

fn bad_path(rejection: PathRejection) -> AppError {
    AppError::invalid_request(rejection.body_text())
}

/// Create an employee (201)
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<EmployeeResponse>)> {
    let Json(request) = payload.map_err(bad_json)?;
    request.validate()?;
    let created = state.employees.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<EmployeeResponse>> {
    let Path(id) = id.map_err(bad_path)?;
    let employee = state.employees.get_by_id(id).await?;
    Ok(Json(employee))
}

/// List all employees
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let employees = state.employees.get_all().await?;
    Ok(Json(employees))
}

/// Update an employee
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> AppResult<Json<EmployeeResponse>> {
    let Path(id) = id.map_err(bad_path)?;
    let Json(request) = payload.map_err(bad_json)?;
    request.validate()?;
    let updated = state.employees.update(id, request).await?;
    Ok(Json(updated))
}

/// Delete an employee (204)
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id.map_err(bad_path)?;
    state.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// One page of all employees
pub async fn paginated(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> AppResult<Json<PagedEmployeeResponse>> {
    let Query(query) = query.map_err(bad_query)?;
    let page = state.employees.get_all_paginated(&query).await?;
    Ok(Json(page))
}

/// Search with optional name / department criteria
pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeSearch>, JsonRejection>,
) -> AppResult<Json<PagedEmployeeResponse>> {
    let Json(criteria) = payload.map_err(bad_json)?;
    run_search(&state, criteria).await
}

/// Search by name substring, id order
pub async fn search_by_name(
    State(state): State<AppState>,
    query: Result<Query<NameSearchQuery>, QueryRejection>,
) -> AppResult<Json<PagedEmployeeResponse>> {
    let Query(query) = query.map_err(bad_query)?;
    let criteria = EmployeeSearch {
        name: Some(query.name),
        page: query.page,
        size: query.size,
        ..EmployeeSearch::default()
    };
    run_search(&state, criteria).await
}

/// Search by department substring, id order
pub async fn search_by_department(
    State(state): State<AppState>,
    query: Result<Query<DepartmentSearchQuery>, QueryRejection>,
) -> AppResult<Json<PagedEmployeeResponse>> {
    let Query(query) = query.map_err(bad_query)?;
    let criteria = EmployeeSearch {
        department: Some(query.department),
        page: query.page,
        size: query.size,
        ..EmployeeSearch::default()
    };
    run_search(&state, criteria).await
}

async fn run_search(
    state: &AppState,
    criteria: EmployeeSearch,
) -> AppResult<Json<PagedEmployeeResponse>> {
    let page = state.employees.search(&criteria).await?;
    Ok(Json(page))
}
