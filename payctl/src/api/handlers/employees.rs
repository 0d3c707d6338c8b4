//! HTTP handlers for employees and their dependents.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::employees::{EmployeeManage, EmployeeRequest, EmployeeResponse},
    db::{
        errors::DbError,
        handlers::{Employees, Repository},
        models::employees::{EmployeeCreateDBRequest, EmployeeUpdateDBRequest},
    },
    errors::{Error, Result},
    types::EmployeeId,
};

fn employee_not_found(id: EmployeeId) -> Error {
    Error::NotFound {
        resource: "Employee".to_string(),
        id: id.to_string(),
    }
}

#[utoipa::path(
    get,
    path = "/employee/manage",
    tag = "employees",
    summary = "List employees",
    description = "List every employee by name, for the management screen",
    responses(
        (status = 200, description = "Employees sorted by name", body = [EmployeeManage]),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<EmployeeManage>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Employees::new(&mut pool_conn);

    let employees = repo.list().await?;
    Ok(Json(employees.into_iter().map(EmployeeManage::from).collect()))
}

#[utoipa::path(
    get,
    path = "/employee/{id}",
    tag = "employees",
    summary = "Get employee",
    responses(
        (status = 200, description = "Employee with dependents in order", body = EmployeeResponse),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i32, Path, description = "Employee ID")
    )
)]
#[tracing::instrument(skip_all, fields(employee_id = id))]
pub async fn get_employee(State(state): State<AppState>, Path(id): Path<EmployeeId>) -> Result<Json<EmployeeResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Employees::new(&mut pool_conn);

    match repo.get_by_id(id).await? {
        Some(employee) => Ok(Json(EmployeeResponse::from(employee))),
        None => Err(employee_not_found(id)),
    }
}

#[utoipa::path(
    post,
    path = "/employee",
    tag = "employees",
    summary = "Create employee",
    description = "Create an employee together with its ordered dependents",
    request_body = EmployeeRequest,
    responses(
        (status = 200, description = "Employee created"),
        (status = 400, description = "Validation failed"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_employee(State(state): State<AppState>, Json(request): Json<EmployeeRequest>) -> Result<StatusCode> {
    let create = EmployeeCreateDBRequest::try_from(request)?;

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Employees::new(&mut pool_conn);

    let employee = repo.create(&create).await?;
    tracing::debug!(employee_id = employee.id, "Employee created");
    Ok(StatusCode::OK)
}

#[utoipa::path(
    put,
    path = "/employee/{id}",
    tag = "employees",
    summary = "Update employee",
    description = "Replace the employee's name and its full dependent list",
    request_body = EmployeeRequest,
    responses(
        (status = 200, description = "Employee updated"),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i32, Path, description = "Employee ID")
    )
)]
#[tracing::instrument(skip_all, fields(employee_id = id))]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
    Json(request): Json<EmployeeRequest>,
) -> Result<StatusCode> {
    let update = EmployeeUpdateDBRequest::try_from(request)?;

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Employees::new(&mut pool_conn);

    match repo.update(id, &update).await {
        Ok(_) => Ok(StatusCode::OK),
        Err(DbError::NotFound) => Err(employee_not_found(id)),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    delete,
    path = "/employee/{id}",
    tag = "employees",
    summary = "Delete employee",
    description = "Delete the employee and its dependents. Deleting a missing employee succeeds.",
    responses(
        (status = 200, description = "Employee deleted or already absent"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i32, Path, description = "Employee ID")
    )
)]
#[tracing::instrument(skip_all, fields(employee_id = id))]
pub async fn delete_employee(State(state): State<AppState>, Path(id): Path<EmployeeId>) -> Result<StatusCode> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Employees::new(&mut pool_conn);

    if !repo.delete(id).await? {
        tracing::debug!("Employee already absent");
    }
    Ok(StatusCode::OK)
}
