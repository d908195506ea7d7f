//! Handlers for the `/employee` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use roster_core::employee::{RawField, ENTITY};
use roster_core::error::CoreError;
use roster_core::types::DbId;
use roster_db::models::employee::{Employee, EmployeeInput, ValidEmployee};
use roster_db::repositories::EmployeeRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

fn validate(input: EmployeeInput) -> AppResult<ValidEmployee> {
    ValidEmployee::try_from(input).map_err(|errors| AppError::Core(errors.into()))
}

/// GET /api/employee
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Employee>>> {
    let employees = EmployeeRepo::list(&state.pool).await?;
    Ok(Json(employees))
}

/// GET /api/employee/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Employee>> {
    let employee = EmployeeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(employee))
}

/// POST /api/employee
///
/// Any `id` in the payload is ignored; the store assigns one.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let valid = validate(input)?;

    let employee = EmployeeRepo::create(&state.pool, &valid).await?;
    tracing::info!(employee_id = employee.id, "Employee created");

    let location = format!("/api/employee/{}", employee.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(employee),
    ))
}

/// PUT /api/employee/{id}
///
/// Full replacement. The payload id must equal the path id, checked before
/// any validation or storage access.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(input) = payload?;
    if input.id != RawField::Present(id) {
        return Err(AppError::BadRequest("ID mismatch".to_string()));
    }
    let valid = validate(input)?;

    if EmployeeRepo::update(&state.pool, id, &valid).await? {
        tracing::info!(employee_id = id, "Employee updated");
        return Ok(StatusCode::NO_CONTENT);
    }

    // No row touched: either it was deleted underneath us (not found) or
    // something else went wrong with the write.
    if EmployeeRepo::exists(&state.pool, id).await? {
        Err(AppError::InternalError(format!(
            "update of {ENTITY} {id} touched no rows although the row exists"
        )))
    } else {
        Err(not_found(id))
    }
}

/// DELETE /api/employee/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if EmployeeRepo::delete(&state.pool, id).await? {
        tracing::info!(employee_id = id, "Employee deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
