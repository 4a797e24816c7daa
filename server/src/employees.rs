//! Employee REST handlers: list, get, create, update, delete, env probe.

use axum::{
    Json,
    extract::{OriginalUri, Path, State},
};
use entity::employees;
use garde::Validate;
use sea_orm::{ActiveValue::NotSet, IntoActiveModel, Set, SqlErr};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{error::ApiError, http::AppState};

/// Incoming employee fields, shared by create and update.
///
/// Fields are optional at the serde layer so that a missing field surfaces
/// as a per-field validation message rather than a body-level decode error.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    #[garde(required, length(min = 1))]
    pub first_name: Option<String>,
    #[garde(required, length(min = 1))]
    pub last_name: Option<String>,
    #[garde(required, email)]
    pub email_id: Option<String>,
}

impl EmployeePayload {
    /// Field values, only meaningful after a successful `validate`.
    fn into_parts(self) -> (String, String, String) {
        (
            self.first_name.unwrap_or_default(),
            self.last_name.unwrap_or_default(),
            self.email_id.unwrap_or_default(),
        )
    }
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<employees::Model>>, ApiError> {
    info!("fetching all employees");
    Ok(Json(state.store.find_all().await?))
}

pub async fn get_employee(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> Result<Json<employees::Model>, ApiError> {
    info!(id, "fetching employee");
    let employee = state.store.find_by_id(id).await?.ok_or_else(|| {
        ApiError::not_found(format!("Employee not found for this id - {id}"), &uri)
    })?;
    Ok(Json(employee))
}

pub async fn create_employee(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(payload): Json<EmployeePayload>,
) -> Result<Json<employees::Model>, ApiError> {
    payload.validate().map_err(ApiError::validation)?;
    let (first_name, last_name, email_id) = payload.into_parts();
    info!(email = %email_id, "creating employee");
    if state.store.find_by_email(&email_id).await?.is_some() {
        warn!(email = %email_id, "employee email already in use");
        return Err(ApiError::duplicate_email(&email_id, &uri));
    }
    let employee = employees::ActiveModel {
        id: NotSet,
        first_name: Set(first_name),
        last_name: Set(last_name),
        email_id: Set(email_id.clone()),
    };
    // The unique index still covers the window between the lookup and the
    // insert; surface a racing duplicate the same way as the pre-check.
    let created = state.store.save(employee).await.map_err(|err| {
        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            ApiError::duplicate_email(&email_id, &uri)
        } else {
            ApiError::from(err)
        }
    })?;
    Ok(Json(created))
}

pub async fn update_employee(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeePayload>,
) -> Result<Json<employees::Model>, ApiError> {
    payload.validate().map_err(ApiError::validation)?;
    info!(id, "updating employee");
    let existing = state.store.find_by_id(id).await?.ok_or_else(|| {
        ApiError::not_found(format!("Employee not found for this id :: {id}"), &uri)
    })?;
    let (first_name, last_name, email_id) = payload.into_parts();
    let mut employee = existing.into_active_model();
    employee.email_id = Set(email_id);
    employee.last_name = Set(last_name);
    employee.first_name = Set(first_name);
    let updated = state.store.save(employee).await?;
    info!(id, "updated employee");
    Ok(Json(updated))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    info!(id, "deleting employee");
    let employee = state.store.find_by_id(id).await?.ok_or_else(|| {
        ApiError::not_found(format!("Employee not found for this id :: {id}"), &uri)
    })?;
    state.store.delete(employee).await?;
    info!(id, "deleted employee");
    Ok(Json(DeleteResponse { deleted: true }))
}

pub async fn environment(State(state): State<AppState>) -> String {
    format!("Environment: {}", state.config.environment)
}
