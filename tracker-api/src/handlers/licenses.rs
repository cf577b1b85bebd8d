//! License CRUD handlers: thin pass-through to the repository.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_licenses::LicenseId;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{CreateLicenseRequest, LicenseDto, UpdateLicenseRequest};
use crate::state::AppState;

/// `GET /api/licenses`
pub async fn list_licenses(State(state): State<AppState>) -> Result<Json<Vec<LicenseDto>>> {
    let licenses = state.licenses.list().await?;
    Ok(Json(licenses.into_iter().map(LicenseDto::from).collect()))
}

/// `GET /api/licenses/{id}`
pub async fn get_license(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LicenseDto>> {
    let license = state
        .licenses
        .find_by_id(&LicenseId(id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("License '{}' not found", id)))?;

    Ok(Json(license.into()))
}

/// `POST /api/licenses`
pub async fn create_license(
    State(state): State<AppState>,
    Json(request): Json<CreateLicenseRequest>,
) -> Result<(StatusCode, Json<LicenseDto>)> {
    validate_names(&request.name, &request.vendor, &request.category)?;

    if state
        .licenses
        .find_by_name_and_vendor(&request.name, &request.vendor)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(format!(
            "License '{}' for vendor '{}' already exists",
            request.name, request.vendor
        )));
    }

    let license = request.into_license();
    state.licenses.insert(&license).await?;

    Ok((StatusCode::CREATED, Json(license.into())))
}

/// `PUT /api/licenses/{id}`
pub async fn update_license(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLicenseRequest>,
) -> Result<Json<LicenseDto>> {
    validate_names(&request.name, &request.vendor, &request.category)?;

    let existing = state
        .licenses
        .find_by_id(&LicenseId(id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("License '{}' not found", id)))?;

    let updated = request.apply_to(existing.id, existing.created_at);
    state.licenses.update(&updated).await?;

    Ok(Json(updated.into()))
}

/// `DELETE /api/licenses/{id}`
pub async fn delete_license(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if state.licenses.delete(&LicenseId(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("License '{}' not found", id)))
    }
}

fn validate_names(name: &str, vendor: &str, category: &str) -> Result<()> {
    if name.trim().is_empty() || vendor.trim().is_empty() || category.trim().is_empty() {
        return Err(ApiError::Validation(
            "name, vendor and category must not be empty".to_string(),
        ));
    }
    Ok(())
}
