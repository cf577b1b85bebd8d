//! Company CRUD handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_licenses::{Company, CompanyId};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{CompanyDto, CreateCompanyRequest};
use crate::state::AppState;

/// `GET /api/companies`
pub async fn list_companies(State(state): State<AppState>) -> Result<Json<Vec<CompanyDto>>> {
    let companies = state.companies.list().await?;
    Ok(Json(companies.into_iter().map(CompanyDto::from).collect()))
}

/// `GET /api/companies/{id}`
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CompanyDto>> {
    let company = state
        .companies
        .find_by_id(&CompanyId(id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Company '{}' not found", id)))?;

    Ok(Json(company.into()))
}

/// `POST /api/companies`
pub async fn create_company(
    State(state): State<AppState>,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<CompanyDto>)> {
    if request.name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }

    if state.companies.find_by_name(&request.name).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "Company '{}' already exists",
            request.name
        )));
    }

    let company =
        Company::new(request.name).with_vault_reference(request.api_key_vault_reference);
    state.companies.insert(&company).await?;

    Ok((StatusCode::CREATED, Json(company.into())))
}
