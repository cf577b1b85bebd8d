//! Wire DTOs for the CRUD surface.
//!
//! `remaining_days` is computed from the stored `end_date` at the moment a
//! license is serialized, never persisted.

use chrono::{DateTime, Utc};
use core_licenses::{Company, CompanyId, License, LicenseId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseDto {
    pub id: Uuid,
    pub name: String,
    pub vendor: String,
    pub category: String,
    pub company_id: Option<Uuid>,
    pub has_license: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub cost: Option<f64>,
    pub users: Option<i64>,
    pub remaining_days: i64,
}

impl From<License> for LicenseDto {
    fn from(license: License) -> Self {
        let remaining_days = license.remaining_days();
        Self {
            id: license.id.0,
            name: license.name,
            vendor: license.vendor,
            category: license.category,
            company_id: license.company_id.map(|id| id.0),
            has_license: license.has_license,
            start_date: license.start_date,
            end_date: license.end_date,
            cost: license.cost,
            users: license.users,
            remaining_days,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLicenseRequest {
    pub name: String,
    pub vendor: String,
    pub category: String,
    pub company_id: Option<Uuid>,
    #[serde(default)]
    pub has_license: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub cost: Option<f64>,
    pub users: Option<i64>,
}

impl CreateLicenseRequest {
    pub fn into_license(self) -> License {
        let mut license = License::new(self.name, self.vendor, self.category);
        license.company_id = self.company_id.map(CompanyId);
        license.has_license = self.has_license;
        license.start_date = self.start_date;
        license.end_date = self.end_date;
        license.cost = self.cost;
        license.users = self.users;
        license
    }
}

/// Full-replace update, mirroring the create shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLicenseRequest {
    pub name: String,
    pub vendor: String,
    pub category: String,
    pub company_id: Option<Uuid>,
    #[serde(default)]
    pub has_license: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub cost: Option<f64>,
    pub users: Option<i64>,
}

impl UpdateLicenseRequest {
    pub fn apply_to(self, id: LicenseId, created_at: DateTime<Utc>) -> License {
        License {
            id,
            name: self.name,
            vendor: self.vendor,
            category: self.category,
            company_id: self.company_id.map(CompanyId),
            has_license: self.has_license,
            start_date: self.start_date,
            end_date: self.end_date,
            cost: self.cost,
            users: self.users,
            created_at,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub id: Uuid,
    pub name: String,
    pub api_key_vault_reference: String,
}

impl From<Company> for CompanyDto {
    fn from(company: Company) -> Self {
        Self {
            id: company.id.0,
            name: company.name,
            api_key_vault_reference: company.api_key_vault_reference,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyRequest {
    pub name: String,
    #[serde(default)]
    pub api_key_vault_reference: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_license_dto_carries_remaining_days() {
        let mut license = License::new("GitLab", "GitLab", "Development Tools");
        license.has_license = true;
        // Pad past the day boundary so the truncating division still reads
        // 10 by the time the DTO samples the clock.
        license.end_date = Some(Utc::now() + Duration::days(10) + Duration::minutes(5));

        let dto = LicenseDto::from(license);
        assert_eq!(dto.remaining_days, 10);
    }

    #[test]
    fn test_license_dto_serializes_camel_case() {
        let dto = LicenseDto::from(License::new("Zoom", "Zoom", "Video Conferencing"));
        let json = serde_json::to_value(&dto).unwrap();

        assert!(json.get("hasLicense").is_some());
        assert!(json.get("remainingDays").is_some());
        assert!(json.get("companyId").is_some());
        assert!(json.get("has_license").is_none());
    }

    #[test]
    fn test_create_request_maps_fields() {
        let request: CreateLicenseRequest = serde_json::from_value(serde_json::json!({
            "name": "Figma",
            "vendor": "Figma",
            "category": "Design",
            "hasLicense": true,
            "cost": 144.0,
            "users": 8
        }))
        .unwrap();

        let license = request.into_license();
        assert_eq!(license.name, "Figma");
        assert!(license.has_license);
        assert_eq!(license.cost, Some(144.0));
        assert_eq!(license.users, Some(8));
    }
}
