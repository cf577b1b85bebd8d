//! Domain models for tracked licenses and their owning companies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// ID Types
// =============================================================================

/// Unique identifier for a license
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LicenseId(pub Uuid);

impl LicenseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for LicenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LicenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub Uuid);

impl CompanyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for CompanyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Company
// =============================================================================

/// A company row.
///
/// Serves double duty: companies created by users through the CRUD surface,
/// and vendor-owned rows that license sync creates on first contact with a
/// vendor (a row named "Microsoft", "Zoom", ...). `api_key_vault_reference`
/// is an opaque label pointing at wherever the real credentials live; it is
/// never a secret itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub api_key_vault_reference: String,
    pub created_at: DateTime<Utc>,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CompanyId::new(),
            name: name.into(),
            api_key_vault_reference: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Builder-style vault reference label.
    pub fn with_vault_reference(mut self, reference: impl Into<String>) -> Self {
        self.api_key_vault_reference = reference.into();
        self
    }
}

// =============================================================================
// License
// =============================================================================

/// A tracked license for one product from one vendor.
///
/// `(name, vendor)` is unique; vendor sync reconciles against that key.
/// `users` holds the vendor-reported seat count. `cost` is a manual field
/// that sync never writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub id: LicenseId,
    pub name: String,
    pub vendor: String,
    pub category: String,
    pub company_id: Option<CompanyId>,
    pub has_license: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub cost: Option<f64>,
    pub users: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl License {
    pub fn new(
        name: impl Into<String>,
        vendor: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: LicenseId::new(),
            name: name.into(),
            vendor: vendor.into(),
            category: category.into(),
            company_id: None,
            has_license: false,
            start_date: None,
            end_date: None,
            cost: None,
            users: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Days until expiry, derived at read time.
    ///
    /// Zero when there is no active license or no end date; negative once
    /// the end date has passed. Never persisted, since the value shifts
    /// with the wall clock.
    pub fn remaining_days_at(&self, now: DateTime<Utc>) -> i64 {
        match self.end_date {
            Some(end) if self.has_license => (end - now).num_days(),
            _ => 0,
        }
    }

    /// Days until expiry relative to the current wall clock.
    pub fn remaining_days(&self) -> i64 {
        self.remaining_days_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn active_license(end_date: Option<DateTime<Utc>>) -> License {
        let mut license = License::new("Office 365 E3", "Microsoft", "Cloud Service");
        license.has_license = true;
        license.end_date = end_date;
        license
    }

    #[test]
    fn test_remaining_days_future_end_date() {
        let now = Utc::now();
        let license = active_license(Some(now + Duration::days(10)));

        assert_eq!(license.remaining_days_at(now), 10);
    }

    #[test]
    fn test_remaining_days_no_end_date() {
        let now = Utc::now();
        let license = active_license(None);

        assert_eq!(license.remaining_days_at(now), 0);
    }

    #[test]
    fn test_remaining_days_without_active_license() {
        let now = Utc::now();
        let mut license = active_license(Some(now + Duration::days(30)));
        license.has_license = false;

        assert_eq!(license.remaining_days_at(now), 0);
    }

    #[test]
    fn test_remaining_days_past_end_date_is_negative() {
        let now = Utc::now();
        let license = active_license(Some(now - Duration::days(5)));

        assert_eq!(license.remaining_days_at(now), -5);
    }

    #[test]
    fn test_company_builder() {
        let company = Company::new("Zoom").with_vault_reference("zoom-api");

        assert_eq!(company.name, "Zoom");
        assert_eq!(company.api_key_vault_reference, "zoom-api");
    }
}
