//! Repository traits and SQLite implementations.

mod company;
mod license;

pub use company::{CompanyRepository, SqliteCompanyRepository};
pub use license::{LicenseRepository, SqliteLicenseRepository};

use crate::{Result, StoreError};
use chrono::{DateTime, Utc};

/// Decode a stored unix timestamp, rejecting out-of-range values.
pub(crate) fn datetime_from_unix(secs: i64, column: &str) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| StoreError::InvalidInput {
        field: column.to_string(),
        message: format!("Invalid timestamp: {}", secs),
    })
}
