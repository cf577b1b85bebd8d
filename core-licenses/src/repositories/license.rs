//! License repository trait and implementation

use crate::error::{Result, StoreError};
use crate::models::{CompanyId, License, LicenseId};
use crate::repositories::datetime_from_unix;
use async_trait::async_trait;
use sqlx::{query, query_as, FromRow, SqlitePool};

/// License repository interface for data access operations
#[async_trait]
pub trait LicenseRepository: Send + Sync {
    /// Find a license by its ID
    async fn find_by_id(&self, id: &LicenseId) -> Result<Option<License>>;

    /// Find a license by the `(name, vendor)` reconciliation key
    async fn find_by_name_and_vendor(&self, name: &str, vendor: &str)
        -> Result<Option<License>>;

    /// List all licenses, ordered by vendor then name
    async fn list(&self) -> Result<Vec<License>>;

    /// Insert a new license
    ///
    /// # Errors
    /// Returns an error if the `(name, vendor)` key already exists or the
    /// database operation fails.
    async fn insert(&self, license: &License) -> Result<()>;

    /// Update an existing license in full (CRUD surface)
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if the license does not exist.
    async fn update(&self, license: &License) -> Result<()>;

    /// Delete a license by ID
    ///
    /// # Returns
    /// - `Ok(true)` if the license was deleted
    /// - `Ok(false)` if it was not found
    async fn delete(&self, id: &LicenseId) -> Result<bool>;

    /// Write a batch of reconciled licenses in one transaction.
    ///
    /// Rows are keyed on `(name, vendor)`: a new key inserts the full row, an
    /// existing key only overwrites the sync-owned columns (`users`,
    /// `has_license`, `end_date`, `updated_at`). Manual fields like `cost`
    /// are left untouched.
    async fn upsert_batch(&self, licenses: &[License]) -> Result<()>;
}

/// SQLite implementation of LicenseRepository
pub struct SqliteLicenseRepository {
    pool: SqlitePool,
}

impl SqliteLicenseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a license
#[derive(Debug, FromRow)]
struct LicenseRow {
    id: String,
    name: String,
    vendor: String,
    category: String,
    company_id: Option<String>,
    has_license: bool,
    start_date: Option<i64>,
    end_date: Option<i64>,
    cost: Option<f64>,
    users: Option<i64>,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<LicenseRow> for License {
    type Error = StoreError;

    fn try_from(row: LicenseRow) -> Result<Self> {
        let id = LicenseId::from_string(&row.id).map_err(|e| StoreError::InvalidInput {
            field: "id".to_string(),
            message: e.to_string(),
        })?;

        let company_id = row
            .company_id
            .as_deref()
            .map(CompanyId::from_string)
            .transpose()
            .map_err(|e| StoreError::InvalidInput {
                field: "company_id".to_string(),
                message: e.to_string(),
            })?;

        Ok(License {
            id,
            name: row.name,
            vendor: row.vendor,
            category: row.category,
            company_id,
            has_license: row.has_license,
            start_date: row
                .start_date
                .map(|s| datetime_from_unix(s, "start_date"))
                .transpose()?,
            end_date: row
                .end_date
                .map(|s| datetime_from_unix(s, "end_date"))
                .transpose()?,
            cost: row.cost,
            users: row.users,
            created_at: datetime_from_unix(row.created_at, "created_at")?,
            updated_at: datetime_from_unix(row.updated_at, "updated_at")?,
        })
    }
}

#[async_trait]
impl LicenseRepository for SqliteLicenseRepository {
    async fn find_by_id(&self, id: &LicenseId) -> Result<Option<License>> {
        let row = query_as::<_, LicenseRow>("SELECT * FROM licenses WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(License::try_from).transpose()
    }

    async fn find_by_name_and_vendor(
        &self,
        name: &str,
        vendor: &str,
    ) -> Result<Option<License>> {
        let row =
            query_as::<_, LicenseRow>("SELECT * FROM licenses WHERE name = ? AND vendor = ?")
                .bind(name)
                .bind(vendor)
                .fetch_optional(&self.pool)
                .await?;

        row.map(License::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<License>> {
        let rows =
            query_as::<_, LicenseRow>("SELECT * FROM licenses ORDER BY vendor ASC, name ASC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(License::try_from).collect()
    }

    async fn insert(&self, license: &License) -> Result<()> {
        query(
            r#"
            INSERT INTO licenses (
                id, name, vendor, category, company_id, has_license,
                start_date, end_date, cost, users, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(license.id.to_string())
        .bind(&license.name)
        .bind(&license.vendor)
        .bind(&license.category)
        .bind(license.company_id.map(|id| id.to_string()))
        .bind(license.has_license)
        .bind(license.start_date.map(|d| d.timestamp()))
        .bind(license.end_date.map(|d| d.timestamp()))
        .bind(license.cost)
        .bind(license.users)
        .bind(license.created_at.timestamp())
        .bind(license.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, license: &License) -> Result<()> {
        let result = query(
            r#"
            UPDATE licenses
            SET name = ?, vendor = ?, category = ?, company_id = ?, has_license = ?,
                start_date = ?, end_date = ?, cost = ?, users = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&license.name)
        .bind(&license.vendor)
        .bind(&license.category)
        .bind(license.company_id.map(|id| id.to_string()))
        .bind(license.has_license)
        .bind(license.start_date.map(|d| d.timestamp()))
        .bind(license.end_date.map(|d| d.timestamp()))
        .bind(license.cost)
        .bind(license.users)
        .bind(license.updated_at.timestamp())
        .bind(license.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity_type: "License".to_string(),
                id: license.id.to_string(),
            });
        }

        Ok(())
    }

    async fn delete(&self, id: &LicenseId) -> Result<bool> {
        let result = query("DELETE FROM licenses WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn upsert_batch(&self, licenses: &[License]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for license in licenses {
            query(
                r#"
                INSERT INTO licenses (
                    id, name, vendor, category, company_id, has_license,
                    start_date, end_date, cost, users, created_at, updated_at
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT (name, vendor) DO UPDATE SET
                    users = excluded.users,
                    has_license = excluded.has_license,
                    end_date = excluded.end_date,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(license.id.to_string())
            .bind(&license.name)
            .bind(&license.vendor)
            .bind(&license.category)
            .bind(license.company_id.map(|id| id.to_string()))
            .bind(license.has_license)
            .bind(license.start_date.map(|d| d.timestamp()))
            .bind(license.end_date.map(|d| d.timestamp()))
            .bind(license.cost)
            .bind(license.users)
            .bind(license.created_at.timestamp())
            .bind(license.updated_at.timestamp())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
