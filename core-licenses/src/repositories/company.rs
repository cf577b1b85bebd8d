//! Company repository trait and implementation

use crate::error::{Result, StoreError};
use crate::models::{Company, CompanyId};
use crate::repositories::datetime_from_unix;
use async_trait::async_trait;
use sqlx::{query, query_as, FromRow, SqlitePool};

/// Company repository interface for data access operations
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Find a company by its ID
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>>;

    /// Find a company by exact name
    ///
    /// Vendor sync uses this to locate the vendor-owned company row before
    /// creating one.
    async fn find_by_name(&self, name: &str) -> Result<Option<Company>>;

    /// Insert a new company
    ///
    /// # Errors
    /// Returns an error if a company with the same name already exists or
    /// the database operation fails.
    async fn insert(&self, company: &Company) -> Result<()>;

    /// List all companies, ordered by name
    async fn list(&self) -> Result<Vec<Company>>;
}

/// SQLite implementation of CompanyRepository
pub struct SqliteCompanyRepository {
    pool: SqlitePool,
}

impl SqliteCompanyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CompanyRow {
    id: String,
    name: String,
    api_key_vault_reference: String,
    created_at: i64,
}

impl TryFrom<CompanyRow> for Company {
    type Error = StoreError;

    fn try_from(row: CompanyRow) -> Result<Self> {
        let id = CompanyId::from_string(&row.id).map_err(|e| StoreError::InvalidInput {
            field: "id".to_string(),
            message: e.to_string(),
        })?;

        Ok(Company {
            id,
            name: row.name,
            api_key_vault_reference: row.api_key_vault_reference,
            created_at: datetime_from_unix(row.created_at, "created_at")?,
        })
    }
}

#[async_trait]
impl CompanyRepository for SqliteCompanyRepository {
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>> {
        let row = query_as::<_, CompanyRow>("SELECT * FROM companies WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Company::try_from).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Company>> {
        let row = query_as::<_, CompanyRow>("SELECT * FROM companies WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Company::try_from).transpose()
    }

    async fn insert(&self, company: &Company) -> Result<()> {
        query(
            r#"
            INSERT INTO companies (id, name, api_key_vault_reference, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(company.id.to_string())
        .bind(&company.name)
        .bind(&company.api_key_vault_reference)
        .bind(company.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Company>> {
        let rows = query_as::<_, CompanyRow>("SELECT * FROM companies ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Company::try_from).collect()
    }
}
