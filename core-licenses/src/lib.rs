//! # License Store Module
//!
//! Persistence layer for the license tracker.
//!
//! ## Components
//!
//! - **Models** (`models`): `License` and `Company` domain types with the
//!   derived `remaining_days` accessor
//! - **Repositories** (`repositories`): trait-based data access with SQLite
//!   implementations, including the batched `(name, vendor)` upsert used by
//!   vendor sync
//! - **Database** (`db`): connection pooling with embedded migrations

pub mod db;
pub mod error;
pub mod models;
pub mod repositories;

pub use db::{create_pool, create_test_pool, DatabaseConfig};
pub use error::{Result, StoreError};
pub use models::{Company, CompanyId, License, LicenseId};
pub use repositories::{
    CompanyRepository, LicenseRepository, SqliteCompanyRepository, SqliteLicenseRepository,
};
