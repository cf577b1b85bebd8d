//! # License Tracker API
//!
//! Thin HTTP surface over the sync orchestrator and the license store:
//! vendor-sync operations plus license/company CRUD. Per-vendor sync
//! failures are payload data (a failure `SyncResult`), never transport
//! errors; the only transport-level failures are lookup misses and
//! unexpected server faults.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::ApiError;
pub use routes::app_router;
pub use state::AppState;
