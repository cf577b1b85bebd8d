//! Shared state for API handlers.

use core_licenses::{CompanyRepository, LicenseRepository};
use core_sync::SyncOrchestrator;
use std::sync::Arc;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SyncOrchestrator>,
    pub licenses: Arc<dyn LicenseRepository>,
    pub companies: Arc<dyn CompanyRepository>,
}

impl AppState {
    pub fn new(
        orchestrator: Arc<SyncOrchestrator>,
        licenses: Arc<dyn LicenseRepository>,
        companies: Arc<dyn CompanyRepository>,
    ) -> Self {
        Self {
            orchestrator,
            licenses,
            companies,
        }
    }
}
