//! Vendor adapter contract and shared wiring.

use async_trait::async_trait;
use bridge_traits::{HttpClient, SecretStore};
use chrono::{DateTime, Utc};
use core_licenses::{CompanyRepository, LicenseRepository};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of one adapter invocation.
///
/// Created fresh at the start of a sync with only `vendor_name` set, filled
/// in as the adapter progresses, and handed to the orchestrator as an
/// immutable snapshot. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub vendor_name: String,
    pub success: bool,
    pub licenses_found: u32,
    pub licenses_added: u32,
    pub licenses_updated: u32,
    pub error_message: Option<String>,
    pub sync_time: DateTime<Utc>,
}

impl SyncResult {
    /// Fresh result at the start of a sync call.
    pub fn started(vendor_name: impl Into<String>) -> Self {
        Self {
            vendor_name: vendor_name.into(),
            success: false,
            licenses_found: 0,
            licenses_added: 0,
            licenses_updated: 0,
            error_message: None,
            sync_time: Utc::now(),
        }
    }

    /// Failure result with a message, used when an adapter never got far
    /// enough to fill anything else in.
    pub fn failure(vendor_name: impl Into<String>, message: impl Into<String>) -> Self {
        let mut result = Self::started(vendor_name);
        result.error_message = Some(message.into());
        result
    }
}

/// Shared collaborators handed to every adapter.
#[derive(Clone)]
pub struct VendorContext {
    pub http: Arc<dyn HttpClient>,
    pub secrets: Arc<dyn SecretStore>,
    pub companies: Arc<dyn CompanyRepository>,
    pub licenses: Arc<dyn LicenseRepository>,
}

impl VendorContext {
    pub fn new(
        http: Arc<dyn HttpClient>,
        secrets: Arc<dyn SecretStore>,
        companies: Arc<dyn CompanyRepository>,
        licenses: Arc<dyn LicenseRepository>,
    ) -> Self {
        Self {
            http,
            secrets,
            companies,
            licenses,
        }
    }
}

/// One implementation per vendor API.
///
/// The hard contract: `sync_licenses` and `test_connection` never fail
/// outward. Every failure path inside an adapter is converted into a
/// failure `SyncResult` (or `false` for connection tests) so that one
/// vendor's outage cannot take down a sync pass over the others.
#[async_trait]
pub trait VendorAdapter: Send + Sync {
    /// Stable vendor identifier, matched case-insensitively against route
    /// parameters and against `License::vendor`.
    fn vendor_name(&self) -> &'static str;

    /// Authenticate, fetch the seat inventory, reconcile it against the
    /// license store, and persist in one batch.
    async fn sync_licenses(&self) -> SyncResult;

    /// Cheapest possible authenticated call to confirm the credentials
    /// work. `false` on any failure; never an error.
    async fn test_connection(&self) -> bool;
}
