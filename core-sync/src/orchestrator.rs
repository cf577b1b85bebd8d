//! # Sync Orchestrator
//!
//! Drives the adapter set: sync-all, sync-one, connection tests, and the
//! vendor listing.
//!
//! ## Isolation
//!
//! Adapters already promise to convert every failure into a failure
//! `SyncResult`. The orchestrator defends against a broken implementation
//! anyway: each `sync_all` invocation runs on its own task, and a panic
//! surfaces as a failure result for that vendor alone. Both layers exist
//! on purpose.
//!
//! ## Ordering
//!
//! `sync_all` preserves registration order; `vendors` sorts
//! alphabetically. The two orders differ deliberately.

use crate::error::{Result, SyncError};
use core_vendors::{SyncResult, VendorAdapter};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Outcome of a single-vendor connection test.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTest {
    pub vendor_name: String,
    pub connected: bool,
    pub message: String,
}

/// Orchestrates sync and connection-test runs over the registered adapters.
pub struct SyncOrchestrator {
    adapters: Vec<Arc<dyn VendorAdapter>>,
}

impl SyncOrchestrator {
    /// Build an orchestrator over a fixed adapter set.
    ///
    /// Registration order is observable: `sync_all` reports results in
    /// this order.
    pub fn new(adapters: Vec<Arc<dyn VendorAdapter>>) -> Self {
        Self { adapters }
    }

    /// Case-insensitive adapter lookup.
    fn find(&self, vendor_name: &str) -> Result<Arc<dyn VendorAdapter>> {
        self.adapters
            .iter()
            .find(|adapter| adapter.vendor_name().eq_ignore_ascii_case(vendor_name))
            .cloned()
            .ok_or_else(|| SyncError::VendorNotFound(vendor_name.to_string()))
    }

    /// Run one adapter's sync on its own task so a panic cannot take the
    /// pass down with it.
    async fn sync_guarded(adapter: Arc<dyn VendorAdapter>) -> SyncResult {
        let vendor = adapter.vendor_name();
        match tokio::spawn(async move { adapter.sync_licenses().await }).await {
            Ok(result) => result,
            Err(e) => {
                error!(vendor, error = %e, "Adapter sync panicked");
                SyncResult::failure(vendor, format!("Unexpected fault: {}", e))
            }
        }
    }

    /// Sync every registered vendor, sequentially, in registration order.
    ///
    /// Always returns exactly one result per adapter regardless of
    /// individual outcomes.
    #[instrument(skip(self))]
    pub async fn sync_all(&self) -> Vec<SyncResult> {
        info!(adapters = self.adapters.len(), "Starting sync for all vendors");

        let mut results = Vec::with_capacity(self.adapters.len());
        for adapter in &self.adapters {
            let result = Self::sync_guarded(Arc::clone(adapter)).await;
            info!(
                vendor = %result.vendor_name,
                success = result.success,
                "Vendor sync finished"
            );
            results.push(result);
        }
        results
    }

    /// Sync a single vendor by name.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::VendorNotFound`] when no adapter matches; any
    /// sync failure still comes back as a failure `SyncResult`.
    pub async fn sync_one(&self, vendor_name: &str) -> Result<SyncResult> {
        let adapter = self.find(vendor_name)?;
        Ok(adapter.sync_licenses().await)
    }

    /// Test connectivity for every vendor; a panicking adapter reads as
    /// not connected.
    #[instrument(skip(self))]
    pub async fn test_all(&self) -> Vec<(String, bool)> {
        let mut results = Vec::with_capacity(self.adapters.len());
        for adapter in &self.adapters {
            let vendor = adapter.vendor_name().to_string();
            let adapter = Arc::clone(adapter);
            let connected = tokio::spawn(async move { adapter.test_connection().await })
                .await
                .unwrap_or_else(|e| {
                    error!(vendor = %e, "Adapter connection test panicked");
                    false
                });
            results.push((vendor, connected));
        }
        results
    }

    /// Test connectivity for a single vendor by name.
    pub async fn test_one(&self, vendor_name: &str) -> Result<ConnectionTest> {
        let adapter = self.find(vendor_name)?;
        let vendor = adapter.vendor_name().to_string();

        let connected = tokio::spawn(async move { adapter.test_connection().await })
            .await
            .unwrap_or(false);

        Ok(ConnectionTest {
            vendor_name: vendor,
            connected,
            message: if connected {
                "Connection successful".to_string()
            } else {
                "Connection failed".to_string()
            },
        })
    }

    /// Registered vendor names, alphabetically sorted. Purely
    /// informational; no I/O.
    pub fn vendors(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .adapters
            .iter()
            .map(|adapter| adapter.vendor_name().to_string())
            .collect();
        names.sort();
        names
    }
}
