//! Google Workspace adapter.
//!
//! Same situation as Adobe: the reseller subscriptions API needs a
//! service-account JWT grant that is not implemented, so the adapter
//! fails explicitly rather than guessing at a signing flow.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{instrument, warn};

use crate::adapter::{SyncResult, VendorAdapter, VendorContext};
use crate::error::{Result, VendorError};

/// Google Workspace vendor adapter
pub struct GoogleWorkspaceAdapter {
    ctx: VendorContext,
}

impl GoogleWorkspaceAdapter {
    pub fn new(ctx: VendorContext) -> Self {
        Self { ctx }
    }

    async fn run_sync(&self) -> Result<()> {
        let service_account_key = self
            .ctx
            .secrets
            .get_secret("google", "service_account_key")
            .await;

        if service_account_key.is_none() {
            return Err(VendorError::NotConfigured(
                "Google Workspace service account key",
            ));
        }

        Err(VendorError::AuthNotImplemented(
            "Google service-account JWT flow",
        ))
    }
}

#[async_trait]
impl VendorAdapter for GoogleWorkspaceAdapter {
    fn vendor_name(&self) -> &'static str {
        "Google"
    }

    #[instrument(skip(self), fields(vendor = "Google"))]
    async fn sync_licenses(&self) -> SyncResult {
        let mut result = SyncResult::started(self.vendor_name());
        match self.run_sync().await {
            Ok(()) => result.success = true,
            Err(e) => {
                warn!(error = %e, "License sync failed");
                result.error_message = Some(e.to_string());
            }
        }
        result.sync_time = Utc::now();
        result
    }

    async fn test_connection(&self) -> bool {
        false
    }
}
