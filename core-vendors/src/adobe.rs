//! Adobe adapter.
//!
//! The User Management API wants a signed service-account JWT exchanged
//! for an access token. That signing step is not implemented, so with
//! credentials configured the adapter reports an explicit
//! not-implemented failure instead of pretending to authenticate.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{instrument, warn};

use crate::adapter::{SyncResult, VendorAdapter, VendorContext};
use crate::error::{Result, VendorError};

/// Adobe vendor adapter
pub struct AdobeAdapter {
    ctx: VendorContext,
}

impl AdobeAdapter {
    pub fn new(ctx: VendorContext) -> Self {
        Self { ctx }
    }

    async fn run_sync(&self) -> Result<()> {
        let client_id = self.ctx.secrets.get_secret("adobe", "client_id").await;
        let client_secret = self.ctx.secrets.get_secret("adobe", "client_secret").await;

        if client_id.is_none() || client_secret.is_none() {
            return Err(VendorError::NotConfigured("Adobe API credentials"));
        }

        Err(VendorError::AuthNotImplemented(
            "Adobe JWT service-account flow",
        ))
    }
}

#[async_trait]
impl VendorAdapter for AdobeAdapter {
    fn vendor_name(&self) -> &'static str {
        "Adobe"
    }

    #[instrument(skip(self), fields(vendor = "Adobe"))]
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
        // No token without the JWT flow, so nothing to test against.
        false
    }
}
