//! Dropbox adapter.
//!
//! Static team access token; `team/get_info` reports the licensed seat
//! count directly. Dropbox RPC endpoints are POSTs even for reads.

use async_trait::async_trait;
use bridge_traits::HttpRequest;
use chrono::Utc;
use serde::Deserialize;
use tracing::{instrument, warn};

use crate::adapter::{SyncResult, VendorAdapter, VendorContext};
use crate::error::{Result, VendorError};
use crate::reconcile::{reconcile, FetchedLicense, VendorProfile};

const TEAM_INFO_ENDPOINT: &str = "https://api.dropboxapi.com/2/team/get_info";

const PROFILE: VendorProfile = VendorProfile {
    vendor: "Dropbox",
    vault_reference: "dropbox-api",
    category: "Cloud Storage",
    seat_driven_has_license: false,
};

#[derive(Debug, Deserialize)]
struct TeamInfoResponse {
    num_licensed_users: i64,
}

/// Dropbox vendor adapter
pub struct DropboxAdapter {
    ctx: VendorContext,
}

impl DropboxAdapter {
    pub fn new(ctx: VendorContext) -> Self {
        Self { ctx }
    }

    async fn access_token(&self) -> Result<String> {
        self.ctx
            .secrets
            .get_secret("dropbox", "access_token")
            .await
            .ok_or(VendorError::NotConfigured("Dropbox access token"))
    }

    async fn fetch_team_seats(&self, token: &str) -> Result<i64> {
        let request = HttpRequest::post(TEAM_INFO_ENDPOINT).bearer_token(token);

        let response = self.ctx.http.execute(request).await?;
        if !response.is_success() {
            return Err(VendorError::FetchFailed("Dropbox team info"));
        }

        let info: TeamInfoResponse = response.json().map_err(|e| VendorError::Parse {
            what: "Dropbox team info",
            message: e.to_string(),
        })?;

        Ok(info.num_licensed_users)
    }

    async fn run_sync(&self, result: &mut SyncResult) -> Result<()> {
        let token = self.access_token().await?;
        let seats = self.fetch_team_seats(&token).await?;

        result.licenses_found = 1;
        let fetched = vec![FetchedLicense::new("Dropbox Business", seats)];
        reconcile(&self.ctx, &PROFILE, fetched, result).await
    }
}

#[async_trait]
impl VendorAdapter for DropboxAdapter {
    fn vendor_name(&self) -> &'static str {
        "Dropbox"
    }

    #[instrument(skip(self), fields(vendor = "Dropbox"))]
    async fn sync_licenses(&self) -> SyncResult {
        let mut result = SyncResult::started(self.vendor_name());
        match self.run_sync(&mut result).await {
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
        let Ok(token) = self.access_token().await else {
            return false;
        };

        let request = HttpRequest::post(TEAM_INFO_ENDPOINT).bearer_token(token);
        match self.ctx.http.execute(request).await {
            Ok(response) => response.is_success(),
            Err(_) => false,
        }
    }
}
