//! GitHub adapter.
//!
//! Personal access token auth; the seat count is the organization's member
//! list length.

use async_trait::async_trait;
use bridge_traits::HttpRequest;
use chrono::Utc;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::adapter::{SyncResult, VendorAdapter, VendorContext};
use crate::error::{Result, VendorError};
use crate::reconcile::{reconcile, FetchedLicense, VendorProfile};

const API_BASE: &str = "https://api.github.com";

const PROFILE: VendorProfile = VendorProfile {
    vendor: "GitHub",
    vault_reference: "github-pat",
    category: "Development Tools",
    seat_driven_has_license: false,
};

/// GitHub vendor adapter
pub struct GitHubAdapter {
    ctx: VendorContext,
}

impl GitHubAdapter {
    pub fn new(ctx: VendorContext) -> Self {
        Self { ctx }
    }

    async fn token(&self) -> Result<String> {
        self.ctx
            .secrets
            .get_secret("github", "personal_access_token")
            .await
            .ok_or(VendorError::NotConfigured("GitHub token"))
    }

    async fn organization(&self) -> Result<String> {
        self.ctx
            .secrets
            .get_secret("github", "organization")
            .await
            .ok_or(VendorError::NotConfigured("GitHub organization"))
    }

    async fn fetch_member_count(&self, token: &str, org: &str) -> Result<i64> {
        let request = HttpRequest::get(format!(
            "{}/orgs/{}/members?per_page=100",
            API_BASE,
            urlencoding::encode(org)
        ))
        .bearer_token(token);

        let response = self.ctx.http.execute(request).await?;
        if !response.is_success() {
            return Err(VendorError::FetchFailed("GitHub organization info"));
        }

        let members: Vec<Value> = response.json().map_err(|e| VendorError::Parse {
            what: "GitHub members",
            message: e.to_string(),
        })?;

        Ok(members.len() as i64)
    }

    async fn run_sync(&self, result: &mut SyncResult) -> Result<()> {
        let token = self.token().await?;
        let org = self.organization().await?;
        let seats = self.fetch_member_count(&token, &org).await?;

        result.licenses_found = 1;
        let fetched = vec![FetchedLicense::new("GitHub Enterprise", seats)];
        reconcile(&self.ctx, &PROFILE, fetched, result).await
    }
}

#[async_trait]
impl VendorAdapter for GitHubAdapter {
    fn vendor_name(&self) -> &'static str {
        "GitHub"
    }

    #[instrument(skip(self), fields(vendor = "GitHub"))]
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
        let Ok(token) = self.token().await else {
            return false;
        };

        let request = HttpRequest::get(format!("{}/user", API_BASE)).bearer_token(token);
        match self.ctx.http.execute(request).await {
            Ok(response) => response.is_success(),
            Err(_) => false,
        }
    }
}
