//! Slack adapter.
//!
//! A static bot token; billable seats come from `team.billableInfo`, which
//! keys an object by member id.

use async_trait::async_trait;
use bridge_traits::HttpRequest;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{instrument, warn};

use crate::adapter::{SyncResult, VendorAdapter, VendorContext};
use crate::error::{Result, VendorError};
use crate::reconcile::{reconcile, FetchedLicense, VendorProfile};

const API_BASE: &str = "https://slack.com/api";

const PROFILE: VendorProfile = VendorProfile {
    vendor: "Slack",
    vault_reference: "slack-bot-token",
    category: "Communication",
    seat_driven_has_license: false,
};

/// Slack wraps every API answer in `ok`; errors are 200s with `ok: false`.
#[derive(Debug, Deserialize)]
struct BillableInfoResponse {
    ok: bool,
    #[serde(default)]
    billable_info: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct AuthTestResponse {
    ok: bool,
}

/// Slack vendor adapter
pub struct SlackAdapter {
    ctx: VendorContext,
}

impl SlackAdapter {
    pub fn new(ctx: VendorContext) -> Self {
        Self { ctx }
    }

    async fn bot_token(&self) -> Result<String> {
        self.ctx
            .secrets
            .get_secret("slack", "bot_token")
            .await
            .ok_or(VendorError::NotConfigured("Slack API token"))
    }

    async fn fetch_billable_seats(&self, token: &str) -> Result<i64> {
        let request =
            HttpRequest::get(format!("{}/team.billableInfo", API_BASE)).bearer_token(token);

        let response = self.ctx.http.execute(request).await?;
        if !response.is_success() {
            return Err(VendorError::FetchFailed("Slack workspace info"));
        }

        let info: BillableInfoResponse = response.json().map_err(|e| VendorError::Parse {
            what: "Slack billable info",
            message: e.to_string(),
        })?;

        if !info.ok {
            return Err(VendorError::FetchFailed("Slack workspace info"));
        }

        Ok(info.billable_info.len() as i64)
    }

    async fn run_sync(&self, result: &mut SyncResult) -> Result<()> {
        let token = self.bot_token().await?;
        let seats = self.fetch_billable_seats(&token).await?;

        result.licenses_found = 1;
        let fetched = vec![FetchedLicense::new("Slack Workspace", seats)];
        reconcile(&self.ctx, &PROFILE, fetched, result).await
    }
}

#[async_trait]
impl VendorAdapter for SlackAdapter {
    fn vendor_name(&self) -> &'static str {
        "Slack"
    }

    #[instrument(skip(self), fields(vendor = "Slack"))]
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
        let Ok(token) = self.bot_token().await else {
            return false;
        };

        let request = HttpRequest::get(format!("{}/auth.test", API_BASE)).bearer_token(token);
        match self.ctx.http.execute(request).await {
            Ok(response) if response.is_success() => response
                .json::<AuthTestResponse>()
                .map(|body| body.ok)
                .unwrap_or(false),
            _ => false,
        }
    }
}
