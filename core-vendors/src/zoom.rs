//! Zoom adapter.
//!
//! Server-to-server OAuth: the token endpoint takes `account_credentials`
//! with the client id/secret as basic auth, then the active-user count
//! comes from the users listing.

use async_trait::async_trait;
use bridge_traits::HttpRequest;
use chrono::Utc;
use serde::Deserialize;
use tracing::{instrument, warn};

use crate::adapter::{SyncResult, VendorAdapter, VendorContext};
use crate::error::{Result, VendorError};
use crate::reconcile::{reconcile, FetchedLicense, VendorProfile};

const OAUTH_ENDPOINT: &str = "https://zoom.us/oauth/token";
const API_BASE: &str = "https://api.zoom.us/v2";

const PROFILE: VendorProfile = VendorProfile {
    vendor: "Zoom",
    vault_reference: "zoom-api",
    category: "Video Conferencing",
    seat_driven_has_license: false,
};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
    total_records: i64,
}

/// Zoom vendor adapter
pub struct ZoomAdapter {
    ctx: VendorContext,
}

impl ZoomAdapter {
    pub fn new(ctx: VendorContext) -> Self {
        Self { ctx }
    }

    async fn acquire_token(&self) -> Result<String> {
        let account_id = self.ctx.secrets.get_secret("zoom", "account_id").await;
        let client_id = self.ctx.secrets.get_secret("zoom", "client_id").await;
        let client_secret = self.ctx.secrets.get_secret("zoom", "client_secret").await;

        let (account_id, client_id, client_secret) = match (account_id, client_id, client_secret)
        {
            (Some(account), Some(id), Some(secret)) => (account, id, secret),
            _ => return Err(VendorError::NotConfigured("Zoom API credentials")),
        };

        let request = HttpRequest::post(format!(
            "{}?grant_type=account_credentials&account_id={}",
            OAUTH_ENDPOINT,
            urlencoding::encode(&account_id)
        ))
        .basic_auth(&client_id, &client_secret);

        let response = self.ctx.http.execute(request).await?;
        if !response.is_success() {
            return Err(VendorError::AuthFailed("Zoom API"));
        }

        let token: TokenResponse = response.json().map_err(|e| VendorError::Parse {
            what: "Zoom token",
            message: e.to_string(),
        })?;

        Ok(token.access_token)
    }

    async fn fetch_account_seats(&self, access_token: &str) -> Result<i64> {
        let request = HttpRequest::get(format!(
            "{}/users?status=active&page_size=300",
            API_BASE
        ))
        .bearer_token(access_token);

        let response = self.ctx.http.execute(request).await?;
        if !response.is_success() {
            return Err(VendorError::FetchFailed("Zoom account info"));
        }

        let users: UsersResponse = response.json().map_err(|e| VendorError::Parse {
            what: "Zoom users",
            message: e.to_string(),
        })?;

        Ok(users.total_records)
    }

    async fn run_sync(&self, result: &mut SyncResult) -> Result<()> {
        let access_token = self.acquire_token().await?;
        let seats = self.fetch_account_seats(&access_token).await?;

        // The account is the product: one row covering the whole tenant.
        result.licenses_found = 1;
        let fetched = vec![FetchedLicense::new("Zoom", seats)];
        reconcile(&self.ctx, &PROFILE, fetched, result).await
    }
}

#[async_trait]
impl VendorAdapter for ZoomAdapter {
    fn vendor_name(&self) -> &'static str {
        "Zoom"
    }

    #[instrument(skip(self), fields(vendor = "Zoom"))]
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
        let Ok(access_token) = self.acquire_token().await else {
            return false;
        };

        let request = HttpRequest::get(format!("{}/users/me", API_BASE)).bearer_token(access_token);
        match self.ctx.http.execute(request).await {
            Ok(response) => response.is_success(),
            Err(_) => false,
        }
    }
}
