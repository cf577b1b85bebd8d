//! Atlassian adapter.
//!
//! Basic auth with an account email and API token, scoped to one cloud
//! site. Jira seats come from the user search endpoint; Confluence is
//! tracked as a placeholder row until its seat endpoint is wired up.

use async_trait::async_trait;
use bridge_traits::HttpRequest;
use chrono::Utc;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::adapter::{SyncResult, VendorAdapter, VendorContext};
use crate::error::{Result, VendorError};
use crate::reconcile::{reconcile, FetchedLicense, VendorProfile};

const API_BASE: &str = "https://api.atlassian.com/ex/jira";

const PROFILE: VendorProfile = VendorProfile {
    vendor: "Atlassian",
    vault_reference: "atlassian-api",
    category: "Project Management",
    seat_driven_has_license: false,
};

struct Credentials {
    email: String,
    api_token: String,
    cloud_id: String,
}

/// Atlassian vendor adapter
pub struct AtlassianAdapter {
    ctx: VendorContext,
}

impl AtlassianAdapter {
    pub fn new(ctx: VendorContext) -> Self {
        Self { ctx }
    }

    async fn credentials(&self) -> Result<Credentials> {
        let email = self.ctx.secrets.get_secret("atlassian", "email").await;
        let api_token = self.ctx.secrets.get_secret("atlassian", "api_token").await;
        let cloud_id = self.ctx.secrets.get_secret("atlassian", "cloud_id").await;

        match (email, api_token, cloud_id) {
            (Some(email), Some(api_token), Some(cloud_id)) => Ok(Credentials {
                email,
                api_token,
                cloud_id,
            }),
            _ => Err(VendorError::NotConfigured("Atlassian API credentials")),
        }
    }

    async fn fetch_products(&self, creds: &Credentials) -> Result<Vec<FetchedLicense>> {
        let request = HttpRequest::get(format!(
            "{}/{}/rest/api/3/users/search",
            API_BASE, creds.cloud_id
        ))
        .basic_auth(&creds.email, &creds.api_token);

        let response = self.ctx.http.execute(request).await?;
        if !response.is_success() {
            return Err(VendorError::FetchFailed("Atlassian products"));
        }

        let users: Vec<Value> = response.json().map_err(|e| VendorError::Parse {
            what: "Atlassian users",
            message: e.to_string(),
        })?;

        Ok(vec![
            FetchedLicense::new("Jira Software", users.len() as i64),
            // TODO: query the Confluence user base once the site exposes it.
            FetchedLicense::new("Confluence", 0),
        ])
    }

    async fn run_sync(&self, result: &mut SyncResult) -> Result<()> {
        let creds = self.credentials().await?;
        let products = self.fetch_products(&creds).await?;
        result.licenses_found = products.len() as u32;
        reconcile(&self.ctx, &PROFILE, products, result).await
    }
}

#[async_trait]
impl VendorAdapter for AtlassianAdapter {
    fn vendor_name(&self) -> &'static str {
        "Atlassian"
    }

    #[instrument(skip(self), fields(vendor = "Atlassian"))]
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
        let Ok(creds) = self.credentials().await else {
            return false;
        };

        let request = HttpRequest::get(format!(
            "{}/{}/rest/api/3/myself",
            API_BASE, creds.cloud_id
        ))
        .basic_auth(&creds.email, &creds.api_token);

        match self.ctx.http.execute(request).await {
            Ok(response) => response.is_success(),
            Err(_) => false,
        }
    }
}
