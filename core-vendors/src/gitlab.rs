//! GitLab adapter.
//!
//! Personal access token via the `PRIVATE-TOKEN` header. Self-hosted
//! instances expose `/license` with active users and an expiry date;
//! gitlab.com does not, so the adapter falls back to counting active
//! users. Only this vendor reports an expiry, so only this adapter ever
//! writes `end_date`.

use async_trait::async_trait;
use bridge_traits::HttpRequest;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::adapter::{SyncResult, VendorAdapter, VendorContext};
use crate::error::{Result, VendorError};
use crate::reconcile::{reconcile, FetchedLicense, VendorProfile};

const DEFAULT_BASE_URL: &str = "https://gitlab.com";

const PROFILE: VendorProfile = VendorProfile {
    vendor: "GitLab",
    vault_reference: "gitlab-pat",
    category: "Development Tools",
    seat_driven_has_license: false,
};

#[derive(Debug, Deserialize)]
struct LicenseInfoResponse {
    active_users: i64,
    expires_at: Option<String>,
}

/// Parse the expiry the license endpoint reports: a plain date on
/// self-hosted instances, occasionally a full RFC 3339 timestamp.
fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// GitLab vendor adapter
pub struct GitLabAdapter {
    ctx: VendorContext,
}

impl GitLabAdapter {
    pub fn new(ctx: VendorContext) -> Self {
        Self { ctx }
    }

    async fn token(&self) -> Result<String> {
        self.ctx
            .secrets
            .get_secret("gitlab", "personal_access_token")
            .await
            .ok_or(VendorError::NotConfigured("GitLab token"))
    }

    async fn base_url(&self) -> String {
        self.ctx
            .secrets
            .get_secret("gitlab", "base_url")
            .await
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    async fn fetch_license_info(&self, token: &str, base_url: &str) -> Result<FetchedLicense> {
        // Self-hosted only; a 403/404 here just means gitlab.com.
        let request = HttpRequest::get(format!("{}/api/v4/license", base_url))
            .header("PRIVATE-TOKEN", token);

        let response = self.ctx.http.execute(request).await?;
        if response.is_success() {
            let info: LicenseInfoResponse = response.json().map_err(|e| VendorError::Parse {
                what: "GitLab license",
                message: e.to_string(),
            })?;

            let mut fetched = FetchedLicense::new("GitLab", info.active_users);
            fetched.expires_at = info.expires_at.as_deref().and_then(parse_expiry);
            return Ok(fetched);
        }

        debug!("No license endpoint, falling back to active user count");

        let request = HttpRequest::get(format!(
            "{}/api/v4/users?active=true&per_page=100",
            base_url
        ))
        .header("PRIVATE-TOKEN", token);

        let response = self.ctx.http.execute(request).await?;
        if !response.is_success() {
            return Err(VendorError::FetchFailed("GitLab license info"));
        }

        let users: Vec<Value> = response.json().map_err(|e| VendorError::Parse {
            what: "GitLab users",
            message: e.to_string(),
        })?;

        Ok(FetchedLicense::new("GitLab", users.len() as i64))
    }

    async fn run_sync(&self, result: &mut SyncResult) -> Result<()> {
        let token = self.token().await?;
        let base_url = self.base_url().await;
        let fetched = self.fetch_license_info(&token, &base_url).await?;

        result.licenses_found = 1;
        reconcile(&self.ctx, &PROFILE, vec![fetched], result).await
    }
}

#[async_trait]
impl VendorAdapter for GitLabAdapter {
    fn vendor_name(&self) -> &'static str {
        "GitLab"
    }

    #[instrument(skip(self), fields(vendor = "GitLab"))]
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

        let base_url = self.base_url().await;
        let request =
            HttpRequest::get(format!("{}/api/v4/user", base_url)).header("PRIVATE-TOKEN", token);
        match self.ctx.http.execute(request).await {
            Ok(response) => response.is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{context_with, json_response, MockHttpClient};
    use bridge_desktop::StaticSecretStore;

    fn configured_secrets() -> StaticSecretStore {
        StaticSecretStore::new().with("gitlab", "personal_access_token", "glpat-1")
    }

    #[test]
    fn test_parse_expiry_formats() {
        assert!(parse_expiry("2027-01-31").is_some());
        assert!(parse_expiry("2027-01-31T00:00:00Z").is_some());
        assert!(parse_expiry("soon").is_none());
    }

    #[tokio::test]
    async fn test_sync_uses_license_endpoint_with_expiry() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .withf(|req| req.url.ends_with("/api/v4/license"))
            .returning(|req| {
                assert_eq!(
                    req.headers.get("PRIVATE-TOKEN"),
                    Some(&"glpat-1".to_string())
                );
                Ok(json_response(
                    200,
                    r#"{"active_users":25,"expires_at":"2027-01-31"}"#,
                ))
            });

        let ctx = context_with(http, configured_secrets()).await;
        let result = GitLabAdapter::new(ctx.clone()).sync_licenses().await;

        assert!(result.success);
        let license = ctx
            .licenses
            .find_by_name_and_vendor("GitLab", "GitLab")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(license.users, Some(25));
        assert!(license.end_date.is_some(), "reported expiry is stored");
    }

    #[tokio::test]
    async fn test_sync_falls_back_to_user_count() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .withf(|req| req.url.ends_with("/api/v4/license"))
            .returning(|_| Ok(json_response(403, "{}")));
        http.expect_execute()
            .withf(|req| req.url.contains("/api/v4/users?active=true"))
            .returning(|_| Ok(json_response(200, r#"[{"id":1},{"id":2}]"#)));

        let ctx = context_with(http, configured_secrets()).await;
        let result = GitLabAdapter::new(ctx.clone()).sync_licenses().await;

        assert!(result.success);
        let license = ctx
            .licenses
            .find_by_name_and_vendor("GitLab", "GitLab")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(license.users, Some(2));
        assert!(license.end_date.is_none());
    }

    #[tokio::test]
    async fn test_custom_base_url() {
        let secrets = configured_secrets().with("gitlab", "base_url", "https://git.example.com");

        let mut http = MockHttpClient::new();
        http.expect_execute()
            .withf(|req| req.url.starts_with("https://git.example.com/api/v4/license"))
            .returning(|_| Ok(json_response(200, r#"{"active_users":7,"expires_at":null}"#)));

        let ctx = context_with(http, secrets).await;
        let result = GitLabAdapter::new(ctx).sync_licenses().await;

        assert!(result.success, "{:?}", result.error_message);
    }

    #[tokio::test]
    async fn test_both_endpoints_failing_is_a_fetch_failure() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .returning(|_| Ok(json_response(500, "{}")));

        let ctx = context_with(http, configured_secrets()).await;
        let result = GitLabAdapter::new(ctx).sync_licenses().await;

        assert!(!result.success);
        assert_eq!(
            result.error_message.as_deref(),
            Some("Failed to fetch GitLab license info")
        );
    }

    #[tokio::test]
    async fn test_missing_token_short_circuits() {
        let ctx = context_with(MockHttpClient::new(), StaticSecretStore::new()).await;
        let result = GitLabAdapter::new(ctx).sync_licenses().await;

        assert!(!result.success);
        assert_eq!(
            result.error_message.as_deref(),
            Some("GitLab token not configured")
        );
    }
}
