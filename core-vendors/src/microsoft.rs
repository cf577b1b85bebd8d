//! Microsoft Graph adapter.
//!
//! Authenticates with the OAuth2 client-credentials flow against Azure AD,
//! then reads `subscribedSkus` for per-SKU assigned seat counts.

use async_trait::async_trait;
use bridge_traits::HttpRequest;
use chrono::Utc;
use serde::Deserialize;
use tracing::{instrument, warn};

use crate::adapter::{SyncResult, VendorAdapter, VendorContext};
use crate::error::{Result, VendorError};
use crate::reconcile::{reconcile, FetchedLicense, VendorProfile};

const LOGIN_BASE: &str = "https://login.microsoftonline.com";
const GRAPH_BASE: &str = "https://graph.microsoft.com/v1.0";

const PROFILE: VendorProfile = VendorProfile {
    vendor: "Microsoft",
    vault_reference: "microsoft-graph-api",
    category: "Cloud Service",
    seat_driven_has_license: true,
};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SubscribedSkusResponse {
    value: Vec<SubscribedSku>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscribedSku {
    sku_part_number: String,
    consumed_units: i64,
}

/// Map well-known SKU part numbers to the names shown in the M365 admin UI.
fn friendly_sku_name(sku_part_number: &str) -> String {
    match sku_part_number {
        "ENTERPRISEPACK" => "Office 365 E3",
        "ENTERPRISEPREMIUM" => "Office 365 E5",
        "SPE_E3" => "Microsoft 365 E3",
        "SPE_E5" => "Microsoft 365 E5",
        "PROJECTPROFESSIONAL" => "Project Plan 3",
        "VISIOCLIENT" => "Visio Plan 2",
        "POWER_BI_PRO" => "Power BI Pro",
        other => other,
    }
    .to_string()
}

/// Microsoft Graph vendor adapter
pub struct MicrosoftAdapter {
    ctx: VendorContext,
}

impl MicrosoftAdapter {
    pub fn new(ctx: VendorContext) -> Self {
        Self { ctx }
    }

    async fn credentials(&self) -> Result<(String, String, String)> {
        let tenant_id = self.ctx.secrets.get_secret("microsoft", "tenant_id").await;
        let client_id = self.ctx.secrets.get_secret("microsoft", "client_id").await;
        let client_secret = self
            .ctx
            .secrets
            .get_secret("microsoft", "client_secret")
            .await;

        match (tenant_id, client_id, client_secret) {
            (Some(tenant), Some(id), Some(secret)) => Ok((tenant, id, secret)),
            _ => Err(VendorError::NotConfigured(
                "Microsoft Graph API credentials",
            )),
        }
    }

    async fn acquire_token(&self) -> Result<String> {
        let (tenant_id, client_id, client_secret) = self.credentials().await?;

        let request = HttpRequest::post(format!("{}/{}/oauth2/v2.0/token", LOGIN_BASE, tenant_id))
            .form(&[
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("scope", "https://graph.microsoft.com/.default"),
                ("grant_type", "client_credentials"),
            ])?;

        let response = self.ctx.http.execute(request).await?;
        if !response.is_success() {
            return Err(VendorError::AuthFailed("Microsoft Graph API"));
        }

        let token: TokenResponse = response.json().map_err(|e| VendorError::Parse {
            what: "Microsoft token",
            message: e.to_string(),
        })?;

        Ok(token.access_token)
    }

    async fn fetch_subscribed_skus(&self, access_token: &str) -> Result<Vec<FetchedLicense>> {
        let request =
            HttpRequest::get(format!("{}/subscribedSkus", GRAPH_BASE)).bearer_token(access_token);

        let response = self.ctx.http.execute(request).await?;
        if !response.is_success() {
            return Err(VendorError::FetchFailed("Microsoft subscribed SKUs"));
        }

        let skus: SubscribedSkusResponse = response.json().map_err(|e| VendorError::Parse {
            what: "Microsoft subscribed SKUs",
            message: e.to_string(),
        })?;

        Ok(skus
            .value
            .into_iter()
            .map(|sku| {
                FetchedLicense::new(friendly_sku_name(&sku.sku_part_number), sku.consumed_units)
            })
            .collect())
    }

    async fn run_sync(&self, result: &mut SyncResult) -> Result<()> {
        let access_token = self.acquire_token().await?;
        let licenses = self.fetch_subscribed_skus(&access_token).await?;
        result.licenses_found = licenses.len() as u32;
        reconcile(&self.ctx, &PROFILE, licenses, result).await
    }
}

#[async_trait]
impl VendorAdapter for MicrosoftAdapter {
    fn vendor_name(&self) -> &'static str {
        "Microsoft"
    }

    #[instrument(skip(self), fields(vendor = "Microsoft"))]
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

        let request =
            HttpRequest::get(format!("{}/organization", GRAPH_BASE)).bearer_token(access_token);
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
        StaticSecretStore::new()
            .with("microsoft", "tenant_id", "tenant-1")
            .with("microsoft", "client_id", "client-1")
            .with("microsoft", "client_secret", "s3cret")
    }

    fn mock_graph(times: usize) -> MockHttpClient {
        let mut http = MockHttpClient::new();

        http.expect_execute()
            .withf(|req| req.url.contains("login.microsoftonline.com/tenant-1"))
            .times(times)
            .returning(|_| Ok(json_response(200, r#"{"access_token":"tok","expires_in":3599,"token_type":"Bearer"}"#)));

        http.expect_execute()
            .withf(|req| req.url.ends_with("/subscribedSkus"))
            .times(times)
            .returning(|req| {
                assert_eq!(
                    req.headers.get("Authorization"),
                    Some(&"Bearer tok".to_string())
                );
                Ok(json_response(
                    200,
                    r#"{"value":[
                        {"skuPartNumber":"ENTERPRISEPACK","consumedUnits":120},
                        {"skuPartNumber":"POWER_BI_PRO","consumedUnits":0}
                    ]}"#,
                ))
            });

        http
    }

    #[tokio::test]
    async fn test_sync_creates_sku_rows() {
        let ctx = context_with(mock_graph(1), configured_secrets()).await;
        let adapter = MicrosoftAdapter::new(ctx.clone());

        let result = adapter.sync_licenses().await;

        assert!(result.success, "{:?}", result.error_message);
        assert_eq!(result.licenses_found, 2);
        assert_eq!(result.licenses_added, 2);
        assert_eq!(result.licenses_updated, 0);

        let office = ctx
            .licenses
            .find_by_name_and_vendor("Office 365 E3", "Microsoft")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(office.users, Some(120));
        assert!(office.has_license);
        assert_eq!(office.category, "Cloud Service");

        let company = ctx
            .companies
            .find_by_name("Microsoft")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(company.api_key_vault_reference, "microsoft-graph-api");
        assert_eq!(office.company_id, Some(company.id));
    }

    #[tokio::test]
    async fn test_second_sync_updates_instead_of_adding() {
        let ctx = context_with(mock_graph(2), configured_secrets()).await;
        let adapter = MicrosoftAdapter::new(ctx.clone());

        let first = adapter.sync_licenses().await;
        assert_eq!((first.licenses_added, first.licenses_updated), (2, 0));

        let second = adapter.sync_licenses().await;
        assert!(second.success);
        assert_eq!((second.licenses_added, second.licenses_updated), (0, 2));

        // No duplicate rows for the same (name, vendor) key.
        assert_eq!(ctx.licenses.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_zero_consumed_units_clears_has_license_on_update() {
        let ctx = context_with(mock_graph(2), configured_secrets()).await;
        let adapter = MicrosoftAdapter::new(ctx.clone());

        adapter.sync_licenses().await;
        adapter.sync_licenses().await;

        let power_bi = ctx
            .licenses
            .find_by_name_and_vendor("Power BI Pro", "Microsoft")
            .await
            .unwrap()
            .unwrap();
        assert!(!power_bi.has_license, "no assigned seats on second sync");
    }

    #[tokio::test]
    async fn test_missing_credentials_short_circuits() {
        // Mock with no expectations: any outbound call fails the test.
        let ctx = context_with(MockHttpClient::new(), StaticSecretStore::new()).await;
        let adapter = MicrosoftAdapter::new(ctx);

        let result = adapter.sync_licenses().await;

        assert!(!result.success);
        assert_eq!(
            result.error_message.as_deref(),
            Some("Microsoft Graph API credentials not configured")
        );
        assert_eq!(result.licenses_found, 0);
    }

    #[tokio::test]
    async fn test_failed_token_exchange() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| Ok(json_response(401, r#"{"error":"invalid_client"}"#)));

        let ctx = context_with(http, configured_secrets()).await;
        let adapter = MicrosoftAdapter::new(ctx);

        let result = adapter.sync_licenses().await;

        assert!(!result.success);
        assert_eq!(
            result.error_message.as_deref(),
            Some("Microsoft Graph API authentication failed")
        );
    }

    #[tokio::test]
    async fn test_connection_check() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .withf(|req| req.url.contains("oauth2"))
            .returning(|_| Ok(json_response(200, r#"{"access_token":"tok"}"#)));
        http.expect_execute()
            .withf(|req| req.url.ends_with("/organization"))
            .returning(|_| Ok(json_response(200, r#"{"value":[]}"#)));

        let ctx = context_with(http, configured_secrets()).await;
        assert!(MicrosoftAdapter::new(ctx).test_connection().await);
    }

    #[tokio::test]
    async fn test_connection_without_credentials_is_false() {
        let ctx = context_with(MockHttpClient::new(), StaticSecretStore::new()).await;
        assert!(!MicrosoftAdapter::new(ctx).test_connection().await);
    }
}
