//! Vendor credential stores.

use async_trait::async_trait;
use bridge_traits::secrets::SecretStore;
use std::collections::HashMap;
use tracing::debug;

/// Environment-backed secret store.
///
/// Resolves `("microsoft", "client_id")` to the `VENDOR_MICROSOFT_CLIENT_ID`
/// environment variable. Empty values count as unconfigured.
pub struct EnvSecretStore {
    prefix: String,
}

impl EnvSecretStore {
    pub fn new() -> Self {
        Self {
            prefix: "VENDOR".to_string(),
        }
    }

    /// Use a custom variable prefix instead of `VENDOR`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn var_name(&self, vendor: &str, key: &str) -> String {
        format!(
            "{}_{}_{}",
            self.prefix,
            vendor.to_uppercase().replace([' ', '-'], "_"),
            key.to_uppercase()
        )
    }
}

impl Default for EnvSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretStore for EnvSecretStore {
    async fn get_secret(&self, vendor: &str, key: &str) -> Option<String> {
        let name = self.var_name(vendor, key);
        match std::env::var(&name) {
            Ok(value) if !value.is_empty() => Some(value),
            _ => {
                debug!(variable = %name, "Credential not configured");
                None
            }
        }
    }
}

/// In-memory secret store for tests and fixtures.
#[derive(Default)]
pub struct StaticSecretStore {
    values: HashMap<(String, String), String>,
}

impl StaticSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a credential, builder style.
    pub fn with(mut self, vendor: &str, key: &str, value: &str) -> Self {
        self.values.insert(
            (vendor.to_lowercase(), key.to_lowercase()),
            value.to_string(),
        );
        self
    }
}

#[async_trait]
impl SecretStore for StaticSecretStore {
    async fn get_secret(&self, vendor: &str, key: &str) -> Option<String> {
        self.values
            .get(&(vendor.to_lowercase(), key.to_lowercase()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_name_mapping() {
        let store = EnvSecretStore::new();
        assert_eq!(
            store.var_name("microsoft", "client_id"),
            "VENDOR_MICROSOFT_CLIENT_ID"
        );
        assert_eq!(store.var_name("GitLab", "base_url"), "VENDOR_GITLAB_BASE_URL");
    }

    #[tokio::test]
    async fn test_static_store_lookup() {
        let store = StaticSecretStore::new().with("slack", "bot_token", "xoxb-1");

        assert_eq!(
            store.get_secret("Slack", "BOT_TOKEN").await,
            Some("xoxb-1".to_string())
        );
        assert_eq!(store.get_secret("slack", "missing").await, None);
    }

    #[tokio::test]
    async fn test_env_store_unset_is_none() {
        let store = EnvSecretStore::with_prefix("LICENSE_TRACKER_TEST");
        assert_eq!(store.get_secret("nobody", "nothing").await, None);
    }
}
