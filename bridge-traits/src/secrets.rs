//! Vendor Credential Abstraction
//!
//! Vendor API credentials (client ids, secrets, tokens) are resolved
//! through this trait. A missing credential is an expected condition,
//! reported as `None` rather than an error, so adapters can short-circuit
//! into a "not configured" sync result without touching the network.

use async_trait::async_trait;

/// Read access to per-vendor configuration values.
///
/// Keys are scoped by vendor, e.g. `("microsoft", "client_id")` or
/// `("slack", "bot_token")`.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Look up a credential value for a vendor.
    ///
    /// Returns `None` when the value is not configured.
    async fn get_secret(&self, vendor: &str, key: &str) -> Option<String>;
}
