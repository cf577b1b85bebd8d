//! # Vendor Adapters Module
//!
//! One adapter per third-party SaaS vendor, each translating that vendor's
//! API into the uniform license model.
//!
//! ## Overview
//!
//! Every adapter implements [`VendorAdapter`] and runs the same pipeline:
//! resolve credentials → authenticate → fetch the seat inventory →
//! reconcile against the license store → persist one batch. Vendors differ
//! only in the authentication scheme (OAuth2 client credentials, static
//! tokens, basic auth) and the response shapes.
//!
//! Failures never propagate: `sync_licenses` returns a failure
//! [`SyncResult`] and `test_connection` returns `false`.

pub mod adapter;
pub mod error;
pub(crate) mod reconcile;

pub mod adobe;
pub mod atlassian;
pub mod dropbox;
pub mod github;
pub mod gitlab;
pub mod google;
pub mod microsoft;
pub mod slack;
pub mod zoom;

pub use adapter::{SyncResult, VendorAdapter, VendorContext};
pub use adobe::AdobeAdapter;
pub use atlassian::AtlassianAdapter;
pub use dropbox::DropboxAdapter;
pub use error::{Result, VendorError};
pub use github::GitHubAdapter;
pub use gitlab::GitLabAdapter;
pub use google::GoogleWorkspaceAdapter;
pub use microsoft::MicrosoftAdapter;
pub use slack::SlackAdapter;
pub use zoom::ZoomAdapter;

use std::sync::Arc;

/// Build the full adapter set in registration order.
///
/// The order here is what `sync-all` reports in; it is not alphabetical.
pub fn registered_adapters(ctx: &VendorContext) -> Vec<Arc<dyn VendorAdapter>> {
    vec![
        Arc::new(MicrosoftAdapter::new(ctx.clone())),
        Arc::new(AdobeAdapter::new(ctx.clone())),
        Arc::new(SlackAdapter::new(ctx.clone())),
        Arc::new(AtlassianAdapter::new(ctx.clone())),
        Arc::new(GoogleWorkspaceAdapter::new(ctx.clone())),
        Arc::new(ZoomAdapter::new(ctx.clone())),
        Arc::new(GitHubAdapter::new(ctx.clone())),
        Arc::new(DropboxAdapter::new(ctx.clone())),
        Arc::new(GitLabAdapter::new(ctx.clone())),
    ]
}
