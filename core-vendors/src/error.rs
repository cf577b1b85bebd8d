use bridge_traits::BridgeError;
use core_licenses::StoreError;
use thiserror::Error;

/// Failure taxonomy for a single vendor sync.
///
/// None of these escape an adapter: `sync_licenses` converts every variant
/// into a failure `SyncResult` carrying the display string.
#[derive(Error, Debug)]
pub enum VendorError {
    /// Required credential/config absent; no network call is attempted.
    #[error("{0} not configured")]
    NotConfigured(&'static str),

    /// The vendor's auth flow exists on paper but is not wired up.
    #[error("{0} authentication not implemented")]
    AuthNotImplemented(&'static str),

    /// Token exchange failed or returned a non-success status.
    #[error("{0} authentication failed")]
    AuthFailed(&'static str),

    /// The authenticated inventory call failed.
    #[error("Failed to fetch {0}")]
    FetchFailed(&'static str),

    /// The vendor answered with a payload we could not read.
    #[error("Failed to parse {what} response: {message}")]
    Parse { what: &'static str, message: String },

    #[error(transparent)]
    Http(#[from] BridgeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, VendorError>;
