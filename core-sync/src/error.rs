use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// The caller named a vendor no adapter is registered for. Distinct
    /// from a sync failure: this maps to a not-found response, not a
    /// failure `SyncResult`.
    #[error("Vendor '{0}' not found")]
    VendorNotFound(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;
