//! Platform abstraction traits for the license tracker.
//!
//! Vendor adapters talk to the outside world exclusively through the traits
//! in this crate: [`http::HttpClient`] for outbound API calls and
//! [`secrets::SecretStore`] for credential lookup. Native implementations
//! live in `bridge-desktop`; tests substitute mocks.

pub mod error;
pub mod http;
pub mod secrets;

pub use error::{BridgeError, Result};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
pub use secrets::SecretStore;
