//! Native implementations of the bridge traits.
//!
//! - [`ReqwestHttpClient`]: outbound HTTP via reqwest with bounded timeouts
//!   and retry with exponential backoff.
//! - [`EnvSecretStore`]: vendor credentials from environment variables.
//! - [`StaticSecretStore`]: in-memory credentials for tests and fixtures.

pub mod http;
pub mod secrets;

pub use http::ReqwestHttpClient;
pub use secrets::{EnvSecretStore, StaticSecretStore};
