//! Service configuration from the environment.

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database URL, e.g. `sqlite:licenses.db`
    pub database_url: String,
    /// Listen address, e.g. `0.0.0.0:8080`
    pub bind_addr: String,
}

impl AppConfig {
    /// Read configuration from `DATABASE_URL` and `BIND_ADDR`, with
    /// local-development defaults.
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:licenses.db".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        }
    }
}
