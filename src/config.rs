use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Fallback backend address for local development.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of the gazette analysis backend this service is a client of.
    pub backend_url: String,
    /// Applied to every outgoing backend request via the HTTP client builder.
    pub request_timeout: Duration,
    /// Lifetime of cached idempotent backend reads (ranking, data output).
    pub cache_ttl: Duration,
    /// Directory for the best-effort last-search/last-comparison snapshots.
    pub snapshot_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: env::var("PITER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PITER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(7080),
            backend_url: env::var("PITER_BACKEND_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.into()),
            request_timeout: Duration::from_secs(
                env::var("PITER_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
            cache_ttl: Duration::from_secs(
                env::var("PITER_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(300),
            ),
            snapshot_path: env::var("PITER_SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/snapshots")),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
