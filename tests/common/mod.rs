//! Shared test utilities for integration tests.
//!
//! Provides a `TestClient` wired against a stub gazette backend served on an
//! OS-assigned port, so end-to-end flows (search, dashboard, comparison,
//! ranking) can be exercised without the real backend.

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use piter::config::Config;
use piter::server::{build_app, serve};
use piter::state::AppState;
use tempfile::TempDir;
use tower::ServiceExt;

/// Minimal gazette record as the backend serves it.
pub fn gazette_json(territory_id: &str, date: &str, excerpts: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "territory_id": territory_id,
        "territory_name": "Test Territory",
        "date": date,
        "url": format!("https://gazettes.example.org/{}/{}", territory_id, date),
        "excerpts": excerpts,
    })
}

/// Serve a stub backend router on an OS-assigned port; returns its base URL.
pub async fn spawn_backend(router: Router) -> String {
    let (port, _handle) = serve(router, "127.0.0.1", 0)
        .await
        .expect("Failed to spawn stub backend");
    format!("http://127.0.0.1:{}", port)
}

/// A test client that makes in-process requests against the application
/// router, with snapshots redirected to a temporary directory.
pub struct TestClient {
    state: AppState,
    router: Router,
    _snapshot_dir: TempDir,
}

impl TestClient {
    /// Create a client talking to `backend_url` with the default cache TTL.
    pub fn new(backend_url: &str) -> Self {
        Self::with_cache_ttl(backend_url, Duration::from_secs(300))
    }

    /// Create a client with a specific cache TTL (short TTLs let tests
    /// observe expiry without waiting).
    pub fn with_cache_ttl(backend_url: &str, cache_ttl: Duration) -> Self {
        let snapshot_dir = TempDir::new().expect("Failed to create snapshot dir");

        let config = Config {
            host: "127.0.0.1".into(),
            port: 0,
            backend_url: backend_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(5),
            cache_ttl,
            snapshot_path: PathBuf::from(snapshot_dir.path()),
        };

        let (state, router) = build_app(config).expect("Failed to build application");

        Self {
            state,
            router,
            _snapshot_dir: snapshot_dir,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a GET request and parse the response as JSON.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body)
            .unwrap_or_else(|e| panic!("response to {} is not JSON ({}): {}", uri, e, body));
        (status, parsed)
    }

    /// Make a POST request with a JSON body.
    pub async fn post_json(
        &self,
        uri: &str,
        body: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(serde_json::to_vec(body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let parsed = serde_json::from_slice(&bytes)
            .unwrap_or_else(|e| panic!("response to {} is not JSON ({})", uri, e));
        (status, parsed)
    }
}
