use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::handlers;
use crate::services::backend::BackendClient;
use crate::services::monetary::MonetaryExtractor;
use crate::services::snapshot::SnapshotStore;
use crate::state::AppState;

/// Build the application state and Axum router from a [`Config`].
///
/// Creates the response cache, the backend client (cache injected), the
/// snapshot store, and the monetary extractor, then assembles the router
/// with the middleware stack. Returns the shared state and a ready-to-serve
/// router.
pub fn build_app(config: Config) -> Result<(AppState, Router), Box<dyn std::error::Error>> {
    let cache = Arc::new(ResponseCache::new(config.cache_ttl));
    let backend = Arc::new(BackendClient::new(&config, cache)?);
    let snapshots = Arc::new(SnapshotStore::new(config.snapshot_path.clone()));
    let extractor = Arc::new(MonetaryExtractor::new()?);

    let state = AppState {
        config: Arc::new(config),
        backend,
        snapshots,
        extractor,
    };

    let app = Router::new()
        .merge(handlers::routes())
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    Ok((state, app))
}

/// Bind the router to `host:port` and spawn the server as a tokio task.
///
/// Returns the actual port the server bound to (useful when `port` is 0 for
/// OS-assigned ports) and a [`JoinHandle`] for the server task.
pub async fn serve(
    app: Router,
    host: &str,
    port: u16,
) -> Result<(u16, JoinHandle<()>), Box<dyn std::error::Error>> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    let actual_port = listener.local_addr()?.port();

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    Ok((actual_port, handle))
}
