pub mod analysis;
pub mod compare;
pub mod dashboard;
pub mod meta;
pub mod ranking;
pub mod search;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Lookup tables for the search forms
        .route("/api/meta/municipalities", get(meta::municipalities))
        .route("/api/meta/categories", get(meta::categories))
        // Search flows
        .route("/api/charts/search", get(search::search))
        .route("/api/search", get(search::generic_search))
        // Dashboard charts (latest analysis)
        .route("/api/charts/dashboard", get(dashboard::dashboard))
        // Territory comparison
        .route("/api/charts/compare", get(compare::compare))
        // Rankings
        .route("/api/ranking", get(ranking::ranking))
        .route("/api/ranking/state", post(ranking::state_ranking))
        // Qualitative analysis for report assembly
        .route("/api/analysis", get(analysis::analysis))
        // Convenience snapshots
        .route("/api/snapshots/latest", get(meta::latest_snapshots))
        // Health check
        .route("/health", get(health))
}

/// Liveness of this service plus a probe of the gazette backend.
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let backend = if state.backend.health().await {
        "ok"
    } else {
        "offline"
    };
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
        "backend": backend,
    }))
}
