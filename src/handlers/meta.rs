use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use serde_json::Value;

use crate::models::municipality::{Category, MUNICIPALITIES};
use crate::models::Municipality;
use crate::services::snapshot::Snapshot;
use crate::state::AppState;

pub async fn municipalities() -> Json<&'static [Municipality]> {
    Json(MUNICIPALITIES)
}

#[derive(Debug, Serialize)]
pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
    pub querystring: &'static str,
}

pub async fn categories() -> Json<Vec<CategoryOption>> {
    let options = Category::all()
        .iter()
        .map(|c| CategoryOption {
            value: c.as_str(),
            label: c.label(),
            querystring: c.querystring(),
        })
        .collect();
    Json(options)
}

#[derive(Debug, Serialize)]
pub struct LatestSnapshots {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<Snapshot<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Snapshot<Value>>,
}

/// The last saved search and comparison, when present. Both are best-effort
/// convenience data; absence is not an error.
pub async fn latest_snapshots(State(state): State<AppState>) -> Json<LatestSnapshots> {
    Json(LatestSnapshots {
        search: state.snapshots.load_search(),
        comparison: state.snapshots.load_comparison(),
    })
}
