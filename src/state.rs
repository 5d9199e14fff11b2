use std::sync::Arc;

use crate::config::Config;
use crate::services::backend::BackendClient;
use crate::services::monetary::MonetaryExtractor;
use crate::services::snapshot::SnapshotStore;

/// Shared application state. The response cache lives inside the backend
/// client (constructor-injected), so there is no module-level singleton to
/// reason about in tests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: Arc<BackendClient>,
    pub snapshots: Arc<SnapshotStore>,
    pub extractor: Arc<MonetaryExtractor>,
}
