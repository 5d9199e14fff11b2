//! Best-effort snapshots of the most recent search and comparison.
//!
//! A convenience cache only, never a source of truth: both read and write
//! failures are logged and swallowed so they cannot interrupt the primary
//! flow. Each snapshot is wrapped with a `saved_at` timestamp.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

const LATEST_SEARCH_FILE: &str = "latest_search.json";
const LATEST_COMPARISON_FILE: &str = "latest_comparison.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub saved_at: String,
    #[serde(flatten)]
    pub payload: T,
}

pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn save_search<T: Serialize>(&self, payload: &T) {
        self.save(LATEST_SEARCH_FILE, payload);
    }

    pub fn save_comparison<T: Serialize>(&self, payload: &T) {
        self.save(LATEST_COMPARISON_FILE, payload);
    }

    pub fn load_search<T: DeserializeOwned>(&self) -> Option<Snapshot<T>> {
        self.load(LATEST_SEARCH_FILE)
    }

    pub fn load_comparison<T: DeserializeOwned>(&self) -> Option<Snapshot<T>> {
        self.load(LATEST_COMPARISON_FILE)
    }

    fn save<T: Serialize>(&self, file: &str, payload: &T) {
        let wrapped = Snapshot {
            saved_at: Utc::now().to_rfc3339(),
            payload,
        };

        let result = serde_json::to_vec_pretty(&wrapped)
            .map_err(|e| e.to_string())
            .and_then(|bytes| {
                fs::create_dir_all(&self.dir).map_err(|e| e.to_string())?;
                fs::write(self.path(file), bytes).map_err(|e| e.to_string())
            });

        if let Err(e) = result {
            warn!(file = %file, "failed to write snapshot: {}", e);
        }
    }

    fn load<T: DeserializeOwned>(&self, file: &str) -> Option<Snapshot<T>> {
        let path = self.path(file);
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!(path = %path.display(), "unreadable snapshot: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!(path = %path.display(), "failed to read snapshot: {}", e);
                None
            }
        }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}
