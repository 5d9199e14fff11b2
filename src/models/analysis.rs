use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Gazette;

/// Metadata block of a backend analysis payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisMeta {
    #[serde(default)]
    pub source_territory: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub search_keywords: String,
    #[serde(default)]
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range_end: Option<String>,
}

/// Numeric block of a backend analysis payload: everything the dashboard
/// charts are built from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisData {
    #[serde(default)]
    pub total_invested: f64,
    #[serde(default)]
    pub investments_by_category: HashMap<String, f64>,
    #[serde(default)]
    pub investments_by_period: HashMap<String, f64>,
    #[serde(default)]
    pub publications_by_period: HashMap<String, f64>,
    /// `"month"` or `"year"`; month when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_grouping: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_entities: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_gazettes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualitative_analysis: Option<String>,
}

/// A full analysis document (`GET /analyze`, and the entries of
/// `GET /data_output`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub meta: AnalysisMeta,
    #[serde(default)]
    pub data: AnalysisData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gazettes: Vec<Gazette>,
}

/// One entry of the data-output listing; `data` is absent for files the
/// backend could not parse.
#[derive(Debug, Clone, Deserialize)]
pub struct DataOutputFile {
    /// Modification timestamp (seconds since epoch) used to pick the newest.
    pub modified: i64,
    #[serde(default)]
    pub data: Option<AnalysisResponse>,
}

/// Response of `GET /data_output`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataOutputListing {
    #[serde(default)]
    pub files: Vec<DataOutputFile>,
}

/// Response of `POST /api/v1/save_search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveSearchResponse {
    pub status: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
