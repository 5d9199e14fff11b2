use serde::{Deserialize, Serialize};

/// A single official publication record for a territory and date.
///
/// Immutable once fetched; owned by the fetch layer for the duration of a
/// search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gazette {
    pub territory_id: String,
    pub territory_name: String,
    /// ISO publication date (`YYYY-MM-DD`).
    pub date: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txt_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_extra_edition: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excerpts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
}

/// Response of `GET /api/v1/gazettes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GazetteSearchResponse {
    pub total_gazettes: u64,
    #[serde(default)]
    pub gazettes: Vec<Gazette>,
}

/// Filters echoed back to the backend when saving a search for later reuse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub territory_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_inicio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_fim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub querystring: Option<String>,
}
