use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One category/value pair inside a ranking entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryValue {
    pub category: String,
    pub value: f64,
}

/// Rank by number of publications. Rank is assigned by the backend and never
/// recomputed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicationRank {
    pub territory_id: String,
    pub total: u64,
    pub rank: u32,
}

/// Rank by total monetary investment, with the backend's category highlights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentRank {
    pub territory_id: String,
    pub total_invested: f64,
    #[serde(default)]
    pub top_categories: Vec<CategoryValue>,
    pub rank: u32,
}

/// Per-municipality aggregate returned alongside the rankings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MunicipalitySummary {
    #[serde(default)]
    pub total_gazettes: u64,
    #[serde(default)]
    pub total_invested: f64,
    /// Backend statistics blob, kept opaque; the frontend only displays it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rankings {
    #[serde(default)]
    pub by_publications: Vec<PublicationRank>,
    #[serde(default)]
    pub by_investment: Vec<InvestmentRank>,
    #[serde(default)]
    pub total_municipalities: u32,
}

/// Response of `GET /api/ranking` and `POST /api/v1/ranking/state`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingResponse {
    #[serde(default)]
    pub municipalities: HashMap<String, MunicipalitySummary>,
    #[serde(default)]
    pub rankings: Rankings,
}

/// Body of `POST /api/v1/ranking/state`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateRankingRequest {
    pub state_code: String,
    pub territory_ids: Vec<String>,
    pub start_date: String,
    pub end_date: String,
    pub keywords: Vec<String>,
}
