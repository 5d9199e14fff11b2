use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date_utils::check_date_order;
use crate::error::{AppError, AppResult};
use crate::filters::format_brl_whole;
use crate::models::ranking::{CategoryValue, RankingResponse, StateRankingRequest};
use crate::services::aggregation::PODIUM_LIMIT;
use crate::state::AppState;

/// One row of the investment podium. Rank comes from the backend untouched;
/// this layer only truncates the category highlights for display.
#[derive(Debug, Serialize)]
pub struct PodiumEntry {
    pub territory_id: String,
    pub total_invested: f64,
    pub total_invested_label: String,
    pub top_categories: Vec<CategoryValue>,
    pub rank: u32,
}

#[derive(Debug, Serialize)]
pub struct RankingPayload {
    pub total_municipalities: u32,
    pub by_publications: Vec<PublicationEntry>,
    pub podium: Vec<PodiumEntry>,
}

#[derive(Debug, Serialize)]
pub struct PublicationEntry {
    pub territory_id: String,
    pub total: u64,
    pub rank: u32,
}

/// Full ranking across covered municipalities (cached backend read).
pub async fn ranking(State(state): State<AppState>) -> AppResult<Json<RankingPayload>> {
    let response = state.backend.ranking().await?;
    Ok(Json(to_payload(response)))
}

#[derive(Debug, Deserialize)]
pub struct StateRankingParams {
    pub state_code: String,
    pub territory_ids: Vec<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// State-scoped ranking for a chosen set of territories.
pub async fn state_ranking(
    State(state): State<AppState>,
    Json(params): Json<StateRankingParams>,
) -> AppResult<Json<RankingPayload>> {
    if params.state_code.is_empty() {
        return Err(AppError::Validation("Selecione um estado".into()));
    }
    if params.territory_ids.len() < 2 {
        return Err(AppError::Validation(
            "Selecione ao menos dois municípios para rankear.".into(),
        ));
    }
    let mut deduped = params.territory_ids.clone();
    deduped.sort();
    deduped.dedup();
    if deduped.len() != params.territory_ids.len() {
        return Err(AppError::Validation(
            "Selecione municípios diferentes para comparação.".into(),
        ));
    }
    check_date_order(Some(&params.start_date), Some(&params.end_date))?;

    debug!(
        state_code = %params.state_code,
        territories = params.territory_ids.len(),
        "requesting state ranking"
    );

    let request = StateRankingRequest {
        state_code: params.state_code,
        territory_ids: params.territory_ids,
        start_date: params.start_date,
        end_date: params.end_date,
        keywords: params.keywords,
    };

    let response = state.backend.state_ranking(&request).await?;
    Ok(Json(to_payload(response)))
}

fn to_payload(response: RankingResponse) -> RankingPayload {
    let by_publications = response
        .rankings
        .by_publications
        .into_iter()
        .map(|entry| PublicationEntry {
            territory_id: entry.territory_id,
            total: entry.total,
            rank: entry.rank,
        })
        .collect();

    let podium = response
        .rankings
        .by_investment
        .into_iter()
        .map(|entry| {
            let mut top_categories = entry.top_categories;
            top_categories.truncate(PODIUM_LIMIT);
            PodiumEntry {
                territory_id: entry.territory_id,
                total_invested: entry.total_invested,
                total_invested_label: format_brl_whole(entry.total_invested),
                top_categories,
                rank: entry.rank,
            }
        })
        .collect();

    RankingPayload {
        total_municipalities: response.rankings.total_municipalities,
        by_publications,
        podium,
    }
}
