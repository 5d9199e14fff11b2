use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::date_utils::check_date_order;
use crate::error::{AppError, AppResult};
use crate::filters::format_brl;
use crate::models::municipality::find_municipality;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AnalysisParams {
    pub territory_id: Option<String>,
    pub since: Option<String>,
    pub until: Option<String>,
    pub keywords: Option<String>,
}

/// Everything the report view needs: the AI text plus headline numbers.
#[derive(Debug, Serialize)]
pub struct AnalysisPayload {
    pub territory_id: String,
    pub territory_name: String,
    pub period: String,
    pub total_invested: f64,
    pub total_invested_label: String,
    pub total_gazettes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualitative_analysis: Option<String>,
}

/// Qualitative analysis passthrough for report assembly. The PDF itself is
/// produced by the browser; this endpoint only gathers the content.
pub async fn analysis(
    State(state): State<AppState>,
    Query(params): Query<AnalysisParams>,
) -> AppResult<Json<AnalysisPayload>> {
    let territory_id = params
        .territory_id
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Selecione um município".into()))?;
    let since = params
        .since
        .as_deref()
        .ok_or_else(|| AppError::Validation("Informe a data inicial".into()))?;
    let until = params
        .until
        .as_deref()
        .ok_or_else(|| AppError::Validation("Informe a data final".into()))?;
    check_date_order(Some(since), Some(until))?;

    let response = state
        .backend
        .analyze(territory_id, since, until, params.keywords.as_deref())
        .await?;

    let territory_name = find_municipality(territory_id)
        .map(|m| m.name.to_string())
        .unwrap_or_else(|| territory_id.to_string());

    let total_gazettes = response
        .data
        .total_gazettes
        .unwrap_or(response.gazettes.len() as u64);

    Ok(Json(AnalysisPayload {
        territory_id: territory_id.to_string(),
        territory_name,
        period: response.meta.period.clone(),
        total_invested: response.data.total_invested,
        total_invested_label: format_brl(response.data.total_invested),
        total_gazettes,
        qualitative_analysis: response.data.qualitative_analysis.clone(),
    }))
}
