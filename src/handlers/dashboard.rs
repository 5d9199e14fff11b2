use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use tracing::debug;

use crate::date_utils::PeriodGrouping;
use crate::error::{AppError, AppResult};
use crate::filters::format_brl_whole;
use crate::models::municipality::find_municipality;
use crate::models::AnalysisResponse;
use crate::services::aggregation::{aggregate_categories, CategorySlice, PIE_LIMIT};
use crate::services::period_series::{build_series, SeriesPoint};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardMeta {
    pub territory_id: String,
    pub territory_name: String,
    pub period: String,
    pub search_keywords: String,
    pub generated_at: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_invested: f64,
    pub total_invested_label: String,
    pub total_gazettes: u64,
    pub average_per_gazette: f64,
    pub average_per_gazette_label: String,
}

#[derive(Debug, Serialize)]
pub struct BarChart {
    pub title: String,
    /// False when no investment value was positive and the series fell back
    /// to publication counts.
    pub money: bool,
    pub grouping: &'static str,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Serialize)]
pub struct DashboardPayload {
    pub meta: DashboardMeta,
    pub stats: DashboardStats,
    pub bar: BarChart,
    pub pie: Vec<CategorySlice>,
}

/// Dashboard for the most recent analysis stored by the backend.
///
/// Picks the newest valid file from the data-output listing, then builds
/// the stat cards, the period bar chart, and the category pie chart.
pub async fn dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardPayload>> {
    let listing = state.backend.data_output().await?;

    let mut files: Vec<_> = listing
        .files
        .into_iter()
        .filter(|f| f.data.is_some())
        .collect();
    files.sort_by(|a, b| b.modified.cmp(&a.modified));

    let latest: AnalysisResponse = files
        .into_iter()
        .next()
        .and_then(|f| f.data)
        .ok_or_else(|| {
            AppError::NotFound("Nenhum dado encontrado. Faça uma busca primeiro.".into())
        })?;

    debug!(
        territory = %latest.meta.source_territory,
        generated_at = %latest.meta.generated_at,
        "building dashboard from latest analysis"
    );

    let grouping = latest
        .data
        .period_grouping
        .as_deref()
        .and_then(|g| g.parse::<PeriodGrouping>().ok())
        .unwrap_or(PeriodGrouping::Month);

    // Investments drive the bar chart; publication counts are the fallback
    // when no period carries a positive amount.
    let money = latest.data.investments_by_period.values().any(|v| *v > 0.0);
    let source = if money {
        &latest.data.investments_by_period
    } else {
        &latest.data.publications_by_period
    };

    // Chart values are whole numbers; tooltips don't show cents.
    let rounded = source
        .iter()
        .map(|(k, v)| (k.clone(), v.round()))
        .collect();
    let points = build_series(&rounded, grouping);

    let title = match (money, grouping) {
        (true, PeriodGrouping::Month) => "Investimentos por Mês",
        (true, PeriodGrouping::Year) => "Investimentos por Ano",
        (false, PeriodGrouping::Month) => "Publicações por Mês",
        (false, PeriodGrouping::Year) => "Publicações por Ano",
    };

    let pie = aggregate_categories(&latest.data.investments_by_category, PIE_LIMIT);

    let total_invested = latest.data.total_invested;
    let total_gazettes = latest
        .data
        .total_gazettes
        .unwrap_or(latest.gazettes.len() as u64);
    let average = if total_gazettes > 0 {
        total_invested / total_gazettes as f64
    } else {
        0.0
    };

    let territory_id = latest.meta.source_territory.clone();
    let territory_name = find_municipality(&territory_id)
        .map(|m| m.name.to_string())
        .unwrap_or_else(|| territory_id.clone());

    let payload = DashboardPayload {
        meta: DashboardMeta {
            territory_id,
            territory_name,
            period: latest.meta.period.clone(),
            search_keywords: latest.meta.search_keywords.clone(),
            generated_at: latest.meta.generated_at.clone(),
        },
        stats: DashboardStats {
            total_invested,
            total_invested_label: format_brl_whole(total_invested),
            total_gazettes,
            average_per_gazette: average,
            average_per_gazette_label: format_brl_whole(average),
        },
        bar: BarChart {
            title: title.to_string(),
            money,
            grouping: grouping.as_str(),
            points,
        },
        pie,
    };

    Ok(Json(payload))
}
