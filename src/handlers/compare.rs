use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date_utils::{check_date_order, PeriodGrouping};
use crate::error::{AppError, AppResult};
use crate::filters::format_brl;
use crate::models::municipality::{find_municipality, Category, Municipality};
use crate::services::backend::GazetteQuery;
use crate::services::period_series::{merge_series, SeriesPoint};
use crate::state::AppState;

const COMPARE_SEARCH_SIZE: u32 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct CompareParams {
    pub municipio_a: Option<String>,
    pub municipio_b: Option<String>,
    pub categoria: Option<String>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CompareSide {
    pub territory_id: String,
    pub territory_name: String,
    pub total_gazettes: u64,
    pub total_invested: f64,
    pub total_invested_label: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Serialize)]
pub struct ComparePayload {
    pub grouping: &'static str,
    pub left: CompareSide,
    pub right: CompareSide,
}

/// Side-by-side comparison of two municipalities.
///
/// Both gazette searches are dispatched concurrently and complete
/// independently; each side's aggregation only consumes its own result.
/// Investment values come from the monetary extractor over the returned
/// excerpts, bucketed by publication month and merged onto a shared scale.
pub async fn compare(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> AppResult<Json<ComparePayload>> {
    let left = resolve_municipality(params.municipio_a.as_deref(), "Selecione o primeiro município")?;
    let right =
        resolve_municipality(params.municipio_b.as_deref(), "Selecione o segundo município")?;

    if left.ibge_code == right.ibge_code {
        return Err(AppError::Validation(
            "Selecione municípios diferentes para comparação.".into(),
        ));
    }

    let category = params
        .categoria
        .as_deref()
        .filter(|c| !c.is_empty())
        .and_then(Category::parse)
        .ok_or_else(|| AppError::Validation("Selecione uma categoria".into()))?;

    check_date_order(params.data_inicio.as_deref(), params.data_fim.as_deref())?;

    debug!(
        left = %left.name,
        right = %right.name,
        category = category.as_str(),
        "starting comparison"
    );

    let query_for = |municipality: &Municipality| GazetteQuery {
        territory_id: municipality.ibge_code.to_string(),
        querystring: category.querystring().to_string(),
        published_since: params.data_inicio.clone(),
        published_until: params.data_fim.clone(),
        size: COMPARE_SEARCH_SIZE,
    };

    let left_query = query_for(left);
    let right_query = query_for(right);
    let (left_result, right_result) = tokio::join!(
        state.backend.search_gazettes(&left_query),
        state.backend.search_gazettes(&right_query),
    );
    let left_response = left_result?;
    let right_response = right_result?;

    let left_by_month = state.extractor.monthly_investments(&left_response.gazettes);
    let right_by_month = state
        .extractor
        .monthly_investments(&right_response.gazettes);

    let (left_points, right_points) =
        merge_series(&left_by_month, &right_by_month, PeriodGrouping::Month);

    let payload = ComparePayload {
        grouping: PeriodGrouping::Month.as_str(),
        left: side(
            left,
            left_response.total_gazettes,
            &left_by_month,
            left_points,
        ),
        right: side(
            right,
            right_response.total_gazettes,
            &right_by_month,
            right_points,
        ),
    };

    // Convenience cache only; failures are logged inside the store.
    state.snapshots.save_comparison(&payload);

    Ok(Json(payload))
}

fn resolve_municipality(
    code: Option<&str>,
    missing_message: &str,
) -> AppResult<&'static Municipality> {
    let code = code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation(missing_message.into()))?;
    find_municipality(code).ok_or_else(|| AppError::Validation("Município inválido".into()))
}

fn side(
    municipality: &Municipality,
    total_gazettes: u64,
    by_month: &HashMap<String, f64>,
    points: Vec<SeriesPoint>,
) -> CompareSide {
    let total_invested: f64 = by_month.values().sum();
    CompareSide {
        territory_id: municipality.ibge_code.to_string(),
        territory_name: municipality.name.to_string(),
        total_gazettes,
        total_invested,
        total_invested_label: format_brl(total_invested),
        points,
    }
}
