use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date_utils::check_date_order;
use crate::error::{AppError, AppResult};
use crate::models::municipality::{find_municipality, Category};
use crate::models::{Gazette, SearchFilters};
use crate::services::backend::{GazetteQuery, GenericSearchQuery, PaginatedResponse};
use crate::state::AppState;

/// Default result window requested from the gazette API.
const DEFAULT_SEARCH_SIZE: u32 = 100;

/// Pagination defaults for the generic search.
const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub municipio: Option<String>,
    pub categoria: Option<String>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub total_gazettes: u64,
    pub gazettes: Vec<Gazette>,
}

/// Gazette search flow: validate the filters before any network call,
/// expand the category into its keyword querystring, fetch, then snapshot
/// and forward the results best-effort.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResult>> {
    let municipio = params
        .municipio
        .as_deref()
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::Validation("Selecione um município".into()))?;

    let categoria = params
        .categoria
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation("Selecione uma categoria".into()))?;

    let municipality = find_municipality(municipio)
        .ok_or_else(|| AppError::Validation("Município inválido".into()))?;
    let category = Category::parse(categoria)
        .ok_or_else(|| AppError::Validation("Categoria inválida".into()))?;

    check_date_order(params.data_inicio.as_deref(), params.data_fim.as_deref())?;

    debug!(
        municipality = %municipality.name,
        category = category.as_str(),
        "starting gazette search"
    );

    let query = GazetteQuery {
        territory_id: municipality.ibge_code.to_string(),
        querystring: category.querystring().to_string(),
        published_since: params.data_inicio.clone(),
        published_until: params.data_fim.clone(),
        size: params.size.unwrap_or(DEFAULT_SEARCH_SIZE),
    };

    let response = state.backend.search_gazettes(&query).await?;

    let result = SearchResult {
        total_gazettes: response.total_gazettes,
        gazettes: response.gazettes,
    };

    // Both side flows are best-effort and must not fail the search.
    state.snapshots.save_search(&result);

    let filters = SearchFilters {
        territory_id: Some(municipality.ibge_code.to_string()),
        municipio: Some(municipality.name.to_string()),
        categoria: Some(category.as_str().to_string()),
        data_inicio: params.data_inicio,
        data_fim: params.data_fim,
        querystring: Some(category.querystring().to_string()),
    };
    state.backend.save_search(&result.gazettes, &filters).await;

    Ok(Json(result))
}

#[derive(Debug, Default, Deserialize)]
pub struct GenericSearchParams {
    pub search_term: Option<String>,
    pub territory_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Paginated search over the backend's analyzed gazettes. Needs at least a
/// term or a territory so an unfiltered scan is never requested.
pub async fn generic_search(
    State(state): State<AppState>,
    Query(params): Query<GenericSearchParams>,
) -> AppResult<Json<PaginatedResponse>> {
    let has_term = params
        .search_term
        .as_deref()
        .is_some_and(|t| !t.trim().is_empty());
    let has_territory = params
        .territory_id
        .as_deref()
        .is_some_and(|t| !t.is_empty());
    if !has_term && !has_territory {
        return Err(AppError::Validation(
            "Por favor, digite um termo de pesquisa ou selecione um município".into(),
        ));
    }

    check_date_order(params.start_date.as_deref(), params.end_date.as_deref())?;

    let query = GenericSearchQuery {
        search_term: params.search_term,
        territory_id: params.territory_id,
        start_date: params.start_date,
        end_date: params.end_date,
        category: params.category,
        page: params.page.unwrap_or(1).max(1),
        page_size: params
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE),
    };

    let response = state.backend.search(&query).await?;
    Ok(Json(response))
}
