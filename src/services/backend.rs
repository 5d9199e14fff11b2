//! HTTP client for the gazette analysis backend.
//!
//! All data retrieval goes through this client: it applies the configured
//! request timeout, wraps non-2xx responses into the uniform error shape,
//! decodes every payload into a typed struct, and serves idempotent reads
//! (ranking, data output) through the injected TTL cache.

use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{
    AnalysisResponse, DataOutputListing, Gazette, GazetteSearchResponse, RankingResponse,
    SaveSearchResponse, SearchFilters, StateRankingRequest,
};

/// Cache keys for the idempotent read endpoints.
const CACHE_KEY_RANKING: &str = "ranking:all";
const CACHE_KEY_DATA_OUTPUT: &str = "data_output";

/// Parameters of a gazette search (`GET /api/v1/gazettes`).
#[derive(Debug, Clone)]
pub struct GazetteQuery {
    pub territory_id: String,
    pub querystring: String,
    pub published_since: Option<String>,
    pub published_until: Option<String>,
    pub size: u32,
}

/// Parameters of the generic paginated search (`GET /api/search`).
#[derive(Debug, Clone, Serialize)]
pub struct GenericSearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub territory_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaginatedResponse {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

pub struct BackendClient {
    http: Client,
    base_url: String,
    cache: Arc<ResponseCache>,
}

impl BackendClient {
    /// Builds the client. The cache is an explicit dependency so tests and
    /// callers control its lifetime; the request timeout from the config is
    /// applied at the client-builder level and covers every call.
    pub fn new(config: &Config, cache: Arc<ResponseCache>) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Search gazettes for one territory and keyword set.
    pub async fn search_gazettes(&self, query: &GazetteQuery) -> AppResult<GazetteSearchResponse> {
        debug!(
            territory_id = %query.territory_id,
            querystring = %query.querystring,
            "searching gazettes"
        );

        let mut params: Vec<(&str, String)> = vec![
            ("territory_ids", query.territory_id.clone()),
            ("querystring", query.querystring.clone()),
            ("size", query.size.to_string()),
        ];
        if let Some(since) = &query.published_since {
            params.push(("published_since", since.clone()));
        }
        if let Some(until) = &query.published_until {
            params.push(("published_until", until.clone()));
        }

        let response = self
            .http
            .get(self.url("/api/v1/gazettes"))
            .query(&params)
            .send()
            .await
            .map_err(AppError::from_request)?;

        let result: GazetteSearchResponse = decode(response).await?;
        info!(
            territory_id = %query.territory_id,
            total = result.total_gazettes,
            "gazette search completed"
        );
        Ok(result)
    }

    /// Full municipality ranking, cached under `"ranking:all"`.
    pub async fn ranking(&self) -> AppResult<RankingResponse> {
        if let Some(cached) = self.cache.get(CACHE_KEY_RANKING) {
            debug!("ranking served from cache");
            return serde_json::from_value(cached)
                .map_err(|e| AppError::Decode(format!("cached ranking: {}", e)));
        }

        let response = self
            .http
            .get(self.url("/api/ranking"))
            .send()
            .await
            .map_err(AppError::from_request)?;

        let result: RankingResponse = decode(response).await?;
        self.cache.set(
            CACHE_KEY_RANKING,
            serde_json::to_value(&result)
                .map_err(|e| AppError::Internal(format!("serialize ranking: {}", e)))?,
        );
        Ok(result)
    }

    /// State-scoped ranking comparison (`POST /api/v1/ranking/state`).
    pub async fn state_ranking(&self, request: &StateRankingRequest) -> AppResult<RankingResponse> {
        debug!(
            state_code = %request.state_code,
            territories = request.territory_ids.len(),
            "requesting state ranking"
        );

        let response = self
            .http
            .post(self.url("/api/v1/ranking/state"))
            .json(request)
            .send()
            .await
            .map_err(AppError::from_request)?;

        decode(response).await
    }

    /// Qualitative analysis pipeline (`GET /analyze`).
    pub async fn analyze(
        &self,
        territory_id: &str,
        since: &str,
        until: &str,
        keywords: Option<&str>,
    ) -> AppResult<AnalysisResponse> {
        let mut params: Vec<(&str, String)> = vec![
            ("territory_id", territory_id.to_string()),
            ("since", since.to_string()),
            ("until", until.to_string()),
        ];
        if let Some(keywords) = keywords {
            params.push(("keywords", keywords.to_string()));
        }

        let response = self
            .http
            .get(self.url("/analyze"))
            .query(&params)
            .send()
            .await
            .map_err(AppError::from_request)?;

        decode(response).await
    }

    /// Listing of the backend's stored analysis files, cached briefly so
    /// dashboard reloads don't hammer the endpoint.
    pub async fn data_output(&self) -> AppResult<DataOutputListing> {
        if let Some(cached) = self.cache.get(CACHE_KEY_DATA_OUTPUT) {
            debug!("data output listing served from cache");
            return serde_json::from_value(cached)
                .map_err(|e| AppError::Decode(format!("cached data output: {}", e)));
        }

        let response = self
            .http
            .get(self.url("/data_output"))
            .send()
            .await
            .map_err(AppError::from_request)?;

        // Decoding from a kept copy of the raw value lets us cache the exact
        // payload without requiring Serialize on the listing types.
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::from_status(status, body));
        }
        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("unexpected response shape: {}", e)))?;
        let listing: DataOutputListing = serde_json::from_value(value.clone())
            .map_err(|e| AppError::Decode(format!("unexpected response shape: {}", e)))?;

        self.cache.set(CACHE_KEY_DATA_OUTPUT, value);
        Ok(listing)
    }

    /// Forward search results to the backend for later dashboard reuse.
    ///
    /// Best-effort: every failure is logged and swallowed so the primary
    /// search flow is never interrupted.
    pub async fn save_search(&self, gazettes: &[Gazette], filters: &SearchFilters) {
        if gazettes.is_empty() {
            debug!("no gazettes to save, skipping save_search");
            return;
        }

        let body = json!({
            "gazettes": gazettes,
            "filters": filters,
        });

        let result = self
            .http
            .post(self.url("/api/v1/save_search"))
            .json(&body)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                match response.json::<SaveSearchResponse>().await {
                    Ok(saved) if saved.status == "saved" => {
                        info!(filename = ?saved.filename, "search results saved");
                    }
                    Ok(saved) => {
                        warn!(status = %saved.status, message = ?saved.message, "save_search not saved");
                    }
                    Err(e) => warn!("save_search response unreadable: {}", e),
                }
            }
            Ok(response) => {
                warn!(status = %response.status(), "save_search rejected");
            }
            Err(e) => {
                warn!("save_search request failed: {}", e);
            }
        }
    }

    /// Filtered, paginated search over analyzed gazettes.
    pub async fn search(&self, query: &GenericSearchQuery) -> AppResult<PaginatedResponse> {
        let response = self
            .http
            .get(self.url("/api/search"))
            .query(query)
            .send()
            .await
            .map_err(AppError::from_request)?;

        decode(response).await
    }

    /// Backend liveness probe. Transport failures read as "offline".
    pub async fn health(&self) -> bool {
        match self.http.get(self.url("/health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("backend health check failed: {}", e);
                false
            }
        }
    }
}

/// Shared response handling: status check, then a loud typed decode.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::from_status(status, body));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Decode(format!("unexpected response shape: {}", e)))
}
