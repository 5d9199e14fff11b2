//! Integration tests for ranking endpoints and the TTL response cache.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use common::{spawn_backend, TestClient};
use serde_json::{json, Value};

fn ranking_body() -> Value {
    json!({
        "municipalities": {
            "5208707": {"total_gazettes": 12, "total_invested": 80000.0},
            "5201405": {"total_gazettes": 5, "total_invested": 20000.0},
        },
        "rankings": {
            "by_publications": [
                {"territory_id": "5208707", "total": 12, "rank": 1},
                {"territory_id": "5201405", "total": 5, "rank": 2},
            ],
            "by_investment": [
                {
                    "territory_id": "5208707",
                    "total_invested": 80000.0,
                    "top_categories": [
                        {"category": "Software", "value": 50000.0},
                        {"category": "Robótica", "value": 20000.0},
                        {"category": "Aplicativos", "value": 6000.0},
                        {"category": "Plataformas", "value": 4000.0},
                    ],
                    "rank": 1,
                },
                {
                    "territory_id": "5201405",
                    "total_invested": 20000.0,
                    "top_categories": [],
                    "rank": 2,
                },
            ],
            "total_municipalities": 2,
        },
    })
}

fn ranking_backend() -> (Router, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let h = hits.clone();

    let router = Router::new()
        .route(
            "/api/ranking",
            get(move || {
                let h = h.clone();
                async move {
                    h.fetch_add(1, Ordering::SeqCst);
                    Json(ranking_body())
                }
            }),
        )
        .route(
            "/api/v1/ranking/state",
            post(|Json(_body): Json<Value>| async move { Json(ranking_body()) }),
        );

    (router, hits)
}

#[tokio::test]
async fn test_ranking_reshapes_backend_response() {
    let (router, _) = ranking_backend();
    let url = spawn_backend(router).await;
    let client = TestClient::new(&url);

    let (status, body) = client.get_json("/api/ranking").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_municipalities"], 2);
    assert_eq!(body["by_publications"][0]["territory_id"], "5208707");
    // Backend rank is passed through, never recomputed.
    assert_eq!(body["podium"][0]["rank"], 1);
    assert_eq!(body["podium"][0]["total_invested_label"], "R$ 80.000");
    // Category highlights are truncated to the podium size.
    assert_eq!(body["podium"][0]["top_categories"].as_array().unwrap().len(), 3);
    assert_eq!(body["podium"][1]["top_categories"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_ranking_is_cached_within_ttl() {
    let (router, hits) = ranking_backend();
    let url = spawn_backend(router).await;
    let client = TestClient::new(&url);

    let (status, _) = client.get_json("/api/ranking").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = client.get_json("/api/ranking").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        hits.load(Ordering::SeqCst),
        1,
        "second read within the TTL must be served from cache"
    );
}

#[tokio::test]
async fn test_ranking_cache_expires_after_ttl() {
    let (router, hits) = ranking_backend();
    let url = spawn_backend(router).await;
    let client = TestClient::with_cache_ttl(&url, Duration::from_millis(50));

    let _ = client.get_json("/api/ranking").await;
    let _ = client.get_json("/api/ranking").await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_millis(80)).await;

    let _ = client.get_json("/api/ranking").await;
    assert_eq!(
        hits.load(Ordering::SeqCst),
        2,
        "an expired entry must trigger a fresh fetch"
    );
}

#[tokio::test]
async fn test_state_ranking_validates_duplicate_territories() {
    let (router, _) = ranking_backend();
    let url = spawn_backend(router).await;
    let client = TestClient::new(&url);

    let (status, body) = client
        .post_json(
            "/api/ranking/state",
            &json!({
                "state_code": "52",
                "territory_ids": ["5208707", "5208707"],
                "start_date": "2023-01-01",
                "end_date": "2023-06-30",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_state_ranking_validates_date_order() {
    let (router, _) = ranking_backend();
    let url = spawn_backend(router).await;
    let client = TestClient::new(&url);

    let (status, _) = client
        .post_json(
            "/api/ranking/state",
            &json!({
                "state_code": "52",
                "territory_ids": ["5208707", "5201405"],
                "start_date": "2023-06-30",
                "end_date": "2023-01-01",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_state_ranking_requires_two_territories() {
    let (router, _) = ranking_backend();
    let url = spawn_backend(router).await;
    let client = TestClient::new(&url);

    let (status, _) = client
        .post_json(
            "/api/ranking/state",
            &json!({
                "state_code": "52",
                "territory_ids": ["5208707"],
                "start_date": "2023-01-01",
                "end_date": "2023-06-30",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_state_ranking_happy_path() {
    let (router, _) = ranking_backend();
    let url = spawn_backend(router).await;
    let client = TestClient::new(&url);

    let (status, body) = client
        .post_json(
            "/api/ranking/state",
            &json!({
                "state_code": "52",
                "territory_ids": ["5208707", "5201405"],
                "start_date": "2023-01-01",
                "end_date": "2023-06-30",
                "keywords": ["software"],
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["podium"][0]["territory_id"], "5208707");
}
