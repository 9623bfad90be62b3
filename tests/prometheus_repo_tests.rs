// Query client against a stub Prometheus server

use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use promdruid::config::PrometheusConfig;
use promdruid::error::QueryError;
use promdruid::labels::extract_unique_labels;
use promdruid::models::QueryResult;
use promdruid::prometheus_repo::PrometheusRepo;
use std::collections::HashMap;

async fn query_handler(
    Query(params): Query<HashMap<String, String>>,
) -> (axum::http::StatusCode, Json<serde_json::Value>) {
    let query = params.get("query").cloned().unwrap_or_default();
    if !params.contains_key("time") {
        return (
            axum::http::StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "status": "error", "errorType": "bad_data", "error": "missing time"
            })),
        );
    }
    let body = match query.as_str() {
        "matrix" => serde_json::json!({
            "status": "success",
            "data": {"resultType": "matrix", "result": []}
        }),
        "broken" => serde_json::json!({
            "status": "error", "errorType": "bad_data", "error": "parse error"
        }),
        _ => serde_json::json!({
            "status": "success",
            "data": {"resultType": "vector", "result": [
                {"metric": {"__name__": "job:up", "job": "node", "instance": "a"},
                 "value": [1583395744.0, "1"]},
                {"metric": {"__name__": "job:up", "zone": "eu", "job": "api"},
                 "value": [1583395744.0, "1"]}
            ]},
            "warnings": ["partial"]
        }),
    };
    let status = if query == "broken" {
        axum::http::StatusCode::BAD_REQUEST
    } else {
        axum::http::StatusCode::OK
    };
    (status, Json(body))
}

async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/api/v1/query", get(query_handler))
        .route("/garbage/api/v1/query", get(|| async { "not json" }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config(address: String) -> PrometheusConfig {
    PrometheusConfig {
        address,
        timeout_secs: 5,
        ..PrometheusConfig::default()
    }
}

#[tokio::test]
async fn test_query_vector_and_extract_labels() {
    let base = spawn_stub().await;
    let repo = PrometheusRepo::connect(&config(format!("{}/", base))).unwrap();
    assert_eq!(repo.base_url(), base);

    let outcome = repo.query(r#"{__name__=~"job:.+"}"#).await.unwrap();
    assert_eq!(outcome.warnings, vec!["partial"]);
    let labels = extract_unique_labels(&outcome.result).unwrap();
    assert_eq!(labels.as_slice(), ["job", "instance", "zone"]);
}

#[tokio::test]
async fn test_query_matrix_is_returned_as_is() {
    let repo = PrometheusRepo::connect(&config(spawn_stub().await)).unwrap();
    let outcome = repo.query("matrix").await.unwrap();
    assert_eq!(outcome.result, QueryResult::Matrix(vec![]));
    assert!(extract_unique_labels(&outcome.result).is_err());
}

#[tokio::test]
async fn test_query_api_error() {
    let repo = PrometheusRepo::connect(&config(spawn_stub().await)).unwrap();
    match repo.query("broken").await {
        Err(QueryError::Api { error_type, error }) => {
            assert_eq!(error_type, "bad_data");
            assert_eq!(error, "parse error");
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[tokio::test]
async fn test_query_undecodable_body() {
    let base = spawn_stub().await;
    let repo = PrometheusRepo::connect(&config(format!("{}/garbage", base))).unwrap();
    assert!(matches!(
        repo.query("up").await,
        Err(QueryError::Decode(_))
    ));
}

#[tokio::test]
async fn test_query_connection_refused() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let repo = PrometheusRepo::connect(&config(format!("http://{}", addr))).unwrap();
    assert!(matches!(repo.query("up").await, Err(QueryError::Http(_))));
}

#[test]
fn test_connect_with_missing_cert_fails() {
    let mut cfg = config("https://localhost:9090".into());
    cfg.tls_cert_path = "/nonexistent/ca.pem".into();
    assert!(matches!(
        PrometheusRepo::connect(&cfg),
        Err(QueryError::Certificate { .. })
    ));
}
