//! End-to-end tests for the REST backend.
//!
//! A fake upstream SpiceQL service is started on an ephemeral port and the
//! real server is pointed at it, so requests travel
//! client -> spiceql-server -> upstream and back.

mod common;

use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use common::http_client::{self, spawn_server};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use spiceql_server::{build_router, AppState, Config, Method, RestBackend, SpiceBackend};

/// Upstream that echoes what it received inside a success envelope, except
/// for `/api/findTargetKeywords` which always fails.
fn fake_upstream() -> Router {
    Router::new()
        .route(
            "/api/utcToEt",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                Json(json!({"statusCode": 200, "body": {"return": {"query": q}}}))
            }),
        )
        .route(
            "/api/getTargetStates",
            axum::routing::post(|Json(body): Json<Value>| async move {
                let count = body["ets"].as_array().map(Vec::len).unwrap_or(0);
                Json(json!({"statusCode": 200, "body": {"return": {"states": count, "args": body}}}))
            }),
        )
        .route(
            "/api/findTargetKeywords",
            get(|| async {
                Json(json!({"statusCode": 500, "body": {"error": "Unknown mission: nope"}}))
            }),
        )
}

async fn start_upstream() -> SocketAddr {
    spawn_server(fake_upstream()).await
}

fn backend_for(upstream: SocketAddr) -> RestBackend {
    RestBackend::new(&format!("http://{}/api", upstream), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_get_query_encodes_arguments() {
    let upstream = start_upstream().await;
    let backend = backend_for(upstream);

    let mut args = Map::new();
    args.insert("utc".to_string(), json!("2000-01-01"));
    args.insert("kernelList".to_string(), json!(["a.tls"]));
    args.insert("searchKernels".to_string(), json!(true));

    let result = backend.query("utcToEt", args, Method::Get).await.unwrap();
    assert_eq!(
        result,
        json!({"query": {"utc": "2000-01-01", "kernelList": "[\"a.tls\"]", "searchKernels": "true"}})
    );
}

#[tokio::test]
async fn test_upstream_error_becomes_backend_error() {
    let upstream = start_upstream().await;
    let backend = backend_for(upstream);

    let err = backend
        .query("findTargetKeywords", Map::new(), Method::Get)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown mission: nope");
}

#[tokio::test]
async fn test_unreachable_upstream_is_reported() {
    let backend = RestBackend::new("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();
    let err = backend
        .query("utcToEt", Map::new(), Method::Get)
        .await
        .unwrap_err();
    assert!(matches!(err, spiceql_server::SpiceqlError::Http(_)));
}

#[tokio::test]
async fn test_server_forwards_through_rest_backend() {
    let upstream = start_upstream().await;

    let mut config = Config::default();
    config.spiceql.rest_url = format!("http://{}/api/", upstream);
    let state = AppState::with_rest_backend(config).unwrap();
    let server = spawn_server(build_router(state)).await;

    let response = http_client::get(
        &server,
        "/getTargetStates?target=LRO&observer=MOON&frame=J2000&abcorr=NONE&mission=lro&startEts=0&stopEts=5&exposureDuration=1",
    )
    .await
    .expect("Failed to make request");
    assert_eq!(response.status(), 200);

    let json: Value = response.json().await.expect("Failed to parse JSON response");
    assert_eq!(json["statusCode"], 200);
    assert_eq!(json["body"]["return"]["states"], 5);
    assert_eq!(
        json["body"]["return"]["args"]["ets"],
        json!([0.0, 1.0, 2.0, 3.0, 4.0])
    );

    let response = http_client::get(&server, "/findTargetKeywords?key=BODY499_RADII&mission=nope")
        .await
        .expect("Failed to make request");
    let json: Value = response.json().await.expect("Failed to parse JSON response");
    assert_eq!(
        json,
        json!({"statusCode": 500, "body": {"error": "Unknown mission: nope"}})
    );
}
