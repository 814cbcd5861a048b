//! Frame, keyword and CK time endpoints.

use axum::{
    extract::{Query, State},
    response::Response,
};
use serde_json::{json, Value};
use std::sync::Arc;

use super::envelope::{args, default_qualities, run_query, QueryParams};
use crate::backend::Method;
use crate::error::Result;
use crate::state::AppState;

/// Handle GET /translateNameToCode requests
pub async fn translate_name_to_code_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::from(query);
    let args = mission_lookup_args::<String>(&params, "frame");
    run_query(
        &state,
        "/translateNameToCode",
        "translateNameToCode",
        Method::Get,
        args,
        &params.describe(),
    )
    .await
}

/// Handle GET /translateCodeToName requests
pub async fn translate_code_to_name_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::from(query);
    let args = mission_lookup_args::<i64>(&params, "frame");
    run_query(
        &state,
        "/translateCodeToName",
        "translateCodeToName",
        Method::Get,
        args,
        &params.describe(),
    )
    .await
}

/// Handle GET /getFrameInfo requests
pub async fn frame_info_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::from(query);
    let args = mission_lookup_args::<i64>(&params, "frame");
    run_query(&state, "/getFrameInfo", "getFrameInfo", Method::Get, args, &params.describe()).await
}

/// Handle GET /getTargetFrameInfo requests
pub async fn target_frame_info_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::from(query);
    let args = mission_lookup_args::<i64>(&params, "targetId");
    run_query(
        &state,
        "/getTargetFrameInfo",
        "getTargetFrameInfo",
        Method::Get,
        args,
        &params.describe(),
    )
    .await
}

/// Handle GET /findMissionKeywords requests
pub async fn find_mission_keywords_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::from(query);
    let args = mission_lookup_args::<String>(&params, "key");
    run_query(
        &state,
        "/findMissionKeywords",
        "findMissionKeywords",
        Method::Get,
        args,
        &params.describe(),
    )
    .await
}

/// Handle GET /findTargetKeywords requests
pub async fn find_target_keywords_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::from(query);
    let args = mission_lookup_args::<String>(&params, "key");
    run_query(
        &state,
        "/findTargetKeywords",
        "findTargetKeywords",
        Method::Get,
        args,
        &params.describe(),
    )
    .await
}

/// Arguments shared by the single-identifier lookups
fn mission_lookup_args<T>(params: &QueryParams, key: &str) -> Result<Value>
where
    T: std::str::FromStr + serde::Serialize,
    T::Err: std::fmt::Display,
{
    let value: T = params.required(key)?;
    let mission: String = params.required("mission")?;
    let kernel_list = params.list::<String>("kernelList", vec![])?;
    Ok(args([
        (key, json!(value)),
        ("mission", json!(mission)),
        ("kernelList", json!(kernel_list)),
    ]))
}

/// Handle GET /frameTrace requests
pub async fn frame_trace_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::from(query);
    let args = frame_trace_args(&params);
    run_query(&state, "/frameTrace", "frameTrace", Method::Get, args, &params.describe()).await
}

fn frame_trace_args(params: &QueryParams) -> Result<Value> {
    let et: f64 = params.required("et")?;
    let initial_frame: i64 = params.required("initialFrame")?;
    let mission: String = params.required("mission")?;
    let ck_qualities = params.list("ckQualities", default_qualities())?;
    Ok(args([
        ("et", json!(et)),
        ("initialFrame", json!(initial_frame)),
        ("mission", json!(mission)),
        ("ckQualities", json!(ck_qualities)),
    ]))
}

/// Handle GET /extractExactCkTimes requests
pub async fn extract_exact_ck_times_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::from(query);
    let args = extract_exact_ck_times_args(&params);
    run_query(
        &state,
        "/extractExactCkTimes",
        "extractExactCkTimes",
        Method::Get,
        args,
        &params.describe(),
    )
    .await
}

fn extract_exact_ck_times_args(params: &QueryParams) -> Result<Value> {
    let observ_start: f64 = params.required("observStart")?;
    let observ_end: f64 = params.required("observEnd")?;
    let target_frame: i64 = params.required("targetFrame")?;
    let mission: String = params.required("mission")?;
    let ck_qualities = params.list("ckQualities", default_qualities())?;
    Ok(args([
        ("observStart", json!(observ_start)),
        ("observEnd", json!(observ_end)),
        ("targetFrame", json!(target_frame)),
        ("mission", json!(mission)),
        ("ckQualities", json!(ck_qualities)),
    ]))
}
