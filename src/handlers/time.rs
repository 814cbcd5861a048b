//! Time conversion endpoints: spacecraft clock, UTC and ephemeris time.

use axum::{
    extract::{Query, State},
    response::Response,
};
use serde_json::{json, Value};
use std::sync::Arc;

use super::envelope::{args, run_query, QueryParams};
use crate::backend::Method;
use crate::error::Result;
use crate::state::AppState;

/// Handle GET /strSclkToEt requests
pub async fn str_sclk_to_et_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::from(query);
    let args = sclk_args::<String>(&params, "sclk");
    run_query(&state, "/strSclkToEt", "strSclkToEt", Method::Get, args, &params.describe()).await
}

/// Handle GET /doubleSclkToEt requests
pub async fn double_sclk_to_et_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::from(query);
    let args = sclk_args::<f64>(&params, "sclk");
    run_query(
        &state,
        "/doubleSclkToEt",
        "doubleSclkToEt",
        Method::Get,
        args,
        &params.describe(),
    )
    .await
}

/// Handle GET /doubleEtToSclk requests
pub async fn double_et_to_sclk_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::from(query);
    let args = sclk_args::<f64>(&params, "et");
    run_query(
        &state,
        "/doubleEtToSclk",
        "doubleEtToSclk",
        Method::Get,
        args,
        &params.describe(),
    )
    .await
}

/// Shared shape of the three clock conversions: `frameCode`, one time value
/// named `time_key`, `mission` and `kernelList`.
fn sclk_args<T>(params: &QueryParams, time_key: &str) -> Result<Value>
where
    T: std::str::FromStr + serde::Serialize,
    T::Err: std::fmt::Display,
{
    let frame_code: i64 = params.required("frameCode")?;
    let time: T = params.required(time_key)?;
    let mission: String = params.required("mission")?;
    let kernel_list = params.list::<String>("kernelList", vec![])?;

    Ok(args([
        ("frameCode", json!(frame_code)),
        (time_key, json!(time)),
        ("mission", json!(mission)),
        ("kernelList", json!(kernel_list)),
    ]))
}

/// Handle GET /utcToEt requests
pub async fn utc_to_et_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::from(query);
    let args = utc_to_et_args(&params);
    run_query(&state, "/utcToEt", "utcToEt", Method::Get, args, &params.describe()).await
}

fn utc_to_et_args(params: &QueryParams) -> Result<Value> {
    let utc: String = params.required("utc")?;
    let kernel_list = params.list::<String>("kernelList", vec![])?;
    Ok(args([("utc", json!(utc)), ("kernelList", json!(kernel_list))]))
}

/// Handle GET /etToUtc requests
pub async fn et_to_utc_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::from(query);
    let args = et_to_utc_args(&params);
    run_query(&state, "/etToUtc", "etToUtc", Method::Get, args, &params.describe()).await
}

fn et_to_utc_args(params: &QueryParams) -> Result<Value> {
    let et: f64 = params.required("et")?;
    let format: String = params.required("format")?;
    let precision: f64 = params.required("precision")?;
    let kernel_list = params.list::<String>("kernelList", vec![])?;
    Ok(args([
        ("et", json!(et)),
        ("format", json!(format)),
        ("precision", json!(precision)),
        ("kernelList", json!(kernel_list)),
    ]))
}
