//! Target state and orientation endpoints.
//!
//! These are the endpoints that take ephemeris times, either as an explicit
//! `ets` list or as `startEts`/`stopEts`/`exposureDuration` windows.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::Response,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::envelope::{args, default_qualities, run_query, QueryParams};
use crate::backend::Method;
use crate::error::{Result, SpiceqlError};
use crate::params::{normalize_list_or_scalar, Param};
use crate::state::AppState;

/// Body of `POST /getTargetStates`; also built from the GET query string
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetStatesRequest {
    pub target: String,
    pub observer: String,
    pub frame: String,
    pub abcorr: String,
    pub mission: String,
    #[serde(default)]
    pub ets: Option<Param<f64>>,
    #[serde(default)]
    pub start_ets: Option<Param<f64>>,
    #[serde(default)]
    pub stop_ets: Option<Param<f64>>,
    #[serde(default)]
    pub exposure_duration: Option<Param<f64>>,
    #[serde(default)]
    pub ck_qualities: Option<Param<String>>,
    #[serde(default)]
    pub spk_qualities: Option<Param<String>>,
    #[serde(default)]
    pub kernel_list: Option<Param<String>>,
}

impl TargetStatesRequest {
    fn from_query(params: &QueryParams) -> Result<Self> {
        Ok(Self {
            target: params.required("target")?,
            observer: params.required("observer")?,
            frame: params.required("frame")?,
            abcorr: params.required("abcorr")?,
            mission: params.required("mission")?,
            ets: params.param("ets")?,
            start_ets: params.param("startEts")?,
            stop_ets: params.param("stopEts")?,
            exposure_duration: params.param("exposureDuration")?,
            ck_qualities: params.param("ckQualities")?,
            spk_qualities: params.param("spkQualities")?,
            kernel_list: params.param("kernelList")?,
        })
    }

    fn into_args(self, state: &AppState) -> Result<Value> {
        let ets = state
            .resolver
            .resolve(self.ets, self.start_ets, self.stop_ets, self.exposure_duration)?;
        let ck_qualities =
            normalize_list_or_scalar(self.ck_qualities, "ckQualities", default_qualities())?;
        let spk_qualities =
            normalize_list_or_scalar(self.spk_qualities, "spkQualities", default_qualities())?;
        let kernel_list = normalize_list_or_scalar(self.kernel_list, "kernelList", vec![])?;

        Ok(args([
            ("ets", json!(ets)),
            ("target", json!(self.target)),
            ("observer", json!(self.observer)),
            ("frame", json!(self.frame)),
            ("abcorr", json!(self.abcorr)),
            ("mission", json!(self.mission)),
            ("ckQualities", json!(ck_qualities)),
            ("spkQualities", json!(spk_qualities)),
            ("kernelList", json!(kernel_list)),
        ]))
    }
}

/// Handle GET /getTargetStates requests
pub async fn target_states_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::from(query);
    let args = TargetStatesRequest::from_query(&params).and_then(|req| req.into_args(&state));
    run_query(
        &state,
        "/getTargetStates",
        "getTargetStates",
        Method::Post,
        args,
        &params.describe(),
    )
    .await
}

/// Handle POST /getTargetStates requests
pub async fn target_states_post_handler(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<TargetStatesRequest>, JsonRejection>,
) -> Response {
    let (args, description) = match payload {
        Ok(Json(request)) => {
            let description = format!(
                "target={}, observer={}, frame={}, mission={}",
                request.target, request.observer, request.frame, request.mission
            );
            (request.into_args(&state), description)
        }
        Err(rejection) => (
            Err(SpiceqlError::invalid_parameter("body", rejection.body_text())),
            "unreadable body".to_string(),
        ),
    };
    run_query(
        &state,
        "/getTargetStates",
        "getTargetStates",
        Method::Post,
        args,
        &description,
    )
    .await
}

/// Handle GET /getTargetOrientations requests
pub async fn target_orientations_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let params = QueryParams::from(query);
    let args = target_orientations_args(&state, &params);
    run_query(
        &state,
        "/getTargetOrientations",
        "getTargetOrientations",
        Method::Get,
        args,
        &params.describe(),
    )
    .await
}

fn target_orientations_args(state: &AppState, params: &QueryParams) -> Result<Value> {
    let to_frame: i64 = params.required("toFrame")?;
    let ref_frame: i64 = params.required("refFrame")?;
    let mission: String = params.required("mission")?;
    let ets = state.resolver.resolve(
        params.param("ets")?,
        params.param("startEts")?,
        params.param("stopEts")?,
        params.param("exposureDuration")?,
    )?;
    let ck_qualities = params.list("ckQualities", default_qualities())?;
    let kernel_list = params.list::<String>("kernelList", vec![])?;

    Ok(args([
        ("ets", json!(ets)),
        ("toFrame", json!(to_frame)),
        ("refFrame", json!(ref_frame)),
        ("mission", json!(mission)),
        ("ckQualities", json!(ck_qualities)),
        ("kernelList", json!(kernel_list)),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_body_accepts_every_shape() {
        let body = r#"{
            "target": "LRO", "observer": "MOON", "frame": "J2000", "abcorr": "NONE",
            "mission": "lro",
            "startEts": [0.0, 10.0], "stopEts": "[2.0, 11.0]", "exposureDuration": [1.0, 0.5],
            "ckQualities": "smithed",
            "kernelList": ["a.bc"]
        }"#;
        let request: TargetStatesRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.start_ets, Some(Param::Many(vec![0.0, 10.0])));
        assert_eq!(request.stop_ets, Some(Param::Text("[2.0, 11.0]".to_string())));
        assert_eq!(request.ets, None);
        assert_eq!(request.spk_qualities, None);
        assert_eq!(request.kernel_list, Some(Param::Many(vec!["a.bc".to_string()])));
    }
}
