//! HTTP request handlers for the spiceql-server API.
//!
//! This module contains all the endpoint handlers for the web server.

pub mod envelope;
pub mod frames;
pub mod health;
pub mod states;
pub mod time;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::logging::create_http_trace_layer;
use crate::state::AppState;

pub use envelope::{ResponseBody, ResponseModel};
pub use frames::{
    extract_exact_ck_times_handler, find_mission_keywords_handler, find_target_keywords_handler,
    frame_info_handler, frame_trace_handler, target_frame_info_handler,
    translate_code_to_name_handler, translate_name_to_code_handler,
};
pub use health::health_handler;
pub use states::{target_orientations_handler, target_states_handler, target_states_post_handler};
pub use time::{
    double_et_to_sclk_handler, double_sclk_to_et_handler, et_to_utc_handler,
    str_sclk_to_et_handler, utc_to_et_handler,
};

/// Build the application router with every endpoint
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route(
            "/getTargetStates",
            get(target_states_handler).post(target_states_post_handler),
        )
        .route("/getTargetOrientations", get(target_orientations_handler))
        .route("/strSclkToEt", get(str_sclk_to_et_handler))
        .route("/doubleSclkToEt", get(double_sclk_to_et_handler))
        .route("/doubleEtToSclk", get(double_et_to_sclk_handler))
        .route("/utcToEt", get(utc_to_et_handler))
        .route("/etToUtc", get(et_to_utc_handler))
        .route("/translateNameToCode", get(translate_name_to_code_handler))
        .route("/translateCodeToName", get(translate_code_to_name_handler))
        .route("/getFrameInfo", get(frame_info_handler))
        .route("/getTargetFrameInfo", get(target_frame_info_handler))
        .route("/findMissionKeywords", get(find_mission_keywords_handler))
        .route("/findTargetKeywords", get(find_target_keywords_handler))
        .route("/frameTrace", get(frame_trace_handler))
        .route("/extractExactCkTimes", get(extract_exact_ck_times_handler))
        .layer(create_http_trace_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
