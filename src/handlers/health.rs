//! Health check endpoint.
//!
//! Reports whether the SPICE data directory exists and what it contains.

use axum::{extract::State, Json};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::error;

use crate::error::Result;
use crate::state::AppState;

/// Health response structure
#[derive(Debug, Serialize, PartialEq)]
pub struct HealthResponse {
    /// Entry names in the data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_content: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir_exists: Option<bool>,
    pub is_healthy: bool,
}

impl HealthResponse {
    fn unhealthy() -> Self {
        Self {
            data_content: None,
            data_dir_exists: None,
            is_healthy: false,
        }
    }
}

/// Handle GET / requests
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let report = state
        .config
        .data_directory()
        .and_then(|dir| inspect_data_directory(&dir));

    match report {
        Ok(response) => Json(response),
        Err(e) => {
            error!(error = %e, endpoint = "/", "Health check failed");
            Json(HealthResponse::unhealthy())
        }
    }
}

fn inspect_data_directory(dir: &Path) -> Result<HealthResponse> {
    let exists = dir.exists();
    let mut content = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<Vec<_>>>()?;
    content.sort();

    Ok(HealthResponse {
        data_content: Some(content),
        data_dir_exists: Some(exists),
        is_healthy: exists,
    })
}
