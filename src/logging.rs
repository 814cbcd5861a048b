//! Logging utilities for the spiceql-server.
//!
//! This module provides structured logging functionality to make logs more
//! searchable, analyzable, and useful for production deployments.

use tracing::{error, Level};

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use uuid::Uuid;

use crate::error::SpiceqlError;

/// Creates the tracing layer for HTTP request/response logging
pub fn create_http_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    DefaultMakeSpan,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    let response_formatter = DefaultOnResponse::new()
        .level(Level::DEBUG)
        .latency_unit(LatencyUnit::Micros);

    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(response_formatter)
}

/// Initialize the tracing subscriber with the given log level.
/// `RUST_LOG` wins when set.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Log an error that occurred during request processing
pub fn log_request_error(
    error: &SpiceqlError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) {
    error!(
        error = %error,
        endpoint = endpoint,
        request_id = request_id,
        params = params.unwrap_or("none"),
        error_type = error_kind(error),
        "Request processing error"
    );
}

fn error_kind(error: &SpiceqlError) -> &'static str {
    match error {
        SpiceqlError::MissingParameters { .. } => "missing_parameters",
        SpiceqlError::MalformedParameters { .. } => "malformed_parameters",
        SpiceqlError::InvalidParameter { .. } => "invalid_parameter",
        SpiceqlError::Backend { .. } => "backend",
        SpiceqlError::Http(_) => "http",
        SpiceqlError::Io(_) => "io",
        SpiceqlError::Config { .. } => "config",
        SpiceqlError::Json(_) => "json",
        SpiceqlError::Server { .. } => "server",
    }
}

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
