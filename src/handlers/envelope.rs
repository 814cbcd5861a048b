//! The uniform response envelope and the request plumbing shared by handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info};

use crate::backend::Method;
use crate::error::{Result, SpiceqlError};
use crate::logging::{generate_request_id, log_request_error};
use crate::params::{normalize_list_or_scalar, LiteralElement, Param};
use crate::state::AppState;

/// Quality tiers used when the caller does not name any
pub const DEFAULT_QUALITIES: [&str; 2] = ["smithed", "reconstructed"];

/// `{"statusCode": ..., "body": ...}`
#[derive(Debug, Serialize)]
pub struct ResponseModel {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: ResponseBody,
}

/// Either `{"return": ...}` or `{"error": "..."}`
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Result {
        #[serde(rename = "return")]
        result: Value,
    },
    Error {
        error: String,
    },
}

impl ResponseModel {
    pub fn success(result: Value) -> Self {
        Self {
            status_code: 200,
            body: ResponseBody::Result { result },
        }
    }

    pub fn failure(status_code: u16, error: &SpiceqlError) -> Self {
        Self {
            status_code,
            body: ResponseBody::Error {
                error: error.to_string(),
            },
        }
    }
}

/// Status carried by the envelope for an error. Only bad endpoint parameters
/// change the HTTP status as well.
fn failure_status(error: &SpiceqlError) -> (StatusCode, u16) {
    match error {
        SpiceqlError::InvalidParameter { .. } => (StatusCode::UNPROCESSABLE_ENTITY, 422),
        _ => (StatusCode::OK, 500),
    }
}

/// Raw query string pairs; a key may repeat.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

impl QueryParams {
    fn values(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// A required scalar; the last occurrence wins
    pub fn required<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self
            .values(key)
            .pop()
            .ok_or_else(|| SpiceqlError::invalid_parameter(key, "field required"))?;
        raw.trim().parse().map_err(|e: T::Err| {
            SpiceqlError::invalid_parameter(key, format!("could not parse {:?}: {}", raw, e))
        })
    }

    /// An optional list-or-scalar parameter
    pub fn param<T: LiteralElement>(&self, key: &str) -> Result<Option<Param<T>>> {
        Param::from_query_values(key, &self.values(key))
    }

    /// A list-or-scalar parameter normalized to a sequence
    pub fn list<T: LiteralElement>(&self, key: &str, default: Vec<T>) -> Result<Vec<T>> {
        normalize_list_or_scalar(self.param(key)?, key, default)
    }

    /// `key=value` pairs joined for log lines
    pub fn describe(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Default quality tier list
pub fn default_qualities() -> Vec<String> {
    DEFAULT_QUALITIES.iter().map(|q| q.to_string()).collect()
}

/// Call `function` with `args` and wrap the outcome in the envelope.
///
/// `args` is the result of parameter extraction; an error there is reported
/// without touching the backend.
pub async fn run_query(
    state: &AppState,
    endpoint: &str,
    function: &str,
    method: Method,
    args: Result<Value>,
    params: &str,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = endpoint,
        request_id = %request_id,
        params = params,
        "Processing SpiceQL query"
    );

    let outcome = match args {
        Ok(Value::Object(args)) => state.call(function, args, method).await,
        Ok(other) => Err(SpiceqlError::Server {
            message: format!("arguments for {} must be an object, got {}", function, other),
        }),
        Err(err) => Err(err),
    };

    match outcome {
        Ok(result) => {
            info!(
                endpoint = endpoint,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                "SpiceQL query successful"
            );
            (StatusCode::OK, Json(ResponseModel::success(result))).into_response()
        }
        Err(error) => {
            log_request_error(&error, endpoint, &request_id, Some(params));
            let (http_status, envelope_status) = failure_status(&error);
            (
                http_status,
                Json(ResponseModel::failure(envelope_status, &error)),
            )
                .into_response()
        }
    }
}

/// Build an argument object from name/value pairs
pub fn args<const N: usize>(pairs: [(&str, Value); N]) -> Value {
    Value::Object(
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<Map<String, Value>>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(pairs: &[(&str, &str)]) -> QueryParams {
        QueryParams::from(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_envelope_serialization() {
        let ok = serde_json::to_value(ResponseModel::success(json!([1.5]))).unwrap();
        assert_eq!(ok, json!({"statusCode": 200, "body": {"return": [1.5]}}));

        let err = SpiceqlError::Backend {
            message: "boom".to_string(),
        };
        let failed = serde_json::to_value(ResponseModel::failure(500, &err)).unwrap();
        assert_eq!(failed, json!({"statusCode": 500, "body": {"error": "boom"}}));
    }

    #[test]
    fn test_required_params() {
        let q = query(&[("frameCode", "-85000"), ("mission", "lro")]);
        assert_eq!(q.required::<i64>("frameCode").unwrap(), -85000);
        assert_eq!(q.required::<String>("mission").unwrap(), "lro");

        let err = q.required::<String>("sclk").unwrap_err();
        assert!(matches!(err, SpiceqlError::InvalidParameter { .. }));

        let err = q.required::<i64>("mission").unwrap_err();
        assert!(err.to_string().contains("mission"));
    }

    #[test]
    fn test_list_params() {
        let q = query(&[
            ("ckQualities", "smithed"),
            ("spkQualities", "predicted"),
            ("spkQualities", "reconstructed"),
            ("kernelList", "['a.bc', 'b.bsp']"),
        ]);
        assert_eq!(
            q.list::<String>("ckQualities", default_qualities()).unwrap(),
            vec!["smithed"]
        );
        assert_eq!(
            q.list::<String>("spkQualities", default_qualities()).unwrap(),
            vec!["predicted", "reconstructed"]
        );
        assert_eq!(
            q.list::<String>("kernelList", vec![]).unwrap(),
            vec!["a.bc", "b.bsp"]
        );
        assert_eq!(
            q.list::<String>("missing", default_qualities()).unwrap(),
            vec!["smithed", "reconstructed"]
        );
    }

    #[test]
    fn test_failure_status() {
        let err = SpiceqlError::invalid_parameter("et", "field required");
        assert_eq!(failure_status(&err), (StatusCode::UNPROCESSABLE_ENTITY, 422));

        let err = SpiceqlError::malformed("bad");
        assert_eq!(failure_status(&err), (StatusCode::OK, 500));
    }

    #[test]
    fn test_args_builder() {
        let value = args([("mission", json!("lro")), ("et", json!(1.0))]);
        assert_eq!(value, json!({"mission": "lro", "et": 1.0}));
    }
}
