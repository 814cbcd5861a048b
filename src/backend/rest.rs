//! Backend that forwards calls to an upstream SpiceQL REST service.
//!
//! The upstream speaks the same envelope this server produces:
//! `{"statusCode": 200, "body": {"return": ...}}` on success and
//! `{"statusCode": 500, "body": {"error": "..."}}` on failure.

use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::{Map, Value};
use tracing::debug;

use super::{Method, SpiceBackend};
use crate::error::{Result, SpiceqlError};

/// Public USGS SpiceQL deployment
pub const DEFAULT_REST_URL: &str = "https://astrogeology.usgs.gov/apis/spiceq/latest/";

/// Forwards queries over HTTP with `reqwest`
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
}

impl RestBackend {
    /// Create a backend for `base_url` with a per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self { client, base_url })
    }

    /// The upstream base URL, always ending in `/`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call(&self, function: &str, args: Map<String, Value>, method: Method) -> Result<Value> {
        let url = format!("{}{}", self.base_url, function);
        debug!(url = %url, ?method, "Forwarding SpiceQL query");

        let request = match method {
            Method::Get => self.client.get(&url).query(&query_pairs(&args)),
            Method::Post => self.client.post(&url).json(&args),
        };
        let envelope: Value = request.send().await?.json().await?;
        unwrap_envelope(envelope)
    }
}

impl SpiceBackend for RestBackend {
    fn query<'a>(
        &'a self,
        function: &'a str,
        args: Map<String, Value>,
        method: Method,
    ) -> BoxFuture<'a, Result<Value>> {
        self.call(function, args, method).boxed()
    }
}

/// Encode arguments as query pairs: strings raw, everything else as JSON text.
/// JSON arrays are valid list literals, so the upstream decodes them back.
fn query_pairs(args: &Map<String, Value>) -> Vec<(String, String)> {
    args.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect()
}

/// Extract the result from an upstream envelope
pub fn unwrap_envelope(envelope: Value) -> Result<Value> {
    let status = envelope.get("statusCode").and_then(Value::as_i64);
    let body = envelope.get("body");

    if let Some(error) = body.and_then(|b| b.get("error")) {
        let message = error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(SpiceqlError::Backend { message });
    }

    match (status, body.and_then(|b| b.get("return"))) {
        (Some(200), Some(result)) => Ok(result.clone()),
        (Some(200), None) => Ok(Value::Null),
        _ => Err(SpiceqlError::Backend {
            message: format!("Unexpected response from SpiceQL service: {}", envelope),
        }),
    }
}
