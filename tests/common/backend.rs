//! A recording backend for driving handlers without a geometry library.

use futures::future::{self, BoxFuture};
use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use std::sync::Arc;

use spiceql_server::{AppState, Config, Method, Result, SpiceBackend, SpiceqlError};

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub function: String,
    pub args: Map<String, Value>,
    pub method: Method,
}

/// Records every call and answers with `{"function": ..., "args": ...}`,
/// or with a backend error when configured to fail.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<RecordedCall>>,
    failure: Option<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls
            .lock()
            .last()
            .cloned()
            .expect("backend was never called")
    }
}

impl SpiceBackend for RecordingBackend {
    fn query<'a>(
        &'a self,
        function: &'a str,
        args: Map<String, Value>,
        method: Method,
    ) -> BoxFuture<'a, Result<Value>> {
        self.calls.lock().push(RecordedCall {
            function: function.to_string(),
            args: args.clone(),
            method,
        });

        let outcome = match &self.failure {
            Some(message) => Err(SpiceqlError::Backend {
                message: message.clone(),
            }),
            None => Ok(json!({ "function": function, "args": args })),
        };
        Box::pin(future::ready(outcome))
    }
}

/// Application state around a recording backend
pub fn recording_state(config: Config) -> (Arc<AppState>, Arc<RecordingBackend>) {
    let backend = Arc::new(RecordingBackend::new());
    let state = AppState::new_shared(config, backend.clone());
    (state, backend)
}
