//! Application state management for spiceql-server.
//!
//! This module defines the shared state that is passed to all handlers:
//! configuration, the geometry backend and the time series resolver.

use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;

use crate::backend::{Method, RestBackend, SpiceBackend};
use crate::config::Config;
use crate::error::Result;
use crate::ets::EtsResolver;

/// The main application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Geometry backend every endpoint delegates to
    pub backend: Arc<dyn SpiceBackend>,
    /// Time series resolver built from the configured limits
    pub resolver: EtsResolver,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, backend: Arc<dyn SpiceBackend>) -> Self {
        let resolver = EtsResolver::new(config.limits.max_ets);
        Self {
            config,
            backend,
            resolver,
        }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config, backend: Arc<dyn SpiceBackend>) -> Arc<Self> {
        Arc::new(Self::new(config, backend))
    }

    /// Create state backed by the configured upstream REST service
    pub fn with_rest_backend(config: Config) -> Result<Arc<Self>> {
        let backend = RestBackend::new(
            &config.spiceql.rest_url,
            Duration::from_secs(config.spiceql.timeout_secs),
        )?;
        Ok(Self::new_shared(config, Arc::new(backend)))
    }

    /// Call a backend function, adding the configured `searchKernels` flag
    pub async fn call(
        &self,
        function: &str,
        mut args: Map<String, Value>,
        method: Method,
    ) -> Result<Value> {
        args.insert(
            "searchKernels".to_string(),
            Value::Bool(self.config.spiceql.search_kernels),
        );
        self.backend.query(function, args, method).await
    }
}
