//! The seam between the HTTP layer and the geometry library.
//!
//! Every endpoint boils down to one named SpiceQL function called with a JSON
//! object of arguments, so the backend interface is a single `query`.

pub mod rest;

use futures::future::BoxFuture;
use serde_json::{Map, Value};

use crate::error::Result;

pub use rest::RestBackend;

/// HTTP method used when the call is forwarded over the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A provider of SpiceQL functions
pub trait SpiceBackend: Send + Sync {
    /// Call `function` with named `args` and return its result value
    fn query<'a>(
        &'a self,
        function: &'a str,
        args: Map<String, Value>,
        method: Method,
    ) -> BoxFuture<'a, Result<Value>>;
}
