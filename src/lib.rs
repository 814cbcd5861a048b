//! # spiceql-server
//!
//! An HTTP API for spacecraft geometry queries.
//!
//! The server accepts query-string or JSON parameters, normalizes the ones that
//! may arrive as either a scalar or a list, synthesizes ephemeris time series from
//! start/stop/exposure windows, and forwards each call to a SpiceQL backend. Every
//! answer is wrapped in the same JSON envelope.
//!
//! ## Architecture
//!
//! - **Parameters**: [`params`] decodes textual literals and list-or-scalar values
//! - **Time series**: [`ets`] resolves explicit times or start/stop/exposure windows
//! - **Backend**: [`backend`] is the seam to the geometry library
//! - **API Layer**: [`handlers`] exposes the SpiceQL functions over HTTP

pub mod backend;
pub mod config;
pub mod error;
pub mod ets;
pub mod handlers;
pub mod logging;
pub mod params;
pub mod state;

pub use backend::{Method, RestBackend, SpiceBackend};
pub use config::Config;
pub use error::{Result, SpiceqlError};
pub use ets::{interpolate_times, resolve_ets, EtsResolver};
pub use handlers::build_router;
pub use logging::{create_http_trace_layer, generate_request_id, init_tracing, log_request_error};
pub use params::{normalize_list_or_scalar, Literal, OneOrMany, Param};
pub use state::AppState;
