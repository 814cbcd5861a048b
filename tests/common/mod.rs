//! Common test utilities for spiceql-server.
//!
//! This module provides shared utilities for testing the spiceql-server.

// Not every test binary uses every helper
#![allow(dead_code)]

pub mod backend;
pub mod http_client;
