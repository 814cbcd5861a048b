//! Configuration management for spiceql-server.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments and environment variables (highest priority)
//! 2. JSON config file
//! 3. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::backend::rest::DEFAULT_REST_URL;
use crate::error::{Result, SpiceqlError};
use crate::ets::DEFAULT_MAX_ETS;

/// Environment variables consulted for the SPICE data directory, in order
pub const DATA_DIR_ENV_VARS: [&str; 3] = ["SPICEROOT", "ALESPICEROOT", "ISISDATA"];

/// Command-line arguments for spiceql-server
#[derive(Parser, Debug, Default)]
#[command(name = "spiceql-server")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address to bind to
    #[arg(short = 'H', long, env = "SPICEQL_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SPICEQL_PORT")]
    pub port: Option<u16>,

    /// Number of worker threads
    #[arg(short, long, env = "SPICEQL_WORKERS")]
    pub workers: Option<usize>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "SPICEQL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Upstream SpiceQL REST service
    #[arg(long, env = "SPICEQL_REST_URL")]
    pub rest_url: Option<String>,

    /// SPICE data directory reported by the health check
    #[arg(long, env = "SPICEQL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Whether the backend searches for kernels on the caller's behalf
    #[arg(long, env = "SPICEQL_SEARCH_KERNELS")]
    pub search_kernels: Option<bool>,

    /// Maximum number of ephemeris times synthesized per request
    #[arg(long, env = "SPICEQL_MAX_ETS")]
    pub max_ets: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SPICEQL_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads (None = number of CPU cores)
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Geometry backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpiceqlConfig {
    /// Base URL of the upstream SpiceQL REST service
    #[serde(default = "default_rest_url")]
    pub rest_url: String,

    /// SPICE data directory; falls back to SPICEROOT, ALESPICEROOT, ISISDATA
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Passed to every backend call as `searchKernels`
    #[serde(default = "default_search_kernels")]
    pub search_kernels: bool,

    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Request limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum number of synthesized ephemeris times per request
    #[serde(default = "default_max_ets")]
    pub max_ets: usize,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Backend configuration
    #[serde(default)]
    pub spiceql: SpiceqlConfig,

    /// Request limits
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Build configuration from already parsed arguments
    pub fn from_args(args: Args) -> Result<Self> {
        // Start with defaults, then the JSON file if provided
        let mut config = match &args.config {
            Some(config_path) => Self::load_from_file(config_path)?,
            None => Config::default(),
        };

        // Override with command-line arguments
        if let Some(host) = args.host {
            config.server.host = host;
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
        if args.workers.is_some() {
            config.server.workers = args.workers;
        }
        if let Some(rest_url) = args.rest_url {
            config.spiceql.rest_url = rest_url;
        }
        if args.data_dir.is_some() {
            config.spiceql.data_dir = args.data_dir;
        }
        if let Some(search_kernels) = args.search_kernels {
            config.spiceql.search_kernels = search_kernels;
        }
        if let Some(max_ets) = args.max_ets {
            config.limits.max_ets = max_ets;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(SpiceqlError::Config {
                message: "Server host cannot be empty".to_string(),
            });
        }

        // Validate port (0 is not a valid port for users)
        if self.server.port == 0 {
            return Err(SpiceqlError::Config {
                message: "Server port cannot be 0".to_string(),
            });
        }

        if self.server.workers == Some(0) {
            return Err(SpiceqlError::Config {
                message: "Worker count cannot be 0".to_string(),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(SpiceqlError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if !(self.spiceql.rest_url.starts_with("http://")
            || self.spiceql.rest_url.starts_with("https://"))
        {
            return Err(SpiceqlError::Config {
                message: format!(
                    "Invalid REST URL: {}. Must start with http:// or https://",
                    self.spiceql.rest_url
                ),
            });
        }

        if self.spiceql.timeout_secs == 0 {
            return Err(SpiceqlError::Config {
                message: "Request timeout cannot be 0".to_string(),
            });
        }

        if self.limits.max_ets == 0 {
            return Err(SpiceqlError::Config {
                message: "max_ets cannot be 0".to_string(),
            });
        }

        Ok(())
    }

    /// Resolve the SPICE data directory: the configured one, else the first of
    /// SPICEROOT, ALESPICEROOT, ISISDATA that names an existing directory.
    pub fn data_directory(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.spiceql.data_dir {
            return Ok(dir.clone());
        }

        DATA_DIR_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var_os(var))
            .map(PathBuf::from)
            .find(|path| path.is_dir())
            .ok_or_else(|| SpiceqlError::Config {
                message: "Please set env var SPICEROOT, ISISDATA or ALESPICEROOT in order to proceed."
                    .to_string(),
            })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            spiceql: SpiceqlConfig::default(),
            limits: LimitsConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

impl Default for SpiceqlConfig {
    fn default() -> Self {
        Self {
            rest_url: default_rest_url(),
            data_dir: None,
            search_kernels: default_search_kernels(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_ets: default_max_ets(),
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_rest_url() -> String {
    DEFAULT_REST_URL.to_string()
}

fn default_search_kernels() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_ets() -> usize {
    DEFAULT_MAX_ETS
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.spiceql.rest_url, DEFAULT_REST_URL);
        assert!(config.spiceql.search_kernels);
        assert_eq!(config.limits.max_ets, DEFAULT_MAX_ETS);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_args_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"server": {{"port": 9000, "workers": 2}}, "spiceql": {{"search_kernels": false}}, "log_level": "debug"}}"#
        )
        .unwrap();

        let args = Args {
            config: Some(file.path().to_path_buf()),
            port: Some(9100),
            max_ets: Some(500),
            ..Default::default()
        };
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.workers, Some(2));
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(!config.spiceql.search_kernels);
        assert_eq!(config.limits.max_ets, 500);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_config_validation() {
        // Valid config should pass
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.server.host = "".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.spiceql.rest_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.spiceql.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.limits.max_ets = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_configured_data_directory_wins() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.spiceql.data_dir = Some(dir.path().to_path_buf());
        assert_eq!(config.data_directory().unwrap(), dir.path());
    }
}
