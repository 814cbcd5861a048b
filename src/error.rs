//! Error types for the spiceql-server application.
//!
//! One enum covers every failure a request or the server lifecycle can hit.
//! Handlers turn these into the response envelope; nothing below the handler
//! layer knows about HTTP.

use thiserror::Error;

/// The main error type for spiceql-server operations.
#[derive(Error, Debug)]
pub enum SpiceqlError {
    /// Neither an explicit time list nor a complete start/stop/exposure triple was given
    #[error("{message}")]
    MissingParameters { message: String },

    /// Parameters were given but with inconsistent shapes or unparseable text
    #[error("{message}")]
    MalformedParameters { message: String },

    /// A required endpoint parameter is absent or has the wrong type
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// The geometry backend answered with an error
    #[error("{message}")]
    Backend { message: String },

    /// Transport errors talking to an upstream SpiceQL service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl SpiceqlError {
    /// Shorthand for a [`SpiceqlError::MalformedParameters`]
    pub fn malformed(message: impl Into<String>) -> Self {
        SpiceqlError::MalformedParameters {
            message: message.into(),
        }
    }

    /// Shorthand for a [`SpiceqlError::InvalidParameter`]
    pub fn invalid_parameter(param: &str, message: impl Into<String>) -> Self {
        SpiceqlError::InvalidParameter {
            param: param.to_string(),
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with SpiceqlError
pub type Result<T> = std::result::Result<T, SpiceqlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_errors_display_bare_message() {
        let err = SpiceqlError::malformed("bad shapes");
        assert_eq!(err.to_string(), "bad shapes");

        let err = SpiceqlError::invalid_parameter("frameCode", "expected an integer");
        assert_eq!(
            err.to_string(),
            "Invalid parameter: frameCode - expected an integer"
        );
    }
}
