//! Error types for projectile-mcp.
//!
//! None of these are fatal to the request loop. Protocol-level failures are
//! expressed as JSON-RPC error objects instead (see [`crate::mcp::protocol`]).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Reasons an input line could not be turned into a message.
///
/// These are logged and the line is dropped; no JSON-RPC error is written
/// because no `id` can be trusted.
#[derive(Error, Debug)]
pub enum MessageError {
    /// The line is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The line is valid JSON but not an object.
    #[error("expected a JSON object, got {kind}")]
    NotAnObject {
        /// JSON type that was received instead.
        kind: &'static str,
    },
}

/// Errors produced by the projectile calculation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectileError {
    /// An argument was present but was not a JSON number.
    #[error("{field} must be a number")]
    NotANumber {
        /// Name of the offending argument.
        field: &'static str,
    },

    /// An argument was NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFiniteInput {
        /// Name of the offending argument.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The inputs were valid but the distance overflowed.
    #[error("distance is not representable (speed {initial_speed}, angle {angle})")]
    NonFiniteResult {
        /// Initial speed in m/s.
        initial_speed: f64,
        /// Launch angle in degrees.
        angle: f64,
    },
}

/// Errors raised while bringing up a UI host.
#[derive(Error, Debug)]
pub enum UiError {
    /// The host failed to start serving.
    #[error("UI host failed to launch: {message}")]
    Launch {
        /// Host-provided description.
        message: String,
    },

    /// The background thread for the host could not be spawned.
    #[error("failed to spawn UI host thread")]
    ThreadSpawn(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let error = ConfigError::NotFound {
            path: PathBuf::from("/path/to/config.json"),
        };
        let msg = error.to_string();
        assert!(msg.contains("not found"));
        assert!(msg.contains("config.json"));
    }

    #[test]
    fn validation_error_display() {
        let error = ConfigError::ValidationError {
            message: "invalid setting".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("invalid setting"));
    }

    #[test]
    fn projectile_error_names_field() {
        let error = ProjectileError::NotANumber {
            field: "initial_speed",
        };
        assert_eq!(error.to_string(), "initial_speed must be a number");

        let error = ProjectileError::NonFiniteInput {
            field: "angle",
            value: f64::INFINITY,
        };
        assert_eq!(error.to_string(), "angle must be finite, got inf");
    }

    #[test]
    fn ui_error_display() {
        let error = UiError::Launch {
            message: "port 7860 in use".to_string(),
        };
        assert!(error.to_string().contains("port 7860 in use"));
    }
}
