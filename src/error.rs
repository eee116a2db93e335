//! Error types for algoviz.
//!
//! All fallible operations return `Result<T, VizError>` instead of
//! panicking. Recoverable errors leave the engine in its prior stable
//! state; none are fatal to the process.

use thiserror::Error;

/// Result type alias for algoviz operations.
pub type VizResult<T> = Result<T, VizError>;

/// Unified error type for all algoviz operations.
#[derive(Debug, Error)]
pub enum VizError {
    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Search target input that does not parse as a number.
    ///
    /// Recovered locally: surfaced as a status message, no request is made
    /// and no state transition occurs.
    #[error("invalid search target {input:?}: not a number")]
    InvalidTarget {
        /// The raw text the user entered.
        input: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Trace Errors =====
    /// The algorithm engine returned a trace violating a step invariant.
    #[error("malformed trace: {reason}")]
    MalformedTrace {
        /// Which invariant was violated.
        reason: String,
    },

    /// The algorithm engine was unreachable or answered with a non-success
    /// response.
    #[error("algorithm engine error: {message}")]
    Provider {
        /// Description of the collaborator failure.
        message: String,
    },

    /// HTTP transport failure talking to the algorithm engine.
    #[cfg(feature = "http")]
    #[error("algorithm engine request failed: {0}")]
    Http(#[from] reqwest::Error),

    // ===== I/O Errors =====
    /// Terminal or file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VizError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a malformed-trace error naming the violated invariant.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedTrace {
            reason: reason.into(),
        }
    }

    /// Create a collaborator-failure error.
    #[must_use]
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Check if this error came from user input (recovered locally with a
    /// status message, never a state transition).
    #[must_use]
    pub const fn is_user_input(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::InvalidTarget { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_input_detection() {
        let target = VizError::InvalidTarget {
            input: "abc".to_string(),
        };
        assert!(target.is_user_input());

        let config = VizError::config("size out of range");
        assert!(config.is_user_input());

        let trace = VizError::malformed("step 3 array length 5, expected 4");
        assert!(!trace.is_user_input());

        let provider = VizError::provider("connection refused");
        assert!(!provider.is_user_input());
    }

    #[test]
    fn test_error_config_display() {
        let err = VizError::config("invalid parameter");
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("invalid parameter"));
    }

    #[test]
    fn test_error_invalid_target_display() {
        let err = VizError::InvalidTarget {
            input: "12x".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("invalid search target"));
        assert!(msg.contains("12x"));
    }

    #[test]
    fn test_error_malformed_display() {
        let err = VizError::malformed("found flag set before final step");
        let msg = err.to_string();
        assert!(msg.contains("malformed trace"));
        assert!(msg.contains("found flag"));
    }

    #[test]
    fn test_error_provider_display() {
        let err = VizError::provider("HTTP 500");
        let msg = err.to_string();
        assert!(msg.contains("algorithm engine error"));
        assert!(msg.contains("HTTP 500"));
    }

    #[test]
    fn test_error_debug() {
        let err = VizError::config("test");
        let debug = format!("{:?}", err);
        assert!(debug.contains("Config"));
    }
}
