//! Configuration error types
//!
//! The simulation itself never fails: missing pieces are skipped, not reported.
//! Only loading tuning data can go wrong, and callers fall back to defaults.

use std::fmt;

/// Error raised while loading or validating a [`crate::GameConfig`]
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON document could not be parsed
    Parse(serde_json::Error),

    /// The config file could not be read
    Io {
        /// Path that was requested
        path: String,
        source: std::io::Error,
    },

    /// A tunable is outside the range the simulation can handle
    OutOfRange {
        /// Field name (for logging)
        name: &'static str,
        /// The rejected value
        value: f32,
        /// Human-readable description of the accepted range
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "invalid config JSON: {}", err),
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config '{}': {}", path, source)
            }
            ConfigError::OutOfRange {
                name,
                value,
                expected,
            } => write!(
                f,
                "config value '{}' = {} is outside {}",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = ConfigError::OutOfRange {
            name: "spawn_interval",
            value: -1.0,
            expected: "(0, ∞)",
        };
        let msg = err.to_string();
        assert!(msg.contains("spawn_interval"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn test_parse_error_has_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConfigError::from(json_err);
        assert!(std::error::Error::source(&err).is_some());
    }
}
