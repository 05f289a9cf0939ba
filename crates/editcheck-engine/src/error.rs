//! Error types for engine construction.
//!
//! Configuration errors are the only fallible tier: once an engine is
//! built, `validate` never fails for data reasons.

use thiserror::Error;

/// Result type alias for configuration-time operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Fatal errors raised while loading a rule configuration document.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document could not be read from disk.
    #[error("failed to read rule configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be parsed. This covers malformed YAML,
    /// an unrecognized rule `type`, missing required fields, and
    /// invalid regex patterns — no partial engine is ever produced.
    #[error("invalid rule configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
}
