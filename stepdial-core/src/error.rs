//! Error types for range construction, panel configuration and operation scripts.
//!
//! The binding model itself never fails: malformed field text is reverted
//! locally and out-of-range values are clamped. These errors only surface at
//! the edges, where user-supplied configuration or scripts are parsed.

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Range lower bound {lower} exceeds upper bound {upper}")]
    Inverted { lower: Decimal, upper: Decimal },

    #[error("Malformed range '{0}', expected '<lower>..<upper>'")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read panel config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid panel config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Panel config defines no settings")]
    Empty,

    #[error("Setting name must not be empty")]
    EmptyName,

    #[error("Duplicate setting name '{0}'")]
    DuplicateName(String),

    #[error("Setting '{name}': {source}")]
    InvalidRange {
        name: String,
        #[source]
        source: RangeError,
    },

    #[error("Unknown setting '{0}'")]
    UnknownSetting(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Unknown operation '{0}' (expected inc, dec, text, value, rescale, range or drag)")]
    UnknownOperation(String),

    #[error("Operation '{0}' requires an argument")]
    MissingArgument(String),

    #[error("Invalid argument '{arg}' for operation '{op}'")]
    InvalidArgument { op: String, arg: String },

    #[error(transparent)]
    Range(#[from] RangeError),
}
