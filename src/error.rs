//! Error types.
//!
//! Scale computations never fail: invalid lengths give `None` and
//! missing anchors propagate as `None` entries.  Only reading colors
//! from text can go wrong.

use thiserror::Error;

/// Error parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColourError {
    #[error("empty color string")]
    Empty,

    #[error("invalid hex color '{0}': expected 3 or 6 digits")]
    InvalidLength(String),

    #[error("invalid hex digits in '{0}'")]
    InvalidHex(String),

    #[error("invalid color function '{0}'")]
    InvalidFunction(String),

    #[error("component '{value}' out of range in '{input}'")]
    OutOfRange { input: String, value: String },

    #[error("unknown color '{0}'")]
    Unknown(String),
}

/// Result type alias for color parsing.
pub type Result<T> = std::result::Result<T, ParseColourError>;
