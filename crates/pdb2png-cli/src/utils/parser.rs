use pdb2png::core::color::{ColorError, ColorSpec};
use pdb2png::engine::config::{ConfigError, Rotation};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Invalid color '{input}': {source}")]
    InvalidColor {
        input: String,
        #[source]
        source: ColorError,
    },

    #[error("Invalid rotation '{input}': {source}")]
    InvalidRotation {
        input: String,
        #[source]
        source: ConfigError,
    },

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),
}

/// A color name (`red`) or a flat list of RGB components (`1,0,0,0,1,0`).
pub fn parse_color(s: &str) -> Result<ColorSpec, ParseError> {
    s.parse().map_err(|source| ParseError::InvalidColor {
        input: s.to_string(),
        source,
    })
}

/// Three comma-separated angles in degrees (`0,90,0`).
pub fn parse_rotation(s: &str) -> Result<Rotation, ParseError> {
    s.parse().map_err(|source| ParseError::InvalidRotation {
        input: s.to_string(),
        source,
    })
}

/// Splits `KEY=VALUE` at the first `=`. The key must be non-empty.
pub fn parse_key_value(s: &str) -> Result<(&str, &str), ParseError> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidKeyValue(s.to_string())),
    }
}
