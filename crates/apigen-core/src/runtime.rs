//! Runtime helpers shared by generated request bindings.
//!
//! Generated accessors read raw header and query text, then call into this module
//! to enforce presence and parse scalars. Body accessors call [`parse_body`].
//! The module depends on nothing beyond `serde` and `serde_json`.

use std::error::Error as StdError;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use serde::de::DeserializeOwned;

/// Request location a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Header,
    Query,
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => f.write_str("header"),
            Self::Query => f.write_str("query parameter"),
        }
    }
}

/// Failure to extract a parameter from a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// A required parameter was absent or empty
    NotFound { location: ParamLocation, key: String },
    /// The raw value was present but is not visible ASCII text
    InvalidText { location: ParamLocation, key: String },
    /// The text was neither `true` nor `false`
    InvalidBoolean {
        location: ParamLocation,
        key: String,
        value: String,
    },
    InvalidInteger {
        location: ParamLocation,
        key: String,
        source: ParseIntError,
    },
    InvalidFloat {
        location: ParamLocation,
        key: String,
        source: ParseFloatError,
    },
}

impl ParamError {
    /// Schema name of the offending parameter.
    pub fn key(&self) -> &str {
        match self {
            Self::NotFound { key, .. }
            | Self::InvalidText { key, .. }
            | Self::InvalidBoolean { key, .. }
            | Self::InvalidInteger { key, .. }
            | Self::InvalidFloat { key, .. } => key,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { location, key } => write!(f, "{location} not found: {key:?}"),
            Self::InvalidText { location, key } => {
                write!(f, "{location} {key:?} is not visible ASCII text")
            }
            Self::InvalidBoolean {
                location,
                key,
                value,
            } => write!(f, "boolean {location} {key:?} has invalid value {value:?}"),
            Self::InvalidInteger {
                location,
                key,
                source,
            } => write!(f, "numeric {location} {key:?} is invalid: {source}"),
            Self::InvalidFloat {
                location,
                key,
                source,
            } => write!(f, "numeric {location} {key:?} is invalid: {source}"),
        }
    }
}

impl StdError for ParamError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::InvalidInteger { source, .. } => Some(source),
            Self::InvalidFloat { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Text of an optional raw value, or the empty string when it is absent.
///
/// Takes the result of a `to_str`-style conversion so a value that exists but
/// cannot be read as text is reported instead of being treated as missing.
pub fn text_value<'a, E>(
    value: Option<Result<&'a str, E>>,
    key: &str,
    location: ParamLocation,
) -> Result<&'a str, ParamError> {
    match value {
        None => Ok(""),
        Some(Ok(text)) => Ok(text),
        Some(Err(_)) => Err(ParamError::InvalidText {
            location,
            key: key.to_string(),
        }),
    }
}

/// Fail with [`ParamError::NotFound`] when a required value is empty.
pub fn require(raw: &str, key: &str, location: ParamLocation) -> Result<(), ParamError> {
    if raw.is_empty() {
        return Err(ParamError::NotFound {
            location,
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Accept `true` or `false` in any letter case.
pub fn parse_bool(raw: &str, key: &str, location: ParamLocation) -> Result<bool, ParamError> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ParamError::InvalidBoolean {
            location,
            key: key.to_string(),
            value: raw.to_string(),
        })
    }
}

/// Parse a base-10 integer.
pub fn parse_int(raw: &str, key: &str, location: ParamLocation) -> Result<i64, ParamError> {
    raw.parse::<i64>().map_err(|source| ParamError::InvalidInteger {
        location,
        key: key.to_string(),
        source,
    })
}

pub fn parse_float(raw: &str, key: &str, location: ParamLocation) -> Result<f64, ParamError> {
    raw.parse::<f64>().map_err(|source| ParamError::InvalidFloat {
        location,
        key: key.to_string(),
        source,
    })
}

/// Deserialize a complete JSON request payload.
pub fn parse_body<T: DeserializeOwned>(payload: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(payload)
}
