//! Error handling for the apigen binding generator.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Every variant is fatal to a
//! generation run: the driver stops at the first error it sees.
//!
//! # Examples
//!
//! ```
//! use apigen_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("no input documents"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result type for apigen generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for apigen generation operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The schema document could not be read or parsed
    #[error("failed to load OpenAPI document {location}: {message}")]
    DocumentLoad { location: String, message: String },

    /// A `$ref` pointed outside the document, at nothing, or back at itself
    #[error("unresolvable reference {reference:?}: {reason}")]
    UnresolvedRef { reference: String, reason: String },

    /// Creating or deleting the output directory failed
    #[error("failed to prepare directory {path}: {source}")]
    DirectoryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two response variants disagree on the top-level body shape
    #[error("{prefix}: multiple response types not allowed, found {first:?} and {second:?}")]
    ResponseTypeConflict {
        prefix: String,
        first: String,
        second: String,
    },

    /// Two response variants disagree on the type of a shared property
    #[error(
        "{prefix}, response {status:?}, property {field:?} has multiple types: found {first:?} and {second:?}"
    )]
    ResponseFieldConflict {
        prefix: String,
        status: String,
        field: String,
        first: String,
        second: String,
    },

    /// The emitted text was rejected by the formatter. The raw text is kept for inspection.
    #[error("failed to format generated source: {message}")]
    Format { source_text: String, message: String },

    /// Two units of one run would be written to the same module file
    #[error("module {module:?} would be generated twice: by {first} and by {second}")]
    ModuleCollision {
        module: String,
        first: String,
        second: String,
    },

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new document load error
    pub fn document<L: Into<String>, S: Into<String>>(location: L, msg: S) -> Self {
        Self::DocumentLoad {
            location: location.into(),
            message: msg.into(),
        }
    }

    /// Create a new reference resolution error
    pub fn unresolved_ref<R: Into<String>, S: Into<String>>(reference: R, reason: S) -> Self {
        Self::UnresolvedRef {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    /// Wrap an I/O failure on the output directory
    pub fn directory<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::DirectoryIo {
            path: path.into(),
            source,
        }
    }

    /// The unformatted text attached to a [`Error::Format`] failure
    pub fn unformatted_source(&self) -> Option<&str> {
        match self {
            Self::Format { source_text, .. } => Some(source_text),
            _ => None,
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Config(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Config(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_conflict_message_names_field_and_types() {
        let err = Error::ResponseFieldConflict {
            prefix: "PetStorePetsGet".into(),
            status: "404".into(),
            field: "id".into(),
            first: "i64".into(),
            second: "String".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"id\""));
        assert!(msg.contains("\"i64\""));
        assert!(msg.contains("\"String\""));
        assert!(msg.starts_with("PetStorePetsGet"));
    }

    #[test]
    fn test_unformatted_source_only_on_format_errors() {
        let err = Error::Format {
            source_text: "pub struct {".into(),
            message: "expected identifier".into(),
        };
        assert_eq!(err.unformatted_source(), Some("pub struct {"));
        assert_eq!(Error::config("x").unformatted_source(), None);
    }
}
