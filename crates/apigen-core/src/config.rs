//! Configuration management for apigen generation runs.
//!
//! This module defines the `Config` struct describing one run: which documents to
//! read, where to write, and a couple of output switches. It can be built
//! programmatically or loaded from a YAML file.
//!
//! # Examples
//!
//! ```no_run
//! use apigen_core::config::Config;
//!
//! let mut config = Config::new(vec!["openapi.yaml".into()], "src/bindings");
//! config.emit_mod_file = false;
//!
//! # #[tokio::main]
//! # async fn main() -> apigen_core::Result<()> {
//! let config = Config::from_file("apigen.yaml").await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::emit::DEFAULT_HELPER_MODULE;
use crate::naming::to_snake_case;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Extensions of the documents a run accepts.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Configuration for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Paths or URLs of the OpenAPI documents, processed in order
    pub input_paths: Vec<String>,

    /// Directory the bindings are written to
    pub output_dir: String,

    /// Module name of the shared runtime helper
    #[serde(default = "default_helper_module")]
    pub helper_module: String,

    /// Whether to write a `mod.rs` declaring every generated module
    #[serde(default = "default_true")]
    pub emit_mod_file: bool,

    /// Whether to delete the output directory before generating
    #[serde(default = "default_true")]
    pub clean_output: bool,
}

impl Config {
    /// Create a new Config with default values
    pub fn new(input_paths: Vec<String>, output_dir: impl Into<String>) -> Self {
        Self {
            input_paths,
            output_dir: output_dir.into(),
            helper_module: default_helper_module(),
            emit_mod_file: true,
            clean_output: true,
        }
    }

    /// Load configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check the settings a run cannot start without.
    pub fn validate(&self) -> crate::Result<()> {
        if self.input_paths.is_empty() {
            return Err(crate::Error::config("at least one input document is required"));
        }
        if self.output_dir.trim().is_empty() {
            return Err(crate::Error::config("output directory must not be empty"));
        }
        if to_snake_case(&self.helper_module) != self.helper_module {
            return Err(crate::Error::config(format!(
                "helper module {:?} is not a snake_case identifier",
                self.helper_module
            )));
        }
        Ok(())
    }

    /// Input documents with a supported extension; others are skipped with a warning.
    pub fn document_paths(&self) -> Vec<&str> {
        self.input_paths
            .iter()
            .map(String::as_str)
            .filter(|path| {
                let supported = has_document_extension(path);
                if !supported {
                    log::warn!("Skipping {}: not a .yaml, .yml or .json document", path);
                }
                supported
            })
            .collect()
    }
}

/// Whether `path` ends in one of [`DOCUMENT_EXTENSIONS`].
pub fn has_document_extension(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext))
}

fn default_helper_module() -> String {
    DEFAULT_HELPER_MODULE.to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_config_roundtrip() -> crate::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("apigen.yaml");

        let config = Config::new(vec!["a.yaml".into(), "b.json".into()], "out");
        config.save(&file_path).await?;

        let loaded = Config::from_file(&file_path).await?;
        assert_eq!(loaded, config);
        assert_eq!(loaded.helper_module, "apigen_utils");
        assert!(loaded.emit_mod_file);
        assert!(loaded.clean_output);

        Ok(())
    }

    #[tokio::test]
    async fn test_config_defaults_from_minimal_file() -> crate::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("apigen.yaml");
        tokio::fs::write(&file_path, "input_paths: [spec.yaml]\noutput_dir: gen\n").await?;

        let loaded = Config::from_file(&file_path).await?;
        assert_eq!(loaded, Config::new(vec!["spec.yaml".into()], "gen"));
        Ok(())
    }

    #[test]
    fn test_validate() {
        assert!(Config::new(vec![], "out").validate().is_err());
        assert!(Config::new(vec!["a.yaml".into()], " ").validate().is_err());

        let mut config = Config::new(vec!["a.yaml".into()], "out");
        assert!(config.validate().is_ok());
        config.helper_module = "Utils".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_document_paths_skip_other_extensions() {
        let config = Config::new(
            vec!["a.yaml".into(), "notes.txt".into(), "b.json".into(), "c.yml".into()],
            "out",
        );
        assert_eq!(config.document_paths(), vec!["a.yaml", "b.json", "c.yml"]);
    }
}
