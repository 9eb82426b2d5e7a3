//! `evalboard.toml` configuration
//!
//! ```toml
//! output_dir = "outputFiles"
//! comparison_report = "outputFiles/models_comparison_report.xlsx"
//!
//! [[models]]
//! label = "GPT-4o"
//! key = "gpt-4o"
//! file = "outputFiles/gpt-4o_evaluation_results.xlsx"
//! ```
//!
//! Every field is optional. Without `[[models]]` the built-in model list is
//! used; a model without `file` gets `<output_dir>/<key>_evaluation_results.xlsx`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use evalboard::catalog::DEFAULT_OUTPUT_DIR;
use evalboard::{ModelCatalog, ModelEntry};

/// Config file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "evalboard.toml";

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the generated workbooks
    pub output_dir: Option<PathBuf>,
    /// The comparison report workbook
    pub comparison_report: Option<PathBuf>,
    #[serde(default)]
    pub models: Vec<ModelConfig>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    pub label: String,
    pub key: String,
    pub file: Option<PathBuf>,
}

impl Config {
    /// Load the config
    ///
    /// An explicit path must exist. Otherwise [`DEFAULT_CONFIG_FILE`] is read
    /// when present and built-in defaults are used when not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Path::new(DEFAULT_CONFIG_FILE),
            None => {
                tracing::debug!("no config file, using defaults");
                return Ok(Self::default());
            }
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config '{}'", path.display()))?;

        tracing::info!(path = %path.display(), models = config.models.len(), "loaded config");
        Ok(config)
    }

    /// Parse config text
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// The model catalog this config describes
    pub fn catalog(&self) -> ModelCatalog {
        let dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let builtin = ModelCatalog::builtin(&dir);
        let report = self
            .comparison_report
            .clone()
            .unwrap_or_else(|| builtin.report().to_path_buf());

        if self.models.is_empty() {
            return ModelCatalog::new(report, builtin.models().to_vec());
        }

        let models = self
            .models
            .iter()
            .map(|m| match &m.file {
                Some(file) => ModelEntry {
                    label: m.label.clone(),
                    key: m.key.clone(),
                    file: file.clone(),
                },
                None => ModelEntry::in_dir(m.label.as_str(), m.key.as_str(), &dir),
            })
            .collect();
        ModelCatalog::new(report, models)
    }
}
