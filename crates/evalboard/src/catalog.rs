//! The models a dashboard knows about, and where their results live

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use evalboard_compare::{Selection, ViewError, ViewResult};

/// Default location of the comparison report, relative to the working directory
pub const DEFAULT_REPORT: &str = "outputFiles/models_comparison_report.xlsx";

/// Default directory holding per-model results workbooks
pub const DEFAULT_OUTPUT_DIR: &str = "outputFiles";

const BUILTIN_MODELS: [(&str, &str); 5] = [
    ("GPT-4o", "gpt-4o"),
    ("DeepSeek Chat", "DeepSeek Chat"),
    ("Claude3.7", "Claude3.7"),
    ("Gemini2.5Pro", "Gemini2.5Pro"),
    ("Grok3", "Grok3"),
];

/// One evaluated model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Tab label
    pub label: String,
    /// Lookup key
    pub key: String,
    /// Results workbook
    pub file: PathBuf,
}

impl ModelEntry {
    /// Entry whose results file follows the `<key>_evaluation_results.xlsx` convention
    pub fn in_dir<L, K>(label: L, key: K, dir: &Path) -> Self
    where
        L: Into<String>,
        K: Into<String>,
    {
        let key = key.into();
        Self {
            file: dir.join(results_file_name(&key)),
            label: label.into(),
            key,
        }
    }
}

/// Results file name for a model key: lowercased key plus `_evaluation_results.xlsx`
pub fn results_file_name(key: &str) -> String {
    format!("{}_evaluation_results.xlsx", key.to_lowercase())
}

/// Ordered model catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    report: PathBuf,
    models: Vec<ModelEntry>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin(Path::new(DEFAULT_OUTPUT_DIR))
    }
}

impl ModelCatalog {
    /// Create a catalog
    pub fn new<P: Into<PathBuf>>(report: P, models: Vec<ModelEntry>) -> Self {
        Self {
            report: report.into(),
            models,
        }
    }

    /// The five models the evaluation pipeline ships with, results under `dir`
    pub fn builtin(dir: &Path) -> Self {
        let models = BUILTIN_MODELS
            .iter()
            .map(|(label, key)| ModelEntry::in_dir(*label, *key, dir))
            .collect();
        Self::new(dir.join("models_comparison_report.xlsx"), models)
    }

    /// The comparison report workbook
    pub fn report(&self) -> &Path {
        &self.report
    }

    /// Models in tab order
    pub fn models(&self) -> &[ModelEntry] {
        &self.models
    }

    /// Look up a model by key
    pub fn get(&self, key: &str) -> ViewResult<&ModelEntry> {
        self.models
            .iter()
            .find(|m| m.key == key)
            .ok_or_else(|| ViewError::UnknownModel {
                model: key.to_string(),
            })
    }

    /// The selected model, or the first one when nothing is selected
    pub fn selected(&self, selection: &Selection) -> ViewResult<&ModelEntry> {
        match &selection.model {
            Some(key) => self.get(key),
            None => self.models.first().ok_or_else(|| ViewError::UnknownModel {
                model: String::new(),
            }),
        }
    }
}
