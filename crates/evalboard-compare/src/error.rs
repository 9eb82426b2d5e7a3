//! View error types

use thiserror::Error;

/// Result type for view assembly
pub type ViewResult<T> = std::result::Result<T, ViewError>;

/// Conditions that stop a view from being assembled
///
/// None of these are fatal to the application: the host shows
/// [`user_message`](ViewError::user_message) in place of the chart or table.
/// Unresolvable columns and non-score cells are not errors at all; they
/// degrade to `0` in charts and to raw text in tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The requested sheet is not in the workbook
    #[error("sheet not found: {sheet}")]
    MissingSheet { sheet: String },

    /// The sheet has no rows, or its first row has no columns
    #[error("no data in sheet: {sheet}")]
    EmptySheet { sheet: String },

    /// The sheet has no `OVERALL` row to chart
    #[error("no overall row in sheet: {sheet}")]
    NoAggregateRow { sheet: String },

    /// The model key is not in the catalog
    #[error("unknown model: {model}")]
    UnknownModel { model: String },
}

impl ViewError {
    /// Message for the dashboard, in place of the view that failed
    pub fn user_message(&self) -> String {
        match self {
            ViewError::MissingSheet { sheet } => format!("Sheet not found: {}", sheet),
            ViewError::EmptySheet { sheet } => format!("No data found in sheet: {}", sheet),
            ViewError::NoAggregateRow { .. } => "Overall scores not found".to_string(),
            ViewError::UnknownModel { .. } => "No data found.".to_string(),
        }
    }

    /// Sheet the error refers to, if any
    pub fn sheet(&self) -> Option<&str> {
        match self {
            ViewError::MissingSheet { sheet }
            | ViewError::EmptySheet { sheet }
            | ViewError::NoAggregateRow { sheet } => Some(sheet),
            ViewError::UnknownModel { .. } => None,
        }
    }
}
