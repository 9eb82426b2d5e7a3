//! Sheet names used by evaluation reports
//!
//! Lookups through [`find_sheet`] try the exact name first and then a
//! case-insensitive match; the correctness sheet is written with a lowercase
//! initial by the report generator.

use evalboard_core::{Sheet, Workbook};

use crate::error::{ViewError, ViewResult};

/// Long-format sheet: one row per `(model, category)` pair
pub const MODEL_COMPARISON: &str = "Model Comparison";
/// Category x model pivot of faithfulness scores
pub const FAITHFULNESS_COMPARISON: &str = "Faithfulness Comparison";
/// Category x model pivot of answer relevance scores
pub const ANSWER_RELEVANCE_COMPARISON: &str = "Answer Relevance Comparison";
/// Category x model pivot of context relevance scores
pub const CONTEXT_RELEVANCE_COMPARISON: &str = "Context Relevance Comparison";
/// Category x model pivot of correctness scores
pub const CORRECTNESS_COMPARISON: &str = "correctness Comparison";
/// Category x model pivot of overall scores
pub const OVERALL_SCORE_COMPARISON: &str = "Overall Score Comparison";

/// Per-model workbook: one row per evaluated question
pub const DETAILED_EVALUATION: &str = "Detailed Evaluation";
/// Per-model workbook: `Metric` / `Average Score` rows
pub const SUMMARY_STATISTICS: &str = "Summary Statistics";
/// Per-model workbook: per-category averages
pub const CATEGORY_ANALYSIS: &str = "Category Analysis";

/// Look up a sheet, reporting [`ViewError::MissingSheet`] when absent
pub fn find_sheet<'a>(workbook: &'a Workbook, name: &str) -> ViewResult<&'a Sheet> {
    workbook
        .sheet_ignore_case(name)
        .ok_or_else(|| ViewError::MissingSheet {
            sheet: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_sheet() {
        let workbook: Workbook = vec![Sheet::new(CORRECTNESS_COMPARISON)].into_iter().collect();

        assert!(find_sheet(&workbook, "Correctness Comparison").is_ok());
        assert_eq!(
            find_sheet(&workbook, MODEL_COMPARISON),
            Err(ViewError::MissingSheet {
                sheet: MODEL_COMPARISON.into()
            })
        );
    }
}
