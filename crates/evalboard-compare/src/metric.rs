//! Canonical metrics and column-name resolution
//!
//! Sheets produced by different pipeline stages spell the same column
//! differently (`Answer Relevance`, `answerRelevance`, `answer_relevance`).
//! Every assembler goes through [`CanonicalMetric::resolve`] so that skew is
//! absorbed in one place.

use std::fmt;
use std::str::FromStr;

use evalboard_core::{CellValue, SheetRow};

use crate::score::score_or_zero;

/// The fixed evaluation dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CanonicalMetric {
    Faithfulness,
    AnswerRelevance,
    ContextRelevance,
    Correctness,
    OverallScore,
}

impl CanonicalMetric {
    /// All metrics, in radar-axis order
    pub const ALL: [CanonicalMetric; 5] = [
        CanonicalMetric::Faithfulness,
        CanonicalMetric::AnswerRelevance,
        CanonicalMetric::ContextRelevance,
        CanonicalMetric::Correctness,
        CanonicalMetric::OverallScore,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalMetric::Faithfulness => "Faithfulness",
            CanonicalMetric::AnswerRelevance => "Answer Relevance",
            CanonicalMetric::ContextRelevance => "Context Relevance",
            CanonicalMetric::Correctness => "Correctness",
            CanonicalMetric::OverallScore => "Overall Score",
        }
    }

    /// Accepted raw column spellings
    pub fn spellings(&self) -> &'static [&'static str] {
        match self {
            CanonicalMetric::Faithfulness => &["Faithfulness", "faithfulness"],
            CanonicalMetric::AnswerRelevance => {
                &["Answer Relevance", "answerRelevance", "answer_relevance"]
            }
            CanonicalMetric::ContextRelevance => {
                &["Context Relevance", "contextRelevance", "context_relevance"]
            }
            CanonicalMetric::Correctness => &["Correctness", "correctness"],
            CanonicalMetric::OverallScore => &["Overall Score", "overallScore", "overall_score"],
        }
    }

    /// Position in [`ALL`](Self::ALL)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Resolve a raw column name
    ///
    /// Exact spellings win; a case-insensitive match is tried only when no
    /// metric matches exactly. Returns `None` for unrelated columns.
    pub fn resolve(raw: &str) -> Option<Self> {
        Self::resolve_exact(raw).or_else(|| Self::resolve_ignore_case(raw))
    }

    /// Resolve by exact spelling only
    pub fn resolve_exact(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.spellings().iter().any(|spelling| *spelling == raw))
    }

    /// Resolve ignoring ASCII case and surrounding whitespace
    pub fn resolve_ignore_case(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|metric| {
            metric
                .spellings()
                .iter()
                .any(|spelling| spelling.eq_ignore_ascii_case(raw))
        })
    }
}

impl fmt::Display for CanonicalMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CanonicalMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| format!("unknown metric: {}", s))
    }
}

/// The metric cells of one row, resolved once
///
/// For each metric the first column that resolves to it exactly is used;
/// failing that, the first case-insensitive match.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricColumns<'a> {
    slots: [Option<&'a CellValue>; 5],
}

impl<'a> MetricColumns<'a> {
    /// Resolve every column of `row`
    pub fn resolve(row: &'a SheetRow) -> Self {
        let mut exact: [Option<&'a CellValue>; 5] = [None; 5];
        let mut loose: [Option<&'a CellValue>; 5] = [None; 5];

        for (column, value) in row.cells() {
            if let Some(metric) = CanonicalMetric::resolve_exact(column) {
                exact[metric.index()].get_or_insert(value);
            } else if let Some(metric) = CanonicalMetric::resolve_ignore_case(column) {
                loose[metric.index()].get_or_insert(value);
            }
        }

        let mut slots = exact;
        for (slot, fallback) in slots.iter_mut().zip(loose) {
            if slot.is_none() {
                *slot = fallback;
            }
        }
        Self { slots }
    }

    /// The cell for a metric, if any column resolved to it
    pub fn get(&self, metric: CanonicalMetric) -> Option<&'a CellValue> {
        self.slots[metric.index()]
    }

    /// The metric's score, `0.0` when absent or not a score
    pub fn score(&self, metric: CanonicalMetric) -> f64 {
        self.get(metric).map(score_or_zero).unwrap_or(0.0)
    }

    /// All five scores in [`CanonicalMetric::ALL`] order
    pub fn scores(&self) -> [f64; 5] {
        CanonicalMetric::ALL.map(|metric| self.score(metric))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_spellings_resolve_to_same_metric() {
        assert_eq!(
            CanonicalMetric::resolve("Answer Relevance"),
            Some(CanonicalMetric::AnswerRelevance)
        );
        assert_eq!(
            CanonicalMetric::resolve("answerRelevance"),
            Some(CanonicalMetric::AnswerRelevance)
        );
        assert_eq!(
            CanonicalMetric::resolve("overallScore"),
            CanonicalMetric::resolve("Overall Score")
        );
    }

    #[test]
    fn test_case_insensitive_fallback() {
        assert_eq!(
            CanonicalMetric::resolve("ANSWER RELEVANCE"),
            Some(CanonicalMetric::AnswerRelevance)
        );
        assert_eq!(
            CanonicalMetric::resolve(" correctness "),
            Some(CanonicalMetric::Correctness)
        );
        assert_eq!(CanonicalMetric::resolve_exact("CORRECTNESS"), None);
    }

    #[test]
    fn test_unrelated_columns_do_not_resolve() {
        assert_eq!(CanonicalMetric::resolve("Category"), None);
        assert_eq!(CanonicalMetric::resolve("Answer"), None);
        assert!("Model".parse::<CanonicalMetric>().is_err());
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, metric) in CanonicalMetric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i);
        }
    }

    #[test]
    fn test_metric_columns_prefers_exact_spelling() {
        let row = SheetRow::new()
            .with("FAITHFULNESS", 1.0)
            .with("faithfulness", 9.0)
            .with("Answer Relevance", "8.5")
            .with("Notes", "n/a");
        let columns = MetricColumns::resolve(&row);

        assert_eq!(columns.score(CanonicalMetric::Faithfulness), 9.0);
        assert_eq!(columns.score(CanonicalMetric::AnswerRelevance), 8.5);
        assert_eq!(columns.get(CanonicalMetric::Correctness), None);
        assert_eq!(columns.scores(), [9.0, 8.5, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_metric_columns_falls_back_to_case_insensitive() {
        let row = SheetRow::new().with("CONTEXT RELEVANCE", 7.25);
        let columns = MetricColumns::resolve(&row);
        assert_eq!(columns.score(CanonicalMetric::ContextRelevance), 7.25);
    }
}
