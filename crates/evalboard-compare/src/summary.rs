//! Summary cards for a per-model results workbook

use evalboard_core::{CellValue, Workbook};

use crate::error::ViewResult;
use crate::metric::CanonicalMetric;
use crate::score::format_hundredths;
use crate::sheets::{find_sheet, SUMMARY_STATISTICS};

/// Column naming the metric of a summary row
pub const METRIC_COLUMN: &str = "Metric";

/// Column holding the metric's average
pub const AVERAGE_COLUMN: &str = "Average Score";

/// One headline number
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SummaryCard {
    /// Metric name as written in the sheet
    pub metric: String,
    /// The canonical metric, when the name resolves to one
    pub canonical: Option<CanonicalMetric>,
    /// Average with two decimals, or the raw text when not numeric
    pub average: String,
    /// Numeric average
    pub value: Option<f64>,
}

fn numeric(value: &CellValue) -> Option<f64> {
    let n = match value {
        CellValue::Number(n) => *n,
        CellValue::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    Some(n).filter(|n| n.is_finite())
}

/// Build one card per row of the `Summary Statistics` sheet
///
/// Averages are not range-checked: a summary may hold counts or other
/// non-score numbers. An empty sheet yields no cards.
pub fn build_summary_cards(workbook: &Workbook) -> ViewResult<Vec<SummaryCard>> {
    let sheet = find_sheet(workbook, SUMMARY_STATISTICS)?;

    let cards: Vec<SummaryCard> = sheet
        .rows()
        .iter()
        .map(|row| {
            let metric = row.value(METRIC_COLUMN).to_text().into_owned();
            let average = row.value(AVERAGE_COLUMN);
            let value = numeric(average);
            SummaryCard {
                canonical: CanonicalMetric::resolve(&metric),
                average: match value {
                    Some(n) => format_hundredths(n),
                    None => average.to_text().into_owned(),
                },
                metric,
                value,
            }
        })
        .collect();

    tracing::debug!(cards = cards.len(), "built summary cards");
    Ok(cards)
}
