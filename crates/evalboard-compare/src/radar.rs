//! Multi-metric radar dataset
//!
//! The radar view reads the long-format sheet (one row per `(model,
//! category)` pair, one column per metric) rather than the wide per-model
//! pivots, and keeps only each model's `OVERALL` row.

use evalboard_chart::{ComparisonDataset, DataSeries};
use evalboard_core::{CellValue, Sheet, SheetRow};

use crate::category::header_row;
use crate::error::ViewResult;
use crate::metric::{CanonicalMetric, MetricColumns};
use crate::sentinel::is_aggregate_value;

/// Field holding the model identifier
pub const MODEL_FIELD: &str = "Model";

/// Field holding the category
pub const CATEGORY_FIELD: &str = "Category";

fn field<'a>(row: &'a SheetRow, name: &str) -> Option<&'a CellValue> {
    row.get_ignore_case(name).filter(|value| !value.is_blank())
}

fn model_id(row: &SheetRow) -> Option<String> {
    field(row, MODEL_FIELD).map(|value| value.to_text().into_owned())
}

fn push_distinct(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}

/// Distinct model and category identifiers, in order of first appearance
pub fn distinct_models_and_categories(sheet: &Sheet) -> (Vec<String>, Vec<String>) {
    let mut models = Vec::new();
    let mut categories = Vec::new();
    for row in sheet.rows() {
        if let Some(model) = model_id(row) {
            push_distinct(&mut models, model);
        }
        if let Some(category) = field(row, CATEGORY_FIELD) {
            push_distinct(&mut categories, category.to_text().into_owned());
        }
    }
    (models, categories)
}

/// Build one five-metric series per model from its `OVERALL` row
///
/// Labels are the [`CanonicalMetric`] labels in [`CanonicalMetric::ALL`]
/// order. A model with no row whose category carries the `OVERALL` marker is
/// left out entirely; metrics that are missing or not scores count as `0`.
pub fn build_radar_dataset(sheet: &Sheet) -> ViewResult<ComparisonDataset> {
    header_row(sheet)?;

    let (models, _) = distinct_models_and_categories(sheet);
    let mut dataset = ComparisonDataset::new(CanonicalMetric::ALL.map(|metric| metric.label()));

    for model in models {
        let overall = sheet.rows().iter().find(|row| {
            model_id(row).as_deref() == Some(model.as_str())
                && field(row, CATEGORY_FIELD).is_some_and(is_aggregate_value)
        });

        let Some(row) = overall else {
            tracing::debug!(sheet = sheet.name(), model = model.as_str(), "no overall row; skipping model");
            continue;
        };

        let scores = MetricColumns::resolve(row).scores();
        dataset.push_series(DataSeries::new(model, scores.to_vec()));
    }

    tracing::debug!(sheet = sheet.name(), series = dataset.series.len(), "built radar dataset");
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewError;
    use pretty_assertions::assert_eq;

    fn row(model: &str, category: &str, scores: [f64; 5]) -> SheetRow {
        SheetRow::new()
            .with("Model", model)
            .with("Category", category)
            .with("Faithfulness", scores[0])
            .with("Answer Relevance", scores[1])
            .with("Context Relevance", scores[2])
            .with("correctness", scores[3])
            .with("Overall Score", scores[4])
    }

    #[test]
    fn test_radar_uses_overall_rows() {
        let mut sheet = Sheet::new("Model Comparison");
        sheet.push_row(row("GPT", "Accuracy", [1.0, 1.0, 1.0, 1.0, 1.0]));
        sheet.push_row(row("GPT", "OVERALL", [9.0, 8.5, 8.0, 7.5, 8.25]));
        sheet.push_row(row("Claude", "OVERALL", [7.0, 7.0, 7.0, 7.0, 7.0]));

        let dataset = build_radar_dataset(&sheet).unwrap();

        assert_eq!(
            dataset.labels,
            vec![
                "Faithfulness",
                "Answer Relevance",
                "Context Relevance",
                "Correctness",
                "Overall Score"
            ]
        );
        assert_eq!(dataset.series.len(), 2);
        assert_eq!(dataset.series[0].name, "GPT");
        assert_eq!(dataset.series[0].values, vec![9.0, 8.5, 8.0, 7.5, 8.25]);
        assert_eq!(dataset.series[1].name, "Claude");
    }

    #[test]
    fn test_model_without_overall_row_is_omitted() {
        let mut sheet = Sheet::new("Model Comparison");
        sheet.push_row(row("GPT", "OVERALL", [9.0; 5]));
        sheet.push_row(row("Grok", "Accuracy", [5.0; 5]));

        let dataset = build_radar_dataset(&sheet).unwrap();
        assert_eq!(dataset.series.len(), 1);
        assert!(dataset.series_named("Grok").is_none());
    }

    #[test]
    fn test_camel_case_fields() {
        let mut sheet = Sheet::new("Model Comparison");
        sheet.push_row(
            SheetRow::new()
                .with("model", "GPT")
                .with("category", "Overall")
                .with("faithfulness", "9")
                .with("answerRelevance", "8")
                .with("contextRelevance", "n/a")
                .with("overallScore", 12.0),
        );

        let dataset = build_radar_dataset(&sheet).unwrap();
        assert_eq!(dataset.series[0].values, vec![9.0, 8.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_distinct_models_and_categories() {
        let mut sheet = Sheet::new("Model Comparison");
        sheet.push_row(row("GPT", "Accuracy", [0.0; 5]));
        sheet.push_row(row("Claude", "Accuracy", [0.0; 5]));
        sheet.push_row(row("GPT", "OVERALL", [0.0; 5]));

        let (models, categories) = distinct_models_and_categories(&sheet);
        assert_eq!(models, vec!["GPT", "Claude"]);
        assert_eq!(categories, vec!["Accuracy", "OVERALL"]);
    }

    #[test]
    fn test_empty_sheet() {
        assert!(matches!(
            build_radar_dataset(&Sheet::new("Model Comparison")),
            Err(ViewError::EmptySheet { .. })
        ));
    }
}
