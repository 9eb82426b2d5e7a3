//! Category series and overall bars for wide sheets
//!
//! Wide sheets have one label column (the category) and one column per model
//! or metric. All but one row are categories; the remaining row is the
//! aggregate.

use evalboard_chart::{ComparisonDataset, DataSeries};
use evalboard_core::{Sheet, SheetRow};

use crate::error::{ViewError, ViewResult};
use crate::score::score_or_zero;
use crate::sentinel::{find_aggregate_row, partition_rows};

/// Name of the label column in wide sheets
pub const CATEGORY_COLUMN: &str = "Category";

/// Name of the single series in the overall bar view
pub const OVERALL_SERIES: &str = "Overall Score";

/// The first row of a sheet, which defines its columns
///
/// Fails with [`ViewError::EmptySheet`] when the sheet has no rows or its
/// first row has no columns.
pub(crate) fn header_row(sheet: &Sheet) -> ViewResult<&SheetRow> {
    sheet
        .first_row()
        .filter(|row| !row.is_empty())
        .ok_or_else(|| ViewError::EmptySheet {
            sheet: sheet.name().to_string(),
        })
}

/// The label column of a wide sheet: `Category` when present, else the first
/// column
pub fn category_column(header: &SheetRow) -> Option<&str> {
    if header.contains_column(CATEGORY_COLUMN) {
        Some(CATEGORY_COLUMN)
    } else {
        header.first().map(|(column, _)| column)
    }
}

/// Every column of the header except the label column, in order
pub fn value_columns(header: &SheetRow) -> Vec<String> {
    let label = category_column(header);
    header
        .columns()
        .filter(|column| Some(*column) != label)
        .map(str::to_string)
        .collect()
}

/// Build per-category series for every non-label column
///
/// See [`build_category_series_for`].
pub fn build_category_series(sheet: &Sheet) -> ViewResult<ComparisonDataset> {
    let header = header_row(sheet)?;
    let columns = value_columns(header);
    build_category_series_for(sheet, &columns)
}

/// Build per-category series for the given columns
///
/// Labels are the category names of the non-aggregate rows, in row order.
/// Each column becomes one series; cells that are not scores count as `0`.
pub fn build_category_series_for(
    sheet: &Sheet,
    columns: &[String],
) -> ViewResult<ComparisonDataset> {
    let header = header_row(sheet)?;
    let label_column = category_column(header).unwrap_or(CATEGORY_COLUMN);

    let (category_rows, _) = partition_rows(sheet.rows());

    let mut dataset = ComparisonDataset::new(
        category_rows
            .iter()
            .map(|row| row.value(label_column).to_text().into_owned()),
    );
    for column in columns {
        let values = category_rows
            .iter()
            .map(|row| score_or_zero(row.value(column)))
            .collect();
        dataset.push_series(DataSeries::new(column.as_str(), values));
    }

    tracing::debug!(
        sheet = sheet.name(),
        labels = dataset.labels.len(),
        series = dataset.series.len(),
        "built category series"
    );
    Ok(dataset)
}

/// Build the overall bar view from a sheet's aggregate row
///
/// Labels are the aggregate row's columns except the label column; the single
/// series holds their scores. Fails with [`ViewError::NoAggregateRow`] when no
/// row carries the `OVERALL` marker.
pub fn build_overall_bars(sheet: &Sheet) -> ViewResult<ComparisonDataset> {
    let header = header_row(sheet)?;
    let label_column = category_column(header);

    let aggregate = find_aggregate_row(sheet.rows()).ok_or_else(|| ViewError::NoAggregateRow {
        sheet: sheet.name().to_string(),
    })?;

    let (labels, values): (Vec<String>, Vec<f64>) = aggregate
        .cells()
        .filter(|(column, _)| Some(*column) != label_column)
        .map(|(column, value)| (column.to_string(), score_or_zero(value)))
        .unzip();

    let dataset = ComparisonDataset::new(labels).with_series(DataSeries::new(OVERALL_SERIES, values));

    tracing::debug!(sheet = sheet.name(), bars = dataset.labels.len(), "built overall bars");
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn model_comparison() -> Sheet {
        let mut sheet = Sheet::new("Model Comparison");
        sheet.push_row(
            SheetRow::new()
                .with("Category", "Accuracy")
                .with("GPT", "9.1")
                .with("Claude", "7.0"),
        );
        sheet.push_row(
            SheetRow::new()
                .with("Category", "OVERALL")
                .with("GPT", "8.7")
                .with("Claude", "6.9"),
        );
        sheet
    }

    #[test]
    fn test_category_series_excludes_aggregate_row() {
        let dataset = build_category_series(&model_comparison()).unwrap();

        assert_eq!(dataset.labels, vec!["Accuracy"]);
        assert_eq!(dataset.series.len(), 2);
        assert_eq!(dataset.series[0].name, "GPT");
        assert_eq!(dataset.series[0].values, vec![9.1]);
        assert_eq!(dataset.series[1].name, "Claude");
        assert_eq!(dataset.series[1].values, vec![7.0]);
    }

    #[test]
    fn test_overall_bars_use_aggregate_row() {
        let dataset = build_overall_bars(&model_comparison()).unwrap();

        assert_eq!(dataset.labels, vec!["GPT", "Claude"]);
        assert_eq!(dataset.series.len(), 1);
        assert_eq!(dataset.series[0].name, "Overall Score");
        assert_eq!(dataset.series[0].values, vec![8.7, 6.9]);
    }

    #[test]
    fn test_first_column_is_label_without_category_column() {
        let mut sheet = Sheet::new("Pivot");
        sheet.push_row(SheetRow::new().with("Topic", "Math").with("GPT", 8.0));
        sheet.push_row(SheetRow::new().with("Topic", "Law").with("GPT", "n/a"));

        let dataset = build_category_series(&sheet).unwrap();
        assert_eq!(dataset.labels, vec!["Math", "Law"]);
        assert_eq!(dataset.series[0].values, vec![8.0, 0.0]);
    }

    #[test]
    fn test_explicit_columns() {
        let sheet = model_comparison();
        let dataset = build_category_series_for(&sheet, &["Claude".to_string(), "Gemini".to_string()])
            .unwrap();

        assert_eq!(dataset.series[0].values, vec![7.0]);
        // Missing column degrades to zeros
        assert_eq!(dataset.series[1].values, vec![0.0]);
        assert!(dataset.is_well_formed());
    }

    #[test]
    fn test_empty_sheet() {
        let sheet = Sheet::new("Faithfulness Comparison");
        assert_eq!(
            build_category_series(&sheet),
            Err(ViewError::EmptySheet {
                sheet: "Faithfulness Comparison".into()
            })
        );
        assert!(matches!(
            build_overall_bars(&sheet),
            Err(ViewError::EmptySheet { .. })
        ));
    }

    #[test]
    fn test_first_row_without_columns_is_empty() {
        let mut sheet = Sheet::new("Blank");
        sheet.push_values(Vec::<f64>::new());
        assert!(matches!(
            build_category_series(&sheet),
            Err(ViewError::EmptySheet { .. })
        ));
    }

    #[test]
    fn test_missing_aggregate_row() {
        let mut sheet = Sheet::new("Overall Score Comparison");
        sheet.push_row(SheetRow::new().with("Category", "Accuracy").with("GPT", 9.0));
        assert_eq!(
            build_overall_bars(&sheet),
            Err(ViewError::NoAggregateRow {
                sheet: "Overall Score Comparison".into()
            })
        );
    }
}
