//! # evalboard
//!
//! Compare language-model evaluation reports as tables and charts.
//!
//! Reports are spreadsheets written by an evaluation pipeline: one
//! comparison workbook with a sheet per metric, plus one results workbook
//! per model. evalboard decodes them into row records and assembles
//! presentation-neutral chart and table data from them.
//!
//! ## Features
//!
//! - Read XLSX, CSV (single file or a directory of sheets) and JSON records
//! - Category line charts, overall bar charts and multi-metric radar charts
//! - Score-classified tables with aggregate-row highlighting
//! - Summary cards for per-model results
//! - Last-write-wins session loading
//!
//! ## Example
//!
//! ```rust
//! use evalboard::prelude::*;
//!
//! let mut sheet = Sheet::new("Overall Score Comparison");
//! sheet.push_row(SheetRow::new().with("Category", "Accuracy").with("GPT", 9.1));
//! sheet.push_row(SheetRow::new().with("Category", "OVERALL").with("GPT", 8.7));
//! let workbook: Workbook = vec![sheet].into_iter().collect();
//!
//! let chart = build_chart(&workbook, &Selection::new()).unwrap();
//! assert_eq!(chart.dataset.labels, ["GPT"]);
//!
//! // let workbook = Workbook::open("models_comparison_report.xlsx")?;
//! ```

pub mod catalog;
pub mod export;
pub mod json;
pub mod prelude;
pub mod session;

pub use catalog::{ModelCatalog, ModelEntry};
pub use export::write_table_csv;
pub use json::{JsonError, JsonRecordsReader};
pub use session::{LoadTicket, Session};

// Re-export core types
pub use evalboard_core::{header_keys, CellValue, Error, Result, Sheet, SheetRow, Workbook};

// Re-export chart types
pub use evalboard_chart::{
    palette, Axis, AxisPosition, ChartSpec, ChartType, ComparisonDataset, DataSeries, Legend,
    LegendPosition, SeriesStyle,
};

// Re-export comparison types
pub use evalboard_compare::{
    build_category_series, build_category_series_for, build_chart, build_overall_bars,
    build_radar_dataset, build_sheet_table, build_summary_cards, build_table, coerce_score,
    format_column_name, format_hundredths, format_score, is_aggregate_row, sheets,
    CanonicalMetric, ChartKind, ClassifiedCell, ComparisonTable, LabelKind, ScoreClass, Selection,
    SummaryCard, ViewError, ViewResult,
};

// Re-export I/O types
pub use evalboard_csv::{CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
pub use evalboard_xlsx::{XlsxError, XlsxReader};

use std::path::Path;

/// Extension trait for Workbook to add file I/O
pub trait WorkbookExt {
    /// Open a workbook from a file or a directory of CSV files
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook>;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        let path = path.as_ref();

        if path.is_dir() {
            return CsvReader::read_dir(path, &CsvReadOptions::default())
                .map_err(|e| Error::other(e.to_string()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let workbook = match extension.as_deref() {
            Some("xlsx") | Some("xlsm") => {
                XlsxReader::read_file(path).map_err(|e| Error::other(e.to_string()))?
            }
            Some("csv") => {
                let sheet = CsvReader::read_file(path, &CsvReadOptions::default())
                    .map_err(|e| Error::other(e.to_string()))?;

                let mut workbook = Workbook::new();
                workbook.add_sheet(sheet)?;
                workbook
            }
            Some("json") => {
                JsonRecordsReader::read_file(path).map_err(|e| Error::other(e.to_string()))?
            }
            _ => {
                return Err(Error::other(format!(
                    "Unsupported file format: {}",
                    path.display()
                )))
            }
        };

        tracing::info!(
            path = %path.display(),
            sheets = workbook.sheet_count(),
            "opened workbook"
        );
        Ok(workbook)
    }
}
