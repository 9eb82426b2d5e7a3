//! # evalboard-compare
//!
//! Turns loosely structured, hand-authored evaluation sheets into
//! chart-ready and table-ready datasets.
//!
//! The building blocks are small and shared by every view:
//!
//! - [`coerce_score`] decides whether a cell holds a 0-10 score
//! - [`CanonicalMetric::resolve`] maps column spellings onto the fixed metric vocabulary
//! - [`is_aggregate_row`] spots the synthetic `OVERALL` row
//!
//! On top of those sit the assemblers: [`build_category_series`] and
//! [`build_overall_bars`] for wide per-model sheets, [`build_radar_dataset`]
//! for `(model, category)` sheets, and [`build_table`] for the raw table view.
//! [`build_chart`] dispatches a [`Selection`] to the right one.
//!
//! ```
//! use evalboard_compare::{build_category_series, build_overall_bars};
//! use evalboard_core::{Sheet, SheetRow};
//!
//! let mut sheet = Sheet::new("Model Comparison");
//! sheet.push_row(SheetRow::new().with("Category", "Accuracy").with("GPT", "9.1").with("Claude", "7.0"));
//! sheet.push_row(SheetRow::new().with("Category", "OVERALL").with("GPT", "8.7").with("Claude", "6.9"));
//!
//! let series = build_category_series(&sheet).unwrap();
//! assert_eq!(series.labels, ["Accuracy"]);
//! assert_eq!(series.series[0].values, [9.1]);
//!
//! let bars = build_overall_bars(&sheet).unwrap();
//! assert_eq!(bars.labels, ["GPT", "Claude"]);
//! assert_eq!(bars.series[0].values, [8.7, 6.9]);
//! ```

pub mod category;
pub mod error;
pub mod metric;
pub mod radar;
pub mod score;
pub mod sentinel;
pub mod sheets;
pub mod summary;
pub mod table;
pub mod view;

pub use category::{build_category_series, build_category_series_for, build_overall_bars};
pub use error::{ViewError, ViewResult};
pub use metric::{CanonicalMetric, MetricColumns};
pub use radar::{build_radar_dataset, distinct_models_and_categories};
pub use score::{coerce_score, format_hundredths, format_score, score_or_zero};
pub use sentinel::{find_aggregate_row, is_aggregate_row, is_aggregate_value};
pub use summary::{build_summary_cards, SummaryCard};
pub use table::{
    build_table, format_column_name, ClassifiedCell, ComparisonTable, LabelKind, ScoreClass,
    TableColumn, TableRow,
};
pub use view::{build_chart, build_sheet_table, ChartKind, Selection};
