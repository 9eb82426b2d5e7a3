//! Prelude module - common imports for evalboard users
//!
//! ```rust
//! use evalboard::prelude::*;
//! ```

pub use crate::{
    // Views
    build_chart,
    build_sheet_table,
    build_summary_cards,
    // Cell types
    CellValue,
    ChartKind,
    ChartSpec,
    ComparisonDataset,
    ComparisonTable,
    // I/O types
    CsvReader,
    CsvWriter,
    // Error types
    Error,
    JsonRecordsReader,
    ModelCatalog,
    Result,
    Selection,
    Session,
    Sheet,
    SheetRow,
    ViewError,
    // Main types
    Workbook,
    // Extension traits
    WorkbookExt,
    XlsxReader,
};
