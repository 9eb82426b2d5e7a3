//! # evalboard-core
//!
//! Data model for spreadsheets that have already been decoded into row records.
//!
//! This crate provides the fundamental types used throughout evalboard:
//! - [`CellValue`] - A raw cell value (empty, number, string, boolean)
//! - [`SheetRow`] - An ordered mapping from column name to cell value
//! - [`Sheet`] - A named, ordered sequence of rows sharing one header
//! - [`Workbook`] - The named sheets decoded from one spreadsheet source
//!
//! ## Example
//!
//! ```rust
//! use evalboard_core::{CellValue, Sheet, SheetRow, Workbook};
//!
//! let mut sheet = Sheet::new("Model Comparison");
//! sheet.push_row(
//!     SheetRow::new()
//!         .with("Category", "Accuracy")
//!         .with("GPT", 9.1),
//! );
//!
//! let mut workbook = Workbook::new();
//! workbook.add_sheet(sheet).unwrap();
//!
//! let row = &workbook.sheet("Model Comparison").unwrap().rows()[0];
//! assert_eq!(row.value("GPT"), &CellValue::Number(9.1));
//! ```

pub mod cell;
pub mod error;
pub mod row;
pub mod sheet;
pub mod workbook;

pub use cell::CellValue;
pub use error::{Error, Result};
pub use row::SheetRow;
pub use sheet::{header_keys, Sheet};
pub use workbook::Workbook;
