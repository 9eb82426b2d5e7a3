//! # evalboard-csv
//!
//! CSV reader and writer for evalboard.
//!
//! A CSV file decodes to one [`Sheet`](evalboard_core::Sheet) whose header is
//! the first record; a directory of CSV files decodes to a
//! [`Workbook`](evalboard_core::Workbook) with one sheet per file.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
