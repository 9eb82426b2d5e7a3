//! # evalboard-xlsx
//!
//! Reads XLSX workbooks into header-keyed row records.
//!
//! Only cell values are decoded. Styles, formulas (beyond their cached
//! value), comments and drawings are ignored: evaluation reports are plain
//! value grids whose first row is the header.

pub mod error;
pub mod reader;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
