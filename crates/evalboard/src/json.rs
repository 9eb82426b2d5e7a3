//! JSON records source
//!
//! The same shape a spreadsheet-to-records decoder produces, written out as
//! JSON: an object mapping sheet names to arrays of row objects.
//!
//! ```json
//! { "Model Comparison": [ { "Category": "Accuracy", "GPT": 9.1 } ] }
//! ```
//!
//! Column order follows key order in the file.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

use evalboard_core::{CellValue, Sheet, SheetRow, Workbook};

/// Errors that can occur while reading JSON records
#[derive(Debug, Error)]
pub enum JsonError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Well-formed JSON of the wrong shape
    #[error("Invalid records: {0}")]
    Shape(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] evalboard_core::Error),
}

/// JSON records reader
pub struct JsonRecordsReader;

impl JsonRecordsReader {
    /// Read a workbook from a JSON file
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Workbook, JsonError> {
        let text = fs::read_to_string(path)?;
        Self::read_str(&text)
    }

    /// Read a workbook from JSON text
    pub fn read_str(text: &str) -> Result<Workbook, JsonError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Build a workbook from a parsed JSON value
    pub fn from_value(value: Value) -> Result<Workbook, JsonError> {
        let Value::Object(sheets) = value else {
            return Err(JsonError::Shape(
                "top level must be an object of sheet name to rows".into(),
            ));
        };

        let mut workbook = Workbook::new();
        for (name, rows) in sheets {
            let Value::Array(rows) = rows else {
                return Err(JsonError::Shape(format!("sheet '{}' must be an array", name)));
            };

            let mut sheet = Sheet::new(name.as_str());
            for (i, row) in rows.into_iter().enumerate() {
                match row {
                    Value::Object(cells) => sheet.push_row(Self::row(cells)),
                    other => {
                        return Err(JsonError::Shape(format!(
                            "row {} of sheet '{}' must be an object, found {}",
                            i,
                            name,
                            kind(&other)
                        )))
                    }
                }
            }
            workbook.add_sheet(sheet)?;
        }
        Ok(workbook)
    }

    fn row(cells: Map<String, Value>) -> SheetRow {
        cells
            .into_iter()
            .map(|(column, value)| (column, cell(value)))
            .collect()
    }
}

fn cell(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Bool(b) => CellValue::Boolean(b),
        Value::Number(n) => n
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::String(n.to_string())),
        Value::String(s) => CellValue::String(s),
        nested => CellValue::String(nested.to_string()),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_records_preserving_order() {
        let workbook = JsonRecordsReader::read_str(
            r#"{
                "Overall Score Comparison": [
                    {"Category": "Accuracy", "Grok3": 7.5, "Claude3.7": "8.1"},
                    {"Category": "OVERALL", "Grok3": null, "Claude3.7": true}
                ],
                "Empty": []
            }"#,
        )
        .unwrap();

        assert_eq!(
            workbook.sheet_names().collect::<Vec<_>>(),
            ["Overall Score Comparison", "Empty"]
        );
        let sheet = workbook.sheet("Overall Score Comparison").unwrap();
        assert_eq!(sheet.columns(), &["Category", "Grok3", "Claude3.7"]);
        assert_eq!(sheet.rows()[0].value("Grok3"), &CellValue::Number(7.5));
        assert_eq!(sheet.rows()[1].value("Grok3"), &CellValue::Empty);
        assert_eq!(sheet.rows()[1].value("Claude3.7"), &CellValue::Boolean(true));
        assert!(workbook.sheet("Empty").unwrap().is_empty());
    }

    #[test]
    fn test_ragged_rows_are_aligned() {
        let workbook =
            JsonRecordsReader::read_str(r#"{"S": [{"A": 1}, {"B": 2}]}"#).unwrap();
        let sheet = workbook.sheet("S").unwrap();
        assert_eq!(sheet.columns(), &["A", "B"]);
        assert_eq!(sheet.rows()[0].value("B"), &CellValue::Empty);
    }

    #[test]
    fn test_wrong_shapes() {
        assert!(matches!(
            JsonRecordsReader::read_str("[]"),
            Err(JsonError::Shape(_))
        ));
        assert!(matches!(
            JsonRecordsReader::read_str(r#"{"S": {"A": 1}}"#),
            Err(JsonError::Shape(_))
        ));
        assert!(matches!(
            JsonRecordsReader::read_str(r#"{"S": [1]}"#),
            Err(JsonError::Shape(msg)) if msg.contains("a number")
        ));
        assert!(matches!(
            JsonRecordsReader::read_str("{"),
            Err(JsonError::Parse(_))
        ));
    }
}
