//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use evalboard_core::{header_keys, CellValue, Sheet, Workbook};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a sheet named after the file stem
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Sheet> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Sheet1")
            .to_string();
        let file = File::open(path)?;
        Self::read(file, &name, options)
    }

    /// Read every `.csv` file in a directory, one sheet per file
    ///
    /// Files are visited in file-name order so sheet order is stable across
    /// platforms.
    pub fn read_dir<P: AsRef<Path>>(dir: P, options: &CsvReadOptions) -> CsvResult<Workbook> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .and_then(|e| e.to_str())
                .map_or(false, |e| e.eq_ignore_ascii_case("csv"));
            if path.is_file() && is_csv {
                paths.push(path);
            }
        }
        paths.sort();

        let mut workbook = Workbook::new();
        for path in paths {
            let sheet = Self::read_file(&path, options)?;
            tracing::debug!(
                sheet = sheet.name(),
                rows = sheet.row_count(),
                "decoded csv sheet"
            );
            workbook.add_sheet(sheet)?;
        }
        Ok(workbook)
    }

    /// Read CSV from a reader into a sheet
    ///
    /// The first record is the header; each following record becomes a row
    /// keyed by header name. Records with every field blank are skipped.
    pub fn read<R: Read>(reader: R, name: &str, options: &CsvReadOptions) -> CsvResult<Sheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(true)
            .flexible(options.flexible)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(CsvError::MissingHeader(name.to_string()));
        }

        let mut sheet = Sheet::with_columns(name, header_keys(headers.iter()));

        for result in csv_reader.records() {
            let record = result?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            let values = record.iter().map(|field| {
                if options.auto_detect_types {
                    Self::detect_type(field)
                } else {
                    CellValue::string(field)
                }
            });
            sheet.push_values(values);
        }

        Ok(sheet)
    }

    /// Detect the type of a field value
    fn detect_type(field: &str) -> CellValue {
        let trimmed = field.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Boolean(false);
        }

        // "inf" and "NaN" parse as floats but are text in a report
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::string(field),
        }
    }
}
