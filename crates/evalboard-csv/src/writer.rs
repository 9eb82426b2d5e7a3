//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use evalboard_core::Sheet;

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a sheet to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        sheet: &Sheet,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(sheet, file, options)
    }

    /// Write a sheet to a writer
    pub fn write<W: Write>(sheet: &Sheet, writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let header = options.write_header.then(|| sheet.columns().to_vec());
        let records = sheet
            .rows()
            .iter()
            .map(|row| row.values().map(|v| v.to_string()).collect::<Vec<_>>());
        Self::write_records(header, records, writer, options)
    }

    /// Write an optional header followed by already-rendered records
    ///
    /// Used for exporting assembled tables, whose cells are display strings
    /// rather than raw values.
    pub fn write_records<W, I, R, S>(
        header: Option<Vec<String>>,
        records: I,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()>
    where
        W: Write,
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .flexible(true)
            .from_writer(writer);

        if let Some(header) = header {
            csv_writer.write_record(&header)?;
        }
        for record in records {
            csv_writer.write_record(record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
