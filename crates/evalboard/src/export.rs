//! Table export

use std::io::Write;

use evalboard_compare::ComparisonTable;
use evalboard_csv::{CsvResult, CsvWriteOptions, CsvWriter};

/// Write a table's display values as CSV
///
/// The header row holds the formatted column titles; cells hold what the
/// table shows (two-decimal scores, raw text otherwise).
pub fn write_table_csv<W: Write>(
    table: &ComparisonTable,
    writer: W,
    options: &CsvWriteOptions,
) -> CsvResult<()> {
    let header = options
        .write_header
        .then(|| table.titles().map(str::to_string).collect());
    CsvWriter::write_records(header, table.display_rows(), writer, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evalboard_compare::build_table;
    use evalboard_core::{Sheet, SheetRow};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_table_csv() {
        let mut sheet = Sheet::new("Category Analysis");
        sheet.push_row(
            SheetRow::new()
                .with("Category", "Accuracy")
                .with("answerRelevance", 8.456)
                .with("notes", "needs, review"),
        );
        let table = build_table(&sheet).unwrap();

        let mut out = Vec::new();
        write_table_csv(&table, &mut out, &CsvWriteOptions::default()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Category,Answer Relevance,Notes\nAccuracy,8.46,\"needs, review\"\n"
        );
    }
}
