//! Sheet type

use crate::cell::CellValue;
use crate::row::SheetRow;

/// A named sheet of decoded row records
///
/// Every row carries every header column: cells missing from the source are
/// filled with [`CellValue::Empty`], matching how spreadsheet-to-records
/// decoders default absent cells. Row order is the sheet's declared order and
/// is significant (chart categories follow it).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    /// Sheet name
    name: String,
    /// Header columns in declared order
    columns: Vec<String>,
    /// Rows in declared order
    rows: Vec<SheetRow>,
}

impl Sheet {
    /// Create a new, empty sheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Create a sheet with a fixed header and no rows yet
    pub fn with_columns<S, I, C>(name: S, columns: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let mut sheet = Self::new(name);
        for column in columns {
            sheet.add_column(column.into());
        }
        sheet
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Header columns in declared order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows in declared order
    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    /// The first row, whose keys define the header for table views
    pub fn first_row(&self) -> Option<&SheetRow> {
        self.rows.first()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the sheet has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row, aligning it to the sheet header
    ///
    /// Columns the row lacks are filled with empty values. Columns the sheet
    /// has not seen yet are appended to the header and back-filled in every
    /// earlier row.
    pub fn push_row(&mut self, row: SheetRow) {
        for column in row.columns() {
            if !self.columns.iter().any(|c| c == column) {
                self.add_column(column.to_string());
            }
        }

        let aligned = self
            .columns
            .iter()
            .map(|column| (column.clone(), row.value(column).clone()))
            .collect();
        self.rows.push(aligned);
    }

    /// Append a row given positionally against the header
    ///
    /// Extra values beyond the header are dropped; short rows are padded.
    pub fn push_values<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let mut values = values.into_iter();
        let row = self
            .columns
            .iter()
            .map(|column| {
                let value = values.next().map(Into::into).unwrap_or_default();
                (column.clone(), value)
            })
            .collect();
        self.rows.push(row);
    }

    fn add_column(&mut self, column: String) {
        if self.columns.contains(&column) {
            return;
        }
        for row in &mut self.rows {
            row.insert(column.clone(), CellValue::Empty);
        }
        self.columns.push(column);
    }
}

/// Turn raw header cells into unique record keys
///
/// Blank headers become `__EMPTY`, `__EMPTY_1`, ...; repeated headers get a
/// `_1`, `_2`, ... suffix, so no column is lost when rows are keyed by name.
pub fn header_keys<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut keys: Vec<String> = Vec::new();
    for cell in raw {
        let base = match cell.as_ref().trim() {
            "" => "__EMPTY".to_string(),
            text => text.to_string(),
        };
        let mut key = base.clone();
        let mut n = 0;
        while keys.contains(&key) {
            n += 1;
            key = format!("{}_{}", base, n);
        }
        keys.push(key);
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_keys_dedupes_and_names_blanks() {
        assert_eq!(
            header_keys(["Category", "", "GPT", "GPT", ""]),
            vec!["Category", "__EMPTY", "GPT", "GPT_1", "__EMPTY_1"]
        );
    }

    #[test]
    fn test_push_row_fills_missing_cells() {
        let mut sheet = Sheet::with_columns("Data", ["Category", "GPT", "Claude"]);
        sheet.push_row(SheetRow::new().with("Category", "Accuracy").with("GPT", 9.1));

        let row = &sheet.rows()[0];
        assert_eq!(
            row.columns().collect::<Vec<_>>(),
            vec!["Category", "GPT", "Claude"]
        );
        assert_eq!(row.value("Claude"), &CellValue::Empty);
    }

    #[test]
    fn test_push_row_backfills_new_columns() {
        let mut sheet = Sheet::new("Data");
        sheet.push_row(SheetRow::new().with("Category", "Accuracy"));
        sheet.push_row(SheetRow::new().with("Category", "Recall").with("GPT", 8.0));

        assert_eq!(sheet.columns(), &["Category".to_string(), "GPT".to_string()]);
        assert_eq!(sheet.rows()[0].get("GPT"), Some(&CellValue::Empty));
        assert_eq!(sheet.rows()[1].value("GPT"), &CellValue::Number(8.0));
    }

    #[test]
    fn test_push_row_uses_header_order() {
        let mut sheet = Sheet::with_columns("Data", ["Category", "GPT"]);
        sheet.push_row(SheetRow::new().with("GPT", 1.0).with("Category", "x"));
        assert_eq!(
            sheet.rows()[0].columns().collect::<Vec<_>>(),
            vec!["Category", "GPT"]
        );
    }

    #[test]
    fn test_push_values_pads_and_truncates() {
        let mut sheet = Sheet::with_columns("Data", ["A", "B"]);
        sheet.push_values([CellValue::from(1.0)]);
        sheet.push_values([1.0, 2.0, 3.0]);

        assert_eq!(sheet.rows()[0].value("B"), &CellValue::Empty);
        assert_eq!(sheet.rows()[1].len(), 2);
        assert_eq!(sheet.row_count(), 2);
    }
}
