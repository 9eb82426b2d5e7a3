//! Row types

use crate::cell::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// One decoded sheet row: column name to raw value, in column order
///
/// Lookups are by column name, which is how the upstream decoder keys its
/// records. Case-insensitive lookup is available for sheets whose header
/// casing drifts between pipeline stages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    cells: Vec<(String, CellValue)>,
}

impl SheetRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used mostly when assembling rows by hand
    pub fn with<K: Into<String>, V: Into<CellValue>>(mut self, column: K, value: V) -> Self {
        self.insert(column, value);
        self
    }

    /// Set a cell, replacing any existing value under the same column
    ///
    /// New columns are appended so the declared order is preserved.
    pub fn insert<K: Into<String>, V: Into<CellValue>>(&mut self, column: K, value: V) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.cells.push((column, value)),
        }
    }

    /// Get a cell by exact column name
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Get a cell by column name, falling back to a case-insensitive match
    pub fn get_ignore_case(&self, column: &str) -> Option<&CellValue> {
        self.get(column).or_else(|| {
            self.cells
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(column))
                .map(|(_, value)| value)
        })
    }

    /// Get a cell by exact column name, or [`CellValue::Empty`] when absent
    pub fn value(&self, column: &str) -> &CellValue {
        self.get(column).unwrap_or(&EMPTY)
    }

    /// Check whether the row has a column with this exact name
    pub fn contains_column(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Column names in declared order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    /// Values in declared column order
    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.iter().map(|(_, value)| value)
    }

    /// `(column, value)` pairs in declared order
    pub fn cells(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// The first cell of the row, if any
    pub fn first(&self) -> Option<(&str, &CellValue)> {
        self.cells.first().map(|(name, value)| (name.as_str(), value))
    }

    /// Check if row has any cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells in row
    pub fn len(&self) -> usize {
        self.cells.len()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for SheetRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = SheetRow::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}
