//! Aggregate ("OVERALL") row detection
//!
//! Category-level sheets mix one synthetic summary row in with the
//! per-category rows. There is no flag column; the row is recognised by the
//! marker text appearing in any of its cells.

use evalboard_core::{CellValue, SheetRow};

/// Marker text of an aggregate row, compared upper-cased
pub const AGGREGATE_MARKER: &str = "OVERALL";

/// Check whether a single cell carries the aggregate marker
pub fn is_aggregate_value(value: &CellValue) -> bool {
    value.to_text().to_uppercase().contains(AGGREGATE_MARKER)
}

/// Check whether a row is the aggregate row
///
/// Every cell is scanned, not just the category column: the marker's column
/// depends on the sheet layout. A row with the marker in several cells is
/// still a single aggregate row.
pub fn is_aggregate_row(row: &SheetRow) -> bool {
    row.values().any(is_aggregate_value)
}

/// The first aggregate row, if any
pub fn find_aggregate_row<'a, I>(rows: I) -> Option<&'a SheetRow>
where
    I: IntoIterator<Item = &'a SheetRow>,
{
    rows.into_iter().find(|row| is_aggregate_row(row))
}

/// Split rows into `(category rows, aggregate rows)`, keeping row order
pub fn partition_rows<'a, I>(rows: I) -> (Vec<&'a SheetRow>, Vec<&'a SheetRow>)
where
    I: IntoIterator<Item = &'a SheetRow>,
{
    rows.into_iter().partition(|row| !is_aggregate_row(row))
}
