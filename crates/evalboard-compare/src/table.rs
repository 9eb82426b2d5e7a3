//! Raw table view with score classification

use std::fmt;

use evalboard_core::{CellValue, Sheet};

use crate::category::header_row;
use crate::error::ViewResult;
use crate::score::{coerce_score, format_score};
use crate::sentinel::is_aggregate_row;
use crate::sheets::MODEL_COMPARISON;

/// Lowest score classed as excellent
pub const EXCELLENT_THRESHOLD: f64 = 8.5;

/// Lowest score classed as good
pub const GOOD_THRESHOLD: f64 = 6.5;

/// Score band of a table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScoreClass {
    Excellent,
    Good,
    Fair,
    /// Not a score
    None,
}

impl ScoreClass {
    /// Classify a coerced score
    pub fn of(score: Option<f64>) -> Self {
        match score {
            Some(n) if n >= EXCELLENT_THRESHOLD => ScoreClass::Excellent,
            Some(n) if n >= GOOD_THRESHOLD => ScoreClass::Good,
            Some(_) => ScoreClass::Fair,
            None => ScoreClass::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreClass::Excellent => "excellent",
            ScoreClass::Good => "good",
            ScoreClass::Fair => "fair",
            ScoreClass::None => "none",
        }
    }
}

impl fmt::Display for ScoreClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One table cell with its display form and score band
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClassifiedCell {
    /// The cell as decoded
    pub raw: CellValue,
    /// Two-decimal score, or the raw text
    pub display: String,
    pub is_score: bool,
    pub score_class: ScoreClass,
}

impl ClassifiedCell {
    /// Classify a raw cell
    pub fn classify(value: &CellValue) -> Self {
        let score = coerce_score(value);
        Self {
            raw: value.clone(),
            display: format_score(value),
            is_score: score.is_some(),
            score_class: ScoreClass::of(score),
        }
    }
}

/// What the first column of a table names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LabelKind {
    Model,
    Category,
}

impl LabelKind {
    /// Label kind for a sheet name
    pub fn for_sheet(name: &str) -> Self {
        if name == MODEL_COMPARISON {
            LabelKind::Model
        } else {
            LabelKind::Category
        }
    }
}

/// A table column: source key and display title
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableColumn {
    pub key: String,
    pub title: String,
}

/// A table row
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableRow {
    /// One cell per table column
    pub cells: Vec<ClassifiedCell>,
    /// Whether this is the aggregate row, to be highlighted
    pub aggregate: bool,
}

/// The table view of one sheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComparisonTable {
    pub sheet: String,
    /// What the first column names
    pub label_kind: LabelKind,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
}

impl ComparisonTable {
    /// Column display titles
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.title.as_str())
    }

    /// Row display values
    pub fn display_rows(&self) -> impl Iterator<Item = Vec<&str>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(|cell| cell.display.as_str()).collect())
    }

    /// The aggregate rows, if any
    pub fn aggregate_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(|row| row.aggregate)
    }
}

/// Turn a column key into a display title
///
/// A space goes before each capital letter not already preceded by
/// whitespace, the first letter is capitalised and the result is trimmed.
/// `answerRelevance` becomes `Answer Relevance`.
pub fn format_column_name(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p| !p.is_whitespace()) {
            spaced.push(' ');
        }
        spaced.push(c);
        prev = Some(c);
    }

    let trimmed = spaced.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the table view of a sheet
///
/// Columns come from the first row. Every row is kept; aggregate rows are
/// flagged rather than dropped.
pub fn build_table(sheet: &Sheet) -> ViewResult<ComparisonTable> {
    let header = header_row(sheet)?;

    let columns: Vec<TableColumn> = header
        .columns()
        .map(|key| TableColumn {
            key: key.to_string(),
            title: format_column_name(key),
        })
        .collect();

    let rows = sheet
        .rows()
        .iter()
        .map(|row| TableRow {
            cells: columns
                .iter()
                .map(|column| ClassifiedCell::classify(row.value(&column.key)))
                .collect(),
            aggregate: is_aggregate_row(row),
        })
        .collect();

    Ok(ComparisonTable {
        sheet: sheet.name().to_string(),
        label_kind: LabelKind::for_sheet(sheet.name()),
        columns,
        rows,
    })
}
