//! Workbook type - the named sheets decoded from one source

use crate::error::{Error, Result};
use crate::sheet::Sheet;

/// A decoded workbook
///
/// Sheets are independent of each other; correlation across sheets is by
/// name convention only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    /// Sheets in source order
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create an empty workbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the workbook has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Get a sheet by exact name
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    /// Get a sheet by name, falling back to a case-insensitive match
    ///
    /// Names are unique case-insensitively, so the fallback is unambiguous.
    pub fn sheet_ignore_case(&self, name: &str) -> Option<&Sheet> {
        self.sheet(name).or_else(|| {
            let name_lower = name.to_lowercase();
            self.sheets
                .iter()
                .find(|s| s.name().to_lowercase() == name_lower)
        })
    }

    /// Iterate over all sheets
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }

    /// Sheet names in source order
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.name())
    }

    /// Add a sheet, returning its index
    pub fn add_sheet(&mut self, sheet: Sheet) -> Result<usize> {
        self.validate_sheet_name(sheet.name())?;
        let index = self.sheets.len();
        self.sheets.push(sheet);
        Ok(index)
    }

    /// Validate a sheet name before insertion
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }

        // Sheet lookups are exact, but decoders treat names case-insensitively
        let name_lower = name.to_lowercase();
        if self
            .sheets
            .iter()
            .any(|s| s.name().to_lowercase() == name_lower)
        {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}

impl FromIterator<Sheet> for Workbook {
    /// Collect sheets, dropping (with a warning) any whose name is blank or collides
    fn from_iter<I: IntoIterator<Item = Sheet>>(iter: I) -> Self {
        let mut workbook = Workbook::new();
        for sheet in iter {
            let name = sheet.name().to_string();
            if let Err(e) = workbook.add_sheet(sheet) {
                tracing::warn!(sheet = name.as_str(), error = %e, "dropping sheet");
            }
        }
        workbook
    }
}
