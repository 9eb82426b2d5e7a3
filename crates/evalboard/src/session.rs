//! Workbook loading with last-write-wins semantics
//!
//! A host that decodes workbooks in the background may have more than one
//! load of the same source in flight. Each load takes a [`LoadTicket`]; only
//! the most recently issued ticket for a source can store its result, so an
//! older load that finishes late never overwrites a newer one.

use std::collections::HashMap;
use std::path::Path;

use evalboard_core::{Result, Workbook};

use crate::WorkbookExt;

/// Claim on the result slot of one source
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a load ticket must be passed to finish_load or abandon"]
pub struct LoadTicket {
    source: String,
    generation: u64,
}

impl LoadTicket {
    /// The source this ticket loads
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Issue order of this ticket, unique within its session
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The decoded workbooks of one dashboard session
#[derive(Debug, Default)]
pub struct Session {
    next_generation: u64,
    /// Newest ticket issued per source
    latest: HashMap<String, u64>,
    loaded: HashMap<String, Workbook>,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading a source, superseding any load already in flight
    pub fn begin_load<S: Into<String>>(&mut self, source: S) -> LoadTicket {
        let source = source.into();
        self.next_generation += 1;
        let generation = self.next_generation;
        self.latest.insert(source.clone(), generation);
        LoadTicket { source, generation }
    }

    /// Store a finished load
    ///
    /// Returns `false`, dropping the workbook, when a newer load of the same
    /// source has been started since this ticket was issued.
    pub fn finish_load(&mut self, ticket: LoadTicket, workbook: Workbook) -> bool {
        if !self.is_current(&ticket) {
            tracing::debug!(
                source = ticket.source.as_str(),
                generation = ticket.generation,
                "discarding superseded load"
            );
            return false;
        }
        self.latest.remove(&ticket.source);
        self.loaded.insert(ticket.source, workbook);
        true
    }

    /// Give up on a load that failed, leaving the previous workbook in place
    pub fn abandon(&mut self, ticket: LoadTicket) {
        if self.is_current(&ticket) {
            self.latest.remove(&ticket.source);
        }
    }

    /// Check whether a ticket is still the newest for its source
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.latest.get(&ticket.source) == Some(&ticket.generation)
    }

    /// Check whether a load of the source is in flight
    pub fn is_loading(&self, source: &str) -> bool {
        self.latest.contains_key(source)
    }

    /// The most recently stored workbook for a source
    pub fn workbook(&self, source: &str) -> Option<&Workbook> {
        self.loaded.get(source)
    }

    /// Load a file synchronously and store it under its path
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<&Workbook> {
        let path = path.as_ref();
        let source = path.display().to_string();
        let ticket = self.begin_load(source.as_str());

        match Workbook::open(path) {
            Ok(workbook) => {
                self.finish_load(ticket, workbook);
            }
            Err(e) => {
                self.abandon(ticket);
                return Err(e);
            }
        }

        self.loaded
            .get(&source)
            .ok_or_else(|| evalboard_core::Error::other(format!("{} was not loaded", source)))
    }
}
