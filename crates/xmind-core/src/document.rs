//! The top-level document: an ordered, never-empty list of sheets.

use crate::config::MindMapConfig;
use crate::error::{MindMapError, Result};
use crate::export::Exporter;
use crate::id::SheetId;
use crate::sheet::Sheet;
use std::sync::Arc;

/// Suffix appended to the name of a duplicated sheet.
pub const COPY_SUFFIX: &str = " - Copy";

/// A mind-map document.
///
/// Single-writer: mutate through `&mut XMind` only. There is no internal
/// locking; share across threads behind an external lock.
#[derive(Debug)]
pub struct XMind {
    sheets: Vec<Sheet>,
    config: Arc<MindMapConfig>,
}

impl XMind {
    /// A document with one default sheet and the stock defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MindMapConfig::default())
    }

    /// A document with one default sheet built from `config`. Sheets added
    /// later use the same config.
    #[must_use]
    pub fn with_config(config: MindMapConfig) -> Self {
        let config = Arc::new(config);
        Self {
            sheets: vec![Sheet::new(Arc::clone(&config))],
            config,
        }
    }

    /// A document starting from an existing sheet. Sheets added later use
    /// that sheet's config.
    #[must_use]
    pub fn from_sheet(sheet: Sheet) -> Self {
        let config = Arc::new(sheet.config().clone());
        Self {
            sheets: vec![sheet],
            config,
        }
    }

    pub fn config(&self) -> &MindMapConfig {
        &self.config
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// The first sheet. A document always has one.
    pub fn first_sheet(&self) -> &Sheet {
        &self.sheets[0]
    }

    pub fn first_sheet_mut(&mut self) -> &mut Sheet {
        &mut self.sheets[0]
    }

    pub fn sheet(&self, id: SheetId) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.id() == id)
    }

    pub fn sheet_mut(&mut self, id: SheetId) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.id() == id)
    }

    fn position(&self, id: SheetId) -> Option<usize> {
        self.sheets.iter().position(|s| s.id() == id)
    }

    /// Append a fresh default sheet. Returns its id.
    pub fn add_sheet(&mut self) -> SheetId {
        let sheet = Sheet::new(Arc::clone(&self.config));
        let id = sheet.id();
        self.sheets.push(sheet);
        log::debug!("added sheet {id}; document has {} sheets", self.sheets.len());
        id
    }

    /// Append a sheet built elsewhere. Ownership moves into the document,
    /// so it cannot share topics with any other sheet.
    pub fn insert_sheet(&mut self, sheet: Sheet) -> SheetId {
        let id = sheet.id();
        self.sheets.push(sheet);
        log::debug!("inserted sheet {id}");
        id
    }

    /// Remove a sheet by identity. Unknown ids are a no-op (`Ok(false)`).
    ///
    /// # Errors
    /// [`MindMapError::LastSheet`] when `id` is the only sheet left.
    pub fn remove_sheet(&mut self, id: SheetId) -> Result<bool> {
        let Some(position) = self.position(id) else {
            return Ok(false);
        };
        if self.sheets.len() == 1 {
            log::warn!("rejected remove_sheet({id}): last sheet");
            return Err(MindMapError::LastSheet);
        }
        self.sheets.remove(position);
        log::debug!("removed sheet {id}");
        Ok(true)
    }

    /// Append an independent deep copy of a sheet, named `<name> - Copy`.
    ///
    /// # Errors
    /// [`MindMapError::SheetNotFound`] if `id` is not in this document.
    pub fn duplicate_sheet(&mut self, id: SheetId) -> Result<SheetId> {
        let source = self.sheet(id).ok_or(MindMapError::SheetNotFound(id))?;
        let copy = source.deep_copy(format!("{}{COPY_SUFFIX}", source.name()));
        let copy_id = copy.id();
        self.sheets.push(copy);
        log::debug!("duplicated sheet {id} as {copy_id}");
        Ok(copy_id)
    }

    /// Hand a sheet to an exporter. Changes nothing.
    ///
    /// # Errors
    /// [`MindMapError::SheetNotFound`] if `id` is not in this document.
    pub fn export_sheet(&self, id: SheetId, exporter: &dyn Exporter) -> Result<String> {
        let sheet = self.sheet(id).ok_or(MindMapError::SheetNotFound(id))?;
        Ok(exporter.export(sheet))
    }
}

impl Default for XMind {
    fn default() -> Self {
        Self::new()
    }
}
