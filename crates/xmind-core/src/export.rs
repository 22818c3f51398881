//! Export strategies.
//!
//! An exporter turns a sheet into an export identifier. Nothing is rendered
//! here; a real backend would plug in behind the same trait.

use crate::sheet::Sheet;

/// Capability shared by every export format.
pub trait Exporter {
    /// File extension without the dot.
    fn extension(&self) -> &str;

    /// Produce the export identifier for `sheet`: `<sheet name>.<extension>`.
    fn export(&self, sheet: &Sheet) -> String {
        format!("{}.{}", sheet.name(), self.extension())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PngExporter;

impl Exporter for PngExporter {
    fn extension(&self) -> &str {
        "png"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PdfExporter;

impl Exporter for PdfExporter {
    fn extension(&self) -> &str {
        "pdf"
    }
}
