//! Command layer over the `xmind-core` document model.
//!
//! Hosts build (or decode) [`MindMapCommand`]s and hand them to an
//! [`Editor`], which applies them and remembers what ran.

pub mod commands;
pub mod editor;

pub use commands::{ExportFormat, MindMapCommand};
pub use editor::{CommandOutcome, Editor};
