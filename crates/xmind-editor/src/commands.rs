//! Structural and attribute commands a host can send to the editor.
//!
//! Commands are plain data (serde-tagged by `op`), so a UI or API layer can
//! build them directly or decode them from JSON.

use serde::{Deserialize, Serialize};
use xmind_core::{Exporter, PdfExporter, PngExporter, RelationshipId, SheetId, Topic, TopicId};

/// Built-in export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Pdf,
}

impl ExportFormat {
    pub fn exporter(self) -> &'static dyn Exporter {
        match self {
            ExportFormat::Png => &PngExporter,
            ExportFormat::Pdf => &PdfExporter,
        }
    }
}

/// A single edit (or export) against a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MindMapCommand {
    // Sheets
    AddSheet,
    RemoveSheet {
        sheet: SheetId,
    },
    DuplicateSheet {
        sheet: SheetId,
    },
    RenameSheet {
        sheet: SheetId,
        name: String,
    },
    ExportSheet {
        sheet: SheetId,
        format: ExportFormat,
    },

    // Topic structure
    /// Add a host-built topic to the sheet, detached.
    InsertTopic {
        sheet: SheetId,
        #[serde(default)]
        topic: Topic,
    },
    AddChild {
        sheet: SheetId,
        parent: TopicId,
        node: TopicId,
    },
    RemoveChild {
        sheet: SheetId,
        parent: TopicId,
        node: TopicId,
    },
    ChangeParent {
        sheet: SheetId,
        node: TopicId,
        new_parent: Option<TopicId>,
    },
    DuplicateTopic {
        sheet: SheetId,
        topic: TopicId,
    },
    DeleteTopic {
        sheet: SheetId,
        topic: TopicId,
    },
    PurgeDetached {
        sheet: SheetId,
    },

    // Floating topics
    AddFloatingNode {
        sheet: SheetId,
    },
    FloatTopic {
        sheet: SheetId,
        topic: TopicId,
    },
    RemoveFloatingNode {
        sheet: SheetId,
        topic: TopicId,
    },

    // Relationships
    AddRelationship {
        sheet: SheetId,
        from: TopicId,
        to: TopicId,
    },
    RemoveRelationship {
        sheet: SheetId,
        from: TopicId,
        to: TopicId,
    },

    // Attributes
    SetTopicText {
        sheet: SheetId,
        topic: TopicId,
        content: String,
    },
    SetTopicTextSize {
        sheet: SheetId,
        topic: TopicId,
        size: f32,
    },
    SetTopicColor {
        sheet: SheetId,
        topic: TopicId,
        color: String,
    },
    SetTopicShape {
        sheet: SheetId,
        topic: TopicId,
        shape: String,
    },
    MoveTopic {
        sheet: SheetId,
        topic: TopicId,
        x: f32,
        y: f32,
    },
    SetRelationshipText {
        sheet: SheetId,
        relationship: RelationshipId,
        content: String,
    },
    SetRelationshipTextSize {
        sheet: SheetId,
        relationship: RelationshipId,
        size: f32,
    },
    SetRelationshipColor {
        sheet: SheetId,
        relationship: RelationshipId,
        color: String,
    },
}

impl MindMapCommand {
    /// The sheet this command targets, if any.
    pub fn sheet(&self) -> Option<SheetId> {
        use MindMapCommand::*;
        match self {
            AddSheet => None,
            RemoveSheet { sheet }
            | DuplicateSheet { sheet }
            | RenameSheet { sheet, .. }
            | ExportSheet { sheet, .. }
            | InsertTopic { sheet, .. }
            | AddChild { sheet, .. }
            | RemoveChild { sheet, .. }
            | ChangeParent { sheet, .. }
            | DuplicateTopic { sheet, .. }
            | DeleteTopic { sheet, .. }
            | PurgeDetached { sheet }
            | AddFloatingNode { sheet }
            | FloatTopic { sheet, .. }
            | RemoveFloatingNode { sheet, .. }
            | AddRelationship { sheet, .. }
            | RemoveRelationship { sheet, .. }
            | SetTopicText { sheet, .. }
            | SetTopicTextSize { sheet, .. }
            | SetTopicColor { sheet, .. }
            | SetTopicShape { sheet, .. }
            | MoveTopic { sheet, .. }
            | SetRelationshipText { sheet, .. }
            | SetRelationshipTextSize { sheet, .. }
            | SetRelationshipColor { sheet, .. } => Some(*sheet),
        }
    }

    /// Short human-readable label, used for the editor history.
    pub fn description(&self) -> String {
        use MindMapCommand::*;
        match self {
            AddSheet => "add sheet".into(),
            RemoveSheet { sheet } => format!("remove sheet {sheet}"),
            DuplicateSheet { sheet } => format!("duplicate sheet {sheet}"),
            RenameSheet { name, .. } => format!("rename sheet to {name:?}"),
            ExportSheet { sheet, format } => format!("export sheet {sheet} as {format:?}"),
            InsertTopic { .. } => "insert topic".into(),
            AddChild { parent, node, .. } => format!("add {node} under {parent}"),
            RemoveChild { parent, node, .. } => format!("remove {node} from {parent}"),
            ChangeParent {
                node,
                new_parent: Some(parent),
                ..
            } => format!("move {node} under {parent}"),
            ChangeParent {
                node,
                new_parent: None,
                ..
            } => format!("detach {node}"),
            DuplicateTopic { topic, .. } => format!("duplicate {topic}"),
            DeleteTopic { topic, .. } => format!("delete {topic}"),
            PurgeDetached { .. } => "purge detached topics".into(),
            AddFloatingNode { .. } => "add floating topic".into(),
            FloatTopic { topic, .. } => format!("float {topic}"),
            RemoveFloatingNode { topic, .. } => format!("remove floating {topic}"),
            AddRelationship { from, to, .. } => format!("relate {from} -> {to}"),
            RemoveRelationship { from, to, .. } => format!("unrelate {from} -> {to}"),
            SetTopicText { topic, .. } => format!("edit text of {topic}"),
            SetTopicTextSize { topic, size, .. } => format!("set text size of {topic} to {size}"),
            SetTopicColor { topic, color, .. } => format!("color {topic} {color}"),
            SetTopicShape { topic, shape, .. } => format!("shape {topic} as {shape}"),
            MoveTopic { topic, x, y, .. } => format!("move {topic} to ({x}, {y})"),
            SetRelationshipText { relationship, .. } => format!("edit text of {relationship}"),
            SetRelationshipTextSize {
                relationship, size, ..
            } => format!("set text size of {relationship} to {size}"),
            SetRelationshipColor {
                relationship,
                color,
                ..
            } => format!("color {relationship} {color}"),
        }
    }
}
