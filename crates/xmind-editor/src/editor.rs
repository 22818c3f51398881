//! Applies [`MindMapCommand`]s to a document and keeps a bounded history.

use crate::commands::MindMapCommand;
use xmind_core::{
    MindMapError, Relationship, RelationshipId, Result, Sheet, SheetId, Topic, TopicId, XMind,
};

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The command ran; there is nothing to report.
    Done,
    /// A sheet was created.
    Sheet(SheetId),
    /// A topic was created.
    Topic(TopicId),
    /// A relationship was created.
    Relationship(RelationshipId),
    /// Export identifier (`<sheet name>.<ext>`).
    Exported(String),
    /// Number of topics or relationships removed.
    Count(usize),
    /// Whether a conditional removal did anything.
    Changed(bool),
}

/// Owns a document and drives it with commands.
pub struct Editor {
    document: XMind,
    history: Vec<String>,
    /// Maximum number of remembered descriptions.
    max_history: usize,
}

impl Editor {
    pub const DEFAULT_HISTORY: usize = 100;

    pub fn new(document: XMind) -> Self {
        Self::with_history(document, Self::DEFAULT_HISTORY)
    }

    pub fn with_history(document: XMind, max_history: usize) -> Self {
        Self {
            document,
            history: Vec::with_capacity(max_history.min(Self::DEFAULT_HISTORY)),
            max_history,
        }
    }

    pub fn document(&self) -> &XMind {
        &self.document
    }

    pub fn into_document(self) -> XMind {
        self.document
    }

    /// Descriptions of applied commands, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Apply one command. A failed command leaves the document unchanged and
    /// is not recorded.
    pub fn apply(&mut self, command: MindMapCommand) -> Result<CommandOutcome> {
        let description = command.description();
        match self.execute(command) {
            Ok(outcome) => {
                log::debug!("applied: {description}");
                self.record(description);
                Ok(outcome)
            }
            Err(err) => {
                log::warn!("rejected {description}: {err}");
                Err(err)
            }
        }
    }

    /// Apply commands in order, stopping at the first failure.
    ///
    /// Not atomic: commands before the failing one stay applied and stay in
    /// the history, but their outcomes are dropped with the error. Use
    /// [`Editor::apply`] per command when created ids matter.
    pub fn apply_all(
        &mut self,
        commands: impl IntoIterator<Item = MindMapCommand>,
    ) -> Result<Vec<CommandOutcome>> {
        commands.into_iter().map(|cmd| self.apply(cmd)).collect()
    }

    fn record(&mut self, description: String) {
        if self.max_history == 0 {
            return;
        }
        self.history.push(description);
        if self.history.len() > self.max_history {
            self.history.remove(0);
        }
    }

    fn sheet_mut(&mut self, id: SheetId) -> Result<&mut Sheet> {
        self.document
            .sheet_mut(id)
            .ok_or(MindMapError::SheetNotFound(id))
    }

    fn topic_mut(&mut self, sheet: SheetId, id: TopicId) -> Result<&mut Topic> {
        self.sheet_mut(sheet)?
            .topic_mut(id)
            .ok_or(MindMapError::TopicNotFound(id))
    }

    fn execute(&mut self, command: MindMapCommand) -> Result<CommandOutcome> {
        use CommandOutcome as O;
        use MindMapCommand as C;

        let outcome = match command {
            C::AddSheet => O::Sheet(self.document.add_sheet()),
            C::RemoveSheet { sheet } => O::Changed(self.document.remove_sheet(sheet)?),
            C::DuplicateSheet { sheet } => O::Sheet(self.document.duplicate_sheet(sheet)?),
            C::RenameSheet { sheet, name } => {
                self.sheet_mut(sheet)?.rename_sheet(name);
                O::Done
            }
            C::ExportSheet { sheet, format } => {
                O::Exported(self.document.export_sheet(sheet, format.exporter())?)
            }

            C::InsertTopic { sheet, topic } => O::Topic(self.sheet_mut(sheet)?.insert_topic(topic)),
            C::AddChild {
                sheet,
                parent,
                node,
            } => {
                self.sheet_mut(sheet)?.add_child(parent, node)?;
                O::Done
            }
            C::RemoveChild {
                sheet,
                parent,
                node,
            } => O::Changed(self.sheet_mut(sheet)?.remove_child(parent, node)),
            C::ChangeParent {
                sheet,
                node,
                new_parent,
            } => {
                self.sheet_mut(sheet)?.change_parent(node, new_parent)?;
                O::Done
            }
            C::DuplicateTopic { sheet, topic } => O::Topic(self.sheet_mut(sheet)?.duplicate(topic)?),
            C::DeleteTopic { sheet, topic } => O::Count(self.sheet_mut(sheet)?.delete_topic(topic)?),
            C::PurgeDetached { sheet } => O::Count(self.sheet_mut(sheet)?.purge_detached()),

            C::AddFloatingNode { sheet } => O::Topic(self.sheet_mut(sheet)?.add_floating_node()),
            C::FloatTopic { sheet, topic } => {
                self.sheet_mut(sheet)?.float_topic(topic)?;
                O::Done
            }
            C::RemoveFloatingNode { sheet, topic } => {
                O::Changed(self.sheet_mut(sheet)?.remove_floating_node(topic))
            }

            C::AddRelationship { sheet, from, to } => {
                O::Relationship(self.sheet_mut(sheet)?.add_relationship(from, to)?)
            }
            C::RemoveRelationship { sheet, from, to } => {
                O::Count(self.sheet_mut(sheet)?.remove_relationship(from, to))
            }

            C::SetTopicText {
                sheet,
                topic,
                content,
            } => {
                self.topic_mut(sheet, topic)?.change_text(content);
                O::Done
            }
            C::SetTopicTextSize { sheet, topic, size } => {
                self.topic_mut(sheet, topic)?.change_text_size(size);
                O::Done
            }
            C::SetTopicColor {
                sheet,
                topic,
                color,
            } => {
                self.topic_mut(sheet, topic)?.change_color(color);
                O::Done
            }
            C::SetTopicShape {
                sheet,
                topic,
                shape,
            } => {
                self.topic_mut(sheet, topic)?.change_shape(shape);
                O::Done
            }
            C::MoveTopic { sheet, topic, x, y } => {
                self.topic_mut(sheet, topic)?.move_to(x, y);
                O::Done
            }

            C::SetRelationshipText {
                sheet,
                relationship,
                content,
            } => {
                self.relationship_mut(sheet, relationship)?
                    .change_text(content);
                O::Done
            }
            C::SetRelationshipTextSize {
                sheet,
                relationship,
                size,
            } => {
                self.relationship_mut(sheet, relationship)?
                    .change_text_size(size);
                O::Done
            }
            C::SetRelationshipColor {
                sheet,
                relationship,
                color,
            } => {
                self.relationship_mut(sheet, relationship)?
                    .change_color(color);
                O::Done
            }
        };
        Ok(outcome)
    }

    fn relationship_mut(
        &mut self,
        sheet: SheetId,
        id: RelationshipId,
    ) -> Result<&mut Relationship> {
        self.sheet_mut(sheet)?
            .relationship_mut(id)
            .ok_or(MindMapError::RelationshipNotFound(id))
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(XMind::new())
    }
}
