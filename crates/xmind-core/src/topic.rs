//! Topic and relationship records.
//!
//! A `Topic` carries only visual attributes. Its identity, parent and
//! children live in the owning [`Sheet`](crate::sheet::Sheet), so handing out
//! `&mut Topic` can never break the tree.

use crate::attrs::{Color, Position, Shape, Text};
use crate::id::{RelationshipId, TopicId};
use serde::{Deserialize, Serialize};

/// One node of a mind map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Topic {
    pub position: Position,
    pub shape: Shape,
    pub color: Color,
    pub text: Text,
}

impl Topic {
    pub fn new(position: Position, shape: Shape, color: Color, text: Text) -> Self {
        Self {
            position,
            shape,
            color,
            text,
        }
    }

    pub fn change_text(&mut self, content: impl Into<String>) {
        self.text.change_text(content);
    }

    pub fn change_text_size(&mut self, size: f32) {
        self.text.change_text_size(size);
    }

    pub fn change_color(&mut self, name: impl Into<String>) {
        self.color.change_color(name);
    }

    pub fn change_shape(&mut self, name: impl Into<String>) {
        self.shape.change_shape(name);
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.position = Position::new(x, y);
    }
}

/// A labeled, directed association between two topics of the same sheet.
///
/// Endpoints are non-owning ids, fixed at creation. Tree edits never touch
/// relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    id: RelationshipId,
    from: TopicId,
    to: TopicId,
    pub color: Color,
    pub text: Text,
}

impl Relationship {
    pub(crate) fn new(from: TopicId, to: TopicId, color: Color, text: Text) -> Self {
        Self {
            id: RelationshipId::generate(),
            from,
            to,
            color,
            text,
        }
    }

    pub fn id(&self) -> RelationshipId {
        self.id
    }

    pub fn from(&self) -> TopicId {
        self.from
    }

    pub fn to(&self) -> TopicId {
        self.to
    }

    pub fn change_text(&mut self, content: impl Into<String>) {
        self.text.change_text(content);
    }

    pub fn change_text_size(&mut self, size: f32) {
        self.text.change_text_size(size);
    }

    pub fn change_color(&mut self, name: impl Into<String>) {
        self.color.change_color(name);
    }
}
