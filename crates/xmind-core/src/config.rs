//! Default visual configuration for new topics, sheets and relationships.
//!
//! Passed explicitly into sheet construction so hosts and tests can swap in
//! alternate defaults without touching any global state.

use crate::attrs::{Color, Position, Shape, Text};
use crate::error::ConfigError;
use crate::topic::Topic;
use serde::{Deserialize, Serialize};

// ─── Config ───────────────────────────────────────────────────────────────

/// Attribute preset for one kind of topic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicDefaults {
    pub position: Position,
    pub shape: Shape,
    pub color: Color,
    pub text: Text,
}

impl TopicDefaults {
    pub fn new(color: &str, content: &str, size: f32, style: &str) -> Self {
        Self {
            position: Position::default(),
            shape: Shape::default(),
            color: Color::new(color),
            text: Text::new(content, size, style),
        }
    }

    /// Build a fresh, standalone topic from this preset.
    pub fn build(&self) -> Topic {
        Topic::new(
            self.position,
            self.shape.clone(),
            self.color.clone(),
            self.text.clone(),
        )
    }
}

/// Attribute preset for new relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipDefaults {
    pub color: Color,
    pub text: Text,
}

impl Default for RelationshipDefaults {
    fn default() -> Self {
        Self {
            color: Color::default(),
            text: Text::new("Relationship", 13.0, "Arial"),
        }
    }
}

/// Configuration consumed by [`Sheet::new`](crate::sheet::Sheet::new) and
/// the sheet-level factories.
///
/// `Default` reproduces the stock mind map: a black "Central Topic" root
/// with four colored main topics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MindMapConfig {
    /// Name given to freshly created sheets.
    pub sheet_name: String,

    /// Preset for the root of a default tree.
    pub root: TopicDefaults,

    /// Children of a default root, in display order.
    pub main_topics: Vec<TopicDefaults>,

    /// Preset for `Sheet::add_floating_node`.
    pub floating: TopicDefaults,

    pub relationship: RelationshipDefaults,
}

impl Default for MindMapConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Mind Map".into(),
            root: TopicDefaults::new("Black", "Central Topic", 20.0, "Arial"),
            main_topics: vec![
                TopicDefaults::new("Blue", "Main Topic 1", 16.0, "Arial"),
                TopicDefaults::new("Red", "Main Topic 2", 16.0, "Arial"),
                TopicDefaults::new("Yellow", "Main Topic 3", 16.0, "Arial"),
                TopicDefaults::new("Green", "Main Topic 4", 16.0, "Arial"),
            ],
            floating: TopicDefaults::new("Gray", "Floating Topic", 13.0, "Arial"),
            relationship: RelationshipDefaults::default(),
        }
    }
}

impl MindMapConfig {
    /// Load defaults from JSON. Fields left out fall back to [`Default`].
    ///
    /// # Errors
    /// Returns [`ConfigError::Json`] if the input is not a valid config object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        log::debug!(
            "loaded mind map defaults with {} main topics",
            config.main_topics.len()
        );
        Ok(config)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
