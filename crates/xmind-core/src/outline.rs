//! Serializable read-back of a sheet for hosts that render or persist it.

use crate::id::{SheetId, TopicId};
use crate::sheet::Sheet;
use crate::topic::{Relationship, Topic};
use serde::{Deserialize, Serialize};

/// A topic with its subtree, nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicOutline {
    pub id: TopicId,
    #[serde(flatten)]
    pub topic: Topic,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TopicOutline>,
}

impl TopicOutline {
    pub(crate) fn build(sheet: &Sheet, id: TopicId) -> Self {
        Self {
            id,
            topic: sheet.topic(id).cloned().unwrap_or_default(),
            children: sheet
                .children(id)
                .into_iter()
                .map(|child| Self::build(sheet, child))
                .collect(),
        }
    }

    /// Number of topics in this subtree, itself included.
    pub fn topic_count(&self) -> usize {
        1 + self.children.iter().map(TopicOutline::topic_count).sum::<usize>()
    }

    /// Find a topic anywhere in this subtree.
    pub fn find(&self, id: TopicId) -> Option<&TopicOutline> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

/// Snapshot of one sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetOutline {
    pub id: SheetId,
    pub name: String,
    pub root: TopicOutline,
    pub floating: Vec<TopicOutline>,
    pub relationships: Vec<Relationship>,
}
