//! Error types for mind-map operations.
//!
//! Structural checks run before any mutation, so an `Err` always means the
//! sheet or document was left exactly as it was.

use crate::id::{RelationshipId, SheetId, TopicId};
use thiserror::Error;

/// An edit that would break the tree shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructuralViolation {
    #[error("topic {0} cannot become its own parent")]
    SelfParent(TopicId),

    #[error("topic {topic} cannot move under its own descendant {parent}")]
    DescendantParent { topic: TopicId, parent: TopicId },

    #[error("root topic {0} cannot be given a parent or moved out of the tree")]
    RootReparent(TopicId),

    #[error("root topic {0} cannot be deleted")]
    RootDeletion(TopicId),
}

/// Errors that can occur in mind-map operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MindMapError {
    #[error("topic not found: {0}")]
    TopicNotFound(TopicId),

    #[error("topic {0} is neither in the root tree nor floating")]
    RelationshipEndpoint(TopicId),

    #[error("relationship not found: {0}")]
    RelationshipNotFound(RelationshipId),

    #[error("sheet not found: {0}")]
    SheetNotFound(SheetId),

    #[error("a document must keep at least one sheet")]
    LastSheet,

    #[error("structural violation: {0}")]
    Structural(#[from] StructuralViolation),
}

/// Result type for mind-map operations.
pub type Result<T> = std::result::Result<T, MindMapError>;

/// Failure to load a [`MindMapConfig`](crate::config::MindMapConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid defaults JSON: {0}")]
    Json(#[from] serde_json::Error),
}
