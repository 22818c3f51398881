pub mod attrs;
pub mod check;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod id;
pub mod outline;
pub mod sheet;
pub mod topic;

pub use attrs::{Color, Position, Shape, Text};
pub use check::{Violation, check_document, check_sheet};
pub use config::{MindMapConfig, RelationshipDefaults, TopicDefaults};
pub use document::XMind;
pub use error::{ConfigError, MindMapError, Result, StructuralViolation};
pub use export::{Exporter, PdfExporter, PngExporter};
pub use id::{RelationshipId, SheetId, TopicId};
pub use outline::{SheetOutline, TopicOutline};
pub use sheet::{Placement, Sheet};
pub use topic::{Relationship, Topic};
