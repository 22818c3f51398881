//! Invariant checks for sheets and documents.
//!
//! Reports structural corruption without modifying anything. Every state
//! reachable through the public API should produce an empty report; tests
//! run these after each mutation.

use crate::document::XMind;
use crate::id::{SheetId, TopicId};
use crate::sheet::Sheet;
use std::collections::{HashMap, HashSet};

// ─── Violation types ─────────────────────────────────────────────────────

/// A single broken invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub sheet: SheetId,
    /// The topic involved, when there is one.
    pub topic: Option<TopicId>,
    /// Human-readable message.
    pub message: String,
    /// Short rule identifier (e.g. "cycle", "dangling-relationship").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all sheet rules.
#[must_use]
pub fn check_sheet(sheet: &Sheet) -> Vec<Violation> {
    let mut out = Vec::new();
    check_index(sheet, &mut out);
    check_root(sheet, &mut out);
    check_parent_links(sheet, &mut out);
    check_floating(sheet, &mut out);
    check_relationships(sheet, &mut out);
    out
}

/// Run all sheet rules on every sheet, plus the document-level rules.
#[must_use]
pub fn check_document(doc: &XMind) -> Vec<Violation> {
    let mut out: Vec<Violation> = doc.sheets().iter().flat_map(check_sheet).collect();

    let mut owners: HashMap<TopicId, SheetId> = HashMap::new();
    for sheet in doc.sheets() {
        for topic in sheet.topic_ids() {
            if let Some(first) = owners.insert(topic, sheet.id()) {
                out.push(Violation {
                    sheet: sheet.id(),
                    topic: Some(topic),
                    message: format!("Topic {topic} is shared with sheet {first}."),
                    rule: "shared-topic",
                });
            }
        }
    }
    out
}

// ─── Rules ────────────────────────────────────────────────────────────────

fn check_index(sheet: &Sheet, out: &mut Vec<Violation>) {
    if !sheet.index_is_consistent() {
        out.push(Violation {
            sheet: sheet.id(),
            topic: None,
            message: "Topic index disagrees with the arena.".into(),
            rule: "index-mismatch",
        });
    }
}

fn check_root(sheet: &Sheet, out: &mut Vec<Violation>) {
    let root = sheet.root();
    if let Some(parent) = sheet.parent(root) {
        out.push(Violation {
            sheet: sheet.id(),
            topic: Some(root),
            message: format!("Root {root} has parent {parent}."),
            rule: "root-has-parent",
        });
    }
}

/// Bidirectional consistency, single parent, no cycles.
fn check_parent_links(sheet: &Sheet, out: &mut Vec<Violation>) {
    for topic in sheet.topic_ids() {
        let parents = sheet.parent_count(topic);
        if parents > 1 {
            out.push(Violation {
                sheet: sheet.id(),
                topic: Some(topic),
                message: format!("Topic {topic} has {parents} parents."),
                rule: "multiple-parents",
            });
        }

        if let Some(parent) = sheet.parent(topic)
            && !sheet.children(parent).contains(&topic)
        {
            out.push(Violation {
                sheet: sheet.id(),
                topic: Some(topic),
                message: format!("Topic {topic} points at {parent}, which does not list it."),
                rule: "parent-child-mismatch",
            });
        }

        for child in sheet.children(topic) {
            if sheet.parent(child) != Some(topic) {
                out.push(Violation {
                    sheet: sheet.id(),
                    topic: Some(child),
                    message: format!("Topic {topic} lists {child}, whose parent differs."),
                    rule: "parent-child-mismatch",
                });
            }
        }

        let ancestors = sheet.ancestors(topic);
        if ancestors.contains(&topic) || ancestors.len() >= sheet.topic_count() {
            out.push(Violation {
                sheet: sheet.id(),
                topic: Some(topic),
                message: format!("Topic {topic} is its own ancestor."),
                rule: "cycle",
            });
        }
    }
}

fn check_floating(sheet: &Sheet, out: &mut Vec<Violation>) {
    let mut seen = HashSet::new();
    for &floating in sheet.floating() {
        if !seen.insert(floating) {
            out.push(Violation {
                sheet: sheet.id(),
                topic: Some(floating),
                message: format!("Floating topic {floating} is listed twice."),
                rule: "floating-duplicate",
            });
        }
        if !sheet.contains(floating) {
            out.push(Violation {
                sheet: sheet.id(),
                topic: Some(floating),
                message: format!("Floating topic {floating} is not in the sheet."),
                rule: "floating-missing",
            });
        } else if let Some(parent) = sheet.parent(floating) {
            out.push(Violation {
                sheet: sheet.id(),
                topic: Some(floating),
                message: format!("Floating topic {floating} has parent {parent}."),
                rule: "floating-has-parent",
            });
        }
    }
}

fn check_relationships(sheet: &Sheet, out: &mut Vec<Violation>) {
    for rel in sheet.relationships() {
        for endpoint in [rel.from(), rel.to()] {
            if !sheet.contains(endpoint) {
                out.push(Violation {
                    sheet: sheet.id(),
                    topic: Some(endpoint),
                    message: format!(
                        "Relationship {} points at {endpoint}, which is not in the sheet.",
                        rel.id()
                    ),
                    rule: "dangling-relationship",
                });
            }
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
