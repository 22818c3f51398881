//! Visual attribute values carried by topics and relationships.
//!
//! These are plain owned records. Cloning one never shares state with the
//! source, which is what keeps duplicated topics isolated from the originals.

use serde::{Deserialize, Serialize};

// ─── Position ────────────────────────────────────────────────────────────

/// Canvas position of a topic. Layout is a host concern; the model only stores it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ─── Shape ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shape {
    pub name: String,
    pub fill: bool,
    pub border: bool,
}

impl Shape {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn change_shape(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            name: "Rectangle".into(),
            fill: false,
            border: false,
        }
    }
}

// ─── Color ───────────────────────────────────────────────────────────────

/// A named color (`"Blue"`, `"red"`, ...). Names are not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Color {
    pub name: String,
}

impl Color {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn change_color(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("Black")
    }
}

// ─── Text ────────────────────────────────────────────────────────────────

/// Label content plus font size and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Text {
    pub content: String,
    pub size: f32,
    pub style: String,
}

impl Text {
    pub fn new(content: impl Into<String>, size: f32, style: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            size,
            style: style.into(),
        }
    }

    pub fn change_text(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn change_text_size(&mut self, size: f32) {
        self.size = size;
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new("Content", 13.0, "Arial")
    }
}
