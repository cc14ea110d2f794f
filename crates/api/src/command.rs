//! Editor commands - all operations that modify canvas state.
//!
//! Commands describe what the author wants, not how to achieve it; the
//! execution layer applies defaults, validation, and selection updates.

use crate::Target;
use glam::Vec2;
use model::ElementId;
use serde::{Deserialize, Serialize};

/// A command that modifies editor state.
///
/// Commands are serializable for scripting, recording, and driving the
/// editor from tests or external tools.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // === Creation ===
    /// Create a new element with its kind's default geometry and style.
    AddElement { kind: NewElementKind },

    /// Place a catalog asset on the canvas as an image element.
    AddAsset {
        asset_id: String,
        #[serde(default = "default_asset_position")]
        position: Vec2,
    },

    // === Selection ===
    /// Select an element (single selection model).
    Select { target: Target },

    /// Clear the current selection.
    ClearSelection,

    // === Structure ===
    /// Delete target elements.
    Delete {
        #[serde(default)]
        target: Target,
    },

    /// Duplicate target elements; each copy lands offset by +20,+20.
    Duplicate {
        #[serde(default)]
        target: Target,
    },

    // === Geometry ===
    /// Set absolute position (clamped to the canvas origin).
    SetPosition {
        #[serde(default)]
        target: Target,
        position: Vec2,
    },

    /// Resize to a specific size. Rejected below the size minimum.
    SetSize {
        #[serde(default)]
        target: Target,
        size: Vec2,
    },

    // === Content ===
    /// Replace a text element's content.
    SetText {
        #[serde(default)]
        target: Target,
        text: String,
    },

    // === View ===
    /// Set the zoom factor (clamped to the allowed range).
    SetZoom { factor: f32 },

    /// Back to 1.0x.
    ResetZoom,

    // === Batch ===
    /// Execute multiple commands in sequence, stopping at the first error.
    Batch { commands: Vec<Command> },
}

/// What kind of element `add_element` creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewElementKind {
    Text,
    Rectangle,
    Circle,
    DropZone,
}

fn default_asset_position() -> Vec2 {
    Vec2::new(100.0, 100.0)
}

/// Result of executing a command.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandResult {
    /// Command succeeded.
    Success {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        created: Vec<ElementId>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modified: Vec<ElementId>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        deleted: Vec<ElementId>,
    },
    /// Command failed.
    Error { message: String },
}

impl CommandResult {
    pub fn success() -> Self {
        Self::Success {
            created: vec![],
            modified: vec![],
            deleted: vec![],
        }
    }

    pub fn created(ids: Vec<ElementId>) -> Self {
        Self::Success {
            created: ids,
            modified: vec![],
            deleted: vec![],
        }
    }

    pub fn modified(ids: Vec<ElementId>) -> Self {
        Self::Success {
            created: vec![],
            modified: ids,
            deleted: vec![],
        }
    }

    pub fn deleted(ids: Vec<ElementId>) -> Self {
        Self::Success {
            created: vec![],
            modified: vec![],
            deleted: ids,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
