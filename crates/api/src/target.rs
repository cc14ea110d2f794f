//! Target specification for commands.
//!
//! Commands either act on the current selection or name elements
//! explicitly by id.

use model::ElementId;
use serde::{Deserialize, Serialize};

/// Which elements a command operates on.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The current selection (most common for user actions).
    Selection,

    /// A specific element by id.
    Element(ElementId),

    /// Several specific elements by id.
    Elements(Vec<ElementId>),

    /// Every element on the canvas.
    All,
}

impl Default for Target {
    fn default() -> Self {
        Self::Selection
    }
}

impl From<ElementId> for Target {
    fn from(id: ElementId) -> Self {
        Self::Element(id)
    }
}

impl From<Vec<ElementId>> for Target {
    fn from(ids: Vec<ElementId>) -> Self {
        Self::Elements(ids)
    }
}
