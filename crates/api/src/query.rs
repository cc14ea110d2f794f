//! Read-only queries against editor state.

use glam::Vec2;
use model::{CanvasElement, ElementId, ElementKind};
use serde::{Deserialize, Serialize};

/// A query for canvas state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// All elements.
    Elements,

    /// The current selection.
    Selection,

    /// Element count.
    Count,

    /// Ids of drop-zone elements.
    DropZones,
}

/// Response to a query.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryResult {
    Elements { elements: Vec<ElementInfo> },
    Selection { id: Option<ElementId> },
    Count { count: usize },
    DropZones { ids: Vec<ElementId> },
}

/// Serializable element summary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElementInfo {
    pub id: ElementId,
    pub kind: ElementKind,
    pub position: Vec2,
    pub size: Vec2,
    pub content: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_drop_zone: bool,
}

impl From<&CanvasElement> for ElementInfo {
    fn from(el: &CanvasElement) -> Self {
        Self {
            id: el.id,
            kind: el.kind,
            position: el.position.0,
            size: el.size.0,
            content: el.content.clone(),
            is_drop_zone: el.is_drop_zone,
        }
    }
}
