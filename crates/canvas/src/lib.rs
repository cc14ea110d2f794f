//! The authoring canvas: direct-manipulation editing of an element list.

mod canvas;
pub mod export;
mod viewport;

pub use canvas::{AssetDrop, DragState, EditorCanvas, EditorEvent, ShapeToken, MIN_ELEMENT_SIZE};
pub use viewport::{Viewport, MAX_ZOOM, MIN_FONT_PX, MIN_ZOOM, ZOOM_STEP};
