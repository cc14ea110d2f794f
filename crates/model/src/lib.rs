//! Shared data model for activity authoring and playback.
//!
//! This crate provides the flat element model both surfaces operate on.
//! Elements are rendered in z-order (index in the list). The editor and
//! player each own their working copy; nothing here is shared mutable
//! state.

pub mod activity;
pub mod color;
pub mod coords;
mod element;
mod element_id;
mod style;

pub use activity::{Activity, ActivityId, ActivityKind, Language, UserRole};
pub use color::{parse_color, Hsla, Rgba};
pub use coords::{CanvasDelta, CanvasPoint, CanvasSize, ScreenPoint};
pub use element::{CanvasElement, ElementKind};
pub use element_id::ElementId;
pub use style::ElementStyle;

/// Logical canvas width in unzoomed pixels.
pub const CANVAS_WIDTH: f32 = 800.0;

/// Logical canvas height in unzoomed pixels.
pub const CANVAS_HEIGHT: f32 = 600.0;
