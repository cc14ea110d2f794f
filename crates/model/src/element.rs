use crate::coords::{CanvasDelta, CanvasPoint, CanvasSize};
use crate::element_id::ElementId;
use crate::style::ElementStyle;
use serde::{Deserialize, Serialize};

/// The kind of element, which determines rendering and interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Pictorial content; `content` holds the asset's visual token
    /// (an emoji/glyph string).
    Image,
    /// Display text; `content` is the text itself.
    Text,
    /// Geometric shape; `content` is the shape-kind token
    /// ("rectangle" or "circle").
    Shape,
    /// Audio cue placeholder; `content` names the clip.
    Audio,
}

/// A single visual unit on the canvas.
///
/// Geometry is stored in canvas space and is never touched by zoom.
/// `is_drop_zone` is orthogonal to `kind`: a drop zone is typically a
/// shape, but the flag stands alone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasElement {
    pub id: ElementId,
    pub kind: ElementKind,
    pub position: CanvasPoint,
    pub size: CanvasSize,
    pub content: String,

    #[serde(default, skip_serializing_if = "ElementStyle::is_default")]
    pub style: ElementStyle,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_drop_zone: bool,

    /// Reserved: links a drop zone to its expected draggable for a
    /// stricter matching mode. Playback currently ignores it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<ElementId>,
}

impl CanvasElement {
    pub fn new(
        kind: ElementKind,
        position: CanvasPoint,
        size: CanvasSize,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            position,
            size,
            content: content.into(),
            style: ElementStyle::default(),
            is_drop_zone: false,
            correct_answer: None,
        }
    }

    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = style;
        self
    }

    pub fn as_drop_zone(mut self) -> Self {
        self.is_drop_zone = true;
        self
    }

    /// Whether the element has renderable geometry.
    pub fn is_renderable(&self) -> bool {
        self.size.width() > 0.0 && self.size.height() > 0.0
    }

    /// Returns the bounding box as (min, max) corners.
    pub fn bounds(&self) -> (CanvasPoint, CanvasPoint) {
        let max = CanvasPoint(self.position.0 + self.size.0);
        (self.position, max)
    }

    /// Check if a canvas-space point is inside this element's bounds.
    pub fn contains_point(&self, point: CanvasPoint) -> bool {
        let (min, max) = self.bounds();
        point.x() >= min.x() && point.x() <= max.x() && point.y() >= min.y() && point.y() <= max.y()
    }

    /// Move the element by a delta.
    pub fn translate(&mut self, delta: CanvasDelta) {
        self.position = self.position + delta;
    }

    /// The canvas-space position that centers `size` within this element.
    pub fn centered_position_for(&self, size: CanvasSize) -> CanvasPoint {
        CanvasPoint::new(
            self.position.x() + (self.size.width() - size.width()) / 2.0,
            self.position.y() + (self.size.height() - size.height()) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(x: f32, y: f32, w: f32, h: f32) -> CanvasElement {
        CanvasElement::new(
            ElementKind::Shape,
            CanvasPoint::new(x, y),
            CanvasSize::new(w, h),
            "rectangle",
        )
    }

    #[test]
    fn bounds_span_position_plus_size() {
        let el = element(10.0, 20.0, 100.0, 50.0);
        let (min, max) = el.bounds();
        assert_eq!(min, CanvasPoint::new(10.0, 20.0));
        assert_eq!(max, CanvasPoint::new(110.0, 70.0));
    }

    #[test]
    fn contains_point_includes_edges() {
        let el = element(0.0, 0.0, 100.0, 100.0);
        assert!(el.contains_point(CanvasPoint::new(50.0, 50.0)));
        assert!(el.contains_point(CanvasPoint::new(0.0, 0.0)));
        assert!(el.contains_point(CanvasPoint::new(100.0, 100.0)));
        assert!(!el.contains_point(CanvasPoint::new(-1.0, 50.0)));
        assert!(!el.contains_point(CanvasPoint::new(101.0, 50.0)));
    }

    #[test]
    fn zero_size_is_not_renderable() {
        assert!(!element(0.0, 0.0, 0.0, 40.0).is_renderable());
        assert!(element(0.0, 0.0, 1.0, 1.0).is_renderable());
    }

    #[test]
    fn translate_moves_position_only() {
        let mut el = element(10.0, 20.0, 100.0, 50.0);
        el.translate(CanvasDelta::new(20.0, -5.0));
        assert_eq!(el.position, CanvasPoint::new(30.0, 15.0));
        assert_eq!(el.size, CanvasSize::new(100.0, 50.0));
    }

    #[test]
    fn centering_a_smaller_item_in_a_zone() {
        let zone = element(100.0, 100.0, 120.0, 120.0);
        let centered = zone.centered_position_for(CanvasSize::new(80.0, 80.0));
        assert_eq!(centered, CanvasPoint::new(120.0, 120.0));
    }

    #[test]
    fn default_flags_are_omitted_from_json() {
        let el = element(0.0, 0.0, 10.0, 10.0);
        let json: serde_json::Value = serde_json::to_value(&el).unwrap();
        assert!(json.get("is_drop_zone").is_none());
        assert!(json.get("correct_answer").is_none());
        assert!(json.get("style").is_none());
        assert_eq!(json["kind"], "shape");
    }

    #[test]
    fn drop_zone_flag_survives_roundtrip() {
        let el = element(0.0, 0.0, 10.0, 10.0).as_drop_zone();
        let json = serde_json::to_string(&el).unwrap();
        let back: CanvasElement = serde_json::from_str(&json).unwrap();
        assert!(back.is_drop_zone);
        assert_eq!(back, el);
    }
}
