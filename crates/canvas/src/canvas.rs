use crate::Viewport;
use anyhow::{bail, Result};
use glam::Vec2;
use model::{
    Activity, ActivityKind, CanvasDelta, CanvasElement, CanvasPoint, CanvasSize, ElementId,
    ElementKind, ElementStyle, Hsla, Language, ScreenPoint,
};
use serde::{Deserialize, Serialize};

/// Smallest size a properties-panel resize may set, per axis.
pub const MIN_ELEMENT_SIZE: f32 = 1.0;

/// Offset applied to duplicated elements so the copy is visually
/// distinguishable from the original.
const DUPLICATE_OFFSET: CanvasDelta = CanvasDelta(Vec2::new(20.0, 20.0));

/// Shape-kind token stored in a shape element's `content`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeToken {
    Rectangle,
    Circle,
}

impl ShapeToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeToken::Rectangle => "rectangle",
            ShapeToken::Circle => "circle",
        }
    }
}

/// An asset carried through an explicit drag session, rather than ambient
/// platform drag state. Only the fields the canvas needs to mint an image
/// element.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssetDrop {
    pub asset_id: String,
    pub visual_token: String,
    pub display_name: String,
}

impl AssetDrop {
    pub fn new(
        asset_id: impl Into<String>,
        visual_token: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            visual_token: visual_token.into(),
            display_name: display_name.into(),
        }
    }
}

/// Active drag operation.
#[derive(Clone, Copy, Debug)]
pub enum DragState {
    /// Moving an element; `offset` is where inside the element's rendered
    /// box the pointer grabbed it, in screen pixels.
    MovingElement { id: ElementId, offset: Vec2 },
}

/// Events emitted by the canvas for the embedding surface to drain.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    ElementAdded(ElementId),
    ElementRemoved(ElementId),
    SelectionChanged,
    ContentChanged,
    ZoomChanged,
}

/// The editing canvas.
///
/// Owns a working copy of the element list plus ephemeral session state
/// (selection, drag, text edit, zoom). Session state is created fresh per
/// editing session and never persisted. Operations on ids that are no
/// longer in the list are silent no-ops; stale ids are expected while the
/// surface re-renders, not exceptional.
pub struct EditorCanvas {
    /// All elements, in z-order (back to front).
    pub elements: Vec<CanvasElement>,

    /// Zoom state.
    pub viewport: Viewport,

    selection: Option<ElementId>,
    drag: Option<DragState>,
    editing_text: Option<ElementId>,

    /// Where the canvas sits on screen; pointer positions arrive relative
    /// to the window, drag math needs them relative to the canvas.
    origin: ScreenPoint,

    events: Vec<EditorEvent>,
}

impl Default for EditorCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorCanvas {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            viewport: Viewport::new(),
            selection: None,
            drag: None,
            editing_text: None,
            origin: ScreenPoint::default(),
            events: Vec::new(),
        }
    }

    /// Start an editing session from an existing element list (template or
    /// saved activity). The canvas owns this copy.
    pub fn from_elements(elements: Vec<CanvasElement>) -> Self {
        let mut canvas = Self::new();
        canvas.elements = elements;
        canvas
    }

    /// Tell the canvas where it is rendered on screen.
    pub fn set_origin(&mut self, origin: ScreenPoint) {
        self.origin = origin;
    }

    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn editing_text(&self) -> Option<ElementId> {
        self.editing_text
    }

    /// Drain queued events.
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn get_element(&self, id: ElementId) -> Option<&CanvasElement> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn get_element_mut(&mut self, id: ElementId) -> Option<&mut CanvasElement> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    /// Find the topmost element at a canvas point.
    pub fn element_at_point(&self, point: CanvasPoint) -> Option<ElementId> {
        // Reverse for z-order (top to bottom)
        self.elements
            .iter()
            .rev()
            .find(|el| el.contains_point(point))
            .map(|el| el.id)
    }

    // === Element creation ===

    fn push_element(&mut self, element: CanvasElement) -> ElementId {
        let id = element.id;
        self.elements.push(element);
        self.select(Some(id));
        self.events.push(EditorEvent::ElementAdded(id));
        self.events.push(EditorEvent::ContentChanged);
        id
    }

    /// Add a text element with default geometry and style.
    pub fn add_text(&mut self) -> ElementId {
        let element = CanvasElement::new(
            ElementKind::Text,
            CanvasPoint::new(100.0, 100.0),
            CanvasSize::new(150.0, 40.0),
            "Text",
        )
        .with_style(ElementStyle::new().with_font(20.0));
        self.push_element(element)
    }

    /// Add a shape element with default geometry and style.
    pub fn add_shape(&mut self, token: ShapeToken) -> ElementId {
        let radius = match token {
            ShapeToken::Circle => 50.0,
            ShapeToken::Rectangle => 8.0,
        };
        let element = CanvasElement::new(
            ElementKind::Shape,
            CanvasPoint::new(100.0, 100.0),
            CanvasSize::new(100.0, 100.0),
            token.as_str(),
        )
        .with_style(
            ElementStyle::new()
                .with_background(Hsla::new(0.0, 0.0, 0.9, 1.0))
                .with_border(Hsla::new(0.0, 0.0, 0.8, 1.0), 2.0)
                .with_corner_radius(radius),
        );
        self.push_element(element)
    }

    /// Add a drop-zone element: a translucent dashed target for playback.
    pub fn add_drop_zone(&mut self) -> ElementId {
        let element = CanvasElement::new(
            ElementKind::Shape,
            CanvasPoint::new(100.0, 100.0),
            CanvasSize::new(120.0, 120.0),
            ShapeToken::Rectangle.as_str(),
        )
        .with_style(
            ElementStyle::new()
                .with_background(Hsla::new(0.0, 0.0, 0.9, 1.0).with_alpha(0.5))
                .with_border(Hsla::new(0.7, 0.6, 0.5, 1.0), 3.0)
                .with_corner_radius(12.0),
        )
        .as_drop_zone();
        self.push_element(element)
    }

    /// Create an image element from an externally dragged asset, placed at
    /// the (screen-space) drop point.
    pub fn accept_asset_drop(&mut self, drop: &AssetDrop, pointer: ScreenPoint) -> ElementId {
        let position = self
            .viewport
            .screen_to_canvas(pointer - self.origin)
            .clamp_to_origin();
        let element = CanvasElement::new(
            ElementKind::Image,
            position,
            CanvasSize::new(80.0, 80.0),
            drop.visual_token.clone(),
        )
        .with_style(
            ElementStyle::new()
                .with_background(Hsla::white())
                .with_border(Hsla::new(0.0, 0.0, 0.85, 1.0), 2.0)
                .with_corner_radius(12.0),
        );
        log::debug!(
            "asset {} dropped at ({}, {})",
            drop.asset_id,
            position.x(),
            position.y()
        );
        self.push_element(element)
    }

    // === Selection ===

    /// Set the single active selection. Clearing (or moving) the selection
    /// exits any in-progress text edit.
    pub fn select(&mut self, id: Option<ElementId>) {
        // Clicking empty canvas or another element commits the live edit.
        if self.editing_text.is_some() && self.editing_text != id {
            self.end_text_edit();
        }
        // Selecting a stale id is a no-op.
        if let Some(id) = id {
            if self.get_element(id).is_none() {
                return;
            }
        }
        if self.selection != id {
            self.selection = id;
            self.events.push(EditorEvent::SelectionChanged);
        }
    }

    // === Drag ===

    /// Begin moving an element. Records the pointer's offset from the
    /// element's rendered origin so motion stays anchored to wherever the
    /// drag started on the element. Suspended while the element is in
    /// text-edit mode.
    pub fn begin_drag(&mut self, id: ElementId, pointer: ScreenPoint) {
        if self.editing_text == Some(id) {
            return;
        }
        let Some(element) = self.get_element(id) else {
            return;
        };
        let rendered_origin = self.viewport.canvas_to_screen(element.position);
        let offset = (pointer - self.origin).0 - rendered_origin.0;
        self.drag = Some(DragState::MovingElement { id, offset });
        self.select(Some(id));
    }

    /// Recompute the dragged element's position from the current pointer.
    /// Clamped to the canvas origin on both axes; no clamping against the
    /// far edges, elements may sit partially or fully outside the visible
    /// canvas. Cheap: called on every pointer move.
    pub fn update_drag(&mut self, pointer: ScreenPoint) {
        let Some(DragState::MovingElement { id, offset }) = self.drag else {
            return;
        };
        let zoom = self.viewport.zoom();
        let new_position =
            CanvasPoint(((pointer - self.origin).0 - offset) / zoom).clamp_to_origin();
        if let Some(element) = self.get_element_mut(id) {
            element.position = new_position;
        }
    }

    /// Finish the drag; the last computed position is final.
    pub fn end_drag(&mut self) {
        if self.drag.take().is_some() {
            self.events.push(EditorEvent::ContentChanged);
        }
    }

    // === Geometry ===

    /// Direct numeric resize from a properties panel. Values below
    /// [`MIN_ELEMENT_SIZE`] or non-finite are rejected without mutating
    /// anything; a stale id is a silent no-op.
    pub fn resize(&mut self, id: ElementId, width: f32, height: f32) -> Result<()> {
        if !width.is_finite() || !height.is_finite() || width < MIN_ELEMENT_SIZE || height < MIN_ELEMENT_SIZE
        {
            bail!("size must be at least {MIN_ELEMENT_SIZE} on both axes");
        }
        if let Some(element) = self.get_element_mut(id) {
            element.size = CanvasSize::new(width, height);
            self.events.push(EditorEvent::ContentChanged);
        }
        Ok(())
    }

    /// Set an element's position directly, clamped to the canvas origin.
    pub fn set_position(&mut self, id: ElementId, position: CanvasPoint) {
        if let Some(element) = self.get_element_mut(id) {
            element.position = position.clamp_to_origin();
            self.events.push(EditorEvent::ContentChanged);
        }
    }

    // === Text editing ===

    /// Enter inline text-edit mode (double-activation on a text element).
    /// Dragging that element is suspended until the edit ends.
    pub fn begin_text_edit(&mut self, id: ElementId) {
        let Some(element) = self.get_element(id) else {
            return;
        };
        if element.kind != ElementKind::Text {
            return;
        }
        self.select(Some(id));
        self.editing_text = Some(id);
    }

    /// Apply text as it is typed. Valid only for text elements; content is
    /// applied live, so there is nothing to roll back on cancel.
    pub fn edit_text(&mut self, id: ElementId, text: impl Into<String>) {
        let Some(element) = self.get_element_mut(id) else {
            return;
        };
        if element.kind != ElementKind::Text {
            return;
        }
        element.content = text.into();
        self.events.push(EditorEvent::ContentChanged);
    }

    /// Exit edit mode. Commit (blur/confirm) and cancel behave the same:
    /// typed content has already been applied.
    pub fn end_text_edit(&mut self) {
        self.editing_text = None;
    }

    // === Structural edits ===

    /// Remove an element. Selection, drag, and text-edit state pointing at
    /// it are cleared.
    pub fn delete(&mut self, id: ElementId) {
        let Some(index) = self.elements.iter().position(|el| el.id == id) else {
            return;
        };
        self.elements.remove(index);
        if self.selection == Some(id) {
            self.selection = None;
            self.events.push(EditorEvent::SelectionChanged);
        }
        if matches!(self.drag, Some(DragState::MovingElement { id: d, .. }) if d == id) {
            self.drag = None;
        }
        if self.editing_text == Some(id) {
            self.editing_text = None;
        }
        self.events.push(EditorEvent::ElementRemoved(id));
        self.events.push(EditorEvent::ContentChanged);
    }

    /// Clone an element with a fresh id, offset by +20,+20 logical pixels.
    /// The duplicate becomes the selection.
    pub fn duplicate(&mut self, id: ElementId) -> Option<ElementId> {
        let mut copy = self.get_element(id)?.clone();
        copy.id = ElementId::new();
        copy.translate(DUPLICATE_OFFSET);
        Some(self.push_element(copy))
    }

    // === Zoom ===

    pub fn set_zoom(&mut self, factor: f32) {
        self.viewport.set_zoom(factor);
        self.events.push(EditorEvent::ZoomChanged);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
        self.events.push(EditorEvent::ZoomChanged);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
        self.events.push(EditorEvent::ZoomChanged);
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset();
        self.events.push(EditorEvent::ZoomChanged);
    }

    // === Saving ===

    /// Package the current element list as a new activity. The caller owns
    /// the result; the canvas keeps its working copy.
    pub fn save_as_activity(
        &self,
        title: &str,
        kind: ActivityKind,
        language: Language,
        author_id: &str,
    ) -> Result<Activity> {
        let title = title.trim();
        if title.is_empty() {
            bail!("please enter an activity title");
        }
        Ok(Activity::new(
            title,
            kind,
            language,
            author_id,
            self.elements.clone(),
        ))
    }
}
