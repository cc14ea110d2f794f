use glam::Vec2;
use model::{CanvasPoint, CanvasSize, ScreenPoint};

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f32 = 0.5;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f32 = 2.0;

/// Zoom change per in/out step.
pub const ZOOM_STEP: f32 = 0.1;

/// Rendered font sizes never go below this, so text stays legible at
/// minimum zoom.
pub const MIN_FONT_PX: f32 = 8.0;

/// Zoom state for the canvas.
///
/// Zoom is a rendering-only transform: it scales the conversion between
/// canvas space and screen space and never touches stored geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom factor, clamped to [`MIN_ZOOM`], [`MAX_ZOOM`].
    pub fn set_zoom(&mut self, factor: f32) {
        self.zoom = factor.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Back to 1.0x.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
    }

    /// Convert a canvas-space point to screen space.
    pub fn canvas_to_screen(&self, point: CanvasPoint) -> ScreenPoint {
        ScreenPoint(point.0 * self.zoom)
    }

    /// Convert a screen-space point back to canvas space.
    pub fn screen_to_canvas(&self, point: ScreenPoint) -> CanvasPoint {
        CanvasPoint(point.0 / self.zoom)
    }

    /// Rendered (zoomed) size for a canvas-space size.
    pub fn scaled_size(&self, size: CanvasSize) -> Vec2 {
        size.0 * self.zoom
    }

    /// Rendered font size, floored for legibility.
    pub fn scaled_font_size(&self, base: f32) -> f32 {
        (base * self.zoom).max(MIN_FONT_PX)
    }
}
