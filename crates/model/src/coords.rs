//! Type-safe coordinate spaces.
//!
//! Distinct types for the two coordinate systems keep zoom math honest:
//!
//! - **Canvas space**: unzoomed logical pixels where elements live
//! - **Screen space**: rendered pixels after the zoom transform
//!
//! Zoom only ever affects conversions between the two; stored element
//! geometry stays in canvas space.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Position in canvas space (top-left origin, unzoomed logical pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPoint(pub Vec2);

/// Position in screen space (pixels relative to the canvas origin after zoom).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint(pub Vec2);

/// Size in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasSize(pub Vec2);

/// Movement/offset in canvas space (a change, not a position).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasDelta(pub Vec2);

// === CanvasPoint ===

impl CanvasPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }

    /// Clamp both axes to be non-negative.
    pub fn clamp_to_origin(self) -> Self {
        Self(self.0.max(Vec2::ZERO))
    }
}

impl From<Vec2> for CanvasPoint {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<CanvasPoint> for Vec2 {
    fn from(p: CanvasPoint) -> Self {
        p.0
    }
}

impl Add<CanvasDelta> for CanvasPoint {
    type Output = CanvasPoint;

    fn add(self, delta: CanvasDelta) -> Self::Output {
        CanvasPoint(self.0 + delta.0)
    }
}

impl Sub for CanvasPoint {
    type Output = CanvasDelta;

    /// Subtracting two points gives a delta.
    fn sub(self, other: CanvasPoint) -> Self::Output {
        CanvasDelta(self.0 - other.0)
    }
}

// === ScreenPoint ===

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }
}

impl From<Vec2> for ScreenPoint {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<ScreenPoint> for Vec2 {
    fn from(p: ScreenPoint) -> Self {
        p.0
    }
}

impl Sub for ScreenPoint {
    type Output = ScreenPoint;

    fn sub(self, other: ScreenPoint) -> Self::Output {
        ScreenPoint(self.0 - other.0)
    }
}

// === CanvasSize ===

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self(Vec2::new(width, height))
    }

    pub fn width(&self) -> f32 {
        self.0.x
    }

    pub fn height(&self) -> f32 {
        self.0.y
    }
}

impl From<Vec2> for CanvasSize {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<CanvasSize> for Vec2 {
    fn from(s: CanvasSize) -> Self {
        s.0
    }
}

// === CanvasDelta ===

impl CanvasDelta {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self(Vec2::new(dx, dy))
    }

    pub fn dx(&self) -> f32 {
        self.0.x
    }

    pub fn dy(&self) -> f32 {
        self.0.y
    }
}

impl From<Vec2> for CanvasDelta {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<CanvasDelta> for Vec2 {
    fn from(d: CanvasDelta) -> Self {
        d.0
    }
}

impl Add for CanvasDelta {
    type Output = CanvasDelta;

    fn add(self, other: CanvasDelta) -> Self::Output {
        CanvasDelta(self.0 + other.0)
    }
}
