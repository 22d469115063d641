//! Axis-aligned rectangles for exits, the puzzle panel and the player marker
//!
//! Two coordinate spaces are in play:
//! - relative: fractions of the canvas in [0, 1], used by room descriptors
//! - pixel: canvas pixels, used for everything that is hit-tested or drawn

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::CanvasSize;

/// Pixel-space rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Grow the rectangle by `dx` in width and `dy` in height, keeping its center
    pub fn expanded(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x - dx / 2.0, self.y - dy / 2.0, self.w + dx, self.h + dy)
    }

    /// Overlap test; shared edges count as overlap
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || self.bottom() < other.y
            || self.x > other.right()
            || self.y > other.bottom())
    }

    /// Point containment, edges inclusive
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Shrink by `amount` on every side (never below zero size)
    pub fn inset(&self, amount: f32) -> Self {
        let w = (self.w - 2.0 * amount).max(0.0);
        let h = (self.h - 2.0 * amount).max(0.0);
        Self::new(self.x + (self.w - w) / 2.0, self.y + (self.h - h) / 2.0, w, h)
    }
}

/// Canvas-relative rectangle, every component in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RelRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// True when every component is finite and inside [0, 1]
    pub fn is_normalized(&self) -> bool {
        [self.x, self.y, self.w, self.h]
            .iter()
            .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
    }

    /// Anchor point in pixels
    pub fn anchor_px(&self, canvas: CanvasSize) -> Vec2 {
        Vec2::new(self.x * canvas.width, self.y * canvas.height)
    }

    /// Size in pixels
    pub fn size_px(&self, canvas: CanvasSize) -> Vec2 {
        Vec2::new(self.w * canvas.width, self.h * canvas.height)
    }
}
