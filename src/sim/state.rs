//! Scene and player state
//!
//! Logical state only: nothing here owns drawing resources.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::CanvasSize;
use crate::consts::PLAYER_SIZE;

/// Sub-state of the active room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenePhase {
    /// Geometry rebuilt, first tick not yet run; pointer input is ignored
    Entering,
    /// Room is interactive
    Active,
    /// Scene released; every call is a no-op
    TornDown,
}

/// Marker tint, derived from velocity each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerTint {
    Idle,
    Moving,
}

/// The player's marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Center of the marker in canvas pixels
    pub position: Vec2,
    /// Pixels per second
    pub velocity: Vec2,
    /// Marker edge lengths in pixels
    pub size: Vec2,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(PLAYER_SIZE)
    }
}

impl PlayerState {
    pub fn new(size: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            size: Vec2::splat(size),
        }
    }

    /// Bounding box in canvas pixels
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, self.size)
    }

    pub fn tint(&self) -> MarkerTint {
        if self.velocity == Vec2::ZERO {
            MarkerTint::Idle
        } else {
            MarkerTint::Moving
        }
    }

    /// Move to the canvas midpoint and stop
    pub fn recenter(&mut self, canvas: CanvasSize) {
        self.position = canvas.center();
        self.velocity = Vec2::ZERO;
    }

    /// Keep the bounding box inside the canvas.
    ///
    /// A canvas smaller than the marker pins it to the center on that axis.
    pub fn clamp_to(&mut self, canvas: CanvasSize) {
        let half = self.size / 2.0;
        self.position.x = clamp_axis(self.position.x, half.x, canvas.width);
        self.position.y = clamp_axis(self.position.y, half.y, canvas.height);
    }
}

fn clamp_axis(v: f32, half: f32, extent: f32) -> f32 {
    if extent <= half * 2.0 {
        extent / 2.0
    } else {
        v.clamp(half, extent - half)
    }
}
