//! Oracle Ruins - room-graph exploration core
//!
//! Core modules:
//! - `sim`: Deterministic navigation logic (room graph, input, decay, events)
//! - `scene`: Room-graph state machine driving the renderer
//! - `renderer`: Procedural room drawing, interactive handles and the decay overlay
//! - `settings`: Tunables loaded from JSON
//! - `oracle`: Context handed to the narrative text collaborator
//! - `game`: Facade exposing the host control surface

pub mod game;
pub mod oracle;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use game::{Game, SceneProps};
pub use scene::{SceneController, SceneError, TransitionOutcome};
pub use settings::{ConfigError, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation timestep (host render loop at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Canvas used until the host reports a real size
    pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 600.0;
    /// Smallest canvas dimension accepted from the host
    pub const MIN_CANVAS_DIM: f32 = 1.0;

    /// Player marker (square, pixels)
    pub const PLAYER_SIZE: f32 = 20.0;
    /// Player speed in pixels per second
    pub const PLAYER_SPEED: f32 = 200.0;

    /// Exit hit boxes grow by this fraction of the player's size per dimension
    pub const EXIT_PADDING: f32 = 1.4;

    /// Decay added per host decay tick
    pub const DECAY_STEP: f32 = 0.005;
    /// Default ascending decay thresholds
    pub const DECAY_THRESHOLDS: [f32; 2] = [0.3, 0.6];

    /// Puzzle panel edge length (pixels)
    pub const PUZZLE_SIZE: f32 = 60.0;

    /// Overlay primitives per unit of decay
    pub const OVERLAY_PARTICLES_PER_UNIT: f32 = 100.0;
    pub const OVERLAY_SCANLINES_PER_UNIT: f32 = 20.0;
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: consts::DEFAULT_CANVAS_WIDTH,
            height: consts::DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl CanvasSize {
    /// Build a canvas size, clamping degenerate host values
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize_dim(width),
            height: sanitize_dim(height),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

fn sanitize_dim(v: f32) -> f32 {
    if v.is_finite() {
        v.max(consts::MIN_CANVAS_DIM)
    } else {
        consts::MIN_CANVAS_DIM
    }
}

/// Clamp a host-provided unit value into [0, 1]; non-finite input yields None
#[inline]
pub fn clamp_unit(value: f32) -> Option<f32> {
    value.is_finite().then(|| value.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size_sanitizes() {
        let size = CanvasSize::new(0.0, f32::NAN);
        assert_eq!(size.width, consts::MIN_CANVAS_DIM);
        assert_eq!(size.height, consts::MIN_CANVAS_DIM);

        let size = CanvasSize::new(1024.0, 768.0);
        assert_eq!(size.center(), Vec2::new(512.0, 384.0));
    }

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(1.7), Some(1.0));
        assert_eq!(clamp_unit(-0.2), Some(0.0));
        assert_eq!(clamp_unit(0.42), Some(0.42));
        assert_eq!(clamp_unit(f32::INFINITY), None);
        assert_eq!(clamp_unit(f32::NAN), None);
    }
}
