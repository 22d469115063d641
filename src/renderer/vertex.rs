//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (canvas pixels) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Map canvas pixels (y down) to normalized device coordinates (y up)
    pub fn to_ndc(&self, width: f32, height: f32) -> Self {
        let x = self.position[0] / width * 2.0 - 1.0;
        let y = 1.0 - self.position[1] / height * 2.0;
        Self::new(x, y, self.color)
    }
}

/// Colors for scene elements
pub mod colors {
    use crate::sim::Color;

    pub const PLAYER_IDLE: Color = Color(0xffffff);
    pub const PLAYER_MOVING: Color = Color(0x00ff00);

    pub const EXIT: Color = Color(0x00ffff);
    pub const EXIT_ALPHA: f32 = 0.35;
    pub const EXIT_HOVER_ALPHA: f32 = 0.8;

    pub const PUZZLE: Color = Color(0xff00ff);
    pub const PUZZLE_ALPHA: f32 = 1.0;
    pub const PUZZLE_HOVER_ALPHA: f32 = 0.7;

    pub const STRUCTURE_FRAME: Color = Color(0x00ff00);
    pub const STRUCTURE_PANEL: Color = Color(0x00aa00);
    pub const CORRUPTED_BLOCK: Color = Color(0x880088);
    pub const DATA_STREAM: Color = Color(0x00ffff);
    pub const STATIC_NOISE: Color = Color(0x555555);

    pub const OVERLAY: Color = Color(0xffffff);
}
