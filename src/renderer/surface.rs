//! Drawing surface abstraction
//!
//! Scene code only talks to [`DrawSurface`]; whether the commands end up in a
//! GPU vertex buffer, a canvas 2D context or a test recorder is the host's
//! business. [`DisplayList`] is the in-crate implementation: it records
//! commands per layer and tessellates them into vertices on demand.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;
use crate::sim::{Color, Rect};

/// Segments used to flatten a quadratic curve
pub const CURVE_SEGMENTS: usize = 16;

/// Draw layers, bottom to top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// Procedural room geometry
    Room,
    /// Exit affordances and the puzzle panel
    Interactive,
    /// Player marker
    Player,
    /// Decay corruption
    Overlay,
}

impl Layer {
    pub const ALL: [Layer; 4] = [Layer::Room, Layer::Interactive, Layer::Player, Layer::Overlay];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// How a layer composites over the layers below it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Alpha,
    /// Brightening blend for glitch effects
    Screen,
}

/// Line/fill styling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub alpha: f32,
    /// Stroke width in pixels (ignored for fills)
    pub width: f32,
}

impl Paint {
    pub fn fill(color: Color, alpha: f32) -> Self {
        Self {
            color,
            alpha,
            width: 0.0,
        }
    }

    pub fn stroke(width: f32, color: Color, alpha: f32) -> Self {
        Self { color, alpha, width }
    }

    #[inline]
    pub fn rgba(&self) -> [f32; 4] {
        self.color.rgba(self.alpha)
    }
}

/// A single recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, paint: Paint },
    StrokeRect { rect: Rect, paint: Paint },
    Line { from: Vec2, to: Vec2, paint: Paint },
    Polyline { points: Vec<Vec2>, paint: Paint },
}

/// Target for all drawing
pub trait DrawSurface {
    fn set_background(&mut self, color: Color);

    /// Drop everything drawn on a layer
    fn clear_layer(&mut self, layer: Layer);

    fn set_blend(&mut self, layer: Layer, blend: BlendMode);

    fn draw(&mut self, layer: Layer, command: DrawCommand);

    fn fill_rect(&mut self, layer: Layer, rect: Rect, paint: Paint) {
        self.draw(layer, DrawCommand::FillRect { rect, paint });
    }

    fn stroke_rect(&mut self, layer: Layer, rect: Rect, paint: Paint) {
        self.draw(layer, DrawCommand::StrokeRect { rect, paint });
    }

    fn line(&mut self, layer: Layer, from: Vec2, to: Vec2, paint: Paint) {
        self.draw(layer, DrawCommand::Line { from, to, paint });
    }

    /// Quadratic Bezier, flattened into a polyline
    fn quad_curve(&mut self, layer: Layer, from: Vec2, ctrl: Vec2, to: Vec2, paint: Paint) {
        let points = (0..=CURVE_SEGMENTS)
            .map(|i| {
                let t = i as f32 / CURVE_SEGMENTS as f32;
                let u = 1.0 - t;
                from * (u * u) + ctrl * (2.0 * u * t) + to * (t * t)
            })
            .collect();
        self.draw(layer, DrawCommand::Polyline { points, paint });
    }
}

#[derive(Debug, Clone, Default)]
struct LayerList {
    blend: BlendMode,
    commands: Vec<DrawCommand>,
    clears: u32,
}

/// Triangles for one layer, ready for upload
#[derive(Debug, Clone)]
pub struct LayerBatch {
    pub layer: Layer,
    pub blend: BlendMode,
    pub vertices: Vec<Vertex>,
}

/// Recording surface
#[derive(Debug, Clone)]
pub struct DisplayList {
    background: Color,
    layers: [LayerList; 4],
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayList {
    pub fn new() -> Self {
        Self {
            background: Color::BLACK,
            layers: Default::default(),
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn commands(&self, layer: Layer) -> &[DrawCommand] {
        &self.layers[layer.index()].commands
    }

    pub fn primitive_count(&self, layer: Layer) -> usize {
        self.layers[layer.index()].commands.len()
    }

    pub fn blend(&self, layer: Layer) -> BlendMode {
        self.layers[layer.index()].blend
    }

    /// How many times a layer has been cleared
    pub fn clear_count(&self, layer: Layer) -> u32 {
        self.layers[layer.index()].clears
    }

    /// Tessellate every non-empty layer, bottom to top
    pub fn tessellate(&self) -> Vec<LayerBatch> {
        Layer::ALL
            .iter()
            .filter_map(|&layer| {
                let list = &self.layers[layer.index()];
                if list.commands.is_empty() {
                    return None;
                }
                let vertices = list.commands.iter().flat_map(shapes::tessellate).collect();
                Some(LayerBatch {
                    layer,
                    blend: list.blend,
                    vertices,
                })
            })
            .collect()
    }
}

impl DrawSurface for DisplayList {
    fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    fn clear_layer(&mut self, layer: Layer) {
        let list = &mut self.layers[layer.index()];
        list.commands.clear();
        list.blend = BlendMode::Alpha;
        list.clears += 1;
    }

    fn set_blend(&mut self, layer: Layer, blend: BlendMode) {
        self.layers[layer.index()].blend = blend;
    }

    fn draw(&mut self, layer: Layer, command: DrawCommand) {
        self.layers[layer.index()].commands.push(command);
    }
}
