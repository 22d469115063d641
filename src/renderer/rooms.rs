//! Procedural room patterns
//!
//! Each variant draws a fixed number of shapes; only their placement comes
//! from the generator.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::surface::{DrawSurface, Layer, Paint};
use super::vertex::colors;
use crate::CanvasSize;
use crate::sim::{DrawVariant, Rect};

/// Structured rooms: frame covers this fraction of the canvas
pub const FRAME_FRACTION: f32 = 0.7;
/// Structured rooms: inset of the nested panel inside the frame (pixels)
pub const PANEL_INSET: f32 = 50.0;
/// Structured rooms: small panels scattered inside the nested panel
pub const STRUCTURED_PANELS: usize = 4;

/// Corrupted rooms: scattered rectangles
pub const CORRUPTED_BLOCKS: usize = 30;
/// Corrupted rooms: data-stream streaks
pub const CORRUPTED_STREAKS: usize = 7;

/// Empty rooms: faint noise lines
pub const EMPTY_NOISE_LINES: usize = 100;

/// Number of primitives a variant draws
pub fn shape_count(variant: DrawVariant) -> usize {
    match variant {
        DrawVariant::Structured => 2 + STRUCTURED_PANELS,
        DrawVariant::Corrupted => CORRUPTED_BLOCKS + CORRUPTED_STREAKS,
        DrawVariant::Empty => EMPTY_NOISE_LINES,
    }
}

/// Draw a variant onto the room layer
pub fn paint(
    variant: DrawVariant,
    surface: &mut (impl DrawSurface + ?Sized),
    canvas: CanvasSize,
    rng: &mut Pcg32,
) {
    match variant {
        DrawVariant::Structured => paint_structured(surface, canvas, rng),
        DrawVariant::Corrupted => paint_corrupted(surface, canvas, rng),
        DrawVariant::Empty => paint_empty(surface, canvas, rng),
    }
}

/// Outer frame of a structured room
pub fn structured_frame(canvas: CanvasSize) -> Rect {
    let w = canvas.width * FRAME_FRACTION;
    let h = canvas.height * FRAME_FRACTION;
    Rect::new((canvas.width - w) / 2.0, (canvas.height - h) / 2.0, w, h)
}

fn paint_structured(
    surface: &mut (impl DrawSurface + ?Sized),
    canvas: CanvasSize,
    rng: &mut Pcg32,
) {
    let frame = structured_frame(canvas);
    surface.stroke_rect(Layer::Room, frame, Paint::stroke(4.0, colors::STRUCTURE_FRAME, 1.0));

    let inner = frame.inset(PANEL_INSET);
    surface.stroke_rect(Layer::Room, inner, Paint::stroke(2.0, colors::STRUCTURE_PANEL, 0.8));

    // Small panels somewhere inside the nested one
    for _ in 0..STRUCTURED_PANELS {
        let w = rng.random_range(0.1..=0.25) * inner.w;
        let h = rng.random_range(0.1..=0.25) * inner.h;
        let x = inner.x + rng.random_range(0.0..=1.0) * (inner.w - w);
        let y = inner.y + rng.random_range(0.0..=1.0) * (inner.h - h);
        surface.stroke_rect(
            Layer::Room,
            Rect::new(x, y, w, h),
            Paint::stroke(1.0, colors::STRUCTURE_PANEL, 0.5),
        );
    }
}

fn paint_corrupted(
    surface: &mut (impl DrawSurface + ?Sized),
    canvas: CanvasSize,
    rng: &mut Pcg32,
) {
    let block = Paint::stroke(2.0, colors::CORRUPTED_BLOCK, 0.7);
    let max_x = (canvas.width - 50.0).max(0.0);
    let max_y = (canvas.height - 50.0).max(0.0);
    for _ in 0..CORRUPTED_BLOCKS {
        let rect = Rect::new(
            rng.random_range(0.0..=max_x),
            rng.random_range(0.0..=max_y),
            rng.random_range(20.0..=100.0),
            rng.random_range(20.0..=100.0),
        );
        surface.stroke_rect(Layer::Room, rect, block);
    }

    let stream = Paint::stroke(1.0, colors::DATA_STREAM, 0.5);
    for _ in 0..CORRUPTED_STREAKS {
        let from = Vec2::new(0.0, rng.random_range(0.0..=canvas.height));
        let ctrl = Vec2::new(
            rng.random_range(canvas.width * 0.2..=canvas.width * 0.8),
            rng.random_range(0.0..=canvas.height),
        );
        let to = Vec2::new(canvas.width, rng.random_range(0.0..=canvas.height));
        surface.quad_curve(Layer::Room, from, ctrl, to, stream);
    }
}

fn paint_empty(
    surface: &mut (impl DrawSurface + ?Sized),
    canvas: CanvasSize,
    rng: &mut Pcg32,
) {
    let noise = Paint::stroke(1.0, colors::STATIC_NOISE, 0.1);
    for _ in 0..EMPTY_NOISE_LINES {
        let from = random_point(rng, canvas);
        let to = random_point(rng, canvas);
        surface.line(Layer::Room, from, to, noise);
    }
}

fn random_point(rng: &mut Pcg32, canvas: CanvasSize) -> Vec2 {
    Vec2::new(
        rng.random_range(0.0..=canvas.width),
        rng.random_range(0.0..=canvas.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::{DisplayList, DrawCommand};
    use rand::SeedableRng;

    fn draw(variant: DrawVariant, seed: u64, canvas: CanvasSize) -> DisplayList {
        let mut list = DisplayList::new();
        let mut rng = Pcg32::seed_from_u64(seed);
        paint(variant, &mut list, canvas, &mut rng);
        list
    }

    #[test]
    fn test_shape_counts_are_fixed() {
        let canvas = CanvasSize::new(800.0, 600.0);
        for variant in [DrawVariant::Structured, DrawVariant::Corrupted, DrawVariant::Empty] {
            for seed in [1, 2, 3] {
                let list = draw(variant, seed, canvas);
                assert_eq!(list.primitive_count(Layer::Room), shape_count(variant));
            }
        }
    }

    #[test]
    fn test_same_seed_same_geometry() {
        let canvas = CanvasSize::new(800.0, 600.0);
        let a = draw(DrawVariant::Corrupted, 42, canvas);
        let b = draw(DrawVariant::Corrupted, 42, canvas);
        let c = draw(DrawVariant::Corrupted, 43, canvas);
        assert_eq!(a.commands(Layer::Room), b.commands(Layer::Room));
        assert_ne!(a.commands(Layer::Room), c.commands(Layer::Room));
    }

    #[test]
    fn test_structured_panels_stay_inside_frame() {
        let canvas = CanvasSize::new(800.0, 600.0);
        let frame = structured_frame(canvas);
        assert_eq!(frame, Rect::new(120.0, 90.0, 560.0, 420.0));

        let inner = frame.inset(PANEL_INSET);
        let list = draw(DrawVariant::Structured, 9, canvas);
        for command in &list.commands(Layer::Room)[2..] {
            let DrawCommand::StrokeRect { rect, .. } = command else {
                panic!("structured panels are stroked rects");
            };
            assert!(rect.x >= inner.x - 1e-3 && rect.right() <= inner.right() + 1e-3);
            assert!(rect.y >= inner.y - 1e-3 && rect.bottom() <= inner.bottom() + 1e-3);
        }
    }

    #[test]
    fn test_tiny_canvas_does_not_panic() {
        let canvas = CanvasSize::new(1.0, 1.0);
        for variant in [DrawVariant::Structured, DrawVariant::Corrupted, DrawVariant::Empty] {
            let list = draw(variant, 5, canvas);
            assert_eq!(list.primitive_count(Layer::Room), shape_count(variant));
        }
    }
}
