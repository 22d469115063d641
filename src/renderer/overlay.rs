//! Decay corruption overlay
//!
//! Drawn on its own layer so decay changes never touch room geometry.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::surface::{BlendMode, DrawSurface, Layer, Paint};
use super::vertex::colors;
use crate::CanvasSize;
use crate::consts::{OVERLAY_PARTICLES_PER_UNIT, OVERLAY_SCANLINES_PER_UNIT};
use crate::sim::Rect;

/// Particle edge length range (pixels)
const PARTICLE_MIN: f32 = 1.0;
const PARTICLE_MAX: f32 = 15.0;
/// Particle alpha per unit of decay
const PARTICLE_ALPHA: f32 = 0.05;

/// Scanline vertical jitter (pixels, each way)
const SCANLINE_JITTER: f32 = 2.0;
/// Scanline alpha per unit of decay
const SCANLINE_ALPHA: f32 = 0.3;

/// Primitive counts from the last overlay pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayStats {
    pub particles: usize,
    pub scanlines: usize,
}

impl OverlayStats {
    pub fn total(&self) -> usize {
        self.particles + self.scanlines
    }
}

/// Particle and scanline counts for a decay level
pub fn overlay_counts(decay: f32) -> OverlayStats {
    if !decay.is_finite() || decay <= 0.0 {
        return OverlayStats::default();
    }
    let decay = decay.min(1.0);
    OverlayStats {
        particles: scaled_count(decay, OVERLAY_PARTICLES_PER_UNIT),
        scanlines: scaled_count(decay, OVERLAY_SCANLINES_PER_UNIT),
    }
}

// ceil() with a small tolerance so 0.3 * 100 does not round up to 31
fn scaled_count(decay: f32, per_unit: f32) -> usize {
    ((decay * per_unit) - 1e-3).ceil().max(0.0) as usize
}

/// Clear the overlay layer and redraw it for the given decay
pub fn paint_overlay(
    surface: &mut (impl DrawSurface + ?Sized),
    canvas: CanvasSize,
    decay: f32,
    rng: &mut Pcg32,
) -> OverlayStats {
    surface.clear_layer(Layer::Overlay);

    let stats = overlay_counts(decay);
    if stats.total() == 0 {
        return stats;
    }
    let decay = decay.min(1.0);
    surface.set_blend(Layer::Overlay, BlendMode::Screen);

    let particle = Paint::fill(colors::OVERLAY, decay * PARTICLE_ALPHA);
    for _ in 0..stats.particles {
        let size = rng.random_range(PARTICLE_MIN..=PARTICLE_MAX);
        let rect = Rect::new(
            rng.random_range(0.0..=canvas.width),
            rng.random_range(0.0..=canvas.height),
            size,
            size,
        );
        surface.fill_rect(Layer::Overlay, rect, particle);
    }

    let scanline = Paint::stroke(1.0, colors::OVERLAY, decay * SCANLINE_ALPHA);
    for _ in 0..stats.scanlines {
        let y = rng.random_range(0.0..=canvas.height);
        let jitter = rng.random_range(-SCANLINE_JITTER..=SCANLINE_JITTER);
        surface.line(
            Layer::Overlay,
            Vec2::new(0.0, y),
            Vec2::new(canvas.width, y + jitter),
            scanline,
        );
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::DisplayList;
    use rand::SeedableRng;

    #[test]
    fn test_counts() {
        assert_eq!(overlay_counts(0.0), OverlayStats::default());
        assert_eq!(overlay_counts(-0.5), OverlayStats::default());
        assert_eq!(overlay_counts(f32::NAN), OverlayStats::default());
        assert_eq!(
            overlay_counts(0.3),
            OverlayStats {
                particles: 30,
                scanlines: 6
            }
        );
        assert_eq!(
            overlay_counts(0.001),
            OverlayStats {
                particles: 1,
                scanlines: 1
            }
        );
        assert_eq!(overlay_counts(2.0), overlay_counts(1.0));
    }

    #[test]
    fn test_zero_decay_clears_layer() {
        let mut list = DisplayList::new();
        let mut rng = Pcg32::seed_from_u64(1);
        let canvas = CanvasSize::default();

        paint_overlay(&mut list, canvas, 0.5, &mut rng);
        assert!(list.primitive_count(Layer::Overlay) > 0);
        assert_eq!(list.blend(Layer::Overlay), BlendMode::Screen);

        let stats = paint_overlay(&mut list, canvas, 0.0, &mut rng);
        assert_eq!(stats.total(), 0);
        assert_eq!(list.primitive_count(Layer::Overlay), 0);
    }

    #[test]
    fn test_overlay_leaves_room_layer_alone() {
        let mut list = DisplayList::new();
        list.fill_rect(
            Layer::Room,
            Rect::new(0.0, 0.0, 5.0, 5.0),
            Paint::fill(colors::OVERLAY, 1.0),
        );
        let mut rng = Pcg32::seed_from_u64(2);
        paint_overlay(&mut list, CanvasSize::default(), 0.4, &mut rng);
        assert_eq!(list.primitive_count(Layer::Room), 1);
        assert_eq!(list.clear_count(Layer::Room), 0);
    }

    #[test]
    fn test_count_grows_with_decay() {
        let mut list = DisplayList::new();
        let mut rng = Pcg32::seed_from_u64(3);
        let low = paint_overlay(&mut list, CanvasSize::default(), 0.2, &mut rng);
        let high = paint_overlay(&mut list, CanvasSize::default(), 0.6, &mut rng);
        assert!(high.total() > low.total());
        assert_eq!(list.primitive_count(Layer::Overlay), high.total());
    }
}
