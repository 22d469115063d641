//! Shape generation for 2D primitives

use glam::Vec2;

use super::surface::{DrawCommand, Paint};
use super::vertex::Vertex;
use crate::sim::Rect;

/// Minimum stroke width so hairlines still produce visible triangles
const MIN_STROKE: f32 = 1.0;

/// Triangles for a recorded command
pub fn tessellate(command: &DrawCommand) -> Vec<Vertex> {
    match command {
        DrawCommand::FillRect { rect, paint } => filled_rect(rect, paint.rgba()),
        DrawCommand::StrokeRect { rect, paint } => stroked_rect(rect, paint),
        DrawCommand::Line { from, to, paint } => segment(*from, *to, paint.width, paint.rgba()),
        DrawCommand::Polyline { points, paint } => polyline(points, paint),
    }
}

/// Generate vertices for a filled rectangle
pub fn filled_rect(rect: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0, x1, y1) = (rect.x, rect.y, rect.right(), rect.bottom());

    // Two triangles
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a rectangle outline, stroke centered on the edges
pub fn stroked_rect(rect: &Rect, paint: &Paint) -> Vec<Vertex> {
    let w = paint.width.max(MIN_STROKE);
    let half = w / 2.0;
    let color = paint.rgba();
    let outer = rect.inset(-half);

    let mut vertices = Vec::with_capacity(24);
    // Top and bottom bands span the full outer width
    vertices.extend(filled_rect(&Rect::new(outer.x, outer.y, outer.w, w), color));
    vertices.extend(filled_rect(
        &Rect::new(outer.x, outer.bottom() - w, outer.w, w),
        color,
    ));
    // Left and right bands fill the gap between them
    let side_h = (outer.h - 2.0 * w).max(0.0);
    vertices.extend(filled_rect(&Rect::new(outer.x, outer.y + w, w, side_h), color));
    vertices.extend(filled_rect(
        &Rect::new(outer.right() - w, outer.y + w, w, side_h),
        color,
    ));
    vertices
}

/// Generate vertices for a thick line segment
pub fn segment(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width.max(MIN_STROKE) / 2.0);

    let a1 = from + perp;
    let b1 = from - perp;
    let a2 = to + perp;
    let b2 = to - perp;

    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// Generate vertices for a connected run of segments
pub fn polyline(points: &[Vec2], paint: &Paint) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }
    let color = paint.rgba();
    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);
    for pair in points.windows(2) {
        vertices.extend(segment(pair[0], pair[1], paint.width, color));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Color;

    #[test]
    fn test_filled_rect_covers_corners() {
        let verts = filled_rect(&Rect::new(10.0, 20.0, 30.0, 40.0), [1.0; 4]);
        assert_eq!(verts.len(), 6);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_stroked_rect_has_four_bands() {
        let paint = Paint::stroke(4.0, Color::WHITE, 1.0);
        let verts = stroked_rect(&Rect::new(0.0, 0.0, 100.0, 50.0), &paint);
        assert_eq!(verts.len(), 24);
        // Stroke is centered on the edge
        let min_x = verts.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        assert_eq!(min_x, -2.0);
    }

    #[test]
    fn test_segment_width() {
        let verts = segment(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 2.0, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        let max_y = verts.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert_eq!(max_y, 1.0);

        assert!(segment(Vec2::ONE, Vec2::ONE, 2.0, [1.0; 4]).is_empty());
    }

    #[test]
    fn test_polyline_segments() {
        let paint = Paint::stroke(1.0, Color::WHITE, 1.0);
        let points = [Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
        assert_eq!(polyline(&points, &paint).len(), 12);
        assert!(polyline(&points[..1], &paint).is_empty());
    }
}
