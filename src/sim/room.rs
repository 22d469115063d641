//! Room descriptors: backgrounds, draw variants, exits and puzzle panels

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::{Rect, RelRect};
use crate::CanvasSize;

/// Opaque RGB color, serialized as `"#rrggbb"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xffffff);

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        u32::from_str_radix(hex, 16).ok().map(Color)
    }

    /// Linear RGBA with the given alpha, for vertex colors
    pub fn rgba(&self, alpha: f32) -> [f32; 4] {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        [r, g, b, alpha.clamp(0.0, 1.0)]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0xffffff)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse(&s).ok_or_else(|| format!("invalid color '{}', expected #rrggbb", s))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// Procedural pattern used to draw a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawVariant {
    /// Bordered frame with nested panels
    Structured,
    /// Scattered rectangles and data-stream streaks
    Corrupted,
    /// Sparse, faint line noise
    Empty,
}

impl DrawVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawVariant::Structured => "structured",
            DrawVariant::Corrupted => "corrupted",
            DrawVariant::Empty => "empty",
        }
    }
}

/// Edge an exit is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
    /// Free-floating; not snapped to any edge
    Secret,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Secret => "secret",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed, proximity-gated connection to another room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exit {
    pub direction: Direction,
    pub target_room_id: String,
    /// Anchor (x, y) on the declared edge plus size (w, h), canvas-relative
    pub rect: RelRect,
}

impl Exit {
    pub fn new(direction: Direction, target: &str, rect: RelRect) -> Self {
        Self {
            direction,
            target_room_id: target.to_string(),
            rect,
        }
    }

    /// Pixel bounds for the given canvas.
    ///
    /// The anchor is the center of the affordance; it is then pushed inward by
    /// half its own thickness so the outer side lies exactly on its edge.
    pub fn bounds(&self, canvas: CanvasSize) -> Rect {
        let size = self.rect.size_px(canvas);
        let mut center = self.rect.anchor_px(canvas);
        match self.direction {
            Direction::North => center.y += size.y / 2.0,
            Direction::South => center.y -= size.y / 2.0,
            Direction::West => center.x += size.x / 2.0,
            Direction::East => center.x -= size.x / 2.0,
            Direction::Secret => {}
        }
        Rect::centered(center, size)
    }
}

/// Puzzle panel declared by a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleSpec {
    pub id: String,
    pub target_room_id: String,
    /// Top-left corner, canvas-relative
    pub anchor: Vec2,
    /// Edge length in pixels
    pub size: f32,
}

impl PuzzleSpec {
    /// Pixel bounds for the given canvas
    pub fn bounds(&self, canvas: CanvasSize) -> Rect {
        Rect::new(
            self.anchor.x * canvas.width,
            self.anchor.y * canvas.height,
            self.size,
            self.size,
        )
    }
}

/// A navigable room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub background_color: Color,
    pub draw_variant: DrawVariant,
    #[serde(default)]
    pub exits: Vec<Exit>,
    #[serde(default)]
    pub puzzle: Option<PuzzleSpec>,
}

impl Room {
    pub fn new(id: &str, background_color: Color, draw_variant: DrawVariant) -> Self {
        Self {
            id: id.to_string(),
            background_color,
            draw_variant,
            exits: Vec::new(),
            puzzle: None,
        }
    }

    pub fn with_exit(mut self, exit: Exit) -> Self {
        self.exits.push(exit);
        self
    }

    pub fn with_puzzle(mut self, puzzle: PuzzleSpec) -> Self {
        self.puzzle = Some(puzzle);
        self
    }

    /// Every room id this room can lead to (exits first, then the puzzle)
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.exits
            .iter()
            .map(|e| e.target_room_id.as_str())
            .chain(self.puzzle.iter().map(|p| p.target_room_id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_and_display() {
        assert_eq!(Color::parse("#1a1a1a"), Some(Color(0x1a1a1a)));
        assert_eq!(Color::parse("330033"), Some(Color(0x330033)));
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("#zzzzzz"), None);
        assert_eq!(Color(0x00ff00).to_string(), "#00ff00");
    }

    #[test]
    fn test_color_rgba() {
        let [r, g, b, a] = Color(0xff0080).rgba(0.5);
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert!((b - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(a, 0.5);
    }

    #[test]
    fn test_exit_bounds_hug_edges() {
        let canvas = CanvasSize::new(800.0, 600.0);

        let north = Exit::new(Direction::North, "x", RelRect::new(0.5, 0.0, 0.1, 0.05));
        let b = north.bounds(canvas);
        assert_eq!(b.y, 0.0);
        assert_eq!(b.h, 30.0);
        assert_eq!(b.center().x, 400.0);

        let south = Exit::new(Direction::South, "x", RelRect::new(0.5, 1.0, 0.1, 0.05));
        assert_eq!(south.bounds(canvas).bottom(), 600.0);

        let east = Exit::new(Direction::East, "x", RelRect::new(1.0, 0.5, 0.05, 0.1));
        assert_eq!(east.bounds(canvas).right(), 800.0);

        let west = Exit::new(Direction::West, "x", RelRect::new(0.0, 0.5, 0.05, 0.1));
        assert_eq!(west.bounds(canvas).x, 0.0);

        let secret = Exit::new(Direction::Secret, "x", RelRect::new(0.25, 0.25, 0.05, 0.05));
        assert_eq!(secret.bounds(canvas).center(), Vec2::new(200.0, 150.0));
    }

    #[test]
    fn test_room_json_shape() {
        let room = Room::new("hall", Color(0x1a1a1a), DrawVariant::Structured).with_exit(
            Exit::new(Direction::East, "vault", RelRect::new(1.0, 0.5, 0.04, 0.2)),
        );
        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["backgroundColor"], "#1a1a1a");
        assert_eq!(json["drawVariant"], "structured");
        assert_eq!(json["exits"][0]["targetRoomId"], "vault");
        assert_eq!(json["exits"][0]["direction"], "east");

        let back: Room = serde_json::from_value(json).unwrap();
        assert_eq!(back, room);
    }

    #[test]
    fn test_room_targets() {
        let room = Room::new("a", Color::BLACK, DrawVariant::Empty)
            .with_exit(Exit::new(Direction::West, "b", RelRect::new(0.0, 0.5, 0.05, 0.2)))
            .with_puzzle(PuzzleSpec {
                id: "p".into(),
                target_room_id: "c".into(),
                anchor: Vec2::new(0.5, 0.5),
                size: 60.0,
            });
        let targets: Vec<&str> = room.targets().collect();
        assert_eq!(targets, vec!["b", "c"]);
    }
}
