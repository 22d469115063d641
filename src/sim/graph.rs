//! Static room registry
//!
//! Rooms are registered once at startup and never mutated afterwards.
//! Iteration order is by room id so every consumer sees the same sequence.

use std::collections::BTreeMap;

use glam::Vec2;
use thiserror::Error;

use super::rect::RelRect;
use super::room::{Color, Direction, DrawVariant, Exit, PuzzleSpec, Room};
use crate::consts::PUZZLE_SIZE;

/// Room every session starts in unless configured otherwise
pub const STARTING_ROOM: &str = "starting_chamber";

/// Id reported by the fallback room; never registered
pub const FALLBACK_ROOM_ID: &str = "__fallback__";

/// Room graph lookup and registration errors
#[derive(Debug, Error)]
pub enum RoomError {
    #[error("Room '{0}' not found")]
    NotFound(String),

    #[error("Room '{0}' registered twice")]
    DuplicateId(String),

    #[error("Room with empty id")]
    EmptyId,

    #[error("Room table is empty")]
    EmptyGraph,

    #[error("Room '{room}' leads to unknown room '{target}'")]
    DanglingTarget { room: String, target: String },

    #[error("Room '{room}' has a {direction} exit outside canvas-relative bounds")]
    InvalidExitRect { room: String, direction: Direction },

    #[error("Room '{room}' has a puzzle with invalid geometry")]
    InvalidPuzzle { room: String },

    #[error("Failed to parse room table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Registry mapping room ids to descriptors
#[derive(Debug, Clone)]
pub struct RoomGraph {
    rooms: BTreeMap<String, Room>,
    fallback: Room,
}

impl RoomGraph {
    /// Register a room table, validating ids, geometry and target closure
    pub fn new(rooms: Vec<Room>) -> Result<Self, RoomError> {
        if rooms.is_empty() {
            return Err(RoomError::EmptyGraph);
        }

        let mut map = BTreeMap::new();
        for room in rooms {
            if room.id.is_empty() {
                return Err(RoomError::EmptyId);
            }
            for exit in &room.exits {
                if !exit.rect.is_normalized() {
                    return Err(RoomError::InvalidExitRect {
                        room: room.id.clone(),
                        direction: exit.direction,
                    });
                }
            }
            if let Some(puzzle) = &room.puzzle {
                let anchor_ok = puzzle.anchor.is_finite()
                    && (0.0..=1.0).contains(&puzzle.anchor.x)
                    && (0.0..=1.0).contains(&puzzle.anchor.y);
                if !anchor_ok || !puzzle.size.is_finite() || puzzle.size <= 0.0 {
                    return Err(RoomError::InvalidPuzzle {
                        room: room.id.clone(),
                    });
                }
            }
            if map.contains_key(&room.id) {
                return Err(RoomError::DuplicateId(room.id));
            }
            map.insert(room.id.clone(), room);
        }

        let graph = Self {
            rooms: map,
            fallback: fallback_room(),
        };

        if let Some((room, target)) = graph.dangling_references().into_iter().next() {
            return Err(RoomError::DanglingTarget { room, target });
        }

        log::info!("Registered {} rooms", graph.len());
        Ok(graph)
    }

    /// Parse and register a JSON array of rooms
    pub fn from_json(json: &str) -> Result<Self, RoomError> {
        let rooms: Vec<Room> = serde_json::from_str(json)?;
        Self::new(rooms)
    }

    /// The built-in room table
    pub fn standard() -> Self {
        Self {
            rooms: standard_rooms()
                .into_iter()
                .map(|room| (room.id.clone(), room))
                .collect(),
            fallback: fallback_room(),
        }
    }

    /// Look up a room by id
    pub fn get_room(&self, id: &str) -> Result<&Room, RoomError> {
        self.rooms
            .get(id)
            .ok_or_else(|| RoomError::NotFound(id.to_string()))
    }

    /// Look up a room, falling back to the error room for unknown ids
    pub fn resolve(&self, id: &str) -> &Room {
        match self.get_room(id) {
            Ok(room) => room,
            Err(e) => {
                log::warn!("{}; rendering fallback room", e);
                &self.fallback
            }
        }
    }

    /// Room drawn when an unknown id is requested
    pub fn fallback_room(&self) -> &Room {
        &self.fallback
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rooms.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Registered ids in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rooms.keys().map(String::as_str)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Every `(room, target)` pair whose target is not registered
    pub fn dangling_references(&self) -> Vec<(String, String)> {
        self.rooms
            .values()
            .flat_map(|room| {
                room.targets()
                    .filter(|t| !self.rooms.contains_key(*t))
                    .map(|t| (room.id.clone(), t.to_string()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

fn fallback_room() -> Room {
    Room::new(FALLBACK_ROOM_ID, Color::BLACK, DrawVariant::Empty)
}

/// Fixed configuration table for the built-in rooms
pub fn standard_rooms() -> Vec<Room> {
    vec![
        Room::new(STARTING_ROOM, Color(0x1a1a1a), DrawVariant::Structured)
            .with_exit(Exit::new(
                Direction::East,
                "corrupted_archive",
                RelRect::new(1.0, 0.5, 0.04, 0.2),
            ))
            .with_exit(Exit::new(
                Direction::North,
                "echo_gallery",
                RelRect::new(0.5, 0.0, 0.2, 0.04),
            ))
            .with_puzzle(PuzzleSpec {
                id: "starting_chamber_panel".into(),
                target_room_id: "corrupted_archive".into(),
                // Inside the frame: 70% of the inner room, 30% down
                anchor: Vec2::new(0.64, 0.36),
                size: PUZZLE_SIZE,
            }),
        Room::new("corrupted_archive", Color(0x330033), DrawVariant::Corrupted)
            .with_exit(Exit::new(
                Direction::West,
                STARTING_ROOM,
                RelRect::new(0.0, 0.5, 0.04, 0.2),
            ))
            .with_exit(Exit::new(
                Direction::Secret,
                "null_sector",
                RelRect::new(0.82, 0.78, 0.05, 0.06),
            )),
        Room::new("echo_gallery", Color(0x102030), DrawVariant::Structured)
            .with_exit(Exit::new(
                Direction::South,
                STARTING_ROOM,
                RelRect::new(0.5, 1.0, 0.2, 0.04),
            ))
            .with_puzzle(PuzzleSpec {
                id: "gallery_mirror".into(),
                target_room_id: "null_sector".into(),
                anchor: Vec2::new(0.24, 0.3),
                size: PUZZLE_SIZE,
            }),
        // One-way: the sector only leads back to the gallery
        Room::new("null_sector", Color(0x0a0a0a), DrawVariant::Empty).with_exit(Exit::new(
            Direction::North,
            "echo_gallery",
            RelRect::new(0.5, 0.0, 0.2, 0.04),
        )),
    ]
}
