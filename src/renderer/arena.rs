//! Interactive handles for the active room
//!
//! Exit affordances and the puzzle panel live in an arena keyed by stable
//! ids. The only way to add handles is through [`HandleArena::rebuild`],
//! which destroys every existing handle first, so nothing from a previous
//! layout can survive a redraw.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::sim::{Direction, Exit, PuzzleSpec, Rect};

/// Stable key for an interactive handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HandleId {
    /// Index into the room's exit list
    Exit(usize),
    /// The room's puzzle panel; at most one exists
    Puzzle,
}

/// What activating a handle does
#[derive(Debug, Clone, PartialEq)]
pub enum HandleKind {
    Exit {
        direction: Direction,
        target_room_id: String,
    },
    Puzzle {
        puzzle_id: String,
        target_room_id: String,
    },
}

/// An interactive region in canvas pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Interactive {
    pub id: HandleId,
    pub kind: HandleKind,
    pub bounds: Rect,
    pub hovered: bool,
    /// Arena generation that created this handle
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct HandleArena {
    handles: BTreeMap<HandleId, Interactive>,
    generation: u64,
    destroyed: u64,
}

impl HandleArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy every handle and start a new layout generation
    pub fn rebuild(&mut self) -> ArenaBuilder<'_> {
        self.clear();
        self.generation += 1;
        ArenaBuilder { arena: self }
    }

    /// Destroy every handle (teardown)
    pub fn clear(&mut self) {
        self.destroyed += self.handles.len() as u64;
        self.handles.clear();
    }

    pub fn get(&self, id: HandleId) -> Option<&Interactive> {
        self.handles.get(&id)
    }

    pub fn puzzle(&self) -> Option<&Interactive> {
        self.handles.get(&HandleId::Puzzle)
    }

    /// Handles in draw order (exits by index, then the puzzle)
    pub fn iter(&self) -> impl Iterator<Item = &Interactive> {
        self.handles.values()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Total handles destroyed over the arena's lifetime
    pub fn destroyed(&self) -> u64 {
        self.destroyed
    }

    /// Topmost handle under a point
    pub fn hit(&self, point: Vec2) -> Option<&Interactive> {
        self.handles.values().rev().find(|h| h.bounds.contains(point))
    }

    /// Update hover flags for a pointer position; returns true if any changed
    pub fn set_hover(&mut self, point: Option<Vec2>) -> bool {
        let target = point.and_then(|p| self.hit(p).map(|h| h.id));
        let mut changed = false;
        for handle in self.handles.values_mut() {
            let hovered = Some(handle.id) == target;
            if handle.hovered != hovered {
                handle.hovered = hovered;
                changed = true;
            }
        }
        changed
    }
}

/// Insert-only view handed out by [`HandleArena::rebuild`]
pub struct ArenaBuilder<'a> {
    arena: &'a mut HandleArena,
}

impl ArenaBuilder<'_> {
    pub fn add_exit(&mut self, index: usize, exit: &Exit, bounds: Rect) -> &mut Self {
        self.insert(
            HandleId::Exit(index),
            HandleKind::Exit {
                direction: exit.direction,
                target_room_id: exit.target_room_id.clone(),
            },
            bounds,
        );
        self
    }

    /// Replaces any puzzle already added in this generation
    pub fn add_puzzle(&mut self, puzzle: &PuzzleSpec, bounds: Rect) -> &mut Self {
        self.insert(
            HandleId::Puzzle,
            HandleKind::Puzzle {
                puzzle_id: puzzle.id.clone(),
                target_room_id: puzzle.target_room_id.clone(),
            },
            bounds,
        );
        self
    }

    fn insert(&mut self, id: HandleId, kind: HandleKind, bounds: Rect) {
        let generation = self.arena.generation;
        let previous = self.arena.handles.insert(
            id,
            Interactive {
                id,
                kind,
                bounds,
                hovered: false,
                generation,
            },
        );
        if previous.is_some() {
            self.arena.destroyed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RelRect;

    fn exit(direction: Direction) -> Exit {
        Exit::new(direction, "elsewhere", RelRect::new(0.5, 0.5, 0.1, 0.1))
    }

    fn puzzle() -> PuzzleSpec {
        PuzzleSpec {
            id: "panel".into(),
            target_room_id: "vault".into(),
            anchor: Vec2::new(0.5, 0.5),
            size: 60.0,
        }
    }

    #[test]
    fn test_rebuild_destroys_previous_handles() {
        let mut arena = HandleArena::new();
        arena
            .rebuild()
            .add_exit(0, &exit(Direction::East), Rect::new(0.0, 0.0, 10.0, 10.0))
            .add_exit(1, &exit(Direction::West), Rect::new(50.0, 0.0, 10.0, 10.0))
            .add_puzzle(&puzzle(), Rect::new(100.0, 100.0, 60.0, 60.0));
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.generation(), 1);

        arena
            .rebuild()
            .add_exit(0, &exit(Direction::North), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.destroyed(), 3);
        assert!(arena.puzzle().is_none());
        assert!(arena.iter().all(|h| h.generation == 2));
    }

    #[test]
    fn test_single_puzzle_per_generation() {
        let mut arena = HandleArena::new();
        arena
            .rebuild()
            .add_puzzle(&puzzle(), Rect::new(0.0, 0.0, 60.0, 60.0))
            .add_puzzle(&puzzle(), Rect::new(10.0, 10.0, 60.0, 60.0));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.puzzle().unwrap().bounds.x, 10.0);
    }

    #[test]
    fn test_hit_prefers_topmost() {
        let mut arena = HandleArena::new();
        arena
            .rebuild()
            .add_exit(0, &exit(Direction::Secret), Rect::new(0.0, 0.0, 100.0, 100.0))
            .add_puzzle(&puzzle(), Rect::new(40.0, 40.0, 20.0, 20.0));

        assert_eq!(arena.hit(Vec2::new(50.0, 50.0)).unwrap().id, HandleId::Puzzle);
        assert_eq!(arena.hit(Vec2::new(5.0, 5.0)).unwrap().id, HandleId::Exit(0));
        assert!(arena.hit(Vec2::new(500.0, 5.0)).is_none());
    }

    #[test]
    fn test_hover_transitions() {
        let mut arena = HandleArena::new();
        arena
            .rebuild()
            .add_exit(0, &exit(Direction::East), Rect::new(0.0, 0.0, 10.0, 10.0));

        assert!(arena.set_hover(Some(Vec2::new(5.0, 5.0))));
        assert!(arena.get(HandleId::Exit(0)).unwrap().hovered);
        assert!(!arena.set_hover(Some(Vec2::new(6.0, 6.0))));
        assert!(arena.set_hover(None));
        assert!(!arena.get(HandleId::Exit(0)).unwrap().hovered);
    }
}
