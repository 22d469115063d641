//! Procedural 2D rendering
//!
//! The renderer never owns a drawing backend. It paints through
//! [`DrawSurface`], keeps the interactive handles of the active room in a
//! [`HandleArena`], and draws from two seeded PCG streams. Room geometry
//! advances one stream across redraws; the overlay generator is rebuilt from
//! the seed on every pass, so a given seed and decay always give the same
//! overlay and overlay redraws never shift the geometry sequence.

pub mod arena;
pub mod overlay;
pub mod rooms;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use arena::{HandleArena, HandleId, HandleKind, Interactive};
pub use overlay::OverlayStats;
pub use surface::{BlendMode, DisplayList, DrawCommand, DrawSurface, Layer, LayerBatch, Paint};
pub use vertex::Vertex;

use glam::Vec2;
use rand_pcg::Pcg32;

use crate::CanvasSize;
use crate::sim::{MarkerTint, PlayerState, Room};

/// PCG stream selectors
const GEOMETRY_STREAM: u64 = 1;
const OVERLAY_STREAM: u64 = 2;

#[derive(Debug, Clone)]
pub struct Renderer {
    seed: u64,
    geometry_rng: Pcg32,
    arena: HandleArena,
    last_overlay: OverlayStats,
}

impl Renderer {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            geometry_rng: Pcg32::new(seed, GEOMETRY_STREAM),
            arena: HandleArena::new(),
            last_overlay: OverlayStats::default(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn arena(&self) -> &HandleArena {
        &self.arena
    }

    /// Counts from the most recent overlay pass
    pub fn last_overlay(&self) -> OverlayStats {
        self.last_overlay
    }

    /// Full redraw of a room: geometry, interactive handles and overlay.
    ///
    /// Every handle from the previous layout is destroyed before the new
    /// ones are created.
    pub fn draw_room(
        &mut self,
        surface: &mut (impl DrawSurface + ?Sized),
        room: &Room,
        canvas: CanvasSize,
        decay: f32,
    ) {
        surface.clear_layer(Layer::Room);
        surface.clear_layer(Layer::Interactive);
        surface.set_background(room.background_color);

        rooms::paint(room.draw_variant, surface, canvas, &mut self.geometry_rng);

        {
            let mut builder = self.arena.rebuild();
            for (index, exit) in room.exits.iter().enumerate() {
                builder.add_exit(index, exit, exit.bounds(canvas));
            }
            if let Some(puzzle) = &room.puzzle {
                builder.add_puzzle(puzzle, puzzle.bounds(canvas));
            }
        }
        self.draw_interactive(surface);
        self.update_decay_overlay(surface, canvas, decay);

        log::debug!(
            "Drew room '{}' ({}, {} handles, generation {})",
            room.id,
            room.draw_variant.as_str(),
            self.arena.len(),
            self.arena.generation()
        );
    }

    /// Redraw exit affordances and the puzzle panel with their hover state
    pub fn draw_interactive(&self, surface: &mut (impl DrawSurface + ?Sized)) {
        surface.clear_layer(Layer::Interactive);
        for handle in self.arena.iter() {
            let paint = match handle.kind {
                HandleKind::Exit { .. } => {
                    let alpha = if handle.hovered {
                        vertex::colors::EXIT_HOVER_ALPHA
                    } else {
                        vertex::colors::EXIT_ALPHA
                    };
                    Paint::fill(vertex::colors::EXIT, alpha)
                }
                HandleKind::Puzzle { .. } => {
                    let alpha = if handle.hovered {
                        vertex::colors::PUZZLE_HOVER_ALPHA
                    } else {
                        vertex::colors::PUZZLE_ALPHA
                    };
                    Paint::fill(vertex::colors::PUZZLE, alpha)
                }
            };
            surface.fill_rect(Layer::Interactive, handle.bounds, paint);
        }
    }

    /// Redraw only the overlay layer for a decay level.
    ///
    /// Output depends only on the seed, the canvas and `decay`.
    pub fn update_decay_overlay(
        &mut self,
        surface: &mut (impl DrawSurface + ?Sized),
        canvas: CanvasSize,
        decay: f32,
    ) -> OverlayStats {
        let mut rng = Pcg32::new(self.seed, OVERLAY_STREAM);
        self.last_overlay = overlay::paint_overlay(surface, canvas, decay, &mut rng);
        self.last_overlay
    }

    /// Redraw the player marker
    pub fn draw_player(&self, surface: &mut (impl DrawSurface + ?Sized), player: &PlayerState) {
        surface.clear_layer(Layer::Player);
        let color = match player.tint() {
            MarkerTint::Idle => vertex::colors::PLAYER_IDLE,
            MarkerTint::Moving => vertex::colors::PLAYER_MOVING,
        };
        surface.fill_rect(Layer::Player, player.bounds(), Paint::fill(color, 1.0));
    }

    /// Update hover state for a pointer position; redraws handles on change
    pub fn hover(&mut self, surface: &mut (impl DrawSurface + ?Sized), point: Option<Vec2>) -> bool {
        let changed = self.arena.set_hover(point);
        if changed {
            self.draw_interactive(surface);
        }
        changed
    }

    /// Destroy every handle and clear every layer
    pub fn teardown(&mut self, surface: &mut (impl DrawSurface + ?Sized)) {
        self.arena.clear();
        for layer in Layer::ALL {
            surface.clear_layer(layer);
        }
        self.last_overlay = OverlayStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RoomGraph;

    fn chamber() -> Room {
        RoomGraph::standard()
            .get_room("starting_chamber")
            .unwrap()
            .clone()
    }

    #[test]
    fn test_draw_room_lays_out_handles() {
        let mut renderer = Renderer::new(7);
        let mut list = DisplayList::new();
        let room = chamber();
        renderer.draw_room(&mut list, &room, CanvasSize::default(), 0.0);

        assert_eq!(renderer.arena().len(), room.exits.len() + 1);
        assert_eq!(list.background(), room.background_color);
        assert_eq!(list.primitive_count(Layer::Interactive), renderer.arena().len());
        assert_eq!(
            list.primitive_count(Layer::Room),
            rooms::shape_count(room.draw_variant)
        );
        assert_eq!(list.primitive_count(Layer::Overlay), 0);
    }

    #[test]
    fn test_redraw_replaces_everything() {
        let mut renderer = Renderer::new(7);
        let mut list = DisplayList::new();
        let room = chamber();
        renderer.draw_room(&mut list, &room, CanvasSize::default(), 0.2);
        renderer.draw_room(&mut list, &room, CanvasSize::new(400.0, 300.0), 0.2);

        assert_eq!(renderer.arena().generation(), 2);
        assert_eq!(renderer.arena().destroyed(), 3);
        assert_eq!(list.primitive_count(Layer::Interactive), 3);
        assert_eq!(list.primitive_count(Layer::Overlay), 20 + 4);
    }

    #[test]
    fn test_hover_recolors_puzzle() {
        let mut renderer = Renderer::new(7);
        let mut list = DisplayList::new();
        renderer.draw_room(&mut list, &chamber(), CanvasSize::default(), 0.0);

        let panel = renderer.arena().puzzle().unwrap().bounds;
        assert!(renderer.hover(&mut list, Some(panel.center())));

        let alphas: Vec<f32> = list
            .commands(Layer::Interactive)
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { paint, .. } if paint.color == vertex::colors::PUZZLE => {
                    Some(paint.alpha)
                }
                _ => None,
            })
            .collect();
        assert_eq!(alphas, vec![vertex::colors::PUZZLE_HOVER_ALPHA]);
        assert!(!renderer.hover(&mut list, Some(panel.center())));
    }

    #[test]
    fn test_overlay_stream_independent_of_geometry() {
        let room = chamber();
        let canvas = CanvasSize::default();

        let mut a = Renderer::new(11);
        let mut list_a = DisplayList::new();
        a.update_decay_overlay(&mut list_a, canvas, 0.5);
        a.draw_room(&mut list_a, &room, canvas, 0.0);

        let mut b = Renderer::new(11);
        let mut list_b = DisplayList::new();
        b.draw_room(&mut list_b, &room, canvas, 0.0);

        assert_eq!(list_a.commands(Layer::Room), list_b.commands(Layer::Room));
    }

    #[test]
    fn test_overlay_depends_only_on_seed_and_decay() {
        let canvas = CanvasSize::default();
        let mut renderer = Renderer::new(5);
        let mut list = DisplayList::new();

        renderer.update_decay_overlay(&mut list, canvas, 0.5);
        let first = list.commands(Layer::Overlay).to_vec();
        renderer.draw_room(&mut list, &chamber(), canvas, 0.4);
        renderer.update_decay_overlay(&mut list, canvas, 0.5);
        assert_eq!(list.commands(Layer::Overlay), first.as_slice());

        let mut fresh = Renderer::new(5);
        let mut other = DisplayList::new();
        fresh.update_decay_overlay(&mut other, canvas, 0.5);
        assert_eq!(other.commands(Layer::Overlay), first.as_slice());
    }

    #[test]
    fn test_player_tint() {
        let renderer = Renderer::new(1);
        let mut list = DisplayList::new();
        let mut player = PlayerState::default();
        player.recenter(CanvasSize::default());
        renderer.draw_player(&mut list, &player);
        player.velocity = Vec2::new(200.0, 0.0);
        renderer.draw_player(&mut list, &player);

        assert_eq!(list.primitive_count(Layer::Player), 1);
        match &list.commands(Layer::Player)[0] {
            DrawCommand::FillRect { paint, rect } => {
                assert_eq!(paint.color, vertex::colors::PLAYER_MOVING);
                assert_eq!(rect.center(), CanvasSize::default().center());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_teardown_clears_all() {
        let mut renderer = Renderer::new(3);
        let mut list = DisplayList::new();
        renderer.draw_room(&mut list, &chamber(), CanvasSize::default(), 0.9);
        renderer.teardown(&mut list);
        assert!(renderer.arena().is_empty());
        for layer in Layer::ALL {
            assert_eq!(list.primitive_count(layer), 0);
        }
    }
}
