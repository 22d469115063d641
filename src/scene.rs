//! Room-graph navigation state machine
//!
//! Holds the current room and the player, validates exit and puzzle
//! transitions, and drives the renderer. The drawing surface is owned here
//! so every redraw goes through one place.

use glam::Vec2;
use thiserror::Error;

use crate::renderer::{DrawSurface, HandleId, Renderer};
use crate::settings::Settings;
use crate::sim::{
    DirectionalInput, Direction, EventChannel, Exit, GameEvent, InputController, PlayerState, Room,
    RoomError, RoomGraph, ScenePhase,
};
use crate::{CanvasSize, clamp_unit};

/// Scene construction and addressing errors
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Room(#[from] RoomError),

    #[error("Room '{room}' has no exit #{index}")]
    NoSuchExit { room: String, index: usize },

    #[error("Room '{0}' has no puzzle")]
    NoPuzzle(String),
}

/// What triggered a completed transition
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionCause {
    Exit(Direction),
    Puzzle(String),
    /// Host pushed an authoritative location
    Override,
}

/// Result of a navigation request
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    Moved {
        from: String,
        to: String,
        cause: TransitionCause,
    },
    /// Proximity check failed; feedback was emitted
    Rejected { reason: String },
    /// Nothing to do (unchanged location, no handle hit, room still entering)
    Ignored,
    /// Unknown room requested; the fallback room is shown
    Fallback { requested: String },
}

impl TransitionOutcome {
    pub fn moved_to(&self) -> Option<&str> {
        match self {
            TransitionOutcome::Moved { to, .. } => Some(to),
            _ => None,
        }
    }
}

pub struct SceneController<S: DrawSurface> {
    graph: RoomGraph,
    current_room_id: String,
    /// Unknown id most recently pushed by the host, shown as the fallback room
    lost: Option<String>,
    phase: ScenePhase,
    player: PlayerState,
    input: InputController,
    canvas: CanvasSize,
    decay: f32,
    exit_padding: f32,
    renderer: Renderer,
    surface: S,
    events: EventChannel,
}

impl<S: DrawSurface> std::fmt::Debug for SceneController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneController")
            .field("current_room_id", &self.current_room_id)
            .field("lost", &self.lost)
            .field("phase", &self.phase)
            .field("player", &self.player)
            .field("canvas", &self.canvas)
            .field("decay", &self.decay)
            .finish()
    }
}

impl<S: DrawSurface> SceneController<S> {
    /// Build the scene in the configured starting room and draw it
    pub fn new(graph: RoomGraph, settings: &Settings, surface: S) -> Result<Self, SceneError> {
        graph.get_room(&settings.starting_room)?;

        let canvas = CanvasSize::new(settings.canvas_width, settings.canvas_height);
        let mut player = PlayerState::new(settings.player_size);
        player.recenter(canvas);

        let mut scene = Self {
            graph,
            current_room_id: settings.starting_room.clone(),
            lost: None,
            phase: ScenePhase::Entering,
            player,
            input: InputController::new(settings.player_speed),
            canvas,
            decay: 0.0,
            exit_padding: settings.exit_padding,
            renderer: Renderer::new(settings.seed),
            surface,
            events: EventChannel::new(),
        };
        scene.redraw();
        log::info!("Entered room '{}'", scene.current_room_id);
        Ok(scene)
    }

    // === Accessors ===

    pub fn current_room_id(&self) -> &str {
        &self.current_room_id
    }

    pub fn current_room(&self) -> &Room {
        self.graph.resolve(&self.current_room_id)
    }

    /// Room currently on screen (the fallback room while lost)
    pub fn displayed_room(&self) -> &Room {
        match self.lost {
            Some(_) => self.graph.fallback_room(),
            None => self.graph.resolve(&self.current_room_id),
        }
    }

    /// Unknown id the host last pushed, if the scene is showing the fallback room
    pub fn lost(&self) -> Option<&str> {
        self.lost.as_deref()
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }

    pub fn graph(&self) -> &RoomGraph {
        &self.graph
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn events(&self) -> &EventChannel {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventChannel {
        &mut self.events
    }

    // === Simulation ===

    /// One simulation step: finish entering, move the player, redraw the marker
    pub fn tick(&mut self, input: &DirectionalInput, dt: f32) {
        match self.phase {
            ScenePhase::TornDown => return,
            ScenePhase::Entering => self.phase = ScenePhase::Active,
            ScenePhase::Active => {}
        }
        self.input.apply(&mut self.player, input, dt, self.canvas);
        self.renderer.draw_player(&mut self.surface, &self.player);
    }

    /// True if the player is close enough to use an exit of the displayed room
    pub fn exit_in_reach(&self, index: usize) -> Result<bool, SceneError> {
        Ok(self.in_reach(self.exit(index)?))
    }

    /// Proximity-gated exit transition
    pub fn activate_exit(&mut self, index: usize) -> Result<TransitionOutcome, SceneError> {
        if self.is_torn_down() {
            return Ok(TransitionOutcome::Ignored);
        }
        let exit = self.exit(index)?.clone();

        if !self.in_reach(&exit) {
            let reason = format!("Too far from the {} exit", exit.direction);
            log::debug!("{} in '{}'", reason, self.current_room_id);
            self.events.emit(GameEvent::error(reason.clone()));
            return Ok(TransitionOutcome::Rejected { reason });
        }

        self.graph.get_room(&exit.target_room_id)?;
        let from = self.enter(&exit.target_room_id);
        self.events.emit(GameEvent::RoomChanged {
            new_location: exit.target_room_id.clone(),
        });
        Ok(TransitionOutcome::Moved {
            from,
            to: exit.target_room_id,
            cause: TransitionCause::Exit(exit.direction),
        })
    }

    /// Unconditional transition through the displayed room's puzzle
    pub fn activate_puzzle(&mut self) -> Result<TransitionOutcome, SceneError> {
        if self.is_torn_down() {
            return Ok(TransitionOutcome::Ignored);
        }
        let room = self.displayed_room();
        let puzzle = room
            .puzzle
            .clone()
            .ok_or_else(|| SceneError::NoPuzzle(room.id.clone()))?;

        self.graph.get_room(&puzzle.target_room_id)?;
        let from = self.enter(&puzzle.target_room_id);
        log::info!("Puzzle '{}' solved", puzzle.id);
        self.events.emit(GameEvent::PuzzleSolved {
            puzzle_id: puzzle.id.clone(),
            new_location: puzzle.target_room_id.clone(),
        });
        Ok(TransitionOutcome::Moved {
            from,
            to: puzzle.target_room_id,
            cause: TransitionCause::Puzzle(puzzle.id),
        })
    }

    // === Pointer ===

    /// Hover feedback; returns true if any handle changed state
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        if self.phase != ScenePhase::Active {
            return false;
        }
        let point = Vec2::new(x, y);
        let point = point.is_finite().then_some(point);
        self.renderer.hover(&mut self.surface, point)
    }

    /// Activate whatever handle is under the pointer
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Result<TransitionOutcome, SceneError> {
        if self.phase != ScenePhase::Active {
            log::debug!("Ignoring pointer at ({}, {}) while {:?}", x, y, self.phase);
            return Ok(TransitionOutcome::Ignored);
        }
        let hit = self.renderer.arena().hit(Vec2::new(x, y)).map(|h| h.id);
        match hit {
            Some(HandleId::Exit(index)) => self.activate_exit(index),
            Some(HandleId::Puzzle) => self.activate_puzzle(),
            None => Ok(TransitionOutcome::Ignored),
        }
    }

    // === Host pushes ===

    /// Authoritative location from the host; no proximity check, no event
    pub fn set_location(&mut self, id: &str) -> TransitionOutcome {
        if self.is_torn_down() {
            return TransitionOutcome::Ignored;
        }
        if !self.graph.contains(id) {
            if self.lost.as_deref() == Some(id) {
                return TransitionOutcome::Ignored;
            }
            log::warn!(
                "Unknown room '{}'; staying in '{}' and showing the fallback room",
                id,
                self.current_room_id
            );
            self.lost = Some(id.to_string());
            self.player.recenter(self.canvas);
            self.phase = ScenePhase::Entering;
            self.redraw();
            return TransitionOutcome::Fallback {
                requested: id.to_string(),
            };
        }

        if self.current_room_id == id && self.lost.is_none() {
            return TransitionOutcome::Ignored;
        }
        let from = self.enter(id);
        TransitionOutcome::Moved {
            from,
            to: id.to_string(),
            cause: TransitionCause::Override,
        }
    }

    /// Apply a decay value; redraws only the overlay and only on change
    pub fn set_decay(&mut self, value: f32) -> bool {
        if self.is_torn_down() {
            return false;
        }
        let Some(value) = clamp_unit(value) else {
            log::warn!("Ignoring non-finite decay {}", value);
            return false;
        };
        if value == self.decay {
            return false;
        }
        self.decay = value;
        self.renderer
            .update_decay_overlay(&mut self.surface, self.canvas, self.decay);
        true
    }

    /// Rebuild the layout for a new canvas size and recenter the player
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let canvas = CanvasSize::new(width, height);
        if canvas == self.canvas || self.is_torn_down() {
            return false;
        }
        log::debug!(
            "Resize {}x{} -> {}x{}",
            self.canvas.width,
            self.canvas.height,
            canvas.width,
            canvas.height
        );
        self.canvas = canvas;
        self.player.recenter(canvas);
        self.redraw();
        true
    }

    /// Release every handle, layer and subscriber; the scene stays inert afterwards
    pub fn teardown(&mut self) {
        if self.is_torn_down() {
            return;
        }
        self.phase = ScenePhase::TornDown;
        self.renderer.teardown(&mut self.surface);
        self.events.clear();
        log::info!("Scene torn down in '{}'", self.current_room_id);
    }

    // === Internals ===

    fn is_torn_down(&self) -> bool {
        self.phase == ScenePhase::TornDown
    }

    fn exit(&self, index: usize) -> Result<&Exit, SceneError> {
        let room = self.displayed_room();
        room.exits.get(index).ok_or_else(|| SceneError::NoSuchExit {
            room: room.id.clone(),
            index,
        })
    }

    /// Expanded-rectangle proximity test against the player's box
    fn in_reach(&self, exit: &Exit) -> bool {
        let reach = self.player.size * self.exit_padding;
        let zone = exit.bounds(self.canvas).expanded(reach.x, reach.y);
        zone.intersects(&self.player.bounds())
    }

    /// Switch to a registered room; returns the room left behind
    fn enter(&mut self, id: &str) -> String {
        let from = std::mem::replace(&mut self.current_room_id, id.to_string());
        self.lost = None;
        self.player.recenter(self.canvas);
        self.phase = ScenePhase::Entering;
        self.redraw();
        log::info!("Entered room '{}' from '{}'", id, from);
        from
    }

    /// Full redraw of the displayed room and the player marker
    fn redraw(&mut self) {
        let room = match self.lost {
            Some(_) => self.graph.fallback_room(),
            None => self.graph.resolve(&self.current_room_id),
        };
        self.renderer
            .draw_room(&mut self.surface, room, self.canvas, self.decay);
        self.renderer.draw_player(&mut self.surface, &self.player);
    }
}
