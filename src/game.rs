//! Host-facing facade
//!
//! Composes the scene, the decay engine and the progress journal behind the
//! control surface a host shell drives: prop pushes, resize, ticks and
//! pointer input in; events out.

use serde::{Deserialize, Serialize};

use crate::oracle::{Journal, WhisperContext, WhisperSource};
use crate::renderer::DrawSurface;
use crate::scene::{SceneController, SceneError, TransitionCause, TransitionOutcome};
use crate::settings::Settings;
use crate::sim::{
    DecayEngine, DirectionalInput, GameEvent, RoomGraph, SubscriptionId, ThresholdCrossing,
};

/// Authoritative values pushed by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneProps {
    pub player_location: String,
    pub decay_level: f32,
}

pub struct Game<S: DrawSurface> {
    scene: SceneController<S>,
    decay: DecayEngine,
    journal: Journal,
    settings: Settings,
}

impl<S: DrawSurface> std::fmt::Debug for Game<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("scene", &self.scene)
            .field("decay", &self.decay)
            .field("journal", &self.journal)
            .finish()
    }
}

impl<S: DrawSurface> Game<S> {
    pub fn new(graph: RoomGraph, settings: Settings, surface: S) -> Result<Self, SceneError> {
        let settings = settings.sanitized();
        let scene = SceneController::new(graph, &settings, surface)?;
        let decay = DecayEngine::new(settings.decay_step, &settings.decay_thresholds);
        let journal = Journal::new(scene.current_room_id());

        log::info!(
            "Game ready: {} rooms, seed {:#x}, canvas {}x{}",
            scene.graph().len(),
            settings.seed,
            scene.canvas().width,
            scene.canvas().height
        );

        Ok(Self {
            scene,
            decay,
            journal,
            settings,
        })
    }

    /// Game over the built-in room table
    pub fn with_standard_rooms(settings: Settings, surface: S) -> Result<Self, SceneError> {
        Self::new(RoomGraph::standard(), settings, surface)
    }

    // === Accessors ===

    pub fn scene(&self) -> &SceneController<S> {
        &self.scene
    }

    pub fn surface(&self) -> &S {
        self.scene.surface()
    }

    pub fn current_room_id(&self) -> &str {
        self.scene.current_room_id()
    }

    pub fn decay(&self) -> f32 {
        self.decay.value()
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // === Events ===

    pub fn subscribe(&mut self, handler: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.scene.events_mut().subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.scene.events_mut().unsubscribe(id)
    }

    // === Host control surface ===

    /// Apply pushed props; only actual changes cause redraw work
    pub fn update_props(&mut self, props: &SceneProps) -> TransitionOutcome {
        let outcome = self.scene.set_location(&props.player_location);
        self.note(&outcome);

        if props.decay_level != self.decay.value() {
            let crossings = self.decay.set(props.decay_level);
            self.apply_decay(crossings);
        }
        outcome
    }

    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.scene.resize(width, height)
    }

    pub fn tick(&mut self, input: &DirectionalInput, dt: f32) {
        self.scene.tick(input, dt);
    }

    /// Advance decay by one step (host decay timer)
    pub fn decay_tick(&mut self) -> Vec<ThresholdCrossing> {
        let crossings = self.decay.advance();
        self.apply_decay(crossings.clone());
        crossings
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.scene.pointer_move(x, y)
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> Result<TransitionOutcome, SceneError> {
        let outcome = self.scene.pointer_down(x, y)?;
        self.note(&outcome);
        Ok(outcome)
    }

    /// Exit activation by index (keyboard or scripted hosts)
    pub fn activate_exit(&mut self, index: usize) -> Result<TransitionOutcome, SceneError> {
        let outcome = self.scene.activate_exit(index)?;
        self.note(&outcome);
        Ok(outcome)
    }

    // === Narrative collaborator ===

    pub fn whisper_context(&self) -> WhisperContext {
        WhisperContext {
            player_location: self.scene.current_room_id().to_string(),
            decay_level: self.decay.value(),
            player_progress: self.journal.progress(),
        }
    }

    /// Ask a source for a whisper; failures are logged and yield None
    pub fn request_whisper<W: WhisperSource>(&self, source: &mut W) -> Option<String> {
        match source.whisper(&self.whisper_context()) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Whisper request failed: {}", e);
                None
            }
        }
    }

    /// Tear down the scene and drop every subscriber
    pub fn shutdown(&mut self) {
        self.scene.teardown();
    }

    // === Internals ===

    fn apply_decay(&mut self, crossings: Vec<ThresholdCrossing>) {
        self.scene.set_decay(self.decay.value());
        for crossing in crossings {
            log::info!(
                "Decay crossed {:.2} (now {:.3})",
                crossing.threshold,
                crossing.current
            );
            self.scene.events_mut().emit(GameEvent::DecayUpdate {
                current_decay: crossing.current,
            });
        }
    }

    fn note(&mut self, outcome: &TransitionOutcome) {
        if let TransitionOutcome::Moved { to, cause, .. } = outcome {
            if let TransitionCause::Puzzle(puzzle_id) = cause {
                self.journal.solve(puzzle_id);
            }
            self.journal.enter(to);
        }
    }
}
