//! Deterministic navigation logic
//!
//! Everything here is plain data and pure functions:
//! - Fixed room table, registered once
//! - Stable iteration order (by room id)
//! - No rendering or platform dependencies

pub mod decay;
pub mod events;
pub mod graph;
pub mod input;
pub mod rect;
pub mod room;
pub mod state;

pub use decay::{DecayEngine, ThresholdCrossing};
pub use events::{EventChannel, FeedbackKind, GameEvent, SubscriptionId};
pub use graph::{FALLBACK_ROOM_ID, RoomError, RoomGraph, STARTING_ROOM, standard_rooms};
pub use input::{DirectionalInput, InputController};
pub use rect::{Rect, RelRect};
pub use room::{Color, Direction, DrawVariant, Exit, PuzzleSpec, Room};
pub use state::{MarkerTint, PlayerState, ScenePhase};
