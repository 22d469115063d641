//! Outbound notifications to the host
//!
//! Subscribers are invoked synchronously, in subscription order, at the
//! point the event occurs. They receive the event by reference and hold no
//! handle to the scene, so they cannot re-enter it mid-redraw.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Classification of a rejected action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Error,
    Info,
}

/// Events emitted by the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum GameEvent {
    /// Exit-based transition completed
    #[serde(rename_all = "camelCase")]
    RoomChanged { new_location: String },
    /// Puzzle-triggered transition completed
    #[serde(rename_all = "camelCase")]
    PuzzleSolved {
        puzzle_id: String,
        new_location: String,
    },
    /// Non-fatal rejected action
    GameFeedback {
        message: String,
        #[serde(rename = "type")]
        kind: FeedbackKind,
    },
    /// Decay crossed a threshold on the way up
    #[serde(rename_all = "camelCase")]
    DecayUpdate { current_decay: f32 },
}

impl GameEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::RoomChanged { .. } => "roomChanged",
            GameEvent::PuzzleSolved { .. } => "puzzleSolved",
            GameEvent::GameFeedback { .. } => "gameFeedback",
            GameEvent::DecayUpdate { .. } => "decayUpdate",
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        GameEvent::GameFeedback {
            message: message.into(),
            kind: FeedbackKind::Error,
        }
    }
}

/// Handle returned by [`EventChannel::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&GameEvent)>;

/// Typed observer list
#[derive(Default)]
pub struct EventChannel {
    subscribers: Vec<(SubscriptionId, Handler)>,
    next_id: u64,
    emitted: u64,
}

impl std::fmt::Debug for EventChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscribers", &self.subscribers.len())
            .field("emitted", &self.emitted)
            .finish()
    }
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Subscribe a recorder that appends every event to a shared list
    pub fn record(&mut self) -> Rc<RefCell<Vec<GameEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        self.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        log
    }

    /// Deliver an event to every subscriber, synchronously
    pub fn emit(&mut self, event: GameEvent) {
        log::debug!("Event {}: {:?}", event.name(), event);
        self.emitted += 1;
        for (_, handler) in self.subscribers.iter_mut() {
            handler(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Total events emitted since creation
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Drop every subscriber
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}
