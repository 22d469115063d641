//! Context for the narrative text collaborator
//!
//! The core never generates text. It keeps a short journal of what the
//! player did and hands a [`WhisperContext`] to whatever [`WhisperSource`]
//! the host plugs in; the returned string is passed back untouched.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Progress entries kept for the collaborator
pub const JOURNAL_CAPACITY: usize = 12;

/// Parameters sent with every whisper request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhisperContext {
    pub player_location: String,
    pub decay_level: f32,
    /// Oldest first
    pub player_progress: Vec<String>,
}

/// Opaque request/response text service
pub trait WhisperSource {
    type Error: std::error::Error;

    fn whisper(&mut self, context: &WhisperContext) -> Result<String, Self::Error>;
}

/// Errors from the built-in sources
#[derive(Debug, Error)]
pub enum WhisperError {
    #[error("Whisper source has nothing left to say")]
    Exhausted,
}

/// Replays fixed lines in order; used offline and in tests
#[derive(Debug, Clone, Default)]
pub struct ScriptedWhisper {
    lines: VecDeque<String>,
}

impl ScriptedWhisper {
    pub fn new<I, T>(lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl WhisperSource for ScriptedWhisper {
    type Error = WhisperError;

    fn whisper(&mut self, _context: &WhisperContext) -> Result<String, Self::Error> {
        self.lines.pop_front().ok_or(WhisperError::Exhausted)
    }
}

/// Whether a room entry was the first one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    First,
    Return,
}

/// Rooms visited and recent player actions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    visited: BTreeSet<String>,
    progress: VecDeque<String>,
}

impl Journal {
    /// Journal for a session starting in `room` (counted as visited)
    pub fn new(room: &str) -> Self {
        let mut journal = Self::default();
        journal.visited.insert(room.to_string());
        journal
    }

    /// Record entering a room
    pub fn enter(&mut self, room: &str) -> Visit {
        if self.visited.insert(room.to_string()) {
            self.push(format!("entered {}", room));
            Visit::First
        } else {
            self.push(format!("returned to {}", room));
            Visit::Return
        }
    }

    pub fn solve(&mut self, puzzle_id: &str) {
        self.push(format!("solved {}", puzzle_id));
    }

    pub fn has_visited(&self, room: &str) -> bool {
        self.visited.contains(room)
    }

    pub fn visited(&self) -> impl Iterator<Item = &str> {
        self.visited.iter().map(String::as_str)
    }

    /// Recent actions, oldest first
    pub fn progress(&self) -> Vec<String> {
        self.progress.iter().cloned().collect()
    }

    fn push(&mut self, entry: String) {
        if self.progress.len() == JOURNAL_CAPACITY {
            self.progress.pop_front();
        }
        self.progress.push_back(entry);
    }
}
