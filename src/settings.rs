//! Game settings and tunables
//!
//! Loaded from a JSON file when one is provided; every field has a default
//! so partial files are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::graph::STARTING_ROOM;

/// Settings load errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Core tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Seed for procedural room and overlay generation
    pub seed: u64,
    /// Room the session starts in
    pub starting_room: String,

    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Player ===
    /// Pixels per second
    pub player_speed: f32,
    /// Marker edge length in pixels
    pub player_size: f32,
    /// Exit reach, as a fraction of the player size added to each exit dimension
    pub exit_padding: f32,

    // === Decay ===
    /// Added per decay tick
    pub decay_step: f32,
    /// Ascending thresholds that raise `decayUpdate`
    pub decay_thresholds: Vec<f32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x7ac1e,
            starting_room: STARTING_ROOM.to_string(),

            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,

            player_speed: PLAYER_SPEED,
            player_size: PLAYER_SIZE,
            exit_padding: EXIT_PADDING,

            decay_step: DECAY_STEP,
            decay_thresholds: DECAY_THRESHOLDS.to_vec(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings from a file if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match Self::load(path) {
                Ok(settings) => return settings,
                Err(e) => log::warn!("{}; using default settings", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Replace non-finite or out-of-range values with usable ones
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        fn positive_or(v: f32, fallback: f32) -> f32 {
            if v.is_finite() && v > 0.0 { v } else { fallback }
        }

        self.canvas_width = positive_or(self.canvas_width, defaults.canvas_width).max(MIN_CANVAS_DIM);
        self.canvas_height = positive_or(self.canvas_height, defaults.canvas_height).max(MIN_CANVAS_DIM);
        self.player_speed = positive_or(self.player_speed, defaults.player_speed);
        self.player_size = positive_or(self.player_size, defaults.player_size);
        self.exit_padding = if self.exit_padding.is_finite() {
            self.exit_padding.max(0.0)
        } else {
            defaults.exit_padding
        };
        self.decay_step = if self.decay_step.is_finite() {
            self.decay_step.clamp(0.0, 1.0)
        } else {
            defaults.decay_step
        };

        self.decay_thresholds
            .retain(|t| t.is_finite() && *t > 0.0 && *t <= 1.0);
        self.decay_thresholds.sort_by(f32::total_cmp);
        self.decay_thresholds.dedup();

        if self.starting_room.trim().is_empty() {
            self.starting_room = defaults.starting_room;
        }

        self
    }
}
