//! Decay scalar and edge-triggered threshold detection

use crate::clamp_unit;
use crate::consts::{DECAY_STEP, DECAY_THRESHOLDS};

/// A threshold crossed on the way up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdCrossing {
    pub threshold: f32,
    /// Decay value at the step that crossed it
    pub current: f32,
}

/// Owns the global decay scalar in [0, 1]
#[derive(Debug, Clone)]
pub struct DecayEngine {
    value: f32,
    previous: f32,
    step: f32,
    /// Ascending, deduplicated, each in (0, 1]
    thresholds: Vec<f32>,
}

impl Default for DecayEngine {
    fn default() -> Self {
        Self::new(DECAY_STEP, &DECAY_THRESHOLDS)
    }
}

impl DecayEngine {
    /// Create an engine at zero decay.
    ///
    /// Thresholds outside (0, 1] can never be crossed and are dropped.
    pub fn new(step: f32, thresholds: &[f32]) -> Self {
        let mut thresholds: Vec<f32> = thresholds
            .iter()
            .copied()
            .filter(|t| t.is_finite() && *t > 0.0 && *t <= 1.0)
            .collect();
        thresholds.sort_by(f32::total_cmp);
        thresholds.dedup();

        let step = if step.is_finite() { step.max(0.0) } else { 0.0 };

        Self {
            value: 0.0,
            previous: 0.0,
            step,
            thresholds,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Value before the most recent change
    #[inline]
    pub fn previous(&self) -> f32 {
        self.previous
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }

    /// Advance by one fixed step (host decay timer)
    pub fn advance(&mut self) -> Vec<ThresholdCrossing> {
        self.set(self.value + self.step)
    }

    /// Apply an externally supplied value.
    ///
    /// Out-of-range values are clamped; non-finite values are ignored.
    /// Returns the thresholds crossed upward by this change, lowest first.
    pub fn set(&mut self, value: f32) -> Vec<ThresholdCrossing> {
        let Some(new) = clamp_unit(value) else {
            log::warn!("Ignoring non-finite decay value {}", value);
            return Vec::new();
        };
        if new != value {
            log::debug!("Clamped decay {} -> {}", value, new);
        }

        self.previous = self.value;
        self.value = new;

        let prev = self.previous;
        self.thresholds
            .iter()
            .filter(|&&t| prev < t && t <= new)
            .map(|&threshold| ThresholdCrossing {
                threshold,
                current: new,
            })
            .collect()
    }

    /// True once the scalar has saturated
    pub fn is_saturated(&self) -> bool {
        self.value >= 1.0
    }
}
