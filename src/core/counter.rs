//! Angle Hysteresis Counter: two-threshold posture machine that counts reps
//!
//! Transitions:
//! - any → EXTENDED: angle ≥ enter_extended_min
//! - EXTENDED → FLEXED: angle ≤ enter_flexed_max (counts one rep)
//! - otherwise: no change (dead zone, or already FLEXED)
//!
//! The gap between the two thresholds is the dead zone that keeps jitter
//! around a single cutoff from double-counting.

use tracing::{debug, info};

use crate::core::config::CounterConfig;
use crate::error::ConfigError;
use crate::types::{CounterOutput, PostureState, RepEvent};

/// Hysteresis rep counter
#[derive(Debug, Clone)]
pub struct AngleHysteresisCounter {
    config: CounterConfig,
    /// Current posture
    posture: PostureState,
    /// Reps counted so far
    count: u64,
    /// Last sample seen (NaN before the first)
    last_angle: f64,
    /// Number of samples consumed
    update_count: u64,
}

impl AngleHysteresisCounter {
    /// Create a counter; fails fast on an empty or inverted band
    pub fn new(config: CounterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            posture: config.initial_posture,
            config,
            count: 0,
            last_angle: f64::NAN,
            update_count: 0,
        })
    }

    /// Shorthand for a counter with the given band and default settings
    pub fn with_thresholds(enter_flexed_max: f64, enter_extended_min: f64) -> Result<Self, ConfigError> {
        Self::new(CounterConfig::new(enter_flexed_max, enter_extended_min)?)
    }

    /// Feed one angle sample. Returns an event when a rep was counted.
    pub fn update(&mut self, angle: f64) -> Option<RepEvent> {
        self.update_count += 1;
        self.last_angle = angle;

        if angle >= self.config.enter_extended_min {
            if self.posture != PostureState::Extended {
                debug!(angle, "posture → EXTENDED");
            }
            self.posture = PostureState::Extended;
            None
        } else if angle <= self.config.enter_flexed_max && self.posture == PostureState::Extended {
            self.posture = PostureState::Flexed;
            self.count += 1;
            info!(angle, count = self.count, "rep counted");
            Some(RepEvent::new(self.count, angle))
        } else {
            None
        }
    }

    /// Feed one sample and return the full snapshot
    pub fn observe(&mut self, angle: f64) -> CounterOutput {
        let rep = self.update(angle);
        CounterOutput::new(
            angle,
            self.posture,
            self.count,
            rep.is_some(),
            self.target_reached(),
        )
    }

    /// Get current posture
    pub fn posture(&self) -> PostureState {
        self.posture
    }

    /// Get rep count
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Get number of samples consumed
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    /// Has the configured target been reached? Always false without one.
    pub fn target_reached(&self) -> bool {
        self.config
            .target_reps
            .map(|target| self.count >= target)
            .unwrap_or(false)
    }

    /// Get current output without updating
    pub fn current_output(&self) -> CounterOutput {
        CounterOutput::new(
            self.last_angle,
            self.posture,
            self.count,
            false,
            self.target_reached(),
        )
    }

    /// Start a new set with the same configuration
    pub fn reset(&mut self) {
        self.posture = self.config.initial_posture;
        self.count = 0;
        self.last_angle = f64::NAN;
        self.update_count = 0;
    }
}

// =============================================================================
// TESTS
// =============================================================================
