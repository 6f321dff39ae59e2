//! Configuration: per-component settings, optionally loaded from TOML
//!
//! Every section falls back to the constants in the crate root, so an empty
//! file (or no file) yields the stock sit-up / robot setup.
//!
//! ```toml
//! [counter]
//! enter_flexed_max = 95.0
//! enter_extended_min = 125.0
//! target_reps = 3
//!
//! [router]
//! rotate_secs = 1.5
//!
//! [bridge]
//! base_url = "http://10.0.0.7"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::PostureState;
use crate::{
    BEEP_CONFIDENCE, BRIDGE_BASE_URL, BRIDGE_TIMEOUT_MS, PAN_MAX_DEG, PAN_MIN_DEG,
    ROTATE_DURATION_SECS, SERVO_HOME_DEG, SITUP_EXTENDED_MIN_DEG, SITUP_FLEXED_MAX_DEG,
    SITUP_STRICT_EXTENDED_MIN_DEG, SITUP_STRICT_FLEXED_MAX_DEG, TILT_MAX_DEG, TILT_MIN_DEG,
    TRACK_LOST_TIMEOUT_MS, TRACK_MARGIN_PX, TRACK_SKIP_FRAMES, TRACK_STEP_DEG,
    TRACK_TARGET_CLASSES,
};

// =============================================================================
// COUNTER
// =============================================================================

/// Hysteresis band and session settings for one exercise variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Angle at or below which the posture becomes Flexed
    pub enter_flexed_max: f64,
    /// Angle at or above which the posture becomes Extended
    pub enter_extended_min: f64,
    /// Posture assumed before the first sample
    pub initial_posture: PostureState,
    /// Session goal, if any
    pub target_reps: Option<u64>,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self::situp()
    }
}

impl CounterConfig {
    /// Validated config with the given band
    pub fn new(enter_flexed_max: f64, enter_extended_min: f64) -> Result<Self, ConfigError> {
        let config = Self {
            enter_flexed_max,
            enter_extended_min,
            ..Self::situp()
        };
        config.validate()?;
        Ok(config)
    }

    /// Loose sit-up band
    pub fn situp() -> Self {
        Self {
            enter_flexed_max: SITUP_FLEXED_MAX_DEG,
            enter_extended_min: SITUP_EXTENDED_MIN_DEG,
            initial_posture: PostureState::Extended,
            target_reps: None,
        }
    }

    /// Strict sit-up band: deeper crunch, flatter lie-back
    pub fn situp_strict() -> Self {
        Self {
            enter_flexed_max: SITUP_STRICT_FLEXED_MAX_DEG,
            enter_extended_min: SITUP_STRICT_EXTENDED_MIN_DEG,
            ..Self::situp()
        }
    }

    pub fn with_initial_posture(mut self, posture: PostureState) -> Self {
        self.initial_posture = posture;
        self
    }

    pub fn with_target(mut self, target_reps: u64) -> Self {
        self.target_reps = Some(target_reps);
        self
    }

    /// The band must be non-empty. NaN thresholds fail too.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enter_flexed_max < self.enter_extended_min {
            Ok(())
        } else {
            Err(ConfigError::InvalidThreshold {
                enter_flexed_max: self.enter_flexed_max,
                enter_extended_min: self.enter_extended_min,
            })
        }
    }
}

// =============================================================================
// ROUTER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Duration of a voice rotate before the auto-stop
    pub rotate_secs: f64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            rotate_secs: ROTATE_DURATION_SECS,
        }
    }
}

impl RouterConfig {
    /// Zero disables the auto-stop; anything a timer cannot hold is rejected
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rotate_secs < 0.0 || Duration::try_from_secs_f64(self.rotate_secs).is_err() {
            return Err(ConfigError::InvalidRotateDuration(self.rotate_secs));
        }
        Ok(())
    }
}

// =============================================================================
// TRACKER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub step: i32,
    pub margin: i32,
    pub pan_min: i32,
    pub pan_max: i32,
    pub tilt_min: i32,
    pub tilt_max: i32,
    pub home_pan: i32,
    pub home_tilt: i32,
    pub lost_timeout_ms: u64,
    pub beep_confidence: f64,
    pub target_classes: Vec<u32>,
    pub skip_frames: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            step: TRACK_STEP_DEG,
            margin: TRACK_MARGIN_PX,
            pan_min: PAN_MIN_DEG,
            pan_max: PAN_MAX_DEG,
            tilt_min: TILT_MIN_DEG,
            tilt_max: TILT_MAX_DEG,
            home_pan: SERVO_HOME_DEG,
            home_tilt: SERVO_HOME_DEG,
            lost_timeout_ms: TRACK_LOST_TIMEOUT_MS,
            beep_confidence: BEEP_CONFIDENCE,
            target_classes: TRACK_TARGET_CLASSES.to_vec(),
            skip_frames: TRACK_SKIP_FRAMES,
        }
    }
}

impl TrackerConfig {
    pub fn lost_timeout(&self) -> Duration {
        Duration::from_millis(self.lost_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pan_min > self.pan_max || self.tilt_min > self.tilt_max {
            return Err(ConfigError::InvalidTracker(format!(
                "empty servo range: pan {}..{}, tilt {}..{}",
                self.pan_min, self.pan_max, self.tilt_min, self.tilt_max
            )));
        }
        if !(self.pan_min..=self.pan_max).contains(&self.home_pan)
            || !(self.tilt_min..=self.tilt_max).contains(&self.home_tilt)
        {
            return Err(ConfigError::InvalidTracker(format!(
                "home ({}, {}) outside servo range",
                self.home_pan, self.home_tilt
            )));
        }
        if self.step <= 0 || self.margin < 0 {
            return Err(ConfigError::InvalidTracker(format!(
                "step must be positive and margin non-negative (step={}, margin={})",
                self.step, self.margin
            )));
        }
        if self.skip_frames == 0 {
            return Err(ConfigError::InvalidTracker("skip_frames must be at least 1".to_string()));
        }
        Ok(())
    }
}

// =============================================================================
// BRIDGE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Microcontroller HTTP root
    pub base_url: String,
    /// Per-request timeout for the transport
    pub timeout_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: BRIDGE_BASE_URL.to_string(),
            timeout_ms: BRIDGE_TIMEOUT_MS,
        }
    }
}

impl BridgeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

// =============================================================================
// APP
// =============================================================================

/// Everything the driver needs, one section per component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub counter: CounterConfig,
    pub router: RouterConfig,
    pub tracker: TrackerConfig,
    pub bridge: BridgeConfig,
}

impl AppConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.counter.validate()?;
        self.router.validate()?;
        self.tracker.validate()?;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
