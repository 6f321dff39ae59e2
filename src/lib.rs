//! Reflexbot: rep counting and command reflexes for a hobby robot
//!
//! angle stream → AngleHysteresisCounter → rep events
//! command text → CommandRouter → CommandDispatcher → actuator + acknowledgment

pub mod core;
pub mod error;
pub mod types;

// =============================================================================
// COUNTER THRESHOLDS [deg] - sit-up hip angle (shoulder, hip, knee)
// =============================================================================

/// Angle at or below which the body counts as flexed (loose sit-up)
pub const SITUP_FLEXED_MAX_DEG: f64 = 102.0;

/// Angle at or above which the body counts as extended (loose sit-up)
pub const SITUP_EXTENDED_MIN_DEG: f64 = 117.0;

/// Strict sit-up: deeper crunch required
pub const SITUP_STRICT_FLEXED_MAX_DEG: f64 = 89.0;

/// Strict sit-up: flatter lie-back required
pub const SITUP_STRICT_EXTENDED_MIN_DEG: f64 = 136.0;

// =============================================================================
// ROUTER
// =============================================================================

/// How long a voice "berputar" rotates before the auto-stop
pub const ROTATE_DURATION_SECS: f64 = 1.0;

// =============================================================================
// SERVO TRACKER
// =============================================================================

/// Degrees moved per corrective step
pub const TRACK_STEP_DEG: i32 = 4;

/// Pixels the target may sit off-centre before a correction
pub const TRACK_MARGIN_PX: i32 = 60;

/// Pan servo range
pub const PAN_MIN_DEG: i32 = 0;
pub const PAN_MAX_DEG: i32 = 180;

/// Tilt servo range (mechanically limited)
pub const TILT_MIN_DEG: i32 = 70;
pub const TILT_MAX_DEG: i32 = 120;

/// Home position for both axes
pub const SERVO_HOME_DEG: i32 = 90;

/// Re-home after the target has been lost this long (milliseconds)
pub const TRACK_LOST_TIMEOUT_MS: u64 = 5000;

/// Detection confidence that triggers the beeper
pub const BEEP_CONFIDENCE: f64 = 0.7;

/// Run tracking on every Nth frame
pub const TRACK_SKIP_FRAMES: u64 = 3;

/// COCO class ids worth chasing: 39 = bottle, 41 = cup
pub const TRACK_TARGET_CLASSES: [u32; 2] = [39, 41];

// =============================================================================
// BRIDGE
// =============================================================================

/// Microcontroller HTTP endpoint
pub const BRIDGE_BASE_URL: &str = "http://192.168.1.150";

/// Per-request timeout for the microcontroller (milliseconds)
pub const BRIDGE_TIMEOUT_MS: u64 = 1500;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
