//! Servo Tracker: keeps a detected object centred with pan/tilt nudges
//!
//! Each processed frame moves each axis by at most one step toward the
//! target. Axes are clamped to the servo ranges. When the target has been
//! gone longer than the lost timeout both servos return home.

use std::time::Instant;

use tracing::debug;

use crate::core::config::TrackerConfig;
use crate::error::ConfigError;
use crate::types::{Detection, TrackFrame};

#[derive(Debug, Clone)]
pub struct ServoTracker {
    config: TrackerConfig,
    pan: i32,
    tilt: i32,
    last_seen: Instant,
    frame_count: u64,
}

impl ServoTracker {
    /// Create a tracker at the home position; the lost timer starts now
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        Self::new_at(config, Instant::now())
    }

    /// As [`new`](Self::new) with an explicit start time
    pub fn new_at(config: TrackerConfig, now: Instant) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            pan: config.home_pan,
            tilt: config.home_tilt,
            config,
            last_seen: now,
            frame_count: 0,
        })
    }

    /// Frame gate: true on every `skip_frames`-th frame, never while a command is running
    pub fn should_process(&mut self, command_busy: bool) -> bool {
        self.frame_count += 1;
        self.frame_count % self.config.skip_frames == 0 && !command_busy
    }

    /// First detection whose class is a tracking target
    pub fn select_target<'a>(&self, detections: &'a [Detection]) -> Option<&'a Detection> {
        detections
            .iter()
            .find(|d| self.config.target_classes.contains(&d.class_id))
    }

    /// One tracking step
    pub fn update(
        &mut self,
        target: Option<&Detection>,
        frame_width: u32,
        frame_height: u32,
        now: Instant,
    ) -> TrackFrame {
        let Some(target) = target else {
            if now.saturating_duration_since(self.last_seen) > self.config.lost_timeout() {
                if (self.pan, self.tilt) != (self.config.home_pan, self.config.home_tilt) {
                    debug!("target lost, returning home");
                }
                self.pan = self.config.home_pan;
                self.tilt = self.config.home_tilt;
            }
            return self.frame(false);
        };

        self.last_seen = now;
        let center_x = (frame_width / 2) as i32;
        let center_y = (frame_height / 2) as i32;
        let (obj_x, obj_y) = target.center();
        let (step, margin) = (self.config.step, self.config.margin);

        // servo is mirrored: object on the left means pan up
        if obj_x < center_x - margin {
            self.pan += step;
        } else if obj_x > center_x + margin {
            self.pan -= step;
        }

        if obj_y < center_y - margin {
            self.tilt -= step;
        } else if obj_y > center_y + margin {
            self.tilt += step;
        }

        self.pan = self.pan.clamp(self.config.pan_min, self.config.pan_max);
        self.tilt = self.tilt.clamp(self.config.tilt_min, self.config.tilt_max);

        self.frame(target.confidence > self.config.beep_confidence)
    }

    /// Select from raw detections and step
    pub fn track(
        &mut self,
        detections: &[Detection],
        frame_width: u32,
        frame_height: u32,
        now: Instant,
    ) -> TrackFrame {
        let target = self.select_target(detections).copied();
        self.update(target.as_ref(), frame_width, frame_height, now)
    }

    /// One camera frame through the gate. Skipped frames yield nothing and
    /// leave the servos where they are.
    pub fn process_frame(
        &mut self,
        detections: &[Detection],
        frame_width: u32,
        frame_height: u32,
        command_busy: bool,
        now: Instant,
    ) -> Option<TrackFrame> {
        if !self.should_process(command_busy) {
            return None;
        }
        Some(self.track(detections, frame_width, frame_height, now))
    }

    pub fn position(&self) -> (i32, i32) {
        (self.pan, self.tilt)
    }

    fn frame(&self, beep: bool) -> TrackFrame {
        TrackFrame {
            pan: self.pan,
            tilt: self.tilt,
            beep,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
