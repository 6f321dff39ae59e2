//! Counter events and per-sample output

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::PostureState;

/// Emitted once per counted repetition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepEvent {
    /// Count after this rep (1-based)
    pub count: u64,
    /// Angle that closed the rep
    pub angle: f64,
    /// When the rep was counted
    pub timestamp: DateTime<Utc>,
}

impl RepEvent {
    pub fn new(count: u64, angle: f64) -> Self {
        Self {
            count,
            angle,
            timestamp: Utc::now(),
        }
    }
}

/// Snapshot of the counter after one sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterOutput {
    pub timestamp: DateTime<Utc>,
    /// Sample that produced this output (NaN before any sample)
    pub angle: f64,
    pub posture: PostureState,
    pub count: u64,
    /// This sample completed a rep
    pub rep_completed: bool,
    /// Configured target reached (always false without a target)
    pub target_reached: bool,
}

impl CounterOutput {
    pub fn new(
        angle: f64,
        posture: PostureState,
        count: u64,
        rep_completed: bool,
        target_reached: bool,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            angle,
            posture,
            count,
            rep_completed,
            target_reached,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let line = format!(
            "{} angle={:.1} | posture={} | count={}",
            self.posture.arrow(),
            self.angle,
            self.posture,
            self.count,
        );
        let line = line.color(self.posture.color());
        if self.rep_completed {
            format!("{} {}", line, "+1".green().bold())
        } else {
            line.to_string()
        }
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "angle={:.1} | posture={} | count={} | rep={}",
            self.angle,
            self.posture,
            self.count,
            if self.rep_completed { 1 } else { 0 },
        )
    }
}
