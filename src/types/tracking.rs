//! Detection boxes and servo frames for object tracking

use serde::{Deserialize, Serialize};

/// One detector bounding box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// COCO class id
    pub class_id: u32,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub confidence: f64,
}

impl Detection {
    /// Box centre, truncated to whole pixels
    pub fn center(&self) -> (i32, i32) {
        (
            ((self.x1 + self.x2) / 2.0) as i32,
            ((self.y1 + self.y2) / 2.0) as i32,
        )
    }

    /// Parse `class x1 y1 x2 y2 conf` (whitespace separated)
    pub fn parse_line(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 6 {
            return None;
        }
        let num = |i: usize| fields[i].parse::<f64>().ok();
        Some(Self {
            class_id: fields[0].parse().ok()?,
            x1: num(1)?,
            y1: num(2)?,
            x2: num(3)?,
            y2: num(4)?,
            confidence: num(5)?,
        })
    }
}

/// Servo positions sent to the microcontroller after a tracking step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackFrame {
    /// Horizontal servo angle
    pub pan: i32,
    /// Vertical servo angle
    pub tilt: i32,
    /// Sound the beeper (confident detection)
    pub beep: bool,
}

impl TrackFrame {
    /// `pan,tilt,beep\n`
    pub fn to_wire(&self) -> String {
        format!("{},{},{}\n", self.pan, self.tilt, if self.beep { 1 } else { 0 })
    }
}
