//! Bridge request types

use serde::{Deserialize, Serialize};

/// Arm servo addressed by a bridge move message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServoId {
    /// `B`
    Base,
    /// `S`
    Shoulder,
    /// `E`
    Elbow,
    /// `G`
    Gripper,
}

impl ServoId {
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'B' => Some(ServoId::Base),
            'S' => Some(ServoId::Shoulder),
            'E' => Some(ServoId::Elbow),
            'G' => Some(ServoId::Gripper),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            ServoId::Base => 'B',
            ServoId::Shoulder => 'S',
            ServoId::Elbow => 'E',
            ServoId::Gripper => 'G',
        }
    }
}

/// A browser message translated for the microcontroller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeRequest {
    /// `/move?servo=<id>&angle=<n>`
    MoveServo { servo: ServoId, angle: u32 },
    /// `/command?action=<action>`
    Action { action: String },
}
