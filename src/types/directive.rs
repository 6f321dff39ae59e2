//! Actuator directives and the commands sinks receive

use serde::{Deserialize, Serialize};

use crate::types::TrackFrame;

/// Closed set of things the drive base can be told to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectiveKind {
    Forward,
    Backward,
    Stop,
    RotateRight,
    /// Hand control to the onboard trash-search routine
    AutoSearch,
    /// Nothing matched; acknowledged but never actuated
    Unknown,
}

impl DirectiveKind {
    /// Symbolic code understood by the microcontroller
    pub fn symbol(&self) -> Option<char> {
        match self {
            DirectiveKind::Forward => Some('F'),
            DirectiveKind::Backward => Some('B'),
            DirectiveKind::Stop => Some('S'),
            DirectiveKind::RotateRight => Some('R'),
            DirectiveKind::AutoSearch => Some('T'),
            DirectiveKind::Unknown => None,
        }
    }

    /// Inverse of [`symbol`](Self::symbol), case-insensitive
    pub fn from_symbol(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'F' => Some(DirectiveKind::Forward),
            'B' => Some(DirectiveKind::Backward),
            'S' => Some(DirectiveKind::Stop),
            'R' => Some(DirectiveKind::RotateRight),
            'T' => Some(DirectiveKind::AutoSearch),
            _ => None,
        }
    }

    /// Spoken acknowledgment (Indonesian, matching the voice vocabulary)
    pub fn acknowledgment(&self) -> &'static str {
        match self {
            DirectiveKind::Forward => "Maju.",
            DirectiveKind::Backward => "Mundur.",
            DirectiveKind::Stop => "Berhenti.",
            DirectiveKind::RotateRight => "Berputar.",
            DirectiveKind::AutoSearch => "Siap, mencari sampah.",
            DirectiveKind::Unknown => "Perintah tidak dikenal.",
        }
    }
}

impl std::fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DirectiveKind::Forward => "FORWARD",
            DirectiveKind::Backward => "BACKWARD",
            DirectiveKind::Stop => "STOP",
            DirectiveKind::RotateRight => "ROTATE_RIGHT",
            DirectiveKind::AutoSearch => "AUTO_SEARCH",
            DirectiveKind::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

/// One routed command. Built fresh per route and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommandDirective {
    pub kind: DirectiveKind,
    /// Seconds before an implicit stop; 0 means run until told otherwise
    pub duration_secs: f64,
}

impl CommandDirective {
    /// Directive that runs until an explicit stop
    pub fn new(kind: DirectiveKind) -> Self {
        Self {
            kind,
            duration_secs: 0.0,
        }
    }

    /// Directive followed by an implicit stop. Negative or NaN durations clamp to 0.
    pub fn timed(kind: DirectiveKind, duration_secs: f64) -> Self {
        let duration_secs = if duration_secs.is_finite() && duration_secs > 0.0 {
            duration_secs
        } else {
            0.0
        };
        Self {
            kind,
            duration_secs,
        }
    }

    pub fn is_timed(&self) -> bool {
        self.duration_secs > 0.0
    }

    /// Whether this directive reaches the actuator at all
    pub fn is_actuated(&self) -> bool {
        self.kind.symbol().is_some()
    }
}

/// What an actuator sink is handed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActuatorCommand {
    /// Drive directive as a single symbolic code
    Symbol(char),
    /// Pan/tilt servo angles plus beeper
    Track(TrackFrame),
}

impl ActuatorCommand {
    /// Line sent over the serial link
    pub fn to_wire(&self) -> String {
        match self {
            ActuatorCommand::Symbol(code) => format!("{}\n", code),
            ActuatorCommand::Track(frame) => frame.to_wire(),
        }
    }
}

impl std::fmt::Display for ActuatorCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_wire().trim_end())
    }
}
