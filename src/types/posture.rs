//! Posture state definitions

use colored::Color;
use serde::{Deserialize, Serialize};

/// The two postures tracked by the rep counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostureState {
    /// Lying back, hip open ("down" in sit-up terms)
    #[default]
    Extended,
    /// Crunched up, hip closed ("up" in sit-up terms)
    Flexed,
}

impl PostureState {
    /// Terminal color for this posture
    pub fn color(&self) -> Color {
        match self {
            PostureState::Extended => Color::Cyan,
            PostureState::Flexed => Color::Yellow,
        }
    }

    /// Short marker for terminal display
    pub fn arrow(&self) -> &'static str {
        match self {
            PostureState::Extended => "▼",
            PostureState::Flexed => "▲",
        }
    }
}

impl std::fmt::Display for PostureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PostureState::Extended => "EXTENDED",
            PostureState::Flexed => "FLEXED",
        };
        write!(f, "{}", name)
    }
}
