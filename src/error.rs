//! Error types

use thiserror::Error;

/// Configuration errors. Raised at construction, never while processing input.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Hysteresis band is empty or inverted
    #[error("invalid thresholds: enter_flexed_max ({enter_flexed_max}) must be below enter_extended_min ({enter_extended_min})")]
    InvalidThreshold {
        enter_flexed_max: f64,
        enter_extended_min: f64,
    },

    /// Rotate duration negative, non-finite or too large for a timer
    #[error("invalid rotate duration: {0} seconds")]
    InvalidRotateDuration(f64),

    /// Servo ranges or home position inconsistent
    #[error("invalid tracker config: {0}")]
    InvalidTracker(String),

    /// Bridge base URL does not parse
    #[error("invalid bridge base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Config file could not be read
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Actuator dispatch failures. Logged by the dispatcher, never propagated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Sink not connected or transport down
    #[error("actuator unreachable: {0}")]
    Unreachable(String),

    /// Sink answered but refused the command
    #[error("actuator rejected command: {0}")]
    Rejected(String),
}
