//! Bridge Translator: browser controller messages → microcontroller URLs
//!
//! Message grammar:
//! - `B90,` / `S45,` / `E120,` / `G10,` → servo move (anything after the first comma is ignored)
//! - anything else → action, with commas stripped (`F,` → `F`)

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;
use url::Url;

use crate::core::config::BridgeConfig;
use crate::error::ConfigError;
use crate::types::{BridgeRequest, ServoId};

lazy_static! {
    static ref RE_SERVO_MOVE: Regex = Regex::new(r"^([BSEG])(\d+),").unwrap();
}

#[derive(Debug, Clone)]
pub struct BridgeTranslator {
    base: Url,
    config: BridgeConfig,
}

impl BridgeTranslator {
    /// Fails if the configured base URL does not parse
    pub fn new(config: BridgeConfig) -> Result<Self, ConfigError> {
        let base = Url::parse(&config.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        Ok(Self { base, config })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Parse one message. Blank messages are skipped.
    pub fn parse(&self, message: &str) -> Option<BridgeRequest> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        if let Some(caps) = RE_SERVO_MOVE.captures(message) {
            let servo = caps[1].chars().next().and_then(ServoId::from_code);
            // digits overflowing u32 fall through to an action
            if let (Some(servo), Ok(angle)) = (servo, caps[2].parse::<u32>()) {
                return Some(BridgeRequest::MoveServo { servo, angle });
            }
        }

        let action = message.replace(',', "");
        if action.is_empty() {
            return None;
        }
        Some(BridgeRequest::Action { action })
    }

    /// Full request URL for the microcontroller
    pub fn url(&self, request: &BridgeRequest) -> Url {
        let mut url = self.base.clone();
        match request {
            BridgeRequest::MoveServo { servo, angle } => {
                url.set_path("/move");
                url.query_pairs_mut()
                    .clear()
                    .append_pair("servo", &servo.code().to_string())
                    .append_pair("angle", &angle.to_string());
            }
            BridgeRequest::Action { action } => {
                url.set_path("/command");
                url.query_pairs_mut().clear().append_pair("action", action);
            }
        }
        url
    }

    /// Parse and render in one go
    pub fn translate(&self, message: &str) -> Option<Url> {
        let request = self.parse(message)?;
        let url = self.url(&request);
        debug!(message, url = %url, "bridge translated");
        Some(url)
    }
}

// =============================================================================
// TESTS
// =============================================================================
