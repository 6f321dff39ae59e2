//! Core modules for Reflexbot

pub mod bridge;
pub mod config;
pub mod counter;
pub mod dispatch;
pub mod router;
pub mod tracker;

pub use bridge::BridgeTranslator;
pub use config::{AppConfig, BridgeConfig, CounterConfig, RouterConfig, TrackerConfig};
pub use counter::AngleHysteresisCounter;
pub use dispatch::{AckSink, ActuatorSink, CommandDispatcher, LogAck, LogActuator};
pub use router::CommandRouter;
pub use tracker::ServoTracker;
