//! Core types for Reflexbot

mod bridge;
mod directive;
mod output;
mod posture;
mod route;
mod tracking;

pub use bridge::{BridgeRequest, ServoId};
pub use directive::{ActuatorCommand, CommandDirective, DirectiveKind};
pub use output::{CounterOutput, RepEvent};
pub use posture::PostureState;
pub use route::{RouteOutcome, RouteRule};
pub use tracking::{Detection, TrackFrame};
