//! Command Dispatcher: one actuation and one acknowledgment per command
//!
//! Timed directives (voice rotate) do not block. The trailing stop is a
//! spawned task guarded by a cancellation token; any later directive that
//! reaches the actuator cancels it first, so a stale auto-stop can never
//! halt a newer command. Shutting down (or dropping) the dispatcher while a
//! stop is pending sends the stop right away instead of discarding it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::core::router::CommandRouter;
use crate::error::DispatchError;
use crate::types::{ActuatorCommand, CommandDirective, DirectiveKind};

/// Where directives go (serial line, HTTP endpoint, ...)
#[async_trait]
pub trait ActuatorSink: Send + Sync {
    async fn send(&self, command: &ActuatorCommand) -> Result<(), DispatchError>;
}

/// Where acknowledgments go (speech, log, ...). Fire-and-forget.
pub trait AckSink: Send + Sync {
    fn acknowledge(&self, message: &str);
}

/// Actuator that only logs the wire token
#[derive(Debug, Default, Clone)]
pub struct LogActuator;

#[async_trait]
impl ActuatorSink for LogActuator {
    async fn send(&self, command: &ActuatorCommand) -> Result<(), DispatchError> {
        info!(command = %command, "actuate");
        Ok(())
    }
}

/// Acknowledgment sink that only logs
#[derive(Debug, Default, Clone)]
pub struct LogAck;

impl AckSink for LogAck {
    fn acknowledge(&self, message: &str) {
        info!(text = message, "ack");
    }
}

/// Send one command, logging and swallowing failures
async fn actuate(sink: &dyn ActuatorSink, command: ActuatorCommand) -> bool {
    match sink.send(&command).await {
        Ok(()) => true,
        Err(e) => {
            warn!(command = %command, error = %e, "actuator dispatch failed");
            false
        }
    }
}

/// Scheduled auto-stop. The task yields true if it sent the stop.
struct PendingStop {
    token: CancellationToken,
    handle: JoinHandle<bool>,
}

/// Cut a pending auto-stop short and send the stop now, unless it already went out
async fn stop_now(pending: PendingStop, actuator: Arc<dyn ActuatorSink>) {
    pending.token.cancel();
    let fired = pending.handle.await.unwrap_or(false);
    if !fired {
        actuate(actuator.as_ref(), ActuatorCommand::Symbol('S')).await;
    }
}

/// Routes text and drives the sinks
pub struct CommandDispatcher {
    router: CommandRouter,
    actuator: Arc<dyn ActuatorSink>,
    ack: Arc<dyn AckSink>,
    pending: Option<PendingStop>,
}

impl CommandDispatcher {
    pub fn new(router: CommandRouter, actuator: Arc<dyn ActuatorSink>, ack: Arc<dyn AckSink>) -> Self {
        Self {
            router,
            actuator,
            ack,
            pending: None,
        }
    }

    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    /// Route and dispatch. Absent or blank text does nothing.
    pub async fn process<'a>(&mut self, text: impl Into<Option<&'a str>>) -> Option<CommandDirective> {
        let directive = self.router.route(text)?;
        self.dispatch(directive).await;
        Some(directive)
    }

    /// Perform the side effects for one directive. Must be called inside a tokio runtime.
    pub async fn dispatch(&mut self, directive: CommandDirective) {
        let kind = directive.kind;
        let Some(code) = kind.symbol() else {
            self.ack.acknowledge(kind.acknowledgment());
            return;
        };

        self.cancel_pending();

        // stop hits the motors before anything is said
        if kind == DirectiveKind::Stop {
            actuate(self.actuator.as_ref(), ActuatorCommand::Symbol(code)).await;
            self.ack.acknowledge(kind.acknowledgment());
        } else {
            self.ack.acknowledge(kind.acknowledgment());
            actuate(self.actuator.as_ref(), ActuatorCommand::Symbol(code)).await;
        }

        if directive.is_timed() {
            match Duration::try_from_secs_f64(directive.duration_secs) {
                Ok(after) => self.schedule_stop(after),
                Err(e) => {
                    warn!(secs = directive.duration_secs, error = %e, "unusable rotate duration, stopping now");
                    actuate(self.actuator.as_ref(), ActuatorCommand::Symbol('S')).await;
                }
            }
        }
    }

    /// Is an auto-stop still waiting to fire?
    pub fn has_pending_stop(&self) -> bool {
        self.pending
            .as_ref()
            .map(|p| !p.handle.is_finished())
            .unwrap_or(false)
    }

    /// End the session. A pending auto-stop is sent immediately.
    pub async fn shutdown(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!("auto-stop brought forward by shutdown");
            stop_now(pending, Arc::clone(&self.actuator)).await;
        }
    }

    fn schedule_stop(&mut self, after: Duration) {
        let token = CancellationToken::new();
        let child = token.clone();
        let actuator = Arc::clone(&self.actuator);

        debug!(after_ms = after.as_millis() as u64, "auto-stop scheduled");
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = child.cancelled() => {
                    debug!("auto-stop cancelled");
                    false
                }
                _ = tokio::time::sleep(after) => {
                    actuate(actuator.as_ref(), ActuatorCommand::Symbol('S')).await;
                    true
                }
            }
        });

        self.pending = Some(PendingStop { token, handle });
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.token.cancel();
        }
    }
}

impl Drop for CommandDispatcher {
    fn drop(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(stop_now(pending, Arc::clone(&self.actuator)));
            }
            Err(_) => {
                pending.token.cancel();
                warn!("dispatcher dropped outside a runtime, pending auto-stop lost");
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RouterConfig;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
        fail: bool,
    }

    impl Recorder {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ActuatorSink for Recorder {
        async fn send(&self, command: &ActuatorCommand) -> Result<(), DispatchError> {
            self.events.lock().unwrap().push(format!("act:{}", command));
            if self.fail {
                Err(DispatchError::Unreachable("test".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl AckSink for Recorder {
        fn acknowledge(&self, message: &str) {
            self.events.lock().unwrap().push(format!("ack:{}", message));
        }
    }

    fn dispatcher(rec: &Arc<Recorder>) -> CommandDispatcher {
        CommandDispatcher::new(CommandRouter::new(), rec.clone(), rec.clone())
    }

    #[tokio::test]
    async fn test_stop_actuates_before_ack() {
        let rec = Arc::new(Recorder::default());
        let mut d = dispatcher(&rec);
        d.process("berhenti").await;
        assert_eq!(rec.events(), vec!["act:S", "ack:Berhenti."]);
    }

    #[tokio::test]
    async fn test_forward_acks_before_actuating() {
        let rec = Arc::new(Recorder::default());
        let mut d = dispatcher(&rec);
        d.process("maju").await;
        assert_eq!(rec.events(), vec!["ack:Maju.", "act:F"]);
    }

    #[tokio::test]
    async fn test_unknown_only_acknowledges() {
        let rec = Arc::new(Recorder::default());
        let mut d = dispatcher(&rec);
        let directive = d.process("nyanyi lagu").await.unwrap();
        assert_eq!(directive.kind, DirectiveKind::Unknown);
        assert_eq!(rec.events(), vec!["ack:Perintah tidak dikenal."]);
    }

    #[tokio::test]
    async fn test_empty_input_has_no_side_effect() {
        let rec = Arc::new(Recorder::default());
        let mut d = dispatcher(&rec);
        assert!(d.process("").await.is_none());
        assert!(d.process(None).await.is_none());
        assert!(rec.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rotate_auto_stops() {
        let rec = Arc::new(Recorder::default());
        let mut d = dispatcher(&rec);
        d.process("berputar").await;
        assert!(d.has_pending_stop());
        assert_eq!(rec.events(), vec!["ack:Berputar.", "act:R"]);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(rec.events(), vec!["ack:Berputar.", "act:R", "act:S"]);
        assert!(!d.has_pending_stop());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_swallowed() {
        let rec = Arc::new(Recorder::failing());
        let mut d = dispatcher(&rec);
        d.process("maju").await;
        d.process("mundur").await;
        assert_eq!(rec.events(), vec!["ack:Maju.", "act:F", "ack:Mundur.", "act:B"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_sends_pending_stop() {
        let rec = Arc::new(Recorder::default());
        let mut d = dispatcher(&rec);
        d.process("putar").await;
        d.shutdown().await;
        assert_eq!(rec.events(), vec!["ack:Berputar.", "act:R", "act:S"]);

        // the timer is gone, no second stop later
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(rec.events(), vec!["ack:Berputar.", "act:R", "act:S"]);
        assert!(!d.has_pending_stop());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_after_stop_fired_does_not_repeat() {
        let rec = Arc::new(Recorder::default());
        let mut d = dispatcher(&rec);
        d.process("berputar").await;
        tokio::time::sleep(Duration::from_millis(1100)).await;
        d.shutdown().await;
        assert_eq!(rec.events(), vec!["ack:Berputar.", "act:R", "act:S"]);
    }

    #[tokio::test]
    async fn test_shutdown_without_pending_is_silent() {
        let rec = Arc::new(Recorder::default());
        let mut d = dispatcher(&rec);
        d.process("maju").await;
        d.shutdown().await;
        assert_eq!(rec.events(), vec!["ack:Maju.", "act:F"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_sends_pending_stop() {
        let rec = Arc::new(Recorder::default());
        let mut d = dispatcher(&rec);
        d.process("berputar").await;
        drop(d);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(rec.events(), vec!["ack:Berputar.", "act:R", "act:S"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_untimeable_rotate_stops_immediately() {
        let rec = Arc::new(Recorder::default());
        let router = CommandRouter::with_config(&RouterConfig { rotate_secs: 1e20 });
        let mut d = CommandDispatcher::new(router, rec.clone(), rec.clone());
        d.process("berputar").await;
        assert!(!d.has_pending_stop());
        assert_eq!(rec.events(), vec!["ack:Berputar.", "act:R", "act:S"]);
    }
}
