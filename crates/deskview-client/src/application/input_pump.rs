//! InputPump: drives a [`SessionView`] with host messages and performs its effects.
//!
//! The pump depends only on the [`InputForwarder`] trait.  The real forwarder
//! (a channel into the transport task) is injected at construction time, making
//! the pump fully unit-testable with a recording double or a mockall mock.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{Receiver, RecvTimeoutError},
    Arc,
};
use std::time::Duration;

use deskview_core::RemoteInputEvent;
use tracing::{debug, info, trace};

use super::session_view::{SessionId, SessionView, ViewEffect, ViewMessage};

/// How often [`InputPump::run`] re-checks the stop flag while the source is idle.
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Hands canonical input events to the session transport.
///
/// Forwarding is fire-and-forget: implementations must not block and must not
/// report delivery failures back to the view.
#[cfg_attr(test, mockall::automock)]
pub trait InputForwarder: Send + Sync {
    fn forward(&self, session_id: &SessionId, event: RemoteInputEvent);
}

/// Feeds messages through one session view.
pub struct InputPump {
    view: SessionView,
    forwarder: Arc<dyn InputForwarder>,
    forwarded: u64,
}

impl InputPump {
    pub fn new(view: SessionView, forwarder: Arc<dyn InputForwarder>) -> Self {
        Self {
            view,
            forwarder,
            forwarded: 0,
        }
    }

    /// Processes one message and performs its effect.
    ///
    /// The effect is also returned so the host can re-render on
    /// [`ViewEffect::Reposition`].
    pub fn handle(&mut self, msg: ViewMessage) -> Option<ViewEffect> {
        let effect = self.view.update(msg)?;
        match effect {
            ViewEffect::Forward(event) => {
                self.forwarder.forward(self.view.session_id(), event);
                self.forwarded += 1;
                trace!(session_id = %self.view.session_id(), ?event, "input forwarded");
            }
            ViewEffect::Reposition(placement) => {
                debug!(
                    session_id = %self.view.session_id(),
                    offset_x = placement.offset_x,
                    offset_y = placement.offset_y,
                    "content repositioned"
                );
            }
        }
        Some(effect)
    }

    /// Handles messages from `messages` until the channel closes or `stop` is
    /// set, then shuts the pump down.  Returns the number of forwarded events.
    ///
    /// `stop` is checked before every message, so nothing still queued in the
    /// channel is dispatched once it is set.  An idle source never blocks the
    /// check for longer than [`STOP_POLL_INTERVAL`].
    pub fn run(&mut self, messages: &Receiver<ViewMessage>, stop: &AtomicBool) -> u64 {
        loop {
            if stop.load(Ordering::SeqCst) {
                debug!(session_id = %self.view.session_id(), "stop requested");
                break;
            }
            match messages.recv_timeout(STOP_POLL_INTERVAL) {
                Ok(msg) => {
                    if stop.load(Ordering::SeqCst) {
                        break;
                    }
                    self.handle(msg);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.shutdown();
        self.forwarded
    }

    pub fn view(&self) -> &SessionView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut SessionView {
        &mut self.view
    }

    /// Number of events handed to the forwarder so far.
    pub fn forwarded_count(&self) -> u64 {
        self.forwarded
    }

    /// Disposes the view.  Messages handled afterwards forward nothing.
    pub fn shutdown(&mut self) {
        self.view.dispose();
        info!(
            session_id = %self.view.session_id(),
            forwarded = self.forwarded,
            "input pump shut down"
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
