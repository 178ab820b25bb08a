//! Session transport adapter: hands forwarded input to an async consumer.
//!
//! [`ChannelForwarder`] implements [`InputForwarder`] by pushing each event onto
//! an unbounded `tokio::sync::mpsc` channel.  The receiving half is drained by
//! whatever task owns the real session transport (in the headless binary, a
//! task that prints JSON lines).
//!
//! `UnboundedSender::send` never blocks and never awaits, so it is safe to call
//! from the synchronous view callbacks.  A closed channel means the transport
//! has gone away; the event is dropped with a warning and the view never sees
//! the failure.

use std::sync::atomic::{AtomicU64, Ordering};

use deskview_core::RemoteInputEvent;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

use crate::application::input_pump::InputForwarder;
use crate::application::session_view::SessionId;

/// One forwarded event together with the session it addresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardedInput {
    pub session_id: SessionId,
    #[serde(flatten)]
    pub event: RemoteInputEvent,
}

/// [`InputForwarder`] backed by an unbounded tokio channel.
pub struct ChannelForwarder {
    tx: mpsc::UnboundedSender<ForwardedInput>,
    dropped: AtomicU64,
}

impl ChannelForwarder {
    /// Creates a forwarder and the receiver the transport task drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ForwardedInput>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                dropped: AtomicU64::new(0),
            },
            rx,
        )
    }

    /// Number of events dropped because the receiver was gone.
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl InputForwarder for ChannelForwarder {
    fn forward(&self, session_id: &SessionId, event: RemoteInputEvent) {
        let item = ForwardedInput {
            session_id: session_id.clone(),
            event,
        };
        if self.tx.send(item).is_err() {
            let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            warn!(session_id = %session_id, dropped, "transport closed, input dropped");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use deskview_core::{MouseEvent, MouseKey, Point};

    fn make_event(x: f64, y: f64) -> RemoteInputEvent {
        RemoteInputEvent::new(MouseEvent::MouseDown(MouseKey::Left), Point::new(x, y))
    }

    #[tokio::test]
    async fn test_forwarded_events_arrive_in_order() {
        // Arrange
        let (forwarder, mut rx) = ChannelForwarder::new();
        let session = SessionId::new("s-1");

        // Act
        forwarder.forward(&session, make_event(1.0, 1.0));
        forwarder.forward(&session, make_event(2.0, 2.0));

        // Assert
        let first = rx.recv().await.expect("first event");
        let second = rx.recv().await.expect("second event");
        assert_eq!(first.session_id, session);
        assert_eq!(first.event.x, 1.0);
        assert_eq!(second.event.x, 2.0);
    }

    #[tokio::test]
    async fn test_forward_after_receiver_dropped_is_silently_counted() {
        let (forwarder, rx) = ChannelForwarder::new();
        drop(rx);

        forwarder.forward(&SessionId::new("s-1"), make_event(0.0, 0.0));

        assert_eq!(forwarder.dropped_count(), 1);
    }

    #[tokio::test]
    async fn test_receiver_ends_when_forwarder_dropped() {
        let (forwarder, mut rx) = ChannelForwarder::new();
        forwarder.forward(&SessionId::new("s-1"), make_event(3.0, 4.0));
        drop(forwarder);

        assert!(rx.recv().await.is_some());
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_forward_from_sync_context_is_received() {
        let (forwarder, mut rx) = ChannelForwarder::new();

        forwarder.forward(&SessionId::new("s-2"), make_event(7.0, 8.0));

        let item = tokio_test::block_on(rx.recv()).expect("event");
        assert_eq!(item.session_id.as_str(), "s-2");
        assert_eq!(item.event.y, 8.0);
    }

    #[test]
    fn test_forwarded_input_serializes_flat() {
        let item = ForwardedInput {
            session_id: SessionId::new("0000000042"),
            event: RemoteInputEvent::new(MouseEvent::MouseDown(MouseKey::Right), Point::new(100.0, 370.0)),
        };

        let json = serde_json::to_string(&item).unwrap();

        assert_eq!(
            json,
            r#"{"session_id":"0000000042","event":{"MouseDown":"Right"},"x":100.0,"y":370.0}"#
        );
    }
}
