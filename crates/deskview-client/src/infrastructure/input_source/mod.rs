//! Input sources: where host messages for the session view come from.
//!
//! A real embedding host produces [`ViewMessage`]s from its pointer listeners,
//! scrollbar callbacks, and layout passes.  The headless viewer replays them
//! from a JSON-lines trace instead ([`trace::TraceInputSource`]).
//!
//! Sources deliver messages over a `std::sync::mpsc` channel from their own
//! thread, so the consumer can block on `recv()` without an async runtime.
//!
//! # Testability
//!
//! The `InputSource` trait allows tests to inject synthetic messages through
//! [`mock::MockInputSource`].

use std::path::PathBuf;
use std::sync::mpsc;

use crate::application::session_view::ViewMessage;

pub mod mock;
pub mod trace;

/// Error type for input source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to open trace {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to spawn reader thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("input source has already been started")]
    AlreadyStarted,
}

/// Trait abstracting host message production.
pub trait InputSource: Send {
    /// Starts the source and returns a receiver for its messages.
    ///
    /// The channel closes when the source is exhausted or stopped.
    fn start(&self) -> Result<mpsc::Receiver<ViewMessage>, SourceError>;
    /// Stops the source; no further messages are sent.
    fn stop(&self);
}
