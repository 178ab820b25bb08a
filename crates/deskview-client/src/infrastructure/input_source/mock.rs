//! Mock input source for unit and integration testing.
//!
//! Allows tests to inject synthetic [`ViewMessage`]s without a trace file or a
//! real host.

use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};

use super::{InputSource, SourceError, ViewMessage};

/// A mock implementation of [`InputSource`] that allows tests to inject messages.
#[derive(Default)]
pub struct MockInputSource {
    sender: Arc<Mutex<Option<Sender<ViewMessage>>>>,
}

impl MockInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Injects a synthetic message, as if produced by the host.
    ///
    /// Returns `false` if the source is not started, has been stopped, or its
    /// receiver was dropped.
    pub fn inject(&self, msg: ViewMessage) -> bool {
        let Ok(guard) = self.sender.lock() else {
            return false;
        };
        match guard.as_ref() {
            Some(sender) => sender.send(msg).is_ok(),
            None => false,
        }
    }
}

impl InputSource for MockInputSource {
    fn start(&self) -> Result<mpsc::Receiver<ViewMessage>, SourceError> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut guard) = self.sender.lock() {
            *guard = Some(tx);
        }
        Ok(rx)
    }

    fn stop(&self) {
        // Dropping the sender closes the channel.
        if let Ok(mut guard) = self.sender.lock() {
            *guard = None;
        }
    }
}
