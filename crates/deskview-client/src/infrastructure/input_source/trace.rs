//! JSON-lines trace replay.
//!
//! Each non-empty line of a trace is one [`ViewMessage`] in its serde form:
//!
//! ```text
//! {"resize":{"width":960.0,"height":540.0}}
//! {"scroll":{"axis":"Vertical","trunk_offset":270.0,"trunk_width":540.0,"max_trunk_width":1080.0}}
//! {"scroll_end":"Vertical"}
//! {"pointer":{"type":"Down","buttons":2,"position":{"x":100.0,"y":100.0}}}
//! ```
//!
//! Lines starting with `#` are comments.  A malformed line is logged and
//! skipped; it never stops the replay.
//!
//! [`TraceInputSource::stop`] sets a shared flag.  The reader thread checks it
//! between lines, and the consumer passes the same flag
//! ([`TraceInputSource::stop_flag`]) to
//! [`InputPump::run`](crate::application::input_pump::InputPump::run) so that
//! lines already queued in the channel are discarded too.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc, Arc,
};

use tracing::{debug, warn};

use super::{InputSource, SourceError, ViewMessage};

/// Where a trace is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceOrigin {
    Stdin,
    File(PathBuf),
}

/// Replays a JSON-lines trace on a background thread.
pub struct TraceInputSource {
    origin: TraceOrigin,
    stopped: Arc<AtomicBool>,
    started: AtomicBool,
}

impl TraceInputSource {
    pub fn new(origin: TraceOrigin) -> Self {
        Self {
            origin,
            stopped: Arc::new(AtomicBool::new(false)),
            started: AtomicBool::new(false),
        }
    }

    pub fn origin(&self) -> &TraceOrigin {
        &self.origin
    }

    /// The flag [`stop`](InputSource::stop) sets.  Consumers check it before
    /// dispatching each received message.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stopped)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    fn open(&self) -> Result<Box<dyn BufRead + Send>, SourceError> {
        match &self.origin {
            TraceOrigin::Stdin => Ok(Box::new(BufReader::new(std::io::stdin()))),
            TraceOrigin::File(path) => {
                let file = File::open(path).map_err(|source| SourceError::Open {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

impl InputSource for TraceInputSource {
    fn start(&self) -> Result<mpsc::Receiver<ViewMessage>, SourceError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(SourceError::AlreadyStarted);
        }
        let reader = self.open()?;
        let (tx, rx) = mpsc::channel();
        let stopped = Arc::clone(&self.stopped);

        std::thread::Builder::new()
            .name("deskview-trace".to_string())
            .spawn(move || {
                let replayed = replay_lines(reader, &tx, &stopped);
                debug!(replayed, "trace replay finished");
            })
            .map_err(SourceError::Spawn)?;

        Ok(rx)
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

/// Parses one trace line.  Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_trace_line(line: &str) -> Result<Option<ViewMessage>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Sends every parseable line of `reader` to `tx` until EOF, a read error,
/// `stopped` being set, or the receiver going away.  Returns the number sent.
fn replay_lines<R: BufRead>(reader: R, tx: &mpsc::Sender<ViewMessage>, stopped: &AtomicBool) -> usize {
    let mut sent = 0;
    for (index, line) in reader.lines().enumerate() {
        if stopped.load(Ordering::SeqCst) {
            break;
        }
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(line = index + 1, "trace read failed: {e}");
                break;
            }
        };
        match parse_trace_line(&line) {
            Ok(Some(msg)) => {
                if tx.send(msg).is_err() {
                    break;
                }
                sent += 1;
            }
            Ok(None) => {}
            Err(e) => warn!(line = index + 1, "skipping malformed trace line: {e}"),
        }
    }
    sent
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use deskview_core::{Axis, RawPointerSignal};
    use std::io::Cursor;

    const TRACE: &str = r#"
# drag then right-click
{"scroll":{"axis":"Vertical","trunk_offset":270.0,"trunk_width":540.0,"max_trunk_width":1080.0}}
{"scroll_end":"Vertical"}
not json at all
{"pointer":{"type":"Down","buttons":2,"position":{"x":100.0,"y":100.0}}}
"#;

    #[test]
    fn test_parse_trace_line_skips_blank_and_comment() {
        assert_eq!(parse_trace_line("   ").unwrap(), None);
        assert_eq!(parse_trace_line("# note").unwrap(), None);
    }

    #[test]
    fn test_parse_trace_line_reads_resize() {
        let msg = parse_trace_line(r#"{"resize":{"width":480.0,"height":270.0}}"#).unwrap();
        assert_eq!(msg, Some(ViewMessage::Resize { width: 480.0, height: 270.0 }));
    }

    #[test]
    fn test_parse_trace_line_rejects_unknown_message() {
        assert!(parse_trace_line(r#"{"zoom":2.0}"#).is_err());
    }

    #[test]
    fn test_replay_lines_skips_malformed_and_keeps_order() {
        // Arrange
        let (tx, rx) = mpsc::channel();
        let stopped = AtomicBool::new(false);

        // Act
        let sent = replay_lines(Cursor::new(TRACE), &tx, &stopped);
        drop(tx);

        // Assert
        assert_eq!(sent, 3);
        let messages: Vec<ViewMessage> = rx.iter().collect();
        assert!(matches!(messages[0], ViewMessage::Scroll(ev) if ev.trunk_offset == 270.0));
        assert_eq!(messages[1], ViewMessage::ScrollEnd(Axis::Vertical));
        assert!(matches!(messages[2], ViewMessage::Pointer(RawPointerSignal::Down { .. })));
    }

    #[test]
    fn test_replay_lines_stops_when_stopped() {
        let (tx, rx) = mpsc::channel();
        let stopped = AtomicBool::new(true);

        let sent = replay_lines(Cursor::new(TRACE), &tx, &stopped);
        drop(tx);

        assert_eq!(sent, 0);
        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_trace_source_replays_file_then_closes() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("deskview_trace_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.jsonl");
        std::fs::write(&path, TRACE).unwrap();
        let source = TraceInputSource::new(TraceOrigin::File(path));

        // Act
        let rx = source.start().expect("start");
        let messages: Vec<ViewMessage> = rx.iter().collect();

        // Assert
        assert_eq!(messages.len(), 3);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_trace_source_missing_file_returns_open_error() {
        let source = TraceInputSource::new(TraceOrigin::File(PathBuf::from(
            "/nonexistent/deskview/trace.jsonl",
        )));
        assert!(matches!(source.start(), Err(SourceError::Open { .. })));
    }

    #[test]
    fn test_trace_source_start_twice_is_rejected() {
        let dir = std::env::temp_dir().join(format!("deskview_trace_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("empty.jsonl");
        std::fs::write(&path, "").unwrap();
        let source = TraceInputSource::new(TraceOrigin::File(path));

        let _rx = source.start().expect("first start");

        assert!(matches!(source.start(), Err(SourceError::AlreadyStarted)));
        std::fs::remove_dir_all(&dir).ok();
    }

    // ── stop ──────────────────────────────────────────────────────────────────

    fn write_press_trace(lines: usize) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("deskview_trace_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("presses.jsonl");
        let line = r#"{"pointer":{"type":"Down","buttons":2,"position":{"x":10.0,"y":10.0}}}"#;
        std::fs::write(&path, vec![line; lines].join("\n")).unwrap();
        (dir, path)
    }

    #[test]
    fn test_stop_before_start_replays_nothing() {
        let (dir, path) = write_press_trace(10);
        let source = TraceInputSource::new(TraceOrigin::File(path));

        source.stop();
        let rx = source.start().expect("start");

        assert!(source.is_stopped());
        assert_eq!(rx.iter().count(), 0);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_stop_discards_lines_already_queued_for_the_pump() {
        use crate::application::input_pump::{InputForwarder, InputPump};
        use crate::application::session_view::{SessionId, SessionView, ViewSettings};
        use crate::infrastructure::transport::ChannelForwarder;
        use deskview_core::DisplayInfo;

        // Arrange: the whole trace is queued before stop() is called.
        let (dir, path) = write_press_trace(1000);
        let source = TraceInputSource::new(TraceOrigin::File(path));
        let rx = source.start().expect("start");
        std::thread::sleep(std::time::Duration::from_millis(200));

        let display = DisplayInfo {
            id: "0".to_string(),
            name: "Primary".to_string(),
            width: 1920,
            height: 1080,
            frame_rate: 30,
            is_primary: true,
        };
        let view = SessionView::create(SessionId::new("s"), &display, ViewSettings::default()).unwrap();
        let (forwarder, mut forwarded_rx) = ChannelForwarder::new();
        let mut pump = InputPump::new(view, Arc::new(forwarder) as Arc<dyn InputForwarder>);

        // Act
        source.stop();
        let forwarded = pump.run(&rx, &source.stop_flag());

        // Assert
        assert_eq!(forwarded, 0);
        assert!(forwarded_rx.try_recv().is_err());
        std::fs::remove_dir_all(&dir).ok();
    }
}
