//! Canonical remote input events and the raw pointer signals they are built from.

use serde::{Deserialize, Serialize};

use super::buttons::{ButtonMask, MouseKey};
use crate::domain::geometry::Point;

/// One raw pointer signal from the host input system.
///
/// Positions are in visible-window coordinates.
///
/// # Serde representation
///
/// ```json
/// {"type":"Down","buttons":2,"position":{"x":100.0,"y":100.0}}
/// {"type":"Hover","buttons":0,"down":false,"position":{"x":5.0,"y":9.0}}
/// {"type":"ScrollWheel","delta":-120.0,"position":{"x":5.0,"y":9.0}}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RawPointerSignal {
    /// A button was pressed.
    Down { buttons: ButtonMask, position: Point },
    /// A button was released.
    Up { buttons: ButtonMask, position: Point },
    /// The pointer moved.  `down` is the host's "a button is held" flag.
    Hover {
        buttons: ButtonMask,
        #[serde(default)]
        down: bool,
        position: Point,
    },
    /// The vertical wheel turned by a signed `delta`.
    ScrollWheel { delta: f64, position: Point },
}

impl RawPointerSignal {
    /// The local position carried by every variant.
    pub fn position(&self) -> Point {
        match *self {
            RawPointerSignal::Down { position, .. }
            | RawPointerSignal::Up { position, .. }
            | RawPointerSignal::Hover { position, .. }
            | RawPointerSignal::ScrollWheel { position, .. } => position,
        }
    }
}

/// The action part of a remote input event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MouseEvent {
    MouseDown(MouseKey),
    MouseUp(MouseKey),
    MouseMove(MouseKey),
    /// Signed vertical wheel delta, as reported by the host.
    MouseScroll(f64),
}

/// One user input action addressed to the remote endpoint, in remote pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemoteInputEvent {
    pub event: MouseEvent,
    pub x: f64,
    pub y: f64,
}

impl RemoteInputEvent {
    pub fn new(event: MouseEvent, at: Point) -> Self {
        Self {
            event,
            x: at.x,
            y: at.y,
        }
    }

    /// The remote position as a [`Point`].
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_signal_deserializes_tagged_json() {
        let json = r#"{"type":"Down","buttons":2,"position":{"x":100.0,"y":50.0}}"#;
        let signal: RawPointerSignal = serde_json::from_str(json).unwrap();
        assert_eq!(
            signal,
            RawPointerSignal::Down {
                buttons: ButtonMask(2),
                position: Point::new(100.0, 50.0),
            }
        );
    }

    #[test]
    fn test_hover_down_flag_defaults_to_false() {
        let json = r#"{"type":"Hover","buttons":1,"position":{"x":0.0,"y":0.0}}"#;
        let signal: RawPointerSignal = serde_json::from_str(json).unwrap();
        assert!(matches!(signal, RawPointerSignal::Hover { down: false, .. }));
    }

    #[test]
    fn test_position_is_available_for_every_variant() {
        let p = Point::new(3.0, 4.0);
        let signals = [
            RawPointerSignal::Down { buttons: ButtonMask(1), position: p },
            RawPointerSignal::Up { buttons: ButtonMask(1), position: p },
            RawPointerSignal::Hover { buttons: ButtonMask(0), down: false, position: p },
            RawPointerSignal::ScrollWheel { delta: 1.0, position: p },
        ];
        for signal in signals {
            assert_eq!(signal.position(), p);
        }
    }

    #[test]
    fn test_remote_input_event_serializes_externally_tagged_event() {
        let ev = RemoteInputEvent::new(MouseEvent::MouseDown(MouseKey::Right), Point::new(1.0, 2.0));
        let json = serde_json::to_string(&ev).unwrap();
        assert_eq!(json, r#"{"event":{"MouseDown":"Right"},"x":1.0,"y":2.0}"#);
    }
}
