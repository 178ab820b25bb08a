//! Input event encoder: raw pointer signal → canonical remote input event.
//!
//! Encoding is stateless.  Every signal produces exactly one event; nothing is
//! filtered or coalesced here (rate limiting, if any, is the transport's job).
//!
//! | Signal        | Event                                   |
//! |---------------|-----------------------------------------|
//! | `Down`        | `MouseDown(resolve(buttons))`           |
//! | `Up`          | `MouseUp(resolve(buttons))`             |
//! | `Hover`, held | `MouseMove(resolve(buttons))`           |
//! | `Hover`, free | `MouseMove(None)`                       |
//! | `ScrollWheel` | `MouseScroll(delta)` – no button lookup |

use super::buttons::MouseKey;
use super::events::{MouseEvent, RawPointerSignal, RemoteInputEvent};
use crate::domain::geometry::Point;

/// Classifies `signal` into its [`MouseEvent`].
pub fn classify(signal: &RawPointerSignal) -> MouseEvent {
    match *signal {
        RawPointerSignal::Down { buttons, .. } => MouseEvent::MouseDown(MouseKey::resolve(buttons)),
        RawPointerSignal::Up { buttons, .. } => MouseEvent::MouseUp(MouseKey::resolve(buttons)),
        RawPointerSignal::Hover { buttons, down, .. } => {
            let key = if down {
                MouseKey::resolve(buttons)
            } else {
                MouseKey::None
            };
            MouseEvent::MouseMove(key)
        }
        RawPointerSignal::ScrollWheel { delta, .. } => MouseEvent::MouseScroll(delta),
    }
}

/// Encodes `signal` as a remote event located at `mapped` (remote coordinates).
pub fn encode(signal: &RawPointerSignal, mapped: Point) -> RemoteInputEvent {
    RemoteInputEvent::new(classify(signal), mapped)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
