//! Pointer input: button resolution, raw signals, canonical events, and encoding.

pub mod buttons;
pub mod encoder;
pub mod events;

pub use buttons::{ButtonMask, MouseKey, UnknownMouseKey};
pub use encoder::{classify, encode};
pub use events::{MouseEvent, RawPointerSignal, RemoteInputEvent};
