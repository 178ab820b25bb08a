//! # deskview-core
//!
//! Shared library for DeskView containing the viewport model, scrollbar
//! handling, pointer coordinate mapping, and the pointer input encoder.
//!
//! It has zero dependencies on OS APIs, UI frameworks, or network sockets.
//!
//! # Architecture overview (for beginners)
//!
//! DeskView shows a remote computer's desktop inside a local window.  The remote
//! frames are decoded elsewhere; this crate answers the questions that sit
//! between the local window and the remote machine:
//!
//! - **`domain`** – Which part of the remote desktop is visible (`Viewport`),
//!   how dragging a scrollbar pans it (`ScrollbarController`), where the frame
//!   is drawn (`ContentPlacement`), and how a local pointer position lands on
//!   the remote pixel grid (`CoordinateMapper`).
//!
//! - **`input`** – How a raw pointer signal plus a button bitmask becomes one
//!   canonical `RemoteInputEvent` for the session transport.

pub mod domain;
pub mod input;

// Re-export the most-used types at the crate root so callers can write
// `deskview_core::Viewport` instead of `deskview_core::domain::viewport::Viewport`.
pub use domain::geometry::{Axis, GeometryError, Point, Rect, RemoteSize, Size};
pub use domain::mapper::{CoordinateMapper, MappingMode};
pub use domain::scrollbar::{ScrollEvent, ScrollbarController};
pub use domain::surface::{ContentPlacement, DisplayInfo, DisplayMode, FilterQuality, FrameSurface};
pub use domain::viewport::Viewport;
pub use input::{ButtonMask, MouseEvent, MouseKey, RawPointerSignal, RemoteInputEvent};
