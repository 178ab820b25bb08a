//! Viewport domain entity.
//!
//! The viewport describes which sub-region of the remote content is visible in
//! the local view.  The remote content is fixed for the life of a session; the
//! visible window follows the host layout and may change on every resize.
//!
//! # Offset intent
//!
//! Each axis stores the offset the user last scrolled to (the *intent*) and
//! clamps it on read against the current bounds.  Shrinking and re-expanding the
//! visible area therefore restores as much of the earlier position as is legal
//! instead of ratcheting the offset toward zero.

use tracing::trace;

use super::geometry::{clamp_to_range, max_extent, Axis, Point, RemoteSize, Size};

/// Scroll state of one session view.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    remote: RemoteSize,
    visible: Size,
    intent_x: f64,
    intent_y: f64,
}

impl Viewport {
    /// Creates a viewport at offset (0, 0).
    pub fn new(remote: RemoteSize, visible: Size) -> Self {
        Self {
            remote,
            visible: visible.sanitized(),
            intent_x: 0.0,
            intent_y: 0.0,
        }
    }

    pub fn remote(&self) -> RemoteSize {
        self.remote
    }

    pub fn visible(&self) -> Size {
        self.visible
    }

    /// Returns `max(0, remote - visible)` for `axis`.
    pub fn max_offset(&self, axis: Axis) -> f64 {
        max_extent(self.remote.along(axis), self.visible.along(axis))
    }

    /// Forces `proposed` into the legal offset range for `axis`.
    ///
    /// Pure and idempotent: `clamp_offset(a, clamp_offset(a, x)) == clamp_offset(a, x)`.
    pub fn clamp_offset(&self, axis: Axis, proposed: f64) -> f64 {
        clamp_to_range(proposed, self.max_offset(axis))
    }

    /// The current (clamped) offset along `axis`.
    pub fn offset(&self, axis: Axis) -> f64 {
        self.clamp_offset(axis, self.intent(axis))
    }

    pub fn offset_x(&self) -> f64 {
        self.offset(Axis::Horizontal)
    }

    pub fn offset_y(&self) -> f64 {
        self.offset(Axis::Vertical)
    }

    /// Scrolls `axis` to `offset` and returns the clamped offset now in effect.
    ///
    /// The clamped value becomes the new intent for that axis.
    pub fn scroll_to(&mut self, axis: Axis, offset: f64) -> f64 {
        let clamped = self.clamp_offset(axis, offset);
        match axis {
            Axis::Horizontal => self.intent_x = clamped,
            Axis::Vertical => self.intent_y = clamped,
        }
        clamped
    }

    /// Applies a new visible size from the host layout.
    ///
    /// The stored intent is kept; only the reported offsets are re-clamped.
    pub fn resize(&mut self, visible_width: f64, visible_height: f64) {
        self.visible = Size::new(visible_width, visible_height).sanitized();
        trace!(
            visible_width = self.visible.width,
            visible_height = self.visible.height,
            offset_x = self.offset_x(),
            offset_y = self.offset_y(),
            "viewport resized"
        );
    }

    /// Translation at which the remote content is drawn inside the visible window.
    pub fn content_origin(&self) -> Point {
        Point::new(-self.offset_x(), -self.offset_y())
    }

    fn intent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.intent_x,
            Axis::Vertical => self.intent_y,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
