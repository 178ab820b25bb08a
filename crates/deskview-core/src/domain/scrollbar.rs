//! Scrollbar controller: turns drag ticks on a scrollbar track into viewport offsets.
//!
//! A session view owns one controller per axis.  The host reports each drag tick
//! as a [`ScrollEvent`] carrying the thumb position along the track (the
//! *trunk offset*), the rendered track length, and the logical content length
//! that track represents.
//!
//! The content is translated by `-trunk_offset`, so a positive drag moves the
//! content left/up and the viewport offset into the content equals the trunk
//! offset.  That offset is clamped twice: first against the track geometry
//! (`max_trunk_width - trunk_width`), then by the [`Viewport`] against the
//! remote/visible sizes.  Nothing outside the legal range is ever applied.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::geometry::{clamp_to_range, max_extent, Axis};
use super::viewport::Viewport;

/// One drag tick reported by a scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollEvent {
    /// Which scrollbar produced the tick.
    pub axis: Axis,
    /// Drag position along the track.
    pub trunk_offset: f64,
    /// Current rendered track length.
    pub trunk_width: f64,
    /// Logical content length the track represents.
    pub max_trunk_width: f64,
}

impl ScrollEvent {
    /// Largest offset the track geometry allows: `max(0, max_trunk_width - trunk_width)`.
    pub fn legal_ceiling(&self) -> f64 {
        max_extent(self.max_trunk_width, self.trunk_width)
    }
}

/// Per-axis drag state.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollbarController {
    axis: Axis,
    dragging: bool,
    last_offset: f64,
}

impl ScrollbarController {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            dragging: false,
            last_offset: 0.0,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// `true` between the first drag tick and [`end_drag`](Self::end_drag) or
    /// [`cancel`](Self::cancel).
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The last offset this controller applied.
    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }

    /// Applies one drag tick to `viewport`.
    ///
    /// Returns the offset now in effect on this controller's axis, or `None` when
    /// the tick belongs to the other axis.
    pub fn on_drag(&mut self, event: &ScrollEvent, viewport: &mut Viewport) -> Option<f64> {
        if event.axis != self.axis {
            return None;
        }

        let proposed = clamp_to_range(event.trunk_offset, event.legal_ceiling());
        let applied = viewport.scroll_to(self.axis, proposed);
        self.dragging = true;
        self.last_offset = applied;

        trace!(
            axis = ?self.axis,
            trunk_offset = event.trunk_offset,
            applied,
            "scrollbar drag"
        );
        Some(applied)
    }

    /// Finishes the current drag; the applied offset stays in effect.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Drops an in-flight drag without applying anything further.
    ///
    /// Returns `true` if a drag was in progress.
    pub fn cancel(&mut self) -> bool {
        std::mem::replace(&mut self.dragging, false)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
