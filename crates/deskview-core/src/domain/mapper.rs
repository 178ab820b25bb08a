//! Coordinate mapper: local frame-box coordinates → remote native pixels.
//!
//! The remote frame is drawn aspect-fitted inside a *frame box*.  When the box's
//! aspect ratio differs from the remote content, bars appear on one axis and the
//! drawn content is offset by the bar thickness.  In [`MappingMode::Scaled`] the
//! mapper removes that offset and rescales:
//!
//! ```text
//! mapped_x = (local_x - letterbox_x) * remote_width  / displayed_width
//! mapped_y = (local_y - letterbox_y) * remote_height / displayed_height
//! ```
//!
//! [`MappingMode::Passthrough`] forwards box-local coordinates without correction,
//! which is only right when the frame is shown at native resolution.
//!
//! In both modes the result is clamped to `[0, remote - 1]` on each axis, so a
//! pointer over a bar or outside the box reports the nearest remote edge.

use serde::{Deserialize, Serialize};

use super::geometry::{aspect_fit, GeometryError, Point, Rect, RemoteSize, Size};

/// How local positions are converted to remote positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingMode {
    /// Remove the letterbox offset and scale to the remote grid.
    #[default]
    Scaled,
    /// Forward box-local coordinates as-is (clamped to the remote grid).
    Passthrough,
}

/// Maps pointer positions for one frame box.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMapper {
    remote: RemoteSize,
    frame_box: Size,
    mode: MappingMode,
    placement: Rect,
}

impl CoordinateMapper {
    /// Creates a mapper from raw remote dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyRemoteSize`] if either remote dimension is
    /// zero.  That is a session-setup fault; the mapper never divides by it.
    pub fn new(
        remote_width: u32,
        remote_height: u32,
        frame_box: Size,
        mode: MappingMode,
    ) -> Result<Self, GeometryError> {
        let remote = RemoteSize::new(remote_width, remote_height)?;
        Ok(Self::for_remote(remote, frame_box, mode))
    }

    /// Creates a mapper for an already validated remote size.
    pub fn for_remote(remote: RemoteSize, frame_box: Size, mode: MappingMode) -> Self {
        let frame_box = frame_box.sanitized();
        Self {
            remote,
            frame_box,
            mode,
            placement: aspect_fit(frame_box, remote.aspect_ratio()),
        }
    }

    pub fn remote(&self) -> RemoteSize {
        self.remote
    }

    pub fn mode(&self) -> MappingMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: MappingMode) {
        self.mode = mode;
    }

    pub fn frame_box(&self) -> Size {
        self.frame_box
    }

    /// Updates the frame box after a host layout change.
    pub fn set_frame_box(&mut self, frame_box: Size) {
        self.frame_box = frame_box.sanitized();
        self.placement = aspect_fit(self.frame_box, self.remote.aspect_ratio());
    }

    /// Where the content is drawn inside the frame box.
    pub fn placement(&self) -> Rect {
        self.placement
    }

    /// Remote pixels per displayed pixel on each axis, or `None` while the
    /// frame box has no area.
    pub fn scale(&self) -> Option<(f64, f64)> {
        if self.placement.size().is_empty() {
            return None;
        }
        Some((
            f64::from(self.remote.width()) / self.placement.width,
            f64::from(self.remote.height()) / self.placement.height,
        ))
    }

    /// Converts a frame-box-local position into remote coordinates.
    pub fn map(&self, local: Point) -> Point {
        let raw = match self.mode {
            MappingMode::Passthrough => local,
            MappingMode::Scaled => match self.scale() {
                Some((sx, sy)) => Point::new(
                    (local.x - self.placement.x) * sx,
                    (local.y - self.placement.y) * sy,
                ),
                None => Point::default(),
            },
        };
        Point::new(
            clamp_coordinate(raw.x, self.remote.width()),
            clamp_coordinate(raw.y, self.remote.height()),
        )
    }
}

/// Clamps `v` to the last valid pixel index of an `extent`-pixel axis.
fn clamp_coordinate(v: f64, extent: u32) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    v.clamp(0.0, f64::from(extent - 1))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
