//! Frame presentation: how the externally decoded frame surface is sized and placed.
//!
//! The decode pipeline owns the frame itself and hands the view an opaque
//! [`FrameSurface`].  This module only decides where that surface goes inside the
//! visible window, for each [`DisplayMode`].

use serde::{Deserialize, Serialize};

use super::geometry::{aspect_fit, GeometryError, Point, Rect, RemoteSize};
use super::viewport::Viewport;

/// Sampling quality hint passed through to the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterQuality {
    None,
    #[default]
    Low,
    Medium,
    High,
}

/// Opaque handle to a continuously updated remote frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSurface {
    /// Texture identifier registered with the host renderer.
    pub texture_id: i64,
    /// When `true` the host keeps showing the last frame.
    pub freeze: bool,
    pub quality: FilterQuality,
}

impl FrameSurface {
    pub fn new(texture_id: i64) -> Self {
        Self {
            texture_id,
            freeze: false,
            quality: FilterQuality::default(),
        }
    }
}

/// Description of the remote monitor a session displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInfo {
    pub id: String,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub frame_rate: u8,
    pub is_primary: bool,
}

impl DisplayInfo {
    /// Validated content dimensions of this monitor.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyRemoteSize`] if the monitor reports a zero
    /// dimension.
    pub fn remote_size(&self) -> Result<RemoteSize, GeometryError> {
        RemoteSize::new(self.width, self.height)
    }
}

/// How the remote frame is presented in the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// 1:1 with the remote pixels; the viewport scrolls over it.
    #[default]
    Native,
    /// Scaled to fit the visible window, preserving aspect ratio; no scrolling.
    Fit,
}

/// Where the frame surface is drawn, in visible-window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentPlacement {
    /// The box the frame is laid out in.  Pointer positions are made relative to
    /// its origin before mapping.
    pub frame_box: Rect,
    /// The rectangle the frame pixels actually cover (inside `frame_box`).
    pub frame: Rect,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ContentPlacement {
    /// Computes the placement for `viewport` under `mode`.
    pub fn compute(mode: DisplayMode, viewport: &Viewport) -> Self {
        let remote = viewport.remote();
        match mode {
            DisplayMode::Native => {
                let origin = viewport.content_origin();
                let frame = Rect::new(
                    origin.x,
                    origin.y,
                    f64::from(remote.width()),
                    f64::from(remote.height()),
                );
                Self {
                    frame_box: frame,
                    frame,
                    offset_x: viewport.offset_x(),
                    offset_y: viewport.offset_y(),
                }
            }
            DisplayMode::Fit => {
                let visible = viewport.visible();
                Self {
                    frame_box: Rect::new(0.0, 0.0, visible.width, visible.height),
                    frame: aspect_fit(visible, remote.aspect_ratio()),
                    offset_x: 0.0,
                    offset_y: 0.0,
                }
            }
        }
    }

    /// Converts a visible-window position into frame-box coordinates.
    pub fn to_frame_box(&self, local: Point) -> Point {
        local.relative_to(self.frame_box.origin())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
