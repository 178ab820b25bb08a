//! Geometry primitives shared by the viewport, the scrollbars, and the coordinate mapper.
//!
//! Two coordinate spaces meet here:
//!
//! - **Local space** – floating-point logical pixels reported by the host's layout
//!   and input system.  Sizes in this space ([`Size`]) may be zero while the host
//!   has not laid the view out yet.
//! - **Remote space** – the remote endpoint's native pixel grid.  Its dimensions
//!   ([`RemoteSize`]) are integers and are validated to be at least 1×1.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a collaborator supplies an invalid session geometry.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// The remote content has a zero width or height.
    #[error("remote content size must be at least 1x1, got {width}x{height}")]
    EmptyRemoteSize { width: u32, height: u32 },
}

/// One of the two scrollable axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A point in either local or remote space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point translated by `(-origin.x, -origin.y)`.
    pub fn relative_to(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// A size in local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the extent along `axis`.
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Returns `true` when either dimension is zero, negative, or not finite.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    /// Replaces non-finite or negative dimensions with zero.
    pub fn sanitized(self) -> Size {
        Size::new(sanitize_extent(self.width), sanitize_extent(self.height))
    }
}

/// The dimensions of the remote content in native pixels.
///
/// Construction rejects zero dimensions so every holder of a `RemoteSize` can
/// divide by its width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRemoteSize")]
pub struct RemoteSize {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct RawRemoteSize {
    width: u32,
    height: u32,
}

impl TryFrom<RawRemoteSize> for RemoteSize {
    type Error = GeometryError;

    fn try_from(raw: RawRemoteSize) -> Result<Self, Self::Error> {
        RemoteSize::new(raw.width, raw.height)
    }
}

impl RemoteSize {
    /// Validates and creates a remote size.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyRemoteSize`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::EmptyRemoteSize { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the extent along `axis` as a float.
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => f64::from(self.width),
            Axis::Vertical => f64::from(self.height),
        }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// The same dimensions as a local-space [`Size`] (native 1:1 presentation).
    pub fn as_size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// An axis-aligned rectangle in local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the rightmost X coordinate (exclusive).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the bottommost Y coordinate (exclusive).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns `true` if `p` lies inside the rectangle.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// Computes the largest rectangle with `aspect_ratio` (width / height) that fits
/// inside `container`, centred on the axis that has spare room.
///
/// The spare room on either side is the letterbox (top/bottom bars) or pillarbox
/// (left/right bars).  An empty container or an invalid ratio yields an empty
/// rectangle at the origin.
pub fn aspect_fit(container: Size, aspect_ratio: f64) -> Rect {
    if container.is_empty() || !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return Rect::default();
    }

    let container_ratio = container.width / container.height;
    if container_ratio > aspect_ratio {
        // Container is wider than the content: bars on the left and right.
        let width = container.height * aspect_ratio;
        Rect::new((container.width - width) / 2.0, 0.0, width, container.height)
    } else {
        let height = container.width / aspect_ratio;
        Rect::new(0.0, (container.height - height) / 2.0, container.width, height)
    }
}

/// Returns the largest legal offset when `visible` units of a `content`-long axis
/// are shown at once: `max(0, content - visible)`.
pub fn max_extent(content: f64, visible: f64) -> f64 {
    let extent = sanitize_extent(content) - sanitize_extent(visible);
    if extent > 0.0 {
        extent
    } else {
        0.0
    }
}

/// Forces `proposed` into `[0, max]`; non-finite proposals become 0.
pub fn clamp_to_range(proposed: f64, max: f64) -> f64 {
    if !proposed.is_finite() {
        return 0.0;
    }
    proposed.clamp(0.0, sanitize_extent(max))
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
