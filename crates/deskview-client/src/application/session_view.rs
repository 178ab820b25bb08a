//! SessionView: the state of one remote session as shown in the local window.
//!
//! The view is an explicit state struct rather than a reactive widget:
//!
//! ```text
//! create ──► mount ──► update(msg) … update(msg) ──► dispose
//! ```
//!
//! [`SessionView::update`] consumes one [`ViewMessage`] and returns zero or one
//! [`ViewEffect`].  It never performs I/O itself; the caller (see
//! [`super::input_pump::InputPump`]) decides what to do with the effect and the
//! host re-reads the placement after each update.
//!
//! Once disposed, the view ignores every message, so nothing queued behind a
//! teardown can leak out to the transport.

use std::fmt;

use deskview_core::{
    input::encode, Axis, ContentPlacement, CoordinateMapper, DisplayInfo, DisplayMode,
    FrameSurface, GeometryError, MappingMode, Point, RawPointerSignal, RemoteInputEvent, ScrollEvent,
    ScrollbarController, Viewport,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace};
use uuid::Uuid;

/// Opaque identifier of the remote device/session that forwarded events address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a random identifier for sessions the host has not named.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error type for session view operations.
#[derive(Debug, Error, PartialEq)]
pub enum ViewError {
    #[error("invalid session geometry: {0}")]
    Geometry(#[from] GeometryError),
    #[error("session view {0} has been disposed")]
    Disposed(SessionId),
}

/// Lifecycle of a session view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed; the host has not laid the view out yet.
    Created,
    /// Laid out and receiving input.
    Mounted,
    /// Torn down; all further messages are ignored.
    Disposed,
}

/// Presentation choices for a session view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSettings {
    pub display_mode: DisplayMode,
    pub mapping: MappingMode,
}

/// One host callback, expressed as a message.
///
/// # Serde representation
///
/// ```json
/// {"pointer":{"type":"Down","buttons":2,"position":{"x":100.0,"y":100.0}}}
/// {"scroll":{"axis":"Vertical","trunk_offset":270.0,"trunk_width":540.0,"max_trunk_width":1080.0}}
/// {"scroll_end":"Vertical"}
/// {"resize":{"width":480.0,"height":270.0}}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMessage {
    /// A pointer listener fired.
    Pointer(RawPointerSignal),
    /// A scrollbar reported a drag tick.
    Scroll(ScrollEvent),
    /// A scrollbar drag finished.
    ScrollEnd(Axis),
    /// The host layout changed the visible size.
    Resize { width: f64, height: f64 },
}

/// The single outbound effect of one update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEffect {
    /// Hand this event to the session transport.
    Forward(RemoteInputEvent),
    /// Offsets or layout changed; re-render the frame at this placement.
    Reposition(ContentPlacement),
}

/// State of one remote session view.
#[derive(Debug)]
pub struct SessionView {
    session_id: SessionId,
    state: LifecycleState,
    display_mode: DisplayMode,
    viewport: Viewport,
    horizontal: ScrollbarController,
    vertical: ScrollbarController,
    mapper: CoordinateMapper,
    surface: Option<FrameSurface>,
}

impl SessionView {
    /// Creates the view once the remote display's dimensions are known.
    ///
    /// Until [`mount`](Self::mount) is called the visible area equals the remote
    /// size.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Geometry`] if the display reports a zero dimension.
    pub fn create(
        session_id: SessionId,
        display_info: &DisplayInfo,
        settings: ViewSettings,
    ) -> Result<Self, ViewError> {
        let remote = display_info.remote_size()?;
        let viewport = Viewport::new(remote, remote.as_size());
        let placement = ContentPlacement::compute(settings.display_mode, &viewport);
        let mapper =
            CoordinateMapper::for_remote(remote, placement.frame_box.size(), settings.mapping);

        debug!(
            session_id = %session_id,
            display_name = %display_info.name,
            width = remote.width(),
            height = remote.height(),
            "session view created"
        );

        Ok(Self {
            session_id,
            state: LifecycleState::Created,
            display_mode: settings.display_mode,
            viewport,
            horizontal: ScrollbarController::new(Axis::Horizontal),
            vertical: ScrollbarController::new(Axis::Vertical),
            mapper,
            surface: None,
        })
    }

    /// Lays the view out with its first visible size.
    ///
    /// Mounting an already mounted view behaves like a resize.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Disposed`] after [`dispose`](Self::dispose).
    pub fn mount(
        &mut self,
        visible_width: f64,
        visible_height: f64,
    ) -> Result<ContentPlacement, ViewError> {
        self.ensure_live()?;
        self.viewport.resize(visible_width, visible_height);
        self.sync_mapper();
        self.state = LifecycleState::Mounted;
        info!(
            session_id = %self.session_id,
            visible_width,
            visible_height,
            mode = ?self.display_mode,
            "session view mounted"
        );
        Ok(self.placement())
    }

    /// Consumes one message and returns at most one effect.
    pub fn update(&mut self, msg: ViewMessage) -> Option<ViewEffect> {
        if self.state == LifecycleState::Disposed {
            trace!(session_id = %self.session_id, ?msg, "message after dispose ignored");
            return None;
        }

        match msg {
            ViewMessage::Pointer(signal) => Some(ViewEffect::Forward(self.encode_pointer(&signal))),
            ViewMessage::Scroll(event) => self.apply_scroll(&event),
            ViewMessage::ScrollEnd(axis) => {
                self.controller_mut(axis).end_drag();
                None
            }
            ViewMessage::Resize { width, height } => {
                self.viewport.resize(width, height);
                self.sync_mapper();
                Some(ViewEffect::Reposition(self.placement()))
            }
        }
    }

    /// Tears the view down.  Any in-flight scrollbar drag is dropped.
    ///
    /// Returns `true` if a drag was in progress.  Disposing twice is a no-op.
    pub fn dispose(&mut self) -> bool {
        if self.state == LifecycleState::Disposed {
            return false;
        }
        let dropped_h = self.horizontal.cancel();
        let dropped_v = self.vertical.cancel();
        self.state = LifecycleState::Disposed;
        info!(
            session_id = %self.session_id,
            dropped_drag = dropped_h || dropped_v,
            "session view disposed"
        );
        dropped_h || dropped_v
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn mapping_mode(&self) -> MappingMode {
        self.mapper.mode()
    }

    /// `true` while either scrollbar is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.horizontal.is_dragging() || self.vertical.is_dragging()
    }

    /// Where the frame surface should be drawn right now.
    pub fn placement(&self) -> ContentPlacement {
        ContentPlacement::compute(self.display_mode, &self.viewport)
    }

    /// `true` if `local` (visible-window coordinates) lies over drawn frame
    /// pixels rather than a letterbox bar or the area outside the frame.
    /// Pointer events elsewhere are still forwarded, clamped to the nearest edge.
    pub fn is_over_frame(&self, local: Point) -> bool {
        self.placement().frame.contains(local)
    }

    /// The frame surface supplied by the decode pipeline, if any.
    pub fn surface(&self) -> Option<&FrameSurface> {
        self.surface.as_ref()
    }

    // ── Presentation changes ──────────────────────────────────────────────────

    /// Switches between native scrolling and aspect-fit presentation.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> ContentPlacement {
        self.display_mode = mode;
        self.sync_mapper();
        self.placement()
    }

    pub fn set_mapping_mode(&mut self, mapping: MappingMode) {
        self.mapper.set_mode(mapping);
    }

    /// Attaches (or replaces) the frame surface handle.
    pub fn attach_surface(&mut self, surface: FrameSurface) {
        debug!(session_id = %self.session_id, texture_id = surface.texture_id, "frame surface attached");
        self.surface = Some(surface);
    }

    /// Freezes or unfreezes the attached surface.  No-op without a surface.
    pub fn set_frozen(&mut self, freeze: bool) {
        if let Some(surface) = self.surface.as_mut() {
            surface.freeze = freeze;
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn ensure_live(&self) -> Result<(), ViewError> {
        if self.state == LifecycleState::Disposed {
            return Err(ViewError::Disposed(self.session_id.clone()));
        }
        Ok(())
    }

    fn encode_pointer(&self, signal: &RawPointerSignal) -> RemoteInputEvent {
        let placement = self.placement();
        let local = signal.position();
        let event = encode(signal, self.mapper.map(placement.to_frame_box(local)));
        trace!(
            session_id = %self.session_id,
            ?signal,
            ?event,
            over_frame = placement.frame.contains(local),
            "pointer encoded"
        );
        event
    }

    fn apply_scroll(&mut self, event: &ScrollEvent) -> Option<ViewEffect> {
        if self.display_mode == DisplayMode::Fit {
            trace!(session_id = %self.session_id, "scroll ignored in fit mode");
            return None;
        }
        let axis = event.axis;
        let viewport = &mut self.viewport;
        let controller = match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        };
        controller.on_drag(event, viewport)?;
        Some(ViewEffect::Reposition(self.placement()))
    }

    fn controller_mut(&mut self, axis: Axis) -> &mut ScrollbarController {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    fn sync_mapper(&mut self) {
        let frame_box = self.placement().frame_box.size();
        self.mapper.set_frame_box(frame_box);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
