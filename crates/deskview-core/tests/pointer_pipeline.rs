//! Integration tests for the deskview-core pointer pipeline.
//!
//! These tests drive the public API the way a session view does: scrollbar
//! drags move the viewport, the placement follows the viewport, and pointer
//! signals are mapped and encoded into remote events.

use deskview_core::{
    input::encode, Axis, ButtonMask, ContentPlacement, CoordinateMapper, DisplayMode,
    MappingMode, MouseEvent, MouseKey, Point, RawPointerSignal, RemoteSize, ScrollEvent,
    ScrollbarController, Size, Viewport,
};

/// Maps and encodes `signal` the same way the session view does.
fn encode_through(
    signal: RawPointerSignal,
    viewport: &Viewport,
    mode: DisplayMode,
    mapping: MappingMode,
) -> deskview_core::RemoteInputEvent {
    let placement = ContentPlacement::compute(mode, viewport);
    let mapper =
        CoordinateMapper::for_remote(viewport.remote(), placement.frame_box.size(), mapping);
    let mapped = mapper.map(placement.to_frame_box(signal.position()));
    encode(&signal, mapped)
}

#[test]
fn test_scrollbar_drag_then_secondary_press_maps_into_scrolled_content() {
    // Arrange: 1920x1080 remote shown 1:1 in a 960x540 window.
    let remote = RemoteSize::new(1920, 1080).expect("valid size");
    let mut viewport = Viewport::new(remote, Size::new(960.0, 540.0));
    let mut vertical = ScrollbarController::new(Axis::Vertical);

    // Act: drag to trunk offset 270 on a 540 track representing 1080.
    let applied = vertical.on_drag(
        &ScrollEvent {
            axis: Axis::Vertical,
            trunk_offset: 270.0,
            trunk_width: 540.0,
            max_trunk_width: 1080.0,
        },
        &mut viewport,
    );
    let event = encode_through(
        RawPointerSignal::Down {
            buttons: ButtonMask(ButtonMask::SECONDARY),
            position: Point::new(100.0, 100.0),
        },
        &viewport,
        DisplayMode::Native,
        MappingMode::Scaled,
    );

    // Assert
    assert_eq!(applied, Some(270.0));
    assert!((0.0..=540.0).contains(&viewport.offset_y()));
    assert_eq!(event.event, MouseEvent::MouseDown(MouseKey::Right));
    assert_eq!(event.position(), Point::new(100.0, 370.0));
}

#[test]
fn test_fit_mode_press_maps_through_letterbox_scale() {
    // 1920x1080 fitted into a 960x740 window: 540 tall with 100px bars.
    let remote = RemoteSize::new(1920, 1080).expect("valid size");
    let viewport = Viewport::new(remote, Size::new(960.0, 740.0));

    let event = encode_through(
        RawPointerSignal::Down {
            buttons: ButtonMask(ButtonMask::PRIMARY),
            position: Point::new(480.0, 370.0),
        },
        &viewport,
        DisplayMode::Fit,
        MappingMode::Scaled,
    );

    assert_eq!(event.event, MouseEvent::MouseDown(MouseKey::Left));
    assert!((event.x - 960.0).abs() < 1e-6);
    assert!((event.y - 540.0).abs() < 1e-6);
}

#[test]
fn test_fit_mode_passthrough_forwards_unscaled_box_position() {
    let remote = RemoteSize::new(1920, 1080).expect("valid size");
    let viewport = Viewport::new(remote, Size::new(960.0, 540.0));

    let event = encode_through(
        RawPointerSignal::Hover {
            buttons: ButtonMask(0),
            down: false,
            position: Point::new(480.0, 270.0),
        },
        &viewport,
        DisplayMode::Fit,
        MappingMode::Passthrough,
    );

    assert_eq!(event.event, MouseEvent::MouseMove(MouseKey::None));
    assert_eq!(event.position(), Point::new(480.0, 270.0));
}

#[test]
fn test_resize_after_drag_keeps_offset_legal() {
    let remote = RemoteSize::new(1920, 1080).expect("valid size");
    let mut viewport = Viewport::new(remote, Size::new(960.0, 540.0));
    let mut horizontal = ScrollbarController::new(Axis::Horizontal);
    horizontal.on_drag(
        &ScrollEvent {
            axis: Axis::Horizontal,
            trunk_offset: 900.0,
            trunk_width: 960.0,
            max_trunk_width: 1920.0,
        },
        &mut viewport,
    );

    viewport.resize(1800.0, 540.0);

    assert_eq!(viewport.offset_x(), 120.0);
    assert_eq!(viewport.max_offset(Axis::Horizontal), 120.0);
}

#[test]
fn test_zero_sized_remote_is_rejected_before_any_mapping() {
    let result = CoordinateMapper::new(1920, 0, Size::new(960.0, 540.0), MappingMode::Scaled);
    assert!(result.is_err(), "zero-height remote content must be reported upward");
}
