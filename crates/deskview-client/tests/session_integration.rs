//! Integration tests for the session input pipeline.
//!
//! These tests exercise the client end-to-end: an input source feeds
//! `InputPump` + `SessionView`, and forwarded events come out of the
//! `ChannelForwarder` receiver exactly as the transport task would see them.

use std::sync::Arc;

use deskview_client::application::input_pump::{InputForwarder, InputPump};
use deskview_client::application::session_view::{
    SessionId, SessionView, ViewEffect, ViewMessage, ViewSettings,
};
use deskview_client::infrastructure::input_source::mock::MockInputSource;
use deskview_client::infrastructure::input_source::trace::parse_trace_line;
use deskview_client::infrastructure::input_source::InputSource;
use deskview_client::infrastructure::storage::config::AppConfig;
use deskview_client::infrastructure::transport::{ChannelForwarder, ForwardedInput};
use deskview_core::{
    Axis, ButtonMask, DisplayMode, MouseEvent, MouseKey, Point, RawPointerSignal, ScrollEvent,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn make_pump(
    mode: DisplayMode,
) -> (
    InputPump,
    Arc<ChannelForwarder>,
    tokio::sync::mpsc::UnboundedReceiver<ForwardedInput>,
) {
    let cfg = AppConfig::default();
    let settings = ViewSettings { display_mode: mode, mapping: cfg.pointer.mapping };
    let mut view = SessionView::create(
        SessionId::new("0000000042"),
        &cfg.session.display_info(),
        settings,
    )
    .expect("default session is valid");
    view.mount(cfg.session.visible_width, cfg.session.visible_height).expect("mount");

    let (forwarder, rx) = ChannelForwarder::new();
    let forwarder = Arc::new(forwarder);
    let pump = InputPump::new(view, Arc::clone(&forwarder) as Arc<dyn InputForwarder>);
    (pump, forwarder, rx)
}

fn vertical_drag(offset: f64) -> ViewMessage {
    ViewMessage::Scroll(ScrollEvent {
        axis: Axis::Vertical,
        trunk_offset: offset,
        trunk_width: 540.0,
        max_trunk_width: 1080.0,
    })
}

fn secondary_press(x: f64, y: f64) -> ViewMessage {
    ViewMessage::Pointer(RawPointerSignal::Down {
        buttons: ButtonMask(ButtonMask::SECONDARY),
        position: Point::new(x, y),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_drag_then_right_click_reaches_transport_at_content_pixel() {
    // Arrange
    let (mut pump, _forwarder, mut rx) = make_pump(DisplayMode::Native);

    // Act
    let reposition = pump.handle(vertical_drag(270.0));
    pump.handle(ViewMessage::ScrollEnd(Axis::Vertical));
    pump.handle(secondary_press(100.0, 100.0));

    // Assert
    assert!(matches!(reposition, Some(ViewEffect::Reposition(p)) if p.offset_y == 270.0));
    let item = rx.recv().await.expect("one forwarded event");
    assert_eq!(item.session_id, SessionId::new("0000000042"));
    assert_eq!(item.event.event, MouseEvent::MouseDown(MouseKey::Right));
    assert_eq!((item.event.x, item.event.y), (100.0, 370.0));
}

#[tokio::test]
async fn test_shutdown_mid_drag_emits_nothing_further() {
    // Arrange
    let (mut pump, forwarder, mut rx) = make_pump(DisplayMode::Native);
    pump.handle(vertical_drag(120.0));

    // Act
    pump.shutdown();
    pump.handle(vertical_drag(300.0));
    pump.handle(secondary_press(10.0, 10.0));
    drop(pump);
    drop(forwarder);

    // Assert
    assert!(rx.recv().await.is_none(), "no event may be forwarded after shutdown");
}

#[tokio::test]
async fn test_resize_after_drag_keeps_offset_within_new_range() {
    let (mut pump, _forwarder, _rx) = make_pump(DisplayMode::Native);
    pump.handle(vertical_drag(120.0));

    let effect = pump.handle(ViewMessage::Resize { width: 480.0, height: 270.0 });

    assert!(matches!(effect, Some(ViewEffect::Reposition(p)) if p.offset_y == 120.0));
    assert!(pump.view().viewport().offset_y() <= 810.0);
}

#[tokio::test]
async fn test_mock_source_drives_pump_until_stopped() {
    // Arrange
    let (mut pump, _forwarder, mut rx) = make_pump(DisplayMode::Fit);
    let source = MockInputSource::new();
    let messages = source.start().expect("start");

    // Act
    assert!(source.inject(secondary_press(480.0, 270.0)));
    assert!(source.inject(ViewMessage::Pointer(RawPointerSignal::ScrollWheel {
        delta: -120.0,
        position: Point::new(0.0, 0.0),
    })));
    source.stop();
    for msg in messages {
        pump.handle(msg);
    }

    // Assert
    let press = rx.recv().await.expect("press forwarded");
    assert_eq!((press.event.x, press.event.y), (960.0, 540.0));
    let wheel = rx.recv().await.expect("wheel forwarded");
    assert_eq!(wheel.event.event, MouseEvent::MouseScroll(-120.0));
    assert_eq!(pump.forwarded_count(), 2);
}

#[tokio::test]
async fn test_trace_lines_replay_through_pump() {
    // Arrange
    let trace = [
        r#"{"scroll":{"axis":"Vertical","trunk_offset":270.0,"trunk_width":540.0,"max_trunk_width":1080.0}}"#,
        r#"{"scroll_end":"Vertical"}"#,
        r#"{"pointer":{"type":"Down","buttons":2,"position":{"x":100.0,"y":100.0}}}"#,
    ];
    let (mut pump, _forwarder, mut rx) = make_pump(DisplayMode::Native);

    // Act
    for line in trace {
        let msg = parse_trace_line(line).expect("valid line").expect("not a comment");
        pump.handle(msg);
    }

    // Assert
    let item = rx.recv().await.expect("forwarded");
    let json = serde_json::to_string(&item).expect("serialize");
    assert_eq!(
        json,
        r#"{"session_id":"0000000042","event":{"MouseDown":"Right"},"x":100.0,"y":370.0}"#
    );
}
