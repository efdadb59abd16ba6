#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Button
// =============================================================

#[test]
fn button_equality() {
    assert_eq!(Button::Primary, Button::Primary);
    assert_ne!(Button::Primary, Button::Secondary);
    assert_ne!(Button::Middle, Button::Secondary);
}

#[test]
fn wheel_delta_fields() {
    let d = WheelDelta { dx: 1.5, dy: -3.0 };
    assert_eq!(d.dx, 1.5);
    assert_eq!(d.dy, -3.0);
}

// =============================================================
// PointerState
// =============================================================

#[test]
fn pointer_state_default_is_idle() {
    assert_eq!(PointerState::default(), PointerState::Idle);
}

#[test]
fn idle_pointer_has_no_velocity() {
    let mut state = PointerState::Idle;
    assert_eq!(state.advance(Point::new(10.0, 10.0)), None);
    assert_eq!(state, PointerState::Idle);
}

#[test]
fn pressed_pointer_reports_delta_and_tracks_position() {
    let mut state = PointerState::Pressed { last_screen: Point::new(100.0, 100.0) };
    assert_eq!(state.advance(Point::new(110.0, 95.0)), Some(Point::new(10.0, -5.0)));
    assert_eq!(state.advance(Point::new(110.0, 95.0)), Some(Point::new(0.0, 0.0)));
    assert_eq!(state, PointerState::Pressed { last_screen: Point::new(110.0, 95.0) });
}
