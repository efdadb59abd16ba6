//! Input model: mouse buttons, wheel deltas and the drag tracker.
//!
//! The engine receives raw screen-space events from the host. A press on the
//! primary button both attempts a selection and starts a potential camera
//! drag; `PointerState` remembers the last pointer position between moves so
//! the engine can turn consecutive moves into a drag velocity.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Pointer gesture tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerState {
    /// No button held.
    #[default]
    Idle,
    /// Primary button held; moves pan the camera.
    Pressed {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
}

impl PointerState {
    /// Record a move to `screen` and return the pointer velocity since the
    /// previous event. Returns `None` when no button is held.
    pub fn advance(&mut self, screen: Point) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::Pressed { last_screen } => {
                let velocity = Point::new(screen.x - last_screen.x, screen.y - last_screen.y);
                *last_screen = screen;
                Some(velocity)
            }
        }
    }
}
