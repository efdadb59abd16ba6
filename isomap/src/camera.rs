#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{CAMERA_BOUNDS, DRAG_DAMPING, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Screen-space camera over the projected map.
///
/// `scroll_x` / `scroll_y` are the world coordinates of the top-left corner of
/// the view. `zoom` is a scale factor (1.0 = no zoom). The camera is
/// independent of the grid-space viewport window: panning never changes which
/// tiles are rendered.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub zoom: f64,
    /// Canvas width in CSS pixels.
    pub view_width: f64,
    /// Canvas height in CSS pixels.
    pub view_height: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { scroll_x: 0.0, scroll_y: 0.0, zoom: 1.0, view_width: 0.0, view_height: 0.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point { x: screen.x / self.zoom + self.scroll_x, y: screen.y / self.zoom + self.scroll_y }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point { x: (world.x - self.scroll_x) * self.zoom, y: (world.y - self.scroll_y) * self.zoom }
    }

    /// Update the canvas size and re-clamp the scroll.
    pub fn set_view_size(&mut self, width: f64, height: f64) {
        self.view_width = width.max(0.0);
        self.view_height = height.max(0.0);
        self.clamp_scroll();
    }

    /// Drag-pan by one input tick of pointer velocity (screen pixels).
    pub fn drag_by(&mut self, velocity: Point) {
        self.scroll_x -= velocity.x / DRAG_DAMPING;
        self.scroll_y -= velocity.y / DRAG_DAMPING;
        self.clamp_scroll();
    }

    /// Apply one wheel event. Positive `delta_y` zooms out, negative zooms in.
    ///
    /// Returns `true` when the zoom factor changed.
    pub fn zoom_by_wheel(&mut self, delta_y: f64) -> bool {
        let before = self.zoom;
        if delta_y > 0.0 {
            self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
        } else if delta_y < 0.0 {
            self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
        }
        self.clamp_scroll();
        (self.zoom - before).abs() > 1e-9
    }

    /// Scroll so that `world` sits in the middle of the view.
    pub fn center_on(&mut self, world: Point) {
        self.scroll_x = world.x - self.view_width / (2.0 * self.zoom);
        self.scroll_y = world.y - self.view_height / (2.0 * self.zoom);
        self.clamp_scroll();
    }

    /// World-space point currently at the middle of the view.
    #[must_use]
    pub fn center(&self) -> Point {
        self.screen_to_world(Point::new(self.view_width / 2.0, self.view_height / 2.0))
    }

    fn clamp_scroll(&mut self) {
        let (bx, by, bw, bh) = CAMERA_BOUNDS;
        self.scroll_x = clamp_span(self.scroll_x, bx, bx + bw - self.view_width / self.zoom);
        self.scroll_y = clamp_span(self.scroll_y, by, by + bh - self.view_height / self.zoom);
    }
}

/// Clamp `value` into `[lo, hi]`, pinning to `lo` when the span is inverted.
fn clamp_span(value: f64, lo: f64, hi: f64) -> f64 {
    value.min(hi).max(lo)
}
