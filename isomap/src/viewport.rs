//! Viewport windower: the bounded grid rectangle currently eligible for rendering.
//!
//! The window is `width × height` cells with its top-left cell at `origin`.
//! Every update clamps the origin so the window never extends past the world
//! bounds on the low side, and never past them on the high side unless the
//! world is narrower than the window (the origin then pins to the world
//! minimum). Clicking a tile on the window's outer ring shifts the window by
//! `shift_delta` cells toward that side.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::projection::GridPos;
use crate::world::{Tile, WorldBounds, WorldIndex};

/// Direction of an edge-triggered shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward smaller grid x.
    Left,
    /// Toward larger grid x.
    Right,
    /// Toward smaller grid y.
    Up,
    /// Toward larger grid y.
    Down,
}

/// Sliding window over the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportWindow {
    origin: GridPos,
    width: i32,
    height: i32,
    shift_delta: i32,
    bounds: Option<WorldBounds>,
}

impl ViewportWindow {
    /// A window with no world attached yet. `origin` starts at `(0, 0)`.
    #[must_use]
    pub fn new(width: i32, height: i32, shift_delta: i32) -> Self {
        Self { origin: GridPos::default(), width, height, shift_delta, bounds: None }
    }

    #[must_use]
    pub fn origin(&self) -> GridPos {
        self.origin
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub fn bounds(&self) -> Option<WorldBounds> {
        self.bounds
    }

    /// Bottom-right cell of the window, saturating at the grid limit.
    #[must_use]
    pub fn far_corner(&self) -> GridPos {
        GridPos::new(
            self.origin.x.saturating_add(self.width - 1),
            self.origin.y.saturating_add(self.height - 1),
        )
    }

    /// Attach new world bounds.
    ///
    /// The first world centres the window on it; later worlds keep the
    /// current origin and only re-clamp it. `None` (an empty world) detaches.
    pub fn rebase(&mut self, bounds: Option<WorldBounds>) {
        let first = self.bounds.is_none();
        self.bounds = bounds;
        let Some(b) = bounds else {
            return;
        };
        self.origin = if first { self.centered_origin(&b) } else { self.clamp(self.origin, &b) };
    }

    /// Origin that centres the window on the world's bounding-box midpoint.
    #[must_use]
    pub fn centered_origin(&self, bounds: &WorldBounds) -> GridPos {
        let x = (i64::from(bounds.min_x) + i64::from(bounds.max_x) + 1 - i64::from(self.width)).div_euclid(2);
        let y = (i64::from(bounds.min_y) + i64::from(bounds.max_y) + 1 - i64::from(self.height)).div_euclid(2);
        GridPos::new(
            clamp_axis(x, bounds.min_x, bounds.max_x, self.width),
            clamp_axis(y, bounds.min_y, bounds.max_y, self.height),
        )
    }

    /// Clamp an origin so the window stays inside `bounds`.
    #[must_use]
    pub fn clamp(&self, origin: GridPos, bounds: &WorldBounds) -> GridPos {
        GridPos::new(
            clamp_axis(i64::from(origin.x), bounds.min_x, bounds.max_x, self.width),
            clamp_axis(i64::from(origin.y), bounds.min_y, bounds.max_y, self.height),
        )
    }

    /// Whether `pos` falls inside the window anchored at `origin`.
    #[must_use]
    pub fn contains_at(&self, origin: GridPos, pos: GridPos) -> bool {
        pos.x >= origin.x
            && i64::from(pos.x) <= last_cell(origin.x, self.width)
            && pos.y >= origin.y
            && i64::from(pos.y) <= last_cell(origin.y, self.height)
    }

    /// Whether `pos` falls inside the current window.
    #[must_use]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.contains_at(self.origin, pos)
    }

    /// Tiles inside the window anchored at `origin`. Order is unspecified.
    #[must_use]
    pub fn visible_set<'a>(&self, origin: GridPos, index: &'a WorldIndex) -> Vec<&'a Tile> {
        index.tiles().filter(|t| self.contains_at(origin, t.grid())).collect()
    }

    /// Tiles inside the current window.
    #[must_use]
    pub fn visible_tiles<'a>(&self, index: &'a WorldIndex) -> Vec<&'a Tile> {
        self.visible_set(self.origin, index)
    }

    /// Origin after shifting `current` by `shift_delta` toward `direction`,
    /// clamped to the world. Returns `current` unchanged at a boundary or when
    /// no world is attached.
    #[must_use]
    pub fn request_shift(&self, direction: Direction, current: GridPos) -> GridPos {
        let Some(bounds) = self.bounds else {
            return current;
        };
        let d = self.shift_delta;
        let moved = match direction {
            Direction::Left => GridPos::new(current.x.saturating_sub(d), current.y),
            Direction::Right => GridPos::new(current.x.saturating_add(d), current.y),
            Direction::Up => GridPos::new(current.x, current.y.saturating_sub(d)),
            Direction::Down => GridPos::new(current.x, current.y.saturating_add(d)),
        };
        self.clamp(moved, &bounds)
    }

    /// Shift the window in place. Returns `true` if the origin moved.
    pub fn shift(&mut self, direction: Direction) -> bool {
        let next = self.request_shift(direction, self.origin);
        let moved = next != self.origin;
        self.origin = next;
        moved
    }

    /// Sides of the current window whose outermost row/column contains `pos`.
    ///
    /// Interior cells return nothing; corner cells return two directions.
    #[must_use]
    pub fn edge_directions(&self, pos: GridPos) -> Vec<Direction> {
        if !self.contains(pos) {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(2);
        if i64::from(pos.x) == last_cell(self.origin.x, self.width) {
            out.push(Direction::Right);
        }
        if pos.x == self.origin.x {
            out.push(Direction::Left);
        }
        if i64::from(pos.y) == last_cell(self.origin.y, self.height) {
            out.push(Direction::Down);
        }
        if pos.y == self.origin.y {
            out.push(Direction::Up);
        }
        out
    }
}

/// Last cell covered by `extent` cells starting at `origin`. Widened so
/// windows near the grid limits cannot overflow.
fn last_cell(origin: i32, extent: i32) -> i64 {
    i64::from(origin) + i64::from(extent) - 1
}

/// Clamp one axis of the origin to `[min, max - extent + 1]`, never below `min`.
fn clamp_axis(value: i64, min: i32, max: i32, extent: i32) -> i32 {
    let upper = (i64::from(max) - i64::from(extent) + 1).max(i64::from(min));
    i32::try_from(value.clamp(i64::from(min), upper)).unwrap_or(min)
}
