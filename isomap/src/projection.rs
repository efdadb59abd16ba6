//! Grid → isometric screen projection.
//!
//! The projection is a pure function of four constants. It is not inverted
//! anywhere: with spacing factors below 0.5 neighbouring diamonds overlap, so
//! a screen point does not identify a unique cell. Picking goes through the
//! per-tile hit regions in [`crate::hit`] instead.

#[cfg(test)]
#[path = "projection_test.rs"]
mod projection_test;

use crate::camera::Point;

/// Integer cell position on the world grid. May be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Tile footprint and spacing used by the projector and the hit regions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGeometry {
    pub tile_width: f64,
    pub tile_height: f64,
    pub horizontal_spacing_factor: f64,
    pub vertical_spacing_factor: f64,
}

impl TileGeometry {
    /// Project a grid cell to its isometric anchor point.
    ///
    /// `x = (gx - gy) * tile_width * h_factor`,
    /// `y = (gx + gy) * tile_height * v_factor`.
    #[must_use]
    pub fn project(&self, grid: GridPos) -> Point {
        let gx = f64::from(grid.x);
        let gy = f64::from(grid.y);
        Point::new(
            (gx - gy) * self.tile_width * self.horizontal_spacing_factor,
            (gx + gy) * self.tile_height * self.vertical_spacing_factor,
        )
    }
}
