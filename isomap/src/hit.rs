#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::projection::TileGeometry;
use crate::scene::Scene;
use crate::world::TileId;

/// A tile's interactive area: a rhombus whose bottom vertex sits on the
/// sprite anchor and which spans one tile footprint above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diamond {
    pub top: Point,
    pub right: Point,
    pub bottom: Point,
    pub left: Point,
}

impl Diamond {
    #[must_use]
    pub fn at(anchor: Point, geometry: &TileGeometry) -> Self {
        let half_w = geometry.tile_width / 2.0;
        let half_h = geometry.tile_height / 2.0;
        Self {
            top: Point::new(anchor.x, anchor.y - geometry.tile_height),
            right: Point::new(anchor.x + half_w, anchor.y - half_h),
            bottom: anchor,
            left: Point::new(anchor.x - half_w, anchor.y - half_h),
        }
    }

    /// Vertices clockwise from the top.
    #[must_use]
    pub fn vertices(&self) -> [Point; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.top.x, (self.top.y + self.bottom.y) / 2.0)
    }

    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        polygon_contains(&self.vertices(), pt)
    }
}

/// Even-odd point-in-polygon test. Points exactly on an edge may go either way.
#[must_use]
pub fn polygon_contains(vertices: &[Point], pt: Point) -> bool {
    let mut inside = false;
    let n = vertices.len();
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[j];
        if (a.y > pt.y) != (b.y > pt.y) && pt.x < (b.x - a.x) * (pt.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// The topmost tile whose hit region contains `world_pt`.
///
/// Diamonds overlap when the spacing factors compact the grid; the tile drawn
/// last (southernmost, then easternmost) wins.
#[must_use]
pub fn hit_test(world_pt: Point, scene: &Scene, geometry: &TileGeometry) -> Option<TileId> {
    scene
        .tiles_in_draw_order()
        .into_iter()
        .rev()
        .find(|sprite| Diamond::at(sprite.position(), geometry).contains(world_pt))
        .map(|sprite| sprite.tile_id)
}
