#![allow(clippy::float_cmp)]

use super::*;
use crate::config::AppearanceTable;
use crate::scene::PrimitiveId;
use crate::viewport::ViewportWindow;
use crate::world::{Category, Tile, WorldIndex, WorldSnapshot};

// =============================================================
// Helpers
// =============================================================

fn geometry(factor: f64) -> TileGeometry {
    TileGeometry { tile_width: 64.0, tile_height: 32.0, horizontal_spacing_factor: factor, vertical_spacing_factor: factor }
}

fn tile(id: TileId, x: i32, y: i32) -> Tile {
    Tile { id, x, y, category: Category::Normal, supply: 0.0, affinity: vec![], subtype: 0 }
}

fn scene_of(tiles: Vec<Tile>, geometry: &TileGeometry) -> Scene {
    let index = WorldIndex::build(WorldSnapshot { tiles, characters: vec![] });
    let mut window = ViewportWindow::new(5, 5, 1);
    window.rebase(index.bounds());
    let mut scene = Scene::new();
    scene.rebuild(&index, &window, geometry, &AppearanceTable::rarity_tiers());
    scene
}

// =============================================================
// Diamond
// =============================================================

#[test]
fn diamond_hangs_above_anchor() {
    let d = Diamond::at(Point::new(0.0, 0.0), &geometry(0.5));
    assert_eq!(d.top, Point::new(0.0, -32.0));
    assert_eq!(d.right, Point::new(32.0, -16.0));
    assert_eq!(d.bottom, Point::new(0.0, 0.0));
    assert_eq!(d.left, Point::new(-32.0, -16.0));
    assert_eq!(d.center(), Point::new(0.0, -16.0));
}

#[test]
fn diamond_contains_interior_points() {
    let d = Diamond::at(Point::new(100.0, 100.0), &geometry(0.5));
    assert!(d.contains(d.center()));
    assert!(d.contains(Point::new(120.0, 84.0)));
    assert!(d.contains(Point::new(100.0, 71.0)));
}

#[test]
fn diamond_excludes_bounding_box_corners() {
    let d = Diamond::at(Point::new(100.0, 100.0), &geometry(0.5));
    assert!(!d.contains(Point::new(70.0, 70.0)));
    assert!(!d.contains(Point::new(130.0, 98.0)));
    assert!(!d.contains(Point::new(100.0, 105.0)));
}

#[test]
fn polygon_contains_square() {
    let square = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0), Point::new(0.0, 10.0)];
    assert!(polygon_contains(&square, Point::new(5.0, 5.0)));
    assert!(!polygon_contains(&square, Point::new(15.0, 5.0)));
    assert!(!polygon_contains(&square, Point::new(5.0, -1.0)));
}

#[test]
fn polygon_contains_empty_is_false() {
    assert!(!polygon_contains(&[], Point::new(0.0, 0.0)));
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn hit_test_finds_tile_at_diamond_center() {
    let g = geometry(0.5);
    let scene = scene_of(vec![tile(1, 0, 0), tile(2, 1, 0), tile(3, 0, 1), tile(4, 1, 1)], &g);
    for id in 1..=4 {
        let anchor = scene.tile(id).unwrap().position();
        assert_eq!(hit_test(Diamond::at(anchor, &g).center(), &scene, &g), Some(id));
    }
}

#[test]
fn hit_test_misses_empty_space() {
    let g = geometry(0.5);
    let scene = scene_of(vec![tile(1, 0, 0)], &g);
    assert_eq!(hit_test(Point::new(500.0, 500.0), &scene, &g), None);
    assert_eq!(hit_test(Point::new(0.0, 1.0), &scene, &g), None);
}

#[test]
fn hit_test_prefers_topmost_of_overlapping_tiles() {
    // At 0.3 spacing (2,2) and (3,2) overlap around (10, 28); (3,2) draws later.
    let g = geometry(0.3);
    let scene = scene_of(vec![tile(1, 2, 2), tile(2, 3, 2)], &g);
    let pt = Point::new(10.0, 28.0);
    assert!(Diamond::at(scene.tile(1).unwrap().position(), &g).contains(pt));
    assert!(Diamond::at(scene.tile(2).unwrap().position(), &g).contains(pt));
    assert_eq!(hit_test(pt, &scene, &g), Some(2));
}

#[test]
fn hit_test_follows_lifted_tile() {
    let g = geometry(0.5);
    let mut scene = scene_of(vec![tile(1, 0, 0)], &g);
    let low = Point::new(0.0, -3.0);
    let high = Point::new(0.0, -35.0);
    assert_eq!(hit_test(low, &scene, &g), Some(1));
    assert_eq!(hit_test(high, &scene, &g), None);

    scene.set_offset(PrimitiveId::Tile(1), -10.0);
    assert_eq!(hit_test(low, &scene, &g), None);
    assert_eq!(hit_test(high, &scene, &g), Some(1));
}

#[test]
fn hit_test_on_empty_scene_is_none() {
    let g = geometry(0.5);
    assert_eq!(hit_test(Point::new(0.0, 0.0), &Scene::new(), &g), None);
}
