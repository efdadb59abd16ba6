#![allow(clippy::float_cmp)]

use super::*;
use crate::config::AppearanceTable;
use crate::consts::SELECTION_LIFT;
use crate::projection::TileGeometry;
use crate::viewport::ViewportWindow;
use crate::world::{Category, Character, Tile, WorldIndex, WorldSnapshot};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// One tile (id 1) with one character (id 10) on it.
fn scene() -> Scene {
    let index = WorldIndex::build(WorldSnapshot {
        tiles: vec![Tile { id: 1, x: 0, y: 0, category: Category::Normal, supply: 0.0, affinity: vec![], subtype: 0 }],
        characters: vec![Character { id: 10, tile_id: 1 }],
    });
    let mut window = ViewportWindow::new(1, 1, 1);
    window.rebase(index.bounds());
    let geometry =
        TileGeometry { tile_width: 64.0, tile_height: 32.0, horizontal_spacing_factor: 0.3, vertical_spacing_factor: 0.3 };
    let mut scene = Scene::new();
    scene.rebuild(&index, &window, &geometry, &AppearanceTable::rarity_tiers());
    scene
}

// =============================================================
// Tween
// =============================================================

#[test]
fn tween_starts_at_from_and_ends_at_to() {
    let t = Tween { from: 0.0, to: -10.0, start_ms: 1000.0, duration_ms: 200.0 };
    assert_eq!(t.value_at(1000.0), 0.0);
    assert_eq!(t.value_at(1200.0), -10.0);
    assert_eq!(t.value_at(5000.0), -10.0);
    assert_eq!(t.value_at(0.0), 0.0);
}

#[test]
fn tween_eases_out() {
    let t = Tween { from: 0.0, to: -10.0, start_ms: 0.0, duration_ms: 200.0 };
    assert!(approx_eq(t.value_at(100.0), -7.5));
    assert!(approx_eq(t.value_at(50.0), -4.375));
}

#[test]
fn tween_finishes_after_duration() {
    let t = Tween { from: 0.0, to: -10.0, start_ms: 0.0, duration_ms: 200.0 };
    assert!(!t.is_finished(199.0));
    assert!(t.is_finished(200.0));
}

#[test]
fn zero_length_tween_jumps_to_target() {
    let t = Tween { from: 0.0, to: -10.0, start_ms: 0.0, duration_ms: 0.0 };
    assert_eq!(t.value_at(0.0), -10.0);
}

// =============================================================
// Animator
// =============================================================

#[test]
fn apply_writes_offsets_into_scene() {
    let mut scene = scene();
    let mut animator = Animator::new();
    animator.start(PrimitiveId::Tile(1), 0.0, -SELECTION_LIFT, 0.0);
    animator.start(PrimitiveId::Character(10), 0.0, -SELECTION_LIFT, 0.0);

    assert!(animator.apply(100.0, &mut scene));
    assert!(approx_eq(scene.offset(PrimitiveId::Tile(1)).unwrap(), -7.5));
    assert!(approx_eq(scene.offset(PrimitiveId::Character(10)).unwrap(), -7.5));

    assert!(!animator.apply(SELECTION_TWEEN_MS, &mut scene));
    assert_eq!(scene.offset(PrimitiveId::Tile(1)), Some(-10.0));
    assert!(animator.is_empty());
}

#[test]
fn restart_continues_from_in_flight_value() {
    let mut scene = scene();
    let mut animator = Animator::new();
    let id = PrimitiveId::Tile(1);
    animator.start(id, 0.0, -10.0, 0.0);
    animator.apply(100.0, &mut scene);

    // Caller passes a stale `current`; the in-flight value wins.
    animator.start(id, 0.0, 0.0, 100.0);
    assert!(animator.is_animating(id));
    animator.apply(100.0, &mut scene);
    assert!(approx_eq(scene.offset(id).unwrap(), -7.5));

    animator.apply(300.0, &mut scene);
    assert_eq!(scene.offset(id), Some(0.0));
    assert!(!animator.is_animating(id));
}

#[test]
fn start_at_target_is_a_no_op() {
    let mut animator = Animator::new();
    animator.start(PrimitiveId::Tile(1), -10.0, -10.0, 0.0);
    assert!(animator.is_empty());
}

#[test]
fn apply_drops_tweens_for_missing_sprites() {
    let mut scene = scene();
    let mut animator = Animator::new();
    animator.start(PrimitiveId::Tile(99), 0.0, -10.0, 0.0);
    animator.start(PrimitiveId::Tile(1), 0.0, -10.0, 0.0);

    assert!(animator.apply(50.0, &mut scene));
    assert!(!animator.is_animating(PrimitiveId::Tile(99)));
    assert!(animator.is_animating(PrimitiveId::Tile(1)));
}

#[test]
fn clear_stops_every_tween() {
    let mut animator = Animator::new();
    animator.start(PrimitiveId::Tile(1), 0.0, -10.0, 0.0);
    animator.start(PrimitiveId::Tile(2), 0.0, -10.0, 0.0);
    assert!(animator.is_animating(PrimitiveId::Tile(2)));
    animator.clear();
    assert!(animator.is_empty());
}
