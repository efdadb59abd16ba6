#![allow(clippy::float_cmp)]

use super::*;
use crate::world::{Category, Character, Tile, WorldSnapshot};

// =============================================================
// Helpers
// =============================================================

fn geometry() -> TileGeometry {
    TileGeometry { tile_width: 64.0, tile_height: 32.0, horizontal_spacing_factor: 0.5, vertical_spacing_factor: 0.5 }
}

/// `size × size` world; tile id is `y * size + x`.
fn grid_world(size: i32, characters: Vec<Character>) -> WorldIndex {
    let tiles = (0..size)
        .flat_map(|y| {
            (0..size).map(move |x| Tile {
                id: TileId::from(y * size + x),
                x,
                y,
                category: Category::Normal,
                supply: 0.0,
                affinity: vec![],
                subtype: 0,
            })
        })
        .collect();
    WorldIndex::build(WorldSnapshot { tiles, characters })
}

/// 3×3 window centred on a 5×5 world: covers cells 1..=3 on both axes.
fn window_over(index: &WorldIndex) -> ViewportWindow {
    let mut window = ViewportWindow::new(3, 3, 1);
    window.rebase(index.bounds());
    window
}

fn built(index: &WorldIndex, window: &ViewportWindow) -> Scene {
    let mut scene = Scene::new();
    scene.rebuild(index, window, &geometry(), &AppearanceTable::rarity_tiers());
    scene
}

// =============================================================
// Rebuild
// =============================================================

#[test]
fn rebuild_creates_one_sprite_per_visible_tile() {
    let index = grid_world(5, vec![]);
    let window = window_over(&index);
    let scene = built(&index, &window);

    assert_eq!(scene.tile_count(), 9);
    assert!(scene.tile(6).is_some());
    assert!(scene.tile(18).is_some());
    assert!(scene.tile(0).is_none());
    assert!(scene.tile(24).is_none());
}

#[test]
fn tile_anchor_is_projected_grid_cell() {
    let index = grid_world(5, vec![]);
    let window = window_over(&index);
    let scene = built(&index, &window);

    let sprite = scene.tile(12).unwrap();
    assert_eq!(sprite.grid, GridPos::new(2, 2));
    assert_eq!(sprite.anchor, Point::new(0.0, 64.0));
    assert_eq!(sprite.offset_y, 0.0);
    assert!(!sprite.tinted);
    assert_eq!(sprite.appearance.texture, "grass");
}

#[test]
fn characters_only_appear_on_visible_tiles() {
    let characters = vec![
        Character { id: 100, tile_id: 6 },
        Character { id: 101, tile_id: 0 },
        Character { id: 102, tile_id: 99 },
    ];
    let index = grid_world(5, characters);
    let window = window_over(&index);
    let scene = built(&index, &window);

    assert_eq!(scene.character_count(), 1);
    let sprite = scene.character_on(6).unwrap();
    assert_eq!(sprite.character_id, 100);
    assert!(scene.character_on(0).is_none());
}

#[test]
fn character_stands_below_tile_anchor() {
    let index = grid_world(5, vec![Character { id: 100, tile_id: 12 }]);
    let window = window_over(&index);
    let scene = built(&index, &window);

    let tile = scene.tile(12).unwrap();
    let character = scene.character_on(12).unwrap();
    assert_eq!(character.anchor.x, tile.anchor.x);
    assert_eq!(character.anchor.y, tile.anchor.y + CHARACTER_Y_OFFSET);
    assert_eq!(character.depth(), character.anchor.y);
}

#[test]
fn rebuild_after_shift_releases_previous_sprites() {
    let index = grid_world(5, vec![Character { id: 100, tile_id: 6 }]);
    let mut window = window_over(&index);
    let mut scene = built(&index, &window);
    assert!(scene.character_on(6).is_some());

    assert!(window.shift(crate::viewport::Direction::Right));
    scene.rebuild(&index, &window, &geometry(), &AppearanceTable::rarity_tiers());

    assert_eq!(scene.tile_count(), 9);
    assert!(scene.tile(6).is_none());
    assert!(scene.tile(9).is_some());
    assert_eq!(scene.character_count(), 0);
    assert!(!scene.contains(PrimitiveId::Character(100)));
}

#[test]
fn release_reports_and_drops_everything() {
    let index = grid_world(5, vec![Character { id: 100, tile_id: 6 }]);
    let window = window_over(&index);
    let mut scene = built(&index, &window);

    assert_eq!(scene.release(), 10);
    assert!(scene.is_empty());
    assert_eq!(scene.character_count(), 0);
    assert_eq!(scene.release(), 0);
}

// =============================================================
// Offsets and tint
// =============================================================

#[test]
fn set_offset_moves_tile_position() {
    let index = grid_world(5, vec![]);
    let window = window_over(&index);
    let mut scene = built(&index, &window);

    assert!(scene.set_offset(PrimitiveId::Tile(12), -10.0));
    assert_eq!(scene.offset(PrimitiveId::Tile(12)), Some(-10.0));
    assert_eq!(scene.tile(12).unwrap().position(), Point::new(0.0, 54.0));
}

#[test]
fn set_offset_addresses_characters_by_id() {
    let index = grid_world(5, vec![Character { id: 100, tile_id: 12 }]);
    let window = window_over(&index);
    let mut scene = built(&index, &window);

    assert!(scene.set_offset(PrimitiveId::Character(100), -4.0));
    assert_eq!(scene.character_on(12).unwrap().offset_y, -4.0);
    assert!(!scene.set_offset(PrimitiveId::Character(999), -4.0));
}

#[test]
fn set_offset_on_missing_sprite_is_rejected() {
    let index = grid_world(5, vec![]);
    let window = window_over(&index);
    let mut scene = built(&index, &window);

    assert!(!scene.set_offset(PrimitiveId::Tile(0), -10.0));
    assert_eq!(scene.offset(PrimitiveId::Tile(0)), None);
}

#[test]
fn set_tint_toggles_visible_tiles_only() {
    let index = grid_world(5, vec![]);
    let window = window_over(&index);
    let mut scene = built(&index, &window);

    assert!(scene.set_tint(12, true));
    assert!(scene.tile(12).unwrap().tinted);
    assert!(scene.set_tint(12, false));
    assert!(!scene.tile(12).unwrap().tinted);
    assert!(!scene.set_tint(0, true));
}

// =============================================================
// Draw order
// =============================================================

#[test]
fn tiles_draw_north_to_south() {
    let index = grid_world(5, vec![]);
    let window = window_over(&index);
    let scene = built(&index, &window);

    let order: Vec<TileId> = scene.tiles_in_draw_order().iter().map(|s| s.tile_id).collect();
    assert_eq!(order.first(), Some(&6));
    assert_eq!(order.last(), Some(&18));
    let ys: Vec<f64> = scene.tiles_in_draw_order().iter().map(|s| s.anchor.y).collect();
    assert!(ys.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn same_row_tiles_draw_west_to_east() {
    let index = grid_world(5, vec![]);
    let window = window_over(&index);
    let scene = built(&index, &window);

    // (1,3) and (3,1) share a screen row; (1,3) projects further west.
    let order: Vec<TileId> = scene.tiles_in_draw_order().iter().map(|s| s.tile_id).collect();
    let west = order.iter().position(|&id| id == 16).unwrap();
    let east = order.iter().position(|&id| id == 8).unwrap();
    assert!(west < east);
}

#[test]
fn draw_list_puts_characters_above_all_tiles() {
    let characters = vec![Character { id: 100, tile_id: 6 }, Character { id: 101, tile_id: 18 }];
    let index = grid_world(5, characters);
    let window = window_over(&index);
    let scene = built(&index, &window);

    let list = scene.draw_list();
    assert_eq!(list.len(), 11);
    assert!(list[..9].iter().all(|item| matches!(item, DrawItem::Tile(_))));
    let ids: Vec<CharacterId> = list[9..]
        .iter()
        .filter_map(|item| match item {
            DrawItem::Character(c) => Some(c.character_id),
            DrawItem::Tile(_) => None,
        })
        .collect();
    assert_eq!(ids, vec![100, 101]);
}
