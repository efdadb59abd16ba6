//! Render layer: the primitive arena for the current viewport window.
//!
//! DESIGN
//! ======
//! The scene owns one sprite per visible tile and one per character standing
//! on a visible tile. Sprites are keyed by their source ids and only carry a
//! copy of what drawing needs (anchor, appearance, animated offset, tint);
//! the records themselves stay in [`WorldIndex`]. Hit-testing, tweens and
//! the overlay all address sprites through [`PrimitiveId`].
//!
//! Every rebuild releases the previous sprites before creating new ones, so a
//! window shift or a snapshot reload never leaves stale primitives behind.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::camera::Point;
use crate::config::{Appearance, AppearanceTable};
use crate::consts::CHARACTER_Y_OFFSET;
use crate::projection::{GridPos, TileGeometry};
use crate::viewport::ViewportWindow;
use crate::world::{CharacterId, TileId, WorldIndex};

/// Arena key for a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveId {
    Tile(TileId),
    Character(CharacterId),
}

/// Drawable tile. `anchor` is the bottom vertex of the tile diamond.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSprite {
    pub tile_id: TileId,
    pub grid: GridPos,
    pub anchor: Point,
    /// Animated vertical nudge; negative is up.
    pub offset_y: f64,
    /// Hover tint.
    pub tinted: bool,
    pub appearance: Appearance,
}

impl TileSprite {
    /// Anchor with the current nudge applied.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.anchor.x, self.anchor.y + self.offset_y)
    }
}

/// Drawable character standing on a tile.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterSprite {
    pub character_id: CharacterId,
    pub tile_id: TileId,
    /// Feet position.
    pub anchor: Point,
    pub offset_y: f64,
}

impl CharacterSprite {
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.anchor.x, self.anchor.y + self.offset_y)
    }

    /// Draw-order key among characters; larger draws on top.
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.anchor.y
    }
}

/// One entry of the draw list.
#[derive(Debug, Clone, Copy)]
pub enum DrawItem<'a> {
    Tile(&'a TileSprite),
    Character(&'a CharacterSprite),
}

#[derive(Debug, Default)]
pub struct Scene {
    tiles: HashMap<TileId, TileSprite>,
    /// Keyed by the tile the character stands on.
    characters: HashMap<TileId, CharacterSprite>,
    character_tiles: HashMap<CharacterId, TileId>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Release every sprite and create fresh ones for the window's visible tiles.
    pub fn rebuild(
        &mut self,
        index: &WorldIndex,
        window: &ViewportWindow,
        geometry: &TileGeometry,
        table: &AppearanceTable,
    ) {
        let released = self.release();

        for tile in window.visible_tiles(index) {
            let anchor = geometry.project(tile.grid());
            self.tiles.insert(
                tile.id,
                TileSprite {
                    tile_id: tile.id,
                    grid: tile.grid(),
                    anchor,
                    offset_y: 0.0,
                    tinted: false,
                    appearance: table.resolve(tile).clone(),
                },
            );
            if let Some(character) = index.character_on(tile.id) {
                self.characters.insert(
                    tile.id,
                    CharacterSprite {
                        character_id: character.id,
                        tile_id: tile.id,
                        anchor: Point::new(anchor.x, anchor.y + CHARACTER_Y_OFFSET),
                        offset_y: 0.0,
                    },
                );
                self.character_tiles.insert(character.id, tile.id);
            }
        }

        debug!(released, tiles = self.tiles.len(), characters = self.characters.len(), "scene rebuilt");
    }

    /// Drop every sprite. Returns how many were released.
    pub fn release(&mut self) -> usize {
        let count = self.tiles.len() + self.characters.len();
        self.tiles.clear();
        self.characters.clear();
        self.character_tiles.clear();
        count
    }

    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&TileSprite> {
        self.tiles.get(&id)
    }

    /// The character sprite standing on `tile_id`, if it is in the scene.
    #[must_use]
    pub fn character_on(&self, tile_id: TileId) -> Option<&CharacterSprite> {
        self.characters.get(&tile_id)
    }

    #[must_use]
    pub fn contains(&self, id: PrimitiveId) -> bool {
        self.offset(id).is_some()
    }

    #[must_use]
    pub fn offset(&self, id: PrimitiveId) -> Option<f64> {
        match id {
            PrimitiveId::Tile(tile_id) => self.tiles.get(&tile_id).map(|s| s.offset_y),
            PrimitiveId::Character(character_id) => self
                .character_tiles
                .get(&character_id)
                .and_then(|tile_id| self.characters.get(tile_id))
                .map(|s| s.offset_y),
        }
    }

    /// Set a sprite's vertical nudge. Returns `false` if the sprite is not in the scene.
    pub fn set_offset(&mut self, id: PrimitiveId, value: f64) -> bool {
        let slot = match id {
            PrimitiveId::Tile(tile_id) => self.tiles.get_mut(&tile_id).map(|s| &mut s.offset_y),
            PrimitiveId::Character(character_id) => match self.character_tiles.get(&character_id) {
                Some(tile_id) => self.characters.get_mut(tile_id).map(|s| &mut s.offset_y),
                None => None,
            },
        };
        match slot {
            Some(offset) => {
                *offset = value;
                true
            }
            None => false,
        }
    }

    /// Toggle a tile's hover tint. Returns `false` if the tile is not in the scene.
    pub fn set_tint(&mut self, tile_id: TileId, on: bool) -> bool {
        match self.tiles.get_mut(&tile_id) {
            Some(sprite) => {
                sprite.tinted = on;
                true
            }
            None => false,
        }
    }

    /// Tiles back to front: north before south, west before east.
    #[must_use]
    pub fn tiles_in_draw_order(&self) -> Vec<&TileSprite> {
        let mut tiles: Vec<&TileSprite> = self.tiles.values().collect();
        tiles.sort_by(|a, b| {
            by_screen(a.anchor, b.anchor).then_with(|| a.tile_id.cmp(&b.tile_id))
        });
        tiles
    }

    /// Characters back to front by depth.
    #[must_use]
    pub fn characters_in_draw_order(&self) -> Vec<&CharacterSprite> {
        let mut characters: Vec<&CharacterSprite> = self.characters.values().collect();
        characters.sort_by(|a, b| {
            a.depth()
                .total_cmp(&b.depth())
                .then_with(|| a.anchor.x.total_cmp(&b.anchor.x))
                .then_with(|| a.character_id.cmp(&b.character_id))
        });
        characters
    }

    /// Full draw list: every tile beneath every character.
    #[must_use]
    pub fn draw_list(&self) -> Vec<DrawItem<'_>> {
        self.tiles_in_draw_order()
            .into_iter()
            .map(DrawItem::Tile)
            .chain(self.characters_in_draw_order().into_iter().map(DrawItem::Character))
            .collect()
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

fn by_screen(a: Point, b: Point) -> Ordering {
    a.y.total_cmp(&b.y).then_with(|| a.x.total_cmp(&b.x))
}
