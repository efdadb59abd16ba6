//! World model: tile and character records, and the per-snapshot index.
//!
//! Records arrive as JSON from the data collaborator (`World.json`,
//! `Characters.json`) and are immutable for the lifetime of a snapshot.
//! [`WorldIndex`] is built once per snapshot and then only read; a reload
//! replaces it wholesale.

#[cfg(test)]
#[path = "world_test.rs"]
mod world_test;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::projection::GridPos;

/// Unique identifier for a tile within a snapshot.
pub type TileId = i64;

/// Unique identifier for a character.
pub type CharacterId = i64;

/// Tile category label.
///
/// Known labels parse into dedicated variants; anything else is preserved
/// verbatim in [`Category::Other`] so it can still be matched by the
/// appearance table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Normal,
    Medium,
    High,
    Legendary,
    /// `"Special Cluster N"`.
    SpecialCluster(u8),
    Other(String),
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Normal" => Self::Normal,
            "Medium" => Self::Medium,
            "High" => Self::High,
            "Legendary" => Self::Legendary,
            other => match other.strip_prefix("Special Cluster ").map(str::parse::<u8>) {
                Some(Ok(n)) => Self::SpecialCluster(n),
                _ => Self::Other(label),
            },
        }
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::from(label.to_owned())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("Normal"),
            Self::Medium => f.write_str("Medium"),
            Self::High => f.write_str("High"),
            Self::Legendary => f.write_str("Legendary"),
            Self::SpecialCluster(n) => write!(f, "Special Cluster {n}"),
            Self::Other(label) => f.write_str(label),
        }
    }
}

/// One cell of the world grid as delivered by the data collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    #[serde(rename = "blockId")]
    pub id: TileId,
    pub x: i32,
    pub y: i32,
    pub category: Category,
    /// Display only.
    #[serde(rename = "supplyBlock", default)]
    pub supply: f64,
    /// Display only.
    #[serde(rename = "afinity", default)]
    pub affinity: Vec<f64>,
    /// Terrain variant; may override the category appearance.
    #[serde(rename = "only", default)]
    pub subtype: i32,
}

impl Tile {
    #[must_use]
    pub fn grid(&self) -> GridPos {
        GridPos::new(self.x, self.y)
    }
}

/// A character standing on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    #[serde(rename = "characterId")]
    pub id: CharacterId,
    #[serde(rename = "blockId")]
    pub tile_id: TileId,
}

#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("invalid tile payload: {0}")]
    Tiles(#[source] serde_json::Error),
    #[error("invalid character payload: {0}")]
    Characters(#[source] serde_json::Error),
}

/// Raw tile and character records for one world snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldSnapshot {
    pub tiles: Vec<Tile>,
    pub characters: Vec<Character>,
}

impl WorldSnapshot {
    /// Parse the two JSON arrays served by the data collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] naming which payload failed to parse.
    pub fn from_json(tiles: &str, characters: &str) -> Result<Self, WorldError> {
        let tiles = serde_json::from_str(tiles).map_err(WorldError::Tiles)?;
        let characters = serde_json::from_str(characters).map_err(WorldError::Characters)?;
        Ok(Self { tiles, characters })
    }
}

/// Inclusive min/max grid extents of every tile in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl WorldBounds {
    /// Bounding box of the given tiles, or `None` when there are none.
    pub fn from_tiles<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> Option<Self> {
        tiles.into_iter().fold(None, |acc, tile| {
            Some(match acc {
                None => Self { min_x: tile.x, max_x: tile.x, min_y: tile.y, max_y: tile.y },
                Some(b) => Self {
                    min_x: b.min_x.min(tile.x),
                    max_x: b.max_x.max(tile.x),
                    min_y: b.min_y.min(tile.y),
                    max_y: b.max_y.max(tile.y),
                },
            })
        })
    }

    #[must_use]
    pub fn contains(&self, pos: GridPos) -> bool {
        (self.min_x..=self.max_x).contains(&pos.x) && (self.min_y..=self.max_y).contains(&pos.y)
    }
}

/// Read-only lookups over one world snapshot.
#[derive(Debug, Default)]
pub struct WorldIndex {
    tiles: HashMap<TileId, Tile>,
    /// At most one character per tile, keyed by tile id.
    characters: HashMap<TileId, Character>,
    bounds: Option<WorldBounds>,
}

impl WorldIndex {
    /// Index a snapshot.
    ///
    /// Duplicate tile ids and duplicate character tile ids keep the last
    /// record. Characters whose tile does not exist are dropped.
    #[must_use]
    pub fn build(snapshot: WorldSnapshot) -> Self {
        let mut tiles = HashMap::with_capacity(snapshot.tiles.len());
        for tile in snapshot.tiles {
            tiles.insert(tile.id, tile);
        }

        let mut characters = HashMap::new();
        let mut dangling = 0usize;
        for character in snapshot.characters {
            if tiles.contains_key(&character.tile_id) {
                characters.insert(character.tile_id, character);
            } else {
                dangling += 1;
            }
        }
        if dangling > 0 {
            debug!(count = dangling, "dropped characters without a tile");
        }

        let bounds = WorldBounds::from_tiles(tiles.values());
        Self { tiles, characters, bounds }
    }

    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// The character standing on `tile_id`, if any.
    #[must_use]
    pub fn character_on(&self, tile_id: TileId) -> Option<&Character> {
        self.characters.get(&tile_id)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    #[must_use]
    pub fn bounds(&self) -> Option<WorldBounds> {
        self.bounds
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
