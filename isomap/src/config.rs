//! Engine configuration and the injected category/subtype appearance table.
//!
//! Everything here is required: the engine has no hidden defaults for tile
//! geometry, window size, shift distance or appearances. Deployments have
//! disagreed on what a given subtype looks like (subtype 1 is water on one
//! map and woods on another), so the table is always supplied by the host.
//! [`AppearanceTable::rarity_tiers`] and [`AppearanceTable::special_clusters`]
//! reproduce the two mappings seen so far.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::projection::TileGeometry;
use crate::world::{Category, Tile};

/// Logical look of a tile: a texture key for sprite backends and a flat fill
/// colour for the canvas fallback renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Appearance {
    /// Sprite-sheet key. Carried on every [`crate::scene::TileSprite`] for
    /// hosts that draw textured tiles themselves; [`crate::render`] ignores it.
    pub texture: String,
    /// Flat colour drawn by [`crate::render`].
    pub fill: String,
}

impl Appearance {
    #[must_use]
    pub fn new(texture: &str, fill: &str) -> Self {
        Self { texture: texture.to_owned(), fill: fill.to_owned() }
    }
}

/// Category/subtype → appearance lookup.
///
/// Resolution order: special category, then subtype override, then default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceTable {
    /// Categories that always use their own appearance.
    pub special: HashMap<Category, Appearance>,
    /// Terrain overrides keyed by tile subtype.
    pub subtypes: HashMap<i32, Appearance>,
    /// Ordinary ground.
    pub default: Appearance,
}

impl AppearanceTable {
    #[must_use]
    pub fn resolve(&self, tile: &Tile) -> &Appearance {
        self.special
            .get(&tile.category)
            .or_else(|| self.subtypes.get(&tile.subtype))
            .unwrap_or(&self.default)
    }

    /// Rarity-tier map: Legendary/High/Medium tiers, subtype 1 water, 3 and 6 woods.
    #[must_use]
    pub fn rarity_tiers() -> Self {
        Self {
            special: HashMap::from([
                (Category::Legendary, castle()),
                (Category::High, tower()),
                (Category::Medium, water()),
            ]),
            subtypes: HashMap::from([(1, water()), (3, woods()), (6, woods())]),
            default: grass(),
        }
    }

    /// Special-cluster map: five cluster labels, subtype 1 woods, 3 and 6 water, 8 castle.
    #[must_use]
    pub fn special_clusters() -> Self {
        Self {
            special: HashMap::from([
                (Category::SpecialCluster(1), water()),
                (Category::SpecialCluster(2), rock()),
                (Category::SpecialCluster(3), grass()),
                (Category::SpecialCluster(4), grass()),
                (Category::SpecialCluster(5), castle()),
            ]),
            subtypes: HashMap::from([(1, woods()), (3, water()), (6, water()), (8, castle())]),
            default: grass(),
        }
    }
}

fn grass() -> Appearance {
    Appearance::new("grass", "#6aa84f")
}

fn water() -> Appearance {
    Appearance::new("water", "#3d85c6")
}

fn woods() -> Appearance {
    Appearance::new("woods", "#38761d")
}

fn rock() -> Appearance {
    Appearance::new("rock", "#999999")
}

fn castle() -> Appearance {
    Appearance::new("castle", "#b45f06")
}

fn tower() -> Appearance {
    Appearance::new("tower", "#e69138")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid engine config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

/// Construction-time engine configuration (camelCase on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    pub tile_width: f64,
    pub tile_height: f64,
    pub horizontal_spacing_factor: f64,
    pub vertical_spacing_factor: f64,
    /// Window width in grid cells.
    pub viewport_width: i32,
    /// Window height in grid cells.
    pub viewport_height: i32,
    /// Cells moved per edge-triggered shift.
    pub shift_delta: i32,
    pub appearance_table: AppearanceTable,
}

impl EngineConfig {
    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed or incomplete JSON and
    /// [`ConfigError::NonPositive`] for out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every size and factor is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("tileWidth", self.tile_width),
            ("tileHeight", self.tile_height),
            ("horizontalSpacingFactor", self.horizontal_spacing_factor),
            ("verticalSpacingFactor", self.vertical_spacing_factor),
            ("viewportWidth", f64::from(self.viewport_width)),
            ("viewportHeight", f64::from(self.viewport_height)),
            ("shiftDelta", f64::from(self.shift_delta)),
        ];
        for (field, value) in checks {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn geometry(&self) -> TileGeometry {
        TileGeometry {
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            horizontal_spacing_factor: self.horizontal_spacing_factor,
            vertical_spacing_factor: self.vertical_spacing_factor,
        }
    }
}
