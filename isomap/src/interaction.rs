//! Selection state machine, hover tracking and the tooltip/highlight overlay.
//!
//! At most one tile is selected at a time. Clicking a tile makes it the
//! selection (re-clicking the current one is a no-op); clicking empty space
//! clears it. Each change is reported as a [`Transition`], from which the
//! engine derives the lift/lower nudges and decides whether to notify the
//! host. The overlay is a single shared instance that is repositioned and
//! re-filled on every new selection.

#[cfg(test)]
#[path = "interaction_test.rs"]
mod interaction_test;

use crate::camera::Point;
use crate::consts::{SELECTION_LIFT, TOOLTIP_OFFSET_X, TOOLTIP_OFFSET_Y};
use crate::hit::Diamond;
use crate::projection::TileGeometry;
use crate::scene::{PrimitiveId, Scene};
use crate::world::{Tile, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Selected(TileId),
}

impl SelectionState {
    #[must_use]
    pub fn selected(self) -> Option<TileId> {
        match self {
            Self::Idle => None,
            Self::Selected(id) => Some(id),
        }
    }
}

/// Result of feeding a click into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed (re-click of the selected tile, or background click while idle).
    Unchanged,
    /// `current` became selected, replacing `previous` if there was one.
    Entered { previous: Option<TileId>, current: TileId },
    /// The selection was cleared.
    Exited { previous: TileId },
}

/// One offset change the engine should animate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nudge {
    pub target: PrimitiveId,
    /// Absolute offset to tween to.
    pub to: f64,
}

impl Transition {
    /// Offset changes for the tiles (and their characters) involved in this
    /// transition, lowering the previous selection before lifting the new one.
    /// Sprites not in the scene are skipped.
    #[must_use]
    pub fn nudges(&self, scene: &Scene) -> Vec<Nudge> {
        let (previous, current) = match *self {
            Self::Unchanged => return Vec::new(),
            Self::Entered { previous, current } => (previous, Some(current)),
            Self::Exited { previous } => (Some(previous), None),
        };
        let mut out = Vec::new();
        if let Some(tile_id) = previous {
            push_nudges(&mut out, scene, tile_id, 0.0);
        }
        if let Some(tile_id) = current {
            push_nudges(&mut out, scene, tile_id, -SELECTION_LIFT);
        }
        out
    }
}

fn push_nudges(out: &mut Vec<Nudge>, scene: &Scene, tile_id: TileId, to: f64) {
    if scene.tile(tile_id).is_none() {
        return;
    }
    out.push(Nudge { target: PrimitiveId::Tile(tile_id), to });
    if let Some(character) = scene.character_on(tile_id) {
        out.push(Nudge { target: PrimitiveId::Character(character.character_id), to });
    }
}

/// Hover moved from one tile (or nothing) to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverChange {
    pub left: Option<TileId>,
    pub entered: Option<TileId>,
}

/// Tooltip text and highlight outline for the selected tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub visible: bool,
    pub tile_id: Option<TileId>,
    /// World-space top-left of the tooltip box.
    pub position: Point,
    pub text: String,
    /// Outline drawn around the lifted tile.
    pub highlight: Option<Diamond>,
}

impl Default for Overlay {
    fn default() -> Self {
        Self { visible: false, tile_id: None, position: Point::new(0.0, 0.0), text: String::new(), highlight: None }
    }
}

impl Overlay {
    /// Point the overlay at `tile`, whose sprite is anchored at `anchor`.
    ///
    /// Placement assumes the tile is (or will be) lifted.
    pub fn show(&mut self, tile: &Tile, anchor: Point, geometry: &TileGeometry) {
        let lifted = Point::new(anchor.x, anchor.y - SELECTION_LIFT);
        self.visible = true;
        self.tile_id = Some(tile.id);
        self.position = Point::new(lifted.x + TOOLTIP_OFFSET_X, lifted.y + TOOLTIP_OFFSET_Y);
        self.text = tooltip_text(tile);
        self.highlight = Some(Diamond::at(lifted, geometry));
    }

    /// Hide without forgetting which tile the overlay describes.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible && self.tile_id.is_some();
    }

    pub fn hide(&mut self) {
        *self = Self::default();
    }
}

/// Tooltip body for a tile.
#[must_use]
pub fn tooltip_text(tile: &Tile) -> String {
    let affinity = tile.affinity.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
    format!(
        "ID: {}\nSupply: {}\nCategory: {}\nAffinity: {}\nSubtype: {}",
        tile.id, tile.supply, tile.category, affinity, tile.subtype
    )
}

/// Selection, hover and overlay state.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    selection: SelectionState,
    hovered: Option<TileId>,
    overlay: Overlay,
}

impl Interaction {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    #[must_use]
    pub fn selected(&self) -> Option<TileId> {
        self.selection.selected()
    }

    #[must_use]
    pub fn hovered(&self) -> Option<TileId> {
        self.hovered
    }

    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.overlay
    }

    /// A click landed on `tile_id`.
    pub fn click_tile(&mut self, tile_id: TileId) -> Transition {
        match self.selection {
            SelectionState::Selected(current) if current == tile_id => Transition::Unchanged,
            previous => {
                self.selection = SelectionState::Selected(tile_id);
                Transition::Entered { previous: previous.selected(), current: tile_id }
            }
        }
    }

    /// A click landed on no tile. Clears the selection and hides the overlay.
    pub fn click_background(&mut self) -> Transition {
        match self.selection {
            SelectionState::Idle => Transition::Unchanged,
            SelectionState::Selected(previous) => {
                self.selection = SelectionState::Idle;
                self.overlay.hide();
                Transition::Exited { previous }
            }
        }
    }

    /// Pointer is now over `target`. Returns the change, if any.
    pub fn hover(&mut self, target: Option<TileId>) -> Option<HoverChange> {
        if target == self.hovered {
            return None;
        }
        let change = HoverChange { left: self.hovered, entered: target };
        self.hovered = target;
        Some(change)
    }

    /// Forget everything; used when a new world snapshot replaces the old one.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
