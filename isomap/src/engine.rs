use std::fmt;

use tracing::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::animation::Animator;
use crate::bridge::SelectionBridge;
use crate::camera::{Camera, Point};
use crate::config::{ConfigError, EngineConfig};
use crate::consts::{IDLE_FPS, IDLE_FRAMES, SELECTION_LIFT};
use crate::hit::hit_test;
use crate::input::{Button, PointerState, WheelDelta};
use crate::interaction::{Interaction, Overlay, Transition};
use crate::projection::{GridPos, TileGeometry};
use crate::render;
use crate::scene::{PrimitiveId, Scene};
use crate::viewport::ViewportWindow;
use crate::world::{Tile, TileId, WorldIndex, WorldSnapshot};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RenderNeeded,
    /// A new tile became selected. The bridge has already been notified.
    TileSelected { tile_id: TileId },
    SelectionCleared { tile_id: TileId },
    ViewportShifted { from: GridPos, to: GridPos },
    SnapshotApplied { generation: LoadGeneration, tiles: usize, characters: usize },
    /// A load completed after a newer one was requested; its result was ignored.
    SnapshotDiscarded { generation: LoadGeneration },
    /// A load failed; the engine now shows an empty world.
    LoadFailed { generation: LoadGeneration, reason: String },
    SetCursor(String),
}

/// Ticket for one world load. Only the most recently issued ticket may install
/// its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LoadGeneration(pub u64);

impl fmt::Display for LoadGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    config: EngineConfig,
    geometry: TileGeometry,
    index: WorldIndex,
    window: ViewportWindow,
    scene: Scene,
    interaction: Interaction,
    animator: Animator,
    pointer: PointerState,
    bridge: SelectionBridge,
    generation: LoadGeneration,
    /// Timestamp of the last tick; tweens started by input begin here.
    clock_ms: f64,
    idle_frame: u64,
    pub camera: Camera,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl EngineCore {
    /// Create an engine with an empty world.
    ///
    /// # Errors
    ///
    /// Returns the first invalid config field.
    pub fn new(config: EngineConfig, bridge: SelectionBridge) -> Result<Self, ConfigError> {
        config.validate()?;
        let window = ViewportWindow::new(config.viewport_width, config.viewport_height, config.shift_delta);
        Ok(Self {
            geometry: config.geometry(),
            config,
            index: WorldIndex::default(),
            window,
            scene: Scene::new(),
            interaction: Interaction::new(),
            animator: Animator::new(),
            pointer: PointerState::Idle,
            bridge,
            generation: LoadGeneration::default(),
            clock_ms: 0.0,
            idle_frame: 0,
            camera: Camera::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        })
    }

    // --- Data inputs ---

    /// Issue a ticket for an asynchronous load. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadGeneration {
        self.generation = LoadGeneration(self.generation.0 + 1);
        debug!(generation = %self.generation, "world load started");
        self.generation
    }

    /// Install the result of the load started with `generation`.
    ///
    /// Stale results are ignored. A failed load leaves an empty world rather
    /// than the previous one.
    pub fn apply_load<E: fmt::Display>(
        &mut self,
        generation: LoadGeneration,
        result: Result<WorldSnapshot, E>,
    ) -> Vec<Action> {
        if generation != self.generation {
            debug!(%generation, current = %self.generation, "discarding superseded world load");
            return vec![Action::SnapshotDiscarded { generation }];
        }
        match result {
            Ok(snapshot) => self.install(snapshot),
            Err(e) => {
                warn!(%generation, error = %e, "world load failed");
                let mut actions = self.install(WorldSnapshot::default());
                actions.push(Action::LoadFailed { generation, reason: e.to_string() });
                actions
            }
        }
    }

    /// Install a snapshot immediately, superseding any load still in flight.
    pub fn load_snapshot(&mut self, snapshot: WorldSnapshot) -> Vec<Action> {
        self.begin_load();
        self.install(snapshot)
    }

    fn install(&mut self, snapshot: WorldSnapshot) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(tile_id) = self.interaction.selected() {
            actions.push(Action::SelectionCleared { tile_id });
        }
        self.interaction.reset();
        self.animator.clear();
        self.pointer = PointerState::Idle;

        self.index = WorldIndex::build(snapshot);
        self.window.rebase(self.index.bounds());
        self.rebuild_scene();
        self.center_camera();

        let tiles = self.index.tile_count();
        let characters = self.index.character_count();
        info!(generation = %self.generation, tiles, characters, origin = ?self.window.origin(), "world installed");
        actions.push(Action::SnapshotApplied { generation: self.generation, tiles, characters });
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Viewport ---

    /// Update canvas dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
        self.camera.set_view_size(width_css, height_css);
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.pointer = PointerState::Pressed { last_screen: screen_pt };
        let world_pt = self.camera.screen_to_world(screen_pt);
        match hit_test(world_pt, &self.scene, &self.geometry) {
            Some(tile_id) => self.select_tile(tile_id),
            None => self.clear_selection(),
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        if let Some(velocity) = self.pointer.advance(screen_pt) {
            self.camera.drag_by(velocity);
            return vec![Action::RenderNeeded];
        }

        let world_pt = self.camera.screen_to_world(screen_pt);
        let target = hit_test(world_pt, &self.scene, &self.geometry);
        let Some(change) = self.interaction.hover(target) else {
            return Vec::new();
        };
        if let Some(left) = change.left {
            self.scene.set_tint(left, false);
        }
        if let Some(entered) = change.entered {
            self.scene.set_tint(entered, true);
        }
        let cursor = if change.entered.is_some() { "pointer" } else { "default" };
        vec![Action::SetCursor(cursor.to_owned()), Action::RenderNeeded]
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, button: Button) -> Vec<Action> {
        if button == Button::Primary {
            self.pointer = PointerState::Idle;
        }
        Vec::new()
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        if self.camera.zoom_by_wheel(delta.dy) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Advance tweens and the idle animation to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        self.clock_ms = now_ms;
        let had_tweens = !self.animator.is_empty();
        self.animator.apply(now_ms, &mut self.scene);

        let frame = idle_frame_at(now_ms);
        let frame_changed = frame != self.idle_frame;
        self.idle_frame = frame;

        if had_tweens || (frame_changed && self.scene.character_count() > 0) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Selection ---

    fn select_tile(&mut self, tile_id: TileId) -> Vec<Action> {
        let transition = self.interaction.click_tile(tile_id);
        // Reselect. The tile can only still be on the outer ring if the last
        // shift was fully clamped, so skipping the edge check loses nothing.
        if transition == Transition::Unchanged {
            return Vec::new();
        }
        self.start_nudges(transition);
        if let (Some(tile), Some(sprite)) = (self.index.tile(tile_id), self.scene.tile(tile_id)) {
            self.interaction.overlay_mut().show(tile, sprite.anchor, &self.geometry);
        }
        self.bridge.notify(tile_id);
        debug!(tile_id, "tile selected");

        let mut actions = vec![Action::TileSelected { tile_id }];
        if let Some(grid) = self.index.tile(tile_id).map(Tile::grid) {
            actions.extend(self.shift_toward_edges(grid));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn clear_selection(&mut self) -> Vec<Action> {
        let transition = self.interaction.click_background();
        let Transition::Exited { previous } = transition else {
            return Vec::new();
        };
        self.start_nudges(transition);
        debug!(tile_id = previous, "selection cleared");
        vec![Action::SelectionCleared { tile_id: previous }, Action::RenderNeeded]
    }

    fn start_nudges(&mut self, transition: Transition) {
        for nudge in transition.nudges(&self.scene) {
            let current = self.scene.offset(nudge.target).unwrap_or_default();
            self.animator.start(nudge.target, current, nudge.to, self.clock_ms);
        }
    }

    /// Shift the window once per side whose outer ring contains `grid`.
    fn shift_toward_edges(&mut self, grid: GridPos) -> Vec<Action> {
        let from = self.window.origin();
        for direction in self.window.edge_directions(grid) {
            self.window.shift(direction);
        }
        let to = self.window.origin();
        if to == from {
            return Vec::new();
        }
        debug!(?from, ?to, "viewport window shifted");
        self.refresh_scene();
        vec![Action::ViewportShifted { from, to }]
    }

    // --- Scene upkeep ---

    fn rebuild_scene(&mut self) {
        self.scene.rebuild(&self.index, &self.window, &self.geometry, &self.config.appearance_table);
    }

    /// Rebuild after a window shift and restore the state that lives on sprites.
    fn refresh_scene(&mut self) {
        self.rebuild_scene();
        self.animator.apply(self.clock_ms, &mut self.scene);

        if let Some(selected) = self.interaction.selected() {
            let mut lifted = vec![PrimitiveId::Tile(selected)];
            if let Some(character) = self.scene.character_on(selected) {
                lifted.push(PrimitiveId::Character(character.character_id));
            }
            for id in lifted {
                if !self.animator.is_animating(id) {
                    self.scene.set_offset(id, -SELECTION_LIFT);
                }
            }
            let visible = self.scene.tile(selected).is_some();
            self.interaction.overlay_mut().set_visible(visible);
        }

        if let Some(hovered) = self.interaction.hovered() {
            if !self.scene.set_tint(hovered, true) {
                self.interaction.hover(None);
            }
        }
    }

    /// Centre the camera on the middle of the current window.
    fn center_camera(&mut self) {
        if self.window.bounds().is_none() {
            return;
        }
        let a = self.geometry.project(self.window.origin());
        let b = self.geometry.project(self.window.far_corner());
        let tile_center_lift = self.geometry.tile_height / 2.0;
        self.camera.center_on(Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0 - tile_center_lift));
    }

    // --- Queries ---

    /// The currently selected tile, if any.
    #[must_use]
    pub fn selection(&self) -> Option<TileId> {
        self.interaction.selected()
    }

    #[must_use]
    pub fn hovered(&self) -> Option<TileId> {
        self.interaction.hovered()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn origin(&self) -> GridPos {
        self.window.origin()
    }

    #[must_use]
    pub fn window(&self) -> &ViewportWindow {
        &self.window
    }

    #[must_use]
    pub fn world(&self) -> &WorldIndex {
        &self.index
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        self.interaction.overlay()
    }

    #[must_use]
    pub fn geometry(&self) -> &TileGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn generation(&self) -> LoadGeneration {
        self.generation
    }

    /// Current frame of the character idle loop.
    #[must_use]
    pub fn idle_frame(&self) -> u64 {
        self.idle_frame
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.animator.is_empty()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn idle_frame_at(now_ms: f64) -> u64 {
    let frames = (now_ms.max(0.0) / 1000.0 * IDLE_FPS).floor() as u64;
    frames % IDLE_FRAMES
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Returns the first invalid config field.
    pub fn new(canvas: HtmlCanvasElement, config: EngineConfig, bridge: SelectionBridge) -> Result<Self, ConfigError> {
        Ok(Self { canvas, core: EngineCore::new(config, bridge)? })
    }

    // --- Delegated data inputs ---

    pub fn begin_load(&mut self) -> LoadGeneration {
        self.core.begin_load()
    }

    pub fn apply_load<E: fmt::Display>(
        &mut self,
        generation: LoadGeneration,
        result: Result<WorldSnapshot, E>,
    ) -> Vec<Action> {
        self.core.apply_load(generation, result)
    }

    pub fn load_snapshot(&mut self, snapshot: WorldSnapshot) -> Vec<Action> {
        self.core.load_snapshot(snapshot)
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio, resizing the backing store.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.canvas.set_width(backing_size(width_css, dpr));
        self.canvas.set_height(backing_size(height_css, dpr));
        self.core.set_viewport(width_css, height_css, dpr)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button)
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        self.core.on_wheel(delta)
    }

    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        self.core.tick(now_ms)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let Some(ctx) = self.canvas.get_context("2d")? else {
            return Err(JsValue::from_str("2d context unavailable"));
        };
        let ctx = ctx.dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(&ctx, &self.core)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<TileId> {
        self.core.selection()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn origin(&self) -> GridPos {
        self.core.origin()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn backing_size(css: f64, dpr: f64) -> u32 {
    (css * dpr).round().max(0.0) as u32
}
