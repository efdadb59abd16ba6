//! Rendering: draws the scene's draw list and the overlay to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads engine state and produces pixels. It never mutates engine state.
//!
//! Tiles are drawn as flat diamonds in their appearance `fill`. The
//! appearance `texture` key is left to hosts with their own sprite backend.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{
    HIGHLIGHT_STROKE, HIGHLIGHT_WIDTH, HOVER_TINT, IDLE_FRAMES, TOOLTIP_HEIGHT, TOOLTIP_WIDTH,
};
use crate::engine::EngineCore;
use crate::hit::Diamond;
use crate::interaction::Overlay;
use crate::projection::TileGeometry;
use crate::scene::{CharacterSprite, DrawItem, TileSprite};

/// Opacity of the hover tint layered over a tile's base fill.
const TINT_ALPHA: f64 = 0.35;

/// Tile outline colour.
const TILE_EDGE: &str = "rgba(0, 0, 0, 0.25)";

/// Character marker radius in world units.
const CHARACTER_RADIUS: f64 = 7.0;

/// Peak vertical travel of the idle bob in world units.
const IDLE_BOB: f64 = 2.0;

const TOOLTIP_PADDING: f64 = 8.0;
const TOOLTIP_LINE_HEIGHT: f64 = 15.0;

/// Draw the full scene: tiles, characters, then the selection overlay.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    let camera = core.camera();
    let dpr = core.dpr;

    // Layer 1: clear and apply the camera.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, core.viewport_width, core.viewport_height);
    ctx.scale(camera.zoom, camera.zoom)?;
    ctx.translate(-camera.scroll_x, -camera.scroll_y)?;

    // Layer 2: tiles back to front, characters above.
    let geometry = core.geometry();
    for item in core.scene().draw_list() {
        match item {
            DrawItem::Tile(sprite) => draw_tile(ctx, sprite, geometry),
            DrawItem::Character(sprite) => draw_character(ctx, sprite, core.idle_frame())?,
        }
    }

    // Layer 3: highlight and tooltip.
    let overlay = core.overlay();
    if overlay.visible {
        draw_overlay(ctx, overlay, camera.zoom)?;
    }
    Ok(())
}

fn trace_diamond(ctx: &CanvasRenderingContext2d, diamond: &Diamond) {
    ctx.begin_path();
    ctx.move_to(diamond.top.x, diamond.top.y);
    ctx.line_to(diamond.right.x, diamond.right.y);
    ctx.line_to(diamond.bottom.x, diamond.bottom.y);
    ctx.line_to(diamond.left.x, diamond.left.y);
    ctx.close_path();
}

fn draw_tile(ctx: &CanvasRenderingContext2d, sprite: &TileSprite, geometry: &TileGeometry) {
    let diamond = Diamond::at(sprite.position(), geometry);
    trace_diamond(ctx, &diamond);
    ctx.set_fill_style_str(&sprite.appearance.fill);
    ctx.fill();

    if sprite.tinted {
        ctx.save();
        ctx.set_global_alpha(TINT_ALPHA);
        ctx.set_fill_style_str(HOVER_TINT);
        ctx.fill();
        ctx.restore();
    }

    ctx.set_stroke_style_str(TILE_EDGE);
    ctx.set_line_width(1.0);
    ctx.stroke();
}

fn draw_character(ctx: &CanvasRenderingContext2d, sprite: &CharacterSprite, frame: u64) -> Result<(), JsValue> {
    #[allow(clippy::cast_precision_loss)]
    let phase = frame as f64 / IDLE_FRAMES as f64 * 2.0 * PI;
    let feet = sprite.position();
    let bob = phase.sin() * IDLE_BOB;

    // Shadow stays on the ground.
    ctx.begin_path();
    ctx.ellipse(feet.x, feet.y, CHARACTER_RADIUS, CHARACTER_RADIUS * 0.4, 0.0, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str("rgba(0, 0, 0, 0.3)");
    ctx.fill();

    // Body.
    let body_y = feet.y - CHARACTER_RADIUS * 1.6 + bob;
    ctx.set_fill_style_str("#5b3a1e");
    ctx.fill_rect(feet.x - CHARACTER_RADIUS * 0.5, body_y, CHARACTER_RADIUS, CHARACTER_RADIUS * 1.4);

    // Head.
    ctx.begin_path();
    ctx.arc(feet.x, body_y - CHARACTER_RADIUS * 0.5, CHARACTER_RADIUS * 0.6, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str("#f1c27d");
    ctx.fill();
    Ok(())
}

fn draw_overlay(ctx: &CanvasRenderingContext2d, overlay: &Overlay, zoom: f64) -> Result<(), JsValue> {
    if let Some(highlight) = &overlay.highlight {
        trace_diamond(ctx, highlight);
        ctx.set_stroke_style_str(HIGHLIGHT_STROKE);
        ctx.set_line_width(HIGHLIGHT_WIDTH / zoom);
        ctx.stroke();
    }

    let x = overlay.position.x;
    let y = overlay.position.y;
    ctx.set_fill_style_str("rgba(0, 0, 0, 0.75)");
    ctx.fill_rect(x, y, TOOLTIP_WIDTH, TOOLTIP_HEIGHT);

    ctx.set_fill_style_str("#ffffff");
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");
    let mut line_y = y + TOOLTIP_PADDING;
    for line in overlay.text.lines() {
        ctx.fill_text(line, x + TOOLTIP_PADDING, line_y)?;
        line_y += TOOLTIP_LINE_HEIGHT;
    }
    Ok(())
}
