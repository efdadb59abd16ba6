//! Shared numeric constants for the isomap crate.

// ── Camera ──────────────────────────────────────────────────────

/// Smallest allowed camera zoom factor.
pub const MIN_ZOOM: f64 = 0.5;

/// Largest allowed camera zoom factor.
pub const MAX_ZOOM: f64 = 2.0;

/// Zoom change applied per wheel event.
pub const ZOOM_STEP: f64 = 0.1;

/// Pointer velocity is divided by this while drag-panning.
pub const DRAG_DAMPING: f64 = 5.0;

/// Camera scroll bound box in world units: `(x, y, width, height)`.
pub const CAMERA_BOUNDS: (f64, f64, f64, f64) = (-3000.0, -3000.0, 6000.0, 6000.0);

// ── Selection ───────────────────────────────────────────────────

/// How far a selected tile (and its character) rises, in world units.
pub const SELECTION_LIFT: f64 = 10.0;

/// Duration of the select/deselect nudge.
pub const SELECTION_TWEEN_MS: f64 = 200.0;

// ── Characters ──────────────────────────────────────────────────

/// Characters stand this far below their tile's projected anchor.
pub const CHARACTER_Y_OFFSET: f64 = 20.0;

/// Frames in the character idle cycle.
pub const IDLE_FRAMES: u64 = 6;

/// Idle cycle playback rate.
pub const IDLE_FPS: f64 = 6.0;

// ── Overlay ─────────────────────────────────────────────────────

/// Tooltip placement relative to the selected tile's anchor.
pub const TOOLTIP_OFFSET_X: f64 = 50.0;
pub const TOOLTIP_OFFSET_Y: f64 = -40.0;

/// Tooltip box size in world units.
pub const TOOLTIP_WIDTH: f64 = 200.0;
pub const TOOLTIP_HEIGHT: f64 = 90.0;

/// Tint applied to a hovered tile.
pub const HOVER_TINT: &str = "#ffff00";

/// Outline colour and width of the selection highlight.
pub const HIGHLIGHT_STROKE: &str = "#ffff00";
pub const HIGHLIGHT_WIDTH: f64 = 3.0;
