//! Isometric viewport and interaction engine for the block world map.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but all of
//! its logic lives in [`engine::EngineCore`], which has no browser
//! dependencies and is exercised directly by the tests. The host layer feeds
//! it world snapshots and raw pointer/wheel/tick events, draws what the
//! render layer hands back, and listens for tile selections on the
//! [`bridge::SelectionBridge`] channel it injected at construction.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`projection`] | Grid → isometric screen projection |
//! | [`viewport`] | Sliding grid window over the world, clamped to world bounds |
//! | [`world`] | Tile/character records and the per-snapshot [`world::WorldIndex`] |
//! | [`scene`] | Primitive arena: one sprite per visible tile/character, draw order |
//! | [`hit`] | Diamond hit regions and point-in-polygon tests |
//! | [`interaction`] | Selection state machine, hover, tooltip/highlight overlay |
//! | [`animation`] | Cancellable select/deselect tweens keyed by primitive |
//! | [`camera`] | Screen-space pan/zoom camera |
//! | [`input`] | Pointer buttons, wheel deltas, drag tracking |
//! | [`bridge`] | Selection notifications to the host UI |
//! | [`config`] | Engine configuration and the injected appearance table |
//! | [`render`] | 2D canvas renderer for the draw list |
//! | [`consts`] | Shared numeric constants (zoom limits, lift, offsets, etc.) |

pub mod animation;
pub mod bridge;
pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod hit;
pub mod input;
pub mod interaction;
pub mod projection;
pub mod render;
pub mod scene;
pub mod viewport;
pub mod world;
