//! Select/deselect nudges.
//!
//! Each sprite has at most one tween. Starting a tween on a sprite that is
//! already moving replaces the old one and starts from wherever the old one
//! had got to, so a rapid reselect never leaves two tweens fighting over the
//! same offset.

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use std::collections::HashMap;

use crate::consts::SELECTION_TWEEN_MS;
use crate::scene::{PrimitiveId, Scene};

/// A single offset transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl Tween {
    /// Interpolated value at `now_ms`, clamped to the end points.
    #[must_use]
    pub fn value_at(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * quad_ease_out(t)
    }

    #[must_use]
    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms - self.start_ms >= self.duration_ms
    }
}

/// Quadratic ease-out: decelerating to zero velocity.
fn quad_ease_out(t: f64) -> f64 {
    t * (2.0 - t)
}

/// Active tweens keyed by sprite.
#[derive(Debug, Default)]
pub struct Animator {
    tweens: HashMap<PrimitiveId, Tween>,
}

impl Animator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `id` toward `to`, starting from its in-flight value if it has one
    /// and from `current` otherwise.
    pub fn start(&mut self, id: PrimitiveId, current: f64, to: f64, now_ms: f64) {
        let from = self.tweens.get(&id).map_or(current, |t| t.value_at(now_ms));
        if (from - to).abs() < 1e-9 {
            self.tweens.remove(&id);
            return;
        }
        self.tweens.insert(id, Tween { from, to, start_ms: now_ms, duration_ms: SELECTION_TWEEN_MS });
    }

    /// Write every tween's value at `now_ms` into the scene and drop the ones
    /// that finished or whose sprite is gone. Returns `true` while any remain.
    pub fn apply(&mut self, now_ms: f64, scene: &mut Scene) -> bool {
        self.tweens.retain(|id, tween| scene.set_offset(*id, tween.value_at(now_ms)) && !tween.is_finished(now_ms));
        !self.tweens.is_empty()
    }

    #[must_use]
    pub fn is_animating(&self, id: PrimitiveId) -> bool {
        self.tweens.contains_key(&id)
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
