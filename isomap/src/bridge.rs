//! Selection notifications to the host UI.
//!
//! The engine owns the sending half of an unbounded channel supplied at
//! construction. Sending never blocks the input path; if the host has dropped
//! its receiver the event is logged and discarded.

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

use crate::world::TileId;

/// Payload delivered for every new selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEvent {
    #[serde(rename = "blockId")]
    pub tile_id: TileId,
}

/// Sending half held by the engine.
#[derive(Debug, Clone, Default)]
pub struct SelectionBridge {
    tx: Option<mpsc::UnboundedSender<SelectionEvent>>,
}

impl SelectionBridge {
    /// A bridge and the receiver the host listens on.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SelectionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A bridge with no listener; every notification is dropped.
    #[must_use]
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Deliver a selection. Returns `true` if a listener received it.
    pub fn notify(&self, tile_id: TileId) -> bool {
        let Some(tx) = &self.tx else {
            debug!(tile_id, "selection with no listener attached");
            return false;
        };
        match tx.send(SelectionEvent { tile_id }) {
            Ok(()) => true,
            Err(e) => {
                debug!(tile_id, error = %e, "selection listener dropped");
                false
            }
        }
    }
}
