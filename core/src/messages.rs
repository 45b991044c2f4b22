//! Controller Messages
//!
//! Messages sent from the controller to surfaces. The controller is the
//! single writer of game state; surfaces are pure renderers that display
//! what the controller tells them to. After every state mutation the
//! controller publishes a fresh [`PanelSnapshot`], so a surface never has
//! to accumulate deltas - the latest snapshot is always the whole truth.

use serde::{Deserialize, Serialize};

use crate::session::PAD_COUNT;

/// Messages from the controller to a surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerMessage {
    /// The panel state after a mutation. Purely presentational.
    Snapshot(PanelSnapshot),
    /// The controller has shut down; the surface should exit.
    Quit,
}

/// Everything a surface needs to draw the panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    /// LED display content, if any.
    pub display: Option<String>,
    /// Master power state.
    pub power: bool,
    /// Strict-mode light.
    pub strict: bool,
    /// Which pads are lit.
    pub selected: [bool; PAD_COUNT],
    /// Whether player input is currently being matched.
    pub listening: bool,
}

impl PanelSnapshot {
    /// Snapshot of a powered-off panel.
    #[must_use]
    pub fn off() -> Self {
        Self {
            display: None,
            power: false,
            strict: false,
            selected: [false; PAD_COUNT],
            listening: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_snapshot_is_dark() {
        let snap = PanelSnapshot::off();
        assert!(!snap.power);
        assert!(!snap.strict);
        assert!(!snap.listening);
        assert!(snap.display.is_none());
        assert_eq!(snap.selected, [false; 4]);
    }
}
