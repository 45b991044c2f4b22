//! Display State Types
//!
//! State that represents what the TUI currently shows. It is derived from
//! ControllerMessages and used for rendering.
//!
//! # Design Philosophy
//!
//! The TUI is a "thin client" - it just renders what the controller tells
//! it to. The controller publishes a whole [`PanelSnapshot`] after every
//! mutation, so display state never accumulates deltas: apply the latest
//! snapshot and the screen is correct.

use mimic_core::{ControllerMessage, PanelSnapshot};

/// Display state derived from controller messages.
#[derive(Clone, Debug)]
pub struct DisplayState {
    /// The most recent panel snapshot.
    pub panel: PanelSnapshot,
    /// Set when the controller has shut down.
    pub quitting: bool,
}

impl DisplayState {
    /// Create display state showing a powered-off panel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            panel: PanelSnapshot::off(),
            quitting: false,
        }
    }

    /// Apply a controller message.
    pub fn apply_message(&mut self, msg: ControllerMessage) {
        match msg {
            ControllerMessage::Snapshot(snapshot) => self.panel = snapshot,
            ControllerMessage::Quit => self.quitting = true,
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_starts_dark() {
        let display = DisplayState::new();
        assert!(!display.panel.power);
        assert!(!display.quitting);
    }

    #[test]
    fn test_snapshot_replaces_panel() {
        let mut display = DisplayState::new();

        let mut snap = PanelSnapshot::off();
        snap.power = true;
        snap.display = Some("07".to_string());
        snap.selected[1] = true;
        display.apply_message(ControllerMessage::Snapshot(snap.clone()));

        assert_eq!(display.panel, snap);
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut display = DisplayState::new();
        display.apply_message(ControllerMessage::Quit);
        assert!(display.quitting);
    }
}
