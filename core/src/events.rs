//! Surface Events
//!
//! Events sent from a surface (TUI, headless driver, test harness) to the
//! controller. These represent everything a player can physically do to the
//! panel: flip the power switch, press the strict or start buttons, and
//! press or release the four pads.
//!
//! # Design Philosophy
//!
//! Surfaces are "dumb" input forwarders. They report what happened and never
//! interpret it - the controller decides whether a pad press is a match
//! attempt, idle noodling, or nothing at all (power off). In particular the
//! release channel is pure cleanup: a release always reaches the controller
//! regardless of phase so a lit pad never sticks.

use serde::{Deserialize, Serialize};

use crate::session::Symbol;

/// Events from a surface to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// The power switch was flipped.
    PowerSwitched,
    /// The strict-mode button was pressed. No-op while powered off.
    StrictPressed,
    /// The start button was pressed. No-op while powered off; otherwise
    /// cancels any in-flight round and starts a new game.
    StartPressed,
    /// A pad was pressed down.
    PadPressed(Symbol),
    /// A pad was released.
    PadReleased(Symbol),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_compare() {
        let sym = Symbol::new(1).unwrap();
        assert_eq!(SurfaceEvent::PadPressed(sym), SurfaceEvent::PadPressed(sym));
        assert_ne!(
            SurfaceEvent::PadPressed(sym),
            SurfaceEvent::PadReleased(sym)
        );
    }
}
