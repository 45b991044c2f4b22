//! Session State
//!
//! The mutable state of one game session: power, strict mode, the remembered
//! sequence, the current phase, pad highlights, and the LED display.
//!
//! # Design Philosophy
//!
//! The session is plain data with a single writer (the controller). Surfaces
//! never see it directly - they receive [`PanelSnapshot`]s derived from it
//! after every mutation. A session is created once in its powered-off
//! configuration and mutated in place for the life of the process.
//!
//! [`PanelSnapshot`]: crate::messages::PanelSnapshot

use serde::{Deserialize, Serialize};

use crate::messages::PanelSnapshot;

/// Number of pads on the panel.
pub const PAD_COUNT: usize = 4;

/// Sequence length that wins the game.
pub const MAX_SEQUENCE: usize = 20;

/// One of the four pads (0..3).
///
/// The index is the core identity; color and tone frequency mappings are
/// presentation and configuration concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(u8);

impl Symbol {
    /// Create a symbol from a pad index. Returns `None` for indexes >= 4.
    #[must_use]
    pub fn new(index: u8) -> Option<Self> {
        (index < PAD_COUNT as u8).then_some(Self(index))
    }

    /// The pad index (0..3).
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// All four symbols in pad order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..PAD_COUNT as u8).map(Self)
    }

    /// Draw a symbol uniformly at random.
    pub fn random<R: rand::Rng>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..PAD_COUNT as u8))
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The phase of the session state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// No round in flight. Covers both powered-off and powered-on idle;
    /// `Session::power` distinguishes the two.
    #[default]
    Idle,
    /// The controller is replaying the remembered sequence.
    Playback,
    /// The player is reproducing the sequence.
    Listening,
    /// A mismatch or listening timeout occurred; feedback is running.
    GameOver,
    /// The maximum sequence length was reproduced. Terminal until the
    /// player starts a new game or powers off.
    Win,
}

impl GamePhase {
    /// Human-readable description for status displays.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Playback => "Watch...",
            Self::Listening => "Your turn",
            Self::GameOver => "Miss!",
            Self::Win => "You win!",
        }
    }
}

/// A game session.
///
/// Invariants maintained by the controller:
/// - `sequence` grows by exactly one per completed round and shrinks only
///   on reset paths.
/// - `power == false` implies the whole struct equals [`Session::new`]'s
///   output: empty sequence, no display, strict off, no lit pads.
/// - `strict` can only be true while powered; powering off clears it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Master power. Off forbids all other interaction.
    pub power: bool,
    /// Strict mode: a failure discards the sequence instead of replaying it.
    pub strict: bool,
    /// The remembered sequence. Its length is the player's score.
    pub sequence: Vec<Symbol>,
    /// Current phase.
    pub phase: GamePhase,
    /// Which pads are currently lit/sounding.
    pub selected: [bool; PAD_COUNT],
    /// LED display content: `"--"`, `"!!"`, `"**"`, a zero-padded round
    /// number, or nothing.
    pub display: Option<String>,
}

impl Session {
    /// Create a session in its powered-off configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            power: false,
            strict: false,
            sequence: Vec::new(),
            phase: GamePhase::Idle,
            selected: [false; PAD_COUNT],
            display: None,
        }
    }

    /// Reset to the powered-off configuration.
    pub fn reset_off(&mut self) {
        *self = Self::new();
    }

    /// The display glyph for a round of the given length, zero-padded to
    /// two digits.
    #[must_use]
    pub fn round_label(len: usize) -> String {
        format!("{len:02}")
    }

    /// Whether player presses are currently matched against the sequence.
    #[must_use]
    pub fn listening(&self) -> bool {
        self.phase == GamePhase::Listening
    }

    /// Snapshot for surfaces.
    #[must_use]
    pub fn snapshot(&self) -> PanelSnapshot {
        PanelSnapshot {
            display: self.display.clone(),
            power: self.power,
            strict: self.strict,
            selected: self.selected,
            listening: self.listening(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_bounds() {
        assert!(Symbol::new(0).is_some());
        assert!(Symbol::new(3).is_some());
        assert!(Symbol::new(4).is_none());
        assert_eq!(Symbol::all().count(), 4);
    }

    #[test]
    fn test_new_session_is_off() {
        let session = Session::new();
        assert!(!session.power);
        assert!(!session.strict);
        assert!(session.sequence.is_empty());
        assert_eq!(session.phase, GamePhase::Idle);
        assert_eq!(session.selected, [false; 4]);
        assert!(session.display.is_none());
    }

    #[test]
    fn test_reset_off_clears_everything() {
        let mut session = Session::new();
        session.power = true;
        session.strict = true;
        session.sequence = vec![Symbol::new(2).unwrap()];
        session.phase = GamePhase::Listening;
        session.selected[1] = true;
        session.display = Some("05".to_string());

        session.reset_off();

        assert!(!session.power);
        assert!(!session.strict);
        assert!(session.sequence.is_empty());
        assert_eq!(session.phase, GamePhase::Idle);
        assert_eq!(session.selected, [false; 4]);
        assert!(session.display.is_none());
    }

    #[test]
    fn test_round_label_zero_padded() {
        assert_eq!(Session::round_label(1), "01");
        assert_eq!(Session::round_label(20), "20");
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut session = Session::new();
        session.power = true;
        session.phase = GamePhase::Listening;
        session.selected[2] = true;
        session.display = Some("03".to_string());

        let snap = session.snapshot();
        assert!(snap.power);
        assert!(snap.listening);
        assert!(snap.selected[2]);
        assert_eq!(snap.display.as_deref(), Some("03"));
    }
}
