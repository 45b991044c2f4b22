//! Terminal-Bell Tone Source
//!
//! A degraded but dependency-free audio path: each voice start rings the
//! terminal bell. Terminals offer no frequency or envelope control, so
//! pitch is dropped and every voice sounds the same; what survives is the
//! timing, which is the part the game logic cares about.

use std::collections::HashSet;
use std::io::{IsTerminal, Write};

use mimic_core::{ToneError, ToneSource, Voice};

/// Tone source that rings the terminal bell on voice starts.
pub struct BellTone {
    active: HashSet<Voice>,
}

impl BellTone {
    /// Create a bell tone source. Fails when stdout is not a terminal,
    /// since there is no bell to ring.
    pub fn new() -> Result<Self, ToneError> {
        if !std::io::stdout().is_terminal() {
            return Err(ToneError::Unavailable(
                "stdout is not a terminal".to_string(),
            ));
        }
        Ok(Self {
            active: HashSet::new(),
        })
    }

    fn ring(&self) {
        let mut out = std::io::stdout();
        // BEL; ignore write errors, losing a beep is not actionable.
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

impl ToneSource for BellTone {
    fn name(&self) -> &str {
        "terminal-bell"
    }

    fn start(&mut self, voice: Voice, frequency_hz: f32) {
        tracing::trace!(?voice, frequency_hz, "bell");
        if self.active.insert(voice) {
            self.ring();
        }
    }

    fn stop(&mut self, voice: Voice) {
        self.active.remove(&voice);
    }

    fn stop_all(&mut self) {
        self.active.clear();
    }
}
