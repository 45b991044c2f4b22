//! Silent tone source for headless operation and tests.

use std::collections::HashSet;

use super::{ToneSource, Voice};

/// Tone source that produces no sound but tracks which voices would be
/// sounding, so headless drivers and tests can observe audio state.
#[derive(Debug, Default)]
pub struct SilentTone {
    active: HashSet<Voice>,
}

impl SilentTone {
    /// Create a silent tone source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a voice is currently (notionally) sounding.
    #[must_use]
    pub fn is_active(&self, voice: Voice) -> bool {
        self.active.contains(&voice)
    }

    /// Number of sounding voices.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl ToneSource for SilentTone {
    fn name(&self) -> &str {
        "silent"
    }

    fn start(&mut self, voice: Voice, frequency_hz: f32) {
        tracing::trace!(?voice, frequency_hz, "tone start");
        self.active.insert(voice);
    }

    fn stop(&mut self, voice: Voice) {
        tracing::trace!(?voice, "tone stop");
        self.active.remove(&voice);
    }

    fn stop_all(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Symbol;

    #[test]
    fn test_tracks_active_voices() {
        let mut tone = SilentTone::new();
        let pad = Voice::Pad(Symbol::new(2).unwrap());

        tone.start(pad, 220.0);
        tone.start(Voice::Buzzer, 42.0);
        assert!(tone.is_active(pad));
        assert_eq!(tone.active_count(), 2);

        tone.stop(pad);
        assert!(!tone.is_active(pad));

        tone.stop_all();
        assert_eq!(tone.active_count(), 0);
    }

    #[test]
    fn test_stop_silent_voice_is_noop() {
        let mut tone = SilentTone::new();
        tone.stop(Voice::Buzzer);
        assert_eq!(tone.active_count(), 0);
    }
}
