//! Timing Tables
//!
//! Every duration in the game in one place: playback speed tiers, the gap
//! between step starts, feedback flash cadences, and the fixed delays
//! between phases. The controller schedules exclusively from these values
//! so the whole cadence of the game can be read (and tested) here.

/// Gap added between consecutive step starts during playback, on top of the
/// step's own "on" duration.
pub const STEP_GAP_MS: u64 = 300;

/// Extra delay after playback completes before listening begins, added to
/// one more step duration.
pub const LISTEN_GRACE_MS: u64 = 500;

/// Deadline for reproducing the whole sequence, armed once when listening
/// begins.
pub const LISTEN_DEADLINE_MS: u64 = 3_000;

/// Pause between a completed round's final press and the grown sequence's
/// playback, so the last press's feedback is perceivable.
pub const GROW_PAUSE_MS: u64 = 1_000;

/// How long the buzzer sounds on game over.
pub const BUZZER_MS: u64 = 700;

/// Half-cycle of the `"!!"` / `"**"` display flash.
pub const FLASH_HALF_MS: u64 = 250;

/// Display toggles after the initial flash state: three full cycles.
pub const FLASH_TOGGLES: u32 = 6;

/// Pad highlights left over from presses are cleared this long after game
/// over entry.
pub const HIGHLIGHT_CLEAR_MS: u64 = 1_500;

/// Delay after game over before the replay/restart decision.
pub const REPLAY_DELAY_MS: u64 = 3_000;

/// Delay after the winning press before the win feedback starts.
pub const WIN_LEAD_MS: u64 = 1_500;

/// Half-cycle of the winning symbol's sparkle.
pub const SPARKLE_HALF_MS: u64 = 75;

/// Sparkle toggles after the initial "on" state: ten full cycles.
pub const SPARKLE_TOGGLES: u32 = 19;

/// Half-cycle of the `"--"` blink when a new game starts.
pub const START_BLINK_HALF_MS: u64 = 250;

/// Blink toggles after the display is first cleared: two full blinks.
pub const START_BLINK_TOGGLES: u32 = 3;

/// Total duration of the start blink, after which the first round begins.
pub const START_BLINK_TOTAL_MS: u64 = 1_000;

/// Step "on" duration for a playback of the given sequence length.
///
/// Four speed tiers; longer sequences replay faster.
#[must_use]
pub fn step_duration_ms(sequence_len: usize) -> u64 {
    match sequence_len {
        0..=2 => 1_000,
        3..=5 => 800,
        6..=8 => 600,
        _ => 400,
    }
}

/// Offset of step `index` from the start of playback.
#[must_use]
pub fn step_offset_ms(index: usize, step_duration_ms: u64) -> u64 {
    index as u64 * (step_duration_ms + STEP_GAP_MS)
}

/// Delay from the start of playback until listening begins, for a sequence
/// of the given length.
#[must_use]
pub fn listen_begin_ms(sequence_len: usize, step_duration_ms: u64) -> u64 {
    let last = sequence_len.saturating_sub(1);
    step_offset_ms(last, step_duration_ms) + step_duration_ms + LISTEN_GRACE_MS + step_duration_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_tiers() {
        assert_eq!(step_duration_ms(1), 1_000);
        assert_eq!(step_duration_ms(2), 1_000);
        assert_eq!(step_duration_ms(3), 800);
        assert_eq!(step_duration_ms(5), 800);
        assert_eq!(step_duration_ms(6), 600);
        assert_eq!(step_duration_ms(8), 600);
        assert_eq!(step_duration_ms(9), 400);
        assert_eq!(step_duration_ms(20), 400);
    }

    #[test]
    fn test_step_offsets_increase() {
        let d = step_duration_ms(1);
        assert_eq!(step_offset_ms(0, d), 0);
        assert_eq!(step_offset_ms(1, d), 1_300);
        assert_eq!(step_offset_ms(2, d), 2_600);
    }

    #[test]
    fn test_listen_begin_after_last_step() {
        // Length 1 at 1000ms: step ends at 1000, listening at 1000+500+1000.
        assert_eq!(listen_begin_ms(1, 1_000), 2_500);
        // Length 3 at 800ms: last step starts at 2*(1100)=2200, ends 3000,
        // listening at 3000+500+800.
        assert_eq!(listen_begin_ms(3, 800), 4_300);
    }
}
