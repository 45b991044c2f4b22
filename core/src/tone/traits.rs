//! Tone source trait definitions.
//!
//! # Design Philosophy
//!
//! A [`ToneSource`] is a set of independently startable voices: one per pad
//! plus the game-over buzzer. Calls are fire-and-forget commands - starting
//! an already-sounding voice retunes it, stopping a silent voice is a
//! no-op. Implementations that need hardware report failure at
//! construction time via [`ToneError`]; that is a fatal startup condition,
//! handled before any session state exists, never per-round.

use thiserror::Error;

use crate::session::Symbol;

/// An independently startable/stoppable tone channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Voice {
    /// The tone belonging to one pad.
    Pad(Symbol),
    /// The fixed-frequency game-over buzzer.
    Buzzer,
}

/// Failure to construct a tone source.
#[derive(Debug, Error)]
pub enum ToneError {
    /// The audio backend is not available in this environment.
    #[error("tone backend unavailable: {0}")]
    Unavailable(String),
}

/// A source of audible feedback.
///
/// Implement this to add an audio path. The engine ships [`SilentTone`]
/// for headless operation; interactive surfaces bring their own.
///
/// [`SilentTone`]: crate::tone::SilentTone
pub trait ToneSource: Send {
    /// Backend name for logs.
    fn name(&self) -> &str;

    /// Start (or retune) a voice at the given frequency.
    fn start(&mut self, voice: Voice, frequency_hz: f32);

    /// Stop a voice. No-op if it is not sounding.
    fn stop(&mut self, voice: Voice);

    /// Stop every sounding voice.
    fn stop_all(&mut self);
}
