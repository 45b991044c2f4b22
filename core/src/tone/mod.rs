//! Tone Sources
//!
//! Audio feedback abstraction. The controller starts and stops voices in
//! lock-step with pad selection and game-over feedback; it never runs
//! timing of its own for audio. Envelope shaping (fast attack, long
//! release) is the implementation's concern, not the controller's.

mod silent;
mod traits;

pub use silent::SilentTone;
pub use traits::{ToneError, ToneSource, Voice};
