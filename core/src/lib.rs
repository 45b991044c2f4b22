//! Mimic Core - Headless Memory-Recall Game Engine
//!
//! This crate provides the complete game logic for mimic, independent of
//! any UI framework. It can drive a TUI, run headless for testing and
//! automation, or back any other surface that can forward press/release
//! events and render panel snapshots.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Surfaces                             │
//! │   ┌─────────┐   ┌───────────────┐   ┌────────────────────┐   │
//! │   │   TUI   │   │ Headless demo │   │   Test harness     │   │
//! │   └────┬────┘   └───────┬───────┘   └─────────┬──────────┘   │
//! │        └────────────────┴───────────────────────┘            │
//! │                         │                                    │
//! │                  SurfaceEvent (up)                           │
//! │               ControllerMessage (down)                       │
//! │                         │                                    │
//! └─────────────────────────┼────────────────────────────────────┘
//!                           │
//! ┌─────────────────────────┼────────────────────────────────────┐
//! │                 SESSION CONTROLLER                           │
//! │   ┌──────────┐  ┌───────────┐  ┌────────────┐  ┌─────────┐   │
//! │   │ Session  │  │ Scheduler │  │ ToneSource │  │   RNG   │   │
//! │   └──────────┘  └───────────┘  └────────────┘  └─────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`SessionController`]: the state machine that owns everything
//! - [`SurfaceEvent`]: events from a surface to the controller
//! - [`ControllerMessage`] / [`PanelSnapshot`]: what surfaces render
//! - [`Scheduler`]: cancelable delayed/repeating delivery
//!   ([`TokioScheduler`] for real time, [`ManualScheduler`] for virtual)
//! - [`ToneSource`]: audio feedback seam ([`SilentTone`] for headless)
//! - [`GameConfig`]: defaults + TOML file + `MIMIC_*` environment
//!
//! # No UI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework. It's pure game logic that can be used anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod controller;
pub mod events;
pub mod messages;
pub mod scheduler;
pub mod session;
pub mod timing;
pub mod tone;

// Re-exports for convenience
pub use config::{default_config_path, ConfigError, GameConfig};
pub use controller::{SessionController, Wakeup, WakeupKind};
pub use events::SurfaceEvent;
pub use messages::{ControllerMessage, PanelSnapshot};
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle, TokioScheduler};
pub use session::{GamePhase, Session, Symbol, MAX_SEQUENCE, PAD_COUNT};
pub use tone::{SilentTone, ToneError, ToneSource, Voice};
