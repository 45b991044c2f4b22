//! Mimic TUI - Terminal interface for the memory-recall game
//!
//! This crate renders the game panel - LED count display, power and strict
//! indicators, and the 2x2 grid of colored pads - and forwards keystrokes
//! to the embedded game controller.
//!
//! # Architecture
//!
//! - **App**: event loop and panel rendering
//! - **ControllerClient**: the embedded controller plus its channels
//! - **DisplayState**: the latest panel snapshot, applied from messages
//! - **BellTone**: terminal-bell audio path

pub mod app;
pub mod controller_client;
pub mod display;
pub mod theme;
pub mod tone;

pub use app::App;
