//! Theme and Colors
//!
//! The panel palette: four colored pads with dim and lit variants, the red
//! LED display, and indicator lights. Lit variants are deliberately much
//! brighter than their dim counterparts so a playback step reads clearly
//! even on washed-out terminals.

use ratatui::style::Color;

// ============================================================================
// Pad Colors (dim / lit pairs, in pad order 0..3)
// ============================================================================

/// Pad 0 - green, at rest
pub const PAD_GREEN: Color = Color::Rgb(0, 110, 60);

/// Pad 0 - green, lit
pub const PAD_GREEN_LIT: Color = Color::Rgb(80, 255, 150);

/// Pad 1 - red, at rest
pub const PAD_RED: Color = Color::Rgb(130, 30, 30);

/// Pad 1 - red, lit
pub const PAD_RED_LIT: Color = Color::Rgb(255, 90, 90);

/// Pad 2 - yellow, at rest
pub const PAD_YELLOW: Color = Color::Rgb(140, 120, 20);

/// Pad 2 - yellow, lit
pub const PAD_YELLOW_LIT: Color = Color::Rgb(255, 235, 100);

/// Pad 3 - blue, at rest
pub const PAD_BLUE: Color = Color::Rgb(30, 60, 140);

/// Pad 3 - blue, lit
pub const PAD_BLUE_LIT: Color = Color::Rgb(110, 170, 255);

/// Dim and lit colors for a pad index.
#[must_use]
pub fn pad_colors(index: usize) -> (Color, Color) {
    match index {
        0 => (PAD_GREEN, PAD_GREEN_LIT),
        1 => (PAD_RED, PAD_RED_LIT),
        2 => (PAD_YELLOW, PAD_YELLOW_LIT),
        _ => (PAD_BLUE, PAD_BLUE_LIT),
    }
}

// ============================================================================
// Panel Colors
// ============================================================================

/// LED display segments
pub const LED_RED: Color = Color::Rgb(255, 60, 40);

/// LED display background (unlit segments)
pub const LED_DARK: Color = Color::Rgb(60, 12, 10);

/// Indicator light, on
pub const LIGHT_ON: Color = Color::Rgb(255, 80, 80);

/// Indicator light, off
pub const LIGHT_OFF: Color = Color::Rgb(70, 70, 70);

/// Panel face
pub const PANEL_FACE: Color = Color::Rgb(30, 30, 34);

/// Labels and hints
pub const DIM_GRAY: Color = Color::Rgb(110, 110, 110);

/// Listening prompt accent
pub const LISTEN_CYAN: Color = Color::Rgb(90, 210, 210);
