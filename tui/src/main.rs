//! Mimic TUI entry point
//!
//! # Usage
//!
//! ```bash
//! mimic-tui
//!
//! # Reproducible game
//! MIMIC_SEED=7 mimic-tui
//!
//! # With verbose logging (redirect stderr, the panel owns the screen)
//! RUST_LOG=debug mimic-tui 2>mimic.log
//! ```
//!
//! # Environment Variables
//!
//! - `MIMIC_CONFIG`: path to a TOML config file
//! - `MIMIC_SEED`: RNG seed for reproducible games
//! - `RUST_LOG`: log level (trace, debug, info, warn, error)

use std::io;

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use mimic_core::GameConfig;
use mimic_tui::app::App;
use mimic_tui::controller_client::ControllerClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = match GameConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("config load failed, using defaults: {}", e);
            GameConfig::default()
        }
    };

    // Tone backend failure is fatal, surfaced before the terminal is taken
    // over so the error prints cleanly.
    let client = ControllerClient::new(config)?;
    let mut app = App::new(client);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
