//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize, scheduler wakeups)
//! - ControllerClient for the embedded game controller
//! - DisplayState for rendering
//!
//! # Architecture
//!
//! The App is a thin client that:
//! 1. Converts terminal events to SurfaceEvents
//! 2. Sends events to the embedded controller via ControllerClient
//! 3. Receives ControllerMessages and updates DisplayState
//! 4. Renders the panel from the latest snapshot
//!
//! # Synthesized Releases
//!
//! Terminals do not reliably report key releases, so a pad key press sends
//! `PadPressed` immediately and the app synthesizes the matching
//! `PadReleased` after a short hold. Holding the key extends the hold:
//! key-repeat presses refresh the release timer.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::{Frame, Terminal};

use mimic_core::{Symbol, PAD_COUNT};

use crate::controller_client::ControllerClient;
use crate::display::DisplayState;
use crate::theme;

/// How long a synthesized pad press is held before its release is sent.
const PAD_HOLD: Duration = Duration::from_millis(180);

/// Frame interval (~30 FPS).
const FRAME: Duration = Duration::from_millis(33);

/// Panel dimensions.
const PANEL_WIDTH: u16 = 36;
const PANEL_HEIGHT: u16 = 15;

/// What woke the event loop up.
enum Tick {
    /// A terminal event arrived.
    Terminal(Event),
    /// The scheduler delivered a wakeup.
    Wakeup(mimic_core::Wakeup),
    /// Nothing but the frame timer.
    Frame,
}

/// Main application state.
pub struct App {
    /// Is the app still running?
    running: bool,
    /// Client for the embedded controller.
    client: ControllerClient,
    /// Display state derived from ControllerMessages.
    display: DisplayState,
    /// When each held pad's synthesized release is due.
    release_due: [Option<Instant>; PAD_COUNT],
}

impl App {
    /// Create a new App around an already-constructed client.
    #[must_use]
    pub fn new(client: ControllerClient) -> Self {
        Self {
            running: true,
            client,
            display: DisplayState::new(),
            release_due: [None; PAD_COUNT],
        }
    }

    /// Main event loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        // Render the initial frame immediately so the user sees the panel.
        self.render(terminal)?;

        while self.running {
            // The select only picks what happened; the arm futures must be
            // dropped before handling, which needs the whole App.
            let tick = tokio::select! {
                biased;

                // Terminal events - highest priority.
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => Tick::Terminal(event),
                    _ => Tick::Frame,
                },

                // Scheduler wakeups drive playback and feedback timing.
                maybe_wakeup = self.client.recv_wakeup() => match maybe_wakeup {
                    Some(wakeup) => Tick::Wakeup(wakeup),
                    None => Tick::Frame,
                },

                // Frame tick.
                _ = tokio::time::sleep(FRAME) => Tick::Frame,
            };

            match tick {
                Tick::Terminal(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    self.handle_key(key).await?;
                }
                // Resize needs no bookkeeping; the panel is re-centered
                // from the frame area every draw.
                Tick::Terminal(_) => {}
                Tick::Wakeup(wakeup) => self.client.dispatch_wakeup(wakeup).await?,
                Tick::Frame => {}
            }

            self.release_expired_pads().await?;
            self.process_messages();
            self.render(terminal)?;

            if self.display.quitting {
                self.running = false;
            }
        }

        Ok(())
    }

    /// Process all pending messages from the controller.
    fn process_messages(&mut self) {
        for msg in self.client.recv_all() {
            self.display.apply_message(msg);
        }
    }

    /// Handle keyboard input.
    async fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> anyhow::Result<()> {
        match key.code {
            // Quit
            KeyCode::Esc | KeyCode::Char('q') => {
                self.client.shutdown().await;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.client.shutdown().await;
            }

            // Panel switches and buttons
            KeyCode::Char('p') => self.client.power_switched().await?,
            KeyCode::Char('s') => self.client.strict_pressed().await?,
            KeyCode::Char('n') | KeyCode::Char(' ') => self.client.start_pressed().await?,

            // Pads
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as u8 - b'1';
                if let Some(sym) = Symbol::new(index) {
                    self.press_pad(sym).await?;
                }
            }

            _ => {}
        }
        Ok(())
    }

    /// Press a pad, arming (or extending) its synthesized release.
    async fn press_pad(&mut self, sym: Symbol) -> anyhow::Result<()> {
        if self.release_due[sym.index()].is_none() {
            self.client.pad_pressed(sym).await?;
        }
        self.release_due[sym.index()] = Some(Instant::now() + PAD_HOLD);
        Ok(())
    }

    /// Send releases for pads whose hold has elapsed.
    async fn release_expired_pads(&mut self) -> anyhow::Result<()> {
        let now = Instant::now();
        for index in 0..PAD_COUNT {
            let due = matches!(self.release_due[index], Some(t) if t <= now);
            if due {
                self.release_due[index] = None;
                if let Some(sym) = Symbol::new(index as u8) {
                    self.client.pad_released(sym).await?;
                }
            }
        }
        Ok(())
    }

    /// Render the UI.
    fn render(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        terminal.draw(|frame| {
            let panel = center(
                frame.area(),
                Constraint::Length(PANEL_WIDTH),
                Constraint::Length(PANEL_HEIGHT),
            );
            render_panel(frame, panel, &self.display);
        })?;
        Ok(())
    }
}

/// Center a fixed-size rect inside `area`.
fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area] = Layout::horizontal([horizontal]).flex(Flex::Center).areas(area);
    let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
    area
}

/// Render the whole game panel into `area`.
fn render_panel(frame: &mut Frame, area: Rect, display: &DisplayState) {
    let outer = Block::default()
        .title(" mimic ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(theme::PANEL_FACE));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let [led_row, lights_row, _, pads_area, _, help_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    render_led(frame, led_row, display);
    render_lights(frame, lights_row, display);
    render_pads(frame, pads_area, display);
    render_help(frame, help_row);
}

/// The two-glyph LED count display.
fn render_led(frame: &mut Frame, area: Rect, display: &DisplayState) {
    let glyphs = display.panel.display.as_deref().unwrap_or("  ");
    let style = if display.panel.power {
        Style::default().fg(theme::LED_RED).bg(theme::LED_DARK).bold()
    } else {
        Style::default().fg(theme::LED_DARK).bg(theme::LED_DARK)
    };

    let led = center(area, Constraint::Length(8), Constraint::Length(3));
    let text = Paragraph::new(Line::from(format!(" {glyphs} ")).centered())
        .block(Block::default().borders(Borders::ALL).style(style));
    frame.render_widget(text, led);
}

/// Power and strict indicator lights, plus the listening prompt.
fn render_lights(frame: &mut Frame, area: Rect, display: &DisplayState) {
    let light = |on: bool| {
        if on {
            Span::styled("●", Style::default().fg(theme::LIGHT_ON))
        } else {
            Span::styled("○", Style::default().fg(theme::LIGHT_OFF))
        }
    };

    let mut spans = vec![
        Span::styled(" POWER ", Style::default().fg(theme::DIM_GRAY)),
        light(display.panel.power),
        Span::styled("  STRICT ", Style::default().fg(theme::DIM_GRAY)),
        light(display.panel.strict),
    ];
    if display.panel.listening {
        spans.push(Span::styled(
            "  your turn",
            Style::default().fg(theme::LISTEN_CYAN),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
}

/// The 2x2 colored pad grid.
fn render_pads(frame: &mut Frame, area: Rect, display: &DisplayState) {
    let grid = center(area, Constraint::Length(26), Constraint::Length(6));
    let rows = Layout::vertical([Constraint::Length(3), Constraint::Length(3)]).areas::<2>(grid);

    for (index, selected) in display.panel.selected.iter().enumerate() {
        let row = rows[index / 2];
        let cols =
            Layout::horizontal([Constraint::Length(13), Constraint::Length(13)]).areas::<2>(row);
        let cell = cols[index % 2];

        let (dim, lit) = theme::pad_colors(index);
        let bg = if *selected { lit } else { dim };
        let label = Paragraph::new(Line::from(format!("{}", index + 1)).centered())
            .block(Block::default().borders(Borders::ALL).style(Style::default().bg(bg)));
        frame.render_widget(label, cell);
    }
}

/// Key hints.
fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(
        Line::from("p power · s strict · n start · 1-4 pads · q quit")
            .style(Style::default().fg(theme::DIM_GRAY))
            .centered(),
    );
    frame.render_widget(help, area);
}
