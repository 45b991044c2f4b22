//! Session Controller - The Game's Brain
//!
//! The controller owns all game logic: it grows the random sequence, drives
//! timed playback, arbitrates player input against the expected sequence,
//! and decides phase transitions (idle, playback, listening, game over,
//! win). It composes with three boundary collaborators:
//!
//! - a [`Scheduler`] for every delayed or repeating action,
//! - a [`ToneSource`] started and stopped in lock-step with pad selection,
//! - a surface, reached only through [`ControllerMessage`]s.
//!
//! # Design Philosophy
//!
//! The controller is surface-agnostic. It doesn't know whether it's driving
//! a TUI, a headless script, or a test harness. Two entry points mutate
//! state: [`handle_event`](SessionController::handle_event) for things the
//! player did, and [`handle_wakeup`](SessionController::handle_wakeup) for
//! things the scheduler delivered. After every mutation the surface gets a
//! fresh panel snapshot.
//!
//! # Cancellation
//!
//! Interrupting a round (power-off, restart, game over, win) must leave no
//! timer behind and no tone sounding. Teardown is one routine: cancel every
//! scheduled timer and bump the round epoch. Wakeups carry the epoch they
//! were armed under; a wakeup from a cancelled round that was already in
//! flight is dropped on arrival without touching state.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::GameConfig;
use crate::events::SurfaceEvent;
use crate::messages::{ControllerMessage, PanelSnapshot};
use crate::scheduler::Scheduler;
use crate::session::{GamePhase, Session, Symbol, MAX_SEQUENCE, PAD_COUNT};
use crate::timing;
use crate::tone::{ToneSource, Voice};

/// A scheduler payload: what to do, fenced by the round it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wakeup {
    /// Round epoch this wakeup was armed under.
    pub epoch: u64,
    /// The action to perform.
    pub kind: WakeupKind,
}

/// Scheduled actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WakeupKind {
    /// Toggle the `"--"` display during the new-game blink.
    StartBlink,
    /// Append one random symbol and replay the whole sequence.
    RoundBegin,
    /// Activate playback step `n`: light the pad, start its tone.
    StepOn(usize),
    /// Deactivate playback step `n`.
    StepOff(usize),
    /// Playback done; start matching player input.
    ListenBegin,
    /// The listening deadline expired.
    ListenDeadline,
    /// Stop the game-over buzzer.
    BuzzerOff,
    /// Toggle the `"!!"` display flash.
    ErrorFlash,
    /// Clear pad highlights left over from presses.
    ErrorClear,
    /// Game-over delay elapsed: replay the sequence, or restart in strict
    /// mode.
    ReplayDecision,
    /// Start the win feedback: silence tones, flash `"**"`.
    WinLeadIn,
    /// Toggle the `"**"` display flash.
    WinFlash,
    /// Start the winning symbol's sparkle.
    SparkleBegin,
    /// Toggle the winning symbol's highlight and tone together.
    Sparkle,
}

/// Per-round bookkeeping. Torn down whenever the round is interrupted.
#[derive(Debug)]
struct RoundProgress {
    /// Index of the next expected input position while listening.
    cursor: usize,
}

/// The headless game controller.
pub struct SessionController<T: ToneSource, S: Scheduler<Wakeup>> {
    /// Configuration.
    config: GameConfig,
    /// The session state. This controller is the sole writer.
    session: Session,
    /// Sequence generator.
    rng: StdRng,
    /// Audio feedback.
    tone: T,
    /// Owns every pending timer.
    scheduler: S,
    /// Channel to the surface.
    tx: mpsc::Sender<ControllerMessage>,
    /// In-flight round bookkeeping.
    round: Option<RoundProgress>,
    /// Bumped on every teardown; stale wakeups are dropped.
    epoch: u64,
}

impl<T: ToneSource, S: Scheduler<Wakeup>> SessionController<T, S> {
    /// Create a controller in the powered-off state.
    pub fn new(
        tone: T,
        config: GameConfig,
        scheduler: S,
        tx: mpsc::Sender<ControllerMessage>,
    ) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        tracing::debug!(tone = tone.name(), seeded = config.rng_seed.is_some(), "controller created");

        Self {
            config,
            session: Session::new(),
            rng,
            tone,
            scheduler,
            tx,
            round: None,
            epoch: 0,
        }
    }

    /// The session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The tone source.
    pub fn tone(&self) -> &T {
        &self.tone
    }

    /// The scheduler. Deterministic drivers advance virtual time through
    /// this.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The current panel snapshot.
    pub fn snapshot(&self) -> PanelSnapshot {
        self.session.snapshot()
    }

    /// Handle an event from the surface.
    pub async fn handle_event(&mut self, event: SurfaceEvent) -> anyhow::Result<()> {
        match event {
            SurfaceEvent::PowerSwitched => {
                if self.session.power {
                    self.power_off().await;
                } else {
                    self.power_on().await;
                }
            }
            SurfaceEvent::StrictPressed => {
                if self.session.power {
                    self.session.strict = !self.session.strict;
                    tracing::debug!(strict = self.session.strict, "strict toggled");
                    self.publish().await;
                }
            }
            SurfaceEvent::StartPressed => {
                if self.session.power {
                    self.start_new().await;
                }
            }
            SurfaceEvent::PadPressed(sym) => self.pad_pressed(sym).await,
            SurfaceEvent::PadReleased(sym) => self.pad_released(sym).await,
        }
        Ok(())
    }

    /// Handle a scheduler wakeup.
    pub async fn handle_wakeup(&mut self, wakeup: Wakeup) -> anyhow::Result<()> {
        if wakeup.epoch != self.epoch {
            tracing::trace!(?wakeup, current = self.epoch, "dropping stale wakeup");
            return Ok(());
        }

        match wakeup.kind {
            WakeupKind::StartBlink => {
                self.session.display = match self.session.display {
                    Some(_) => None,
                    None => Some("--".to_string()),
                };
                self.publish().await;
            }
            WakeupKind::RoundBegin => {
                let sym = Symbol::random(&mut self.rng);
                self.session.sequence.push(sym);
                tracing::debug!(%sym, len = self.session.sequence.len(), "sequence grown");
                self.begin_playback().await;
            }
            WakeupKind::StepOn(i) => {
                if let Some(&sym) = self.session.sequence.get(i) {
                    self.session.selected[sym.index()] = true;
                    self.tone.start(Voice::Pad(sym), self.pad_frequency(sym));
                    self.publish().await;
                }
            }
            WakeupKind::StepOff(i) => {
                if let Some(&sym) = self.session.sequence.get(i) {
                    self.session.selected[sym.index()] = false;
                    self.tone.stop(Voice::Pad(sym));
                    self.publish().await;
                }
            }
            WakeupKind::ListenBegin => {
                self.session.phase = GamePhase::Listening;
                self.round = Some(RoundProgress { cursor: 0 });
                self.arm(timing::LISTEN_DEADLINE_MS, WakeupKind::ListenDeadline);
                self.publish().await;
            }
            WakeupKind::ListenDeadline => {
                if self.session.phase == GamePhase::Listening {
                    tracing::debug!("listening deadline expired");
                    self.enter_game_over().await;
                }
            }
            WakeupKind::BuzzerOff => {
                self.tone.stop(Voice::Buzzer);
            }
            WakeupKind::ErrorFlash => {
                self.session.display = match self.session.display {
                    Some(_) => None,
                    None => Some("!!".to_string()),
                };
                self.publish().await;
            }
            WakeupKind::ErrorClear => {
                self.session.selected = [false; PAD_COUNT];
                self.publish().await;
            }
            WakeupKind::ReplayDecision => {
                if self.session.strict {
                    self.start_new().await;
                } else {
                    self.begin_playback().await;
                }
            }
            WakeupKind::WinLeadIn => {
                self.tone.stop_all();
                self.session.display = Some("**".to_string());
                self.arm_every(timing::FLASH_HALF_MS, timing::FLASH_TOGGLES, WakeupKind::WinFlash);
                self.arm(
                    timing::FLASH_HALF_MS * u64::from(timing::FLASH_TOGGLES),
                    WakeupKind::SparkleBegin,
                );
                self.publish().await;
            }
            WakeupKind::WinFlash => {
                self.session.display = match self.session.display {
                    Some(_) => None,
                    None => Some("**".to_string()),
                };
                self.publish().await;
            }
            WakeupKind::SparkleBegin => {
                if let Some(&last) = self.session.sequence.last() {
                    self.session.selected[last.index()] = true;
                    self.tone.start(Voice::Pad(last), self.pad_frequency(last));
                    self.arm_every(
                        timing::SPARKLE_HALF_MS,
                        timing::SPARKLE_TOGGLES,
                        WakeupKind::Sparkle,
                    );
                    self.publish().await;
                }
            }
            WakeupKind::Sparkle => {
                if let Some(&last) = self.session.sequence.last() {
                    if self.session.selected[last.index()] {
                        self.session.selected[last.index()] = false;
                        self.tone.stop(Voice::Pad(last));
                    } else {
                        self.session.selected[last.index()] = true;
                        self.tone.start(Voice::Pad(last), self.pad_frequency(last));
                    }
                    self.publish().await;
                }
            }
        }
        Ok(())
    }

    /// Shut down: silence everything and tell the surface to exit.
    pub async fn shutdown(&mut self) {
        self.clear_timers();
        self.tone.stop_all();
        self.session.reset_off();
        self.send(ControllerMessage::Quit).await;
    }

    // === Power and new game ===

    async fn power_on(&mut self) {
        self.session.power = true;
        self.session.display = Some("--".to_string());
        tracing::debug!("power on");
        self.publish().await;
    }

    /// Power off from any state: total teardown back to the reset state.
    async fn power_off(&mut self) {
        self.clear_timers();
        self.tone.stop_all();
        self.round = None;
        self.session.reset_off();
        tracing::debug!("power off");
        self.publish().await;
    }

    /// Cancel any in-flight round, blink the display, then start a
    /// length-1 game.
    async fn start_new(&mut self) {
        self.clear_timers();
        self.tone.stop_all();
        self.round = None;
        self.session.sequence.clear();
        self.session.phase = GamePhase::Idle;
        self.session.selected = [false; PAD_COUNT];
        self.session.display = None;
        tracing::debug!("new game");
        self.publish().await;

        self.arm_every(
            timing::START_BLINK_HALF_MS,
            timing::START_BLINK_TOGGLES,
            WakeupKind::StartBlink,
        );
        self.arm(timing::START_BLINK_TOTAL_MS, WakeupKind::RoundBegin);
    }

    // === Playback ===

    /// Replay the whole current sequence from the first element, then hand
    /// over to listening.
    async fn begin_playback(&mut self) {
        let len = self.session.sequence.len();
        self.round = Some(RoundProgress { cursor: 0 });
        self.session.phase = GamePhase::Playback;
        self.session.selected = [false; PAD_COUNT];
        self.session.display = Some(Session::round_label(len));

        let duration = timing::step_duration_ms(len);
        tracing::debug!(len, duration, "playback begins");
        for i in 0..len {
            let on_at = timing::step_offset_ms(i, duration);
            self.arm(on_at, WakeupKind::StepOn(i));
            self.arm(on_at + duration, WakeupKind::StepOff(i));
        }
        self.arm(timing::listen_begin_ms(len, duration), WakeupKind::ListenBegin);

        self.publish().await;
    }

    // === Input matching ===

    async fn pad_pressed(&mut self, sym: Symbol) {
        if !self.session.power {
            return;
        }

        // Feedback first, right or wrong.
        self.session.selected[sym.index()] = true;
        self.tone.start(Voice::Pad(sym), self.pad_frequency(sym));
        self.publish().await;

        if self.session.phase != GamePhase::Listening {
            return;
        }
        let Some(round) = self.round.as_mut() else {
            return;
        };

        let expected = self.session.sequence.get(round.cursor).copied();
        if expected == Some(sym) {
            round.cursor += 1;
            if round.cursor == self.session.sequence.len() {
                self.round_complete().await;
            }
        } else {
            tracing::debug!(pressed = %sym, ?expected, "mismatch");
            self.enter_game_over().await;
        }
    }

    async fn pad_released(&mut self, sym: Symbol) {
        if !self.session.power {
            return;
        }
        // Release is pure cleanup, in every phase.
        self.session.selected[sym.index()] = false;
        self.tone.stop(Voice::Pad(sym));
        self.publish().await;
    }

    /// The whole sequence was reproduced correctly.
    async fn round_complete(&mut self) {
        self.clear_timers();
        if self.session.sequence.len() >= MAX_SEQUENCE {
            self.enter_win().await;
        } else {
            self.session.phase = GamePhase::Playback;
            self.arm(timing::GROW_PAUSE_MS, WakeupKind::RoundBegin);
            self.publish().await;
        }
    }

    // === Failure and win feedback ===

    /// Mismatch and deadline expiry both land here; downstream they are
    /// indistinguishable.
    async fn enter_game_over(&mut self) {
        self.clear_timers();
        self.tone.stop_all();
        self.round = None;
        self.session.phase = GamePhase::GameOver;
        self.session.display = Some("!!".to_string());

        self.tone.start(Voice::Buzzer, self.config.buzzer_frequency);
        self.arm(timing::BUZZER_MS, WakeupKind::BuzzerOff);
        self.arm_every(timing::FLASH_HALF_MS, timing::FLASH_TOGGLES, WakeupKind::ErrorFlash);
        self.arm(timing::HIGHLIGHT_CLEAR_MS, WakeupKind::ErrorClear);
        self.arm(timing::REPLAY_DELAY_MS, WakeupKind::ReplayDecision);

        tracing::debug!(strict = self.session.strict, "game over");
        self.publish().await;
    }

    /// Terminal until the player starts a new game or powers off.
    async fn enter_win(&mut self) {
        self.clear_timers();
        self.round = None;
        self.session.phase = GamePhase::Win;
        self.arm(timing::WIN_LEAD_MS, WakeupKind::WinLeadIn);
        tracing::debug!(len = self.session.sequence.len(), "win");
        self.publish().await;
    }

    // === Plumbing ===

    /// The single teardown routine: cancel every pending timer and fence
    /// out wakeups already in flight.
    fn clear_timers(&mut self) {
        self.scheduler.cancel_all();
        self.epoch += 1;
    }

    fn arm(&mut self, delay_ms: u64, kind: WakeupKind) {
        let wakeup = Wakeup {
            epoch: self.epoch,
            kind,
        };
        self.scheduler.after(Duration::from_millis(delay_ms), wakeup);
    }

    fn arm_every(&mut self, period_ms: u64, count: u32, kind: WakeupKind) {
        let wakeup = Wakeup {
            epoch: self.epoch,
            kind,
        };
        self.scheduler
            .every(Duration::from_millis(period_ms), count, wakeup);
    }

    fn pad_frequency(&self, sym: Symbol) -> f32 {
        self.config.pad_frequencies[sym.index()]
    }

    async fn publish(&self) {
        self.send(ControllerMessage::Snapshot(self.session.snapshot()))
            .await;
    }

    async fn send(&self, msg: ControllerMessage) {
        if let Err(e) = self.tx.send(msg).await {
            tracing::warn!("failed to send message to surface: {}", e);
        }
    }
}
