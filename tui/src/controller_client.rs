//! Controller Client
//!
//! Thin wrapper around the game controller for TUI integration. The client
//! embeds the controller directly (no network) and provides a convenient
//! interface for sending events and receiving messages.
//!
//! # Architecture
//!
//! The TUI is a "thin client" - it doesn't contain any game logic.
//! All decisions happen in the controller. The TUI's job is:
//! 1. Convert terminal events to SurfaceEvents
//! 2. Send SurfaceEvents to the controller
//! 3. Receive ControllerMessages
//! 4. Render the panel based on the latest snapshot
//!
//! The tokio scheduler delivers wakeups on a channel this client owns; the
//! app's event loop pulls them out and feeds them back via
//! [`dispatch_wakeup`](ControllerClient::dispatch_wakeup) so every state
//! mutation stays on the UI task.

use tokio::sync::mpsc;

use mimic_core::{
    ControllerMessage, GameConfig, SessionController, SurfaceEvent, Symbol, TokioScheduler, Wakeup,
};

use crate::tone::BellTone;

/// Client for communicating with the embedded game controller.
pub struct ControllerClient {
    /// The embedded controller instance
    controller: SessionController<BellTone, TokioScheduler<Wakeup>>,
    /// Receiver for messages from the controller
    msg_rx: mpsc::Receiver<ControllerMessage>,
    /// Receiver for scheduler wakeups
    wakeup_rx: mpsc::Receiver<Wakeup>,
}

impl ControllerClient {
    /// Create a client with an embedded controller.
    ///
    /// Fails if the tone backend cannot be constructed; that is a fatal
    /// startup condition, surfaced before any session state exists.
    pub fn new(config: GameConfig) -> anyhow::Result<Self> {
        let (msg_tx, msg_rx) = mpsc::channel(256);
        let (wakeup_tx, wakeup_rx) = mpsc::channel(256);

        let tone = BellTone::new()?;
        let scheduler = TokioScheduler::new(wakeup_tx);
        let controller = SessionController::new(tone, config, scheduler, msg_tx);

        Ok(Self {
            controller,
            msg_rx,
            wakeup_rx,
        })
    }

    /// Flip the power switch.
    pub async fn power_switched(&mut self) -> anyhow::Result<()> {
        self.controller.handle_event(SurfaceEvent::PowerSwitched).await
    }

    /// Press the strict-mode button.
    pub async fn strict_pressed(&mut self) -> anyhow::Result<()> {
        self.controller.handle_event(SurfaceEvent::StrictPressed).await
    }

    /// Press the start button.
    pub async fn start_pressed(&mut self) -> anyhow::Result<()> {
        self.controller.handle_event(SurfaceEvent::StartPressed).await
    }

    /// Press a pad down.
    pub async fn pad_pressed(&mut self, sym: Symbol) -> anyhow::Result<()> {
        self.controller.handle_event(SurfaceEvent::PadPressed(sym)).await
    }

    /// Release a pad.
    pub async fn pad_released(&mut self, sym: Symbol) -> anyhow::Result<()> {
        self.controller.handle_event(SurfaceEvent::PadReleased(sym)).await
    }

    /// Wait for the next scheduler wakeup. Resolves to `None` only if the
    /// scheduler side has shut down.
    pub async fn recv_wakeup(&mut self) -> Option<Wakeup> {
        self.wakeup_rx.recv().await
    }

    /// Feed a wakeup back into the controller.
    pub async fn dispatch_wakeup(&mut self, wakeup: Wakeup) -> anyhow::Result<()> {
        self.controller.handle_wakeup(wakeup).await
    }

    /// Receive all pending messages from the controller (non-blocking).
    pub fn recv_all(&mut self) -> Vec<ControllerMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Shut down the controller: silence everything, reset, and emit Quit.
    pub async fn shutdown(&mut self) {
        self.controller.shutdown().await;
    }
}
