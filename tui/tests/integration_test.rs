//! Integration tests for the TUI wiring
//!
//! These tests verify the surface-side flow the App relies on: the
//! controller embedded behind channels, the tokio scheduler delivering
//! wakeups in real (paused) time, and snapshots arriving after every
//! mutation. The core crate's own tests cover the state machine under
//! virtual time; here the point is that the production wiring - spawned
//! timer tasks, mpsc delivery, epoch fencing of aborted timers - behaves
//! the same way.

use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::mpsc;
use tokio::time::timeout;

use mimic_core::{
    ControllerMessage, GameConfig, GamePhase, SessionController, SilentTone, SurfaceEvent, Symbol,
    TokioScheduler, Wakeup,
};

type WiredController = SessionController<SilentTone, TokioScheduler<Wakeup>>;

struct Harness {
    ctrl: WiredController,
    wakeup_rx: mpsc::Receiver<Wakeup>,
    msg_rx: mpsc::Receiver<ControllerMessage>,
}

fn wire() -> Harness {
    let (msg_tx, msg_rx) = mpsc::channel(1024);
    let (wakeup_tx, wakeup_rx) = mpsc::channel(1024);
    let config = GameConfig {
        rng_seed: Some(42),
        ..GameConfig::default()
    };
    let ctrl = SessionController::new(
        SilentTone::new(),
        config,
        TokioScheduler::new(wakeup_tx),
        msg_tx,
    );
    Harness {
        ctrl,
        wakeup_rx,
        msg_rx,
    }
}

impl Harness {
    /// Pull wakeups off the channel and feed them to the controller until
    /// it reaches `phase`. Paused time auto-advances to each timer.
    async fn pump_until(&mut self, phase: GamePhase) {
        while self.ctrl.session().phase != phase {
            let wakeup = timeout(Duration::from_secs(120), self.wakeup_rx.recv())
                .await
                .expect("timed out waiting for a wakeup")
                .expect("scheduler channel closed");
            self.ctrl.handle_wakeup(wakeup).await.unwrap();
        }
    }

    async fn press(&mut self, sym: Symbol) {
        self.ctrl
            .handle_event(SurfaceEvent::PadPressed(sym))
            .await
            .unwrap();
        self.ctrl
            .handle_event(SurfaceEvent::PadReleased(sym))
            .await
            .unwrap();
    }

    fn drain_messages(&mut self) -> Vec<ControllerMessage> {
        let mut msgs = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            msgs.push(msg);
        }
        msgs
    }
}

#[tokio::test(start_paused = true)]
async fn test_full_round_over_tokio_scheduler() {
    let mut h = wire();

    h.ctrl.handle_event(SurfaceEvent::PowerSwitched).await.unwrap();
    h.ctrl.handle_event(SurfaceEvent::StartPressed).await.unwrap();

    h.pump_until(GamePhase::Listening).await;
    assert_eq!(h.ctrl.session().sequence.len(), 1);

    let first = h.ctrl.session().sequence[0];
    h.press(first).await;

    // The sequence grows and replays through real timer tasks.
    h.pump_until(GamePhase::Listening).await;
    assert_eq!(h.ctrl.session().sequence.len(), 2);
    assert_eq!(h.ctrl.session().sequence[0], first);
}

#[tokio::test(start_paused = true)]
async fn test_snapshots_flow_to_the_surface() {
    let mut h = wire();

    h.ctrl.handle_event(SurfaceEvent::PowerSwitched).await.unwrap();
    let msgs = h.drain_messages();

    let lit = msgs.iter().any(|m| {
        matches!(m, ControllerMessage::Snapshot(s) if s.power && s.display.as_deref() == Some("--"))
    });
    assert!(lit, "power-on snapshot never arrived: {msgs:?}");
}

#[tokio::test(start_paused = true)]
async fn test_wakeups_from_cancelled_round_are_fenced() {
    let mut h = wire();

    h.ctrl.handle_event(SurfaceEvent::PowerSwitched).await.unwrap();
    h.ctrl.handle_event(SurfaceEvent::StartPressed).await.unwrap();
    h.pump_until(GamePhase::Playback).await;

    // Power off mid-playback, then drain whatever was already in flight.
    h.ctrl.handle_event(SurfaceEvent::PowerSwitched).await.unwrap();
    h.drain_messages();

    while let Ok(Some(wakeup)) = timeout(Duration::from_secs(30), h.wakeup_rx.recv()).await {
        h.ctrl.handle_wakeup(wakeup).await.unwrap();
    }

    // Stale wakeups were dropped without touching state.
    assert!(!h.ctrl.session().power);
    assert!(h.ctrl.session().sequence.is_empty());
    assert!(h.drain_messages().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_emits_quit() {
    let mut h = wire();

    h.ctrl.handle_event(SurfaceEvent::PowerSwitched).await.unwrap();
    h.ctrl.shutdown().await;

    let msgs = h.drain_messages();
    assert!(msgs.iter().any(|m| matches!(m, ControllerMessage::Quit)));
    assert!(!h.ctrl.session().power);
}
