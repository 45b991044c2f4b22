//! Mimic Demo
//!
//! Headless scripted run of the game engine. Plays a few rounds perfectly
//! under virtual time, then fails one on purpose, printing every panel
//! snapshot as JSON. Useful for eyeballing the state machine and for
//! driving the engine in environments without a terminal UI.
//!
//! # Usage
//!
//! ```bash
//! # Reproducible run
//! MIMIC_SEED=7 mimic-demo
//!
//! # With verbose logging
//! RUST_LOG=debug mimic-demo
//! ```
//!
//! # Environment Variables
//!
//! - `MIMIC_SEED`: RNG seed (default: 7, so runs are reproducible)
//! - `MIMIC_DEMO_ROUNDS`: rounds to play correctly before failing (default 3)
//! - `RUST_LOG`: log level (trace, debug, info, warn, error)

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::info;

use mimic_core::{
    ControllerMessage, GameConfig, GamePhase, ManualScheduler, SessionController, SilentTone,
    SurfaceEvent, Symbol, Wakeup,
};

type DemoController = SessionController<SilentTone, ManualScheduler<Wakeup>>;

/// Advance virtual time in small steps, dispatching fired wakeups, until
/// the predicate holds or `max_ms` elapses.
async fn run_until<F>(ctrl: &mut DemoController, max_ms: u64, mut done: F) -> bool
where
    F: FnMut(&DemoController) -> bool,
{
    const QUANTUM_MS: u64 = 25;
    let mut elapsed = 0;
    while elapsed < max_ms {
        if done(ctrl) {
            return true;
        }
        let fired = ctrl
            .scheduler_mut()
            .advance(Duration::from_millis(QUANTUM_MS));
        for wakeup in fired {
            let _ = ctrl.handle_wakeup(wakeup).await;
        }
        elapsed += QUANTUM_MS;
    }
    done(ctrl)
}

fn print_snapshots(rx: &mut mpsc::Receiver<ControllerMessage>) {
    while let Ok(msg) = rx.try_recv() {
        if let ControllerMessage::Snapshot(snap) = msg {
            match serde_json::to_string(&snap) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::warn!("snapshot serialization failed: {}", e),
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = GameConfig::default();
    config.rng_seed = Some(7);
    config.apply_env();

    let rounds: usize = std::env::var("MIMIC_DEMO_ROUNDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3);

    let (tx, mut rx) = mpsc::channel(1024);
    let mut ctrl = SessionController::new(SilentTone::new(), config, ManualScheduler::new(), tx);

    info!(rounds, "starting scripted game");

    ctrl.handle_event(SurfaceEvent::PowerSwitched).await?;
    ctrl.handle_event(SurfaceEvent::StartPressed).await?;

    for round in 1..=rounds {
        let reached =
            run_until(&mut ctrl, 60_000, |c| c.session().phase == GamePhase::Listening).await;
        anyhow::ensure!(reached, "round {round} never reached listening");
        print_snapshots(&mut rx);

        let sequence: Vec<Symbol> = ctrl.session().sequence.clone();
        info!(round, len = sequence.len(), "echoing sequence back");
        for sym in sequence {
            ctrl.handle_event(SurfaceEvent::PadPressed(sym)).await?;
            ctrl.handle_event(SurfaceEvent::PadReleased(sym)).await?;
        }
        print_snapshots(&mut rx);
    }

    // Fail the next round on purpose to show the game-over path.
    let reached = run_until(&mut ctrl, 60_000, |c| c.session().phase == GamePhase::Listening).await;
    anyhow::ensure!(reached, "final round never reached listening");

    let expected = ctrl
        .session()
        .sequence
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("listening with an empty sequence"))?;
    let wrong = Symbol::all().find(|s| *s != expected).unwrap_or(expected);
    info!(%expected, %wrong, "pressing the wrong pad");
    ctrl.handle_event(SurfaceEvent::PadPressed(wrong)).await?;
    ctrl.handle_event(SurfaceEvent::PadReleased(wrong)).await?;

    // Let the game-over feedback play out, then power off cleanly.
    run_until(&mut ctrl, 2_900, |_| false).await;
    print_snapshots(&mut rx);
    ctrl.handle_event(SurfaceEvent::PowerSwitched).await?;
    print_snapshots(&mut rx);

    info!("done");
    Ok(())
}
