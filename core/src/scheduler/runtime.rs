//! Real-time scheduler backed by spawned tokio timer tasks.
//!
//! Each `after`/`every` call spawns one task that sleeps and delivers its
//! payload into an mpsc channel; the channel's receiver is held by whoever
//! drives the controller. Abort handles live in a [`DashMap`] keyed by
//! timer id so `cancel` can reach a task from the scheduling side while
//! fired tasks remove themselves.
//!
//! Cancellation only guarantees no *future* deliveries. A payload already
//! queued in the channel when its timer is cancelled still arrives;
//! consumers drop those via their epoch fence.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use super::{Scheduler, TimerHandle};

/// Scheduler that delivers payloads through a tokio mpsc channel.
///
/// Must be used from within a tokio runtime.
pub struct TokioScheduler<T> {
    tx: mpsc::Sender<T>,
    timers: Arc<DashMap<u64, AbortHandle>>,
    next_id: AtomicU64,
}

impl<T: Clone + Send + 'static> TokioScheduler<T> {
    /// Create a scheduler delivering payloads on `tx`.
    #[must_use]
    pub fn new(tx: mpsc::Sender<T>) -> Self {
        Self {
            tx,
            timers: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Number of timers that have not yet fired or been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    fn register(&self, id: u64, handle: AbortHandle) -> TimerHandle {
        self.timers.insert(id, handle);
        TimerHandle(id)
    }
}

impl<T: Clone + Send + 'static> Scheduler<T> for TokioScheduler<T> {
    fn after(&mut self, delay: Duration, payload: T) -> TimerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let tx = self.tx.clone();
        let timers = Arc::clone(&self.timers);

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(payload).await.is_err() {
                tracing::trace!(id, "scheduler receiver gone, dropping payload");
            }
            timers.remove(&id);
        });

        self.register(id, task.abort_handle())
    }

    fn every(&mut self, period: Duration, count: u32, payload: T) -> TimerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let tx = self.tx.clone();
        let timers = Arc::clone(&self.timers);

        let task = tokio::spawn(async move {
            for _ in 0..count.max(1) {
                tokio::time::sleep(period).await;
                if tx.send(payload.clone()).await.is_err() {
                    break;
                }
            }
            timers.remove(&id);
        });

        self.register(id, task.abort_handle())
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some((_, abort)) = self.timers.remove(&handle.0) {
            abort.abort();
        }
    }

    fn cancel_all(&mut self) {
        let ids: Vec<u64> = self.timers.iter().map(|e| *e.key()).collect();
        for id in ids {
            if let Some((_, abort)) = self.timers.remove(&id) {
                abort.abort();
            }
        }
    }
}
