//! Virtual-time scheduler for deterministic driving.
//!
//! Nothing here sleeps. Time only moves when [`ManualScheduler::advance`]
//! is called, and due payloads are returned to the caller in firing order.
//! Integration tests and the headless demo drive the controller with this:
//! advance a little, feed the fired wakeups back in, repeat.

use std::time::Duration;

use super::{Scheduler, TimerHandle};

struct Entry<T> {
    id: u64,
    due_ms: u64,
    period_ms: u64,
    remaining: u32,
    payload: T,
}

/// Deterministic scheduler driven by explicit [`advance`](Self::advance)
/// calls.
pub struct ManualScheduler<T> {
    now_ms: u64,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T: Clone + Send> ManualScheduler<T> {
    /// Create an empty scheduler at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of pending timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Advance virtual time by `delta`, returning every payload that came
    /// due, in firing order. Ties fire in scheduling order.
    ///
    /// Timers scheduled *while handling* a returned payload are relative to
    /// that payload's fire time conceptually; callers that need that
    /// precision should advance in steps no larger than their smallest
    /// period and dispatch between steps.
    pub fn advance(&mut self, delta: Duration) -> Vec<T> {
        let target_ms = self.now_ms + delta.as_millis() as u64;
        let mut fired = Vec::new();

        loop {
            // Earliest due entry within the window; stable on ties because
            // entries are kept in scheduling order.
            let Some(pos) = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.due_ms <= target_ms)
                .min_by_key(|(_, e)| e.due_ms)
                .map(|(i, _)| i)
            else {
                break;
            };

            self.now_ms = self.entries[pos].due_ms;
            fired.push(self.entries[pos].payload.clone());

            let entry = &mut self.entries[pos];
            entry.remaining -= 1;
            if entry.remaining == 0 {
                self.entries.remove(pos);
            } else {
                entry.due_ms += entry.period_ms;
            }
        }

        self.now_ms = target_ms;
        fired
    }

    fn insert(&mut self, due_ms: u64, period_ms: u64, remaining: u32, payload: T) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due_ms,
            period_ms,
            remaining,
            payload,
        });
        TimerHandle(id)
    }
}

impl<T: Clone + Send> Default for ManualScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send> Scheduler<T> for ManualScheduler<T> {
    fn after(&mut self, delay: Duration, payload: T) -> TimerHandle {
        let due = self.now_ms + delay.as_millis() as u64;
        self.insert(due, 0, 1, payload)
    }

    fn every(&mut self, period: Duration, count: u32, payload: T) -> TimerHandle {
        let period_ms = period.as_millis() as u64;
        self.insert(self.now_ms + period_ms, period_ms, count.max(1), payload)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.entries.retain(|e| e.id != handle.0);
    }

    fn cancel_all(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_after_fires_once() {
        let mut sched = ManualScheduler::new();
        sched.after(ms(100), "a");

        assert_eq!(sched.advance(ms(99)), Vec::<&str>::new());
        assert_eq!(sched.advance(ms(1)), vec!["a"]);
        assert_eq!(sched.pending(), 0);
        assert_eq!(sched.advance(ms(1_000)), Vec::<&str>::new());
    }

    #[test]
    fn test_firing_order_across_timers() {
        let mut sched = ManualScheduler::new();
        sched.after(ms(100), "late");
        sched.after(ms(50), "early");
        sched.every(ms(30), 2, "tick");

        assert_eq!(
            sched.advance(ms(100)),
            vec!["tick", "early", "tick", "late"]
        );
    }

    #[test]
    fn test_every_stops_after_count() {
        let mut sched = ManualScheduler::new();
        sched.every(ms(10), 3, "t");

        assert_eq!(sched.advance(ms(100)), vec!["t", "t", "t"]);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut sched = ManualScheduler::new();
        let handle = sched.after(ms(10), "a");

        sched.cancel(handle);
        sched.cancel(handle);
        sched.cancel(TimerHandle(999));

        assert_eq!(sched.advance(ms(100)), Vec::<&str>::new());
    }

    #[test]
    fn test_cancel_all_clears_everything() {
        let mut sched = ManualScheduler::new();
        sched.after(ms(10), "a");
        sched.every(ms(5), 10, "b");

        sched.cancel_all();
        assert_eq!(sched.pending(), 0);
        assert_eq!(sched.advance(ms(100)), Vec::<&str>::new());
    }

    #[test]
    fn test_time_accumulates_across_advances() {
        let mut sched = ManualScheduler::new();
        sched.after(ms(100), "a");

        assert_eq!(sched.advance(ms(60)), Vec::<&str>::new());
        assert_eq!(sched.now_ms(), 60);
        assert_eq!(sched.advance(ms(60)), vec!["a"]);
        assert_eq!(sched.now_ms(), 120);
    }
}
