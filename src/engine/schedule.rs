//! Timers on a virtual clock.
//!
//! The engine never sleeps or touches platform timers. Delayed work (the die
//! settling, autoplay steps) is queued here and fires when the host advances
//! the clock. Cancelling is explicit: a cancelled timer is simply removed.

use serde::{Deserialize, Serialize};

/// What a timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Settle an in-flight roll.
    ResolveRoll,
    /// Recurring autoplay tick.
    AutoPlayTick,
    /// One-shot autoplay move after a roll settles.
    AutoPlayMove,
}

impl TimerKind {
    #[must_use]
    pub fn is_autoplay(self) -> bool {
        matches!(self, TimerKind::AutoPlayTick | TimerKind::AutoPlayMove)
    }
}

/// Handle for cancelling a single timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pending {
    due: u64,
    id: TimerId,
    kind: TimerKind,
}

/// Pending timers plus the current virtual time in milliseconds.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: u64,
    next_id: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Queue `kind` to fire `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, kind: TimerKind) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            due: self.now.saturating_add(delay_ms),
            id,
            kind,
        });
        id
    }

    /// Cancel one timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Cancel every timer matching `predicate`, returning how many were dropped.
    pub fn cancel_where(&mut self, predicate: impl Fn(TimerKind) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| !predicate(p.kind));
        before - self.pending.len()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|p| p.kind == kind)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: u64) -> Option<(TimerId, TimerKind)> {
        let (index, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.id))?;
        let fired = self.pending.remove(index);
        self.now = self.now.max(fired.due);
        Some((fired.id, fired.kind))
    }

    /// Move the clock forward to `until` once nothing else is due.
    pub fn settle(&mut self, until: u64) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(300, TimerKind::AutoPlayTick);
        s.schedule(100, TimerKind::ResolveRoll);
        s.schedule(300, TimerKind::AutoPlayMove);

        assert_eq!(s.pop_due(50), None);
        assert_eq!(s.pop_due(1000).map(|(_, k)| k), Some(TimerKind::ResolveRoll));
        assert_eq!(s.now(), 100);
        assert_eq!(s.pop_due(1000).map(|(_, k)| k), Some(TimerKind::AutoPlayTick));
        assert_eq!(s.pop_due(1000).map(|(_, k)| k), Some(TimerKind::AutoPlayMove));
        assert_eq!(s.pop_due(1000), None);

        s.settle(1000);
        assert_eq!(s.now(), 1000);
    }

    #[test]
    fn test_delays_are_relative_to_now() {
        let mut s = Scheduler::new();
        s.settle(500);
        s.schedule(100, TimerKind::ResolveRoll);

        assert_eq!(s.pop_due(599), None);
        assert!(s.pop_due(600).is_some());
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        let roll = s.schedule(10, TimerKind::ResolveRoll);
        s.schedule(10, TimerKind::AutoPlayTick);
        s.schedule(20, TimerKind::AutoPlayMove);

        assert_eq!(s.cancel_where(TimerKind::is_autoplay), 2);
        assert!(s.is_pending(TimerKind::ResolveRoll));
        assert!(s.cancel(roll));
        assert!(!s.cancel(roll));
        assert_eq!(s.pending_count(), 0);
    }
}
