//! Cancellable deferred callbacks driven by an external clock.
//!
//! The scheduler never reads wall time. Owners feed it elapsed durations and
//! receive the events that came due, which keeps timing deterministic under
//! test.

use std::time::Duration;

/// Handle for a scheduled entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Entry<E> {
    id: TimerId,
    due: Duration,
    period: Option<Duration>,
    event: E,
}

/// One-shot and periodic timers over a virtual clock.
#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<E: Clone> Scheduler<E> {
    /// Empty scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time accumulated through [`Scheduler::advance`].
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live entries.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Whether `id` is still scheduled.
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Fire `event` once after `delay`.
    pub fn after(&mut self, delay: Duration, event: E) -> TimerId {
        self.insert(delay, None, event)
    }

    /// Fire `event` every `period`, first after one period.
    pub fn every(&mut self, period: Duration, event: E) -> TimerId {
        self.insert(period, Some(period), event)
    }

    /// Drop an entry. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Drop every entry.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Move the clock forward and collect due events in due order.
    ///
    /// Periodic entries fire once per elapsed period, so a long gap yields
    /// several events. Entries that share a due time fire in scheduling order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<E> {
        self.now += elapsed;
        let mut fired = Vec::new();

        while let Some(position) = self.next_due() {
            let period = self.entries[position].period;
            fired.push(self.entries[position].event.clone());
            match period {
                Some(period) if !period.is_zero() => self.entries[position].due += period,
                _ => {
                    self.entries.remove(position);
                }
            }
        }

        fired
    }

    fn next_due(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= self.now)
            .min_by_key(|(_, entry)| (entry.due, entry.id.0))
            .map(|(position, _)| position)
    }

    fn insert(&mut self, delay: Duration, period: Option<Duration>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: self.now + delay,
            period,
            event,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn one_shot_fires_once_when_due() {
        let mut scheduler = Scheduler::new();
        let flip_back = scheduler.after(SECOND, "flip-back");

        assert!(scheduler.advance(Duration::from_millis(999)).is_empty());
        assert!(scheduler.is_scheduled(flip_back));
        assert_eq!(scheduler.advance(Duration::from_millis(1)), vec!["flip-back"]);
        assert!(!scheduler.is_scheduled(flip_back));
        assert!(scheduler.advance(SECOND).is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn periodic_catches_up_after_long_gap() {
        let mut scheduler = Scheduler::new();
        scheduler.every(SECOND, "tick");

        assert_eq!(scheduler.advance(Duration::from_millis(3500)).len(), 3);
        assert_eq!(scheduler.advance(Duration::from_millis(500)).len(), 1);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn cancelled_entries_never_fire() {
        let mut scheduler = Scheduler::new();
        let swap = scheduler.after(SECOND, "swap");
        scheduler.every(SECOND, "tick");

        assert!(scheduler.is_scheduled(swap));
        assert!(scheduler.cancel(swap));
        assert!(!scheduler.is_scheduled(swap));
        assert!(!scheduler.cancel(swap));
        assert_eq!(scheduler.advance(SECOND), vec!["tick"]);
        assert_eq!(scheduler.now(), SECOND);

        scheduler.cancel_all();
        assert!(scheduler.advance(SECOND * 5).is_empty());
    }

    #[test]
    fn events_fire_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.after(SECOND * 2, "late");
        scheduler.after(SECOND, "early");
        scheduler.after(SECOND, "early-second");

        assert_eq!(
            scheduler.advance(SECOND * 2),
            vec!["early", "early-second", "late"]
        );
    }
}
