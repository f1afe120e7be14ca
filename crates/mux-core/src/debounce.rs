// ABOUTME: Deadline-based debouncer for coalescing bursts of changes.
// ABOUTME: Polled from the owner's event loop; no background threads or timers.

use std::time::{Duration, Instant};

/// Collapses a burst of triggers into one firing after a quiet period.
///
/// Every `trigger` pushes the deadline out to `now + delay`. `poll` fires at
/// most once per burst, the first time it is called at or after the deadline.
/// The caller supplies `now`, which keeps the debouncer deterministic under test.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record an intent, restarting the quiet period
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// How long until the pending intent fires, for event loops that sleep until then
    pub fn time_remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Drop any pending intent. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Returns true exactly once when the quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn idle_debouncer_never_fires() {
        let mut debouncer = Debouncer::new(DELAY);
        assert!(!debouncer.is_pending());
        assert!(!debouncer.poll(Instant::now() + DELAY * 10));
    }

    #[test]
    fn fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.trigger(start);

        assert!(!debouncer.poll(start + Duration::from_millis(499)));
        assert!(debouncer.poll(start + DELAY));
        assert!(!debouncer.poll(start + DELAY * 2));
    }

    #[test]
    fn retrigger_extends_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.trigger(start);
        debouncer.trigger(start + Duration::from_millis(400));

        assert!(!debouncer.poll(start + Duration::from_millis(600)));
        assert_eq!(
            debouncer.time_remaining(start + Duration::from_millis(600)),
            Some(Duration::from_millis(300))
        );
        assert!(debouncer.poll(start + Duration::from_millis(900)));
    }

    #[test]
    fn cancel_clears_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        debouncer.trigger(start);
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());
        assert!(!debouncer.poll(start + DELAY));
    }
}
