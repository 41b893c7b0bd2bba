/// Fixed-interval tick timer for the game loop.
///
/// Cooperative: the main loop polls `fire(now)` once per frame and runs one
/// simulation tick when it returns true. The timer is either armed (a next
/// deadline exists) or cancelled (no deadline; `fire` is always false).
/// Cancellation is immediate and deterministic, so no tick can fire against
/// a session that has stopped or been dropped.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct TickTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl TickTimer {
    /// New timer, not yet armed.
    pub fn new(interval: Duration) -> Self {
        TickTimer { interval, next_due: None }
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Arm (or re-arm) so the first tick fires one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Has the deadline passed? At most one tick per call; the next
    /// deadline is measured from `now`, so a stalled frame does not
    /// produce a burst of catch-up ticks.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_150: Duration = Duration::from_millis(150);

    #[test]
    fn unarmed_never_fires() {
        let mut t = TickTimer::new(MS_150);
        let now = Instant::now();
        assert!(!t.fire(now + Duration::from_secs(10)));
    }

    #[test]
    fn fires_after_interval() {
        let mut t = TickTimer::new(MS_150);
        let t0 = Instant::now();
        t.start(t0);
        assert!(!t.fire(t0 + Duration::from_millis(149)));
        assert!(t.fire(t0 + MS_150));
        // re-armed from the firing instant
        assert!(!t.fire(t0 + Duration::from_millis(200)));
        assert!(t.fire(t0 + Duration::from_millis(300)));
    }

    #[test]
    fn stall_fires_once() {
        let mut t = TickTimer::new(MS_150);
        let t0 = Instant::now();
        t.start(t0);
        let late = t0 + Duration::from_secs(2);
        assert!(t.fire(late));
        assert!(!t.fire(late));
    }

    #[test]
    fn cancel_stops_pending_tick() {
        let mut t = TickTimer::new(MS_150);
        let t0 = Instant::now();
        t.start(t0);
        t.cancel();
        assert!(!t.is_armed());
        assert!(!t.fire(t0 + Duration::from_secs(1)));
    }
}
