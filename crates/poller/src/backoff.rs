use std::time::Duration;

/// Poll cadence with failure-driven backoff.
///
/// Every failed poll is retried on the next tick with the same cursor. The
/// delay stays at the base interval until `threshold` consecutive failures,
/// then doubles per failure up to `max`. Any success snaps back to the base
/// interval.
#[derive(Debug, Clone)]
pub struct BackoffState {
    base: Duration,
    max: Duration,
    threshold: u32,
    consecutive_failures: u32,
    lost_reported: bool,
}

impl BackoffState {
    pub fn new(base: Duration, max: Duration, threshold: u32) -> Self {
        Self {
            base,
            max: max.max(base),
            threshold: threshold.max(1),
            consecutive_failures: 0,
            lost_reported: false,
        }
    }

    /// Delay before the next poll.
    pub fn current_delay(&self) -> Duration {
        if self.consecutive_failures < self.threshold {
            return self.base;
        }
        let doublings = (self.consecutive_failures - self.threshold).min(16);
        self.base
            .saturating_mul(1u32 << doublings)
            .min(self.max)
    }

    /// Record a failure; returns true when this failure crosses the
    /// connection-lost threshold (report it once).
    pub fn on_failure(&mut self) -> bool {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        if self.consecutive_failures >= self.threshold && !self.lost_reported {
            self.lost_reported = true;
            return true;
        }
        false
    }

    /// Record a success; returns true when recovering from a reported loss.
    pub fn on_success(&mut self) -> bool {
        self.consecutive_failures = 0;
        std::mem::take(&mut self.lost_reported)
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> BackoffState {
        BackoffState::new(Duration::from_secs(1), Duration::from_secs(30), 5)
    }

    #[test]
    fn delay_stays_at_base_below_threshold() {
        let mut s = state();
        for _ in 0..4 {
            s.on_failure();
            assert_eq!(s.current_delay(), Duration::from_secs(1));
        }
    }

    #[test]
    fn loss_is_reported_exactly_once() {
        let mut s = state();
        let mut reports = 0;
        for _ in 0..10 {
            if s.on_failure() {
                reports += 1;
            }
        }
        assert_eq!(reports, 1);
        assert_eq!(s.consecutive_failures(), 10);
    }

    #[test]
    fn delay_doubles_after_threshold_and_caps() {
        let mut s = state();
        for _ in 0..5 {
            s.on_failure();
        }
        assert_eq!(s.current_delay(), Duration::from_secs(1));
        s.on_failure();
        assert_eq!(s.current_delay(), Duration::from_secs(2));
        s.on_failure();
        assert_eq!(s.current_delay(), Duration::from_secs(4));
        for _ in 0..10 {
            s.on_failure();
        }
        assert_eq!(s.current_delay(), Duration::from_secs(30));
    }

    #[test]
    fn success_resets_delay_and_reports_recovery() {
        let mut s = state();
        for _ in 0..6 {
            s.on_failure();
        }
        assert!(s.current_delay() > Duration::from_secs(1));
        assert!(s.on_success());
        assert_eq!(s.current_delay(), Duration::from_secs(1));
        // A second success is not a recovery.
        assert!(!s.on_success());
    }

    #[test]
    fn success_without_loss_is_not_a_recovery() {
        let mut s = state();
        s.on_failure();
        assert!(!s.on_success());
    }
}
