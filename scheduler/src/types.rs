//! Shared types used by the scheduler subsystem.

use std::time::Duration;

use market::pulse::DEFAULT_SPIKE_THRESHOLD;
use market::rolling_window::DEFAULT_WINDOW_SIZE;

/// Cadences and thresholds for the two periodic passes.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Interval between digest reports.
    pub report_interval: Duration,

    /// Interval between spike checks. One window spans
    /// `window_size * check_interval`.
    pub check_interval: Duration,

    /// A price above `average * spike_threshold` is a spike.
    pub spike_threshold: f64,
}

impl SchedulerConfig {
    /// Check cadence that makes `window_size` samples cover one hour.
    pub fn hourly_check_interval(window_size: usize) -> Duration {
        Duration::from_secs(3600 / window_size.max(1) as u64)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            report_interval: Duration::from_secs(2 * 60 * 60),
            check_interval: Self::hourly_check_interval(DEFAULT_WINDOW_SIZE),
            spike_threshold: DEFAULT_SPIKE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_check_interval_is_five_minutes() {
        assert_eq!(SchedulerConfig::default().check_interval, Duration::from_secs(300));
    }

    #[test]
    fn check_interval_follows_window_size() {
        assert_eq!(SchedulerConfig::hourly_check_interval(6), Duration::from_secs(600));
        assert_eq!(SchedulerConfig::hourly_check_interval(0), Duration::from_secs(3600));
    }
}
