//! Generation statistics.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::strategy::Strategy;

/// Counters for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStatistics {
    /// Placement attempts run.
    pub attempts: u64,
    /// Plans that passed the uniqueness filter.
    pub plans_accepted: usize,
    /// Attempts where some group fit no table.
    pub placement_failures: u64,
    /// Complete plans rejected as too similar to accepted ones.
    pub duplicates_rejected: u64,
    /// Attempts per ordering strategy.
    pub attempts_by_strategy: BTreeMap<Strategy, u64>,
    /// Time spent searching.
    pub duration: Duration,
}

impl GenerationStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_attempt(&mut self, strategy: Strategy) {
        self.attempts += 1;
        *self.attempts_by_strategy.entry(strategy).or_insert(0) += 1;
    }

    /// Fraction of attempts that produced an accepted plan.
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.plans_accepted as f64 / self.attempts as f64
        }
    }

    /// Returns the average time per attempt.
    pub fn avg_time_per_attempt(&self) -> Duration {
        if self.attempts == 0 {
            Duration::ZERO
        } else {
            self.duration / self.attempts.min(u64::from(u32::MAX)) as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_attempt_counts_strategy() {
        let mut stats = GenerationStatistics::new();
        stats.record_attempt(Strategy::Shuffle);
        stats.record_attempt(Strategy::Shuffle);
        stats.record_attempt(Strategy::Reverse);

        assert_eq!(stats.attempts, 3);
        assert_eq!(stats.attempts_by_strategy[&Strategy::Shuffle], 2);
        assert_eq!(stats.attempts_by_strategy[&Strategy::Reverse], 1);
    }

    #[test]
    fn test_rates_on_empty_run() {
        let stats = GenerationStatistics::new();
        assert_eq!(stats.acceptance_rate(), 0.0);
        assert_eq!(stats.avg_time_per_attempt(), Duration::ZERO);
    }

    #[test]
    fn test_acceptance_rate() {
        let stats = GenerationStatistics {
            attempts: 8,
            plans_accepted: 2,
            duration: Duration::from_millis(80),
            ..GenerationStatistics::default()
        };
        assert_eq!(stats.acceptance_rate(), 0.25);
        assert_eq!(stats.avg_time_per_attempt(), Duration::from_millis(10));
    }
}
