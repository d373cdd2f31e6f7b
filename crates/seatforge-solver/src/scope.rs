//! Generation-level scope.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use seatforge_core::SeatingPlan;

use crate::statistics::GenerationStatistics;

/// Random source for one attempt.
///
/// Every attempt gets its own ChaCha stream under the run's base seed, so
/// the candidate an attempt produces depends only on its index and not on
/// which thread ran it or what ran before.
pub fn attempt_rng(base_seed: u64, attempt: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(base_seed);
    rng.set_stream(attempt);
    rng
}

/// Mutable state of one generation run: the accepted plan pool, counters
/// and timing. Terminations inspect it between attempts.
#[derive(Debug)]
pub struct GenerationScope {
    base_seed: u64,
    start_time: Option<Instant>,
    plans: Vec<SeatingPlan>,
    statistics: GenerationStatistics,
}

impl GenerationScope {
    pub fn new(base_seed: u64) -> Self {
        Self {
            base_seed,
            start_time: None,
            plans: Vec::new(),
            statistics: GenerationStatistics::new(),
        }
    }

    /// Uses `seed` when given, otherwise a fresh random seed.
    pub fn with_seed(seed: Option<u64>) -> Self {
        Self::new(seed.unwrap_or_else(rand::random))
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    pub fn start_generating(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn attempt_count(&self) -> u64 {
        self.statistics.attempts
    }

    pub fn accepted_count(&self) -> usize {
        self.plans.len()
    }

    pub fn plans(&self) -> &[SeatingPlan] {
        &self.plans
    }

    pub fn attempt_rng(&self, attempt: u64) -> ChaCha8Rng {
        attempt_rng(self.base_seed, attempt)
    }

    pub fn statistics(&self) -> &GenerationStatistics {
        &self.statistics
    }

    pub(crate) fn statistics_mut(&mut self) -> &mut GenerationStatistics {
        &mut self.statistics
    }

    pub(crate) fn accept(&mut self, plan: SeatingPlan) -> &SeatingPlan {
        self.statistics.plans_accepted += 1;
        self.plans.push(plan);
        &self.plans[self.plans.len() - 1]
    }

    /// Closes the run, returning the pool and final statistics.
    pub fn finish(mut self) -> (Vec<SeatingPlan>, GenerationStatistics) {
        self.statistics.duration = self.elapsed().unwrap_or_default();
        (self.plans, self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_attempt_rng_is_stable_per_index() {
        let first: u64 = attempt_rng(7, 3).random();
        let again: u64 = attempt_rng(7, 3).random();
        let other: u64 = attempt_rng(7, 4).random();
        assert_eq!(first, again);
        assert_ne!(first, other);
    }

    #[test]
    fn test_fresh_scope() {
        let scope = GenerationScope::new(42);
        assert_eq!(scope.base_seed(), 42);
        assert_eq!(scope.attempt_count(), 0);
        assert_eq!(scope.accepted_count(), 0);
        assert!(scope.elapsed().is_none());
    }

    #[test]
    fn test_accept_and_finish() {
        let mut scope = GenerationScope::new(1);
        scope.start_generating();
        scope.accept(SeatingPlan::new("plan-1", Vec::new()));

        assert_eq!(scope.accepted_count(), 1);
        let (plans, stats) = scope.finish();
        assert_eq!(plans.len(), 1);
        assert_eq!(stats.plans_accepted, 1);
    }

    #[test]
    fn test_with_seed_keeps_given_seed() {
        assert_eq!(GenerationScope::with_seed(Some(9)).base_seed(), 9);
    }
}
