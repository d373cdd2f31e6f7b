//! Plan diversity filtering.

use std::collections::HashSet;

use seatforge_config::UniquenessConfig;
use seatforge_core::{GuestId, SeatingPlan, TableSeating};

/// Rejects candidates too similar to already accepted plans.
///
/// Overlap with an accepted plan is the number of guests seated at the same
/// table in both, divided by the candidate's guest count. The allowed
/// overlap starts at `initial_threshold` and drops by `step` per accepted
/// plan, never below `floor`.
#[derive(Debug, Clone, Copy)]
pub struct UniquenessFilter {
    config: UniquenessConfig,
}

impl UniquenessFilter {
    pub fn new(config: UniquenessConfig) -> Self {
        Self { config }
    }

    /// Allowed overlap when `accepted` plans are already in the pool.
    ///
    /// ```
    /// use seatforge_config::UniquenessConfig;
    /// use seatforge_solver::UniquenessFilter;
    ///
    /// let filter = UniquenessFilter::new(UniquenessConfig::default());
    /// assert!((filter.threshold(0) - 0.8).abs() < 1e-9);
    /// assert!((filter.threshold(2) - 0.7).abs() < 1e-9);
    /// assert_eq!(filter.threshold(40), 0.5);
    /// ```
    pub fn threshold(&self, accepted: usize) -> f64 {
        let lowered = self.config.initial_threshold - self.config.step * accepted as f64;
        lowered.max(self.config.floor)
    }

    /// Fraction of the candidate's guests seated at the same table in
    /// `existing`. An empty candidate fully overlaps anything.
    pub fn overlap(candidate: &[TableSeating], existing: &SeatingPlan) -> f64 {
        let mut shared = 0usize;
        let mut total = 0usize;
        for seating in candidate {
            let guests = seating.guest_ids();
            total += guests.len();
            let Some(other) = existing.table(&seating.table_id) else {
                continue;
            };
            let other: HashSet<&GuestId> = other.guest_ids().into_iter().collect();
            shared += guests.iter().filter(|g| other.contains(*g)).count();
        }
        if total == 0 {
            return 1.0;
        }
        shared as f64 / total as f64
    }

    pub fn is_unique(&self, candidate: &[TableSeating], accepted: &[SeatingPlan]) -> bool {
        let threshold = self.threshold(accepted.len());
        accepted
            .iter()
            .all(|plan| Self::overlap(candidate, plan) <= threshold)
    }
}
