//! Plan quality scoring.

use seatforge_config::ScoringConfig;
use seatforge_core::{PlanScore, SeatingProblem, TableSeating};

/// Scores a completed plan.
///
/// - `seat_reward` per seated individual
/// - `must_pair_reward` per co-seated `must` pair
/// - minus `cannot_pair_penalty` per co-seated `cannot` pair (placement never
///   produces one; the term keeps externally built plans honest)
/// - `adjacency_reward` per adjacency preference satisfied by a table-mate,
///   counted once per guest holding the preference
///
/// The result is clamped at zero.
#[derive(Debug, Clone, Copy)]
pub struct PlanScorer<'a> {
    problem: &'a SeatingProblem,
    weights: ScoringConfig,
}

impl<'a> PlanScorer<'a> {
    pub fn new(problem: &'a SeatingProblem, weights: ScoringConfig) -> Self {
        Self { problem, weights }
    }

    pub fn score(&self, tables: &[TableSeating]) -> PlanScore {
        let constraints = &self.problem.constraints;
        let adjacency = &self.problem.adjacency;
        let mut total: i64 = 0;

        for seating in tables {
            total += i64::from(seating.occupancy()) * self.weights.seat_reward;

            let guests = seating.guest_ids();
            for (i, a) in guests.iter().enumerate() {
                for b in &guests[i + 1..] {
                    if constraints.is_must(a, b) {
                        total += self.weights.must_pair_reward;
                    }
                    if constraints.is_cannot(a, b) {
                        total -= self.weights.cannot_pair_penalty;
                    }
                }
                let satisfied = adjacency
                    .neighbors(a)
                    .iter()
                    .filter(|n| guests.contains(n))
                    .count();
                total += satisfied as i64 * self.weights.adjacency_reward;
            }
        }

        PlanScore::of(total)
    }
}
