//! Group ordering strategies that diversify placement attempts.
//!
//! Each attempt picks the next strategy round-robin, so different groups get
//! first pick of tables and structurally different plans emerge.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::group::AtomicGroup;

/// A named ordering heuristic over atomic groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    /// Uniform random permutation.
    Shuffle,
    /// Builder order, reversed.
    Reverse,
    /// Largest occupancy first.
    SizeFirst,
    /// Smallest occupancy first.
    SizeLast,
    /// Shuffle, then order each adjacent pair larger-first.
    RandomPairs,
    /// Highest priority first, larger occupancy breaking ties.
    PriorityFirst,
    /// Most constrained first.
    ConstraintHeavyFirst,
}

impl Strategy {
    pub const ALL: [Strategy; 7] = [
        Strategy::Shuffle,
        Strategy::Reverse,
        Strategy::SizeFirst,
        Strategy::SizeLast,
        Strategy::RandomPairs,
        Strategy::PriorityFirst,
        Strategy::ConstraintHeavyFirst,
    ];

    /// Round-robin selection by attempt index.
    ///
    /// ```
    /// use seatforge_solver::Strategy;
    ///
    /// assert_eq!(Strategy::for_attempt(0), Strategy::Shuffle);
    /// assert_eq!(Strategy::for_attempt(8), Strategy::Reverse);
    /// ```
    pub fn for_attempt(attempt: u64) -> Strategy {
        Self::ALL[(attempt % Self::ALL.len() as u64) as usize]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Shuffle => "shuffle",
            Strategy::Reverse => "reverse",
            Strategy::SizeFirst => "size-first",
            Strategy::SizeLast => "size-last",
            Strategy::RandomPairs => "random-pairs",
            Strategy::PriorityFirst => "priority-first",
            Strategy::ConstraintHeavyFirst => "constraint-heavy-first",
        }
    }

    /// Returns group indices in this strategy's order. Sorts are stable, so
    /// ties keep builder order.
    pub fn order<R: Rng + ?Sized>(&self, groups: &[AtomicGroup], rng: &mut R) -> Vec<usize> {
        let mut order: Vec<usize> = (0..groups.len()).collect();
        match self {
            Strategy::Shuffle => order.shuffle(rng),
            Strategy::Reverse => order.reverse(),
            Strategy::SizeFirst => {
                order.sort_by(|&a, &b| groups[b].occupancy.cmp(&groups[a].occupancy))
            }
            Strategy::SizeLast => {
                order.sort_by(|&a, &b| groups[a].occupancy.cmp(&groups[b].occupancy))
            }
            Strategy::RandomPairs => {
                order.shuffle(rng);
                for pair in order.chunks_mut(2) {
                    if let [a, b] = pair {
                        if groups[*b].occupancy > groups[*a].occupancy {
                            std::mem::swap(a, b);
                        }
                    }
                }
            }
            Strategy::PriorityFirst => order.sort_by(|&a, &b| {
                groups[b]
                    .priority
                    .cmp(&groups[a].priority)
                    .then_with(|| groups[b].occupancy.cmp(&groups[a].occupancy))
            }),
            Strategy::ConstraintHeavyFirst => order.sort_by(|&a, &b| {
                groups[b]
                    .constraint_density
                    .cmp(&groups[a].constraint_density)
            }),
        }
        order
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use smallvec::smallvec;

    fn group(occupancy: u64, priority: u32, constraint_density: usize) -> AtomicGroup {
        AtomicGroup {
            members: smallvec![0],
            occupancy,
            priority,
            constraint_density,
        }
    }

    fn sample() -> Vec<AtomicGroup> {
        vec![
            group(2, 10, 0),
            group(4, 1, 1),
            group(1, 1, 3),
            group(3, 1, 2),
        ]
    }

    #[test]
    fn test_round_robin_cycles_all_strategies() {
        let picked: Vec<_> = (0..7).map(Strategy::for_attempt).collect();
        assert_eq!(picked, Strategy::ALL.to_vec());
        assert_eq!(Strategy::for_attempt(13), Strategy::ConstraintHeavyFirst);
    }

    #[test]
    fn test_deterministic_orders() {
        let groups = sample();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(Strategy::Reverse.order(&groups, &mut rng), vec![3, 2, 1, 0]);
        assert_eq!(Strategy::SizeFirst.order(&groups, &mut rng), vec![1, 3, 0, 2]);
        assert_eq!(Strategy::SizeLast.order(&groups, &mut rng), vec![2, 0, 3, 1]);
        assert_eq!(
            Strategy::PriorityFirst.order(&groups, &mut rng),
            vec![0, 1, 3, 2]
        );
        assert_eq!(
            Strategy::ConstraintHeavyFirst.order(&groups, &mut rng),
            vec![2, 3, 1, 0]
        );
    }

    #[test]
    fn test_random_orders_are_permutations() {
        let groups = sample();
        let mut rng = StdRng::seed_from_u64(42);
        for strategy in [Strategy::Shuffle, Strategy::RandomPairs] {
            let mut order = strategy.order(&groups, &mut rng);
            order.sort_unstable();
            assert_eq!(order, vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn test_random_pairs_put_larger_group_first() {
        let groups = sample();
        let mut rng = StdRng::seed_from_u64(7);
        let order = Strategy::RandomPairs.order(&groups, &mut rng);
        for pair in order.chunks(2) {
            assert!(groups[pair[0]].occupancy >= groups[pair[1]].occupancy);
        }
    }

    #[test]
    fn test_empty_group_list() {
        let mut rng = StdRng::seed_from_u64(1);
        for strategy in Strategy::ALL {
            assert!(strategy.order(&[], &mut rng).is_empty());
        }
    }
}
