//! Atomic groups: guests that must be placed at one table as a unit.

use std::collections::HashMap;

use seatforge_core::{ConstraintKind, GuestId, SeatingProblem};
use smallvec::SmallVec;

use crate::grouping::UnionFind;
use crate::priority::PriorityPolicy;

/// Guests joined by `must` constraints and adjacency preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicGroup {
    /// Indices into `SeatingProblem::guests`, ascending.
    pub members: SmallVec<[usize; 4]>,
    /// Seats the whole group needs.
    pub occupancy: u64,
    /// Highest member weight under the priority policy.
    pub priority: u32,
    /// Number of `must`/`cannot` pairs touching any member.
    pub constraint_density: usize,
}

impl AtomicGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Builds atomic groups once per generation run.
///
/// Adjacency implies co-location: two guests can only sit next to each other
/// at a shared table, so adjacency edges are unioned alongside `must` edges.
///
/// The default order is priority descending, then occupancy descending;
/// ties keep the guest-list order of each group's first member.
#[derive(Debug)]
pub struct GroupBuilder<'a> {
    priority: &'a PriorityPolicy,
}

impl<'a> GroupBuilder<'a> {
    pub fn new(priority: &'a PriorityPolicy) -> Self {
        Self { priority }
    }

    pub fn build(&self, problem: &SeatingProblem) -> Vec<AtomicGroup> {
        let guests = &problem.guests;
        let index: HashMap<&GuestId, usize> = guests
            .iter()
            .enumerate()
            .map(|(i, g)| (&g.id, i))
            .collect();
        let lookup = |a: &GuestId, b: &GuestId| Some((*index.get(a)?, *index.get(b)?));

        let mut uf: UnionFind<usize> = UnionFind::with_capacity(guests.len());
        for i in 0..guests.len() {
            uf.insert(&i);
        }
        for (from, to, kind) in problem.constraints.iter() {
            if kind != ConstraintKind::Must {
                continue;
            }
            if let Some((a, b)) = lookup(from, to) {
                uf.union(&a, &b);
            }
        }
        for (guest, neighbors) in problem.adjacency.iter() {
            for neighbor in neighbors {
                if let Some((a, b)) = lookup(guest, neighbor) {
                    uf.union(&a, &b);
                }
            }
        }

        let member_lists = uf.groups();
        let mut group_of = vec![0usize; guests.len()];
        for (group, members) in member_lists.iter().enumerate() {
            for &member in members {
                group_of[member] = group;
            }
        }

        let mut density = vec![0usize; member_lists.len()];
        for (a, b) in problem.constraints.unordered_pairs() {
            let Some((a, b)) = lookup(a, b) else {
                continue;
            };
            let (ga, gb) = (group_of[a], group_of[b]);
            density[ga] += 1;
            if gb != ga {
                density[gb] += 1;
            }
        }

        let mut groups: Vec<AtomicGroup> = member_lists
            .into_iter()
            .zip(density)
            .map(|(members, constraint_density)| AtomicGroup {
                occupancy: members.iter().map(|&m| u64::from(guests[m].count)).sum(),
                priority: members
                    .iter()
                    .map(|&m| self.priority.weight(&guests[m]))
                    .max()
                    .unwrap_or(PriorityPolicy::BASELINE),
                members: members.into_iter().collect(),
                constraint_density,
            })
            .collect();

        groups.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.occupancy.cmp(&a.occupancy))
        });
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatforge_core::Guest;
    use seatforge_test::ProblemBuilder;

    fn member_ids<'p>(problem: &'p SeatingProblem, group: &AtomicGroup) -> Vec<&'p str> {
        group
            .members
            .iter()
            .map(|&m| problem.guests[m].id.as_str())
            .collect()
    }

    #[test]
    fn test_must_and_adjacency_are_unioned() {
        let problem = ProblemBuilder::new()
            .guests(&["a", "b", "c", "d", "e"])
            .table("t1", 8)
            .must("a", "b")
            .adjacent("b", "c")
            .cannot("d", "e")
            .build();

        let groups = GroupBuilder::new(&PriorityPolicy::new()).build(&problem);
        assert_eq!(groups.len(), 3);
        assert_eq!(member_ids(&problem, &groups[0]), vec!["a", "b", "c"]);
        assert_eq!(groups[0].occupancy, 3);
        assert_eq!(member_ids(&problem, &groups[1]), vec!["d"]);
        assert_eq!(member_ids(&problem, &groups[2]), vec!["e"]);
    }

    #[test]
    fn test_occupancy_of_huge_parties_is_exact() {
        let problem = ProblemBuilder::new()
            .guest("a", u32::MAX)
            .guest("b", u32::MAX)
            .table("t1", 8)
            .must("a", "b")
            .build();

        let groups = GroupBuilder::new(&PriorityPolicy::new()).build(&problem);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].occupancy, 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_default_order_is_priority_then_occupancy() {
        let problem = ProblemBuilder::new()
            .guest("small", 1)
            .guest("big", 4)
            .guest("honoree", 1)
            .guest("mid", 2)
            .table("t1", 8)
            .build();
        let policy = PriorityPolicy::new().with_predicate(|g: &Guest| g.id.as_str() == "honoree");

        let groups = GroupBuilder::new(&policy).build(&problem);
        let order: Vec<_> = groups
            .iter()
            .map(|g| member_ids(&problem, g)[0])
            .collect();
        assert_eq!(order, vec!["honoree", "big", "mid", "small"]);
        assert_eq!(groups[0].priority, PriorityPolicy::ELEVATED);
        assert_eq!(groups[1].priority, PriorityPolicy::BASELINE);
    }

    #[test]
    fn test_constraint_density_counts_touching_pairs() {
        let problem = ProblemBuilder::new()
            .guests(&["a", "b", "c", "d"])
            .table("t1", 8)
            .must("a", "b")
            .cannot("a", "c")
            .cannot("b", "d")
            .build();

        let groups = GroupBuilder::new(&PriorityPolicy::new()).build(&problem);
        let ab = groups.iter().find(|g| g.len() == 2).unwrap();
        assert_eq!(ab.constraint_density, 3);
        for single in groups.iter().filter(|g| g.len() == 1) {
            assert_eq!(single.constraint_density, 1);
        }
    }

    #[test]
    fn test_unknown_guests_are_ignored() {
        let problem = ProblemBuilder::new()
            .guests(&["a"])
            .table("t1", 2)
            .must("a", "ghost")
            .adjacent("a", "phantom")
            .build();

        let groups = GroupBuilder::new(&PriorityPolicy::new()).build(&problem);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].occupancy, 1);
        assert_eq!(groups[0].constraint_density, 0);
    }
}
