//! Structural conflict detection.
//!
//! Inspects the raw constraint and adjacency graphs together with table
//! capacities, independent of any placement attempt:
//!
//! - **circular**: cycles in the `must` relation (high)
//! - **impossible**: a pair holding `must` one way and `cannot` the other (critical)
//! - **capacity_violation**: a `must` group larger than every table (critical)
//! - **adjacency_violation**: a guest plus their adjacency partners larger
//!   than every table (high, only when requested)

use std::collections::{HashMap, HashSet};

use seatforge_core::{
    ConflictKind, ConstraintConflict, ConstraintKind, Guest, GuestId, IdGenerator, Resolution,
    SeatingProblem, Severity,
};
use tracing::debug;

use crate::grouping::UnionFind;

/// Finds structural conflicts in a seating problem.
///
/// Detection is read-only and deterministic: running it twice on the same
/// problem yields the same conflicts apart from their identifiers.
///
/// # Example
///
/// ```
/// use seatforge_core::{ConflictKind, ConstraintKind, ConstraintMap, Guest, SeatingProblem,
///     SequentialIdGenerator, Table};
/// use seatforge_solver::ConflictDetector;
///
/// let mut constraints = ConstraintMap::new();
/// constraints.set("a", "b", ConstraintKind::Must);
/// constraints.set("b", "a", ConstraintKind::Cannot);
///
/// let problem = SeatingProblem::new(
///     vec![Guest::single("a", "Ann"), Guest::single("b", "Bob")],
///     vec![Table::new("t1", 4)],
/// )
/// .with_constraints(constraints);
///
/// let ids = SequentialIdGenerator::new();
/// let conflicts = ConflictDetector::new(&ids).detect(&problem);
/// assert_eq!(conflicts.len(), 1);
/// assert_eq!(conflicts[0].kind, ConflictKind::Impossible);
/// ```
#[derive(Debug)]
pub struct ConflictDetector<'a> {
    ids: &'a dyn IdGenerator,
    include_adjacency: bool,
}

impl<'a> ConflictDetector<'a> {
    pub fn new(ids: &'a dyn IdGenerator) -> Self {
        Self {
            ids,
            include_adjacency: false,
        }
    }

    /// Enables adjacency capacity checks.
    pub fn with_adjacency_checks(mut self, include: bool) -> Self {
        self.include_adjacency = include;
        self
    }

    /// Runs every enabled check, in the order circular, impossible,
    /// capacity, adjacency.
    pub fn detect(&self, problem: &SeatingProblem) -> Vec<ConstraintConflict> {
        let guests = problem.guest_index();
        let max_capacity = problem.max_capacity();

        let mut conflicts = Vec::new();
        self.detect_cycles(problem, &guests, &mut conflicts);
        self.detect_contradictions(problem, &guests, &mut conflicts);
        self.detect_capacity_violations(problem, &guests, max_capacity, &mut conflicts);
        if self.include_adjacency {
            self.detect_adjacency_violations(problem, &guests, max_capacity, &mut conflicts);
        }

        debug!(
            event = "conflicts_detected",
            count = conflicts.len(),
            critical = conflicts.iter().filter(|c| c.is_critical()).count(),
        );
        conflicts
    }

    /// Depth-first walk of the `must` graph with an explicit stack.
    ///
    /// Reaching a node that is still in progress closes a cycle; the path
    /// slice from that node to the current one is reported. Stepping straight
    /// back to the node we came from is a mutual pair, not a cycle.
    fn detect_cycles(
        &self,
        problem: &SeatingProblem,
        guests: &HashMap<&GuestId, &Guest>,
        out: &mut Vec<ConstraintConflict>,
    ) {
        struct Frame<'g> {
            node: &'g GuestId,
            parent: Option<&'g GuestId>,
            targets: Vec<&'g GuestId>,
            next: usize,
        }

        let constraints = &problem.constraints;
        let mut roots: Vec<&GuestId> = problem.guests.iter().map(|g| &g.id).collect();
        roots.extend(constraints.iter().map(|(from, _, _)| from));

        let mut visited: HashSet<&GuestId> = HashSet::new();
        let mut in_progress: HashSet<&GuestId> = HashSet::new();
        let mut reported: HashSet<Vec<&GuestId>> = HashSet::new();

        for root in roots {
            if visited.contains(root) {
                continue;
            }
            let mut path: Vec<&GuestId> = vec![root];
            let mut stack = vec![Frame {
                node: root,
                parent: None,
                targets: constraints.must_targets(root).collect(),
                next: 0,
            }];
            in_progress.insert(root);

            while let Some(frame) = stack.last_mut() {
                if frame.next >= frame.targets.len() {
                    in_progress.remove(frame.node);
                    visited.insert(frame.node);
                    path.pop();
                    stack.pop();
                    continue;
                }
                let current = frame.node;
                let parent = frame.parent;
                let target = frame.targets[frame.next];
                frame.next += 1;

                if Some(target) == parent || target == current {
                    continue;
                }
                if in_progress.contains(target) {
                    if let Some(start) = path.iter().position(|n| *n == target) {
                        let cycle: Vec<&GuestId> = path[start..].to_vec();
                        let mut key = cycle.clone();
                        key.sort();
                        if reported.insert(key) {
                            out.push(self.cycle_conflict(&cycle, guests));
                        }
                    }
                    continue;
                }
                if visited.contains(target) {
                    continue;
                }
                in_progress.insert(target);
                path.push(target);
                stack.push(Frame {
                    node: target,
                    parent: Some(current),
                    targets: constraints.must_targets(target).collect(),
                    next: 0,
                });
            }
        }
    }

    fn cycle_conflict(
        &self,
        cycle: &[&GuestId],
        guests: &HashMap<&GuestId, &Guest>,
    ) -> ConstraintConflict {
        let names: Vec<&str> = cycle.iter().map(|id| display_name(id, guests)).collect();
        let resolutions = (0..cycle.len())
            .map(|i| Resolution::ClearConstraint {
                a: cycle[i].clone(),
                b: cycle[(i + 1) % cycle.len()].clone(),
            })
            .collect();
        ConstraintConflict {
            id: self.ids.next_id("conflict"),
            kind: ConflictKind::Circular,
            severity: Severity::High,
            description: format!("Circular must-sit-together chain: {}", names.join(" → ")),
            affected_guests: cycle.iter().map(|id| (*id).clone()).collect(),
            resolutions,
        }
    }

    fn detect_contradictions(
        &self,
        problem: &SeatingProblem,
        guests: &HashMap<&GuestId, &Guest>,
        out: &mut Vec<ConstraintConflict>,
    ) {
        let constraints = &problem.constraints;
        for (a, b) in constraints.unordered_pairs() {
            let forward = constraints.get(a, b);
            let backward = constraints.get(b, a);
            let contradictory = matches!(
                (forward, backward),
                (ConstraintKind::Must, ConstraintKind::Cannot)
                    | (ConstraintKind::Cannot, ConstraintKind::Must)
            );
            if !contradictory {
                continue;
            }
            out.push(ConstraintConflict {
                id: self.ids.next_id("conflict"),
                kind: ConflictKind::Impossible,
                severity: Severity::Critical,
                description: format!(
                    "{} and {} are required both to sit together and apart",
                    display_name(a, guests),
                    display_name(b, guests)
                ),
                affected_guests: vec![a.clone(), b.clone()],
                resolutions: vec![Resolution::ClearConstraint {
                    a: a.clone(),
                    b: b.clone(),
                }],
            });
        }
    }

    /// Unions `must` edges only; every guest starts as a singleton so an
    /// oversized party on its own is reported too.
    fn detect_capacity_violations(
        &self,
        problem: &SeatingProblem,
        guests: &HashMap<&GuestId, &Guest>,
        max_capacity: u64,
        out: &mut Vec<ConstraintConflict>,
    ) {
        let mut uf: UnionFind<&GuestId> = UnionFind::with_capacity(problem.guests.len());
        for guest in &problem.guests {
            uf.insert(&&guest.id);
        }
        let mut must_edges: Vec<(&GuestId, &GuestId)> = Vec::new();
        for (from, to, kind) in problem.constraints.iter() {
            if kind != ConstraintKind::Must
                || !guests.contains_key(from)
                || !guests.contains_key(to)
            {
                continue;
            }
            uf.union(&from, &to);
            must_edges.push((from, to));
        }

        for group in uf.groups() {
            let occupancy: u64 = group
                .iter()
                .filter_map(|id| guests.get(id))
                .map(|g| u64::from(g.count))
                .sum();
            if occupancy <= max_capacity {
                continue;
            }
            let members: HashSet<&GuestId> = group.iter().copied().collect();
            let mut resolutions: Vec<Resolution> = Vec::new();
            for (from, to) in &must_edges {
                if !members.contains(from) {
                    continue;
                }
                let resolution = Resolution::ClearConstraint {
                    a: (*from).min(*to).clone(),
                    b: (*from).max(*to).clone(),
                };
                if !resolutions.contains(&resolution) {
                    resolutions.push(resolution);
                }
            }
            let names: Vec<&str> = group.iter().map(|id| display_name(id, guests)).collect();
            out.push(ConstraintConflict {
                id: self.ids.next_id("conflict"),
                kind: ConflictKind::CapacityViolation,
                severity: Severity::Critical,
                description: format!(
                    "{} need {} seats together but the largest table has {}",
                    names.join(", "),
                    occupancy,
                    max_capacity
                ),
                affected_guests: group.into_iter().cloned().collect(),
                resolutions,
            });
        }
    }

    fn detect_adjacency_violations(
        &self,
        problem: &SeatingProblem,
        guests: &HashMap<&GuestId, &Guest>,
        max_capacity: u64,
        out: &mut Vec<ConstraintConflict>,
    ) {
        let mut reported: HashSet<Vec<GuestId>> = HashSet::new();
        for (guest_id, neighbors) in problem.adjacency.iter() {
            let Some(guest) = guests.get(guest_id) else {
                continue;
            };
            let occupancy: u64 = u64::from(guest.count)
                + neighbors
                    .iter()
                    .filter_map(|n| guests.get(n))
                    .map(|g| u64::from(g.count))
                    .sum::<u64>();
            if occupancy <= max_capacity {
                continue;
            }

            let mut affected: Vec<GuestId> = vec![guest_id.clone()];
            affected.extend(neighbors.iter().cloned());
            let mut key = affected.clone();
            key.sort();
            key.dedup();
            if !reported.insert(key) {
                continue;
            }

            let names: Vec<&str> = affected.iter().map(|id| display_name(id, guests)).collect();
            out.push(ConstraintConflict {
                id: self.ids.next_id("conflict"),
                kind: ConflictKind::AdjacencyViolation,
                severity: Severity::High,
                description: format!(
                    "{} want to sit next to each other but need {} seats; the largest table has {}",
                    names.join(", "),
                    occupancy,
                    max_capacity
                ),
                affected_guests: affected,
                resolutions: neighbors
                    .iter()
                    .map(|n| Resolution::ClearAdjacency {
                        a: guest_id.clone(),
                        b: n.clone(),
                    })
                    .collect(),
            });
        }
    }
}

fn display_name<'g>(id: &'g GuestId, guests: &HashMap<&GuestId, &'g Guest>) -> &'g str {
    guests
        .get(id)
        .map(|g| g.name.as_str())
        .unwrap_or_else(|| id.as_str())
}
