//! Greedy single-plan placement.
//!
//! Groups are placed in the order a strategy produced, each on the first
//! table with room and no `cannot` partner already seated. There is no
//! backtracking: if any group finds no table, the attempt yields nothing.
//! Partial plans are never returned.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use seatforge_config::RestrictionPolicy;
use seatforge_core::{GuestId, SeatedUnit, SeatingProblem, TableId, TableSeating};

use crate::group::AtomicGroup;
use crate::priority::PriorityPolicy;

/// Per-table accumulator for one attempt.
#[derive(Debug, Clone)]
struct TableSlot {
    occupancy: u64,
    capacity: u64,
    guests: Vec<usize>,
}

/// Tables to try for one group.
#[derive(Debug)]
struct Candidates {
    preferred: Vec<usize>,
    fallback: bool,
}

/// Why a group can never be seated, whatever the placement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stranding {
    /// The group needs more seats than the largest table has.
    TooLarge { occupancy: u64, max_capacity: u64 },
    /// Some table is large enough, but none the group's restrictions allow.
    NoAllowedTable { occupancy: u64 },
}

/// Places ordered atomic groups onto tables.
///
/// Holds only shared references, so one placer serves every attempt of a
/// run, including attempts on worker threads.
#[derive(Debug)]
pub struct PlanPlacer<'a> {
    problem: &'a SeatingProblem,
    groups: &'a [AtomicGroup],
    priority: &'a PriorityPolicy,
    policy: RestrictionPolicy,
    table_index: HashMap<&'a TableId, usize>,
    guest_index: HashMap<&'a GuestId, usize>,
}

impl<'a> PlanPlacer<'a> {
    pub fn new(
        problem: &'a SeatingProblem,
        groups: &'a [AtomicGroup],
        priority: &'a PriorityPolicy,
        policy: RestrictionPolicy,
    ) -> Self {
        let table_index = problem
            .tables
            .iter()
            .enumerate()
            .map(|(i, t)| (&t.id, i))
            .collect();
        let guest_index = problem
            .guests
            .iter()
            .enumerate()
            .map(|(i, g)| (&g.id, i))
            .collect();
        Self {
            problem,
            groups,
            priority,
            policy,
            table_index,
            guest_index,
        }
    }

    /// Places every group in `order` (indices into the group list) and
    /// orders each table's seats. Returns `None` when some group fits
    /// nowhere.
    pub fn place<R: Rng + ?Sized>(&self, order: &[usize], rng: &mut R) -> Option<Vec<TableSeating>> {
        let mut slots: Vec<TableSlot> = self
            .problem
            .tables
            .iter()
            .map(|t| TableSlot {
                occupancy: 0,
                capacity: u64::from(t.capacity),
                guests: Vec::new(),
            })
            .collect();

        for &g in order {
            let group = &self.groups[g];
            let candidates = self.candidates(group);

            let mut chosen = candidates
                .preferred
                .iter()
                .copied()
                .find(|&t| self.fits(&slots[t], group));

            if chosen.is_none() && candidates.fallback {
                let mut remaining: Vec<usize> = (0..slots.len())
                    .filter(|t| !candidates.preferred.contains(t))
                    .collect();
                remaining.shuffle(rng);
                chosen = remaining.into_iter().find(|&t| self.fits(&slots[t], group));
            }

            let table = chosen?;
            let slot = &mut slots[table];
            slot.occupancy += group.occupancy;
            slot.guests.extend(group.members.iter().copied());
        }

        Some(
            self.problem
                .tables
                .iter()
                .zip(slots)
                .map(|(table, slot)| {
                    let mut seating = TableSeating::new(table.id.clone(), table.capacity);
                    for guest_idx in self.seat_order(&slot.guests) {
                        let guest = &self.problem.guests[guest_idx];
                        seating.seats.extend((0..guest.count).map(|sub_index| SeatedUnit {
                            guest_id: guest.id.clone(),
                            guest_name: guest.name.clone(),
                            sub_index,
                        }));
                    }
                    seating
                })
                .collect(),
        )
    }

    /// Whether some table could ever take `group` on its own, given its
    /// restrictions and table capacities.
    pub fn has_feasible_table(&self, group: &AtomicGroup) -> bool {
        self.check_feasible(group).is_ok()
    }

    /// Like [`has_feasible_table`](Self::has_feasible_table), naming the
    /// cause when there is none.
    pub fn check_feasible(&self, group: &AtomicGroup) -> Result<(), Stranding> {
        let max_capacity = self.problem.max_capacity();
        if group.occupancy > max_capacity {
            return Err(Stranding::TooLarge {
                occupancy: group.occupancy,
                max_capacity,
            });
        }

        let candidates = self.candidates(group);
        let fits = |t: usize| u64::from(self.problem.tables[t].capacity) >= group.occupancy;
        if candidates.preferred.iter().any(|&t| fits(t))
            || (candidates.fallback && (0..self.problem.tables.len()).any(fits))
        {
            Ok(())
        } else {
            Err(Stranding::NoAllowedTable {
                occupancy: group.occupancy,
            })
        }
    }

    fn candidates(&self, group: &AtomicGroup) -> Candidates {
        let restrictions = &self.problem.restrictions;
        let restricted: Vec<&[TableId]> = group
            .members
            .iter()
            .filter_map(|&m| restrictions.allowed(&self.problem.guests[m].id))
            .collect();

        let Some((first, rest)) = restricted.split_first() else {
            return Candidates {
                preferred: Vec::new(),
                fallback: true,
            };
        };

        match self.policy {
            RestrictionPolicy::Intersection => Candidates {
                preferred: first
                    .iter()
                    .filter(|t| rest.iter().all(|allowed| allowed.contains(t)))
                    .filter_map(|t| self.table_index.get(t).copied())
                    .collect(),
                fallback: false,
            },
            RestrictionPolicy::Union => {
                let mut preferred: Vec<usize> = Vec::new();
                for t in restricted.iter().flat_map(|allowed| allowed.iter()) {
                    if let Some(&idx) = self.table_index.get(t) {
                        if !preferred.contains(&idx) {
                            preferred.push(idx);
                        }
                    }
                }
                Candidates {
                    preferred,
                    fallback: true,
                }
            }
        }
    }

    fn fits(&self, slot: &TableSlot, group: &AtomicGroup) -> bool {
        if slot.occupancy + group.occupancy > slot.capacity {
            return false;
        }
        let guests = &self.problem.guests;
        let constraints = &self.problem.constraints;
        !group.members.iter().any(|&m| {
            slot.guests
                .iter()
                .any(|&s| constraints.is_cannot(&guests[m].id, &guests[s].id))
        })
    }

    /// Walks adjacency chains through the table's occupants.
    ///
    /// Starts from the highest-weight prioritized occupant, else the first
    /// occupant, then repeatedly follows the current guest's first unseated
    /// adjacency partner at this table, falling back to the next remaining
    /// occupant in placement order.
    fn seat_order(&self, occupants: &[usize]) -> Vec<usize> {
        if occupants.len() <= 1 {
            return occupants.to_vec();
        }
        let guests = &self.problem.guests;

        let mut start = 0;
        let mut best_weight = PriorityPolicy::BASELINE;
        for (pos, &g) in occupants.iter().enumerate() {
            let weight = self.priority.weight(&guests[g]);
            if weight > best_weight {
                best_weight = weight;
                start = pos;
            }
        }

        let mut remaining: Vec<usize> = occupants.to_vec();
        let mut current = remaining.remove(start);
        let mut ordered = Vec::with_capacity(occupants.len());
        ordered.push(current);

        while !remaining.is_empty() {
            let next = self
                .problem
                .adjacency
                .neighbors(&guests[current].id)
                .iter()
                .find_map(|n| {
                    let idx = self.guest_index.get(n)?;
                    remaining.iter().position(|r| r == idx)
                })
                .unwrap_or(0);
            current = remaining.remove(next);
            ordered.push(current);
        }
        ordered
    }
}

#[cfg(test)]
mod tests;
