//! Invariant checks for generated plans.
//!
//! Each function panics with a descriptive message on violation, so they
//! read naturally inside tests.

use std::collections::HashMap;

use seatforge_core::{GuestId, SeatingPlan, SeatingProblem};

/// Every table holds at most its capacity.
pub fn assert_capacity_respected(problem: &SeatingProblem, plan: &SeatingPlan) {
    for seating in &plan.tables {
        let table = problem
            .table(&seating.table_id)
            .unwrap_or_else(|| panic!("plan uses unknown table {}", seating.table_id));
        assert!(
            seating.occupancy() <= table.capacity,
            "table {} seats {} but has capacity {}",
            table.id,
            seating.occupancy(),
            table.capacity
        );
    }
}

/// Every guest is seated at exactly one table with all party members.
pub fn assert_every_guest_seated(problem: &SeatingProblem, plan: &SeatingPlan) {
    let mut seats: HashMap<&GuestId, (u32, usize)> = HashMap::new();
    for (table_idx, seating) in plan.tables.iter().enumerate() {
        for seat in &seating.seats {
            let entry = seats.entry(&seat.guest_id).or_insert((0, table_idx));
            assert_eq!(
                entry.1, table_idx,
                "guest {} is split across tables",
                seat.guest_id
            );
            entry.0 += 1;
        }
    }
    for guest in &problem.guests {
        let (count, _) = seats
            .get(&guest.id)
            .copied()
            .unwrap_or_else(|| panic!("guest {} is not seated", guest.id));
        assert_eq!(count, guest.count, "guest {} has wrong seat count", guest.id);
    }
}

/// No table seats a `cannot` pair.
pub fn assert_no_cannot_pairs(problem: &SeatingProblem, plan: &SeatingPlan) {
    for seating in &plan.tables {
        let ids = seating.guest_ids();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert!(
                    !problem.constraints.is_cannot(a, b),
                    "{a} and {b} cannot sit together but share table {}",
                    seating.table_id
                );
            }
        }
    }
}

/// Every `must` pair and adjacency pair shares a table.
pub fn assert_linked_guests_together(problem: &SeatingProblem, plan: &SeatingPlan) {
    let guests = problem.guest_index();
    for (a, b, _) in problem
        .constraints
        .iter()
        .filter(|(a, b, _)| problem.constraints.is_must(a, b))
    {
        if guests.contains_key(a) && guests.contains_key(b) {
            assert_eq!(
                plan.table_of(a),
                plan.table_of(b),
                "{a} and {b} must sit together"
            );
        }
    }
    for (a, neighbors) in problem.adjacency.iter() {
        for b in neighbors {
            if guests.contains_key(a) && guests.contains_key(b) {
                assert_eq!(
                    plan.table_of(a),
                    plan.table_of(b),
                    "{a} and {b} must sit at one table to be adjacent"
                );
            }
        }
    }
}

/// Every guest sits at a table their restriction allows.
pub fn assert_restrictions_respected(problem: &SeatingProblem, plan: &SeatingPlan) {
    for (guest, allowed) in problem.restrictions.iter() {
        if let Some(table) = plan.table_of(guest) {
            assert!(
                allowed.contains(table),
                "{guest} sits at {table} outside their allowed tables"
            );
        }
    }
}

/// All hard invariants except restrictions (which depend on the policy).
pub fn assert_plan_valid(problem: &SeatingProblem, plan: &SeatingPlan) {
    assert_capacity_respected(problem, plan);
    assert_every_guest_seated(problem, plan);
    assert_no_cannot_pairs(problem, plan);
    assert_linked_guests_together(problem, plan);
}
