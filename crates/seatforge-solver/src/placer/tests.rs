//! Tests for greedy placement and seat ordering.

use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use seatforge_core::{Guest, SeatingPlan};
use seatforge_test::invariants::{assert_plan_valid, assert_restrictions_respected};
use seatforge_test::{scenarios, ProblemBuilder};

use crate::group::GroupBuilder;

fn place_with(
    problem: &SeatingProblem,
    priority: &PriorityPolicy,
    policy: RestrictionPolicy,
    seed: u64,
) -> Option<SeatingPlan> {
    let groups = GroupBuilder::new(priority).build(problem);
    let placer = PlanPlacer::new(problem, &groups, priority, policy);
    let order: Vec<usize> = (0..groups.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    placer
        .place(&order, &mut rng)
        .map(|tables| SeatingPlan::new("plan", tables))
}

fn place(problem: &SeatingProblem, seed: u64) -> Option<SeatingPlan> {
    place_with(
        problem,
        &PriorityPolicy::new(),
        RestrictionPolicy::Intersection,
        seed,
    )
}

fn seat_ids(plan: &SeatingPlan, table: &str) -> Vec<String> {
    plan.table(&TableId::new(table))
        .unwrap()
        .seats
        .iter()
        .map(|s| s.guest_id.to_string())
        .collect()
}

#[test]
fn test_trio_fills_single_table() {
    let problem = scenarios::single_table_trio();
    let plan = place(&problem, 1).unwrap();

    assert_plan_valid(&problem, &plan);
    assert_eq!(plan.tables.len(), 1);
    assert_eq!(plan.total_seated(), 3);
}

#[test]
fn test_cannot_pair_split_across_tables() {
    let problem = scenarios::feuding_pair();
    for seed in 0..20 {
        let plan = place(&problem, seed).unwrap();
        assert_plan_valid(&problem, &plan);
        assert_ne!(
            plan.table_of(&GuestId::new("a")),
            plan.table_of(&GuestId::new("b"))
        );
    }
}

#[test]
fn test_group_too_large_fails_attempt() {
    let problem = ProblemBuilder::new()
        .guests(&["a", "b", "c"])
        .tables(2, 2)
        .must("a", "b")
        .must("b", "c")
        .build();

    assert!(place(&problem, 3).is_none());
}

#[test]
fn test_cannot_blocks_only_table_fails_attempt() {
    let problem = ProblemBuilder::new()
        .guests(&["a", "b"])
        .table("t1", 2)
        .cannot("a", "b")
        .build();

    assert!(place(&problem, 0).is_none());
}

#[test]
fn test_party_expands_into_sub_indexed_seats() {
    let problem = ProblemBuilder::new()
        .guest("fam", 3)
        .table("t1", 4)
        .build();

    let plan = place(&problem, 0).unwrap();
    let seats = &plan.tables[0].seats;
    assert_eq!(seats.len(), 3);
    let subs: Vec<u32> = seats.iter().map(|s| s.sub_index).collect();
    assert_eq!(subs, vec![0, 1, 2]);
    assert!(seats.iter().all(|s| s.guest_name == "FAM"));
}

#[test]
fn test_intersection_restricts_group_to_common_tables() {
    let problem = ProblemBuilder::new()
        .guests(&["a", "b", "c"])
        .tables(3, 4)
        .must("a", "b")
        .restrict("a", &["t1", "t2"])
        .restrict("b", &["t2", "t3"])
        .build();

    for seed in 0..10 {
        let plan = place(&problem, seed).unwrap();
        assert_eq!(plan.table_of(&GuestId::new("a")), Some(&TableId::new("t2")));
        assert_eq!(plan.table_of(&GuestId::new("b")), Some(&TableId::new("t2")));
    }
}

#[test]
fn test_union_tries_any_members_tables_in_order_found() {
    // Adjacency-linked, so validation's must-pair check does not apply.
    let problem = ProblemBuilder::new()
        .guests(&["a", "b"])
        .tables(2, 4)
        .adjacent("a", "b")
        .restrict("a", &["t1"])
        .restrict("b", &["t2"])
        .build();

    let union = place_with(
        &problem,
        &PriorityPolicy::new(),
        RestrictionPolicy::Union,
        0,
    )
    .unwrap();
    assert_eq!(union.table_of(&GuestId::new("b")), Some(&TableId::new("t1")));

    let intersection = place(&problem, 0);
    assert!(intersection.is_none());
}

#[test]
fn test_union_falls_back_to_unrestricted_tables() {
    let problem = ProblemBuilder::new()
        .guests(&["x", "a"])
        .tables(2, 1)
        .restrict("x", &["t1"])
        .restrict("a", &["t1"])
        .build();

    let plan = place_with(
        &problem,
        &PriorityPolicy::new(),
        RestrictionPolicy::Union,
        0,
    )
    .unwrap();
    assert_eq!(plan.table_of(&GuestId::new("x")), Some(&TableId::new("t1")));
    assert_eq!(plan.table_of(&GuestId::new("a")), Some(&TableId::new("t2")));

    assert!(place(&problem, 0).is_none());
}

#[test]
fn test_seat_order_walks_adjacency_chain() {
    let problem = ProblemBuilder::new()
        .guests(&["a", "b", "c", "d"])
        .table("t1", 4)
        .adjacent("a", "b")
        .adjacent("b", "c")
        .adjacent("c", "d")
        .build();

    let plan = place(&problem, 0).unwrap();
    assert_eq!(seat_ids(&plan, "t1"), vec!["a", "b", "c", "d"]);
}

#[test]
fn test_seat_order_starts_at_priority_guest() {
    let problem = ProblemBuilder::new()
        .guests(&["a", "b", "c", "d"])
        .table("t1", 4)
        .adjacent("a", "b")
        .adjacent("b", "c")
        .adjacent("c", "d")
        .build();
    let priority = PriorityPolicy::new().with_predicate(|g: &Guest| g.id.as_str() == "c");

    let plan = place_with(&problem, &priority, RestrictionPolicy::Intersection, 0).unwrap();
    assert_eq!(seat_ids(&plan, "t1"), vec!["c", "b", "a", "d"]);
}

#[test]
fn test_wedding_places_validly() {
    let problem = scenarios::wedding();
    let mut placed = 0;
    for seed in 0..20 {
        if let Some(plan) = place(&problem, seed) {
            assert_plan_valid(&problem, &plan);
            assert_restrictions_respected(&problem, &plan);
            placed += 1;
        }
    }
    assert!(placed > 0);
}

#[test]
fn test_has_feasible_table() {
    let problem = ProblemBuilder::new()
        .guest("a", 3)
        .guest("b", 1)
        .table("t1", 2)
        .table("t2", 4)
        .restrict("a", &["t1"])
        .build();
    let priority = PriorityPolicy::new();
    let groups = GroupBuilder::new(&priority).build(&problem);

    let strict = PlanPlacer::new(&problem, &groups, &priority, RestrictionPolicy::Intersection);
    let loose = PlanPlacer::new(&problem, &groups, &priority, RestrictionPolicy::Union);
    let a = groups.iter().find(|g| g.occupancy == 3).unwrap();
    let b = groups.iter().find(|g| g.occupancy == 1).unwrap();

    assert!(!strict.has_feasible_table(a));
    assert!(loose.has_feasible_table(a));
    assert!(strict.has_feasible_table(b));
}

#[test]
fn test_check_feasible_names_the_reason() {
    let problem = ProblemBuilder::new()
        .guest("a", 3)
        .guest("b", 5)
        .table("t1", 2)
        .table("t2", 4)
        .restrict("a", &["t1"])
        .build();
    let priority = PriorityPolicy::new();
    let groups = GroupBuilder::new(&priority).build(&problem);
    let placer = PlanPlacer::new(&problem, &groups, &priority, RestrictionPolicy::Intersection);
    let a = groups.iter().find(|g| g.occupancy == 3).unwrap();
    let b = groups.iter().find(|g| g.occupancy == 5).unwrap();

    assert_eq!(
        placer.check_feasible(a),
        Err(Stranding::NoAllowedTable { occupancy: 3 })
    );
    assert_eq!(
        placer.check_feasible(b),
        Err(Stranding::TooLarge {
            occupancy: 5,
            max_capacity: 4
        })
    );
}

#[test]
fn test_huge_parties_do_not_overflow_capacity_checks() {
    let problem = ProblemBuilder::new()
        .guest("a", u32::MAX)
        .guest("b", u32::MAX)
        .table("t1", u32::MAX)
        .adjacent("a", "b")
        .build();
    let priority = PriorityPolicy::new();
    let groups = GroupBuilder::new(&priority).build(&problem);
    let placer = PlanPlacer::new(&problem, &groups, &priority, RestrictionPolicy::Intersection);

    assert_eq!(
        placer.check_feasible(&groups[0]),
        Err(Stranding::TooLarge {
            occupancy: 2 * u64::from(u32::MAX),
            max_capacity: u64::from(u32::MAX)
        })
    );
}
