//! Tests for the generation orchestrator.

use std::collections::HashSet;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use seatforge_config::{BudgetConfig, GeneratorConfig, RestrictionPolicy, ThreadCount};
use seatforge_core::{
    ConflictKind, GuestId, MessageKind, SeatForgeError, SeatingPlan, SeatingProblem, TableId,
    UuidIdGenerator,
};
use seatforge_test::{assert_plan_valid, invariants, scenarios, ProblemBuilder};

use super::*;

fn seeded(seed: u64) -> PlanGenerator {
    PlanGenerator::new(GeneratorConfig::new().with_random_seed(seed))
}

fn table_of<'a>(plan: &'a SeatingPlan, guest: &str) -> &'a TableId {
    plan.table_of(&GuestId::new(guest))
        .unwrap_or_else(|| panic!("{guest} is not seated in {}", plan.id))
}

#[test]
fn test_single_table_trio() {
    let problem = scenarios::single_table_trio();
    let result = seeded(1).generate(&problem);

    assert_eq!(result.outcome, Outcome::Done);
    assert!(result.error.is_none());
    assert_eq!(result.plans.len(), 1);
    let plan = &result.plans[0];
    assert_plan_valid(&problem, plan);
    assert_eq!(plan.tables[0].occupancy(), 3);
}

#[test]
fn test_feuding_pair_never_shares_a_table() {
    let problem = scenarios::feuding_pair();
    for seed in 0..10 {
        let result = seeded(seed).generate(&problem);
        assert!(result.is_success());
        for plan in &result.plans {
            assert_ne!(table_of(plan, "a"), table_of(plan, "b"));
        }
    }
}

#[test]
fn test_wedding_plans_are_valid_and_ranked() {
    let problem = scenarios::wedding();
    let result = seeded(3).premium(true).generate(&problem);

    assert!(result.is_success());
    assert!(result.plans.len() <= 30);
    assert!(result.statistics.attempts <= 500);
    for plan in &result.plans {
        assert_plan_valid(&problem, plan);
        invariants::assert_restrictions_respected(&problem, plan);
    }
    for pair in result.plans.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    let ids: HashSet<&str> = result.plans.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), result.plans.len());
}

#[test]
fn test_circular_must_is_a_warning() {
    let problem = ProblemBuilder::new()
        .guests(&["a", "b", "c"])
        .table("t1", 4)
        .must("a", "b")
        .must("b", "c")
        .must("c", "a")
        .build();
    let result = seeded(1).generate(&problem);

    let circular: Vec<_> = result
        .conflicts
        .iter()
        .filter(|c| c.kind == ConflictKind::Circular)
        .collect();
    assert_eq!(circular.len(), 1);
    let named: HashSet<&str> = circular[0]
        .affected_guests
        .iter()
        .map(GuestId::as_str)
        .collect();
    assert_eq!(named, HashSet::from(["a", "b", "c"]));

    assert!(result.is_success());
    assert!(result.warnings().count() >= 1);
    assert_eq!(result.errors().count(), 0);
}

#[test]
fn test_impossible_pair_blocks_generation() {
    let problem = ProblemBuilder::new()
        .guests(&["a", "b"])
        .table("t1", 4)
        .directed("a", "b", seatforge_core::ConstraintKind::Must)
        .directed("b", "a", seatforge_core::ConstraintKind::Cannot)
        .build();
    let result = seeded(1).generate(&problem);

    assert!(result.plans.is_empty());
    assert_eq!(result.outcome, Outcome::Aborted(Stage::ConflictChecking));
    assert!(matches!(result.error, Some(SeatForgeError::CriticalConflict(_))));
    assert!(result
        .conflicts
        .iter()
        .any(|c| c.kind == ConflictKind::Impossible));
    assert_eq!(result.statistics.attempts, 0);
}

#[test]
fn test_oversized_must_group_blocks_generation() {
    let problem = ProblemBuilder::new()
        .guest("a", 3)
        .guest("b", 2)
        .tables(3, 4)
        .must("a", "b")
        .build();
    let result = seeded(1).generate(&problem);

    assert!(result.plans.is_empty());
    assert!(result
        .conflicts
        .iter()
        .any(|c| c.kind == ConflictKind::CapacityViolation));
    assert_eq!(result.outcome, Outcome::Aborted(Stage::ConflictChecking));
}

#[test]
fn test_capacity_shortfall_fails_validation() {
    let problem = ProblemBuilder::new()
        .guest("a", 3)
        .guest("b", 2)
        .table("t1", 4)
        .build();
    let result = seeded(1).generate(&problem);

    assert_eq!(result.outcome, Outcome::Aborted(Stage::Validating));
    assert!(matches!(result.error, Some(SeatForgeError::Validation(_))));
    assert!(result.conflicts.is_empty());
    let errors: Vec<_> = result.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.starts_with("Not enough seats"));
}

#[test]
fn test_disjoint_restrictions_abort_while_building() {
    let problem = ProblemBuilder::new()
        .guests(&["a", "b"])
        .tables(2, 4)
        .adjacent("a", "b")
        .restrict("a", &["t1"])
        .restrict("b", &["t2"])
        .build();
    let result = seeded(1).generate(&problem);

    assert_eq!(result.outcome, Outcome::Aborted(Stage::Building));
    assert!(result.plans.is_empty());
    assert!(result
        .errors()
        .any(|m| m.message.contains("A, B") && m.message.contains("restrictions")));
}

#[test]
fn test_oversized_adjacency_chain_aborts_while_building() {
    let problem = ProblemBuilder::new()
        .guests(&["a", "b", "c", "d"])
        .tables(2, 3)
        .adjacent("a", "b")
        .adjacent("b", "c")
        .adjacent("c", "d")
        .build();
    let result = seeded(1).generate(&problem);

    assert!(result.conflicts.is_empty());
    assert_eq!(result.outcome, Outcome::Aborted(Stage::Building));
    let message = &result.errors().next().unwrap().message;
    assert!(message.contains("A, B, C, D"));
    assert!(message.contains("needs 4 seats"));
    assert!(message.contains("largest table has 3"));
    assert!(!message.contains("restrictions"));
}

#[test]
fn test_union_policy_places_disjoint_restrictions() {
    let problem = ProblemBuilder::new()
        .guests(&["a", "b"])
        .tables(2, 4)
        .adjacent("a", "b")
        .restrict("a", &["t1"])
        .restrict("b", &["t2"])
        .build();
    let config = GeneratorConfig::new()
        .with_random_seed(1)
        .with_restriction_policy(RestrictionPolicy::Union);
    let result = PlanGenerator::new(config).generate(&problem);

    assert!(result.is_success());
    for plan in &result.plans {
        assert_eq!(table_of(plan, "a"), table_of(plan, "b"));
    }
}

#[test]
fn test_exhaustion_reports_attempts() {
    // Both guests fit, but never together on the only table
    let problem = ProblemBuilder::new()
        .guests(&["a", "b"])
        .table("t1", 2)
        .cannot("a", "b")
        .build();
    let config = GeneratorConfig::new()
        .with_random_seed(1)
        .with_budget(false, BudgetConfig::new(10, 25));
    let result = PlanGenerator::new(config).generate(&problem);

    assert!(result.plans.is_empty());
    assert_eq!(result.outcome, Outcome::Aborted(Stage::Searching));
    assert_eq!(result.error, Some(SeatForgeError::Exhausted { attempts: 25 }));
    assert_eq!(result.statistics.placement_failures, 25);
    assert_eq!(result.errors().count(), 1);
    assert!(matches!(
        result.into_result(),
        Err(SeatForgeError::Exhausted { attempts: 25 })
    ));
}

#[test]
fn test_premium_budget() {
    // A single feasible plan: the target is never met, the budget runs out
    let problem = scenarios::single_table_trio();

    let free = seeded(1).generate(&problem);
    let premium = seeded(1).premium(true).generate(&problem);

    assert_eq!(free.statistics.attempts, 200);
    assert_eq!(premium.statistics.attempts, 500);
    assert_eq!(premium.statistics.duplicates_rejected, 499);
}

#[test]
fn test_target_plan_count_stops_search() {
    let problem = scenarios::wedding();
    let config = GeneratorConfig::new()
        .with_random_seed(8)
        .with_budget(false, BudgetConfig::new(2, 500));
    let result = PlanGenerator::new(config).generate(&problem);

    assert_eq!(result.plans.len(), 2);
    assert!(result.statistics.attempts < 500);
}

#[test]
fn test_same_seed_same_plans() {
    let problem = scenarios::wedding();
    let first = seeded(21).generate(&problem);
    let second = seeded(21).generate(&problem);

    assert!(first.is_success());
    assert_eq!(first.plans, second.plans);
    assert_eq!(first.statistics.attempts, second.statistics.attempts);
}

#[test]
fn test_parallel_matches_sequential() {
    let problem = scenarios::wedding();
    let sequential = seeded(4).generate(&problem);

    for threads in [ThreadCount::Auto, ThreadCount::Count(3), ThreadCount::None] {
        let config = GeneratorConfig::new()
            .with_random_seed(4)
            .with_thread_count(threads);
        let parallel = PlanGenerator::new(config).generate_parallel(&problem);
        assert_eq!(parallel.plans, sequential.plans, "{threads:?}");
        assert_eq!(parallel.statistics.attempts, sequential.statistics.attempts);
    }
}

#[test]
fn test_cancelled_before_first_attempt() {
    let flag = Arc::new(AtomicBool::new(true));
    let result = seeded(1)
        .with_cancel_flag(flag)
        .generate(&scenarios::wedding());

    assert!(result.plans.is_empty());
    assert_eq!(result.error, Some(SeatForgeError::Cancelled));
    assert_eq!(result.statistics.attempts, 0);
    assert_eq!(result.errors().count(), 1);
}

#[test]
fn test_plan_ids_come_from_injected_generator() {
    let result = seeded(2)
        .with_id_generator(Arc::new(UuidIdGenerator))
        .generate(&scenarios::feuding_pair());

    assert!(result.is_success());
    for plan in &result.plans {
        assert!(plan.id.starts_with("plan-"));
        assert!(plan.id.len() > "plan-".len() + 30);
    }
}

#[test]
fn test_priority_guest_starts_the_table() {
    let problem = ProblemBuilder::new()
        .guests(&["a", "b", "c"])
        .table("t1", 3)
        .adjacent("a", "b")
        .adjacent("b", "c")
        .build();
    let result = seeded(1)
        .with_priority(PriorityPolicy::new().with_predicate(|g| g.id.as_str() == "c"))
        .generate(&problem);

    let seats: Vec<&str> = result.plans[0].tables[0]
        .seats
        .iter()
        .map(|s| s.guest_id.as_str())
        .collect();
    assert_eq!(seats, vec!["c", "b", "a"]);
}

#[test]
fn test_detect_conflicts_is_repeatable() {
    let problem = ProblemBuilder::new()
        .guests(&["a", "b", "c", "d"])
        .table("t1", 2)
        .must("a", "b")
        .must("b", "c")
        .must("c", "a")
        .adjacent("c", "d")
        .build();
    let generator = PlanGenerator::default();

    let strip = |problem: &SeatingProblem| -> Vec<(ConflictKind, Vec<GuestId>)> {
        generator
            .detect_conflicts(problem, true)
            .into_iter()
            .map(|c| (c.kind, c.affected_guests))
            .collect()
    };
    let first = strip(&problem);
    assert!(!first.is_empty());
    assert_eq!(first, strip(&problem));
}

#[test]
fn test_messages_report_kind() {
    let problem = ProblemBuilder::new()
        .guests(&["a"])
        .table("t1", 2)
        .adjacent("a", "ghost")
        .build();
    let result = seeded(1).generate(&problem);

    assert!(result.is_success());
    assert!(result
        .messages
        .iter()
        .all(|m| m.kind == MessageKind::Warning));
    assert!(result.warnings().count() >= 1);
}

#[tokio::test]
async fn test_async_matches_sync() {
    let problem = scenarios::wedding();
    let sync = seeded(6).generate(&problem);
    let async_result = seeded(6).generate_async(&problem).await;

    assert_eq!(async_result.plans, sync.plans);
}

#[tokio::test]
async fn test_channel_streams_accepted_plans() {
    let problem = scenarios::wedding();
    let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();
    let result = seeded(6).generate_with_channel(&problem, sender).await;

    let mut streamed = Vec::new();
    while let Some(plan) = receiver.recv().await {
        streamed.push(plan);
    }
    assert_eq!(streamed.len(), result.plans.len());
    let streamed_ids: HashSet<String> = streamed.into_iter().map(|p| p.id).collect();
    let ranked_ids: HashSet<String> = result.plans.iter().map(|p| p.id.clone()).collect();
    assert_eq!(streamed_ids, ranked_ids);
}

#[tokio::test]
async fn test_async_respects_cancel_flag() {
    let problem = scenarios::feuding_pair();
    let flag = Arc::new(AtomicBool::new(false));
    let generator = seeded(1).with_cancel_flag(Arc::clone(&flag));

    let first = generator.generate_async(&problem).await;
    assert!(first.is_success());
    assert_eq!(first.warnings().count(), 0);

    flag.store(true, std::sync::atomic::Ordering::SeqCst);
    let cancelled = generator.generate_async(&problem).await;
    assert_eq!(cancelled.error, Some(SeatForgeError::Cancelled));
}
