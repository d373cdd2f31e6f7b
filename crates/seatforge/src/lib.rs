//! SeatForge - constraint-based seat assignment in Rust
//!
//! Describe guests, tables and the relations between guests, then ask for
//! ranked, mutually distinct seating plans.
//!
//! # Example
//!
//! ```rust
//! use seatforge::prelude::*;
//!
//! let mut constraints = ConstraintMap::new();
//! constraints.set_pair("ann", "bo", ConstraintKind::Cannot);
//!
//! let problem = SeatingProblem::new(
//!     vec![Guest::single("ann", "Ann"), Guest::single("bo", "Bo")],
//!     vec![Table::new("t1", 1), Table::new("t2", 1)],
//! )
//! .with_constraints(constraints);
//!
//! let result = generate_seating_plans(&problem, false);
//! assert!(result.is_success());
//! for plan in &result.plans {
//!     assert_ne!(plan.table_of(&"ann".into()), plan.table_of(&"bo".into()));
//! }
//! ```

pub use seatforge_config::{
    BudgetConfig, ConfigError, GeneratorConfig, RestrictionPolicy, ScoringConfig, ThreadCount,
    UniquenessConfig,
};
pub use seatforge_core::{
    AdjacencyMap, ConflictKind, ConstraintConflict, ConstraintKind, ConstraintMap,
    GenerationMessage, Guest, GuestId, IdGenerator, MessageKind, PlanScore, Resolution,
    RestrictionMap, SeatForgeError, SeatedUnit, SeatingPlan, SeatingProblem,
    SequentialIdGenerator, Severity, Table, TableId, TableSeating, UuidIdGenerator,
};
pub use seatforge_solver::{
    GenerationResult, GenerationStatistics, Outcome, PlanGenerator, PriorityPolicy, Stage,
    Strategy,
};

#[cfg(feature = "console")]
pub mod console;

/// Generates ranked seating plans with the default configuration.
///
/// `premium` selects the larger plan target and attempt budget.
pub fn generate_seating_plans(problem: &SeatingProblem, premium: bool) -> GenerationResult {
    #[cfg(feature = "console")]
    console::init();

    PlanGenerator::new(GeneratorConfig::default())
        .premium(premium)
        .generate(problem)
}

/// Diagnoses circular, contradictory and oversized relations, including
/// adjacency capacity checks.
pub fn detect_constraint_conflicts(problem: &SeatingProblem) -> Vec<ConstraintConflict> {
    PlanGenerator::default().detect_conflicts(problem, true)
}

pub mod prelude {
    pub use super::{detect_constraint_conflicts, generate_seating_plans};
    pub use super::{
        ConstraintKind, ConstraintMap, GeneratorConfig, Guest, PlanGenerator, PriorityPolicy,
        SeatingPlan, SeatingProblem, Table,
    };
    pub use super::{AdjacencyMap, RestrictionMap};
}
