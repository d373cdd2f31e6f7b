//! SeatForge Solver Engine
//!
//! This crate turns a [`SeatingProblem`](seatforge_core::SeatingProblem)
//! into ranked seating plans:
//! - Validation and constraint conflict detection
//! - Atomic group building over a union-find
//! - Strategy ordering and greedy placement
//! - Plan scoring and uniqueness filtering
//! - Termination conditions
//! - The orchestrating [`PlanGenerator`] with sequential, async and
//!   parallel search modes

pub mod conflict;
pub mod generator;
pub mod group;
pub mod grouping;
pub mod placer;
pub mod priority;
pub mod result;
pub mod scope;
pub mod scorer;
mod search;
pub mod statistics;
pub mod strategy;
pub mod termination;
pub mod uniqueness;
pub mod validation;

pub use conflict::ConflictDetector;
pub use generator::PlanGenerator;
pub use group::{AtomicGroup, GroupBuilder};
pub use grouping::UnionFind;
pub use placer::{PlanPlacer, Stranding};
pub use priority::PriorityPolicy;
pub use result::{GenerationResult, Outcome, Stage};
pub use scope::GenerationScope;
pub use scorer::PlanScorer;
pub use statistics::GenerationStatistics;
pub use strategy::Strategy;
pub use termination::{
    AttemptCountTermination, ExternalTermination, OrTermination, PlanCountTermination,
    Termination, TimeTermination,
};
pub use uniqueness::UniquenessFilter;
pub use validation::{validate, ValidationReport};
