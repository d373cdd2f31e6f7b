//! Domain records consumed and produced by the seating engine.
//!
//! All input records are read-only for the duration of one generation run.
//! Relation maps are ordered (`BTreeMap`) so every traversal over them is
//! deterministic.

mod conflict;
mod guest;
mod plan;
mod problem;
mod relation;
mod table;

pub use conflict::{ConflictKind, ConstraintConflict, Resolution, Severity};
pub use guest::{Guest, GuestId};
pub use plan::{SeatedUnit, SeatingPlan, TableSeating};
pub use problem::SeatingProblem;
pub use relation::{AdjacencyMap, ConstraintKind, ConstraintMap, RestrictionMap};
pub use table::{Table, TableId};
