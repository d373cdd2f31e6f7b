//! SeatForge Core - Domain types for constraint-based seat assignment
//!
//! This crate provides the fundamental records shared by the engine:
//! - Guests, tables and the relations between guests
//! - Seating plans and diagnosed constraint conflicts
//! - Plan scores
//! - Error and message types
//! - Identifier generators

pub mod domain;
pub mod error;
pub mod id;
pub mod score;

pub use domain::{
    AdjacencyMap, ConflictKind, ConstraintConflict, ConstraintKind, ConstraintMap, Guest, GuestId,
    Resolution, RestrictionMap, SeatedUnit, SeatingPlan, SeatingProblem, Severity, Table, TableId,
    TableSeating,
};
pub use error::{GenerationMessage, MessageKind, Result, SeatForgeError};
pub use id::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use score::PlanScore;
