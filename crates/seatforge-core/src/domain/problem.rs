//! The full input of one generation run.

use std::collections::HashMap;

use super::guest::{Guest, GuestId};
use super::relation::{AdjacencyMap, ConstraintMap, RestrictionMap};
use super::table::{Table, TableId};

/// Guests, tables and the relations between them.
///
/// # Example
///
/// ```
/// use seatforge_core::{ConstraintKind, ConstraintMap, Guest, SeatingProblem, Table};
///
/// let mut constraints = ConstraintMap::new();
/// constraints.set_pair("a", "b", ConstraintKind::Must);
///
/// let problem = SeatingProblem::new(
///     vec![Guest::single("a", "Ann"), Guest::new("b", "Bob", 2)],
///     vec![Table::new("t1", 4)],
/// )
/// .with_constraints(constraints);
///
/// assert_eq!(problem.total_occupancy(), 3);
/// assert_eq!(problem.max_capacity(), 4);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatingProblem {
    pub guests: Vec<Guest>,
    pub tables: Vec<Table>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub constraints: ConstraintMap,
    #[cfg_attr(feature = "serde", serde(default))]
    pub adjacency: AdjacencyMap,
    #[cfg_attr(feature = "serde", serde(default))]
    pub restrictions: RestrictionMap,
}

impl SeatingProblem {
    pub fn new(guests: Vec<Guest>, tables: Vec<Table>) -> Self {
        Self {
            guests,
            tables,
            ..Self::default()
        }
    }

    pub fn with_constraints(mut self, constraints: ConstraintMap) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_adjacency(mut self, adjacency: AdjacencyMap) -> Self {
        self.adjacency = adjacency;
        self
    }

    pub fn with_restrictions(mut self, restrictions: RestrictionMap) -> Self {
        self.restrictions = restrictions;
        self
    }

    /// Guests keyed by identifier.
    pub fn guest_index(&self) -> HashMap<&GuestId, &Guest> {
        self.guests.iter().map(|g| (&g.id, g)).collect()
    }

    pub fn table(&self, id: &TableId) -> Option<&Table> {
        self.tables.iter().find(|t| &t.id == id)
    }

    /// Seats needed to place every guest party.
    pub fn total_occupancy(&self) -> u64 {
        self.guests.iter().map(|g| u64::from(g.count)).sum()
    }

    pub fn total_capacity(&self) -> u64 {
        self.tables.iter().map(|t| u64::from(t.capacity)).sum()
    }

    /// Capacity of the largest table, or zero without tables.
    pub fn max_capacity(&self) -> u64 {
        self.tables
            .iter()
            .map(|t| u64::from(t.capacity))
            .max()
            .unwrap_or(0)
    }
}
