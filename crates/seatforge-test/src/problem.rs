//! Fluent builder for seating problems.
//!
//! # Example
//!
//! ```
//! use seatforge_test::ProblemBuilder;
//!
//! let problem = ProblemBuilder::new()
//!     .guests(&["a", "b", "c"])
//!     .table("t1", 3)
//!     .must("a", "b")
//!     .build();
//! assert_eq!(problem.guests.len(), 3);
//! assert_eq!(problem.total_capacity(), 3);
//! ```

use seatforge_core::{
    AdjacencyMap, ConstraintKind, ConstraintMap, Guest, RestrictionMap, SeatingProblem, Table,
};

#[derive(Debug, Default)]
pub struct ProblemBuilder {
    guests: Vec<Guest>,
    tables: Vec<Table>,
    constraints: ConstraintMap,
    adjacency: AdjacencyMap,
    restrictions: RestrictionMap,
}

impl ProblemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a party named after its id in upper case.
    pub fn guest(mut self, id: &str, count: u32) -> Self {
        self.guests.push(Guest::new(id, id.to_uppercase(), count));
        self
    }

    /// Adds single-seat guests.
    pub fn guests(mut self, ids: &[&str]) -> Self {
        for id in ids {
            self = self.guest(id, 1);
        }
        self
    }

    pub fn table(mut self, id: &str, capacity: u32) -> Self {
        self.tables.push(Table::new(id, capacity));
        self
    }

    /// Adds `count` tables `t1..=tN` of equal capacity.
    pub fn tables(mut self, count: usize, capacity: u32) -> Self {
        for i in 1..=count {
            self.tables.push(Table::new(format!("t{i}"), capacity));
        }
        self
    }

    /// Symmetric `must` pair.
    pub fn must(mut self, a: &str, b: &str) -> Self {
        self.constraints.set_pair(a, b, ConstraintKind::Must);
        self
    }

    /// Symmetric `cannot` pair.
    pub fn cannot(mut self, a: &str, b: &str) -> Self {
        self.constraints.set_pair(a, b, ConstraintKind::Cannot);
        self
    }

    /// Single directed constraint entry.
    pub fn directed(mut self, from: &str, to: &str, kind: ConstraintKind) -> Self {
        self.constraints.set(from, to, kind);
        self
    }

    pub fn adjacent(mut self, a: &str, b: &str) -> Self {
        self.adjacency.insert_pair(a, b);
        self
    }

    pub fn restrict(mut self, guest: &str, tables: &[&str]) -> Self {
        self.restrictions.restrict(guest, tables.iter().copied());
        self
    }

    pub fn build(self) -> SeatingProblem {
        SeatingProblem::new(self.guests, self.tables)
            .with_constraints(self.constraints)
            .with_adjacency(self.adjacency)
            .with_restrictions(self.restrictions)
    }
}
