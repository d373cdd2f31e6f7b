//! Input validation performed before any search.

use std::collections::HashSet;

use seatforge_core::{ConstraintKind, GuestId, SeatingProblem, TableId};

/// Outcome of validating a problem.
///
/// Errors are fatal to the call; warnings describe input the engine ignores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates guests, tables and the relations between them.
///
/// # Example
///
/// ```
/// use seatforge_core::{Guest, SeatingProblem, Table};
/// use seatforge_solver::validation::validate;
///
/// let problem = SeatingProblem::new(
///     vec![Guest::new("a", "Ann", 3)],
///     vec![Table::new("t1", 2)],
/// );
/// let report = validate(&problem);
/// assert!(!report.is_valid());
/// ```
pub fn validate(problem: &SeatingProblem) -> ValidationReport {
    let mut report = ValidationReport::default();

    let mut guest_ids: HashSet<&GuestId> = HashSet::new();
    for guest in &problem.guests {
        if !guest_ids.insert(&guest.id) {
            report
                .errors
                .push(format!("Guest id {} appears more than once", guest.id));
        }
        if guest.count == 0 {
            report
                .errors
                .push(format!("{} has a party size of zero", guest.name));
        }
    }

    let mut table_ids: HashSet<&TableId> = HashSet::new();
    for table in &problem.tables {
        if !table_ids.insert(&table.id) {
            report
                .errors
                .push(format!("Table id {} appears more than once", table.id));
        }
        if table.capacity == 0 {
            report
                .errors
                .push(format!("Table {} has no seats", table.display_name()));
        }
    }

    let occupancy = problem.total_occupancy();
    let capacity = problem.total_capacity();
    if capacity < occupancy {
        report.errors.push(format!(
            "Not enough seats: {occupancy} guests need seating but tables hold only {capacity}"
        ));
    }

    for (guest, tables) in problem.restrictions.iter() {
        if !guest_ids.contains(guest) {
            report.warnings.push(format!(
                "Table restriction for unknown guest {guest} is ignored"
            ));
        }
        for table in tables {
            if !table_ids.contains(table) {
                report.errors.push(format!(
                    "Guest {guest} is restricted to table {table}, which does not exist"
                ));
            }
        }
    }

    let mut unknown: HashSet<&GuestId> = HashSet::new();
    for (from, to, kind) in problem.constraints.iter() {
        for id in [from, to] {
            if !guest_ids.contains(id) && unknown.insert(id) {
                report.warnings.push(format!(
                    "Constraints referencing unknown guest {id} are ignored"
                ));
            }
        }
        // Symmetric pairs are checked once, from the smaller id.
        let mirrored = from > to && problem.constraints.get(to, from) == ConstraintKind::Must;
        if kind != ConstraintKind::Must || mirrored {
            continue;
        }
        let (Some(a), Some(b)) = (
            problem.restrictions.allowed(from),
            problem.restrictions.allowed(to),
        ) else {
            continue;
        };
        if !a.iter().any(|t| b.contains(t)) {
            report.errors.push(format!(
                "Guests {from} and {to} must sit together but share no allowed table"
            ));
        }
    }

    for (guest, neighbors) in problem.adjacency.iter() {
        for id in std::iter::once(guest).chain(neighbors) {
            if !guest_ids.contains(id) && unknown.insert(id) {
                report.warnings.push(format!(
                    "Adjacency preferences referencing unknown guest {id} are ignored"
                ));
            }
        }
        if neighbors.len() > 2 {
            report.warnings.push(format!(
                "Guest {guest} has {} adjacency preferences; only two neighbors fit beside them",
                neighbors.len()
            ));
        }
    }

    report
}
