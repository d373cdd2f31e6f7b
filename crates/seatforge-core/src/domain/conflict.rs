//! Diagnosed structural problems in the constraint data.

use std::fmt;

use super::guest::GuestId;

/// What kind of structural problem was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConflictKind {
    /// A cycle in the `must` relation.
    Circular,
    /// A pair resolving to both `must` and `cannot`.
    Impossible,
    /// A `must` group larger than every table.
    CapacityViolation,
    /// A guest plus their adjacency partners larger than every table.
    AdjacencyViolation,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConflictKind::Circular => "circular",
            ConflictKind::Impossible => "impossible",
            ConflictKind::CapacityViolation => "capacity_violation",
            ConflictKind::AdjacencyViolation => "adjacency_violation",
        })
    }
}

/// How serious a conflict is. Only `Critical` blocks generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// An edge whose removal clears a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Resolution {
    ClearConstraint { a: GuestId, b: GuestId },
    ClearAdjacency { a: GuestId, b: GuestId },
}

/// A structural problem found by conflict detection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintConflict {
    pub id: String,
    pub kind: ConflictKind,
    pub severity: Severity,
    pub description: String,
    pub affected_guests: Vec<GuestId>,
    pub resolutions: Vec<Resolution>,
}

impl ConstraintConflict {
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

impl fmt::Display for ConstraintConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.description)
    }
}
