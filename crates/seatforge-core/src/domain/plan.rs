//! Seating plans produced by the engine.

use super::guest::GuestId;
use super::table::TableId;
use crate::score::PlanScore;

/// One occupied seat: a guest party member.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatedUnit {
    pub guest_id: GuestId,
    pub guest_name: String,
    /// Position of this seat within the party (`0..count`).
    pub sub_index: u32,
}

/// Ordered seats at one table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableSeating {
    pub table_id: TableId,
    pub capacity: u32,
    pub seats: Vec<SeatedUnit>,
}

impl TableSeating {
    pub fn new(table_id: TableId, capacity: u32) -> Self {
        Self {
            table_id,
            capacity,
            seats: Vec::new(),
        }
    }

    pub fn occupancy(&self) -> u32 {
        self.seats.len() as u32
    }

    /// Distinct guest parties in seat order.
    pub fn guest_ids(&self) -> Vec<&GuestId> {
        let mut ids: Vec<&GuestId> = Vec::new();
        for seat in &self.seats {
            if !ids.contains(&&seat.guest_id) {
                ids.push(&seat.guest_id);
            }
        }
        ids
    }

    pub fn seats_guest(&self, guest: &GuestId) -> bool {
        self.seats.iter().any(|s| &s.guest_id == guest)
    }
}

/// A complete assignment of every guest to a table, with seat order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatingPlan {
    pub id: String,
    pub tables: Vec<TableSeating>,
    pub score: PlanScore,
}

impl SeatingPlan {
    pub fn new(id: impl Into<String>, tables: Vec<TableSeating>) -> Self {
        Self {
            id: id.into(),
            tables,
            score: PlanScore::ZERO,
        }
    }

    pub fn table(&self, id: &TableId) -> Option<&TableSeating> {
        self.tables.iter().find(|t| &t.table_id == id)
    }

    /// The table seating `guest`, if any.
    pub fn table_of(&self, guest: &GuestId) -> Option<&TableId> {
        self.tables
            .iter()
            .find(|t| t.seats_guest(guest))
            .map(|t| &t.table_id)
    }

    /// Total occupied seats.
    pub fn total_seated(&self) -> u32 {
        self.tables.iter().map(TableSeating::occupancy).sum()
    }

    /// Number of distinct guest parties seated.
    pub fn guest_count(&self) -> usize {
        self.tables.iter().map(|t| t.guest_ids().len()).sum()
    }
}
