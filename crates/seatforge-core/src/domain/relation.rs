//! Pairwise relations between guests and guest-to-table restrictions.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::guest::GuestId;
use super::table::TableId;

/// Hard relation between two guests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintKind {
    /// The pair must share a table.
    #[cfg_attr(feature = "serde", serde(rename = "must"))]
    Must,
    /// The pair must never share a table.
    #[cfg_attr(feature = "serde", serde(rename = "cannot"))]
    Cannot,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = ""))]
    None,
}

/// Directed constraint entries `guest -> guest -> kind`.
///
/// Entries are stored per direction, as the caller supplied them, so that a
/// pair holding `must` one way and `cannot` the other can be diagnosed
/// instead of silently resolved. Queries such as [`is_must`](Self::is_must)
/// look at both directions.
///
/// # Example
///
/// ```
/// use seatforge_core::{ConstraintKind, ConstraintMap, GuestId};
///
/// let mut constraints = ConstraintMap::new();
/// constraints.set_pair("a", "b", ConstraintKind::Cannot);
///
/// let (a, b) = (GuestId::new("a"), GuestId::new("b"));
/// assert!(constraints.is_cannot(&a, &b));
/// assert!(constraints.is_cannot(&b, &a));
/// assert!(!constraints.is_must(&a, &b));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConstraintMap {
    entries: BTreeMap<GuestId, BTreeMap<GuestId, ConstraintKind>>,
}

impl ConstraintMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directed entry `from -> to`. Setting [`ConstraintKind::None`]
    /// removes the entry.
    pub fn set(&mut self, from: impl Into<GuestId>, to: impl Into<GuestId>, kind: ConstraintKind) {
        let from = from.into();
        let to = to.into();
        if kind == ConstraintKind::None {
            if let Entry::Occupied(mut row) = self.entries.entry(from) {
                row.get_mut().remove(&to);
                if row.get().is_empty() {
                    row.remove();
                }
            }
            return;
        }
        self.entries.entry(from).or_default().insert(to, kind);
    }

    /// Sets both directions of a pair.
    pub fn set_pair(&mut self, a: impl Into<GuestId>, b: impl Into<GuestId>, kind: ConstraintKind) {
        let a = a.into();
        let b = b.into();
        self.set(a.clone(), b.clone(), kind);
        self.set(b, a, kind);
    }

    /// Removes both directions of a pair.
    pub fn clear_pair(&mut self, a: &GuestId, b: &GuestId) {
        self.set(a.clone(), b.clone(), ConstraintKind::None);
        self.set(b.clone(), a.clone(), ConstraintKind::None);
    }

    /// Returns the directed entry `from -> to`.
    pub fn get(&self, from: &GuestId, to: &GuestId) -> ConstraintKind {
        self.entries
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or_default()
    }

    pub fn is_must(&self, a: &GuestId, b: &GuestId) -> bool {
        self.get(a, b) == ConstraintKind::Must || self.get(b, a) == ConstraintKind::Must
    }

    pub fn is_cannot(&self, a: &GuestId, b: &GuestId) -> bool {
        self.get(a, b) == ConstraintKind::Cannot || self.get(b, a) == ConstraintKind::Cannot
    }

    /// Targets of `must` entries leaving `from`.
    pub fn must_targets<'a>(&'a self, from: &GuestId) -> impl Iterator<Item = &'a GuestId> + 'a {
        self.entries
            .get(from)
            .into_iter()
            .flat_map(|row| row.iter())
            .filter(|(_, kind)| **kind == ConstraintKind::Must)
            .map(|(to, _)| to)
    }

    /// All directed entries other than `None`, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&GuestId, &GuestId, ConstraintKind)> {
        self.entries.iter().flat_map(|(from, row)| {
            row.iter()
                .filter(|(_, kind)| **kind != ConstraintKind::None)
                .map(move |(to, kind)| (from, to, *kind))
        })
    }

    /// Each unordered pair appearing in either direction, exactly once,
    /// with the smaller identifier first.
    pub fn unordered_pairs(&self) -> Vec<(&GuestId, &GuestId)> {
        let mut pairs: Vec<(&GuestId, &GuestId)> = self
            .iter()
            .filter(|(from, to, _)| from != to)
            .map(|(from, to, _)| if from < to { (from, to) } else { (to, from) })
            .collect();
        pairs.sort();
        pairs.dedup();
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Symmetric "prefers to sit next to" relation.
///
/// Each guest keeps an ordered neighbor list. Well-formed input has at most
/// two neighbors per guest, so the relation forms chains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AdjacencyMap {
    entries: BTreeMap<GuestId, Vec<GuestId>>,
}

impl AdjacencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the preference in both directions, ignoring duplicates.
    pub fn insert_pair(&mut self, a: impl Into<GuestId>, b: impl Into<GuestId>) {
        let a = a.into();
        let b = b.into();
        if a == b {
            return;
        }
        push_unique(self.entries.entry(a.clone()).or_default(), b.clone());
        push_unique(self.entries.entry(b).or_default(), a);
    }

    /// Replaces a guest's neighbor list as supplied, without mirroring it.
    pub fn set_neighbors(&mut self, guest: impl Into<GuestId>, neighbors: Vec<GuestId>) {
        let guest = guest.into();
        if neighbors.is_empty() {
            self.entries.remove(&guest);
        } else {
            self.entries.insert(guest, neighbors);
        }
    }

    /// Removes both directions of a pair.
    pub fn remove_pair(&mut self, a: &GuestId, b: &GuestId) {
        for (from, to) in [(a, b), (b, a)] {
            if let Some(list) = self.entries.get_mut(from) {
                list.retain(|g| g != to);
                if list.is_empty() {
                    self.entries.remove(from);
                }
            }
        }
    }

    pub fn neighbors(&self, guest: &GuestId) -> &[GuestId] {
        self.entries.get(guest).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, guest: &GuestId) -> usize {
        self.neighbors(guest).len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GuestId, &[GuestId])> {
        self.entries.iter().map(|(g, list)| (g, list.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn push_unique(list: &mut Vec<GuestId>, id: GuestId) {
    if !list.contains(&id) {
        list.push(id);
    }
}

/// Confines guests to a set of tables. Guests without an entry may sit
/// anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RestrictionMap {
    entries: BTreeMap<GuestId, Vec<TableId>>,
}

impl RestrictionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Confines `guest` to `tables`. An empty list removes the restriction.
    pub fn restrict<I, T>(&mut self, guest: impl Into<GuestId>, tables: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<TableId>,
    {
        let guest = guest.into();
        let mut allowed: Vec<TableId> = Vec::new();
        for table in tables {
            let table = table.into();
            if !allowed.contains(&table) {
                allowed.push(table);
            }
        }
        if allowed.is_empty() {
            self.entries.remove(&guest);
        } else {
            self.entries.insert(guest, allowed);
        }
    }

    /// Tables `guest` is confined to, or `None` when unrestricted.
    pub fn allowed(&self, guest: &GuestId) -> Option<&[TableId]> {
        self.entries.get(guest).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GuestId, &[TableId])> {
        self.entries.iter().map(|(g, list)| (g, list.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
