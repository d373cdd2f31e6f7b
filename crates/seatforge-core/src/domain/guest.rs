//! Guest parties.

use std::fmt;

/// Stable identifier of a guest party.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GuestId(String);

impl GuestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GuestId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for GuestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A guest party occupying `count` seats as one unit.
///
/// # Example
///
/// ```
/// use seatforge_core::Guest;
///
/// let family = Guest::new("g1", "The Smiths", 4);
/// assert_eq!(family.count, 4);
/// assert_eq!(family.id.as_str(), "g1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
    pub count: u32,
}

impl Guest {
    pub fn new(id: impl Into<GuestId>, name: impl Into<String>, count: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            count,
        }
    }

    /// A party of one.
    pub fn single(id: impl Into<GuestId>, name: impl Into<String>) -> Self {
        Self::new(id, name, 1)
    }
}
