//! Identifier generation for conflicts and plans.
//!
//! Identifiers are injected rather than derived from the wall clock, so two
//! records created in the same millisecond never collide.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Produces unique identifiers for output records.
pub trait IdGenerator: Send + Sync + Debug {
    /// Returns a fresh identifier. `prefix` names the record kind
    /// (for example `"conflict"` or `"plan"`).
    fn next_id(&self, prefix: &str) -> String;
}

/// Monotonic counter identifiers: `conflict-1`, `conflict-2`, ...
///
/// # Example
///
/// ```
/// use seatforge_core::{IdGenerator, SequentialIdGenerator};
///
/// let ids = SequentialIdGenerator::new();
/// assert_eq!(ids.next_id("plan"), "plan-1");
/// assert_eq!(ids.next_id("conflict"), "conflict-2");
/// ```
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts counting after `start`.
    pub fn starting_at(start: u64) -> Self {
        Self {
            counter: AtomicU64::new(start),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{n}")
    }
}

/// Random v4 UUID identifiers, prefixed with the record kind.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_are_monotonic() {
        let ids = SequentialIdGenerator::starting_at(9);
        assert_eq!(ids.next_id("plan"), "plan-10");
        assert_eq!(ids.next_id("plan"), "plan-11");
    }

    #[test]
    fn test_uuid_ids_are_distinct() {
        let ids = UuidIdGenerator;
        let a = ids.next_id("conflict");
        let b = ids.next_id("conflict");
        assert!(a.starts_with("conflict-"));
        assert_ne!(a, b);
    }
}
