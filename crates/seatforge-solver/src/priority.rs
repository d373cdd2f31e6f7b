//! Caller-supplied guest priorities.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use seatforge_core::{Guest, GuestId};

type PriorityPredicate = Arc<dyn Fn(&Guest) -> bool + Send + Sync>;

/// Decides which guests are prioritized.
///
/// Explicit weights win; otherwise a guest matching the predicate gets
/// [`ELEVATED`](Self::ELEVATED) weight and everyone else
/// [`BASELINE`](Self::BASELINE).
///
/// # Example
///
/// ```
/// use seatforge_core::Guest;
/// use seatforge_solver::PriorityPolicy;
///
/// let policy = PriorityPolicy::new()
///     .with_predicate(|g: &Guest| g.name.contains("Bride"))
///     .with_weight("grandma", 5);
///
/// assert_eq!(policy.weight(&Guest::single("b", "The Bride")), PriorityPolicy::ELEVATED);
/// assert_eq!(policy.weight(&Guest::single("grandma", "Rose")), 5);
/// assert_eq!(policy.weight(&Guest::single("x", "Someone")), PriorityPolicy::BASELINE);
/// ```
#[derive(Clone, Default)]
pub struct PriorityPolicy {
    weights: HashMap<GuestId, u32>,
    predicate: Option<PriorityPredicate>,
}

impl PriorityPolicy {
    pub const BASELINE: u32 = 1;
    pub const ELEVATED: u32 = 10;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weight(mut self, guest: impl Into<GuestId>, weight: u32) -> Self {
        self.weights.insert(guest.into(), weight);
        self
    }

    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Guest) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    pub fn weight(&self, guest: &Guest) -> u32 {
        if let Some(&weight) = self.weights.get(&guest.id) {
            return weight;
        }
        match &self.predicate {
            Some(predicate) if predicate(guest) => Self::ELEVATED,
            _ => Self::BASELINE,
        }
    }

    pub fn is_priority(&self, guest: &Guest) -> bool {
        self.weight(guest) > Self::BASELINE
    }
}

impl fmt::Debug for PriorityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityPolicy")
            .field("weights", &self.weights)
            .field("has_predicate", &self.predicate.is_some())
            .finish()
    }
}
