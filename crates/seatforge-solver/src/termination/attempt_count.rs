//! Attempt budget termination.

use super::Termination;
use crate::scope::GenerationScope;

/// Terminates once the attempt budget is spent.
///
/// # Example
///
/// ```
/// use seatforge_solver::termination::AttemptCountTermination;
///
/// // Free tier budget
/// let term = AttemptCountTermination::new(200);
/// ```
#[derive(Debug, Clone)]
pub struct AttemptCountTermination {
    limit: u64,
}

impl AttemptCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for AttemptCountTermination {
    fn is_terminated(&self, scope: &GenerationScope) -> bool {
        scope.attempt_count() >= self.limit
    }
}
