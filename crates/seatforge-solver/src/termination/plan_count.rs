//! Target plan count termination.

use super::Termination;
use crate::scope::GenerationScope;

/// Terminates once enough distinct plans were accepted.
#[derive(Debug, Clone)]
pub struct PlanCountTermination {
    target: usize,
}

impl PlanCountTermination {
    pub fn new(target: usize) -> Self {
        Self { target }
    }
}

impl Termination for PlanCountTermination {
    fn is_terminated(&self, scope: &GenerationScope) -> bool {
        scope.accepted_count() >= self.target
    }
}
