//! Termination conditions for the search loop.

mod attempt_count;
mod composite;
mod external;
mod plan_count;
mod time;

use std::fmt::Debug;

use crate::scope::GenerationScope;

pub use attempt_count::AttemptCountTermination;
pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use plan_count::PlanCountTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop searching.
///
/// Checked before every attempt and at every cooperative yield point.
pub trait Termination: Send + Debug {
    /// Returns true if the search should stop.
    fn is_terminated(&self, scope: &GenerationScope) -> bool;
}

/// An absent condition never terminates.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, scope: &GenerationScope) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(scope))
    }
}
