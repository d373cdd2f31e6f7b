//! Composite OR termination.
//!
//! Uses macro-generated tuple implementations for zero type erasure.

use super::Termination;
use crate::scope::GenerationScope;

/// Combines multiple terminations with OR logic.
///
/// Wraps a tuple of terminations. Terminates when ANY child terminates.
///
/// # Examples
///
/// ```
/// use seatforge_solver::termination::{
///     AttemptCountTermination, OrTermination, PlanCountTermination, Termination,
/// };
/// use seatforge_solver::GenerationScope;
///
/// // Stop after 200 attempts OR 10 accepted plans
/// let termination = OrTermination::new((
///     AttemptCountTermination::new(200),
///     PlanCountTermination::new(10),
/// ));
/// assert!(!termination.is_terminated(&GenerationScope::new(0)));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    /// Creates a new OR termination from a tuple of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

/// Generates `Termination` implementations for OR tuples.
macro_rules! impl_or_termination {
    ($idx:tt: $T:ident) => {
        impl<$T: Termination> Termination for OrTermination<($T,)> {
            fn is_terminated(&self, scope: &GenerationScope) -> bool {
                (self.0).$idx.is_terminated(scope)
            }
        }
    };

    ($($idx:tt: $T:ident),+) => {
        impl<$($T: Termination),+> Termination for OrTermination<($($T,)+)> {
            fn is_terminated(&self, scope: &GenerationScope) -> bool {
                $((self.0).$idx.is_terminated(scope))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
