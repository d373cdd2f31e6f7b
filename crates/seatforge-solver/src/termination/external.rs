//! External termination via a shared AtomicBool flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::Termination;
use crate::scope::GenerationScope;

/// Terminates when an external flag is set.
///
/// The flag doubles as the cancellation token of a generation run.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use seatforge_solver::termination::ExternalTermination;
///
/// let flag = Arc::new(AtomicBool::new(false));
/// let term = ExternalTermination::new(Arc::clone(&flag));
/// assert!(!term.is_set());
///
/// flag.store(true, Ordering::SeqCst);
/// assert!(term.is_set());
/// ```
#[derive(Debug, Clone)]
pub struct ExternalTermination {
    flag: Arc<AtomicBool>,
}

impl ExternalTermination {
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl Termination for ExternalTermination {
    fn is_terminated(&self, _scope: &GenerationScope) -> bool {
        self.is_set()
    }
}
