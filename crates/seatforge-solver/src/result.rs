//! Generation outcome.

use std::fmt;

use seatforge_core::{
    ConstraintConflict, GenerationMessage, MessageKind, Result, SeatForgeError, SeatingPlan,
};

use crate::statistics::GenerationStatistics;

/// Orchestrator stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Validating,
    ConflictChecking,
    Building,
    Searching,
    Ranking,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validating => "validating",
            Stage::ConflictChecking => "conflict_checking",
            Stage::Building => "building",
            Stage::Searching => "searching",
            Stage::Ranking => "ranking",
        };
        f.write_str(name)
    }
}

/// Where a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Done,
    Aborted(Stage),
}

/// Everything a generation run produced.
///
/// Failures are data: `plans` is empty and `error` is set, with the same
/// failure also listed in `messages`.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Accepted plans, best score first.
    pub plans: Vec<SeatingPlan>,
    /// Errors and warnings in the order they arose.
    pub messages: Vec<GenerationMessage>,
    /// Every conflict the detector reported, critical or not.
    pub conflicts: Vec<ConstraintConflict>,
    pub statistics: GenerationStatistics,
    pub outcome: Outcome,
    /// The failure that left `plans` empty.
    pub error: Option<SeatForgeError>,
}

impl GenerationResult {
    pub(crate) fn aborted(
        stage: Stage,
        error: SeatForgeError,
        mut messages: Vec<GenerationMessage>,
        conflicts: Vec<ConstraintConflict>,
        statistics: GenerationStatistics,
    ) -> Self {
        if !messages.iter().any(GenerationMessage::is_error) {
            messages.push(GenerationMessage::from(&error));
        }
        Self {
            plans: Vec::new(),
            messages,
            conflicts,
            statistics,
            outcome: Outcome::Aborted(stage),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        !self.plans.is_empty()
    }

    pub fn best(&self) -> Option<&SeatingPlan> {
        self.plans.first()
    }

    pub fn errors(&self) -> impl Iterator<Item = &GenerationMessage> {
        self.messages.iter().filter(|m| m.kind == MessageKind::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &GenerationMessage> {
        self.messages.iter().filter(|m| m.kind == MessageKind::Warning)
    }

    /// Converts into the plan list, or the failure when there is none.
    pub fn into_result(self) -> Result<Vec<SeatingPlan>> {
        if !self.plans.is_empty() {
            return Ok(self.plans);
        }
        Err(self.error.unwrap_or_else(|| {
            SeatForgeError::Internal("generation produced neither plans nor an error".to_string())
        }))
    }
}
