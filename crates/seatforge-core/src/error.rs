//! Error types for SeatForge

use std::fmt;

use thiserror::Error;

/// Main error type for SeatForge operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatForgeError {
    /// The problem input is inconsistent; no search was attempted.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A critical constraint conflict blocks generation.
    #[error("Constraint conflict: {0}")]
    CriticalConflict(String),

    /// The attempt budget ran out without a single accepted plan.
    #[error("No valid seating plan found after {attempts} attempts")]
    Exhausted { attempts: u64 },

    /// Generation was cancelled before any plan was accepted
    #[error("Generation was cancelled")]
    Cancelled,

    /// Error in generator configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for SeatForge operations
pub type Result<T> = std::result::Result<T, SeatForgeError>;

/// Whether a message blocks the result or only informs about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MessageKind {
    Error,
    Warning,
}

/// A message attached to a generation result.
///
/// Failures are reported as data so callers always receive a complete,
/// inspectable outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationMessage {
    pub kind: MessageKind,
    pub message: String,
}

impl GenerationMessage {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Warning,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

impl From<&SeatForgeError> for GenerationMessage {
    fn from(err: &SeatForgeError) -> Self {
        GenerationMessage::error(err.to_string())
    }
}

impl fmt::Display for GenerationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MessageKind::Error => write!(f, "error: {}", self.message),
            MessageKind::Warning => write!(f, "warning: {}", self.message),
        }
    }
}
