//! Shared error types for the services crate.

use thiserror::Error;

use flag_core::model::{GameSummaryError, RoundError};

use crate::quiz::{Operation, SessionPhase};

/// Errors emitted by `QuizSession`.
///
/// `InvalidChoice` and `InvalidState` mean the caller broke the session's
/// state machine; the session is left untouched when they are returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("choice {index} is out of range (expected 0..{choices})")]
    InvalidChoice { index: usize, choices: usize },
    #[error("cannot {operation} while {phase}")]
    InvalidState {
        operation: Operation,
        phase: SessionPhase,
    },
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error(transparent)]
    Summary(#[from] GameSummaryError),
}

/// Errors emitted while validating `QuizConfig`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("total rounds must be > 0")]
    InvalidTotalRounds,
}
