use std::fmt;

use flag_core::model::Round;

/// Where a session stands in the select / acknowledge / advance cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    AwaitingSelection,
    /// An outcome was reported and the caller has not advanced yet.
    AwaitingAdvance,
    GameOver,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SessionPhase::NotStarted => "the game has not started",
            SessionPhase::AwaitingSelection => "waiting for a selection",
            SessionPhase::AwaitingAdvance => "waiting to advance",
            SessionPhase::GameOver => "the game is over",
        };
        f.write_str(text)
    }
}

/// Session operations that are only valid in one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SelectChoice,
    AdvanceRound,
}

impl Operation {
    /// The only phase in which this operation may run.
    #[must_use]
    pub fn required_phase(self) -> SessionPhase {
        match self {
            Operation::SelectChoice => SessionPhase::AwaitingSelection,
            Operation::AdvanceRound => SessionPhase::AwaitingAdvance,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::SelectChoice => f.write_str("select a choice"),
            Operation::AdvanceRound => f.write_str("advance the round"),
        }
    }
}

/// Snapshot of the observable game state, read by the presentation layer after
/// every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub score: i32,
    pub rounds_remaining: u32,
    pub current_round: Option<Round>,
    pub is_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_map_to_single_phase() {
        assert_eq!(
            Operation::SelectChoice.required_phase(),
            SessionPhase::AwaitingSelection
        );
        assert_eq!(
            Operation::AdvanceRound.required_phase(),
            SessionPhase::AwaitingAdvance
        );
    }
}
