use std::fmt;

use crate::model::entity::EntityName;

/// Result of tapping a flag. Both variants carry the tapped entity, which is
/// what the feedback message names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Correct { selected: EntityName },
    Incorrect { selected: EntityName },
}

impl Outcome {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct { .. })
    }

    #[must_use]
    pub fn selected(&self) -> &EntityName {
        match self {
            Self::Correct { selected } | Self::Incorrect { selected } => selected,
        }
    }

    /// Score change applied for this outcome.
    #[must_use]
    pub fn score_delta(&self) -> i32 {
        if self.is_correct() { 1 } else { -1 }
    }

    #[must_use]
    pub fn headline(&self) -> &'static str {
        if self.is_correct() { "Correct!" } else { "Wrong!" }
    }

    #[must_use]
    pub fn message(&self) -> String {
        format!("That's the flag of {}", self.selected())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.headline(), self.message())
    }
}

/// One answered round of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    /// 1-based position of the round within the game.
    pub number: u32,
    pub target: EntityName,
    pub selected_index: usize,
    pub outcome: Outcome,
}
