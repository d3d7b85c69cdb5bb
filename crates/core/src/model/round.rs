use thiserror::Error;

use crate::model::entity::{Entity, EntityName};

/// Number of flags shown in every round.
pub const CHOICES_PER_ROUND: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("correct index {index} is out of range (expected 0..=2)")]
    CorrectIndexOutOfRange { index: usize },

    #[error("round contains {0} more than once")]
    DuplicateChoice(EntityName),
}

/// One question: three distinct entities in display order plus the position of
/// the one the player has to find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    choices: [Entity; CHOICES_PER_ROUND],
    correct_index: usize,
}

impl Round {
    /// Creates a round.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::CorrectIndexOutOfRange` if `correct_index` does not name
    /// a choice, or `RoundError::DuplicateChoice` if an entity appears twice.
    pub fn new(
        choices: [Entity; CHOICES_PER_ROUND],
        correct_index: usize,
    ) -> Result<Self, RoundError> {
        if correct_index >= CHOICES_PER_ROUND {
            return Err(RoundError::CorrectIndexOutOfRange {
                index: correct_index,
            });
        }
        for (i, entity) in choices.iter().enumerate() {
            if choices[..i].iter().any(|e| e.name() == entity.name()) {
                return Err(RoundError::DuplicateChoice(entity.name().clone()));
            }
        }
        Ok(Self {
            choices,
            correct_index,
        })
    }

    #[must_use]
    pub fn choices(&self) -> &[Entity; CHOICES_PER_ROUND] {
        &self.choices
    }

    #[must_use]
    pub fn choice(&self, index: usize) -> Option<&Entity> {
        self.choices.get(index)
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// The entity the player is asked to find.
    #[must_use]
    pub fn target(&self) -> &Entity {
        &self.choices[self.correct_index]
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices(names: [&str; 3]) -> [Entity; 3] {
        names.map(|n| Entity::new(n, "flag").unwrap())
    }

    #[test]
    fn target_follows_correct_index() {
        let round = Round::new(choices(["A", "B", "C"]), 2).unwrap();
        assert_eq!(round.target().name(), "C");
        assert!(round.is_correct(2));
        assert!(!round.is_correct(0));
        assert!(round.choice(3).is_none());
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = Round::new(choices(["A", "B", "C"]), 3).unwrap_err();
        assert_eq!(err, RoundError::CorrectIndexOutOfRange { index: 3 });
    }

    #[test]
    fn rejects_repeated_entities() {
        let err = Round::new(choices(["A", "B", "A"]), 0).unwrap_err();
        assert_eq!(
            err,
            RoundError::DuplicateChoice(EntityName::new("A").unwrap())
        );
    }
}
