use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::outcome::RoundRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("too many rounds for a single game: {len}")]
    TooManyRounds { len: usize },

    #[error("score ({score}) does not match {correct} correct and {incorrect} incorrect answers")]
    ScoreMismatch {
        score: i32,
        correct: u32,
        incorrect: u32,
    },
}

/// Final tally shown on the game-over dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    score: i32,
    correct: u32,
    incorrect: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl GameSummary {
    /// Build a summary from explicit counts.
    ///
    /// # Errors
    ///
    /// Returns `GameSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `GameSummaryError::ScoreMismatch` if the score is not `correct - incorrect`.
    pub fn new(
        score: i32,
        correct: u32,
        incorrect: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, GameSummaryError> {
        if completed_at < started_at {
            return Err(GameSummaryError::InvalidTimeRange);
        }
        if i64::from(score) != i64::from(correct) - i64::from(incorrect) {
            return Err(GameSummaryError::ScoreMismatch {
                score,
                correct,
                incorrect,
            });
        }

        Ok(Self {
            score,
            correct,
            incorrect,
            started_at,
            completed_at,
        })
    }

    /// Build a summary from the answered rounds of a game.
    ///
    /// # Errors
    ///
    /// Returns `GameSummaryError::TooManyRounds` if the record count cannot fit in `u32`,
    /// plus the errors of [`GameSummary::new`].
    pub fn from_records(
        score: i32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        records: &[RoundRecord],
    ) -> Result<Self, GameSummaryError> {
        let total = u32::try_from(records.len())
            .map_err(|_| GameSummaryError::TooManyRounds { len: records.len() })?;
        let mut correct = 0_u32;
        for record in records {
            if record.outcome.is_correct() {
                correct += 1;
            }
        }

        Self::new(score, correct, total - correct, started_at, completed_at)
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub fn total_rounds(&self) -> u32 {
        self.correct + self.incorrect
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityName, Outcome};
    use crate::time::fixed_now;

    fn record(number: u32, correct: bool) -> RoundRecord {
        let selected = EntityName::new("France").unwrap();
        RoundRecord {
            number,
            target: selected.clone(),
            selected_index: 0,
            outcome: if correct {
                Outcome::Correct { selected }
            } else {
                Outcome::Incorrect { selected }
            },
        }
    }

    #[test]
    fn summary_counts_outcomes() {
        let now = fixed_now();
        let records = vec![record(1, true), record(2, false), record(3, false)];

        let summary = GameSummary::from_records(-1, now, now, &records).unwrap();

        assert_eq!(summary.total_rounds(), 3);
        assert_eq!(summary.correct(), 1);
        assert_eq!(summary.incorrect(), 2);
        assert_eq!(summary.score(), -1);
    }

    #[test]
    fn summary_rejects_inconsistent_score() {
        let now = fixed_now();
        let err = GameSummary::from_records(2, now, now, &[record(1, true)]).unwrap_err();
        assert_eq!(
            err,
            GameSummaryError::ScoreMismatch {
                score: 2,
                correct: 1,
                incorrect: 0
            }
        );
    }

    #[test]
    fn summary_rejects_reversed_times() {
        let now = fixed_now();
        let earlier = now - chrono::Duration::seconds(1);
        let err = GameSummary::new(0, 0, 0, now, earlier).unwrap_err();
        assert_eq!(err, GameSummaryError::InvalidTimeRange);
    }
}
