use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, info};

use flag_core::Clock;
use flag_core::model::{
    CHOICES_PER_ROUND, Catalog, Entity, GameSummary, Outcome, Round, RoundRecord,
};

use super::config::QuizConfig;
use super::draw::RoundDrawer;
use super::progress::SessionProgress;
use super::state::{Operation, SessionPhase, SessionState};
use crate::error::QuizError;
use crate::random::{RandomSource, RngSource};

/// Owns the state of one flag-quiz game and is its only mutator.
///
/// The caller drives a two-step cycle per round: [`select_choice`] reports the
/// outcome of a tap, and [`advance_round`] moves on once the feedback has been
/// acknowledged. Calls made out of order are rejected with
/// [`QuizError::InvalidState`] and leave the session unchanged.
///
/// [`select_choice`]: QuizSession::select_choice
/// [`advance_round`]: QuizSession::advance_round
pub struct QuizSession {
    catalog: Catalog,
    config: QuizConfig,
    random: Box<dyn RandomSource>,
    clock: Clock,
    phase: SessionPhase,
    score: i32,
    rounds_remaining: u32,
    current_round: Option<Round>,
    last_outcome: Option<Outcome>,
    records: Vec<RoundRecord>,
    started_at: Option<DateTime<Utc>>,
    summary: Option<GameSummary>,
}

impl QuizSession {
    /// Create a session that has not started yet, drawing from the thread RNG.
    #[must_use]
    pub fn new(catalog: Catalog, config: QuizConfig) -> Self {
        Self {
            catalog,
            rounds_remaining: config.total_rounds(),
            config,
            random: Box::new(RngSource::thread()),
            clock: Clock::default(),
            phase: SessionPhase::NotStarted,
            score: 0,
            current_round: None,
            last_outcome: None,
            records: Vec::new(),
            started_at: None,
            summary: None,
        }
    }

    #[must_use]
    pub fn with_random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Box::new(random);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Reset every field to its default and draw the first round.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Round` if the random source produced an invalid round;
    /// the session is unchanged in that case.
    pub fn start(&mut self) -> Result<&Round, QuizError> {
        let round = RoundDrawer::new(&self.catalog).draw(self.random.as_mut())?;
        let started_at = self.clock.now();

        self.score = 0;
        self.rounds_remaining = self.config.total_rounds();
        self.last_outcome = None;
        self.records.clear();
        self.started_at = Some(started_at);
        self.summary = None;
        self.phase = SessionPhase::AwaitingSelection;

        info!(
            total_rounds = self.rounds_remaining,
            catalog_len = self.catalog.len(),
            "quiz started"
        );
        debug!(target_name = %round.target().name(), "round drawn");
        let round: &Round = self.current_round.insert(round);
        Ok(round)
    }

    /// Start over; allowed in every phase.
    ///
    /// # Errors
    ///
    /// Same as [`QuizSession::start`].
    pub fn reset(&mut self) -> Result<&Round, QuizError> {
        info!(previous_score = self.score, phase = %self.phase, "quiz reset");
        self.start()
    }

    /// Score the tapped flag and report the outcome. The round stays in place
    /// until [`QuizSession::advance_round`] is called.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidState` unless a selection is awaited, and
    /// `QuizError::InvalidChoice` if `index` is not a displayed position.
    pub fn select_choice(&mut self, index: usize) -> Result<Outcome, QuizError> {
        self.require(Operation::SelectChoice)?;
        let round = self.current_round.as_ref().ok_or(QuizError::InvalidState {
            operation: Operation::SelectChoice,
            phase: self.phase,
        })?;
        let selected = round.choice(index).ok_or(QuizError::InvalidChoice {
            index,
            choices: CHOICES_PER_ROUND,
        })?;

        let selected = selected.name().clone();
        let outcome = if round.is_correct(index) {
            Outcome::Correct { selected }
        } else {
            Outcome::Incorrect { selected }
        };
        let record = RoundRecord {
            number: self.config.total_rounds() - self.rounds_remaining + 1,
            target: round.target().name().clone(),
            selected_index: index,
            outcome: outcome.clone(),
        };

        self.score += outcome.score_delta();
        self.records.push(record);
        self.last_outcome = Some(outcome.clone());
        self.phase = SessionPhase::AwaitingAdvance;

        debug!(index, correct = outcome.is_correct(), score = self.score, "choice selected");
        Ok(outcome)
    }

    /// Close the answered round. Returns the next round, or `None` once the
    /// last round has been played and the game is over.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidState` unless an outcome is awaiting
    /// acknowledgement, and `QuizError::Round`/`QuizError::Summary` if the next
    /// round or the final summary cannot be built; the session is unchanged then.
    pub fn advance_round(&mut self) -> Result<Option<&Round>, QuizError> {
        self.require(Operation::AdvanceRound)?;
        let remaining = self.rounds_remaining.saturating_sub(1);

        if remaining == 0 {
            let completed_at = self.clock.now();
            let started_at = self.started_at.unwrap_or(completed_at);
            let summary =
                GameSummary::from_records(self.score, started_at, completed_at, &self.records)?;

            self.rounds_remaining = 0;
            self.current_round = None;
            self.phase = SessionPhase::GameOver;
            info!(
                score = summary.score(),
                correct = summary.correct(),
                incorrect = summary.incorrect(),
                "game over"
            );
            self.summary = Some(summary);
            return Ok(None);
        }

        let round = RoundDrawer::new(&self.catalog).draw(self.random.as_mut())?;
        self.rounds_remaining = remaining;
        self.phase = SessionPhase::AwaitingSelection;
        debug!(
            rounds_remaining = remaining,
            target_name = %round.target().name(),
            "round drawn"
        );
        let round: &Round = self.current_round.insert(round);
        Ok(Some(round))
    }

    fn require(&self, operation: Operation) -> Result<(), QuizError> {
        if self.phase == operation.required_phase() {
            Ok(())
        } else {
            Err(QuizError::InvalidState {
                operation,
                phase: self.phase,
            })
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub fn rounds_remaining(&self) -> u32 {
        self.rounds_remaining
    }

    #[must_use]
    pub fn total_rounds(&self) -> u32 {
        self.config.total_rounds()
    }

    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.current_round.as_ref()
    }

    /// The entity whose flag the player has to find.
    #[must_use]
    pub fn target(&self) -> Option<&Entity> {
        self.current_round.as_ref().map(Round::target)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    #[must_use]
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Answered rounds of the current game, oldest first.
    #[must_use]
    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    /// Present once the game is over.
    #[must_use]
    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns a snapshot of the observable state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState {
            score: self.score,
            rounds_remaining: self.rounds_remaining,
            current_round: self.current_round.clone(),
            is_over: self.is_over(),
        }
    }

    /// Returns a summary of the current game progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.config.total_rounds();
        let answered = u32::try_from(self.records.len()).unwrap_or(u32::MAX);
        SessionProgress {
            total,
            answered,
            remaining: self.rounds_remaining,
            is_complete: self.is_over(),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("catalog_len", &self.catalog.len())
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("score", &self.score)
            .field("rounds_remaining", &self.rounds_remaining)
            .field("current_round", &self.current_round)
            .field("records_len", &self.records.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use flag_core::time::{fixed_clock, fixed_now};

    fn build_session(total_rounds: u32) -> QuizSession {
        QuizSession::new(Catalog::flags(), QuizConfig::new(total_rounds).unwrap())
            .with_random(RngSource::seeded(11))
            .with_clock(fixed_clock())
    }

    fn wrong_index(session: &QuizSession) -> usize {
        (session.current_round().unwrap().correct_index() + 1) % CHOICES_PER_ROUND
    }

    #[test]
    fn new_session_waits_for_start() {
        let mut session = build_session(3);
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert!(session.current_round().is_none());

        let err = session.select_choice(0).unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidState {
                operation: Operation::SelectChoice,
                phase: SessionPhase::NotStarted,
            }
        );
        assert!(session.advance_round().is_err());
    }

    #[test]
    fn start_draws_first_round() {
        let mut session = build_session(3);
        let round = session.start().unwrap().clone();

        assert_eq!(session.phase(), SessionPhase::AwaitingSelection);
        assert_eq!(session.current_round(), Some(&round));
        assert_eq!(session.target(), Some(round.target()));
        assert_eq!(session.rounds_remaining(), 3);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn select_does_not_advance() {
        let mut session = build_session(3);
        let round = session.start().unwrap().clone();

        let outcome = session.select_choice(round.correct_index()).unwrap();
        assert!(outcome.is_correct());
        assert_eq!(outcome.selected(), round.target().name());
        assert_eq!(session.phase(), SessionPhase::AwaitingAdvance);
        assert_eq!(session.current_round(), Some(&round));
        assert_eq!(session.rounds_remaining(), 3);
        assert_eq!(session.last_outcome(), Some(&outcome));

        let err = session.select_choice(0).unwrap_err();
        assert!(matches!(err, QuizError::InvalidState { .. }));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn out_of_range_choice_leaves_state_alone() {
        let mut session = build_session(3);
        session.start().unwrap();
        let before = session.state();

        let err = session.select_choice(3).unwrap_err();
        assert_eq!(err, QuizError::InvalidChoice { index: 3, choices: 3 });
        assert_eq!(session.state(), before);
        assert_eq!(session.phase(), SessionPhase::AwaitingSelection);
    }

    #[test]
    fn last_advance_ends_game_with_summary() {
        let mut session = build_session(2);
        session.start().unwrap();

        session.select_choice(wrong_index(&session)).unwrap();
        assert!(session.advance_round().unwrap().is_some());
        assert_eq!(session.rounds_remaining(), 1);

        let correct = session.current_round().unwrap().correct_index();
        session.select_choice(correct).unwrap();
        assert!(session.advance_round().unwrap().is_none());

        assert!(session.is_over());
        assert!(session.current_round().is_none());
        assert_eq!(session.rounds_remaining(), 0);
        assert_eq!(session.score(), 0);

        let summary = session.summary().unwrap();
        assert_eq!(summary.correct(), 1);
        assert_eq!(summary.incorrect(), 1);
        assert_eq!(summary.started_at(), fixed_now());
        assert_eq!(summary.completed_at(), fixed_now());

        let numbers: Vec<u32> = session.records().iter().map(|r| r.number).collect();
        assert_eq!(numbers, [1, 2]);

        let err = session.advance_round().unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidState {
                operation: Operation::AdvanceRound,
                phase: SessionPhase::GameOver,
            }
        );
    }

    #[test]
    fn progress_tracks_answers() {
        let mut session = build_session(4);
        session.start().unwrap();
        session.select_choice(0).unwrap();
        session.advance_round().unwrap();

        assert_eq!(
            session.progress(),
            SessionProgress {
                total: 4,
                answered: 1,
                remaining: 3,
                is_complete: false,
            }
        );
    }

    #[test]
    fn reset_mid_round_starts_fresh() {
        let mut session = build_session(3);
        session.start().unwrap();
        session.select_choice(wrong_index(&session)).unwrap();
        assert_eq!(session.score(), -1);

        session.reset().unwrap();
        assert_eq!(session.phase(), SessionPhase::AwaitingSelection);
        assert_eq!(session.score(), 0);
        assert_eq!(session.rounds_remaining(), 3);
        assert!(session.records().is_empty());
        assert!(session.last_outcome().is_none());
    }
}
