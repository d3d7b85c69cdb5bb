use std::fmt;
use std::io::{self, BufRead, Write};

use flag_core::model::CHOICES_PER_ROUND;
use services::{QuizError, QuizSession};

#[derive(Debug)]
pub(crate) enum PlayError {
    Io(io::Error),
    Quiz(QuizError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::Io(err) => write!(f, "terminal i/o failed: {err}"),
            PlayError::Quiz(err) => write!(f, "quiz error: {err}"),
        }
    }
}

impl std::error::Error for PlayError {}

impl From<io::Error> for PlayError {
    fn from(err: io::Error) -> Self {
        PlayError::Io(err)
    }
}

impl From<QuizError> for PlayError {
    fn from(err: QuizError) -> Self {
        PlayError::Quiz(err)
    }
}

/// Plays games until the player declines a restart or input ends.
///
/// Flags are shown by their descriptions only; the country name is the
/// question.
pub(crate) fn run_game<R: BufRead, W: Write>(
    session: &mut QuizSession,
    input: &mut R,
    out: &mut W,
) -> Result<(), PlayError> {
    session.start()?;

    loop {
        while !session.is_over() {
            render_round(session, out)?;
            let Some(index) = prompt_choice(input, out)? else {
                return Ok(());
            };

            let outcome = session.select_choice(index)?;
            writeln!(out, "{}", outcome.headline())?;
            writeln!(out, "{}", outcome.message())?;
            writeln!(out, "Score: {}", session.score())?;
            write!(out, "Press Enter to continue ")?;
            out.flush()?;
            if read_line(input)?.is_none() {
                return Ok(());
            }

            session.advance_round()?;
        }

        writeln!(out)?;
        writeln!(out, "GAME OVER")?;
        writeln!(out, "Your score is {}", session.score())?;
        if let Some(summary) = session.summary() {
            writeln!(
                out,
                "{} right, {} wrong",
                summary.correct(),
                summary.incorrect()
            )?;
        }
        write!(out, "Restart? [y/N] ")?;
        out.flush()?;

        match read_line(input)? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => {
                session.reset()?;
            }
            _ => return Ok(()),
        }
    }
}

fn render_round<W: Write>(session: &QuizSession, out: &mut W) -> io::Result<()> {
    let Some(round) = session.current_round() else {
        return Ok(());
    };
    let number = session.total_rounds() - session.rounds_remaining() + 1;

    writeln!(out)?;
    writeln!(out, "Guess the Flag ({number}/{})", session.total_rounds())?;
    writeln!(out, "Tap the flag of {}", round.target().name())?;
    for (i, entity) in round.choices().iter().enumerate() {
        writeln!(out, "  {}) {}", i + 1, entity.label())?;
    }
    writeln!(out, "Score: {}", session.score())
}

/// Reads until the player names a displayed flag. Invalid input never reaches
/// the session.
fn prompt_choice<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<usize>> {
    loop {
        write!(out, "Your choice [1-{CHOICES_PER_ROUND}]: ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.parse::<usize>() {
            Ok(n) if (1..=CHOICES_PER_ROUND).contains(&n) => return Ok(Some(n - 1)),
            _ => writeln!(out, "Please enter a number from 1 to {CHOICES_PER_ROUND}.")?,
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
