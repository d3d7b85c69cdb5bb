#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;
pub mod random;

pub use flag_core::Clock;

pub use error::{ConfigError, QuizError};
pub use quiz::{Operation, QuizConfig, QuizSession, SessionPhase, SessionProgress, SessionState};
pub use random::{RandomSource, RngSource};
