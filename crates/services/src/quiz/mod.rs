mod config;
mod draw;
mod progress;
mod service;
mod state;

// Public API of the quiz subsystem.
pub use config::{DEFAULT_TOTAL_ROUNDS, QuizConfig};
pub use progress::SessionProgress;
pub use service::QuizSession;
pub use state::{Operation, SessionPhase, SessionState};
