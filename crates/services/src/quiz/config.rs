use crate::error::ConfigError;

/// Rounds per game when nothing else is configured.
pub const DEFAULT_TOTAL_ROUNDS: u32 = 8;

/// Game settings fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    total_rounds: u32,
}

impl QuizConfig {
    /// Creates a validated config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTotalRounds` if `total_rounds` is zero.
    pub fn new(total_rounds: u32) -> Result<Self, ConfigError> {
        if total_rounds == 0 {
            return Err(ConfigError::InvalidTotalRounds);
        }
        Ok(Self { total_rounds })
    }

    #[must_use]
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_TOTAL_ROUNDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_eight_rounds() {
        assert_eq!(QuizConfig::default().total_rounds(), 8);
    }

    #[test]
    fn zero_rounds_rejected() {
        assert_eq!(QuizConfig::new(0), Err(ConfigError::InvalidTotalRounds));
        assert_eq!(QuizConfig::new(3).unwrap().total_rounds(), 3);
    }
}
