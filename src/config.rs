//! Tunables for a solving session.

use crate::error::{Error, Result};
use crate::MAX_WORD_LENGTH;

/// Session settings. The ranking knobs default to the values the solver
/// was tuned with; most callers only change `word_length` and `rounds`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Letters per word.
    pub word_length: usize,
    /// Round budget before a game is lost.
    pub rounds: usize,
    /// Size of the shortlist logged by the selector.
    pub top_choices: usize,
    /// Decimal places kept on partition scores.
    pub rank_precision: i32,
    /// Target pools larger than this are sampled instead of enumerated.
    pub sample_threshold: usize,
    /// Consecutive samples without a new response before sampling stops.
    pub sample_patience: usize,
    /// Below this many candidates, guesses are ranked among the candidates only.
    pub try_to_win_below: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_length: crate::DEFAULT_WORD_LENGTH,
            rounds: crate::DEFAULT_ROUNDS,
            top_choices: 5,
            rank_precision: 4,
            sample_threshold: 100,
            sample_patience: 10,
            try_to_win_below: 10,
        }
    }
}

impl Config {
    /// Default tuning with the given word length and round budget.
    pub fn new(word_length: usize, rounds: usize) -> Result<Self> {
        let config = Self {
            word_length,
            rounds,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Word length must fit a [`crate::Response`] and at least one round
    /// must be allowed.
    pub fn validate(&self) -> Result<()> {
        if self.word_length == 0 || self.word_length > MAX_WORD_LENGTH {
            return Err(Error::UnsupportedLength(self.word_length));
        }
        if self.rounds == 0 {
            return Err(Error::NoRounds);
        }
        Ok(())
    }
}
