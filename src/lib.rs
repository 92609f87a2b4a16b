//! # Wordle Solver
//!
//! A constraint-based Wordle solver.
//!
//! Knowledge from each response is kept as a per-position set of allowed
//! letters plus minimum letter counts ([`State`]). Remaining candidates are
//! the words that knowledge allows, and the next guess is the one whose
//! responses split the candidates into the most distinct buckets.
//!
//! Words are uppercase ASCII throughout; [`words::normalize`] takes care of
//! that for anything loaded from outside.

pub mod config;
pub mod error;
pub mod feedback;
pub mod optimal;
pub mod ranking;
pub mod solver;
pub mod state;
pub mod words;

pub use config::Config;
pub use error::{Error, Result};
pub use feedback::{response_matrix, Mark, Response};
pub use optimal::{compute_optimal, Node, ResponseTable, Trie};
pub use ranking::{choose_word, count_partitions, rank_word, rank_words, Ranking, SeededShuffle};
pub use solver::{BatchReport, FeedbackSource, Game, Outcome, Reply, Solver, Target};
pub use state::{filter_words, LetterSet, State};

/// Word length of classic Wordle.
pub const DEFAULT_WORD_LENGTH: usize = 5;

/// Guesses allowed in classic Wordle.
pub const DEFAULT_ROUNDS: usize = 6;

/// Longest word a [`Response`] can describe.
pub const MAX_WORD_LENGTH: usize = 20;

pub(crate) const ALPHABET_SIZE: usize = 26;

/// Position of an uppercase ASCII letter in the alphabet.
#[inline]
pub(crate) fn letter_index(letter: u8) -> usize {
    debug_assert!(letter.is_ascii_uppercase(), "{letter} is not an uppercase letter");
    (letter - b'A') as usize
}
