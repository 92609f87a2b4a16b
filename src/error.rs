//! Errors raised by the solver.
//!
//! Configuration errors (a bad target or preloaded guess) abort a run.
//! Response errors are recoverable: the simulator reports them back to the
//! feedback source and asks again without spending a round.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied word does not have the session's word length.
    #[error("{kind} \"{word}\" is the wrong length! Expected {expected} characters.")]
    WrongLength {
        kind: &'static str,
        word: String,
        expected: usize,
    },

    /// A caller-supplied word is not in the active dictionary.
    #[error("{kind} \"{word}\" is not a word!")]
    NotInDictionary { kind: &'static str, word: String },

    #[error("word length {0} is not supported (expected 1 to {max})", max = crate::MAX_WORD_LENGTH)]
    UnsupportedLength(usize),

    #[error("a game needs at least one round")]
    NoRounds,

    /// A guess handed to the engine that is not all uppercase ASCII letters.
    #[error("guess {0:?} must be uppercase letters A-Z")]
    InvalidGuess(String),

    #[error("no words of length {0} were loaded")]
    EmptyDictionary(usize),

    /// Feedback text with the wrong length or an unknown mark.
    #[error("unable to parse response {0:?}")]
    UnparseableResponse(String),

    /// The response contradicts itself.
    #[error("response is not self consistent")]
    InconsistentResponse,

    /// The response contradicts what earlier rounds established.
    #[error("response is not consistent with current state")]
    ConflictingResponse,

    #[error("input closed before the game finished")]
    InputClosed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether the error only rejects one response and the game can carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::UnparseableResponse(_) | Error::InconsistentResponse | Error::ConflictingResponse
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
