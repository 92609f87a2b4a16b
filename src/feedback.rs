//! Feedback calculation for guesses.
//!
//! This module scores a guess against a target word and handles the two
//! textual encodings of a response: letter codes (`g`/`y`/`b`) and glyphs.

use crate::error::{Error, Result};
use crate::letter_index;
use serde::{Serialize, Serializer};
use std::fmt;

/// The verdict for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Correct letter in correct position (green)
    Right,
    /// Letter occurs elsewhere in the word (yellow)
    Close,
    /// Letter not in word, or all its occurrences accounted for (gray)
    Wrong,
}

impl Mark {
    fn value(self) -> u32 {
        match self {
            Mark::Wrong => 0,
            Mark::Close => 1,
            Mark::Right => 2,
        }
    }

    fn from_value(value: u32) -> Self {
        match value {
            0 => Mark::Wrong,
            1 => Mark::Close,
            _ => Mark::Right,
        }
    }

    /// Letter code used in plain-text output.
    pub fn to_char(self) -> char {
        match self {
            Mark::Right => 'g',
            Mark::Close => 'y',
            Mark::Wrong => 'b',
        }
    }

    /// Colored square used in emoji output.
    pub fn to_glyph(self) -> char {
        match self {
            Mark::Right => '🟩',
            Mark::Close => '🟨',
            Mark::Wrong => '⬛',
        }
    }

    /// Parse from a letter code (g=green, y=yellow, b=black) or a glyph.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' | '2' | '🟩' => Some(Mark::Right),
            'y' | '1' | '🟨' => Some(Mark::Close),
            'b' | 'x' | '0' | '⬛' | '⬜' => Some(Mark::Wrong),
            _ => None,
        }
    }
}

/// A complete response for one guess.
///
/// Marks are packed base 3 into a `u32`, first position least significant,
/// which is why words are limited to [`crate::MAX_WORD_LENGTH`] letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Response {
    len: u8,
    code: u32,
}

impl Response {
    /// Pack `marks`, first mark first.
    pub fn new(marks: &[Mark]) -> Self {
        debug_assert!(marks.len() <= crate::MAX_WORD_LENGTH);
        let mut code = 0;
        let mut multiplier = 1;
        for mark in marks {
            code += mark.value() * multiplier;
            multiplier *= 3;
        }
        Self {
            len: marks.len() as u8,
            code,
        }
    }

    /// The all-right response for words of `len` letters.
    pub fn win(len: usize) -> Self {
        Self::new(&vec![Mark::Right; len])
    }

    /// Score `guess` against `target`.
    ///
    /// Exact matches are taken first and consume their letter on both sides;
    /// only then do the remaining guess letters claim the remaining target
    /// letters, left to right, one occurrence each.
    ///
    /// # Panics
    ///
    /// Both words must be uppercase ASCII of the same length, as every word
    /// from [`crate::words`] is. Anything else panics.
    pub fn calculate(guess: &str, target: &str) -> Self {
        let guess = guess.as_bytes();
        let target = target.as_bytes();
        debug_assert_eq!(guess.len(), target.len());

        let mut marks = vec![Mark::Wrong; guess.len()];
        let mut target_remaining = [0u8; 26];

        for i in 0..guess.len() {
            if guess[i] == target[i] {
                marks[i] = Mark::Right;
            } else {
                target_remaining[letter_index(target[i])] += 1;
            }
        }

        for i in 0..guess.len() {
            if marks[i] != Mark::Right {
                let idx = letter_index(guess[i]);
                if target_remaining[idx] > 0 {
                    marks[i] = Mark::Close;
                    target_remaining[idx] -= 1;
                }
            }
        }

        Self::new(&marks)
    }

    /// Parse a response like "gybbb" or "🟩🟨⬛⬛⬛" for a word of `len` letters.
    pub fn parse(text: &str, len: usize) -> Result<Self> {
        let text = text.trim();
        let marks = text
            .chars()
            .map(Mark::from_char)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::UnparseableResponse(text.to_string()))?;
        if marks.len() != len {
            return Err(Error::UnparseableResponse(text.to_string()));
        }
        Ok(Self::new(&marks))
    }

    /// Number of marks.
    pub fn len(self) -> usize {
        self.len as usize
    }

    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Unpack the marks, first position first.
    pub fn marks(self) -> Vec<Mark> {
        let mut code = self.code;
        (0..self.len)
            .map(|_| {
                let mark = Mark::from_value(code % 3);
                code /= 3;
                mark
            })
            .collect()
    }

    /// Every position is right.
    pub fn is_win(self) -> bool {
        self.code == 3u32.pow(self.len as u32) - 1
    }

    /// Render as colored squares.
    pub fn to_emoji_string(self) -> String {
        self.marks().into_iter().map(Mark::to_glyph).collect()
    }

    /// Render with glyphs or letter codes.
    pub fn render(self, emoji: bool) -> String {
        if emoji {
            self.to_emoji_string()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.marks().into_iter().map(Mark::to_char).collect();
        f.write_str(&text)
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Responses for every pair of words, one row per target and one column
/// per guess.
pub fn response_matrix(words: &[String]) -> Vec<Vec<Response>> {
    words
        .iter()
        .map(|target| {
            words
                .iter()
                .map(|guess| Response::calculate(guess, target))
                .collect()
        })
        .collect()
}
