//! The knowledge model: which letters each position still admits and how
//! often each letter must occur.
//!
//! A [`State`] is built per response with [`State::from_response`] and folded
//! into the running knowledge with [`State::merge`], which returns a new
//! state so earlier ones stay intact.

use crate::error::{Error, Result};
use crate::feedback::{Mark, Response};
use crate::{letter_index, ALPHABET_SIZE};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A set of letters A-Z as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LetterSet(u32);

impl LetterSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self((1 << ALPHABET_SIZE) - 1);

    pub fn only(letter: u8) -> Self {
        Self(1 << letter_index(letter))
    }

    pub fn contains(self, letter: u8) -> bool {
        self.0 & (1 << letter_index(letter)) != 0
    }

    pub fn with(self, letter: u8) -> Self {
        Self(self.0 | (1 << letter_index(letter)))
    }

    pub fn without(self, letter: u8) -> Self {
        Self(self.0 & !(1 << letter_index(letter)))
    }

    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in alphabetical order.
    pub fn letters(self) -> impl Iterator<Item = u8> {
        (b'A'..b'A' + ALPHABET_SIZE as u8).filter(move |&letter| self.contains(letter))
    }
}

impl fmt::Display for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters: String = self.letters().map(char::from).collect();
        f.write_str(&letters)
    }
}

/// Accumulated knowledge about the target word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    spots: Vec<LetterSet>,
    required: [u8; ALPHABET_SIZE],
    blocklist: BTreeSet<String>,
}

impl State {
    /// Nothing known yet: every position admits every letter.
    pub fn new(word_length: usize) -> Self {
        Self {
            spots: vec![LetterSet::ALL; word_length],
            required: [0; ALPHABET_SIZE],
            blocklist: BTreeSet::new(),
        }
    }

    /// Knowledge that only rules out `word` itself.
    pub fn blocking(word_length: usize, word: &str) -> Self {
        let mut state = Self::new(word_length);
        state.blocklist.insert(word.to_string());
        state
    }

    /// Parse feedback text for `guess` into the knowledge it carries.
    pub fn parse(guess: &str, text: &str) -> Result<Self> {
        let response = Response::parse(text, guess.len())?;
        Self::from_response(guess, response)
    }

    /// The knowledge carried by one response to `guess`.
    ///
    /// A letter that is wrong somewhere and never close in this same
    /// response is absent from every unsolved position. A letter that is
    /// both wrong and close only rules out the wrong position: it occurs,
    /// just not more often than already placed.
    pub fn from_response(guess: &str, response: Response) -> Result<Self> {
        if !guess.bytes().all(|letter| letter.is_ascii_uppercase()) {
            return Err(Error::InvalidGuess(guess.to_string()));
        }
        if response.len() != guess.len() {
            return Err(Error::UnparseableResponse(response.to_string()));
        }
        let mut state = Self::new(guess.len());
        let mut wrong = LetterSet::EMPTY;
        let mut close = LetterSet::EMPTY;
        for (index, (&letter, mark)) in guess.as_bytes().iter().zip(response.marks()).enumerate() {
            match mark {
                Mark::Wrong => {
                    state.mark_wrong(letter, index);
                    wrong = wrong.with(letter);
                }
                Mark::Close => {
                    state.mark_close(letter, index);
                    close = close.with(letter);
                }
                Mark::Right => state.mark_right(letter, index),
            }
        }
        for letter in wrong.difference(close).letters() {
            state.mark_wrong_everywhere(letter);
        }
        Ok(state)
    }

    pub fn word_length(&self) -> usize {
        self.spots.len()
    }

    /// Letters each position still admits.
    pub fn spots(&self) -> &[LetterSet] {
        &self.spots
    }

    /// Minimum number of times `letter` must occur.
    pub fn required(&self, letter: u8) -> usize {
        self.required[letter_index(letter)] as usize
    }

    /// Words known not to be the target.
    pub fn blocklist(&self) -> &BTreeSet<String> {
        &self.blocklist
    }

    /// `letter` is not at `index`.
    pub fn mark_wrong(&mut self, letter: u8, index: usize) {
        self.spots[index] = self.spots[index].without(letter);
    }

    /// `letter` occurs once more, but not at `index`.
    pub fn mark_close(&mut self, letter: u8, index: usize) {
        self.spots[index] = self.spots[index].without(letter);
        self.required[letter_index(letter)] += 1;
    }

    /// `letter` is at `index`.
    pub fn mark_right(&mut self, letter: u8, index: usize) {
        self.spots[index] = LetterSet::only(letter);
        self.required[letter_index(letter)] += 1;
    }

    /// Drop `letter` from every position that is not already solved.
    pub fn mark_wrong_everywhere(&mut self, letter: u8) {
        for spot in self.spots.iter_mut() {
            if spot.len() > 1 {
                *spot = spot.without(letter);
            }
        }
    }

    /// Combine two states: spots intersect, requirements take the larger
    /// count, blocklists union.
    pub fn merge(&self, other: &State) -> State {
        debug_assert_eq!(self.word_length(), other.word_length());
        let spots = self
            .spots
            .iter()
            .zip(&other.spots)
            .map(|(a, b)| a.intersect(*b))
            .collect();
        let mut required = self.required;
        for (count, &theirs) in required.iter_mut().zip(&other.required) {
            *count = (*count).max(theirs);
        }
        let blocklist = self.blocklist.union(&other.blocklist).cloned().collect();
        State {
            spots,
            required,
            blocklist,
        }
    }

    /// Whether some word could still satisfy this state.
    pub fn is_consistent(&self) -> bool {
        if self.spots.iter().any(|spot| spot.is_empty()) {
            return false;
        }
        let total: usize = self.required.iter().map(|&count| count as usize).sum();
        if total > self.word_length() {
            return false;
        }
        (b'A'..b'A' + ALPHABET_SIZE as u8)
            .all(|letter| self.required(letter) <= self.count_spots_with_letter(letter))
    }

    /// Positions that still admit `letter`.
    pub fn count_spots_with_letter(&self, letter: u8) -> usize {
        self.spots.iter().filter(|spot| spot.contains(letter)).count()
    }

    /// Whether `word` could be the target given this knowledge.
    pub fn allows(&self, word: &str) -> bool {
        let bytes = word.as_bytes();
        if bytes.len() != self.word_length() || self.blocklist.contains(word) {
            return false;
        }
        if !bytes
            .iter()
            .zip(&self.spots)
            .all(|(&letter, spot)| letter.is_ascii_uppercase() && spot.contains(letter))
        {
            return false;
        }
        let mut counts = [0u8; ALPHABET_SIZE];
        for &letter in bytes {
            counts[letter_index(letter)] += 1;
        }
        counts.iter().zip(&self.required).all(|(have, need)| have >= need)
    }

    fn required_map(&self) -> BTreeMap<char, u8> {
        (b'A'..b'A' + ALPHABET_SIZE as u8)
            .filter(|&letter| self.required(letter) > 0)
            .map(|letter| (char::from(letter), self.required[letter_index(letter)]))
            .collect()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options: Vec<String> = self.spots.iter().map(|spot| spot.to_string()).collect();
        write!(f, "Required: {:?}, Options: {:?}", self.required_map(), options)?;
        if !self.blocklist.is_empty() {
            write!(f, ", Blocked: {:?}", self.blocklist)?;
        }
        Ok(())
    }
}

/// The words from `words` that `state` still allows, in their original order.
pub fn filter_words(words: &[String], state: &State) -> Vec<String> {
    words
        .iter()
        .filter(|word| state.allows(word))
        .cloned()
        .collect()
}
