//! Word pools: loading, normalisation and validation of caller-supplied words.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

const DICTIONARY: &str = include_str!("../word_lists/wordle.txt");
const ANSWERS: &str = include_str!("../word_lists/wordle_answers.txt");

/// Targets evaluated by `--test-set` when no words are given.
pub const DEFAULT_TEST_SET: [&str; 27] = [
    "REBUS", "BOOST", "TRUSS", "SIEGE", "TIGER", "BANAL", "SLUMP", "CRANK", "GORGE", "QUERY",
    "DRINK", "FAVOR", "ABBEY", "TANGY", "PANIC", "SOLAR", "SHIRE", "PROXY", "POINT", "ROBOT",
    "PRICK", "WINCE", "CRIMP", "KNOLL", "SUGAR", "WHACK", "MOUNT",
];

/// Uppercase every token and keep the alphabetic ones of `word_length`
/// letters, sorted and de-duplicated.
pub fn normalize<'a>(tokens: impl IntoIterator<Item = &'a str>, word_length: usize) -> Vec<String> {
    let mut words: Vec<String> = tokens
        .into_iter()
        .map(|token| token.trim().to_ascii_uppercase())
        .filter(|word| word.len() == word_length && word.bytes().all(|b| b.is_ascii_uppercase()))
        .collect();
    words.sort_unstable();
    words.dedup();
    words
}

/// Load a whitespace-delimited word file.
pub fn load_words(path: impl AsRef<Path>, word_length: usize) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    non_empty(normalize(text.split_whitespace(), word_length), word_length)
}

/// The embedded dictionary, used as guess universe.
pub fn load_dictionary(word_length: usize) -> Result<Vec<String>> {
    non_empty(normalize(DICTIONARY.split_whitespace(), word_length), word_length)
}

/// The embedded answer pool, a subset of the embedded dictionary.
pub fn load_answers(word_length: usize) -> Result<Vec<String>> {
    non_empty(normalize(ANSWERS.split_whitespace(), word_length), word_length)
}

fn non_empty(words: Vec<String>, word_length: usize) -> Result<Vec<String>> {
    if words.is_empty() {
        Err(Error::EmptyDictionary(word_length))
    } else {
        Ok(words)
    }
}

/// Check a caller-supplied `word` against the sorted dictionary.
pub fn validate(word: &str, words: &[String], word_length: usize, kind: &'static str) -> Result<()> {
    if word.len() != word_length {
        return Err(Error::WrongLength {
            kind,
            word: word.to_string(),
            expected: word_length,
        });
    }
    if words.binary_search_by(|probe| probe.as_str().cmp(word)).is_err() {
        return Err(Error::NotInDictionary {
            kind,
            word: word.to_string(),
        });
    }
    Ok(())
}
