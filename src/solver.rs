//! The game loop: guess, collect feedback, update knowledge, repeat.
//!
//! Feedback comes from a [`FeedbackSource`], either a known target word
//! (simulation) or a person answering a prompt. Bad feedback never costs a
//! round and never touches the running knowledge.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::feedback::Response;
use crate::ranking::{choose_word, rank_words};
use crate::state::{filter_words, State};
use crate::words;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::VecDeque;

/// What a feedback source said about a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The guess was rejected as not a word.
    NotAWord,
    /// Feedback text still to be parsed.
    Text(String),
    Response(Response),
}

/// Supplies feedback for each guess.
pub trait FeedbackSource {
    fn reply(&mut self, round: usize, guess: &str) -> Result<Reply>;

    /// Called when a reply was rejected; the same round is played again.
    fn rejected(&mut self, _guess: &str, _error: &Error) {}
}

/// Scores guesses against a known target.
#[derive(Debug, Clone, Copy)]
pub struct Target<'a>(pub &'a str);

impl FeedbackSource for Target<'_> {
    fn reply(&mut self, _round: usize, guess: &str) -> Result<Reply> {
        Ok(Reply::Response(Response::calculate(guess, self.0)))
    }

    fn rejected(&mut self, guess: &str, error: &Error) {
        warn!("{}: rejected feedback for {}: {}", self.0, guess, error);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won { round: usize },
    /// No candidate guess was left.
    NoGuess,
    /// The round budget ran out.
    OutOfRounds,
}

/// A finished game and the accepted (guess, response) pairs that led there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub outcome: Outcome,
    pub history: Vec<(String, Response)>,
}

impl Game {
    /// The winning round, if the game was won.
    pub fn round(&self) -> Option<usize> {
        match self.outcome {
            Outcome::Won { round } => Some(round),
            Outcome::NoGuess | Outcome::OutOfRounds => None,
        }
    }

    pub fn is_win(&self) -> bool {
        self.round().is_some()
    }
}

/// Drives games over a dictionary and an optional narrower answer pool.
#[derive(Debug, Clone)]
pub struct Solver {
    config: Config,
    dictionary: Vec<String>,
    answers: Option<Vec<String>>,
}

impl Solver {
    /// Word lists may come in any order; they are kept sorted and
    /// de-duplicated from here on.
    pub fn new(config: Config, mut dictionary: Vec<String>, mut answers: Option<Vec<String>>) -> Result<Self> {
        config.validate()?;
        dictionary.sort_unstable();
        dictionary.dedup();
        if let Some(answers) = answers.as_mut() {
            answers.sort_unstable();
            answers.dedup();
        }
        if dictionary.is_empty() {
            return Err(Error::EmptyDictionary(config.word_length));
        }
        Ok(Self {
            config,
            dictionary,
            answers,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Words that may be guessed, sorted.
    pub fn dictionary(&self) -> &[String] {
        &self.dictionary
    }

    /// Words that may be the target.
    pub fn answers(&self) -> &[String] {
        self.answers.as_deref().unwrap_or(&self.dictionary)
    }

    /// Drop a word that turned out not to be accepted as a guess.
    pub fn remove_from_dictionary(&mut self, word: &str) {
        self.dictionary.retain(|w| w != word);
    }

    /// No-op when the dictionary doubles as the answer pool.
    pub fn remove_from_answers(&mut self, word: &str) {
        if let Some(answers) = self.answers.as_mut() {
            answers.retain(|w| w != word);
        }
    }

    /// Check a target or preloaded guess against the dictionary.
    pub fn validate(&self, word: &str, kind: &'static str) -> Result<()> {
        words::validate(word, &self.dictionary, self.config.word_length, kind)
    }

    /// The preloaded guess if any is queued, else the best ranked one.
    pub fn next_guess(&self, remaining: &[String], state: &State, queue: &mut VecDeque<String>) -> Option<String> {
        if let Some(guess) = queue.pop_front() {
            debug!(
                "Preloading \"{}\" (with {} remaining), current knowledge: {}",
                guess,
                remaining.len(),
                state
            );
            return Some(guess);
        }
        let ranking = rank_words(&self.dictionary, remaining, state, &self.config);
        choose_word(&ranking, &self.config)
    }

    /// Play one game, opening with `guesses` before any ranking happens.
    ///
    /// Only errors from the source itself are returned; rejected feedback
    /// is reported through [`FeedbackSource::rejected`].
    pub fn play(&mut self, source: &mut impl FeedbackSource, guesses: &[String]) -> Result<Game> {
        for guess in guesses {
            self.validate(guess, "Guess")?;
        }
        let word_length = self.config.word_length;
        let mut knowledge = State::new(word_length);
        let mut remaining = filter_words(self.answers(), &knowledge);
        let mut queue: VecDeque<String> = guesses.iter().cloned().collect();
        let mut history = Vec::new();
        let mut round = 1;

        loop {
            let Some(guess) = self.next_guess(&remaining, &knowledge, &mut queue) else {
                return Ok(Game {
                    outcome: Outcome::NoGuess,
                    history,
                });
            };

            let response = match source.reply(round, &guess)? {
                Reply::NotAWord => {
                    self.remove_from_dictionary(&guess);
                    self.remove_from_answers(&guess);
                    knowledge = knowledge.merge(&State::blocking(word_length, &guess));
                    remaining.retain(|word| *word != guess);
                    continue;
                }
                Reply::Text(text) => match Response::parse(&text, word_length) {
                    Ok(response) => response,
                    Err(err) => {
                        source.rejected(&guess, &err);
                        continue;
                    }
                },
                Reply::Response(response) => response,
            };

            let updated = match Self::absorb(&knowledge, &guess, response) {
                Ok(updated) => updated,
                Err(err) => {
                    source.rejected(&guess, &err);
                    continue;
                }
            };

            history.push((guess, response));
            if response.is_win() {
                return Ok(Game {
                    outcome: Outcome::Won { round },
                    history,
                });
            }
            if round >= self.config.rounds {
                return Ok(Game {
                    outcome: Outcome::OutOfRounds,
                    history,
                });
            }
            knowledge = updated;
            remaining = filter_words(&remaining, &knowledge);
            round += 1;
        }
    }

    /// Merge one response into `knowledge`, checking it on its own first
    /// and then against what is already known.
    fn absorb(knowledge: &State, guess: &str, response: Response) -> Result<State> {
        let info = State::from_response(guess, response)?;
        if !info.is_consistent() {
            return Err(Error::InconsistentResponse);
        }
        let updated = knowledge.merge(&info);
        if !updated.is_consistent() {
            return Err(Error::ConflictingResponse);
        }
        Ok(updated)
    }

    /// Play against a known target, which must be in the dictionary.
    pub fn solve_for_target(&mut self, target: &str, guesses: &[String]) -> Result<Game> {
        self.validate(target, "Test word")?;
        self.play(&mut Target(target), guesses)
    }

    /// Play one independent game per target and tally the results.
    ///
    /// Targets and guesses are validated up front; after that a game that
    /// fails only counts as a loss.
    pub fn test_many(&self, targets: &[String], guesses: &[String]) -> Result<BatchReport> {
        for target in targets {
            self.validate(target, "Test word")?;
        }
        for guess in guesses {
            self.validate(guess, "Guess")?;
        }
        let results: Vec<(String, Option<usize>)> = targets
            .par_iter()
            .map(|target| {
                let mut solver = self.clone();
                let round = match solver.play(&mut Target(target.as_str()), guesses) {
                    Ok(game) => game.round(),
                    Err(err) => {
                        warn!("{}: {}", target, err);
                        None
                    }
                };
                info!("{}: {:?}", target, round);
                (target.clone(), round)
            })
            .collect();
        Ok(BatchReport::new(results, self.config.rounds))
    }
}

/// Results of a batch run, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub results: Vec<(String, Option<usize>)>,
    /// Wins per round; index 0 is round 1.
    pub histogram: Vec<usize>,
}

impl BatchReport {
    /// Tally `results` into a histogram of `rounds` buckets.
    pub fn new(results: Vec<(String, Option<usize>)>, rounds: usize) -> Self {
        let mut histogram = vec![0; rounds];
        for round in results.iter().filter_map(|(_, round)| *round) {
            if let Some(bucket) = round.checked_sub(1).and_then(|idx| histogram.get_mut(idx)) {
                *bucket += 1;
            }
        }
        Self { results, histogram }
    }

    /// Games played.
    pub fn played(&self) -> usize {
        self.results.len()
    }

    pub fn won(&self) -> usize {
        self.histogram.iter().sum()
    }

    pub fn failed(&self) -> usize {
        self.played() - self.won()
    }

    /// Share of games won, between 0 and 1.
    pub fn win_rate(&self) -> f64 {
        if self.played() == 0 {
            0.0
        } else {
            self.won() as f64 / self.played() as f64
        }
    }

    /// Mean winning round, `None` when nothing was won.
    pub fn mean_round(&self) -> Option<f64> {
        let won = self.won();
        if won == 0 {
            return None;
        }
        let total: usize = self
            .histogram
            .iter()
            .enumerate()
            .map(|(idx, count)| (idx + 1) * count)
            .sum();
        Some(total as f64 / won as f64)
    }

    /// Bar length for the wins at `idx`, scaled down to `max_len` when the
    /// tallest bucket would not fit. A non-empty bucket is never hidden.
    pub fn bar_length(&self, idx: usize, max_len: usize) -> usize {
        let count = self.histogram[idx];
        let max_count = self.histogram.iter().copied().max().unwrap_or(0);
        let length = if max_count > max_len {
            count * max_len / max_count
        } else {
            count
        };
        if length == 0 && count > 0 {
            1
        } else {
            length
        }
    }
}
