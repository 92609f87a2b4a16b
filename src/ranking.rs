//! Guess ranking by partition count, and selection of the best guess.
//!
//! A guess is worth more the more distinct responses it can produce against
//! the remaining candidates: each distinct response is a bucket the
//! candidates split into. Scores are `1 - buckets / 3^L`, so lower is better.
//!
//! Large candidate pools are sampled in a shuffled order seeded by the guess
//! itself, stopping once a run of samples stops finding new responses.

use crate::config::Config;
use crate::feedback::Response;
use crate::state::State;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Partition score per candidate guess. Lower is better.
pub type Ranking = HashMap<String, f64>;

/// A lazy Fisher-Yates shuffle over a borrowed slice.
///
/// Each step picks a random slot among the ones not yet drawn and records
/// in `overrides` which item now lives in that slot, so the source slice is
/// never copied or mutated.
pub struct SeededShuffle<'a, T> {
    items: &'a [T],
    rng: StdRng,
    size: usize,
    overrides: HashMap<usize, usize>,
}

impl<'a, T> SeededShuffle<'a, T> {
    /// The same `seed` always yields the same order.
    pub fn new(items: &'a [T], seed: &str) -> Self {
        let mut bytes = [0u8; 32];
        for (i, b) in seed.bytes().enumerate() {
            bytes[i % 32] ^= b;
        }
        Self {
            items,
            rng: StdRng::from_seed(bytes),
            size: items.len(),
            overrides: HashMap::new(),
        }
    }

    fn slot(&self, index: usize) -> usize {
        self.overrides.get(&index).copied().unwrap_or(index)
    }
}

impl<'a, T> Iterator for SeededShuffle<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.size == 0 {
            return None;
        }
        let index = self.rng.gen_range(0..self.size);
        let choice = self.slot(index);
        let last = self.slot(self.size - 1);
        self.overrides.insert(index, last);
        self.size -= 1;
        Some(&self.items[choice])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

/// Distinct responses `word` draws from `targets`, and how many targets
/// were scored to find them.
///
/// Pools above `config.sample_threshold` are walked in a shuffled order and
/// the walk stops after `config.sample_patience` targets in a row add no new
/// response.
pub fn count_partitions(word: &str, targets: &[String], config: &Config) -> (usize, usize) {
    let mut partitions = HashSet::new();
    if targets.len() <= config.sample_threshold {
        partitions.extend(targets.iter().map(|target| Response::calculate(word, target)));
        return (partitions.len(), targets.len());
    }
    let mut scored = 0;
    let mut no_change_count = 0;
    for target in SeededShuffle::new(targets, word) {
        scored += 1;
        if partitions.insert(Response::calculate(word, target)) {
            no_change_count = 0;
        } else {
            no_change_count += 1;
            if no_change_count >= config.sample_patience {
                break;
            }
        }
    }
    (partitions.len(), scored)
}

/// Score `word` by how many distinct responses it draws from `targets`.
pub fn rank_word(word: &str, targets: &[String], config: &Config) -> f64 {
    let max_partitions = 3f64.powi(word.len() as i32);
    let (partitions, _) = count_partitions(word, targets, config);
    1.0 - partitions as f64 / max_partitions
}

fn round_to(value: f64, precision: i32) -> f64 {
    let factor = 10f64.powi(precision);
    (value * factor).round() / factor
}

/// Rank guesses against the `remaining` candidates.
///
/// With few candidates left only the candidates themselves are ranked, so
/// the chosen guess has a chance to win outright; otherwise the whole
/// dictionary competes on information.
pub fn rank_words(dictionary: &[String], remaining: &[String], state: &State, config: &Config) -> Ranking {
    let word_set = if remaining.len() < config.try_to_win_below {
        remaining
    } else {
        dictionary
    };
    debug!(
        "Ranking {} words (with {} remaining) using knowledge: {}",
        word_set.len(),
        remaining.len(),
        state
    );
    word_set
        .par_iter()
        .map(|word| {
            let score = round_to(rank_word(word, remaining, config), config.rank_precision);
            (word.clone(), score)
        })
        .collect()
}

fn by_score_then_word(a: &(&String, &f64), b: &(&String, &f64)) -> Ordering {
    a.1.total_cmp(b.1).then_with(|| a.0.cmp(b.0))
}

/// The `n` best entries of `ranking`, best first.
pub fn shortlist(ranking: &Ranking, n: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(&String, &f64)> = ranking.iter().collect();
    ranked.sort_unstable_by(by_score_then_word);
    ranked
        .into_iter()
        .take(n)
        .map(|(word, &score)| (word.clone(), score))
        .collect()
}

/// The best guess, ties broken alphabetically. `None` when nothing is ranked.
pub fn choose_word(ranking: &Ranking, config: &Config) -> Option<String> {
    let top = shortlist(ranking, config.top_choices.max(1));
    debug!("Ranked: {:?}", top);
    top.into_iter().next().map(|(word, _)| word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_keeps_requested_places() {
        assert_eq!(round_to(0.123456, 4), 0.1235);
        assert_eq!(round_to(0.99999, 4), 1.0);
    }

    #[test]
    fn shuffle_seed_changes_order() {
        let items: Vec<u32> = (0..50).collect();
        let a: Vec<_> = SeededShuffle::new(&items, "CRANE").collect();
        let b: Vec<_> = SeededShuffle::new(&items, "SLATE").collect();
        assert_ne!(a, b);
    }
}
