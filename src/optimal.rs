//! Exhaustive strategy search.
//!
//! Builds a trie keyed by guess, then by response, whose leaves are the
//! round a path wins in. Every target in the word list is explored
//! depth-first against one shared trie: when two targets answer the same
//! guess path the same way they land on the same node, and the later
//! target only adds its own continuations to it.
//!
//! The search is exponential in the round budget and meant for small word
//! lists.

use crate::feedback::Response;
use serde::Serialize;
use std::collections::BTreeMap;

/// Every (guess, target) response, computed once up front.
pub struct ResponseTable {
    size: usize,
    responses: Vec<Response>,
}

impl ResponseTable {
    pub fn new(words: &[String]) -> Self {
        let responses = words
            .iter()
            .flat_map(|guess| words.iter().map(move |target| Response::calculate(guess, target)))
            .collect();
        Self {
            size: words.len(),
            responses,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Response to the word at `guess` when the word at `target` is hidden.
    pub fn get(&self, guess: usize, target: usize) -> Response {
        self.responses[guess * self.size + target]
    }
}

/// Guess -> response -> leaf or deeper trie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trie(pub BTreeMap<String, BTreeMap<Response, Node>>);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// The path wins in this round.
    Win(usize),
    /// The guess to try next.
    Next(Trie),
}

impl Trie {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The node reached by answering `guess` with `response`.
    pub fn get(&self, guess: &str, response: Response) -> Option<&Node> {
        self.0.get(guess)?.get(&response)
    }

    /// The earliest round any path in the trie wins for `target`.
    ///
    /// `target` must be uppercase ASCII with the trie's word length; see
    /// [`Response::calculate`].
    pub fn best_round(&self, target: &str) -> Option<usize> {
        self.0
            .iter()
            .filter_map(|(guess, branches)| {
                match branches.get(&Response::calculate(guess, target))? {
                    Node::Win(round) => Some(*round),
                    Node::Next(trie) => trie.best_round(target),
                }
            })
            .min()
    }

    /// Pretty-printed JSON, responses as letter codes.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Build the strategy trie for `words` within `max_rounds` guesses.
pub fn compute_optimal(words: &[String], max_rounds: usize) -> Trie {
    let table = ResponseTable::new(words);
    let mut trie = Trie::default();
    if max_rounds == 0 {
        return trie;
    }
    let mut path = Vec::with_capacity(max_rounds);
    for target in 0..table.len() {
        dive(&mut trie, words, &table, target, max_rounds, &mut path);
    }
    trie
}

fn dive(
    trie: &mut Trie,
    words: &[String],
    table: &ResponseTable,
    target: usize,
    max_rounds: usize,
    path: &mut Vec<usize>,
) {
    assert!(path.len() < max_rounds, "search went past the round budget");
    let round = path.len() + 1;
    for (guess, word) in words.iter().enumerate() {
        if path.contains(&guess) {
            continue;
        }
        let response = table.get(guess, target);
        if response.is_win() {
            trie.0
                .entry(word.clone())
                .or_default()
                .insert(response, Node::Win(round));
            continue;
        }
        if round == max_rounds {
            continue;
        }

        let branches = trie.0.entry(word.clone()).or_default();
        let node = branches
            .entry(response)
            .or_insert_with(|| Node::Next(Trie::default()));
        if let Node::Next(subtrie) = node {
            path.push(guess);
            dive(subtrie, words, table, target, max_rounds, path);
            path.pop();
        }
        if matches!(branches.get(&response), Some(Node::Next(subtrie)) if subtrie.is_empty()) {
            branches.remove(&response);
        }
        if branches.is_empty() {
            trie.0.remove(word);
        }
    }
}
