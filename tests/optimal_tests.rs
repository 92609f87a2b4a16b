use serde_json::json;
use wordle_solver::{compute_optimal, Node, Response, Trie};

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn as_json(trie: &Trie) -> serde_json::Value {
    serde_json::from_str(&trie.to_json().unwrap()).unwrap()
}

#[test]
fn test_two_disjoint_words() {
    let trie = compute_optimal(&words(&["ABC", "XYZ"]), 2);
    let expected = json!({
        "ABC": { "bbb": { "XYZ": { "ggg": 2 } }, "ggg": 1 },
        "XYZ": { "bbb": { "ABC": { "ggg": 2 } }, "ggg": 1 }
    });
    assert_eq!(as_json(&trie), expected);
    assert_eq!(trie.best_round("ABC"), Some(1));
    assert_eq!(trie.best_round("XYZ"), Some(1));
}

#[test]
fn test_single_round_only_wins_outright() {
    let trie = compute_optimal(&words(&["ABC", "XYZ"]), 1);
    assert_eq!(as_json(&trie), json!({ "ABC": { "ggg": 1 }, "XYZ": { "ggg": 1 } }));
}

#[test]
fn test_targets_share_nodes() {
    let trie = compute_optimal(&words(&["ABC", "ABD", "XYZ"]), 2);
    let shared = match trie.get("XYZ", Response::parse("bbb", 3).unwrap()) {
        Some(Node::Next(shared)) => shared,
        other => panic!("expected a subtrie, got {:?}", other),
    };
    assert_eq!(as_json(shared), json!({ "ABC": { "ggg": 2 }, "ABD": { "ggg": 2 } }));

    assert_eq!(
        as_json(&trie)["ABC"],
        json!({
            "bbb": { "XYZ": { "ggg": 2 } },
            "ggb": { "ABD": { "ggg": 2 } },
            "ggg": 1
        })
    );
}

#[test]
fn test_every_target_wins_within_budget() {
    let list = words(&["ABC", "ABD", "ABE", "XBC", "XYZ"]);
    for budget in 1..=3 {
        let trie = compute_optimal(&list, budget);
        for target in &list {
            let round = trie.best_round(target).unwrap();
            assert!(round <= budget, "{target} in {round} with budget {budget}");
        }
    }
}

#[test]
fn test_dead_ends_are_pruned() {
    let trie = compute_optimal(&words(&["ABC", "ABD", "ABE"]), 2);
    for branches in trie.0.values() {
        for node in branches.values() {
            if let Node::Next(subtrie) = node {
                assert!(!subtrie.is_empty());
            }
        }
    }
}
