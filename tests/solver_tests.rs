use std::collections::VecDeque;
use wordle_solver::words::{load_answers, load_dictionary, DEFAULT_TEST_SET};
use wordle_solver::{Config, Error, FeedbackSource, Outcome, Reply, Response, Solver, Target};

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn small_solver(list: &[&str]) -> Solver {
    Solver::new(Config::default(), words(list), None).unwrap()
}

fn embedded_solver() -> Solver {
    Solver::new(
        Config::default(),
        load_dictionary(5).unwrap(),
        Some(load_answers(5).unwrap()),
    )
    .unwrap()
}

/// Replays a script of replies, then answers honestly for `target`.
struct Scripted {
    target: &'static str,
    script: VecDeque<Reply>,
    rejected: Vec<String>,
}

impl Scripted {
    fn new(target: &'static str, script: Vec<Reply>) -> Self {
        Self {
            target,
            script: script.into(),
            rejected: Vec::new(),
        }
    }
}

impl FeedbackSource for Scripted {
    fn reply(&mut self, round: usize, guess: &str) -> wordle_solver::Result<Reply> {
        match self.script.pop_front() {
            Some(reply) => Ok(reply),
            None => Target(self.target).reply(round, guess),
        }
    }

    fn rejected(&mut self, _guess: &str, error: &Error) {
        self.rejected.push(error.to_string());
    }
}

fn guesses(game: &wordle_solver::Game) -> Vec<&str> {
    game.history.iter().map(|(guess, _)| guess.as_str()).collect()
}

#[test]
fn test_solver_rejects_empty_dictionary() {
    let result = Solver::new(Config::default(), Vec::new(), None);
    assert!(matches!(result, Err(Error::EmptyDictionary(5))));
}

#[test]
fn test_solver_rejects_zero_rounds() {
    let config = Config {
        rounds: 0,
        ..Config::default()
    };
    let result = Solver::new(config, words(&["CRANE"]), None);
    assert!(matches!(result, Err(Error::NoRounds)));
}

#[test]
fn test_word_lists_in_any_order() {
    let mut solver = Solver::new(
        Config::default(),
        words(&["TRACE", "CRANE", "SLATE", "CRANE"]),
        Some(words(&["TRACE", "CRANE"])),
    )
    .unwrap();
    assert_eq!(solver.dictionary(), words(&["CRANE", "SLATE", "TRACE"]).as_slice());
    assert_eq!(solver.answers(), words(&["CRANE", "TRACE"]).as_slice());

    let game = solver.solve_for_target("TRACE", &words(&["SLATE"])).unwrap();
    assert!(game.is_win());
    assert_eq!(guesses(&game)[0], "SLATE");
}

#[test]
fn test_answers_fall_back_to_dictionary() {
    let solver = small_solver(&["CRANE", "SLATE"]);
    assert_eq!(solver.answers(), solver.dictionary());
}

#[test]
fn test_solves_with_embedded_lists() {
    let mut solver = embedded_solver();
    let game = solver.solve_for_target("TRACE", &[]).unwrap();
    assert!(game.is_win(), "{:?}", game);
    assert!(game.round().unwrap() <= 6);
    let (last, response) = game.history.last().unwrap();
    assert_eq!(last, "TRACE");
    assert!(response.is_win());
    assert!(game.history[..game.history.len() - 1]
        .iter()
        .all(|(_, response)| !response.is_win()));
}

#[test]
fn test_small_dictionary_game() {
    let mut solver = small_solver(&["CRANE", "SLATE", "TRACE"]);
    let game = solver.solve_for_target("TRACE", &[]).unwrap();
    assert_eq!(game.outcome, Outcome::Won { round: 2 });
    assert_eq!(guesses(&game), vec!["CRANE", "TRACE"]);
    assert_eq!(game.history[0].1, Response::parse("yggbg", 5).unwrap());
}

#[test]
fn test_games_are_deterministic() {
    let solver = embedded_solver();
    let first = solver.clone().solve_for_target("MOUNT", &[]).unwrap();
    let second = solver.clone().solve_for_target("MOUNT", &[]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_not_a_word_shrinks_dictionary() {
    let mut solver = small_solver(&["CRANE", "SLATE", "TRACE"]);
    let mut source = Scripted::new("TRACE", vec![Reply::NotAWord]);
    let game = solver.play(&mut source, &[]).unwrap();

    assert_eq!(game.outcome, Outcome::Won { round: 2 });
    assert_eq!(guesses(&game), vec!["SLATE", "TRACE"]);
    assert_eq!(solver.dictionary(), words(&["SLATE", "TRACE"]).as_slice());
    assert!(source.rejected.is_empty());
}

#[test]
fn test_not_a_word_shrinks_answers_too() {
    let mut solver = Solver::new(
        Config::default(),
        words(&["CRANE", "SLATE", "TRACE"]),
        Some(words(&["CRANE", "TRACE"])),
    )
    .unwrap();
    solver.remove_from_dictionary("CRANE");
    solver.remove_from_answers("CRANE");
    assert_eq!(solver.answers(), words(&["TRACE"]).as_slice());
    assert_eq!(solver.dictionary(), words(&["SLATE", "TRACE"]).as_slice());
}

#[test]
fn test_unparseable_feedback_costs_no_round() {
    let mut solver = small_solver(&["CRANE", "SLATE", "TRACE"]);
    let mut source = Scripted::new("CRANE", vec![Reply::Text("gg".to_string())]);
    let game = solver.play(&mut source, &[]).unwrap();

    assert_eq!(game.outcome, Outcome::Won { round: 1 });
    assert_eq!(source.rejected.len(), 1);
}

#[test]
fn test_conflicting_feedback_is_rejected() {
    let mut solver = small_solver(&["CRANE", "SLATE", "TRACE"]);
    let script = vec![Reply::Text("yggbg".to_string()), Reply::Text("bbbbb".to_string())];
    let mut source = Scripted::new("TRACE", script);
    let game = solver.play(&mut source, &[]).unwrap();

    assert_eq!(source.rejected, vec!["response is not consistent with current state".to_string()]);
    assert_eq!(game.outcome, Outcome::Won { round: 2 });
    assert_eq!(guesses(&game), vec!["CRANE", "TRACE"]);
}

#[test]
fn test_self_inconsistent_feedback_is_rejected() {
    let mut solver = small_solver(&["EERIE", "THREE"]);
    let mut source = Scripted::new("THREE", vec![Reply::Text("yyyyy".to_string())]);
    let game = solver.play(&mut source, &words(&["EERIE"])).unwrap();

    assert_eq!(source.rejected, vec!["response is not self consistent".to_string()]);
    assert!(game.is_win());
}

#[test]
fn test_no_guess_left() {
    let mut solver = Solver::new(Config::default(), words(&["CRANE", "SLATE"]), Some(words(&["CRANE"]))).unwrap();
    let game = solver.play(&mut Target("SLATE"), &[]).unwrap();
    assert_eq!(game.outcome, Outcome::NoGuess);
    assert_eq!(guesses(&game), vec!["CRANE"]);
}

#[test]
fn test_out_of_rounds() {
    let config = Config::new(5, 1).unwrap();
    let mut solver = Solver::new(config, words(&["CRANE", "SLATE"]), None).unwrap();
    let game = solver.solve_for_target("SLATE", &[]).unwrap();
    assert_eq!(game.outcome, Outcome::OutOfRounds);
    assert_eq!(game.history.len(), 1);
    assert_eq!(game.round(), None);
}

#[test]
fn test_preloaded_guesses_come_first() {
    let mut solver = small_solver(&["CRANE", "SLATE", "TRACE"]);
    let game = solver.solve_for_target("TRACE", &words(&["SLATE"])).unwrap();
    assert_eq!(guesses(&game)[0], "SLATE");
    assert!(game.is_win());
}

#[test]
fn test_invalid_inputs_are_fatal() {
    let mut solver = small_solver(&["CRANE", "SLATE", "TRACE"]);
    assert!(matches!(
        solver.solve_for_target("TRACES", &[]),
        Err(Error::WrongLength { expected: 5, .. })
    ));
    assert!(matches!(
        solver.solve_for_target("ROAST", &[]),
        Err(Error::NotInDictionary { .. })
    ));
    assert!(matches!(
        solver.solve_for_target("TRACE", &words(&["ROAST"])),
        Err(Error::NotInDictionary { .. })
    ));

    let err = solver.solve_for_target("ROAST", &[]).unwrap_err();
    assert_eq!(err.to_string(), "Test word \"ROAST\" is not a word!");
}

#[test]
fn test_many_default_set() {
    let solver = embedded_solver();
    let targets = words(&DEFAULT_TEST_SET);
    let report = solver.test_many(&targets, &[]).unwrap();

    assert_eq!(report.played(), DEFAULT_TEST_SET.len());
    assert!(report.won() >= 25, "{:?}", report.results);
    assert_eq!(report.won() + report.failed(), report.played());
    let targets_played: Vec<&str> = report.results.iter().map(|(target, _)| target.as_str()).collect();
    assert_eq!(targets_played, DEFAULT_TEST_SET.to_vec());
}

#[test]
fn test_many_validates_every_target() {
    let solver = small_solver(&["CRANE", "SLATE", "TRACE"]);
    assert!(solver.test_many(&words(&["CRANE", "ROAST"]), &[]).is_err());
}
