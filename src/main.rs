//! Wordle Solver CLI
//!
//! Plays interactively, simulates games against known targets, evaluates
//! whole word sets, and prints the response matrix or the optimal
//! strategy trie.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use wordle_solver::words::{self, DEFAULT_TEST_SET};
use wordle_solver::{
    compute_optimal, response_matrix, BatchReport, Config, Error, FeedbackSource, Game, Outcome, Reply, Solver,
    Target, DEFAULT_ROUNDS, DEFAULT_WORD_LENGTH,
};

const STATS_BAR_MAX_LENGTH: usize = 10;

const FEEDBACK_HELP: &str = "\
When prompted for the result of a guess, answer with colors or letters:
    🟩 = g   (right letter, right spot)
    🟨 = y   (right letter, wrong spot)
    ⬛ = b   (letter not in the word)
Answer `what` if the guess was rejected as not a word.";

/// Solver for Wordle-style word puzzles.
#[derive(Parser, Debug)]
#[command(author, version, about, after_help = FEEDBACK_HELP)]
struct Args {
    /// The word length
    #[arg(short = 'l', long, default_value_t = DEFAULT_WORD_LENGTH)]
    word_length: usize,

    /// The number of rounds
    #[arg(short, long, default_value_t = DEFAULT_ROUNDS)]
    rounds: usize,

    /// Any dictionary word can be a solution, not just the answer list
    #[arg(long)]
    expanded_answer_list: bool,

    /// Print debug info
    #[arg(short, long)]
    debug: bool,

    /// Override the dictionary with these words
    #[arg(short, long, num_args = 1..)]
    word_set: Option<Vec<String>>,

    /// Load the dictionary from a whitespace-delimited file
    #[arg(short = 'f', long)]
    word_file: Option<PathBuf>,

    /// Load the answer list from a whitespace-delimited file
    #[arg(long)]
    answer_file: Option<PathBuf>,

    /// Disable emojis in the output
    #[arg(short = 'e', long)]
    no_emoji: bool,

    /// Pre-populate a set of starting guesses
    #[arg(short, long, num_args = 1..)]
    guesses: Option<Vec<String>>,

    #[command(flatten)]
    mode: Mode,
}

#[derive(clap::Args, Debug)]
#[group(multiple = false)]
struct Mode {
    /// Print the matrix of responses between every pair of words
    #[arg(short, long)]
    matrix: bool,

    /// Compute the optimal tree of guesses and print it as JSON
    #[arg(short, long)]
    optimal: bool,

    /// Run a game against this word
    #[arg(short, long)]
    test_word: Option<String>,

    /// Run a game against every possible answer
    #[arg(short = 'a', long)]
    test_all: bool,

    /// Run games against these words (a built-in set when none are given)
    #[arg(short = 's', long, num_args = 0..)]
    test_set: Option<Vec<String>>,
}

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Run `work` on this thread while a spinner animates on stderr.
///
/// The spinner is skipped when stderr is not a terminal, so piped JSON
/// output stays clean.
fn with_spinner<T>(message: &str, work: impl FnOnce() -> T) -> T {
    let started = Instant::now();
    if !io::stderr().is_terminal() {
        let result = work();
        info!("{} took {:?}", message, started.elapsed());
        return result;
    }
    let done = AtomicBool::new(false);
    let result = thread::scope(|scope| {
        scope.spawn(|| {
            let mut stderr = io::stderr().lock();
            for frame in SPINNER_FRAMES.iter().cycle() {
                if done.load(Ordering::Relaxed) {
                    break;
                }
                let _ = write!(stderr, "\r{} {}", frame, message);
                let _ = stderr.flush();
                thread::sleep(Duration::from_millis(80));
            }
            let _ = write!(stderr, "\r{}\r", " ".repeat(message.chars().count() + 2));
            let _ = stderr.flush();
        });
        let result = work();
        done.store(true, Ordering::Relaxed);
        result
    });
    info!("{} took {:?}", message, started.elapsed());
    result
}

/// Feedback typed in by a person.
struct Prompt {
    input: io::Stdin,
}

impl FeedbackSource for Prompt {
    fn reply(&mut self, round: usize, guess: &str) -> wordle_solver::Result<Reply> {
        println!("Round {}, guess: {}", round, guess);
        print!("Was it right? ");
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.lock().read_line(&mut line)? == 0 {
            return Err(Error::InputClosed);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("what") {
            println!("Okay, let's try again.");
            return Ok(Reply::NotAWord);
        }
        Ok(Reply::Text(line.to_string()))
    }

    fn rejected(&mut self, _guess: &str, error: &Error) {
        println!("Rejected: {}, try again!", error);
    }
}

/// A simulated game that prints every round.
struct Narrated<'a> {
    target: Target<'a>,
    emoji: bool,
}

impl FeedbackSource for Narrated<'_> {
    fn reply(&mut self, round: usize, guess: &str) -> wordle_solver::Result<Reply> {
        println!("Round {}, guess: {}", round, guess);
        let reply = self.target.reply(round, guess)?;
        if let Reply::Response(response) = &reply {
            println!("Was it right? {}", response.render(self.emoji));
        }
        Ok(reply)
    }

    fn rejected(&mut self, guess: &str, error: &Error) {
        self.target.rejected(guess, error);
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module("wordle_solver", LevelFilter::Debug);
    }
    builder.init();
}

fn uppercase(words: &[String]) -> Vec<String> {
    words.iter().map(|word| word.trim().to_ascii_uppercase()).collect()
}

fn load_word_lists(args: &Args) -> Result<(Vec<String>, Option<Vec<String>>)> {
    let length = args.word_length;
    let custom = args.word_set.is_some() || args.word_file.is_some();
    let dictionary = if let Some(set) = &args.word_set {
        let dictionary = words::normalize(set.iter().map(String::as_str), length);
        if dictionary.is_empty() {
            return Err(Error::EmptyDictionary(length).into());
        }
        dictionary
    } else if let Some(path) = &args.word_file {
        words::load_words(path, length).with_context(|| format!("loading words from {}", path.display()))?
    } else {
        words::load_dictionary(length)?
    };

    let answers = if args.expanded_answer_list {
        None
    } else if let Some(path) = &args.answer_file {
        Some(words::load_words(path, length).with_context(|| format!("loading answers from {}", path.display()))?)
    } else if custom {
        None
    } else {
        Some(words::load_answers(length)?)
    };
    Ok((dictionary, answers))
}

fn print_transcript(game: &Game, rounds: usize, emoji: bool) {
    let score = match game.outcome {
        Outcome::Won { round } => round.to_string(),
        Outcome::NoGuess | Outcome::OutOfRounds => "X".to_string(),
    };
    println!("\nWordle bot {}/{}\n", score, rounds);
    for (_, response) in &game.history {
        println!("{}", response.render(emoji));
    }
}

fn print_outcome(game: &Game) {
    match game.outcome {
        Outcome::Won { .. } => println!("Hooray!"),
        Outcome::NoGuess => println!("No eligible guess found, we lost!"),
        Outcome::OutOfRounds => println!("Ran out of tries, we lost!"),
    }
}

fn print_matrix(words: &[String], word_length: usize, emoji: bool) {
    let matrix = response_matrix(words);
    let indent = " ".repeat(word_length);
    println!("{} {}", indent, words.join(" "));
    for (target, row) in words.iter().zip(matrix) {
        let row: Vec<String> = row.into_iter().map(|response| response.render(emoji)).collect();
        println!("{} {}", target, row.join(" "));
    }
}

fn print_statistics(report: &BatchReport, emoji: bool) {
    println!("\nSTATISTICS");
    println!(
        "Played: {}, Win %: {:.0}%, Won: {}, Failed: {}, Mean: {:.1}",
        report.played(),
        report.win_rate() * 100.0,
        report.won(),
        report.failed(),
        report.mean_round().unwrap_or(0.0),
    );
    let bar_char = if emoji { "🟩" } else { "X" };
    for (idx, count) in report.histogram.iter().enumerate() {
        let bar = bar_char.repeat(report.bar_length(idx, STATS_BAR_MAX_LENGTH));
        println!("{}: {} {}", idx + 1, count, bar);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let config = Config::new(args.word_length, args.rounds)?;
    let (dictionary, answers) = load_word_lists(&args)?;
    match &answers {
        Some(answers) => println!(
            "Loaded {} words, with {} possible answers.",
            dictionary.len(),
            answers.len()
        ),
        None => println!("Loaded {} words.", dictionary.len()),
    }

    let mut solver = Solver::new(config, dictionary, answers)?;
    let guesses = args.guesses.as_deref().map(uppercase).unwrap_or_default();
    for guess in &guesses {
        solver.validate(guess, "Guess")?;
    }
    let emoji = !args.no_emoji;
    let mode = &args.mode;

    if mode.optimal {
        let trie = with_spinner("Searching...", || compute_optimal(solver.dictionary(), args.rounds));
        println!("{}", trie.to_json()?);
    } else if mode.matrix {
        print_matrix(solver.dictionary(), args.word_length, emoji);
    } else if mode.test_all || mode.test_set.is_some() {
        let targets = match mode.test_set.as_deref() {
            Some([]) => DEFAULT_TEST_SET.iter().map(|word| word.to_string()).collect(),
            Some(set) => uppercase(set),
            None => solver.answers().to_vec(),
        };
        let report = solver.test_many(&targets, &guesses)?;
        for (target, round) in &report.results {
            match round {
                Some(round) => println!("{}: {}", target, round),
                None => println!("{}: None", target),
            }
        }
        print_statistics(&report, emoji);
    } else if let Some(target) = &mode.test_word {
        let target = target.trim().to_ascii_uppercase();
        solver.validate(&target, "Test word")?;
        println!("Running test for word: {}", target);
        let mut source = Narrated {
            target: Target(target.as_str()),
            emoji,
        };
        let game = solver.play(&mut source, &guesses)?;
        print_outcome(&game);
        print_transcript(&game, args.rounds, emoji);
    } else {
        let mut prompt = Prompt { input: io::stdin() };
        let game = solver.play(&mut prompt, &guesses)?;
        print_outcome(&game);
    }
    Ok(())
}
