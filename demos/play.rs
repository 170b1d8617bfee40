//! Console front end for the quiz engine.
//!
//! Run with: `cargo run --example play -- --level caesar_easy`
//!
//! Plays one game in the terminal: shows each question with numbered options,
//! reads the chosen index from stdin, and prints the outcome until lives run
//! out or the input ends. Set `RUST_LOG=debug` to watch the engine's log.
//!
//! ## Options
//!
//! - `--level <id>`: starting level (default `caesar_easy`)
//! - `--config <path>`: TOML file overriding word pools and tiers
//! - `--seed <u64>`: reproducible game
//! - `--store <path>`: keep player statistics in a JSON file

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use cipher_quiz::{
    AnswerOutcome, JsonFileUserStore, LevelRegistry, MemoryUserStore, Question, QuestionPrompt,
    QuizConfig, QuizError, SessionController, UserStore,
};
use cipher_quiz::quiz_engine::CipherDirection;

#[derive(Parser, Debug)]
#[command(name = "play", about = "Play the cipher quiz in a terminal")]
struct Args {
    #[arg(long, default_value = "caesar_easy")]
    level: String,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    store: Option<PathBuf>,
    #[arg(long, default_value_t = 1)]
    player: i64,
}

fn print_question(q: &Question) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  [{} — {}]  ID: {}", q.mode, q.tier, q.question_id);
    match &q.prompt {
        QuestionPrompt::Cipher { direction: CipherDirection::Encode, text, shift } => {
            println!("  Encrypt the word `{text}` with shift {shift}:");
        }
        QuestionPrompt::Cipher { direction: CipherDirection::Decode, text, shift } => {
            println!("  Decrypt `{text}` (shift {shift}):");
        }
        QuestionPrompt::WordGuess { definition } => {
            println!("  Which word means: {definition}");
        }
    }
    for (i, opt) in q.options.iter().enumerate() {
        println!("    {i}) {opt}");
    }
    print!("  > ");
    let _ = io::stdout().flush();
}

fn main() -> Result<(), QuizError> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => QuizConfig::load(path)?,
        None => QuizConfig::default(),
    };
    let store: Arc<dyn UserStore> = match &args.store {
        Some(path) => Arc::new(JsonFileUserStore::open(path)?),
        None => Arc::new(MemoryUserStore::new()),
    };
    let mut controller = SessionController::new(config, LevelRegistry::builtin(), store.clone())?;
    if let Some(seed) = args.seed {
        controller = controller.with_seed(seed);
    }

    let menu = controller.start_session(args.player, "console");
    println!("Levels:");
    for level in &menu.levels {
        println!("  {:<24} {} / {} ({} pts)", level.level_id, level.mode, level.tier, level.points);
    }

    let mut question = controller.select_level(args.player, &args.level)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print_question(&question);
        let Some(Ok(line)) = lines.next() else { break };
        match controller.submit_answer_text(args.player, &line) {
            Ok(AnswerOutcome::Correct { points_awarded, score, coins, .. }) => {
                println!("  ✓ Correct! +{points_awarded} (score {score}, coins {coins})");
            }
            Ok(AnswerOutcome::Incorrect { correct_answer, lives_left, .. }) => {
                println!("  ✗ Wrong. Answer: {correct_answer} ({lives_left} lives left)");
            }
            Ok(AnswerOutcome::GameOver { correct_answer, final_score, final_coins }) => {
                println!("  ✗ Wrong. Answer: {correct_answer}");
                println!("  Game over. Final score {final_score}, coins {final_coins}.");
                break;
            }
            Err(e @ (QuizError::InvalidIndex { .. } | QuizError::InvalidAnswer(_))) => {
                println!("  {e}. Try again.");
                continue;
            }
            Err(e) => return Err(e),
        }
        question = controller.advance(args.player)?;
    }

    if let Ok(Some(stats)) = store.get_user_stats(args.player) {
        println!("Totals: {} wins, {} losses, {} coins", stats.wins, stats.losses, stats.coins);
    }
    Ok(())
}
