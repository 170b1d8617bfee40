//! # cipher_quiz
//!
//! A turn-based multiple-choice quiz engine. Players answer Caesar-cipher
//! encode/decode puzzles and word-definition puzzles, earning points and
//! coins for correct answers and losing one of five lives for wrong ones.
//!
//! ## How it works
//!
//! 1. Build a [`SessionController`] from a [`QuizConfig`], a [`LevelRegistry`]
//!    and a [`UserStore`]. The configuration is validated here; a tier whose
//!    word pool cannot fill its options is rejected before any play.
//! 2. The transport layer calls [`SessionController::start_session`] and shows
//!    the returned [`LevelMenu`].
//! 3. [`SessionController::select_level`] returns a [`Question`]; the transport
//!    renders its prompt and options and reports back the chosen index through
//!    [`SessionController::submit_answer`].
//! 4. The [`AnswerOutcome`] says whether the answer was correct, and whether
//!    the game is over. [`SessionController::advance`] serves the next
//!    question; [`SessionController::restart_session`] starts over.
//!
//! ## Key features
//!
//! - **Deterministic**: `GenerationRequest { rng_seed: Some(u64), .. }` and
//!   [`SessionController::with_seed`] reproduce questions and whole games.
//! - **Per-player isolation**: each player's session has its own lock;
//!   different players never contend.
//! - **Configurable**: word pools, shift ranges and option counts load from
//!   TOML via [`QuizConfig::load`].
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use cipher_quiz::{
//!     AnswerOutcome, LevelRegistry, MemoryUserStore, QuizConfig, SessionController,
//! };
//!
//! let controller = SessionController::new(
//!     QuizConfig::default(),
//!     LevelRegistry::builtin(),
//!     Arc::new(MemoryUserStore::new()),
//! )?;
//!
//! let menu = controller.start_session(42, "olena");
//! println!("{} levels available", menu.levels.len());
//!
//! let question = controller.select_level(42, "caesar_easy")?;
//! for (i, option) in question.options.iter().enumerate() {
//!     println!("[{i}] {option}");
//! }
//!
//! match controller.submit_answer(42, 0)? {
//!     AnswerOutcome::Correct { points_awarded, .. } => println!("+{points_awarded}"),
//!     AnswerOutcome::Incorrect { correct_answer, .. } => println!("it was {correct_answer}"),
//!     AnswerOutcome::GameOver { final_score, .. } => println!("final score {final_score}"),
//! }
//! # Ok::<(), cipher_quiz::QuizError>(())
//! ```

pub mod quiz_engine;

// Convenience re-exports so callers can use `cipher_quiz::SessionController`
// directly without reaching into `quiz_engine::`.
pub use quiz_engine::{
    decode, encode, generate_question, AnswerOutcome, GameMode, GenerationRequest,
    JsonFileUserStore, LevelMenu, LevelRegistry, MemoryUserStore, PlayerId, PlayerSession,
    Question, QuestionPrompt, QuizConfig, QuizError, SessionController, SessionState, Tier,
    UserStats, UserStore,
};
