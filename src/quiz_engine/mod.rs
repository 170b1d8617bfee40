//! Core quiz engine: puzzles, levels, sessions and the controller that ties them together.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: tiers, modes, questions, user records |
//! | `error`      | `QuizError` and the crate `Result` alias |
//! | `cipher`     | Caesar substitution over the Ukrainian and Latin alphabets |
//! | `words`      | Built-in word lists and definition dictionaries |
//! | `config`     | Tier configuration, TOML loading and startup validation |
//! | `helpers`    | Distractor sampling, option shuffling, question ids |
//! | `generators` | Cipher encode/decode and word-guess question generators |
//! | `generator`  | Single entry point `generate_question()` — dispatches by mode |
//! | `levels`     | Level id → generator, points and follow-up level |
//! | `session`    | Per-player lives/score/coins and session states |
//! | `store`      | Persistent user statistics (in-memory and JSON file) |
//! | `controller` | Session state machine and per-player session registry |

pub mod cipher;
pub mod config;
pub mod controller;
pub mod error;
pub mod generator;
pub mod generators;
pub mod helpers;
pub mod levels;
pub mod models;
pub mod session;
pub mod store;
pub mod words;

// Re-export the public API surface so callers can use
// `quiz_engine::SessionController` without reaching into sub-modules.
pub use cipher::{decode, encode, Alphabet, Cipher};
pub use config::{CipherTier, DefinitionEntry, QuizConfig, WordGuessTier};
pub use controller::{AnswerOutcome, LevelChoice, LevelMenu, SessionController};
pub use error::{QuizError, Result};
pub use generator::{generate_question, GenerationRequest};
pub use levels::{LevelConfig, LevelRegistry};
pub use models::{CipherDirection, GameMode, PlayerId, Question, QuestionPrompt, Tier, UserStats};
pub use session::{PlayerSession, SessionState, STARTING_LIVES};
pub use store::{JsonFileUserStore, MemoryUserStore, UserStore};
