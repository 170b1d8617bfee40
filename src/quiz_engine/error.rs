use thiserror::Error;

use crate::quiz_engine::models::PlayerId;

/// Errors surfaced by the quiz engine to its transport layer.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The requested level id is not in the registry. Caller re-prompts level choice.
    #[error("level not supported: {0}")]
    UnknownLevel(String),

    /// Answer index outside `[0, len)`. Caller re-prompts the same question.
    #[error("invalid answer index {index} (question has {len} options)")]
    InvalidIndex { index: i64, len: usize },

    /// Answer text that is not an integer.
    #[error("invalid answer: {0:?}")]
    InvalidAnswer(String),

    /// No pending question for this player; only a restart recovers.
    #[error("session lost for player {0}, restart required")]
    SessionLost(PlayerId),

    /// Lives are exhausted; only a restart recovers.
    #[error("game is over for player {0}, restart required")]
    GameFinished(PlayerId),

    /// Startup-time configuration rejection.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, QuizError>;
