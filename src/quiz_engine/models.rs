use std::fmt;
use serde::{Deserialize, Serialize};

/// Transport-assigned player identifier (a chat user id).
pub type PlayerId = i64;

// ---------------------------------------------------------------------------
// Difficulty / mode metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Easy   => write!(f, "easy"),
            Tier::Medium => write!(f, "medium"),
            Tier::Hard   => write!(f, "hard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CipherDirection {
    Encode,
    Decode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    CipherEncode,
    CipherDecode,
    WordGuess,
}

impl GameMode {
    /// Two-letter prefix used in question ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            GameMode::CipherEncode => "CE",
            GameMode::CipherDecode => "CD",
            GameMode::WordGuess    => "WG",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameMode::CipherEncode => "Caesar Encode",
            GameMode::CipherDecode => "Caesar Decode",
            GameMode::WordGuess    => "Word Guess",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// Mode-specific prompt fields shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionPrompt {
    /// `text` is the plain word for `Encode` and the ciphertext for `Decode`.
    Cipher {
        direction: CipherDirection,
        text: String,
        shift: i32,
    },
    WordGuess {
        definition: String,
    },
}

/// One generated multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// `<PREFIX>-<8 hex>`, e.g. `"CE-1A2B3C4D"`.
    pub question_id: String,
    pub mode: GameMode,
    pub tier: Tier,
    pub prompt: QuestionPrompt,
    pub correct_answer: String,
    /// Contains `correct_answer` exactly once; every entry is distinct.
    pub options: Vec<String>,
}

impl Question {
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Position of the correct answer within `options`.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.correct_answer)
    }
}

// ---------------------------------------------------------------------------
// Persistent user record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub user_id: PlayerId,
    pub username: String,
    #[serde(default = "default_lives")]
    pub lives: u32,
    #[serde(default)]
    pub coins: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

fn default_lives() -> u32 {
    crate::quiz_engine::session::STARTING_LIVES
}

impl UserStats {
    pub fn new(user_id: PlayerId, username: impl Into<String>) -> Self {
        UserStats {
            user_id,
            username: username.into(),
            lives: default_lives(),
            coins: 0,
            wins: 0,
            losses: 0,
        }
    }
}
