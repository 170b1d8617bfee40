use serde::{Deserialize, Serialize};

use crate::quiz_engine::models::Question;

pub const STARTING_LIVES: u32 = 5;

/// Where a player is in the question loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    LevelSelect,
    AwaitingAnswer,
    /// An answer was scored and the player still has lives; the next
    /// question is served on request.
    Scored,
    GameOver,
}

/// Mutable per-player game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSession {
    pub lives: u32,
    pub score: u32,
    pub coins: u32,
    /// Level of the pending question; cleared once it is answered.
    pub active_level_id: Option<String>,
    pub active_question: Option<Question>,
    starting_lives: u32,
}

impl PlayerSession {
    pub fn new(starting_lives: u32) -> Self {
        PlayerSession {
            lives: starting_lives,
            score: 0,
            coins: 0,
            active_level_id: None,
            active_question: None,
            starting_lives,
        }
    }

    pub fn reset(&mut self) {
        *self = PlayerSession::new(self.starting_lives);
    }

    /// Award `points` and one coin.
    pub fn record_correct(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.coins = self.coins.saturating_add(1);
    }

    /// Lose a life; stays at zero once exhausted.
    pub fn record_wrong(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn is_over(&self) -> bool {
        self.lives == 0
    }
}

impl Default for PlayerSession {
    fn default() -> Self {
        PlayerSession::new(STARTING_LIVES)
    }
}
