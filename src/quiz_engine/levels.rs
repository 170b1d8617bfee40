//! Level table: which generator a level uses, what it pays, what follows it.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::quiz_engine::{
    config::QuizConfig,
    error::{QuizError, Result},
    generator::generate_with,
    models::{GameMode, Question, Tier},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub mode: GameMode,
    pub tier: Tier,
    pub points: u32,
    /// Level offered after an answer that does not end the game.
    pub next_level_id: String,
}

impl LevelConfig {
    /// Produce one question for this level.
    pub fn generate<R: Rng>(&self, rng: &mut R, config: &QuizConfig) -> Result<Question> {
        generate_with(rng, self.mode, self.tier, config)
    }
}

/// Static mapping from level id to [`LevelConfig`].
///
/// Serialized as the bare `id -> level` map. Deserializing goes through
/// [`LevelRegistry::new`], so a loaded table is checked like a built one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, LevelConfig>", into = "BTreeMap<String, LevelConfig>")]
pub struct LevelRegistry {
    levels: BTreeMap<String, LevelConfig>,
}

fn level(mode: GameMode, tier: Tier, points: u32, id: &str) -> (String, LevelConfig) {
    (
        id.to_string(),
        LevelConfig { mode, tier, points, next_level_id: id.to_string() },
    )
}

impl LevelRegistry {
    /// The built-in level table. Every level repeats itself on "next question".
    pub fn builtin() -> Self {
        use GameMode::*;
        use Tier::*;
        let levels = [
            level(CipherEncode, Easy,   10, "caesar_easy"),
            level(CipherEncode, Medium, 20, "caesar_medium"),
            level(CipherEncode, Hard,   30, "caesar_hard"),
            level(CipherDecode, Easy,   10, "caesar_decrypt_easy"),
            level(CipherDecode, Medium, 20, "caesar_decrypt_medium"),
            level(CipherDecode, Hard,   30, "caesar_decrypt_hard"),
            level(WordGuess,    Easy,   10, "word_game_easy"),
            level(WordGuess,    Medium, 20, "word_game_medium"),
            level(WordGuess,    Hard,   30, "word_game_hard"),
        ];
        LevelRegistry { levels: levels.into_iter().collect() }
    }

    /// Build a custom table; every `next_level_id` must resolve and every level must pay.
    pub fn new(levels: BTreeMap<String, LevelConfig>) -> Result<Self> {
        let registry = LevelRegistry { levels };
        registry.validate()?;
        Ok(registry)
    }

    pub fn validate(&self) -> Result<()> {
        for (id, cfg) in &self.levels {
            if cfg.points == 0 {
                return Err(QuizError::Configuration(format!("level {id} awards no points")));
            }
            if !self.levels.contains_key(&cfg.next_level_id) {
                return Err(QuizError::Configuration(format!(
                    "level {id} continues to unknown level {}",
                    cfg.next_level_id
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<&LevelConfig> {
        self.levels
            .get(id)
            .ok_or_else(|| QuizError::UnknownLevel(id.to_string()))
    }

    /// Level ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.levels.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LevelConfig)> {
        self.levels.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl TryFrom<BTreeMap<String, LevelConfig>> for LevelRegistry {
    type Error = QuizError;

    fn try_from(levels: BTreeMap<String, LevelConfig>) -> Result<Self> {
        LevelRegistry::new(levels)
    }
}

impl From<LevelRegistry> for BTreeMap<String, LevelConfig> {
    fn from(registry: LevelRegistry) -> Self {
        registry.levels
    }
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
