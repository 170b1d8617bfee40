use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::quiz_engine::{
    config::QuizConfig,
    error::Result,
    generators,
    models::{GameMode, Question, Tier},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub mode: GameMode,
    pub tier: Tier,
    /// `Some(seed)` reproduces the same question every time.
    pub rng_seed: Option<u64>,
}

impl GenerationRequest {
    /// Entropy-seeded request.
    pub fn new(mode: GameMode, tier: Tier) -> Self {
        GenerationRequest { mode, tier, rng_seed: None }
    }
}

/// Core dispatch: routes to the generator for `mode`.
pub fn generate_with<R: Rng>(rng: &mut R, mode: GameMode, tier: Tier, config: &QuizConfig) -> Result<Question> {
    match mode {
        GameMode::CipherEncode => generators::cipher::generate_encode(rng, tier, config),
        GameMode::CipherDecode => generators::cipher::generate_decode(rng, tier, config),
        GameMode::WordGuess    => generators::word_guess::generate(rng, tier, config),
    }
}

/// One-shot generation with its own RNG. The config is validated first.
pub fn generate_question(request: GenerationRequest, config: &QuizConfig) -> Result<Question> {
    config.validate()?;
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    generate_with(&mut rng, request.mode, request.tier, config)
}
