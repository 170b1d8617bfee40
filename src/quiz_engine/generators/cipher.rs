use rand::Rng;

use crate::quiz_engine::{
    config::{QuizConfig, CIPHER_DISTRACTORS},
    error::{QuizError, Result},
    helpers::{other_shift, pick, question, sample_distractors},
    models::{CipherDirection, GameMode, Question, QuestionPrompt, Tier},
};

/// Pick a word and a shift from the tier's ranges.
fn puzzle<'a, R: Rng>(rng: &mut R, tier: Tier, config: &'a QuizConfig) -> Result<(&'a str, i32)> {
    let t = config.cipher.get(tier);
    if t.min_shift > t.max_shift {
        return Err(QuizError::Configuration(format!(
            "cipher tier {tier}: empty shift range {}..={}",
            t.min_shift, t.max_shift
        )));
    }
    let word = pick(rng, &t.words, "cipher word")?;
    let shift = rng.gen_range(t.min_shift..=t.max_shift);
    Ok((word.as_str(), shift))
}

/// "Encrypt this word": the answer is the ciphertext, distractors are the
/// same word under other shifts.
pub fn generate_encode<R: Rng>(rng: &mut R, tier: Tier, config: &QuizConfig) -> Result<Question> {
    let cipher = config.cipher();
    let (word, shift) = puzzle(rng, tier, config)?;
    let correct = cipher.encode(word, shift);

    let distractors = sample_distractors(rng, &correct, CIPHER_DISTRACTORS, |rng| {
        cipher.encode(word, other_shift(rng, shift))
    })?;

    let prompt = QuestionPrompt::Cipher {
        direction: CipherDirection::Encode,
        text: word.to_string(),
        shift,
    };
    Ok(question(rng, GameMode::CipherEncode, tier, prompt, correct, distractors))
}

/// "Decrypt this word": the player sees the ciphertext, the answer is the
/// original word, distractors decode the same ciphertext with other shifts.
pub fn generate_decode<R: Rng>(rng: &mut R, tier: Tier, config: &QuizConfig) -> Result<Question> {
    let cipher = config.cipher();
    let (word, shift) = puzzle(rng, tier, config)?;
    let encrypted = cipher.encode(word, shift);
    let correct = cipher.decode(&encrypted, shift);

    let distractors = sample_distractors(rng, &correct, CIPHER_DISTRACTORS, |rng| {
        cipher.decode(&encrypted, other_shift(rng, shift))
    })?;

    let prompt = QuestionPrompt::Cipher {
        direction: CipherDirection::Decode,
        text: encrypted,
        shift,
    };
    Ok(question(rng, GameMode::CipherDecode, tier, prompt, correct, distractors))
}
