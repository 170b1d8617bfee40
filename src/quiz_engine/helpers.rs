//! Shared builder functions used by every question generator.
//!
//! Generators differ only in how they pick a puzzle and how a single wrong
//! option is produced. Sampling distinct distractors, shuffling and id minting
//! live here so the generator files stay focused on their mode.

use std::collections::HashSet;

use log::warn;
use rand::{seq::SliceRandom, Rng};

use crate::quiz_engine::{
    config::{DISTRACTOR_SHIFT_MAX, DISTRACTOR_SHIFT_MIN},
    error::{QuizError, Result},
    models::{GameMode, Question, QuestionPrompt, Tier},
};

/// Upper bound on candidate draws per distractor set.
pub const MAX_SAMPLING_ATTEMPTS: usize = 256;

/// Mint a question id from the mode prefix and the RNG, e.g. `"CE-0F3A91B2"`.
pub fn question_id<R: Rng>(mode: GameMode, rng: &mut R) -> String {
    format!("{}-{:08X}", mode.id_prefix(), rng.next_u32())
}

/// Pick one element, failing on an empty pool.
pub fn pick<'a, R: Rng, T>(rng: &mut R, pool: &'a [T], what: &str) -> Result<&'a T> {
    pool.choose(rng)
        .ok_or_else(|| QuizError::Configuration(format!("{what} pool is empty")))
}

/// Uniform shift in `[DISTRACTOR_SHIFT_MIN, DISTRACTOR_SHIFT_MAX]` other than `exclude`.
pub fn other_shift<R: Rng>(rng: &mut R, exclude: i32) -> i32 {
    if !(DISTRACTOR_SHIFT_MIN..=DISTRACTOR_SHIFT_MAX).contains(&exclude) {
        return rng.gen_range(DISTRACTOR_SHIFT_MIN..=DISTRACTOR_SHIFT_MAX);
    }
    let s = rng.gen_range(DISTRACTOR_SHIFT_MIN..DISTRACTOR_SHIFT_MAX);
    if s >= exclude { s + 1 } else { s }
}

/// Rejection-sample `wanted` distinct distractors, none equal to `correct`.
///
/// Candidates come from `draw`. Gives up with a configuration error after
/// [`MAX_SAMPLING_ATTEMPTS`] draws instead of looping forever.
pub fn sample_distractors<R, F>(
    rng: &mut R,
    correct: &str,
    wanted: usize,
    mut draw: F,
) -> Result<Vec<String>>
where
    R: Rng,
    F: FnMut(&mut R) -> String,
{
    let mut seen: HashSet<String> = HashSet::with_capacity(wanted + 1);
    seen.insert(correct.to_string());
    let mut out = Vec::with_capacity(wanted);
    let mut attempts = 0;
    while out.len() < wanted {
        if attempts == MAX_SAMPLING_ATTEMPTS {
            warn!(
                "distractor sampling gave up after {attempts} draws ({} of {wanted} found for {correct:?})",
                out.len()
            );
            return Err(QuizError::Configuration(format!(
                "could not find {wanted} distinct distractors for {correct:?}"
            )));
        }
        attempts += 1;
        let candidate = draw(rng);
        if seen.insert(candidate.clone()) {
            out.push(candidate);
        }
    }
    Ok(out)
}

/// Append `correct` to the distractors and shuffle so its slot is random.
pub fn shuffled_options<R: Rng>(rng: &mut R, correct: &str, distractors: Vec<String>) -> Vec<String> {
    let mut options = distractors;
    options.push(correct.to_string());
    options.shuffle(rng);
    options
}

/// Assemble the final [`Question`].
pub fn question<R: Rng>(
    rng: &mut R,
    mode: GameMode,
    tier: Tier,
    prompt: QuestionPrompt,
    correct: String,
    distractors: Vec<String>,
) -> Question {
    let question_id = question_id(mode, rng);
    let options = shuffled_options(rng, &correct, distractors);
    Question {
        question_id,
        mode,
        tier,
        prompt,
        correct_answer: correct,
        options,
    }
}
