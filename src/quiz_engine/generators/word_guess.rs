use std::collections::BTreeSet;

use rand::{seq::IteratorRandom, Rng};

use crate::quiz_engine::{
    config::QuizConfig,
    error::{QuizError, Result},
    helpers::{pick, question},
    models::{GameMode, Question, QuestionPrompt, Tier},
};

/// "Which word matches this definition?"
///
/// Distractors are drawn without replacement from the other distinct words of
/// the same tier, so the option count is always exactly the tier's
/// `option_count`.
pub fn generate<R: Rng>(rng: &mut R, tier: Tier, config: &QuizConfig) -> Result<Question> {
    let t = config.word_guess.get(tier);
    if t.option_count < 2 {
        return Err(QuizError::Configuration(format!(
            "word_guess tier {tier}: option_count {} leaves no room for distractors",
            t.option_count
        )));
    }
    let entry = pick(rng, &t.entries, "word-guess entry")?;
    let correct = entry.word.clone();

    // BTreeSet keeps candidate order stable so seeded runs reproduce.
    let others: BTreeSet<&str> = t
        .entries
        .iter()
        .map(|e| e.word.as_str())
        .filter(|w| *w != correct)
        .collect();
    let wanted = t.option_count - 1;
    if others.len() < wanted {
        return Err(QuizError::Configuration(format!(
            "word_guess tier {tier}: {} distractor words for {wanted} slots",
            others.len()
        )));
    }
    let distractors: Vec<String> = others
        .into_iter()
        .choose_multiple(rng, wanted)
        .into_iter()
        .map(str::to_string)
        .collect();

    let prompt = QuestionPrompt::WordGuess {
        definition: entry.definition.clone(),
    };
    Ok(question(rng, GameMode::WordGuess, tier, prompt, correct, distractors))
}
