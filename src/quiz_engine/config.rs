//! Quiz configuration: per-tier word pools, shift ranges and option counts.
//!
//! The built-in configuration comes from [`crate::quiz_engine::words`]. A TOML
//! file may override any section; omitted sections keep the built-in values.
//!
//! ```toml
//! starting_lives = 5
//!
//! [cipher.easy]
//! words = ["cat", "dog"]
//! min_shift = 1
//! max_shift = 7
//!
//! [word_guess.easy]
//! option_count = 4
//! entries = [
//!     { word = "sun", definition = "The star at the centre of our system" },
//!     # ...
//! ]
//! ```
//!
//! Every configuration is validated before the first question is served, so a
//! pool too small for its option count is a startup error rather than an
//! endless resampling loop.

use std::collections::HashSet;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::quiz_engine::{
    cipher::{default_alphabets, Alphabet, Cipher},
    error::{QuizError, Result},
    models::Tier,
    session::STARTING_LIVES,
    words,
};

/// Distractor shifts are drawn from this inclusive range.
pub const DISTRACTOR_SHIFT_MIN: i32 = 1;
pub const DISTRACTOR_SHIFT_MAX: i32 = 25;
/// Cipher questions always carry the correct answer plus this many distractors.
pub const CIPHER_DISTRACTORS: usize = 3;

// ---------------------------------------------------------------------------
// Tier schemas
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherTier {
    pub words: Vec<String>,
    pub min_shift: i32,
    pub max_shift: i32,
}

impl CipherTier {
    fn builtin(words: &[&str], min_shift: i32, max_shift: i32) -> Self {
        CipherTier {
            words: words.iter().map(|w| w.to_string()).collect(),
            min_shift,
            max_shift,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionEntry {
    pub word: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordGuessTier {
    pub option_count: usize,
    pub entries: Vec<DefinitionEntry>,
}

impl WordGuessTier {
    fn builtin(option_count: usize, entries: &[(&str, &str)]) -> Self {
        WordGuessTier {
            option_count,
            entries: entries
                .iter()
                .map(|(w, d)| DefinitionEntry { word: w.to_string(), definition: d.to_string() })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherTiers {
    pub easy: CipherTier,
    pub medium: CipherTier,
    pub hard: CipherTier,
}

impl CipherTiers {
    pub fn get(&self, tier: Tier) -> &CipherTier {
        match tier {
            Tier::Easy   => &self.easy,
            Tier::Medium => &self.medium,
            Tier::Hard   => &self.hard,
        }
    }
}

impl Default for CipherTiers {
    fn default() -> Self {
        CipherTiers {
            easy:   CipherTier::builtin(words::CIPHER_EASY, 1, 7),
            medium: CipherTier::builtin(words::CIPHER_MEDIUM, 5, 12),
            hard:   CipherTier::builtin(words::CIPHER_HARD, 10, 20),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordGuessTiers {
    pub easy: WordGuessTier,
    pub medium: WordGuessTier,
    pub hard: WordGuessTier,
}

impl WordGuessTiers {
    pub fn get(&self, tier: Tier) -> &WordGuessTier {
        match tier {
            Tier::Easy   => &self.easy,
            Tier::Medium => &self.medium,
            Tier::Hard   => &self.hard,
        }
    }
}

impl Default for WordGuessTiers {
    fn default() -> Self {
        WordGuessTiers {
            easy:   WordGuessTier::builtin(4, words::DEFINITIONS_EASY),
            medium: WordGuessTier::builtin(6, words::DEFINITIONS_MEDIUM),
            hard:   WordGuessTier::builtin(8, words::DEFINITIONS_HARD),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub starting_lives: u32,
    pub alphabets: Vec<Alphabet>,
    pub cipher: CipherTiers,
    pub word_guess: WordGuessTiers,
}

impl Default for QuizConfig {
    fn default() -> Self {
        QuizConfig {
            starting_lives: STARTING_LIVES,
            alphabets: default_alphabets(),
            cipher: CipherTiers::default(),
            word_guess: WordGuessTiers::default(),
        }
    }
}

impl QuizConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: QuizConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        info!("quiz config loaded from {}", path.display());
        Ok(config)
    }

    pub fn cipher(&self) -> Cipher {
        Cipher::new(self.alphabets.clone())
    }

    /// Reject any configuration that could not serve a full set of distinct options.
    pub fn validate(&self) -> Result<()> {
        self.check().map_err(|msg| {
            warn!("rejecting quiz config: {}", msg);
            QuizError::Configuration(msg)
        })
    }

    fn check(&self) -> std::result::Result<(), String> {
        if self.starting_lives == 0 {
            return Err("starting_lives must be at least 1".into());
        }
        if self.alphabets.is_empty() {
            return Err("at least one alphabet is required".into());
        }
        let min_len = (DISTRACTOR_SHIFT_MAX + 1) as usize;
        let mut seen = HashSet::new();
        for a in &self.alphabets {
            if a.len() < min_len {
                return Err(format!(
                    "alphabet {:?} has {} letters, need at least {min_len} for distinct shifts",
                    a.letters(),
                    a.len()
                ));
            }
            for c in a.all_letters() {
                if !seen.insert(c) {
                    return Err(format!("letter {c:?} appears in more than one alphabet"));
                }
            }
        }

        // Shift pool minus the correct shift must cover the distractors.
        let pool = (DISTRACTOR_SHIFT_MAX - DISTRACTOR_SHIFT_MIN) as usize;
        if pool < CIPHER_DISTRACTORS {
            return Err(format!("distractor shift pool {pool} < {CIPHER_DISTRACTORS}"));
        }

        let cipher = self.cipher();
        for tier in Tier::ALL {
            let t = self.cipher.get(tier);
            if t.words.is_empty() {
                return Err(format!("cipher tier {tier} has no words"));
            }
            if let Some(w) = t.words.iter().find(|w| !cipher.has_letters(w)) {
                return Err(format!("cipher tier {tier}: word {w:?} has no cipherable letters"));
            }
            if t.min_shift < DISTRACTOR_SHIFT_MIN
                || t.max_shift > DISTRACTOR_SHIFT_MAX
                || t.min_shift > t.max_shift
            {
                return Err(format!(
                    "cipher tier {tier}: shift range {}..={} must lie within {DISTRACTOR_SHIFT_MIN}..={DISTRACTOR_SHIFT_MAX}",
                    t.min_shift, t.max_shift
                ));
            }
        }

        for tier in Tier::ALL {
            let t = self.word_guess.get(tier);
            if t.option_count < 2 {
                return Err(format!("word_guess tier {tier}: option_count must be at least 2"));
            }
            let distinct: HashSet<&str> = t.entries.iter().map(|e| e.word.as_str()).collect();
            if distinct.len() < t.option_count {
                return Err(format!(
                    "word_guess tier {tier}: {} distinct words cannot fill {} options",
                    distinct.len(),
                    t.option_count
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_is_valid() {
        QuizConfig::default().validate().unwrap();
    }

    #[test]
    fn builtin_option_counts() {
        let c = QuizConfig::default();
        assert_eq!(c.word_guess.get(Tier::Easy).option_count, 4);
        assert_eq!(c.word_guess.get(Tier::Medium).option_count, 6);
        assert_eq!(c.word_guess.get(Tier::Hard).option_count, 8);
        assert_eq!(c.starting_lives, 5);
    }

    #[test]
    fn toml_overrides_only_named_sections() {
        let c = QuizConfig::from_toml_str(
            r#"
            [cipher.easy]
            words = ["cat", "dog"]
            min_shift = 2
            max_shift = 4
            "#,
        )
        .unwrap();
        assert_eq!(c.cipher.easy.words, vec!["cat", "dog"]);
        assert_eq!(c.cipher.easy.min_shift, 2);
        assert_eq!(c.cipher.medium, CipherTiers::default().medium);
        assert_eq!(c.word_guess, WordGuessTiers::default());
        assert_eq!(c.alphabets.len(), 2);
    }

    #[test]
    fn word_pool_smaller_than_option_count_is_rejected() {
        let err = QuizConfig::from_toml_str(
            r#"
            [word_guess.hard]
            option_count = 8
            entries = [
                { word = "a", definition = "first" },
                { word = "b", definition = "second" },
            ]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, QuizError::Configuration(_)), "{err}");
    }

    #[test]
    fn duplicate_words_do_not_count_toward_pool() {
        let mut c = QuizConfig::default();
        let entry = DefinitionEntry { word: "x".into(), definition: "y".into() };
        c.word_guess.easy = WordGuessTier { option_count: 2, entries: vec![entry.clone(), entry] };
        assert!(matches!(c.validate(), Err(QuizError::Configuration(_))));
    }

    #[test]
    fn shift_range_outside_pool_is_rejected() {
        let mut c = QuizConfig::default();
        c.cipher.hard.max_shift = 30;
        assert!(matches!(c.validate(), Err(QuizError::Configuration(_))));
        let mut c = QuizConfig::default();
        c.cipher.easy.min_shift = 0;
        assert!(matches!(c.validate(), Err(QuizError::Configuration(_))));
    }

    #[test]
    fn inverted_shift_range_is_rejected_before_generation() {
        use crate::quiz_engine::generator::{generate_question, GenerationRequest};
        use crate::quiz_engine::models::GameMode;

        let mut c = QuizConfig::default();
        c.cipher.easy.min_shift = 7;
        c.cipher.easy.max_shift = 3;
        assert!(matches!(c.validate(), Err(QuizError::Configuration(_))));
        for mode in [GameMode::CipherEncode, GameMode::CipherDecode] {
            let request = GenerationRequest { mode, tier: Tier::Easy, rng_seed: Some(1) };
            assert!(matches!(generate_question(request, &c), Err(QuizError::Configuration(_))));
        }
    }

    #[test]
    fn single_option_word_tier_is_rejected_before_generation() {
        use crate::quiz_engine::generator::{generate_question, GenerationRequest};
        use crate::quiz_engine::models::GameMode;

        let mut c = QuizConfig::default();
        c.word_guess.medium.option_count = 1;
        let request = GenerationRequest { mode: GameMode::WordGuess, tier: Tier::Medium, rng_seed: Some(2) };
        assert!(matches!(generate_question(request, &c), Err(QuizError::Configuration(_))));
    }

    #[test]
    fn alphabets_sharing_an_uppercase_letter_are_rejected() {
        // Latin 'i' and dotless 'ı' both uppercase to 'I'.
        let err = QuizConfig::from_toml_str(&format!(
            "alphabets = [{:?}, {:?}, {:?}]",
            crate::quiz_engine::cipher::UKRAINIAN,
            crate::quiz_engine::cipher::LATIN,
            "ıαβγδεζηθκλμνξπρστυφχψωϊϋό",
        ))
        .unwrap_err();
        assert!(matches!(err, QuizError::Configuration(_)), "{err}");
    }

    #[test]
    fn accepted_alphabets_round_trip_both_cases() {
        let c = QuizConfig::from_toml_str(&format!(
            "alphabets = [{:?}, {:?}]",
            crate::quiz_engine::cipher::LATIN,
            "αβγδεζηθικλμνξοπρστυφχψωϊϋ",
        ))
        .unwrap();
        let cipher = c.cipher();
        for text in ["Αβγ Cat", "ΩΪ zZ", "Ϋϊ"] {
            for shift in [-1, 5, 25] {
                assert_eq!(cipher.decode(&cipher.encode(text, shift), shift), text);
            }
        }
    }

    #[test]
    fn word_without_letters_is_rejected() {
        let mut c = QuizConfig::default();
        c.cipher.medium.words.push("1234".into());
        assert!(matches!(c.validate(), Err(QuizError::Configuration(_))));
    }

    #[test]
    fn short_alphabet_is_rejected() {
        let err = QuizConfig::from_toml_str(r#"alphabets = ["abcde"]"#).unwrap_err();
        assert!(matches!(err, QuizError::Configuration(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = QuizConfig::from_toml_str("starting_lives = \"five\"").unwrap_err();
        assert!(matches!(err, QuizError::Toml(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.toml");
        std::fs::write(&path, "starting_lives = 3\n").unwrap();
        let c = QuizConfig::load(&path).unwrap();
        assert_eq!(c.starting_lives, 3);
        assert!(matches!(QuizConfig::load(dir.path().join("missing.toml")), Err(QuizError::Io(_))));
    }
}
