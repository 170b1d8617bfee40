//! Caesar substitution over a fixed set of ordered alphabets.
//!
//! Each character is looked up in every configured alphabet (lowercase first,
//! then uppercase). A hit is replaced by the letter `(index + shift) mod len`
//! of the same alphabet, keeping its case. Anything else passes through, so
//! digits, spaces, apostrophes and letters of unsupported scripts are no-ops.

use serde::{Deserialize, Serialize};

use crate::quiz_engine::error::{QuizError, Result};

/// The 33-letter Ukrainian alphabet.
pub const UKRAINIAN: &str = "абвгґдеєжзиіїйклмнопрстуфхцчшщьюя";
/// The 26-letter Latin alphabet.
pub const LATIN: &str = "abcdefghijklmnopqrstuvwxyz";

/// One ordered alphabet with its uppercase mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    lower: Vec<char>,
    upper: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from its lowercase letters in order.
    pub fn new(letters: &str) -> Result<Self> {
        let lower: Vec<char> = letters.chars().collect();
        if lower.is_empty() {
            return Err(QuizError::Configuration("alphabet is empty".into()));
        }
        for (i, c) in lower.iter().enumerate() {
            if lower[..i].contains(c) {
                return Err(QuizError::Configuration(format!(
                    "alphabet {letters:?} repeats letter {c:?}"
                )));
            }
        }
        let upper: Vec<char> = lower
            .iter()
            .map(|c| c.to_uppercase().next().unwrap_or(*c))
            .collect();
        // Each uppercase form must map back to exactly one letter.
        for (i, u) in upper.iter().enumerate() {
            let clash = upper[..i]
                .iter()
                .chain(lower.iter().enumerate().filter(|(j, _)| *j != i).map(|(_, l)| l))
                .any(|other| other == u);
            if clash {
                return Err(QuizError::Configuration(format!(
                    "alphabet {letters:?}: uppercase {u:?} of {:?} is ambiguous",
                    lower[i]
                )));
            }
        }
        Ok(Alphabet { lower, upper })
    }

    pub fn len(&self) -> usize {
        self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.lower.contains(&ch) || self.upper.contains(&ch)
    }

    fn shift_char(&self, ch: char, shift: i64) -> Option<char> {
        let n = self.lower.len() as i64;
        let rotate = |idx: usize| (idx as i64 + shift).rem_euclid(n) as usize;
        if let Some(idx) = self.lower.iter().position(|&c| c == ch) {
            return Some(self.lower[rotate(idx)]);
        }
        self.upper
            .iter()
            .position(|&c| c == ch)
            .map(|idx| self.upper[rotate(idx)])
    }

    /// Lowercase letters in alphabet order.
    pub fn letters(&self) -> String {
        self.lower.iter().collect()
    }

    /// Every character this alphabet rewrites, lowercase then uppercase.
    /// Caseless letters appear once.
    pub fn all_letters(&self) -> impl Iterator<Item = char> + '_ {
        let upper = self
            .upper
            .iter()
            .zip(&self.lower)
            .filter(|(u, l)| u != l)
            .map(|(u, _)| *u);
        self.lower.iter().copied().chain(upper)
    }
}

impl TryFrom<String> for Alphabet {
    type Error = QuizError;

    fn try_from(s: String) -> Result<Self> {
        Alphabet::new(&s)
    }
}

impl From<Alphabet> for String {
    fn from(a: Alphabet) -> String {
        a.letters()
    }
}

/// A substitution cipher over several disjoint alphabets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cipher {
    alphabets: Vec<Alphabet>,
}

impl Cipher {
    pub fn new(alphabets: Vec<Alphabet>) -> Self {
        Cipher { alphabets }
    }

    pub fn alphabets(&self) -> &[Alphabet] {
        &self.alphabets
    }

    /// Rotate every supported letter of `text` forward by `shift`.
    pub fn encode(&self, text: &str, shift: i32) -> String {
        self.shift_text(text, shift as i64)
    }

    /// Inverse of [`Cipher::encode`]: rotates backwards by `shift`.
    pub fn decode(&self, text: &str, shift: i32) -> String {
        self.shift_text(text, -(shift as i64))
    }

    /// True if `text` contains at least one letter this cipher would rotate.
    pub fn has_letters(&self, text: &str) -> bool {
        text.chars().any(|c| self.alphabets.iter().any(|a| a.contains(c)))
    }

    /// Smallest alphabet length; shifts are distinct below this bound.
    pub fn min_alphabet_len(&self) -> usize {
        self.alphabets.iter().map(Alphabet::len).min().unwrap_or(0)
    }

    fn shift_text(&self, text: &str, shift: i64) -> String {
        text.chars()
            .map(|ch| {
                self.alphabets
                    .iter()
                    .find_map(|a| a.shift_char(ch, shift))
                    .unwrap_or(ch)
            })
            .collect()
    }
}

impl Default for Cipher {
    fn default() -> Self {
        Cipher {
            alphabets: default_alphabets(),
        }
    }
}

/// Ukrainian then Latin.
pub fn default_alphabets() -> Vec<Alphabet> {
    [UKRAINIAN, LATIN]
        .iter()
        .filter_map(|letters| Alphabet::new(letters).ok())
        .collect()
}

/// Encode with the built-in alphabets.
pub fn encode(text: &str, shift: i32) -> String {
    Cipher::default().encode(text, shift)
}

/// Decode with the built-in alphabets.
pub fn decode(text: &str, shift: i32) -> String {
    Cipher::default().decode(text, shift)
}
