use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Case folding shared by words and guesses. Works one letter at a time so a
/// letter folds the same way wherever it sits in the word.
pub fn fold_letter(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// A lowercase, purely alphabetic word with at least one letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(String);

impl Word {
    /// Trims and lowercases `raw`, rejecting empty or non-alphabetic input.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized: String = raw.trim().chars().map(fold_letter).collect();
        if normalized.is_empty() || !normalized.chars().all(char::is_alphabetic) {
            return Err(GameError::InvalidWord {
                word: raw.to_string(),
            });
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in letters (not bytes).
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(letter)
    }

    pub fn distinct_letters(&self) -> BTreeSet<char> {
        self.0.chars().collect()
    }

    /// The word with every letter not in `revealed` replaced by `_`.
    pub fn masked<F>(&self, revealed: F) -> String
    where
        F: Fn(char) -> bool,
    {
        self.0
            .chars()
            .map(|c| if revealed(c) { c } else { '_' })
            .collect()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Word {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self> {
        Word::parse(&value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.0
    }
}
