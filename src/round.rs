use crate::difficulty::DifficultyTier;
use crate::error::{GameError, Result};
use crate::scoring::round_score;
use crate::word::{fold_letter, Word};
use rand::seq::IteratorRandom;
use rand::Rng;
use std::collections::BTreeSet;

/// Hints a player may take in one round unless configured otherwise.
pub const DEFAULT_MAX_HINTS: u32 = 2;

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

#[derive(Clone, Debug, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

impl RoundStatus {
    pub fn is_terminal(self) -> bool {
        self != RoundStatus::InProgress
    }
}

/// One accepted guess, in submission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Guess {
    pub letter: char,
    pub outcome: Outcome,
}

/// What a valid guess did to the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuessResult {
    pub letter: char,
    pub outcome: Outcome,
    pub status: RoundStatus,
}

/// Result of asking for a hint. Running out of hints is reported here rather
/// than as an error since it never ends the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintResult {
    Revealed(char),
    HintBudgetExhausted,
    NoHintAvailable,
}

/// Mutable per-round state. Only [`RoundEngine`] changes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    pub word: Word,
    pub correct_letters: BTreeSet<char>,
    pub used_letters: BTreeSet<char>,
    pub error_count: u32,
    pub hints_used: u32,
    pub status: RoundStatus,
}

impl RoundState {
    fn new(word: Word) -> Self {
        Self {
            word,
            correct_letters: BTreeSet::new(),
            used_letters: BTreeSet::new(),
            error_count: 0,
            hints_used: 0,
            status: RoundStatus::InProgress,
        }
    }
}

/// The state machine for guessing a single word.
#[derive(Clone, Debug)]
pub struct RoundEngine {
    state: RoundState,
    tier: DifficultyTier,
    max_hints: u32,
    history: Vec<Guess>,
    hinted: BTreeSet<char>,
}

impl RoundEngine {
    pub fn new(word: Word, tier: DifficultyTier) -> Self {
        Self::with_max_hints(word, tier, DEFAULT_MAX_HINTS)
    }

    pub fn with_max_hints(word: Word, tier: DifficultyTier, max_hints: u32) -> Self {
        Self {
            state: RoundState::new(word),
            tier,
            max_hints,
            history: vec![],
            hinted: BTreeSet::new(),
        }
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn word(&self) -> &Word {
        &self.state.word
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    pub fn status(&self) -> RoundStatus {
        self.state.status
    }

    pub fn has_finished(&self) -> bool {
        self.state.status.is_terminal()
    }

    pub fn error_count(&self) -> u32 {
        self.state.error_count
    }

    pub fn error_budget(&self) -> u32 {
        self.tier.error_budget()
    }

    pub fn remaining_errors(&self) -> u32 {
        self.error_budget().saturating_sub(self.state.error_count)
    }

    pub fn hints_used(&self) -> u32 {
        self.state.hints_used
    }

    pub fn max_hints(&self) -> u32 {
        self.max_hints
    }

    pub fn used_letters(&self) -> &BTreeSet<char> {
        &self.state.used_letters
    }

    pub fn correct_letters(&self) -> &BTreeSet<char> {
        &self.state.correct_letters
    }

    /// Letters revealed by hints so far; purely informational.
    pub fn hinted_letters(&self) -> &BTreeSet<char> {
        &self.hinted
    }

    pub fn history(&self) -> &[Guess] {
        &self.history
    }

    /// The word with unguessed letters as `_`. The whole word once finished.
    pub fn masked_word(&self) -> String {
        if self.has_finished() {
            return self.state.word.to_string();
        }
        self.state
            .word
            .masked(|c| self.state.correct_letters.contains(&c))
    }

    fn ensure_in_progress(&self) -> Result<()> {
        if self.has_finished() {
            Err(GameError::InvalidTransition)
        } else {
            Ok(())
        }
    }

    /// Submits one guess as typed by the player.
    ///
    /// Surrounding whitespace is ignored and the letter is compared
    /// case-insensitively. Rejected input leaves the round untouched.
    pub fn submit_guess(&mut self, input: &str) -> Result<GuessResult> {
        self.ensure_in_progress()?;
        let letter = parse_letter(input)?;

        if self.state.used_letters.contains(&letter) {
            return Err(GameError::AlreadyGuessed { letter });
        }
        self.state.used_letters.insert(letter);

        let outcome = if self.state.word.contains(letter) {
            self.state.correct_letters.insert(letter);
            Outcome::Correct
        } else {
            self.state.error_count += 1;
            Outcome::Incorrect
        };
        self.history.push(Guess { letter, outcome });

        // Win first. A correct guess never adds an error, so the two checks
        // can never both fire on the same guess.
        if self.is_word_complete() {
            self.state.status = RoundStatus::Won;
        } else if self.state.error_count >= self.error_budget() {
            self.state.status = RoundStatus::Lost;
        }

        tracing::debug!(
            %letter,
            ?outcome,
            errors = self.state.error_count,
            status = %self.state.status,
            "guess applied"
        );

        Ok(GuessResult {
            letter,
            outcome,
            status: self.state.status,
        })
    }

    pub fn submit_letter(&mut self, letter: char) -> Result<GuessResult> {
        let mut buf = [0u8; 4];
        self.submit_guess(letter.encode_utf8(&mut buf))
    }

    /// Reveals a random letter that has not been guessed yet.
    ///
    /// Hints never count as guesses: the letter is not marked as used and may
    /// still be guessed for credit.
    pub fn request_hint<R>(&mut self, rng: &mut R) -> Result<HintResult>
    where
        R: Rng + ?Sized,
    {
        self.ensure_in_progress()?;

        if self.state.hints_used >= self.max_hints {
            return Ok(HintResult::HintBudgetExhausted);
        }

        let candidate = self
            .state
            .word
            .distinct_letters()
            .into_iter()
            .filter(|c| {
                !self.state.correct_letters.contains(c) && !self.state.used_letters.contains(c)
            })
            .choose(rng);

        let Some(letter) = candidate else {
            return Ok(HintResult::NoHintAvailable);
        };

        self.state.hints_used += 1;
        self.hinted.insert(letter);
        tracing::debug!(%letter, hints_used = self.state.hints_used, "hint revealed");
        Ok(HintResult::Revealed(letter))
    }

    /// Points for this round; `None` unless the round was won.
    pub fn compute_score(&self) -> Option<u32> {
        (self.state.status == RoundStatus::Won).then(|| {
            round_score(
                self.state.word.len(),
                self.state.error_count,
                self.state.hints_used,
                self.tier,
            )
        })
    }

    fn is_word_complete(&self) -> bool {
        self.state
            .word
            .as_str()
            .chars()
            .all(|c| self.state.correct_letters.contains(&c))
    }
}

fn parse_letter(input: &str) -> Result<char> {
    let mut chars = input.trim().chars();
    let first = chars.next().ok_or(GameError::EmptyInput)?;
    if chars.next().is_some() {
        return Err(GameError::MultiCharInput);
    }
    if !first.is_alphabetic() {
        return Err(GameError::NonAlphabetic { input: first });
    }
    Ok(fold_letter(first))
}
