use crate::error::{GameError, Result};
use crate::word::Word;
use clap::ValueEnum;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Difficulty tiers. Harder tiers allow fewer mistakes, pick longer words,
/// and pay a larger flat bonus on a win.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Easy,
        DifficultyTier::Normal,
        DifficultyTier::Hard,
        DifficultyTier::Expert,
    ];

    /// Wrong guesses allowed before the round is lost.
    pub fn error_budget(self) -> u32 {
        match self {
            DifficultyTier::Easy => 8,
            DifficultyTier::Normal => 6,
            DifficultyTier::Hard => 4,
            DifficultyTier::Expert => 3,
        }
    }

    pub fn length_range(self) -> RangeInclusive<usize> {
        match self {
            DifficultyTier::Easy => 3..=6,
            DifficultyTier::Normal => 5..=8,
            DifficultyTier::Hard => 7..=10,
            DifficultyTier::Expert => 9..=15,
        }
    }

    pub fn min_length(self) -> usize {
        *self.length_range().start()
    }

    pub fn max_length(self) -> usize {
        *self.length_range().end()
    }

    /// Ordinal position, Easy = 1 through Expert = 4.
    pub fn rank(self) -> u32 {
        match self {
            DifficultyTier::Easy => 1,
            DifficultyTier::Normal => 2,
            DifficultyTier::Hard => 3,
            DifficultyTier::Expert => 4,
        }
    }

    pub fn accepts(self, word: &Word) -> bool {
        self.length_range().contains(&word.len())
    }
}

/// Picks a word for `tier` uniformly at random.
///
/// Only words whose length fits the tier are considered. When none fit, the
/// whole list is used instead, so a round can always start as long as there
/// is at least one word.
pub fn select_word<R>(candidates: &[Word], tier: DifficultyTier, rng: &mut R) -> Result<Word>
where
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return Err(GameError::EmptyWordList);
    }

    let suitable: Vec<&Word> = candidates.iter().filter(|w| tier.accepts(w)).collect();

    let picked = if suitable.is_empty() {
        tracing::debug!(%tier, candidates = candidates.len(), "no word fits tier, using full list");
        candidates.choose(rng)
    } else {
        suitable.choose(rng).copied()
    };

    picked.cloned().ok_or(GameError::EmptyWordList)
}
