use crate::difficulty::{select_word, DifficultyTier};
use crate::error::{GameError, Result};
use crate::player::PlayerStats;
use crate::round::{GuessResult, HintResult, RoundEngine, RoundStatus, DEFAULT_MAX_HINTS};
use crate::scores::{ScoreRecord, ScoreSink};
use crate::word::Word;
use crate::word_source::WordSource;
use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub tier: DifficultyTier,
    pub max_hints: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tier: DifficultyTier::Normal,
            max_hints: DEFAULT_MAX_HINTS,
        }
    }
}

/// How a finished round went, kept for the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub word: Word,
    pub tier: DifficultyTier,
    pub status: RoundStatus,
    pub score: u32,
    pub errors: u32,
    pub hints: u32,
}

impl RoundSummary {
    pub fn won(&self) -> bool {
        self.status == RoundStatus::Won
    }
}

/// One player's run of rounds.
///
/// Player statistics only change when a round ends. The score sink is told
/// about every finished round; if it fails the game carries on.
pub struct GameSession {
    config: SessionConfig,
    words: Vec<Word>,
    player: PlayerStats,
    sink: Box<dyn ScoreSink>,
    rng: StdRng,
    round: Option<RoundEngine>,
    last_summary: Option<RoundSummary>,
}

impl GameSession {
    pub fn new(
        player: PlayerStats,
        words: Vec<Word>,
        config: SessionConfig,
        sink: Box<dyn ScoreSink>,
    ) -> Self {
        Self {
            config,
            words,
            player,
            sink,
            rng: StdRng::from_entropy(),
            round: None,
            last_summary: None,
        }
    }

    /// Loads the words up front; a missing word list stops the game here.
    pub fn from_source(
        player: PlayerStats,
        source: &dyn WordSource,
        config: SessionConfig,
        sink: Box<dyn ScoreSink>,
    ) -> Result<Self> {
        let words = source.load_words()?;
        Ok(Self::new(player, words, config, sink))
    }

    /// Makes word picks and hints reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn player(&self) -> &PlayerStats {
        &self.player
    }

    /// Renames the player, e.g. once the name prompt is answered.
    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player.name = name.into();
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Applies from the next round on.
    pub fn set_tier(&mut self, tier: DifficultyTier) {
        self.config.tier = tier;
    }

    pub fn round(&self) -> Option<&RoundEngine> {
        self.round.as_ref()
    }

    pub fn last_summary(&self) -> Option<&RoundSummary> {
        self.last_summary.as_ref()
    }

    pub fn in_round(&self) -> bool {
        self.round.as_ref().is_some_and(|r| !r.has_finished())
    }

    /// Picks a word and starts a fresh round. An unfinished round is dropped
    /// without touching the player's statistics.
    pub fn start_round(&mut self) -> Result<&RoundEngine> {
        let word = select_word(&self.words, self.config.tier, &mut self.rng)?;

        if self.in_round() {
            tracing::info!(player = %self.player.name, "abandoning unfinished round");
        }
        tracing::info!(tier = %self.config.tier, length = word.len(), "round started");

        let round = RoundEngine::with_max_hints(word, self.config.tier, self.config.max_hints);
        Ok(&*self.round.insert(round))
    }

    pub fn guess(&mut self, input: &str) -> Result<GuessResult> {
        let round = self.round.as_mut().ok_or(GameError::InvalidTransition)?;
        let result = round.submit_guess(input)?;
        if result.status.is_terminal() {
            self.finish_round();
        }
        Ok(result)
    }

    pub fn hint(&mut self) -> Result<HintResult> {
        let round = self.round.as_mut().ok_or(GameError::InvalidTransition)?;
        round.request_hint(&mut self.rng)
    }

    /// Every record the score sink knows about, or nothing if it cannot be
    /// read.
    pub fn scores(&self) -> Vec<ScoreRecord> {
        self.sink.read_scores().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read scores");
            vec![]
        })
    }

    fn finish_round(&mut self) {
        let Some(round) = self.round.as_ref() else {
            return;
        };

        let now = Local::now();
        let errors = round.error_count();
        let hints = round.hints_used();
        let score = round.compute_score().unwrap_or(0);

        match round.status() {
            RoundStatus::Won => self.player.add_win(score, errors, hints, now),
            RoundStatus::Lost => self.player.add_loss(errors, hints, now),
            RoundStatus::InProgress => return,
        }

        let summary = RoundSummary {
            word: round.word().clone(),
            tier: round.tier(),
            status: round.status(),
            score,
            errors,
            hints,
        };

        tracing::info!(
            player = %self.player.name,
            word = %summary.word,
            status = %summary.status,
            score,
            total = self.player.total_score,
            "round finished"
        );

        if let Err(e) = self
            .sink
            .record_score(&self.player.name, self.player.total_score)
        {
            tracing::warn!(error = %e, "failed to record score, continuing");
        }

        self.last_summary = Some(summary);
    }
}
