// Library surface for headless/integration tests and reuse.
// The ratatui frontend stays in the binary.
pub mod app_dirs;
pub mod art;
pub mod config;
pub mod difficulty;
pub mod driver;
pub mod error;
pub mod logging;
pub mod player;
pub mod presenter;
pub mod round;
pub mod runtime;
pub mod scores;
pub mod scoring;
pub mod session;
pub mod word;
pub mod word_source;

pub use difficulty::{select_word, DifficultyTier};
pub use error::{GameError, Result};
pub use player::{merge_stats, PlayerStats};
pub use round::{GuessResult, HintResult, Outcome, RoundEngine, RoundStatus};
pub use session::GameSession;
pub use word::Word;
