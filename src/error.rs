use thiserror::Error;

/// Everything that can go wrong while setting up or playing a game.
///
/// Guess validation errors are recoverable: the round keeps going and nothing
/// is mutated. Word list errors are fatal to starting a round. Score storage
/// errors are surfaced by the stores but swallowed by the session.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("type a letter to guess")]
    EmptyInput,

    #[error("one letter at a time")]
    MultiCharInput,

    #[error("'{input}' is not a letter")]
    NonAlphabetic { input: char },

    #[error("'{letter}' was already guessed")]
    AlreadyGuessed { letter: char },

    #[error("the round is already over")]
    InvalidTransition,

    #[error("no words to choose from")]
    EmptyWordList,

    #[error("word list unavailable: {reason}")]
    WordListUnavailable { reason: String },

    #[error("'{word}' is not a valid word")]
    InvalidWord { word: String },

    #[error("cannot merge stats of '{left}' and '{right}'")]
    NameMismatch { left: String, right: String },

    #[error("score storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("score file error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GameError {
    /// True for errors caused by a bad guess; the round is untouched.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GameError::EmptyInput
                | GameError::MultiCharInput
                | GameError::NonAlphabetic { .. }
                | GameError::AlreadyGuessed { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
