use crate::error::{GameError, Result};
use crate::word::Word;
use include_dir::{include_dir, Dir};
use itertools::Itertools;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

static PACK_DIR: Dir = include_dir!("src/packs");

pub const DEFAULT_PACK: &str = "programming";

/// Where the words for a game come from.
pub trait WordSource {
    /// Loads every valid word. Fails when nothing usable is found.
    fn load_words(&self) -> Result<Vec<Word>>;

    /// Short label for logs and the status bar.
    fn describe(&self) -> String;
}

/// A word pack compiled into the binary.
#[derive(Deserialize, Clone, Debug)]
pub struct WordPack {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl WordPack {
    pub fn load(name: &str) -> Result<Self> {
        let file = PACK_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| GameError::WordListUnavailable {
                reason: format!(
                    "no word pack named '{name}' (available: {})",
                    available_packs().join(", ")
                ),
            })?;

        let contents = file
            .contents_utf8()
            .ok_or_else(|| GameError::WordListUnavailable {
                reason: format!("word pack '{name}' is not valid UTF-8"),
            })?;

        Ok(serde_json::from_str(contents)?)
    }
}

/// Names of the packs shipped with the game, sorted.
pub fn available_packs() -> Vec<String> {
    PACK_DIR
        .files()
        .filter_map(|f| f.path().file_stem())
        .filter_map(|stem| stem.to_str())
        .map(str::to_string)
        .sorted()
        .collect()
}

#[derive(Debug, Clone)]
pub struct EmbeddedWordSource {
    pack: String,
}

impl EmbeddedWordSource {
    pub fn new(pack: impl Into<String>) -> Self {
        Self { pack: pack.into() }
    }
}

impl Default for EmbeddedWordSource {
    fn default() -> Self {
        Self::new(DEFAULT_PACK)
    }
}

impl WordSource for EmbeddedWordSource {
    fn load_words(&self) -> Result<Vec<Word>> {
        let pack = WordPack::load(&self.pack)?;
        collect_words(pack.words.iter().map(String::as_str), &self.describe())
    }

    fn describe(&self) -> String {
        format!("pack:{}", self.pack)
    }
}

/// A plain-text word list, one word per line.
#[derive(Debug, Clone)]
pub struct FileWordSource {
    path: PathBuf,
}

impl FileWordSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl WordSource for FileWordSource {
    fn load_words(&self) -> Result<Vec<Word>> {
        let contents =
            fs::read_to_string(&self.path).map_err(|e| GameError::WordListUnavailable {
                reason: format!("{}: {e}", self.path.display()),
            })?;
        collect_words(contents.lines(), &self.describe())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A fixed list held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticWordSource {
    words: Vec<String>,
}

impl StaticWordSource {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl WordSource for StaticWordSource {
    fn load_words(&self) -> Result<Vec<Word>> {
        collect_words(self.words.iter().map(String::as_str), &self.describe())
    }

    fn describe(&self) -> String {
        format!("{} built-in words", self.words.len())
    }
}

/// Keeps the valid entries (trimmed, lowercased, deduplicated, in order).
fn collect_words<'a, I>(entries: I, origin: &str) -> Result<Vec<Word>>
where
    I: Iterator<Item = &'a str>,
{
    let mut skipped = 0usize;
    let words: Vec<Word> = entries
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match Word::parse(line) {
            Ok(word) => Some(word),
            Err(_) => {
                skipped += 1;
                None
            }
        })
        .unique()
        .collect();

    if skipped > 0 {
        tracing::warn!(origin, skipped, "ignored invalid word list entries");
    }

    if words.is_empty() {
        return Err(GameError::WordListUnavailable {
            reason: format!("{origin} has no usable words"),
        });
    }

    tracing::info!(origin, count = words.len(), "word list loaded");
    Ok(words)
}
