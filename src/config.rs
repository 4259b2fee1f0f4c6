use crate::app_dirs::AppDirs;
use crate::difficulty::DifficultyTier;
use crate::round::DEFAULT_MAX_HINTS;
use crate::word_source::DEFAULT_PACK;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Terminal colors the theme can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
pub enum ThemeColor {
    Reset,
    White,
    Gray,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

/// Colors used by the presenters, one per kind of message plus the word and
/// gallows art.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub info: ThemeColor,
    pub error: ThemeColor,
    pub warning: ThemeColor,
    pub success: ThemeColor,
    pub hint: ThemeColor,
    pub word: ThemeColor,
    pub gallows: ThemeColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            info: ThemeColor::Cyan,
            error: ThemeColor::Red,
            warning: ThemeColor::Yellow,
            success: ThemeColor::Green,
            hint: ThemeColor::Magenta,
            word: ThemeColor::White,
            gallows: ThemeColor::Gray,
        }
    }
}

impl Theme {
    /// No colors at all, for dumb terminals and pipes.
    pub fn monochrome() -> Self {
        Self {
            info: ThemeColor::Reset,
            error: ThemeColor::Reset,
            warning: ThemeColor::Reset,
            success: ThemeColor::Reset,
            hint: ThemeColor::Reset,
            word: ThemeColor::Reset,
            gallows: ThemeColor::Reset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBackend {
    #[default]
    Sqlite,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub player_name: Option<String>,
    pub difficulty: DifficultyTier,
    pub max_hints: u32,
    pub word_list: Option<PathBuf>,
    pub word_pack: String,
    pub score_backend: ScoreBackend,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player_name: None,
            difficulty: DifficultyTier::Normal,
            max_hints: DEFAULT_MAX_HINTS,
            word_list: None,
            word_pack: DEFAULT_PACK.to_string(),
            score_backend: ScoreBackend::Sqlite,
            theme: Theme::default(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("gallows_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            player_name: Some("ana".into()),
            difficulty: DifficultyTier::Expert,
            max_hints: 5,
            word_list: Some(PathBuf::from("/tmp/words.txt")),
            word_pack: "general".into(),
            score_backend: ScoreBackend::Csv,
            theme: Theme::monochrome(),
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_or_corrupt_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        assert_eq!(store.load(), Config::default());

        fs::write(&path, b"{ not json").unwrap();
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "difficulty": "hard", "theme": { "hint": "cyan" } }"#,
        )
        .unwrap();

        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.difficulty, DifficultyTier::Hard);
        assert_eq!(cfg.max_hints, DEFAULT_MAX_HINTS);
        assert_eq!(cfg.theme.hint, ThemeColor::Cyan);
        assert_eq!(cfg.theme.error, ThemeColor::Red);
    }
}
