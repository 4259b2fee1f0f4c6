use crate::error::Result;
use chrono::{DateTime, Local};
use itertools::Itertools;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// How many records the scoreboard shows.
pub const LEADERBOARD_SIZE: usize = 10;

/// One line of the scoreboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player: String,
    pub score: u64,
    pub timestamp: DateTime<Local>,
}

/// Where finished rounds are reported. Callers treat failures as non-fatal.
pub trait ScoreSink {
    fn record_score(&mut self, player: &str, score: u64) -> Result<()>;

    /// All records, oldest first.
    fn read_scores(&self) -> Result<Vec<ScoreRecord>>;
}

/// Scores kept in a SQLite database.
#[derive(Debug)]
pub struct SqliteScoreStore {
    conn: Connection,
}

impl SqliteScoreStore {
    /// Opens (creating if needed) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS scores (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                player TEXT NOT NULL,
                score INTEGER NOT NULL,
                timestamp TEXT NOT NULL
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_scores_player ON scores(player)",
            [],
        )?;

        Ok(Self { conn })
    }

    pub fn record_at(&self, player: &str, score: u64, at: DateTime<Local>) -> Result<()> {
        self.conn.execute(
            "INSERT INTO scores (player, score, timestamp) VALUES (?1, ?2, ?3)",
            params![player, score as i64, at.to_rfc3339()],
        )?;
        Ok(())
    }

    /// Highest score ever recorded for `player` (case-insensitive).
    pub fn best_score(&self, player: &str) -> Result<Option<u64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT MAX(score) FROM scores WHERE lower(player) = lower(?1)")?;
        let best: Option<i64> = stmt.query_row([player], |row| row.get(0))?;
        Ok(best.map(|s| s.max(0) as u64))
    }

}

impl ScoreSink for SqliteScoreStore {
    fn record_score(&mut self, player: &str, score: u64) -> Result<()> {
        self.record_at(player, score, Local::now())
    }

    fn read_scores(&self) -> Result<Vec<ScoreRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT player, score, timestamp FROM scores ORDER BY id ASC")?;

        let rows = stmt.query_map([], |row| {
            let timestamp: String = row.get(2)?;
            let timestamp = DateTime::parse_from_rfc3339(&timestamp)
                .map_err(|_| {
                    rusqlite::Error::InvalidColumnType(
                        2,
                        "timestamp".to_string(),
                        rusqlite::types::Type::Text,
                    )
                })?
                .with_timezone(&Local);
            let score: i64 = row.get(1)?;

            Ok(ScoreRecord {
                player: row.get(0)?,
                score: score.max(0) as u64,
                timestamp,
            })
        })?;

        let mut records = Vec::new();
        for record in rows {
            records.push(record?);
        }
        Ok(records)
    }
}

/// Scores appended to a CSV file with a `player,score,timestamp` header.
#[derive(Debug, Clone)]
pub struct CsvScoreStore {
    path: PathBuf,
}

impl CsvScoreStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn record_at(&self, player: &str, score: u64, at: DateTime<Local>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Only an empty file gets the header row
        let needs_header = fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);

        writer.serialize(ScoreRecord {
            player: player.to_string(),
            score,
            timestamp: at,
        })?;
        writer.flush()?;
        Ok(())
    }
}

impl ScoreSink for CsvScoreStore {
    fn record_score(&mut self, player: &str, score: u64) -> Result<()> {
        self.record_at(player, score, Local::now())
    }

    fn read_scores(&self) -> Result<Vec<ScoreRecord>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for record in reader.deserialize() {
            records.push(record?);
        }
        Ok(records)
    }
}

/// Keeps records in memory only; used when nothing should touch the disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    records: Vec<ScoreRecord>,
}

impl ScoreSink for MemoryScoreStore {
    fn record_score(&mut self, player: &str, score: u64) -> Result<()> {
        self.records.push(ScoreRecord {
            player: player.to_string(),
            score,
            timestamp: Local::now(),
        });
        Ok(())
    }

    fn read_scores(&self) -> Result<Vec<ScoreRecord>> {
        Ok(self.records.clone())
    }
}

/// The last `limit` records, oldest first.
pub fn leaderboard(records: &[ScoreRecord], limit: usize) -> &[ScoreRecord] {
    let start = records.len().saturating_sub(limit);
    &records[start..]
}

/// Best record of each player (names compared case-insensitively), highest
/// score first; ties go to the earlier record.
pub fn best_per_player(records: &[ScoreRecord]) -> Vec<ScoreRecord> {
    records
        .iter()
        .into_group_map_by(|r| r.player.to_lowercase())
        .into_values()
        .filter_map(|group| {
            group
                .into_iter()
                .max_by(|a, b| a.score.cmp(&b.score).then(b.timestamp.cmp(&a.timestamp)))
                .cloned()
        })
        .sorted_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.player.to_lowercase().cmp(&b.player.to_lowercase()))
        })
        .collect()
}
