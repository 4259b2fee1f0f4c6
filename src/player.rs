use crate::error::{GameError, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Cumulative results for one player. Only changed between rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub name: String,
    pub total_score: u64,
    pub games_played: u32,
    pub games_won: u32,
    pub total_errors: u32,
    pub total_hints_used: u32,
    pub created_at: DateTime<Local>,
    pub last_played_at: Option<DateTime<Local>>,
}

impl PlayerStats {
    pub fn new(name: impl Into<String>) -> Self {
        Self::created_at(name, Local::now())
    }

    pub fn created_at(name: impl Into<String>, at: DateTime<Local>) -> Self {
        Self {
            name: name.into(),
            total_score: 0,
            games_played: 0,
            games_won: 0,
            total_errors: 0,
            total_hints_used: 0,
            created_at: at,
            last_played_at: None,
        }
    }

    pub fn add_win(&mut self, points: u32, errors: u32, hints: u32, at: DateTime<Local>) {
        self.total_score += u64::from(points);
        self.games_won += 1;
        self.record_game(errors, hints, at);
    }

    pub fn add_loss(&mut self, errors: u32, hints: u32, at: DateTime<Local>) {
        self.record_game(errors, hints, at);
    }

    fn record_game(&mut self, errors: u32, hints: u32, at: DateTime<Local>) {
        self.games_played += 1;
        self.total_errors += errors;
        self.total_hints_used += hints;
        self.last_played_at = Some(at);
    }

    pub fn games_lost(&self) -> u32 {
        self.games_played - self.games_won
    }

    /// Percentage of rounds won, 0 before the first round.
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        f64::from(self.games_won) / f64::from(self.games_played) * 100.0
    }

    pub fn average_errors(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        f64::from(self.total_errors) / f64::from(self.games_played)
    }
}

impl fmt::Display for PlayerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} pts | wins {}/{}",
            self.name, self.total_score, self.games_won, self.games_played
        )
    }
}

/// Case-insensitive name order.
pub fn cmp_by_name(a: &PlayerStats, b: &PlayerStats) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

pub fn same_player(a: &PlayerStats, b: &PlayerStats) -> bool {
    cmp_by_name(a, b) == Ordering::Equal
}

/// Highest score first.
pub fn cmp_by_score(a: &PlayerStats, b: &PlayerStats) -> Ordering {
    b.total_score.cmp(&a.total_score)
}

/// Combines the records of the same player kept in two places.
///
/// Counters add up, the earliest creation time and the latest play time win.
/// The name is taken from `a`.
pub fn merge_stats(a: &PlayerStats, b: &PlayerStats) -> Result<PlayerStats> {
    if !same_player(a, b) {
        return Err(GameError::NameMismatch {
            left: a.name.clone(),
            right: b.name.clone(),
        });
    }

    Ok(PlayerStats {
        name: a.name.clone(),
        total_score: a.total_score + b.total_score,
        games_played: a.games_played + b.games_played,
        games_won: a.games_won + b.games_won,
        total_errors: a.total_errors + b.total_errors,
        total_hints_used: a.total_hints_used + b.total_hints_used,
        created_at: a.created_at.min(b.created_at),
        last_played_at: a.last_played_at.max(b.last_played_at),
    })
}

/// Merges duplicates by name and orders the result by score.
pub fn consolidate(players: Vec<PlayerStats>) -> Vec<PlayerStats> {
    let mut sorted = players;
    sorted.sort_by(cmp_by_name);

    let mut merged: Vec<PlayerStats> = Vec::with_capacity(sorted.len());
    for player in sorted {
        match merged.last_mut() {
            Some(last) if same_player(last, &player) => {
                if let Ok(combined) = merge_stats(last, &player) {
                    *last = combined;
                }
            }
            _ => merged.push(player),
        }
    }

    merged.sort_by(|a, b| cmp_by_score(a, b).then_with(|| cmp_by_name(a, b)));
    merged
}
