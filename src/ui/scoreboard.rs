use chrono::{DateTime, Local};
use gallows::scores::{best_per_player, leaderboard, ScoreRecord, LEADERBOARD_SIZE};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use time_humanize::HumanTime;
use unicode_width::UnicodeWidthStr;

use crate::{ui::color, App};

/// "3 minutes ago" style age of a score.
pub fn relative_time(at: DateTime<Local>, now: DateTime<Local>) -> String {
    let secs = now.signed_duration_since(at).num_seconds().max(0);
    if secs < 10 {
        return "just now".to_string();
    }
    HumanTime::from_seconds(-secs).to_string()
}

/// Name column wide enough for the longest name, header included.
fn name_width(records: &[ScoreRecord]) -> u16 {
    records
        .iter()
        .map(|r| r.player.width())
        .chain(std::iter::once("Player".width()))
        .max()
        .unwrap_or(0) as u16
}

pub fn best_rows(records: &[ScoreRecord]) -> Vec<Row<'static>> {
    best_per_player(records)
        .into_iter()
        .take(LEADERBOARD_SIZE)
        .enumerate()
        .map(|(i, r)| {
            Row::new(vec![
                Cell::from(format!("{}.", i + 1)),
                Cell::from(r.player).style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(r.score.to_string()),
            ])
        })
        .collect()
}

pub fn recent_rows(records: &[ScoreRecord], now: DateTime<Local>) -> Vec<Row<'static>> {
    leaderboard(records, LEADERBOARD_SIZE)
        .iter()
        .rev()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.player.clone()),
                Cell::from(r.score.to_string()),
                Cell::from(relative_time(r.timestamp, now)).style(Style::default().fg(Color::Gray)),
            ])
        })
        .collect()
}

pub fn render_scoreboard(app: &App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    let title = Paragraph::new("Scoreboard")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(color(app.theme.info))
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(title, chunks[0]);

    if app.scores.is_empty() {
        let no_data = Paragraph::new("No scores yet. Finish a round to get on the board.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(no_data, chunks[1]);
    } else {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);
        let names = name_width(&app.scores);
        let header_style = Style::default().add_modifier(Modifier::UNDERLINED);

        let best = Table::new(
            best_rows(&app.scores),
            [
                Constraint::Length(4),
                Constraint::Length(names),
                Constraint::Min(6),
            ],
        )
        .header(Row::new(vec!["#", "Player", "Total"]).style(header_style))
        .block(Block::default().borders(Borders::ALL).title("Best"))
        .column_spacing(2);
        f.render_widget(best, halves[0]);

        let recent = Table::new(
            recent_rows(&app.scores, Local::now()),
            [
                Constraint::Length(names),
                Constraint::Length(6),
                Constraint::Min(10),
            ],
        )
        .header(Row::new(vec!["Player", "Total", "When"]).style(header_style))
        .block(Block::default().borders(Borders::ALL).title("Recent"))
        .column_spacing(2);
        f.render_widget(recent, halves[1]);
    }

    let instructions = Paragraph::new("(b/backspace) back  (n) next round  (q) quit")
        .alignment(Alignment::Center);
    f.render_widget(instructions, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(player: &str, score: u64) -> ScoreRecord {
        ScoreRecord {
            player: player.to_string(),
            score,
            timestamp: Local::now(),
        }
    }

    #[test]
    fn test_relative_time_recent() {
        let now = Local::now();
        assert_eq!(relative_time(now, now), "just now");
        assert_eq!(relative_time(now + Duration::minutes(5), now), "just now");
    }

    #[test]
    fn test_relative_time_past() {
        let now = Local::now();
        let text = relative_time(now - Duration::hours(3), now);
        assert!(text.contains("hour"), "{text}");
    }

    #[test]
    fn test_name_width_fits_longest() {
        let records = vec![record("ana", 10), record("bartholomew", 20)];
        assert_eq!(name_width(&records), 11);
        assert_eq!(name_width(&[]), 6);
    }

    #[test]
    fn test_rows_are_capped() {
        let records: Vec<ScoreRecord> = (0..15)
            .map(|i| record(&format!("p{i}"), i * 10))
            .collect();
        assert_eq!(best_rows(&records).len(), LEADERBOARD_SIZE);
        assert_eq!(recent_rows(&records, Local::now()).len(), LEADERBOARD_SIZE);
    }
}
