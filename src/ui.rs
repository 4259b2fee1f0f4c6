pub mod scoreboard;
pub mod screen;

use gallows::{
    art::{gallows_art, spaced},
    config::ThemeColor,
    Outcome, RoundStatus,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

pub fn color(c: ThemeColor) -> Color {
    match c {
        ThemeColor::Reset => Color::Reset,
        ThemeColor::White => Color::White,
        ThemeColor::Gray => Color::Gray,
        ThemeColor::Red => Color::Red,
        ThemeColor::Green => Color::Green,
        ThemeColor::Yellow => Color::Yellow,
        ThemeColor::Blue => Color::Blue,
        ThemeColor::Magenta => Color::Magenta,
        ThemeColor::Cyan => Color::Cyan,
    }
}

pub fn draw(app: &App, f: &mut Frame) {
    screen::current_screen(&app.state).render(app, f);
}

fn header(app: &App) -> Line<'static> {
    let player = app.session.player();
    let bold = Style::default().add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled("gallows", bold.fg(color(app.theme.info))),
        Span::raw(format!("  {}", player.name)),
        Span::styled(
            format!("  {}", app.session.config().tier),
            Style::default().add_modifier(Modifier::ITALIC),
        ),
        Span::styled(format!("  {} pts", player.total_score), bold),
    ])
}

fn flash_line(app: &App) -> Line<'static> {
    match &app.flash {
        Some(flash) => Line::from(Span::styled(
            flash.text.clone(),
            Style::default().fg(color(app.theme.color_for(flash.kind))),
        )),
        None => Line::default(),
    }
}

fn help_line(state: AppState) -> Line<'static> {
    let text = match state {
        AppState::Playing => "type a letter to guess   ? hint   esc quit",
        _ => "n next round   s scoreboard   1-4 difficulty   q quit",
    };
    Line::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::DIM),
    ))
}

/// Gallows on the left, word and counters on the right.
pub fn render_round(app: &App, f: &mut Frame) {
    let Some(round) = app.session.round() else {
        return;
    };
    let finished = app.state == AppState::RoundOver;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(9),
            Constraint::Length(if finished { 4 } else { 0 }),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(f.area());

    f.render_widget(Paragraph::new(header(app)), chunks[0]);

    let art = gallows_art(round.error_count(), round.error_budget());
    let art_width = art.lines().map(UnicodeWidthStr::width).max().unwrap_or(0) as u16 + 4;
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(art_width), Constraint::Min(10)])
        .split(chunks[1]);

    f.render_widget(
        Paragraph::new(art).style(Style::default().fg(color(app.theme.gallows))),
        body[0],
    );

    let bold = Style::default().add_modifier(Modifier::BOLD);
    // guesses in the order they were made, colored by outcome
    let mut guesses = vec![Span::raw("Guesses: ")];
    for guess in round.history() {
        let style = match guess.outcome {
            Outcome::Correct => Style::default().fg(color(app.theme.success)),
            Outcome::Incorrect => Style::default().fg(color(app.theme.error)),
        };
        guesses.push(Span::styled(format!("{} ", guess.letter), style));
    }
    let mut lines = vec![
        Line::from(Span::styled(
            spaced(&round.masked_word()),
            bold.fg(color(app.theme.word)),
        )),
        Line::default(),
        Line::from(guesses),
        Line::from(format!(
            "Errors: {}/{}",
            round.error_count(),
            round.error_budget()
        )),
        Line::from(format!("Hints: {}/{}", round.hints_used(), round.max_hints())),
    ];
    if !round.hinted_letters().is_empty() {
        let hinted: Vec<String> = round.hinted_letters().iter().map(char::to_string).collect();
        lines.push(Line::from(Span::styled(
            format!("Hinted: {}", hinted.join(" ")),
            Style::default().fg(color(app.theme.hint)),
        )));
    }
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        body[1],
    );

    if finished {
        render_summary(app, f, chunks[2]);
    }

    f.render_widget(
        Paragraph::new(flash_line(app)).wrap(Wrap { trim: true }),
        chunks[3],
    );
    f.render_widget(Paragraph::new(help_line(app.state)), chunks[4]);
}

fn render_summary(app: &App, f: &mut Frame, area: Rect) {
    let Some(summary) = app.session.last_summary() else {
        return;
    };
    let player = app.session.player();

    let (verdict, verdict_color) = match summary.status {
        RoundStatus::Won => ("WON", app.theme.success),
        _ => ("LOST", app.theme.error),
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(
                verdict,
                Style::default()
                    .fg(color(verdict_color))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "  {}  +{} pts  {} errors  {} hints",
                summary.word.as_str().to_uppercase(),
                summary.score,
                summary.errors,
                summary.hints
            )),
        ]),
        Line::from(format!(
            "{} won, {} lost ({:.0}%)  {:.1} errors per game",
            player.games_won,
            player.games_lost(),
            player.win_rate(),
            player.average_errors()
        )),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::TOP)),
        area,
    );
}

pub fn render_name_entry(app: &App, f: &mut Frame) {
    let area = f.area();
    let prompt = "What's your name?";
    let input = format!("{}_", app.name_input);
    let top = area.height.saturating_sub(3) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(top),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled(
            prompt,
            Style::default()
                .fg(color(app.theme.info))
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        chunks[1],
    );
    f.render_widget(
        Paragraph::new(input).alignment(Alignment::Center),
        chunks[2],
    );
}
