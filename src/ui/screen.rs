use ratatui::Frame;

use crate::{
    ui::{render_name_entry, render_round, scoreboard::render_scoreboard},
    App, AppState,
};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

pub struct NameEntryScreen;

impl Screen for NameEntryScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_name_entry(app, f);
    }
}

/// The round in play, and the same view with a summary once it is over
pub struct RoundScreen;

impl Screen for RoundScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_round(app, f);
    }
}

pub struct ScoreboardScreen;

impl Screen for ScoreboardScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_scoreboard(app, f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::NameEntry => Box::new(NameEntryScreen),
        AppState::Playing | AppState::RoundOver => Box::new(RoundScreen),
        AppState::Scoreboard => Box::new(ScoreboardScreen),
    }
}
