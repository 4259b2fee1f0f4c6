mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use gallows::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore, ScoreBackend, Theme},
    driver, logging,
    player::PlayerStats,
    presenter::{ConsolePresenter, MessageKind, Presenter},
    runtime::{key_action, Action, ChannelEventSource, GameEvent, Runner},
    scores::{CsvScoreStore, MemoryScoreStore, ScoreRecord, ScoreSink, SqliteScoreStore},
    session::{GameSession, SessionConfig},
    word_source::{EmbeddedWordSource, FileWordSource, WordSource},
    DifficultyTier, HintResult, Outcome,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;
/// Ticks a status message stays on screen.
const FLASH_TICKS: u16 = 30;
const DEFAULT_PLAYER: &str = "Player";
const MAX_NAME_LEN: usize = 20;

/// hangman in the terminal, with difficulty tiers, hints and a scoreboard
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess the hidden word one letter at a time before the gallows is complete. Harder tiers pick longer words and allow fewer mistakes; scores are kept between runs."
)]
pub struct Cli {
    /// player name shown on the scoreboard
    #[clap(short = 'n', long)]
    name: Option<String>,

    /// difficulty tier for the first round
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<DifficultyTier>,

    /// hints allowed per round
    #[clap(long)]
    hints: Option<u32>,

    /// plain-text word list, one word per line
    #[clap(short = 'w', long)]
    words: Option<PathBuf>,

    /// built-in word pack to play with
    #[clap(short = 'p', long)]
    pack: Option<String>,

    /// where scores are kept
    #[clap(long, value_enum)]
    scores: Option<ScoreBackend>,

    /// play line by line instead of in the full-screen interface
    #[clap(long)]
    plain: bool,

    /// store the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,

    /// print the scoreboard and exit
    #[clap(long)]
    scoreboard: bool,
}

impl Cli {
    /// Command line flags win over the stored config.
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(name) = &self.name {
            cfg.player_name = Some(name.clone());
        }
        if let Some(tier) = self.difficulty {
            cfg.difficulty = tier;
        }
        if let Some(hints) = self.hints {
            cfg.max_hints = hints;
        }
        if let Some(pack) = &self.pack {
            cfg.word_pack = pack.clone();
            cfg.word_list = None;
        }
        if let Some(words) = &self.words {
            cfg.word_list = Some(words.clone());
        }
        if let Some(backend) = self.scores {
            cfg.score_backend = backend;
        }
        cfg
    }
}

fn word_source(cfg: &Config) -> Box<dyn WordSource> {
    match &cfg.word_list {
        Some(path) => Box::new(FileWordSource::new(path)),
        None => Box::new(EmbeddedWordSource::new(cfg.word_pack.clone())),
    }
}

/// Opens the configured score store. Scores are kept in memory only when it
/// cannot be opened.
fn score_sink(backend: ScoreBackend) -> Box<dyn ScoreSink> {
    match backend {
        ScoreBackend::Sqlite => match AppDirs::scores_db_path().map(SqliteScoreStore::open) {
            Some(Ok(store)) => return Box::new(store),
            Some(Err(e)) => tracing::warn!(error = %e, "cannot open score database"),
            None => tracing::warn!("no state directory for the score database"),
        },
        ScoreBackend::Csv => match AppDirs::scores_csv_path() {
            Some(path) => return Box::new(CsvScoreStore::new(path)),
            None => tracing::warn!("no state directory for the score file"),
        },
    }
    tracing::warn!("scores will not outlive this run");
    Box::new(MemoryScoreStore::default())
}

fn clean_name(input: &str) -> String {
    let name: String = input.trim().chars().take(MAX_NAME_LEN).collect();
    if name.is_empty() {
        DEFAULT_PLAYER.to_string()
    } else {
        name
    }
}

fn ask_name<P: Presenter>(presenter: &mut P) -> io::Result<String> {
    let answer = presenter.prompt_line("What's your name?")?;
    Ok(clean_name(answer.as_deref().unwrap_or_default()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    NameEntry,
    Playing,
    RoundOver,
    Scoreboard,
}

/// A status line that fades after a few ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: MessageKind,
    pub text: String,
    ticks_left: u16,
}

pub struct App {
    pub session: GameSession,
    pub state: AppState,
    pub theme: Theme,
    pub name_input: String,
    pub flash: Option<Flash>,
    /// Snapshot taken when the scoreboard is opened.
    pub scores: Vec<ScoreRecord>,
}

impl App {
    pub fn new(session: GameSession, theme: Theme, ask_name: bool) -> Self {
        let mut app = Self {
            session,
            state: AppState::NameEntry,
            theme,
            name_input: String::new(),
            flash: None,
            scores: vec![],
        };
        if !ask_name {
            app.next_round();
        }
        app
    }

    fn say(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.flash = Some(Flash {
            kind,
            text: text.into(),
            ticks_left: FLASH_TICKS,
        });
    }

    pub fn on_tick(&mut self) {
        if let Some(flash) = &mut self.flash {
            flash.ticks_left = flash.ticks_left.saturating_sub(1);
            if flash.ticks_left == 0 {
                self.flash = None;
            }
        }
    }

    /// Returns false once the player asks to leave.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if self.state == AppState::NameEntry {
            return self.on_name_key(key);
        }

        let Some(action) = key_action(&key, self.state == AppState::Playing) else {
            return true;
        };
        match action {
            Action::Quit => return false,
            Action::Guess(letter) => self.guess(letter),
            Action::Hint => self.hint(),
            Action::NextRound => self.next_round(),
            Action::Scoreboard => {
                self.scores = self.session.scores();
                self.state = AppState::Scoreboard;
            }
            Action::Back => {
                if self.state == AppState::Scoreboard {
                    self.state = AppState::RoundOver;
                }
            }
            Action::SetTier(tier) => {
                self.session.set_tier(tier);
                self.say(MessageKind::Info, format!("Next round: {tier}"));
            }
        }
        true
    }

    fn on_name_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return true;
        }
        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Enter => {
                let name = clean_name(&self.name_input);
                self.session.set_player_name(name);
                self.next_round();
            }
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Char(c) if !c.is_control() && self.name_input.chars().count() < MAX_NAME_LEN => {
                self.name_input.push(c)
            }
            _ => {}
        }
        true
    }

    fn next_round(&mut self) {
        match self.session.start_round() {
            Ok(_) => {
                self.state = AppState::Playing;
                self.flash = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "could not start a round");
                self.say(MessageKind::Error, e.to_string());
            }
        }
    }

    fn guess(&mut self, letter: char) {
        match self.session.guess(&letter.to_string()) {
            Ok(result) => {
                match result.outcome {
                    Outcome::Correct => {
                        self.say(MessageKind::Success, format!("'{}' is in the word.", result.letter))
                    }
                    Outcome::Incorrect => {
                        self.say(MessageKind::Error, format!("'{}' is not in the word.", result.letter))
                    }
                }
                if result.status.is_terminal() {
                    self.finish_round();
                }
            }
            Err(e) => self.say(MessageKind::Error, e.to_string()),
        }
    }

    fn hint(&mut self) {
        match self.session.hint() {
            Ok(HintResult::Revealed(letter)) => {
                self.say(MessageKind::Hint, format!("Hint: the word has '{letter}'."))
            }
            Ok(HintResult::HintBudgetExhausted) => {
                self.say(MessageKind::Warning, "No hints left this round.")
            }
            Ok(HintResult::NoHintAvailable) => self.say(MessageKind::Warning, "Nothing left to hint."),
            Err(e) => self.say(MessageKind::Error, e.to_string()),
        }
    }

    fn finish_round(&mut self) {
        self.state = AppState::RoundOver;
        let Some((kind, text)) = self.session.last_summary().map(|summary| {
            let word = summary.word.as_str().to_uppercase();
            if summary.won() {
                (
                    MessageKind::Success,
                    format!("You got it: {word}! +{} points", summary.score),
                )
            } else {
                (MessageKind::Error, format!("Game over! The word was {word}."))
            }
        }) else {
            return;
        };
        self.say(kind, text);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let plain = cli.plain || !stdin().is_tty();

    match AppDirs::log_path() {
        Some(path) => logging::init(&path),
        None => logging::init_stderr(),
    }

    let store = FileConfigStore::new();
    let cfg = cli.apply(store.load());
    if cli.save_config {
        store.save(&cfg)?;
        println!("Settings saved to {}", store.path().display());
    }

    let sink = score_sink(cfg.score_backend);
    if cli.scoreboard {
        let records = sink.read_scores().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read scores");
            vec![]
        });
        for line in driver::scoreboard_lines(&records) {
            println!("{line}");
        }
        return Ok(());
    }

    let source = word_source(&cfg);
    let name = cfg
        .player_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(clean_name);
    let player = PlayerStats::new(name.clone().unwrap_or_else(|| DEFAULT_PLAYER.to_string()));
    let session_cfg = SessionConfig {
        tier: cfg.difficulty,
        max_hints: cfg.max_hints,
    };

    let mut session = match GameSession::from_source(player, source.as_ref(), session_cfg, sink) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(source = %source.describe(), error = %e, "no words to play with");
            Cli::command().error(ErrorKind::Io, e.to_string()).exit()
        }
    };
    tracing::info!(source = %source.describe(), words = session.words().len(), "words loaded");

    if plain {
        let mut presenter = ConsolePresenter::stdio(cfg.theme);
        if name.is_none() {
            let name = ask_name(&mut presenter)?;
            session.set_player_name(name);
        }
        driver::play_session(&mut session, &mut presenter)?;
        return Ok(());
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, cfg.theme, name.is_none());
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    if app.session.player().games_played > 0 {
        println!("{}", app.session.player());
    }
    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        ChannelEventSource::crossterm(),
        Duration::from_millis(TICK_RATE_MS),
    );

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        match runner.step() {
            GameEvent::Key(key) => {
                if !app.on_key(key) {
                    break;
                }
            }
            GameEvent::Resize => {}
            GameEvent::Tick => app.on_tick(),
            GameEvent::Closed => {
                tracing::error!("terminal input closed, leaving");
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallows::word_source::StaticWordSource;
    use ratatui::backend::TestBackend;

    fn session(words: &[&str]) -> GameSession {
        GameSession::from_source(
            PlayerStats::new(DEFAULT_PLAYER),
            &StaticWordSource::new(words.iter().copied()),
            SessionConfig::default(),
            Box::new(MemoryScoreStore::default()),
        )
        .unwrap()
        .with_seed(3)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press_all(app: &mut App, text: &str) {
        for c in text.chars() {
            assert!(app.on_key(key(KeyCode::Char(c))));
        }
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui::draw(app, f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["gallows"]);
        assert_eq!(cli.name, None);
        assert_eq!(cli.difficulty, None);
        assert!(!cli.plain);
        assert!(!cli.scoreboard);

        let cfg = cli.apply(Config::default());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "gallows",
            "-n",
            "ana",
            "--difficulty",
            "expert",
            "--hints",
            "0",
            "--scores",
            "csv",
        ]);
        let cfg = cli.apply(Config::default());
        assert_eq!(cfg.player_name.as_deref(), Some("ana"));
        assert_eq!(cfg.difficulty, DifficultyTier::Expert);
        assert_eq!(cfg.max_hints, 0);
        assert_eq!(cfg.score_backend, ScoreBackend::Csv);
    }

    #[test]
    fn test_cli_word_choice() {
        let stored = Config {
            word_list: Some(PathBuf::from("mine.txt")),
            ..Config::default()
        };

        let cfg = Cli::parse_from(["gallows", "--pack", "general"]).apply(stored.clone());
        assert_eq!(cfg.word_pack, "general");
        assert_eq!(cfg.word_list, None);

        let cfg = Cli::parse_from(["gallows", "-p", "general", "-w", "other.txt"]).apply(stored);
        assert_eq!(cfg.word_list, Some(PathBuf::from("other.txt")));
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("  ana "), "ana");
        assert_eq!(clean_name("   "), DEFAULT_PLAYER);
        assert_eq!(clean_name(&"x".repeat(40)).len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_name_entry_then_round() {
        let mut app = App::new(session(&["python"]), Theme::default(), true);
        assert_eq!(app.state, AppState::NameEntry);

        press_all(&mut app, "anx");
        app.on_key(key(KeyCode::Backspace));
        press_all(&mut app, "a");
        app.on_key(key(KeyCode::Enter));

        assert_eq!(app.state, AppState::Playing);
        assert_eq!(app.session.player().name, "ana");
    }

    #[test]
    fn test_escape_leaves_name_entry() {
        let mut app = App::new(session(&["python"]), Theme::default(), true);
        assert!(!app.on_key(key(KeyCode::Esc)));
    }

    #[test]
    fn test_winning_round_flow() {
        let mut app = App::new(session(&["python"]), Theme::default(), false);
        assert_eq!(app.state, AppState::Playing);

        press_all(&mut app, "pytho");
        assert_eq!(app.state, AppState::Playing);
        press_all(&mut app, "n");

        assert_eq!(app.state, AppState::RoundOver);
        let flash = app.flash.clone().unwrap();
        assert_eq!(flash.kind, MessageKind::Success);
        assert!(flash.text.contains("PYTHON"));
        assert_eq!(app.session.player().total_score, 100);

        app.on_key(key(KeyCode::Char('s')));
        assert_eq!(app.state, AppState::Scoreboard);
        assert_eq!(app.scores.len(), 1);
        app.on_key(key(KeyCode::Char('b')));
        assert_eq!(app.state, AppState::RoundOver);

        app.on_key(key(KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Playing);
        assert_eq!(app.session.round().unwrap().error_count(), 0);
    }

    #[test]
    fn test_bad_keys_only_flash() {
        let mut app = App::new(session(&["python"]), Theme::default(), false);
        press_all(&mut app, "7");
        assert_eq!(app.flash.as_ref().unwrap().kind, MessageKind::Error);

        press_all(&mut app, "pp");
        assert!(app.flash.as_ref().unwrap().text.contains("already guessed"));
        assert_eq!(app.session.round().unwrap().error_count(), 0);
    }

    #[test]
    fn test_hint_key() {
        let mut app = App::new(session(&["python"]), Theme::default(), false);
        press_all(&mut app, "?");
        assert_eq!(app.flash.as_ref().unwrap().kind, MessageKind::Hint);
        assert_eq!(app.session.round().unwrap().hints_used(), 1);
    }

    #[test]
    fn test_tier_keys_after_a_loss() {
        let mut app = App::new(session(&["cat", "python"]), Theme::default(), false);
        press_all(&mut app, "zxqwjkv");
        assert_eq!(app.state, AppState::RoundOver);
        assert_eq!(app.flash.as_ref().unwrap().kind, MessageKind::Error);

        app.on_key(key(KeyCode::Char('1')));
        assert_eq!(app.session.config().tier, DifficultyTier::Easy);
        assert!(!app.on_key(key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_flash_fades() {
        let mut app = App::new(session(&["python"]), Theme::default(), false);
        press_all(&mut app, "p");
        for _ in 0..FLASH_TICKS {
            assert!(app.flash.is_some());
            app.on_tick();
        }
        assert!(app.flash.is_none());
    }

    #[test]
    fn test_draw_each_screen() {
        let mut app = App::new(session(&["python"]), Theme::default(), true);
        assert!(screen_text(&app).contains("What's your name?"));

        app.on_key(key(KeyCode::Enter));
        press_all(&mut app, "py");
        let text = screen_text(&app);
        assert!(text.contains("p y _ _ _ _"));
        assert!(text.contains("Guesses: p y"));
        assert!(text.contains("Errors: 0/6"));

        press_all(&mut app, "thon");
        let text = screen_text(&app);
        assert!(text.contains("WON"));
        assert!(text.contains("1 won, 0 lost"));

        app.on_key(key(KeyCode::Char('s')));
        let text = screen_text(&app);
        assert!(text.contains("Best"));
        assert!(text.contains(DEFAULT_PLAYER));
    }
}
