use crate::art::{gallows_art, spaced};
use crate::config::{Theme, ThemeColor};
use crate::round::RoundEngine;
use crossterm::style::{Color, Stylize};
use std::io::{self, BufRead, Write};

/// Category of a message shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum MessageKind {
    Info,
    Error,
    Warning,
    Success,
    Hint,
}

impl ThemeColor {
    pub fn to_crossterm(self) -> Color {
        match self {
            ThemeColor::Reset => Color::Reset,
            ThemeColor::White => Color::White,
            ThemeColor::Gray => Color::Grey,
            ThemeColor::Red => Color::Red,
            ThemeColor::Green => Color::Green,
            ThemeColor::Yellow => Color::Yellow,
            ThemeColor::Blue => Color::Blue,
            ThemeColor::Magenta => Color::Magenta,
            ThemeColor::Cyan => Color::Cyan,
        }
    }
}

impl Theme {
    pub fn color_for(&self, kind: MessageKind) -> ThemeColor {
        match kind {
            MessageKind::Info => self.info,
            MessageKind::Error => self.error,
            MessageKind::Warning => self.warning,
            MessageKind::Success => self.success,
            MessageKind::Hint => self.hint,
        }
    }
}

/// What a frontend must be able to do for the line-mode game loop.
pub trait Presenter {
    fn render_round(&mut self, round: &RoundEngine) -> io::Result<()>;

    fn message(&mut self, kind: MessageKind, text: &str) -> io::Result<()>;

    /// Reads one line of input. `None` once input is exhausted.
    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Asks a yes/no question; anything but a yes (or end of input) is a no.
    fn prompt_yes_no(&mut self, prompt: &str) -> io::Result<bool>;
}

/// Accepts the usual English and Portuguese affirmatives.
pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    )
}

/// Plain line-oriented terminal output, colored through the theme.
pub struct ConsolePresenter<R, W> {
    input: R,
    output: W,
    theme: Theme,
}

impl ConsolePresenter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(theme: Theme) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), theme)
    }
}

impl<R: BufRead, W: Write> ConsolePresenter<R, W> {
    pub fn new(input: R, output: W, theme: Theme) -> Self {
        Self {
            input,
            output,
            theme,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Presenter for ConsolePresenter<R, W> {
    fn render_round(&mut self, round: &RoundEngine) -> io::Result<()> {
        let art = gallows_art(round.error_count(), round.error_budget());
        writeln!(
            self.output,
            "{}",
            art.with(self.theme.gallows.to_crossterm())
        )?;
        writeln!(
            self.output,
            "\nWord: {}",
            spaced(&round.masked_word())
                .with(self.theme.word.to_crossterm())
                .bold()
        )?;
        if !round.used_letters().is_empty() {
            let used: Vec<String> = round.used_letters().iter().map(char::to_string).collect();
            writeln!(self.output, "Used: {}", used.join(", "))?;
        }
        writeln!(
            self.output,
            "Errors: {}/{}  Hints: {}/{}",
            round.error_count(),
            round.error_budget(),
            round.hints_used(),
            round.max_hints()
        )?;
        self.output.flush()
    }

    fn message(&mut self, kind: MessageKind, text: &str) -> io::Result<()> {
        let color = self.theme.color_for(kind).to_crossterm();
        writeln!(self.output, "{}", text.with(color))?;
        self.output.flush()
    }

    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt_yes_no(&mut self, prompt: &str) -> io::Result<bool> {
        Ok(self
            .prompt_line(&format!("{prompt} (y/n)"))?
            .is_some_and(|answer| is_yes(&answer)))
    }
}
