use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::difficulty::DifficultyTier;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    /// The event source is gone; no more input will arrive.
    Closed,
}

/// What a key press asks the game to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Guess(char),
    Hint,
    NextRound,
    Scoreboard,
    Back,
    SetTier(DifficultyTier),
    Quit,
}

/// Maps a key to an action. While `guessing`, every printable key is a guess
/// (the engine rejects the bad ones) except the hint keys.
pub fn key_action(key: &KeyEvent, guessing: bool) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match (key.code, guessing) {
        (KeyCode::Esc, _) => Some(Action::Quit),
        (KeyCode::Char('?') | KeyCode::Tab, true) => Some(Action::Hint),
        (KeyCode::Char(c), true) => Some(Action::Guess(c)),
        (KeyCode::Char('n') | KeyCode::Enter, false) => Some(Action::NextRound),
        (KeyCode::Char('s'), false) => Some(Action::Scoreboard),
        (KeyCode::Char('b') | KeyCode::Backspace, false) => Some(Action::Back),
        (KeyCode::Char('q'), false) => Some(Action::Quit),
        (KeyCode::Char(d @ '1'..='4'), false) => {
            let idx = d as usize - '1' as usize;
            Some(Action::SetTier(DifficultyTier::ALL[idx]))
        }
        _ => None,
    }
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Events delivered over a channel, either from the terminal reader thread or
/// from a test.
pub struct ChannelEventSource {
    rx: Receiver<GameEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }

    /// Starts a thread forwarding crossterm key and resize events.
    pub fn crossterm() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                Ok(CtEvent::Key(key)) => tx.send(GameEvent::Key(key)),
                Ok(CtEvent::Resize(_, _)) => tx.send(GameEvent::Resize),
                Ok(_) => Ok(()),
                Err(e) => {
                    tracing::error!(error = %e, "terminal event reader stopped");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl EventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource> {
    event_source: E,
    tick: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E, tick: Duration) -> Self {
        Self { event_source, tick }
    }

    /// Blocks up to one tick and returns the next event, Tick on timeout, or
    /// Closed once the source has hung up
    pub fn step(&self) -> GameEvent {
        match self.event_source.recv_timeout(self.tick) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => GameEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => GameEvent::Closed,
        }
    }
}
