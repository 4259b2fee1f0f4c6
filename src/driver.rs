use crate::error::Result;
use crate::presenter::{MessageKind, Presenter};
use crate::round::{HintResult, Outcome, RoundStatus};
use crate::scores::{best_per_player, leaderboard, ScoreRecord, LEADERBOARD_SIZE};
use crate::session::GameSession;

/// What the player types to ask for a hint instead of guessing.
pub const HINT_COMMAND: &str = "?";

/// Runs rounds through `presenter` until the player declines another one or
/// input runs out.
pub fn play_session<P: Presenter>(session: &mut GameSession, presenter: &mut P) -> Result<()> {
    presenter.message(
        MessageKind::Info,
        &format!("Welcome, {}!", session.player().name),
    )?;

    loop {
        if !play_round(session, presenter)? {
            presenter.message(MessageKind::Warning, "Round abandoned.")?;
            break;
        }
        show_stats(session, presenter)?;

        if !presenter.prompt_yes_no("\nPlay again?")? {
            break;
        }
    }

    presenter.message(MessageKind::Info, "Thanks for playing!")?;
    Ok(())
}

/// Plays one round. Returns false if input ended before the round did.
fn play_round<P: Presenter>(session: &mut GameSession, presenter: &mut P) -> Result<bool> {
    let round = session.start_round()?;
    presenter.message(
        MessageKind::Info,
        &format!(
            "\nNew {} round: {} letters, {} mistakes allowed.",
            round.tier(),
            round.word().len(),
            round.error_budget()
        ),
    )?;

    while session.in_round() {
        if let Some(round) = session.round() {
            presenter.render_round(round)?;
        }

        let Some(line) =
            presenter.prompt_line(&format!("Guess a letter ({HINT_COMMAND} for a hint):"))?
        else {
            return Ok(false);
        };

        if line.trim() == HINT_COMMAND {
            let (kind, text) = match session.hint()? {
                HintResult::Revealed(letter) => {
                    (MessageKind::Hint, format!("Hint: the word has '{letter}'."))
                }
                HintResult::HintBudgetExhausted => {
                    (MessageKind::Warning, "No hints left this round.".to_string())
                }
                HintResult::NoHintAvailable => {
                    (MessageKind::Warning, "Nothing left to hint.".to_string())
                }
            };
            presenter.message(kind, &text)?;
            continue;
        }

        match session.guess(&line) {
            Ok(result) => match result.outcome {
                Outcome::Correct => presenter.message(
                    MessageKind::Success,
                    &format!("'{}' is in the word.", result.letter),
                )?,
                Outcome::Incorrect => {
                    let left = session.round().map_or(0, |r| r.remaining_errors());
                    presenter.message(
                        MessageKind::Error,
                        &format!("'{}' is not in the word. {left} mistakes left.", result.letter),
                    )?
                }
            },
            Err(e) if e.is_input_error() => presenter.message(MessageKind::Error, &e.to_string())?,
            Err(e) => return Err(e),
        }
    }

    if let Some(round) = session.round() {
        presenter.render_round(round)?;
    }
    if let Some(summary) = session.last_summary() {
        let word = summary.word.as_str().to_uppercase();
        match summary.status {
            RoundStatus::Won => presenter.message(
                MessageKind::Success,
                &format!("You got it: {word}! +{} points", summary.score),
            )?,
            _ => presenter.message(MessageKind::Error, &format!("Game over! The word was {word}."))?,
        }
    }
    Ok(true)
}

fn show_stats<P: Presenter>(session: &GameSession, presenter: &mut P) -> Result<()> {
    let player = session.player();
    presenter.message(
        MessageKind::Info,
        &format!(
            "\n=== {} ===\n{}\nWin rate: {:.1}%  Avg errors: {:.1}",
            player.name.to_uppercase(),
            player,
            player.win_rate(),
            player.average_errors()
        ),
    )?;

    let records = session.scores();
    if records.is_empty() {
        return Ok(());
    }
    presenter.message(MessageKind::Info, &format!("\n{}", scoreboard_lines(&records).join("\n")))?;
    Ok(())
}

/// Best score per player followed by the most recent entries.
pub fn scoreboard_lines(records: &[ScoreRecord]) -> Vec<String> {
    if records.is_empty() {
        return vec!["No scores yet.".to_string()];
    }

    let mut lines = vec!["=== BEST ===".to_string()];
    lines.extend(
        best_per_player(records)
            .iter()
            .take(LEADERBOARD_SIZE)
            .enumerate()
            .map(|(i, r)| format!("{}. {}: {}", i + 1, r.player, r.score)),
    );
    lines.push("=== RECENT ===".to_string());
    lines.extend(
        leaderboard(records, LEADERBOARD_SIZE)
            .iter()
            .map(|r| format!("{} {}: {}", r.timestamp.format("%Y-%m-%d %H:%M"), r.player, r.score)),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::player::PlayerStats;
    use crate::presenter::ConsolePresenter;
    use crate::scores::MemoryScoreStore;
    use crate::session::SessionConfig;
    use crate::word::Word;
    use std::io::Cursor;

    fn session() -> GameSession {
        GameSession::new(
            PlayerStats::new("ana"),
            vec![Word::parse("python").unwrap()],
            SessionConfig::default(),
            Box::new(MemoryScoreStore::default()),
        )
        .with_seed(1)
    }

    fn run(input: &str) -> (GameSession, String) {
        let mut session = session();
        let mut presenter = ConsolePresenter::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            Theme::monochrome(),
        );
        play_session(&mut session, &mut presenter).unwrap();
        let out = String::from_utf8(presenter.into_output()).unwrap();
        (session, out)
    }

    #[test]
    fn winning_round_then_quit() {
        let (session, out) = run("p\ny\nt\nh\no\nn\nn\n");
        assert!(out.contains("You got it: PYTHON! +100 points"));
        assert!(out.contains("Win rate: 100.0%"));
        assert!(out.contains("1. ana: 100"));
        assert!(out.contains("Thanks for playing!"));
        assert_eq!(session.player().games_won, 1);
    }

    #[test]
    fn invalid_input_is_reported_and_round_continues() {
        let (session, out) = run("\n42\nab\np\nP\ny\nt\nh\no\nn\nno\n");
        assert!(out.contains("type a letter to guess"));
        assert!(out.contains("'4'") || out.contains("one letter at a time"));
        assert!(out.contains("'p' was already guessed"));
        assert_eq!(session.player().games_played, 1);
        assert_eq!(session.player().total_errors, 0);
    }

    #[test]
    fn hints_and_losses() {
        let (session, out) = run("?\n?\n?\nz\nx\nq\nw\nj\nk\nn\n");
        assert_eq!(out.matches("Hint: the word has").count(), 2);
        assert!(out.contains("No hints left this round."));
        assert!(out.contains("'z' is not in the word. 5 mistakes left."));
        assert!(out.contains("Game over! The word was PYTHON."));
        assert_eq!(session.player().games_won, 0);
        assert_eq!(session.player().total_hints_used, 2);
    }

    #[test]
    fn two_rounds() {
        let (session, _) = run("p\ny\nt\nh\no\nn\ny\np\ny\nt\nh\no\nn\nn\n");
        assert_eq!(session.player().games_played, 2);
        assert_eq!(session.player().total_score, 200);
    }

    #[test]
    fn scoreboard_without_records() {
        assert_eq!(scoreboard_lines(&[]), vec!["No scores yet.".to_string()]);
    }

    #[test]
    fn eof_mid_round_abandons() {
        let (session, out) = run("p\n");
        assert!(out.contains("Round abandoned."));
        assert_eq!(session.player().games_played, 0);
    }
}
