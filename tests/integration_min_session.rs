// Drives the compiled binary end to end.
//
// The line-mode tests pipe stdin, so they run anywhere. The full-screen test
// needs a pseudo terminal (expectrl), is Unix-only and ignored by default:
// `cargo test --test integration_min_session -- --ignored`.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::tempdir;

fn gallows(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gallows").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1");
    cmd
}

fn word_list(home: &Path) -> String {
    let path = home.join("words.txt");
    fs::write(&path, "python\n").unwrap();
    path.display().to_string()
}

#[test]
fn plain_round_is_won_and_scored() {
    let home = tempdir().unwrap();
    let words = word_list(home.path());

    let assert = gallows(home.path())
        .args(["--plain", "--name", "ana", "--words", &words])
        .write_stdin("p\ny\nz\nt\nh\no\nn\nn\n")
        .assert()
        .success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(out.contains("Welcome, ana!"), "{out}");
    assert!(out.contains("You got it: PYTHON! +95 points"), "{out}");
    assert!(out.contains("Thanks for playing!"), "{out}");

    let assert = gallows(home.path()).arg("--scoreboard").assert().success();
    let board = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(board.contains("1. ana: 95"), "{board}");
}

#[test]
fn plain_mode_asks_for_a_name() {
    let home = tempdir().unwrap();
    let words = word_list(home.path());

    let assert = gallows(home.path())
        .args(["--plain", "--scores", "csv", "--words", &words])
        .write_stdin("bia\nz\n")
        .assert()
        .success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(out.contains("What's your name?"), "{out}");
    assert!(out.contains("Welcome, bia!"), "{out}");
    assert!(out.contains("Round abandoned."), "{out}");
}

#[test]
fn unreadable_scores_show_an_empty_board() {
    let home = tempdir().unwrap();
    let state = home.path().join(".local").join("state").join("gallows");
    fs::create_dir_all(&state).unwrap();
    fs::write(
        state.join("scores.csv"),
        "player,score,timestamp\nana,lots,yesterday\n",
    )
    .unwrap();

    let assert = gallows(home.path())
        .args(["--scores", "csv", "--scoreboard"])
        .assert()
        .success();
    let board = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(board.contains("No scores yet."), "{board}");
}

#[test]
fn missing_word_list_fails_at_startup() {
    let home = tempdir().unwrap();
    let missing = home.path().join("nope.txt");

    gallows(home.path())
        .args(["--plain", "--name", "ana", "--words"])
        .arg(&missing)
        .assert()
        .failure();
}

#[test]
fn saved_config_is_reused() {
    let home = tempdir().unwrap();
    let words = word_list(home.path());

    gallows(home.path())
        .args(["--name", "cris", "--words", &words, "--save-config", "--scoreboard"])
        .assert()
        .success();

    let assert = gallows(home.path())
        .arg("--plain")
        .write_stdin("z\n")
        .assert()
        .success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(out.contains("Welcome, cris!"), "{out}");
    assert!(out.contains("6 letters"), "{out}");
}

#[cfg(unix)]
#[test]
#[ignore]
fn minimal_tui_session_exits() -> Result<(), Box<dyn std::error::Error>> {
    use expectrl::{spawn, Eof};
    use std::time::Duration;

    let home = tempdir()?;
    let words = word_list(home.path());
    let bin = assert_cmd::cargo::cargo_bin("gallows");
    let cmd = format!("env HOME={} {} -n ana -w {}", home.path().display(), bin.display(), words);

    // Spawn the TUI inside a pseudo terminal
    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    p.send("python")?;
    std::thread::sleep(Duration::from_millis(200));

    // q quits from the round-over screen
    p.send("q")?;
    p.expect(Eof)?;
    Ok(())
}
