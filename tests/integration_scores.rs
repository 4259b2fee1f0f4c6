use gallows::player::PlayerStats;
use gallows::scores::{
    best_per_player, leaderboard, CsvScoreStore, ScoreSink, SqliteScoreStore, LEADERBOARD_SIZE,
};
use gallows::session::{GameSession, SessionConfig};
use gallows::word_source::FileWordSource;
use std::fs;
use tempfile::tempdir;

fn play_winning_rounds(session: &mut GameSession, rounds: usize) {
    for _ in 0..rounds {
        let word = session.start_round().unwrap().word().clone();
        for c in word.distinct_letters() {
            session.guess(&c.to_string()).unwrap();
        }
    }
}

fn words_file(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("words.txt");
    fs::write(&path, "python\n\n  Python \nrust\n").unwrap();
    path
}

#[test]
fn sqlite_scores_survive_reopening() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("state").join("scores.db");
    let words = FileWordSource::new(words_file(dir.path()));

    for name in ["ana", "bia"] {
        let store = SqliteScoreStore::open(&db).unwrap();
        let mut session = GameSession::from_source(
            PlayerStats::new(name),
            &words,
            SessionConfig::default(),
            Box::new(store),
        )
        .unwrap()
        .with_seed(1);
        // duplicates collapse; rust is too short for the tier
        assert_eq!(session.words().len(), 2);
        play_winning_rounds(&mut session, 2);
    }

    let store = SqliteScoreStore::open(&db).unwrap();
    let records = store.read_scores().unwrap();
    let totals: Vec<(&str, u64)> = records
        .iter()
        .map(|r| (r.player.as_str(), r.score))
        .collect();
    assert_eq!(
        totals,
        vec![("ana", 100), ("ana", 200), ("bia", 100), ("bia", 200)]
    );
    assert_eq!(store.best_score("ANA").unwrap(), Some(200));

    let best = best_per_player(&records);
    assert_eq!(best.len(), 2);
    assert_eq!(best[0].player, "ana");
    assert_eq!(leaderboard(&records, LEADERBOARD_SIZE).len(), 4);
}

#[test]
fn csv_scores_append_across_sessions() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("scores.csv");
    let words = FileWordSource::new(words_file(dir.path()));

    for _ in 0..2 {
        let mut session = GameSession::from_source(
            PlayerStats::new("ana"),
            &words,
            SessionConfig::default(),
            Box::new(CsvScoreStore::new(&csv)),
        )
        .unwrap()
        .with_seed(2);
        play_winning_rounds(&mut session, 1);
    }

    let contents = fs::read_to_string(&csv).unwrap();
    assert_eq!(contents.lines().count(), 3, "one header and two rows");

    let records = CsvScoreStore::new(&csv).read_scores().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.player == "ana" && r.score == 100));
}
