use std::fs;
use std::io::Write;

use baloot::{
    GameType, JsonLinesStore, Match, MatchRecord, MatchStatus, MatchStore, MemoryStore, Multiplier,
    RoundInput, Scorekeeper, StoreError, Team,
};
use time::macros::datetime;

fn finished_record(team1: &str, team2: &str, seed: u64) -> MatchRecord {
    let mut game = Match::builder(team1, team2)
        .with_seed(seed)
        .build()
        .expect("valid match");
    game.apply_round(RoundInput::new(GameType::Hokm, Team::One).with_raw(100, 62));
    game.apply_round(
        RoundInput::new(GameType::Sun, Team::Two).with_multiplier(Multiplier::Forfeit),
    );
    assert!(game.is_finished());
    game.to_record(datetime!(2026-05-10 18:30 UTC))
}

#[test]
fn json_lines_store_returns_newest_first() -> Result<(), StoreError> {
    let dir = tempfile::tempdir()?;
    let mut store = JsonLinesStore::new(dir.path().join("matches.jsonl"));
    let first = finished_record("A", "B", 1);
    let second = finished_record("C", "D", 2);
    store.append(&first)?;
    store.append(&second)?;

    let recent = store.recent(10)?;
    assert_eq!(recent, vec![second.clone(), first]);
    assert_eq!(store.recent(1)?, vec![second]);
    Ok(())
}

#[test]
fn restored_record_reproduces_the_match() -> Result<(), StoreError> {
    let dir = tempfile::tempdir()?;
    let mut store = JsonLinesStore::new(dir.path().join("matches.jsonl"));
    let record = finished_record("A", "B", 5);
    store.append(&record)?;

    let loaded = store.recent(1)?.remove(0);
    let game = Match::from_record(loaded).expect("restores");
    assert_eq!(game.score(Team::One), record.team1_score);
    assert_eq!(game.score(Team::Two), record.team2_score);
    assert_eq!(game.winner(), Some(Team::Two));
    let numbers: Vec<u32> = game.rounds().map(|r| r.number).collect();
    assert_eq!(numbers, [1, 2]);

    let mut keeper = Scorekeeper::default();
    keeper.resume(game).expect("empty keeper");
    assert_eq!(keeper.status(), MatchStatus::Finished { winner: Team::Two });
    keeper.undo_last().expect("live match");
    assert_eq!(keeper.status(), MatchStatus::InProgress);
    assert_eq!(keeper.current().map(|m| m.score(Team::Two)), Some(6));
    Ok(())
}

#[test]
fn missing_file_is_an_empty_history() -> Result<(), StoreError> {
    let dir = tempfile::tempdir()?;
    let store = JsonLinesStore::new(dir.path().join("absent.jsonl"));
    assert!(store.recent(5)?.is_empty());
    Ok(())
}

#[test]
fn malformed_line_reports_its_position() -> Result<(), StoreError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("matches.jsonl");
    let mut store = JsonLinesStore::new(&path);
    store.append(&finished_record("A", "B", 1))?;
    let mut file = fs::OpenOptions::new().append(true).open(&path)?;
    writeln!(file, "{{not json")?;

    match store.recent(5) {
        Err(StoreError::Malformed { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected malformed record error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn memory_store_keeps_insertion_order() -> Result<(), StoreError> {
    let mut store = MemoryStore::new();
    assert!(store.is_empty());
    for seed in 0..3 {
        store.append(&finished_record("A", "B", seed))?;
    }
    assert_eq!(store.len(), 3);
    assert_eq!(store.recent(2)?.len(), 2);
    Ok(())
}
