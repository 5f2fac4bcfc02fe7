//! Reads fixture databases written the way the game client writes them.

use std::path::{Path, PathBuf};

use replay_store::{ErrorKind, SnapshotStore, SqliteSnapshotStore, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;

const CREATE_AREAS: &str = "CREATE TABLE Areas (Date TEXT, Json TEXT)";

fn arena(turn: i64, ants: usize) -> String {
    let ants: Vec<String> = (0..ants)
        .map(|i| format!(r#"{{"id": "a{i}", "type": 0, "q": {i}, "r": 0, "health": 100}}"#))
        .collect();
    format!(
        r#"{{"turnNo": {turn}, "score": {score}, "ants": [{ants}],
            "map": [{{"q": 0, "r": 0, "type": 1}}], "home": [{{"q": 0, "r": 0}}]}}"#,
        score = turn * 10,
        ants = ants.join(",")
    )
}

/// Writes a database by running `statements` against a fresh file.
async fn fixture(dir: &TempDir, name: &str, statements: &[String]) -> PathBuf {
    let path = dir.path().join(name);
    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    for statement in statements {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }
    pool.close().await;
    path
}

fn insert(date: &str, body: &str) -> String {
    format!(
        "INSERT INTO Areas (Date, Json) VALUES ('{date}', '{}')",
        body.replace('\'', "''")
    )
}

/// Five turns with 1..=5 ants, inserted out of date order.
async fn recorded_game(dir: &TempDir) -> PathBuf {
    let mut statements = vec![CREATE_AREAS.to_string()];
    for turn in [2, 0, 4, 1, 3] {
        statements.push(insert(
            &format!("2025-06-01 12:00:0{turn}"),
            &arena(turn, turn as usize + 1),
        ));
    }
    fixture(dir, "game.db", &statements).await
}

async fn open(path: &Path) -> SqliteSnapshotStore {
    SqliteSnapshotStore::open(path).await.unwrap()
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let result = SqliteSnapshotStore::open(dir.path().join("absent.db")).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn turns_follow_date_order() {
    let dir = TempDir::new().unwrap();
    let store = open(&recorded_game(&dir).await).await;

    assert_eq!(store.turn_count().await.unwrap(), 5);
    for turn in 0..5 {
        let snapshot = store.snapshot(turn).await.unwrap();
        assert_eq!(snapshot.turn, turn as u64);
        assert_eq!(snapshot.game_turn, Some(turn));
        assert_eq!(
            snapshot.recorded_at.as_deref(),
            Some(format!("2025-06-01 12:00:0{turn}").as_str())
        );
    }
}

#[tokio::test]
async fn entity_count_matches_stored_records() {
    let dir = TempDir::new().unwrap();
    let store = open(&recorded_game(&dir).await).await;

    for turn in 0..5 {
        let snapshot = store.snapshot(turn).await.unwrap();
        // ants + one tile + one home
        assert_eq!(snapshot.entity_count(), turn as usize + 1 + 2);
        assert_eq!(snapshot.stats().ants, turn as usize + 1);
    }
}

#[tokio::test]
async fn out_of_range_turns_fail() {
    let dir = TempDir::new().unwrap();
    let store = open(&recorded_game(&dir).await).await;
    let count = store.turn_count().await.unwrap() as i64;

    for turn in [-1, count, count + 7] {
        let error = store.snapshot(turn).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::OutOfRange, "turn {turn}");
    }
}

#[tokio::test]
async fn latest_is_last_in_date_order() {
    let dir = TempDir::new().unwrap();
    let store = open(&recorded_game(&dir).await).await;
    let latest = store.latest().await.unwrap();
    assert_eq!(latest.turn, 4);
    assert_eq!(latest.score, Some(40));
}

#[tokio::test]
async fn validate_reports_summary() {
    let dir = TempDir::new().unwrap();
    let path = recorded_game(&dir).await;
    let store = open(&path).await;

    let summary = store.validate().await.unwrap();
    assert_eq!(summary.turn_count, 5);
    assert_eq!(summary.source, path.display().to_string());
    assert_eq!(
        summary.first_recorded_at.as_deref(),
        Some("2025-06-01 12:00:00")
    );
    assert_eq!(
        summary.last_recorded_at.as_deref(),
        Some("2025-06-01 12:00:04")
    );
    assert!(store.is_valid().await);
}

#[tokio::test]
async fn validate_rejects_missing_table() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, "other.db", &["CREATE TABLE Turns (id INTEGER)".into()]).await;
    let store = open(&path).await;

    assert!(matches!(
        store.validate().await,
        Err(StoreError::SchemaMismatch(_))
    ));
    assert_eq!(
        store.turn_count().await.unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert!(!store.is_valid().await);
}

#[tokio::test]
async fn validate_rejects_missing_column() {
    let dir = TempDir::new().unwrap();
    let path = fixture(
        &dir,
        "columns.db",
        &["CREATE TABLE Areas (Date TEXT, Payload TEXT)".into()],
    )
    .await;
    let store = open(&path).await;

    let error = store.validate().await.unwrap_err();
    assert!(error.to_string().contains("Json"), "{error}");
    assert_eq!(error.kind(), ErrorKind::CorruptData);
}

#[tokio::test]
async fn validate_rejects_empty_table() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, "empty.db", &[CREATE_AREAS.to_string()]).await;
    let store = open(&path).await;

    assert_eq!(
        store.validate().await.unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        store.turn_count().await.unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[tokio::test]
async fn corrupt_rows_fail_only_their_turn() {
    let dir = TempDir::new().unwrap();
    let path = fixture(
        &dir,
        "corrupt.db",
        &[
            CREATE_AREAS.to_string(),
            insert("2025-06-01 12:00:00", &arena(0, 1)),
            insert("2025-06-01 12:00:01", "{\"ants\": [{\"q\": 1}]}"),
            insert("2025-06-01 12:00:02", "not json"),
            "INSERT INTO Areas (Date, Json) VALUES ('2025-06-01 12:00:03', x'00ff')".into(),
            insert("2025-06-01 12:00:04", &arena(4, 2)),
        ],
    )
    .await;
    let store = open(&path).await;

    assert!(store.snapshot(0).await.is_ok());
    for turn in 1..=3 {
        let error = store.snapshot(turn).await.unwrap_err();
        assert!(
            matches!(error, StoreError::CorruptRecord { turn: t, .. } if t == turn as u64),
            "turn {turn}: {error}"
        );
    }
    assert_eq!(store.snapshot(4).await.unwrap().stats().ants, 2);
}
