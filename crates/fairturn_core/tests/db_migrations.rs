use chrono::{TimeZone, Utc};
use fairturn_core::db::migrations::latest_version;
use fairturn_core::db::{open_db, open_db_in_memory, DbError};
use fairturn_core::{
    Assignment, KeyValueStore, RepoError, RotationService, SqliteKvStore, DAILY,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("fairturn.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "kv_entries");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn kv_store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteKvStore::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn kv_store_upserts_and_batches() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();

    assert_eq!(store.load("fairTurnPeople").unwrap(), None);
    store.save("fairTurnPeople", r#"["Alice"]"#).unwrap();
    store
        .save_all(&[
            ("fairTurnPeople", r#"["Alice","Bob"]"#.to_string()),
            ("fairTurnSkippedPeople", "[]".to_string()),
        ])
        .unwrap();

    assert_eq!(
        store.load("fairTurnPeople").unwrap().as_deref(),
        Some(r#"["Alice","Bob"]"#)
    );
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 2);
}

#[test]
fn service_state_survives_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fairturn.db");
    let morning = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteKvStore::try_new(&conn).unwrap();
        let mut service = RotationService::open(store);
        service.add_person("Alice").unwrap();
        service.add_person("Bob").unwrap();
        service.add_task("Dishes", DAILY).unwrap();
        service.today_assignments(&morning).unwrap();
        service
            .record_completion("Dishes", "Alice", &morning)
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();
    let mut service = RotationService::open(store);
    assert_eq!(service.people(), ["Alice", "Bob"]);
    assert_eq!(service.history().len(), 1);
    assert_eq!(service.history()[0].date, morning);

    let next_day = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
    let assignments = service.today_assignments(&next_day).unwrap().to_vec();
    assert_eq!(assignments, vec![Assignment::new("Dishes", "Bob")]);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
