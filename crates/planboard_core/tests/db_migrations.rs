use planboard_core::db::migrations::{latest_version, migrate, schema_version};
use planboard_core::db::{open_db, open_db_in_memory, DbError, MigrationOutcome};
use rusqlite::Connection;

fn table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name;")
        .unwrap();
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    names
}

#[test]
fn fresh_connection_carries_kv_and_record_tables() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let tables = table_names(&conn);
    assert!(tables.contains(&"kv_entries".to_string()), "{tables:?}");
    assert!(tables.contains(&"records".to_string()), "{tables:?}");
}

#[test]
fn migrating_an_up_to_date_database_runs_nothing() {
    let mut conn = open_db_in_memory().unwrap();
    let outcome = migrate(&mut conn).unwrap();
    assert_eq!(
        outcome,
        MigrationOutcome {
            from: latest_version(),
            to: latest_version()
        }
    );
    assert_eq!(outcome.applied(), 0);
}

#[test]
fn partially_migrated_file_is_brought_forward() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE kv_entries (key TEXT PRIMARY KEY, value TEXT NOT NULL, updated_at INTEGER NOT NULL);
         INSERT INTO kv_entries VALUES ('calendar_app_goals', '[]', 0);
         PRAGMA user_version = 1;",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert!(table_names(&conn).contains(&"records".to_string()));
    let kept: String = conn
        .query_row(
            "SELECT value FROM kv_entries WHERE key = 'calendar_app_goals';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(kept, "[]");
}

#[test]
fn reopening_a_file_keeps_schema_and_wal_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planboard.db");
    drop(open_db(&path).unwrap());

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let journal: String = conn
        .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(journal.to_ascii_lowercase(), "wal");
}

#[test]
fn newer_schema_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}
