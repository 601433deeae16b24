//! File-backed databases: the log is per connection, the data is shared.

use rewind_core::{PendingCounts, RewindConfig, UpdatePolicy};
use rewind_storage::UndoSession;
use tempfile::TempDir;

fn temp_db() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rewind.db");
    let setup = rusqlite::Connection::open(&path).unwrap();
    setup
        .execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, v TEXT)")
        .unwrap();
    (dir, path)
}

/// Two connections to one file have independent logs and triggers.
#[test]
fn two_connections_have_independent_logs() {
    let (_dir, path) = temp_db();
    let a = UndoSession::open(&path, RewindConfig::default()).unwrap();
    let b = UndoSession::open(&path, RewindConfig::default()).unwrap();
    a.attach("t", UpdatePolicy::PerTable).unwrap();

    a.begin("a").unwrap();
    a.connection().execute("INSERT INTO t VALUES (1, 'a')", []).unwrap();
    a.end(None).unwrap();

    // b has no triggers on t, so nothing it does is captured.
    b.begin("b").unwrap();
    b.connection().execute("INSERT INTO t VALUES (2, 'b')", []).unwrap();
    b.end(None).unwrap();
    assert!(b.snapshot().unwrap().steps.is_empty());

    assert_eq!(a.pending_counts().unwrap(), PendingCounts::new(1, 0));
    assert_eq!(a.undo().unwrap(), PendingCounts::new(0, 1));
    let remaining: i64 = b
        .connection()
        .query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0))
        .unwrap();
    assert_eq!(remaining, 1);
}

/// The log does not outlive its connection; the data does.
#[test]
fn log_is_dropped_with_connection() {
    let (_dir, path) = temp_db();
    {
        let s = UndoSession::open(&path, RewindConfig::default()).unwrap();
        s.attach("t", UpdatePolicy::PerTable).unwrap();
        s.begin("").unwrap();
        s.connection().execute("INSERT INTO t VALUES (1, 'a')", []).unwrap();
        s.end(None).unwrap();
    }

    let s = UndoSession::open(&path, RewindConfig::default()).unwrap();
    assert_eq!(s.pending_counts().unwrap(), PendingCounts::new(0, 0));
    let rows: i64 = s
        .connection()
        .query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0))
        .unwrap();
    assert_eq!(rows, 1);
    let main_objects: i64 = s
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE name LIKE 'rewind%'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(main_objects, 0);
}
