//! `SessionRegistry` lifecycle across threads.

use std::sync::Arc;
use std::thread;

use rewind_core::{PendingCounts, RewindConfig, RewindError, UpdatePolicy};
use rewind_storage::{SessionId, SessionRegistry};

fn registry_with_table() -> (SessionRegistry, SessionId) {
    let registry = SessionRegistry::new();
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, v TEXT)")
        .unwrap();
    let id = registry.open(conn, RewindConfig::default()).unwrap();
    registry
        .with_session(id, |s| s.attach("t", UpdatePolicy::PerTable))
        .unwrap();
    (registry, id)
}

/// Sessions on separate connections keep separate logs.
#[test]
fn sessions_are_isolated() {
    let registry = SessionRegistry::new();
    let a = registry.open_in_memory().unwrap();
    let b = registry.open_in_memory().unwrap();

    registry
        .with_session(a, |s| {
            s.begin("")?;
            s.end(None)
        })
        .unwrap();
    let counts_a = registry.with_session(a, |s| s.pending_counts()).unwrap();
    let counts_b = registry.with_session(b, |s| s.pending_counts()).unwrap();
    assert_eq!(counts_a, PendingCounts::new(1, 0));
    assert_eq!(counts_b, PendingCounts::new(0, 0));
}

/// A session can be driven from another thread through the shared handle.
#[test]
fn session_usable_across_threads() {
    let (registry, id) = registry_with_table();
    let registry = Arc::new(registry);

    let worker = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            registry
                .with_session(id, |s| {
                    s.begin("from worker")?;
                    s.connection().execute("INSERT INTO t(v) VALUES ('w')", [])?;
                    s.end(None)
                })
                .unwrap();
        })
    };
    worker.join().unwrap();

    let counts = registry.with_session(id, |s| s.undo()).unwrap();
    assert_eq!(counts, PendingCounts::new(0, 1));
}

/// Closed sessions are gone; handles obtained earlier stay usable.
#[test]
fn close_removes_session() {
    let (registry, id) = registry_with_table();
    let handle = registry.get(id).unwrap();
    registry.close(id).unwrap();

    assert!(registry.get(id).is_none());
    assert!(matches!(
        registry.with_session(id, |s| s.pending_counts()),
        Err(RewindError::UnknownSession(_))
    ));
    assert!(matches!(registry.close(id), Err(RewindError::UnknownSession(_))));

    let session = handle.lock().unwrap();
    assert_eq!(session.pending_counts().unwrap(), PendingCounts::new(0, 0));
}

/// `latest` follows open order and skips closed sessions.
#[test]
fn latest_is_most_recent_open() {
    let registry = SessionRegistry::new();
    let ids: Vec<SessionId> = (0..3).map(|_| registry.open_in_memory().unwrap()).collect();
    assert_eq!(registry.latest().map(|(id, _)| id), Some(ids[2]));
    registry.close(ids[1]).unwrap();
    assert_eq!(registry.latest().map(|(id, _)| id), Some(ids[2]));
    registry.close(ids[2]).unwrap();
    assert_eq!(registry.latest().map(|(id, _)| id), Some(ids[0]));
    assert_eq!(registry.len(), 1);
}
