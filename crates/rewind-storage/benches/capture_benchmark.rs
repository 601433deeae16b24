//! Update capture cost: one trigger per table vs one trigger per column.
//!
//! Each iteration runs one capture group updating a single column of a
//! wide table, then undoes it so the table returns to its seeded state.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use rewind_core::UpdatePolicy;
use rewind_storage::UndoSession;

const COLUMNS: usize = 16;
const ROWS: i64 = 200;

fn seeded_session(policy: UpdatePolicy) -> UndoSession {
    let session = UndoSession::open_in_memory().unwrap();
    let cols: Vec<String> = (0..COLUMNS).map(|i| format!("c{i} INTEGER")).collect();
    let conn = session.connection();
    conn.execute_batch(&format!(
        "CREATE TABLE wide (id INTEGER PRIMARY KEY, {})",
        cols.join(", ")
    ))
    .unwrap();
    let zeros = vec!["0"; COLUMNS].join(", ");
    for id in 0..ROWS {
        conn.execute_batch(&format!("INSERT INTO wide VALUES ({id}, {zeros})"))
            .unwrap();
    }
    session.attach("wide", policy).unwrap();
    session
}

fn bench_update_capture(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_capture");
    for policy in [UpdatePolicy::PerTable, UpdatePolicy::PerColumn] {
        let session = seeded_session(policy);
        group.bench_with_input(BenchmarkId::from_parameter(policy), &session, |b, s| {
            b.iter(|| {
                s.begin("bench").unwrap();
                s.connection()
                    .execute_batch("UPDATE wide SET c3 = c3 + 1")
                    .unwrap();
                s.end(None).unwrap();
                s.undo().unwrap();
            })
        });
    }
    group.finish();
}

fn bench_insert_capture(c: &mut Criterion) {
    let session = seeded_session(UpdatePolicy::None);
    c.bench_function("insert_capture", |b| {
        b.iter(|| {
            session.begin("bench").unwrap();
            session
                .connection()
                .execute_batch("INSERT INTO wide(c0) VALUES (1)")
                .unwrap();
            session.end(None).unwrap();
            session.undo().unwrap();
        })
    });
}

criterion_group!(benches, bench_update_capture, bench_insert_capture);
criterion_main!(benches);
