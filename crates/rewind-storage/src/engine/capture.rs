//! Capture flags and the SQL functions the triggers consult.
//!
//! The flags live in an `Arc` shared between the engine (the only writer)
//! and the scalar functions registered on the connection (readers).

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

use crate::names::ObjectNames;

#[derive(Debug, Default)]
pub struct CaptureState {
    active: AtomicBool,
    in_undo: AtomicBool,
    group_id: AtomicI64,
}

impl CaptureState {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Whether the open capture records undo steps (true) or redo steps.
    pub fn in_undo(&self) -> bool {
        self.in_undo.load(Ordering::SeqCst)
    }

    /// Group new steps are attributed to.
    pub fn group_id(&self) -> i64 {
        self.group_id.load(Ordering::SeqCst)
    }

    pub(crate) fn start(&self, group_id: i64, in_undo: bool) {
        self.group_id.store(group_id, Ordering::SeqCst);
        self.in_undo.store(in_undo, Ordering::SeqCst);
        self.active.store(true, Ordering::SeqCst);
    }

    pub(crate) fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

/// Capture switched on for the lifetime of the scope, off again on every
/// exit path.
pub(crate) struct CaptureScope<'a> {
    state: &'a CaptureState,
}

impl<'a> CaptureScope<'a> {
    pub(crate) fn start(state: &'a CaptureState, group_id: i64, in_undo: bool) -> Self {
        state.start(group_id, in_undo);
        Self { state }
    }
}

impl Drop for CaptureScope<'_> {
    fn drop(&mut self) {
        self.state.stop();
    }
}

/// Register `<prefix>active()` and `<prefix>group_id()` on `conn`.
///
/// Neither function is deterministic: their results change between
/// statements as capture starts and stops.
pub fn register_functions(
    conn: &Connection,
    names: &ObjectNames,
    state: &Arc<CaptureState>,
) -> rusqlite::Result<()> {
    let flags = FunctionFlags::SQLITE_UTF8;

    let active = Arc::clone(state);
    conn.create_scalar_function(names.active_fn().as_str(), 0, flags, move |_ctx| {
        Ok(i64::from(active.is_active()))
    })?;

    let group = Arc::clone(state);
    conn.create_scalar_function(names.group_id_fn().as_str(), 0, flags, move |_ctx| {
        Ok(group.group_id())
    })?;

    Ok(())
}
