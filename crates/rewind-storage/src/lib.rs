//! # rewind-storage
//!
//! SQLite side of the rewind undo/redo engine.
//! Schema introspection, trigger generation, the session-scoped undo log,
//! savepoint scoping, the capture state machine, and the session registry.

pub mod engine;
pub mod log;
pub mod names;
pub mod registry;
pub mod savepoint;
pub mod schema;
pub mod session;
pub mod triggers;

pub use engine::UndoEngine;
pub use log::{LogSnapshot, UndoLog};
pub use names::ObjectNames;
pub use registry::{SessionId, SessionRegistry, SharedSession};
pub use savepoint::SavepointGuard;
pub use session::UndoSession;
pub use triggers::{TriggerDef, TriggerEvent, TriggerSet};
