//! Trigger generation and installation.
//!
//! For every attached table the engine installs TEMP triggers that, while
//! capture is on, write the statement reversing each row change into the
//! step table.

pub mod generator;
pub mod install;
pub mod sql;

pub use generator::{generate, TriggerDef, TriggerEvent, TriggerSet};
pub use install::{install, installed_triggers, remove};
