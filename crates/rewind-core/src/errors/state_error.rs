//! Operations attempted in the wrong capture state.

use super::error_code::{self, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("already capturing (begin called twice without end)")]
    AlreadyActive,

    #[error("not capturing (end called without begin)")]
    NotActive,

    #[error("capture in progress (forgot to call end?)")]
    Busy,
}

impl ErrorCode for StateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyActive => error_code::ALREADY_ACTIVE,
            Self::NotActive => error_code::NOT_ACTIVE,
            Self::Busy => error_code::BUSY,
        }
    }
}
