//! Session error types.

use thiserror::Error;

use crate::lifecycle::SessionState;

/// Errors raised by the document lifecycle controller.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The operation is not legal in the session's current state
    /// (e.g. submitting while another submit is pending).
    #[error("Operation '{operation}' not allowed in state {state:?}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    /// No document is being edited.
    #[error("No active document")]
    NoDocument,

    /// Storage failure. The in-memory document is preserved so the user
    /// can retry the submission.
    #[error(transparent)]
    Store(#[from] comptoir_store::StoreError),

    /// Document mutation failure (ledger limits, discount range).
    #[error(transparent)]
    Core(#[from] comptoir_core::CoreError),
}

impl SessionError {
    pub(crate) fn invalid_state(operation: &'static str, state: SessionState) -> Self {
        SessionError::InvalidState { operation, state }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
