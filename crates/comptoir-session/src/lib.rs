//! # Comptoir Session - Document Lifecycle
//!
//! The editing session around one financial document: state machine,
//! counterparty binding, submission, post-save hold. Sits on top of
//! `comptoir-store` and is the only code path that persists documents.

pub mod error;
pub mod lifecycle;

pub use error::{SessionError, SessionResult};
pub use lifecycle::{CloseSignal, DocumentSession, SessionState};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=comptoir=trace` - Show trace for comptoir crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,comptoir=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
