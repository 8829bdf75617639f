//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! redb error / serde_json error
//!      │
//!      ▼
//! StoreError (this module)  ← adds entity/id context
//!      │
//!      ▼
//! ApiResponse envelope      ← {success:false, error:"Client non trouvé"}
//!      │
//!      ▼
//! UI displays the notification; in-memory state is left untouched
//! ```
//!
//! No storage error is fatal: callers keep their in-memory document and
//! may resubmit.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Requested id absent from the collection.
    ///
    /// The display string is the user-facing notification text, which is
    /// why it is in French ("Proforma non trouvé"); `id` is carried for
    /// logs.
    #[error("{entity} non trouvé")]
    NotFound { entity: String, id: String },

    /// Opening/creating the database file failed.
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Beginning a transaction failed.
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Opening a table failed.
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Low-level storage failure (disk full, corruption).
    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    /// Commit failed; the previous collection contents remain visible.
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// A stored record or an update patch failed (de)serialization.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An update patch was not a JSON object.
    #[error("Update patch must be a JSON object")]
    InvalidPatch,
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// True for the not-found case (callers leave state untouched and
    /// surface a notification rather than treating it as a failure).
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_is_user_facing() {
        let err = StoreError::not_found("Proforma", "abc-123");
        assert_eq!(err.to_string(), "Proforma non trouvé");
        assert!(err.is_not_found());
    }
}
