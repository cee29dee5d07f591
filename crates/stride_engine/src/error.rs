//! Error types for the reconciliation engine.

use stride_core::{EntityKind, RecordId, StoreError};
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that abort a push or pull.
///
/// Conflicts are not errors; they are returned inside the push response.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The change payload is malformed and cannot be reconciled. The whole
    /// push fails and none of its writes are committed.
    #[error("invalid {entity} change {id}: {message}")]
    Validation {
        /// Kind of record the change targeted.
        entity: EntityKind,
        /// Id of the offending change.
        id: RecordId,
        /// What was missing or malformed.
        message: String,
    },

    /// The push carries more records than the engine accepts in one batch.
    #[error("push of {size} records exceeds the limit of {max}")]
    BatchTooLarge {
        /// Number of records in the push.
        size: usize,
        /// Configured batch limit.
        max: usize,
    },

    /// The record store failed to read or write.
    #[error("record store failure: {0}")]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Creates a validation error for one change.
    pub(crate) fn validation(
        entity: EntityKind,
        id: RecordId,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            entity,
            id,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_names_the_record() {
        let id = RecordId::new();
        let err = EngineError::validation(EntityKind::Goal, id, "title must not be empty");
        let text = err.to_string();
        assert!(text.contains("GOAL"));
        assert!(text.contains(&id.to_string()));
        assert!(text.contains("title must not be empty"));
    }

    #[test]
    fn store_errors_convert() {
        let err: EngineError = StoreError::backend("disk full").into();
        assert!(err.to_string().contains("disk full"));
    }
}
