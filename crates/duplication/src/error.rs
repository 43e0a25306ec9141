use courseware_core::duplication::{ObjectKey, ObjectKind, ResolveError};
use courseware_core::types::DbId;
use courseware_core::validation::describe;
use courseware_db::StoreError;
use validator::ValidationErrors;

/// Failure of a duplication run. Any of these aborts the whole run.
#[derive(Debug, thiserror::Error)]
pub enum DuplicationError {
    /// A copy (or the source it came from) failed validation.
    #[error("Invalid {kind} copied from #{source_id}: {message}")]
    Validation {
        kind: ObjectKind,
        source_id: DbId,
        message: String,
    },

    /// The store rejected a read or write.
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    /// A parent container could not be determined.
    #[error("Cannot resolve parent of {key}: {reason}")]
    Unresolved { key: ObjectKey, reason: String },
}

impl DuplicationError {
    pub fn validation(source: ObjectKey, errors: &ValidationErrors) -> Self {
        DuplicationError::Validation {
            kind: source.kind,
            source_id: source.id,
            message: describe(errors),
        }
    }

    pub fn unresolved(key: ObjectKey, reason: impl Into<String>) -> Self {
        DuplicationError::Unresolved {
            key,
            reason: reason.into(),
        }
    }
}

impl From<ResolveError> for DuplicationError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Cycle(key) => {
                DuplicationError::unresolved(key, "cyclic parent chain")
            }
        }
    }
}
