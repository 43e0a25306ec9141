//! Errors raised by the domain layer, before anything reaches storage.

/// Failure of a pure domain operation.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A string did not name any duplicable object kind.
    #[error("Unknown object kind '{0}'")]
    UnknownKind(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(crate::validation::describe(&errors))
    }
}
