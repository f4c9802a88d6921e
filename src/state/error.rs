//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Form input failed validation
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Action needs a selected list item
    #[error("Nothing selected")]
    NoSelection,

    /// Action needs a signed-in user
    #[error("Not signed in")]
    NotSignedIn,
}

impl StateError {
    pub(crate) fn invalid(field: &'static str, message: &str) -> Self {
        StateError::Validation {
            field,
            message: message.to_string(),
        }
    }
}
