//! Focus coordination error types.

/// Errors that can occur when driving a focus manager.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FocusError {
    /// Identifier was not part of the set the manager was built with
    #[error("Unknown input: {id}")]
    UnknownInput { id: String },
}

impl FocusError {
    pub(crate) fn unknown<T: std::fmt::Debug>(id: &T) -> Self {
        FocusError::UnknownInput {
            id: format!("{:?}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_error_display() {
        let error = FocusError::unknown(&"phone");
        assert!(error.to_string().contains("Unknown input"));
        assert!(error.to_string().contains("phone"));
    }
}
