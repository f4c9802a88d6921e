//! Backend API-specific error types.

/// Errors that can occur while talking to the venue backend or chat service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Request needs a session token but none is set
    #[error("Not signed in")]
    NotAuthenticated,

    /// Chat query rejected before sending
    #[error("Invalid chat query: {0}")]
    InvalidQuery(String),

    /// Feedback rating outside 1..=5
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
}

impl ApiError {
    /// Returns true when the backend rejected the session or credentials.
    ///
    pub fn is_unauthorized(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => *status == 401 || *status == 403,
            ApiError::NotAuthenticated => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let error = ApiError::Status {
            status: 404,
            message: "Event not found".to_string(),
        };
        let error_str = error.to_string();
        assert!(error_str.contains("404"));
        assert!(error_str.contains("Event not found"));

        let error = ApiError::NotAuthenticated;
        assert!(error.to_string().contains("Not signed in"));

        let error = ApiError::InvalidQuery("Query cannot be empty".to_string());
        assert!(error.to_string().contains("Query cannot be empty"));
    }

    #[test]
    fn test_api_error_is_unauthorized() {
        let error = ApiError::Status {
            status: 401,
            message: String::new(),
        };
        assert!(error.is_unauthorized());
        assert!(ApiError::NotAuthenticated.is_unauthorized());

        let error = ApiError::Status {
            status: 500,
            message: String::new(),
        };
        assert!(!error.is_unauthorized());
    }
}
