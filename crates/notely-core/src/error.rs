//! Error types for notely-core

use thiserror::Error;

use crate::models::NoteId;

/// Result type alias using notely-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Message used when the server rejects a request without explaining why.
pub const DEFAULT_API_ERROR_MESSAGE: &str = "An error occurred";

/// Errors that can occur in notely-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The notes service answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Note is not part of the loaded page
    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),

    /// Local category lookup failed
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the HTTP status for API errors.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message to surface to the user.
    ///
    /// Server-reported failures keep their own message; everything else is
    /// replaced by `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_api_message() {
        let error = Error::Api {
            status: 400,
            message: "Title must not be blank".to_string(),
        };
        assert_eq!(error.user_message("Failed to create note"), "Title must not be blank");
        assert_eq!(error.status(), Some(400));
    }

    #[test]
    fn user_message_falls_back_for_local_errors() {
        let error = Error::NoteNotFound(NoteId::new(7));
        assert_eq!(error.user_message("Failed to update note"), "Failed to update note");
        assert_eq!(error.status(), None);
    }
}
