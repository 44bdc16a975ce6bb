use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] notely_core::Error),
    /// A board operation failed; `message` is what the board reported
    #[error("{message}")]
    Board {
        message: String,
        #[source]
        source: notely_core::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No note content provided")]
    EmptyContent,
    #[error("Note title cannot be empty")]
    EmptyTitle,
    #[error("Edited note content cannot be empty")]
    EmptyEditedContent,
    #[error("Search query cannot be empty")]
    EmptySearchQuery,
    #[error("Invalid note ID: '{0}'")]
    InvalidNoteId(String),
    #[error("Category name cannot be empty")]
    EmptyCategory,
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Page numbers start at 1")]
    InvalidPage,
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
