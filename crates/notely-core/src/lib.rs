//! notely-core - Core library for Notely
//!
//! This crate contains the shared models, the REST client for the remote notes
//! service, the local pinned-note store, and the note board state that sits
//! between a presentation layer and the API.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pinned;
pub mod state;
pub mod util;

#[cfg(test)]
mod testing;

pub use api::{NotesApiClient, NotesBackend};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use models::{
    Category, CategoryColor, CategoryId, Note, NoteCounts, NoteId, SortOption, ViewMode,
};
pub use pinned::{FilePinnedStore, MemoryPinnedStore, PinnedStore};
pub use state::{CategoryUpdate, NewNote, NoteBoard, NoteUpdate, ViewSettings};
