//! Access to the remote notes service
//!
//! `NotesBackend` is the seam the note board talks through. `NotesApiClient`
//! implements it over HTTP.

mod client;

pub use client::{parse_api_error, NotesApiClient};

use crate::error::Result;
use crate::models::{
    CreateNoteRequest, NoteDto, NoteId, NoteQuery, PageResponse, UpdateNoteRequest,
};

/// Operations offered by the notes service
#[allow(async_fn_in_trait)]
pub trait NotesBackend {
    /// `GET /notes` with filters and pagination
    async fn list_notes(&self, query: &NoteQuery) -> Result<PageResponse<NoteDto>>;

    /// `GET /notes/{id}`
    async fn get_note(&self, id: NoteId) -> Result<NoteDto>;

    /// `POST /notes`
    async fn create_note(&self, request: &CreateNoteRequest) -> Result<NoteDto>;

    /// `PUT /notes/{id}`
    async fn update_note(&self, id: NoteId, request: &UpdateNoteRequest) -> Result<NoteDto>;

    /// `PATCH /notes/{id}/archive`
    async fn toggle_archive(&self, id: NoteId) -> Result<NoteDto>;

    /// `DELETE /notes/{id}`
    async fn delete_note(&self, id: NoteId) -> Result<()>;

    /// `POST /notes/{id}/categories`
    async fn add_categories(&self, id: NoteId, categories: &[String]) -> Result<NoteDto>;

    /// `DELETE /notes/{id}/categories/{category}`
    async fn remove_category(&self, id: NoteId, category: &str) -> Result<NoteDto>;
}
