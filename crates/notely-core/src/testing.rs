//! In-memory notes service for tests.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Duration, TimeZone, Utc};

use crate::api::NotesBackend;
use crate::error::{Error, Result};
use crate::models::{
    CreateNoteRequest, NoteDto, NoteId, NoteQuery, PageResponse, SortOption, UpdateNoteRequest,
};

#[derive(Debug, Default)]
pub struct FakeState {
    pub notes: Vec<NoteDto>,
    pub next_id: i64,
    /// Every list query received, in order
    pub list_queries: Vec<NoteQuery>,
    /// Number of single-note reads received
    pub read_calls: usize,
    /// Number of write requests received
    pub mutation_calls: usize,
    /// Fail list queries with this status while set
    pub fail_lists_with: Option<u16>,
    /// Fail only count queries (no `sortBy`) while set
    pub fail_counts: bool,
    /// Fail every write request while set
    pub fail_mutations_with: Option<u16>,
}

/// Notes service fake. Clones share state so tests can inspect requests.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one note per `(title, categories, archived)` triple. Ids start at 1
    /// and creation times increase with the id.
    pub fn with_notes(notes: &[(&str, &[&str], bool)]) -> Self {
        let backend = Self::new();
        {
            let mut state = backend.state();
            for (title, categories, archived) in notes {
                let id = state.allocate_id();
                let at = base_time() + Duration::minutes(id);
                state.notes.push(NoteDto {
                    id: NoteId::new(id),
                    title: (*title).to_string(),
                    content: format!("{title} body"),
                    categories: categories.iter().map(ToString::to_string).collect(),
                    is_archived: *archived,
                    created_at: at,
                    updated_at: at,
                });
            }
        }
        backend
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake backend lock")
    }

    /// List queries that fetched a board page rather than a count
    pub fn page_queries(&self) -> Vec<NoteQuery> {
        self.state()
            .list_queries
            .iter()
            .filter(|query| query.sort_by.is_some())
            .cloned()
            .collect()
    }

    pub fn clear_queries(&self) {
        self.state().list_queries.clear();
    }

    pub fn note(&self, id: i64) -> Option<NoteDto> {
        self.state()
            .notes
            .iter()
            .find(|note| note.id == NoteId::new(id))
            .cloned()
    }
}

impl FakeState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn check_mutation(&mut self) -> Result<()> {
        self.mutation_calls += 1;
        match self.fail_mutations_with {
            Some(status) => Err(Error::Api {
                status,
                message: format!("mutation rejected with {status}"),
            }),
            None => Ok(()),
        }
    }

    fn find_mut(&mut self, id: NoteId) -> Result<&mut NoteDto> {
        self.notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or_else(|| Error::Api {
                status: 404,
                message: format!("Note not found with id {id}"),
            })
    }
}

fn base_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn matches_query(note: &NoteDto, query: &NoteQuery) -> bool {
    if let Some(archived) = query.archived {
        if note.is_archived != archived {
            return false;
        }
    }
    if !query.categories.is_empty()
        && !query.categories.iter().any(|wanted| {
            note.categories
                .iter()
                .any(|name| name.eq_ignore_ascii_case(wanted))
        })
    {
        return false;
    }
    if let Some(search) = query.search.as_deref() {
        let needle = search.to_lowercase();
        if !note.title.to_lowercase().contains(&needle)
            && !note.content.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    true
}

impl NotesBackend for FakeBackend {
    async fn list_notes(&self, query: &NoteQuery) -> Result<PageResponse<NoteDto>> {
        let mut state = self.state();
        state.list_queries.push(query.clone());
        if let Some(status) = state.fail_lists_with {
            return Err(Error::Api {
                status,
                message: "Service unavailable".to_string(),
            });
        }
        if state.fail_counts && query.sort_by.is_none() {
            return Err(Error::Api {
                status: 500,
                message: "count failed".to_string(),
            });
        }

        let mut matching: Vec<NoteDto> = state
            .notes
            .iter()
            .filter(|note| matches_query(note, query))
            .cloned()
            .collect();
        match query.sort_by.unwrap_or_default() {
            SortOption::Newest => matching.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOption::Oldest => matching.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortOption::Title => matching.sort_by(|a, b| a.title.cmp(&b.title)),
            SortOption::Updated => matching.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        }

        let page = query.page.unwrap_or(0);
        let size = query.size.unwrap_or(20);
        let total = matching.len() as u64;
        let content = matching
            .into_iter()
            .skip((page * size) as usize)
            .take(size as usize)
            .collect();
        Ok(PageResponse::new(content, page, size, total))
    }

    async fn get_note(&self, id: NoteId) -> Result<NoteDto> {
        let mut state = self.state();
        state.read_calls += 1;
        state.find_mut(id).map(|note| note.clone())
    }

    async fn create_note(&self, request: &CreateNoteRequest) -> Result<NoteDto> {
        let mut state = self.state();
        state.check_mutation()?;
        let id = state.allocate_id();
        let at = base_time() + Duration::minutes(id);
        let note = NoteDto {
            id: NoteId::new(id),
            title: request.title.clone(),
            content: request.content.clone(),
            categories: request.categories.clone(),
            is_archived: false,
            created_at: at,
            updated_at: at,
        };
        state.notes.push(note.clone());
        Ok(note)
    }

    async fn update_note(&self, id: NoteId, request: &UpdateNoteRequest) -> Result<NoteDto> {
        let mut state = self.state();
        state.check_mutation()?;
        let note = state.find_mut(id)?;
        note.title.clone_from(&request.title);
        note.content.clone_from(&request.content);
        note.categories.clone_from(&request.categories);
        note.updated_at += Duration::hours(1);
        Ok(note.clone())
    }

    async fn toggle_archive(&self, id: NoteId) -> Result<NoteDto> {
        let mut state = self.state();
        state.check_mutation()?;
        let note = state.find_mut(id)?;
        note.is_archived = !note.is_archived;
        Ok(note.clone())
    }

    async fn delete_note(&self, id: NoteId) -> Result<()> {
        let mut state = self.state();
        state.check_mutation()?;
        state.find_mut(id)?;
        state.notes.retain(|note| note.id != id);
        Ok(())
    }

    async fn add_categories(&self, id: NoteId, categories: &[String]) -> Result<NoteDto> {
        let mut state = self.state();
        state.check_mutation()?;
        let note = state.find_mut(id)?;
        for category in categories {
            if !note
                .categories
                .iter()
                .any(|name| name.eq_ignore_ascii_case(category))
            {
                note.categories.push(category.clone());
            }
        }
        Ok(note.clone())
    }

    async fn remove_category(&self, id: NoteId, category: &str) -> Result<NoteDto> {
        let mut state = self.state();
        state.check_mutation()?;
        let note = state.find_mut(id)?;
        note.categories
            .retain(|name| !name.eq_ignore_ascii_case(category));
        Ok(note.clone())
    }
}
