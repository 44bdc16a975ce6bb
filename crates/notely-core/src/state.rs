//! Note board state
//!
//! `NoteBoard` is what a presentation layer drives. It owns the current view
//! (page, filters, sort), asks the notes service for the matching page, marks
//! pinned notes from the local store, and keeps aggregate counts for the
//! sidebar. Every server mutation is followed by a full refetch.

use crate::api::NotesBackend;
use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::{Error, Result};
use crate::models::{
    color_for_name, default_categories, Category, CategoryColor, CategoryId, CreateNoteRequest,
    Note, NoteCounts, NoteId, NoteQuery, SortOption, UpdateNoteRequest, ViewMode,
};
use crate::pinned::{load_pinned, save_pinned, PinnedStore};
use crate::util::unix_millis_now;

const LOAD_NOTES_FAILED: &str = "Failed to load notes";
const LOAD_NOTE_FAILED: &str = "Failed to load note";
const CREATE_NOTE_FAILED: &str = "Failed to create note";
const UPDATE_NOTE_FAILED: &str = "Failed to update note";
const DELETE_NOTE_FAILED: &str = "Failed to delete note";
const ARCHIVE_NOTE_FAILED: &str = "Failed to archive note";
const NOTE_CATEGORIES_FAILED: &str = "Failed to update note categories";
const LOAD_COUNTS_FAILED: &str = "Failed to load note counts";

/// Fields for a new note
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub categories: Vec<String>,
}

/// Partial note update; `None` keeps the loaded value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub categories: Option<Vec<String>>,
}

impl NoteUpdate {
    fn apply_to(self, note: &Note) -> UpdateNoteRequest {
        UpdateNoteRequest {
            title: self.title.unwrap_or_else(|| note.title.clone()),
            content: self.content.unwrap_or_else(|| note.content.clone()),
            categories: self.categories.unwrap_or_else(|| note.categories.clone()),
        }
    }
}

/// Complete view selection, applied at once with a single fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSettings {
    pub view_mode: ViewMode,
    pub selected_category_id: Option<CategoryId>,
    pub search_query: String,
    pub sort_option: SortOption,
    pub page: u32,
}

/// Partial category update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub color: Option<CategoryColor>,
}

/// Client-side view over the remote notes.
pub struct NoteBoard<B, S> {
    backend: B,
    pinned_store: S,
    notes: Vec<Note>,
    categories: Vec<Category>,
    view_mode: ViewMode,
    selected_category_id: Option<CategoryId>,
    search_query: String,
    sort_option: SortOption,
    loading: bool,
    error: Option<String>,
    current_page: u32,
    total_pages: u32,
    total_elements: u64,
    note_counts: NoteCounts,
    page_size: u32,
}

impl<B: NotesBackend, S: PinnedStore> NoteBoard<B, S> {
    /// Empty board with the default categories. Nothing is fetched until
    /// [`Self::refresh`] or a view change.
    pub fn new(backend: B, pinned_store: S) -> Self {
        Self {
            backend,
            pinned_store,
            notes: Vec::new(),
            categories: default_categories(),
            view_mode: ViewMode::default(),
            selected_category_id: None,
            search_query: String::new(),
            sort_option: SortOption::default(),
            loading: false,
            error: None,
            current_page: 0,
            total_pages: 0,
            total_elements: 0,
            note_counts: NoteCounts::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Notes of the current page, pinned first, server order kept otherwise.
    pub fn notes(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.notes.iter().collect();
        notes.sort_by_key(|note| !note.is_pinned);
        notes
    }

    /// Notes of the current page in server order.
    pub fn page_notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub const fn selected_category_id(&self) -> Option<&CategoryId> {
        self.selected_category_id.as_ref()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub const fn sort_option(&self) -> SortOption {
        self.sort_option
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last user-visible failure, cleared when the next operation starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub const fn note_counts(&self) -> &NoteCounts {
        &self.note_counts
    }

    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn category_by_id(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| &category.id == id)
    }

    /// Color for a note's category reference; `None` means it dangles.
    pub fn category_color(&self, name: &str) -> Option<CategoryColor> {
        color_for_name(&self.categories, name)
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.selected_category_id
            .as_ref()
            .and_then(|id| self.category_by_id(id))
    }

    /// The list query the current view translates to.
    pub fn page_query(&self) -> NoteQuery {
        let search = self.search_query.trim();
        NoteQuery {
            page: Some(self.current_page),
            size: Some(self.page_size),
            sort_by: Some(self.sort_option),
            archived: Some(self.view_mode.is_archived()),
            categories: self
                .selected_category()
                .map(|category| vec![category.name.clone()])
                .unwrap_or_default(),
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }

    // -----------------------------------------------------------------------
    // Fetching
    // -----------------------------------------------------------------------

    /// Fetch the current page and recompute counts.
    pub async fn refresh(&mut self) -> Result<()> {
        self.begin();
        let result = self.load_page().await;
        self.loading = false;
        if let Err(error) = &result {
            self.record_error(error, LOAD_NOTES_FAILED);
        }
        result
    }

    async fn load_page(&mut self) -> Result<()> {
        let query = self.page_query();
        let page = self.backend.list_notes(&query).await?;

        let pinned = load_pinned(&self.pinned_store);
        self.notes = page
            .content
            .into_iter()
            .map(|dto| {
                let mut note = Note::from(dto);
                note.is_pinned = pinned.contains(&note.id);
                note
            })
            .collect();
        self.total_pages = page.total_pages;
        self.total_elements = page.total_elements;
        tracing::debug!(
            page = self.current_page,
            total = self.total_elements,
            "Loaded {} notes",
            self.notes.len()
        );

        self.refresh_counts().await;
        Ok(())
    }

    /// Recompute active, archived, and per-category counts.
    ///
    /// Failures are logged and leave the previous counts in place.
    async fn refresh_counts(&mut self) {
        match self.fetch_counts().await {
            Ok(counts) => self.note_counts = counts,
            Err(error) => tracing::error!("Error fetching note counts: {}", error),
        }
    }

    /// Recompute counts without reloading the page.
    ///
    /// A failure is recorded in [`Self::error`] and returned. The previous
    /// counts stay in place.
    pub async fn load_counts(&mut self) -> Result<()> {
        self.begin();
        match self.fetch_counts().await {
            Ok(counts) => {
                self.note_counts = counts;
                self.loading = false;
                Ok(())
            }
            Err(error) => Err(self.fail(error, LOAD_COUNTS_FAILED)),
        }
    }

    async fn fetch_counts(&self) -> Result<NoteCounts> {
        let active = self
            .backend
            .list_notes(&NoteQuery::count(false, None))
            .await?;
        let archived = self
            .backend
            .list_notes(&NoteQuery::count(true, None))
            .await?;

        let mut counts = NoteCounts {
            active: active.total_elements,
            archived: archived.total_elements,
            ..NoteCounts::default()
        };
        for category in &self.categories {
            let page = self
                .backend
                .list_notes(&NoteQuery::count(false, Some(&category.name)))
                .await?;
            counts
                .by_category
                .insert(category.id.clone(), page.total_elements);
        }
        Ok(counts)
    }

    /// Fetch a single note, whether or not it is on the current page.
    pub async fn open_note(&mut self, id: NoteId) -> Result<Note> {
        self.begin();
        let result = self.backend.get_note(id).await;
        self.loading = false;
        match result {
            Ok(dto) => {
                let mut note = Note::from(dto);
                note.is_pinned = load_pinned(&self.pinned_store).contains(&note.id);
                Ok(note)
            }
            Err(error) => Err(self.fail(error, LOAD_NOTE_FAILED)),
        }
    }

    // -----------------------------------------------------------------------
    // View changes
    // -----------------------------------------------------------------------

    pub async fn set_view_mode(&mut self, view_mode: ViewMode) -> Result<()> {
        self.view_mode = view_mode;
        self.current_page = 0;
        self.refresh().await
    }

    /// Filter by a local category, or clear the filter with `None`.
    pub async fn set_selected_category(&mut self, id: Option<CategoryId>) -> Result<()> {
        self.selected_category_id = id;
        self.current_page = 0;
        self.refresh().await
    }

    pub async fn set_search_query(&mut self, query: impl Into<String>) -> Result<()> {
        self.search_query = query.into();
        self.current_page = 0;
        self.refresh().await
    }

    pub async fn set_sort_option(&mut self, sort_option: SortOption) -> Result<()> {
        self.sort_option = sort_option;
        self.current_page = 0;
        self.refresh().await
    }

    /// Replace the whole view and fetch once.
    pub async fn set_view(&mut self, settings: ViewSettings) -> Result<()> {
        self.view_mode = settings.view_mode;
        self.selected_category_id = settings.selected_category_id;
        self.search_query = settings.search_query;
        self.sort_option = settings.sort_option;
        self.current_page = settings.page;
        self.refresh().await
    }

    /// Jump to a zero-based page; filters are kept.
    pub async fn set_current_page(&mut self, page: u32) -> Result<()> {
        self.current_page = page;
        self.refresh().await
    }

    /// Advance one page. Returns `false` without fetching on the last page.
    pub async fn next_page(&mut self) -> Result<bool> {
        if self.current_page + 1 >= self.total_pages {
            return Ok(false);
        }
        self.set_current_page(self.current_page + 1).await?;
        Ok(true)
    }

    /// Go back one page. Returns `false` without fetching on the first page.
    pub async fn previous_page(&mut self) -> Result<bool> {
        if self.current_page == 0 {
            return Ok(false);
        }
        self.set_current_page(self.current_page - 1).await?;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Note mutations
    // -----------------------------------------------------------------------

    pub async fn add_note(&mut self, new_note: NewNote) -> Result<Note> {
        self.begin();
        let request = CreateNoteRequest {
            title: new_note.title,
            content: new_note.content,
            categories: new_note.categories,
        };
        match self.backend.create_note(&request).await {
            Ok(dto) => {
                let note = Note::from(dto);
                tracing::info!("Created note {}", note.id);
                self.reload_after_mutation().await;
                Ok(note)
            }
            Err(error) => Err(self.fail(error, CREATE_NOTE_FAILED)),
        }
    }

    /// Merge `update` over the loaded note and save it.
    ///
    /// Only notes on the current page can be updated.
    pub async fn update_note(&mut self, id: NoteId, update: NoteUpdate) -> Result<()> {
        self.begin();
        let current = self.notes.iter().find(|note| note.id == id).cloned();
        let Some(current) = current else {
            return Err(self.fail(Error::NoteNotFound(id), UPDATE_NOTE_FAILED));
        };
        let request = update.apply_to(&current);
        self.send_update(id, &request).await
    }

    /// Save a complete note body, whether or not the note is loaded.
    pub async fn replace_note(&mut self, id: NoteId, request: UpdateNoteRequest) -> Result<()> {
        self.begin();
        self.send_update(id, &request).await
    }

    async fn send_update(&mut self, id: NoteId, request: &UpdateNoteRequest) -> Result<()> {
        match self.backend.update_note(id, request).await {
            Ok(_) => {
                self.reload_after_mutation().await;
                Ok(())
            }
            Err(error) => Err(self.fail(error, UPDATE_NOTE_FAILED)),
        }
    }

    /// Delete a note and forget its pin.
    pub async fn delete_note(&mut self, id: NoteId) -> Result<()> {
        self.begin();
        if let Err(error) = self.backend.delete_note(id).await {
            return Err(self.fail(error, DELETE_NOTE_FAILED));
        }

        let mut pinned = load_pinned(&self.pinned_store);
        if pinned.remove(&id) {
            save_pinned(&self.pinned_store, &pinned);
        }

        self.reload_after_mutation().await;
        Ok(())
    }

    pub async fn toggle_archive(&mut self, id: NoteId) -> Result<()> {
        self.begin();
        match self.backend.toggle_archive(id).await {
            Ok(_) => {
                self.reload_after_mutation().await;
                Ok(())
            }
            Err(error) => Err(self.fail(error, ARCHIVE_NOTE_FAILED)),
        }
    }

    pub async fn add_note_categories(&mut self, id: NoteId, categories: &[String]) -> Result<()> {
        self.begin();
        match self.backend.add_categories(id, categories).await {
            Ok(_) => {
                self.reload_after_mutation().await;
                Ok(())
            }
            Err(error) => Err(self.fail(error, NOTE_CATEGORIES_FAILED)),
        }
    }

    pub async fn remove_note_category(&mut self, id: NoteId, category: &str) -> Result<()> {
        self.begin();
        match self.backend.remove_category(id, category).await {
            Ok(_) => {
                self.reload_after_mutation().await;
                Ok(())
            }
            Err(error) => Err(self.fail(error, NOTE_CATEGORIES_FAILED)),
        }
    }

    /// Flip a note's pin locally. Returns the new pinned state.
    pub fn toggle_pin(&mut self, id: NoteId) -> bool {
        let mut pinned = load_pinned(&self.pinned_store);
        let now_pinned = if pinned.remove(&id) {
            false
        } else {
            pinned.insert(id);
            true
        };
        save_pinned(&self.pinned_store, &pinned);

        if let Some(note) = self.notes.iter_mut().find(|note| note.id == id) {
            note.is_pinned = now_pinned;
        }
        now_pinned
    }

    // -----------------------------------------------------------------------
    // Category management
    // -----------------------------------------------------------------------

    /// Add a local category and refetch so its count shows up.
    pub async fn add_category(
        &mut self,
        name: &str,
        color: CategoryColor,
    ) -> Result<Category> {
        let name = normalize_category_name(name)?;
        let category = Category::new(self.next_category_id(), name, color);
        self.categories.push(category.clone());
        self.reload_after_category_change().await;
        Ok(category)
    }

    pub async fn update_category(
        &mut self,
        id: &CategoryId,
        update: CategoryUpdate,
    ) -> Result<Category> {
        let name = update
            .name
            .as_deref()
            .map(normalize_category_name)
            .transpose()?;
        let category = self
            .categories
            .iter_mut()
            .find(|category| &category.id == id)
            .ok_or_else(|| Error::CategoryNotFound(id.to_string()))?;
        if let Some(name) = name {
            category.name = name;
        }
        if let Some(color) = update.color {
            category.color = color;
        }
        let updated = category.clone();
        self.reload_after_category_change().await;
        Ok(updated)
    }

    /// Remove a local category. Notes that reference it keep the name.
    pub async fn delete_category(&mut self, id: &CategoryId) -> Result<Category> {
        let index = self
            .categories
            .iter()
            .position(|category| &category.id == id)
            .ok_or_else(|| Error::CategoryNotFound(id.to_string()))?;
        let removed = self.categories.remove(index);
        self.note_counts.by_category.remove(id);
        if self.selected_category_id.as_ref() == Some(id) {
            self.selected_category_id = None;
            self.current_page = 0;
        }
        self.reload_after_category_change().await;
        Ok(removed)
    }

    fn next_category_id(&self) -> CategoryId {
        let mut candidate = unix_millis_now();
        while self
            .categories
            .iter()
            .any(|category| category.id.as_str() == candidate.to_string())
        {
            candidate += 1;
        }
        CategoryId::new(candidate.to_string())
    }

    // -----------------------------------------------------------------------
    // Private
    // -----------------------------------------------------------------------

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn record_error(&mut self, error: &Error, fallback: &str) {
        tracing::error!("{}: {}", fallback, error);
        self.error = Some(error.user_message(fallback));
    }

    fn fail(&mut self, error: Error, fallback: &str) -> Error {
        self.loading = false;
        self.record_error(&error, fallback);
        error
    }

    /// Refetch after a successful mutation. A failed refetch is recorded but
    /// does not undo the mutation's success.
    async fn reload_after_mutation(&mut self) {
        if let Err(error) = self.load_page().await {
            self.record_error(&error, LOAD_NOTES_FAILED);
        }
        self.loading = false;
    }

    async fn reload_after_category_change(&mut self) {
        self.begin();
        self.reload_after_mutation().await;
    }
}

fn normalize_category_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(Error::InvalidInput(
            "category name must not be empty".to_string(),
        ))
    } else {
        Ok(trimmed.to_string())
    }
}
