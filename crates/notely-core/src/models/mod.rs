//! Data models for Notely

mod category;
mod note;
mod page;
mod query;

pub use category::{
    color_for_name, default_categories, find_by_name, Category, CategoryColor, CategoryId,
};
pub use note::{
    parse_timestamp, AddCategoriesRequest, CreateNoteRequest, Note, NoteDto, NoteId,
    UpdateNoteRequest,
};
pub use page::{PageResponse, Pageable, SortInfo};
pub use query::{NoteCounts, NoteQuery, SortOption, ViewMode};
