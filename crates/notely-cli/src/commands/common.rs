use std::env;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;
use notely_core::models::find_by_name;
use notely_core::{
    Category, CategoryId, FilePinnedStore, Note, NoteBoard, NoteCounts, NoteId, NotesApiClient,
    NotesBackend, PinnedStore,
};
use serde::Serialize;

use crate::config::Settings;
use crate::error::CliError;

/// Board backed by the remote notes service and the pinned-notes file
pub type Board = NoteBoard<NotesApiClient, FilePinnedStore>;

/// Label used for a category reference that no local category matches.
pub const FALLBACK_COLOR_LABEL: &str = "default";

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: i64,
    pub title: String,
    pub preview: String,
    pub content: String,
    pub categories: Vec<CategoryLabel>,
    pub is_archived: bool,
    pub is_pinned: bool,
    pub created_at: String,
    pub updated_at: String,
    pub relative_time: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CategoryLabel {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct CountsItem {
    pub active: u64,
    pub archived: u64,
    pub categories: Vec<CategoryCountItem>,
}

#[derive(Debug, Serialize)]
pub struct CategoryCountItem {
    pub id: String,
    pub name: String,
    pub color: String,
    pub count: u64,
}

pub fn open_board(settings: &Settings) -> Result<Board, CliError> {
    let client = NotesApiClient::new(&settings.client)?;
    tracing::debug!(
        "Using notes service at {} with pins in {}",
        client.base_url(),
        settings.pinned_path.display()
    );
    Ok(NoteBoard::new(client, FilePinnedStore::new(&settings.pinned_path))
        .with_page_size(settings.client.page_size))
}

/// Wraps a failed board operation with the message the board recorded for it.
pub fn board_failure<B: NotesBackend, S: PinnedStore>(
    board: &NoteBoard<B, S>,
    error: notely_core::Error,
) -> CliError {
    match board.error() {
        Some(message) => CliError::Board {
            message: message.to_string(),
            source: error,
        },
        None => CliError::Core(error),
    }
}

pub fn parse_note_id(raw: &str) -> Result<NoteId, CliError> {
    raw.parse::<NoteId>()
        .map_err(|_| CliError::InvalidNoteId(raw.trim().to_string()))
}

/// Looks up a local category by name, ignoring case.
pub fn resolve_category(categories: &[Category], name: &str) -> Result<CategoryId, CliError> {
    let name = name.trim();
    find_by_name(categories, name)
        .map(|category| category.id.clone())
        .ok_or_else(|| CliError::UnknownCategory(name.to_string()))
}

pub fn category_label(categories: &[Category], name: &str) -> CategoryLabel {
    CategoryLabel {
        name: name.to_string(),
        color: find_by_name(categories, name).map_or_else(
            || FALLBACK_COLOR_LABEL.to_string(),
            |category| category.color.to_string(),
        ),
    }
}

pub fn render_categories(note: &Note, categories: &[Category]) -> String {
    note.categories
        .iter()
        .map(|name| {
            let label = category_label(categories, name);
            format!("{}({})", label.name, label.color)
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn format_note_lines(notes: &[&Note], categories: &[Category]) -> Vec<String> {
    format_note_lines_at(notes, categories, Utc::now().timestamp_millis())
}

pub fn format_note_lines_at(notes: &[&Note], categories: &[Category], now_ms: i64) -> Vec<String> {
    notes
        .iter()
        .map(|note| {
            let marker = if note.is_pinned { '*' } else { ' ' };
            let id = format!("#{}", note.id);
            let preview = note_preview(note, 40);
            let relative_time = format_relative_time(note.updated_at.timestamp_millis(), now_ms);
            let labels = render_categories(note, categories);

            if labels.is_empty() {
                format!("{marker} {id:<6}  {preview:<40}  {relative_time}")
            } else {
                format!("{marker} {id:<6}  {preview:<40}  {relative_time:<10}  {labels}")
            }
        })
        .collect()
}

pub fn format_page_footer(current_page: u32, total_pages: u32, total_elements: u64) -> String {
    if total_pages == 0 {
        return "No notes".to_string();
    }
    let noun = if total_elements == 1 { "note" } else { "notes" };
    format!(
        "Page {} of {total_pages} ({total_elements} {noun})",
        current_page + 1
    )
}

pub fn note_to_list_item(note: &Note, categories: &[Category]) -> NoteListItem {
    let now_ms = Utc::now().timestamp_millis();

    NoteListItem {
        id: note.id.get(),
        title: note.title.clone(),
        preview: note_preview(note, 80),
        content: note.content.clone(),
        categories: note
            .categories
            .iter()
            .map(|name| category_label(categories, name))
            .collect(),
        is_archived: note.is_archived,
        is_pinned: note.is_pinned,
        created_at: note.created_at.to_rfc3339(),
        updated_at: note.updated_at.to_rfc3339(),
        relative_time: format_relative_time(note.updated_at.timestamp_millis(), now_ms),
    }
}

/// Full view of one note, header fields first.
pub fn format_note_detail(note: &Note, categories: &[Category]) -> Vec<String> {
    let mut lines = vec![
        format!("#{}  {}", note.id, note.title.trim()),
        format!(
            "Status:     {}{}",
            if note.is_archived { "archived" } else { "active" },
            if note.is_pinned { ", pinned" } else { "" }
        ),
    ];
    let labels = render_categories(note, categories);
    if !labels.is_empty() {
        lines.push(format!("Categories: {labels}"));
    }
    lines.push(format!("Created:    {}", format_timestamp(note.created_at)));
    lines.push(format!("Updated:    {}", format_timestamp(note.updated_at)));
    lines.push(String::new());
    lines.extend(note.content.lines().map(str::to_string));
    lines
}

pub fn counts_to_item(counts: &NoteCounts, categories: &[Category]) -> CountsItem {
    CountsItem {
        active: counts.active,
        archived: counts.archived,
        categories: categories
            .iter()
            .map(|category| CategoryCountItem {
                id: category.id.to_string(),
                name: category.name.clone(),
                color: category.color.to_string(),
                count: counts.for_category(&category.id),
            })
            .collect(),
    }
}

pub fn format_counts(counts: &NoteCounts, categories: &[Category]) -> Vec<String> {
    let mut lines = vec![
        format!("{:<12}  {}", "Active", counts.active),
        format!("{:<12}  {}", "Archived", counts.archived),
    ];
    for category in categories {
        lines.push(format!(
            "  {:<10}  {}",
            category.name,
            counts.for_category(&category.id)
        ));
    }
    lines
}

pub fn format_category_lines(counts: &NoteCounts, categories: &[Category]) -> Vec<String> {
    categories
        .iter()
        .map(|category| {
            format!(
                "{:<14}  {:<12}  {:<8}  {}",
                category.id,
                category.name,
                category.color,
                counts.for_category(&category.id)
            )
        })
        .collect()
}

pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let source = if note.title.trim().is_empty() {
        note.content.lines().next().unwrap_or("")
    } else {
        note.title.as_str()
    };
    let collapsed = source.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_timestamp(timestamp: chrono::DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

pub fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> Result<(), CliError> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Title from the flag, otherwise the first line of the content.
pub fn resolve_title(title: Option<&str>, content: &str) -> Result<String, CliError> {
    title
        .and_then(normalize_content)
        .or_else(|| content.lines().next().and_then(normalize_content))
        .ok_or(CliError::EmptyTitle)
}

pub fn resolve_note_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    if let Some(content) = capture_editor_input()? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

/// Like [`resolve_note_content`] but never reads stdin, which the shell owns.
pub fn resolve_interactive_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    capture_editor_input()?.ok_or(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_search_query(query: &str) -> Result<String, CliError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptySearchQuery)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Converts a 1-based page number from the command line.
pub const fn page_index(page: u32) -> Result<u32, CliError> {
    match page.checked_sub(1) {
        Some(index) => Ok(index),
        None => Err(CliError::InvalidPage),
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn capture_editor_input() -> Result<Option<String>, CliError> {
    capture_editor_input_with_initial("")
}

pub fn capture_editor_input_with_initial(
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let note_content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&note_content))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let mut command = Command::new(program);
            command.args(parts).arg(file_path);

            let status = command.status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

pub fn create_temp_note_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("notely-note-{}-{now}.md", std::process::id()))
}
