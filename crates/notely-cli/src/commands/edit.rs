use std::io::Write;

use notely_core::models::UpdateNoteRequest;
use notely_core::{NoteBoard, NotesBackend, PinnedStore};

use crate::cli::NoteArgs;
use crate::commands::common::{
    board_failure, capture_editor_input_with_initial, normalize_content, parse_note_id,
};
use crate::error::CliError;

/// Updates a note. With neither a title nor content, the content is edited in `$EDITOR`.
pub async fn run_edit<B, S, W>(
    board: &mut NoteBoard<B, S>,
    id: &str,
    note: NoteArgs,
    content: Option<String>,
    out: &mut W,
) -> Result<(), CliError>
where
    B: NotesBackend,
    S: PinnedStore,
    W: Write,
{
    let id = parse_note_id(id)?;
    let current = match board.open_note(id).await {
        Ok(current) => current,
        Err(error) => return Err(board_failure(board, error)),
    };

    let title = note.title.as_deref().and_then(normalize_content);
    let content = match content {
        Some(content) => Some(normalize_content(&content).ok_or(CliError::EmptyContent)?),
        None if title.is_none() && note.categories.is_empty() => {
            let Some(edited) = capture_editor_input_with_initial(&current.content)? else {
                return Err(CliError::EmptyEditedContent);
            };
            Some(edited)
        }
        None => None,
    };

    let request = UpdateNoteRequest {
        title: title.unwrap_or_else(|| current.title.clone()),
        content: content.unwrap_or_else(|| current.content.clone()),
        categories: if note.categories.is_empty() {
            current.categories.clone()
        } else {
            note.categories
        },
    };
    if request == UpdateNoteRequest::from(&current) {
        writeln!(out, "{}", current.id)?;
        return Ok(());
    }

    if let Err(error) = board.replace_note(id, request).await {
        return Err(board_failure(board, error));
    }
    writeln!(out, "{id}")?;
    Ok(())
}
