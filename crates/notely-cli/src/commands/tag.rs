use std::io::Write;

use notely_core::{NoteBoard, NotesBackend, PinnedStore};

use crate::commands::common::{board_failure, normalize_content, parse_note_id};
use crate::error::CliError;

pub async fn run_tag<B, S, W>(
    board: &mut NoteBoard<B, S>,
    id: &str,
    categories: &[String],
    out: &mut W,
) -> Result<(), CliError>
where
    B: NotesBackend,
    S: PinnedStore,
    W: Write,
{
    let id = parse_note_id(id)?;
    let categories = categories
        .iter()
        .filter_map(|name| normalize_content(name))
        .collect::<Vec<String>>();
    if categories.is_empty() {
        return Err(CliError::EmptyCategory);
    }

    if let Err(error) = board.add_note_categories(id, &categories).await {
        return Err(board_failure(board, error));
    }
    writeln!(out, "{id}")?;
    Ok(())
}

pub async fn run_untag<B, S, W>(
    board: &mut NoteBoard<B, S>,
    id: &str,
    category: &str,
    out: &mut W,
) -> Result<(), CliError>
where
    B: NotesBackend,
    S: PinnedStore,
    W: Write,
{
    let id = parse_note_id(id)?;
    let Some(category) = normalize_content(category) else {
        return Err(CliError::EmptyCategory);
    };

    if let Err(error) = board.remove_note_category(id, &category).await {
        return Err(board_failure(board, error));
    }
    writeln!(out, "{id}")?;
    Ok(())
}
