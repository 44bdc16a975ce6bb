use std::io::Write;

use notely_core::{NoteBoard, NotesBackend, PinnedStore};

use crate::commands::common::{
    board_failure, counts_to_item, format_category_lines, format_counts, write_lines,
};
use crate::error::CliError;

pub async fn run_counts<B, S, W>(
    board: &mut NoteBoard<B, S>,
    as_json: bool,
    out: &mut W,
) -> Result<(), CliError>
where
    B: NotesBackend,
    S: PinnedStore,
    W: Write,
{
    if let Err(error) = board.load_counts().await {
        return Err(board_failure(board, error));
    }

    if as_json {
        let item = counts_to_item(board.note_counts(), board.categories());
        writeln!(out, "{}", serde_json::to_string_pretty(&item)?)?;
    } else {
        write_lines(out, &format_counts(board.note_counts(), board.categories()))?;
    }
    Ok(())
}

pub async fn run_categories<B, S, W>(board: &mut NoteBoard<B, S>, out: &mut W) -> Result<(), CliError>
where
    B: NotesBackend,
    S: PinnedStore,
    W: Write,
{
    if let Err(error) = board.load_counts().await {
        return Err(board_failure(board, error));
    }
    write_lines(
        out,
        &format_category_lines(board.note_counts(), board.categories()),
    )
}
