use std::io::Write;

use notely_core::{NoteBoard, NotesBackend, PinnedStore};

use crate::commands::common::{board_failure, parse_note_id};
use crate::error::CliError;

/// Flips a note between the active and archived views.
pub async fn run_archive<B, S, W>(
    board: &mut NoteBoard<B, S>,
    id: &str,
    out: &mut W,
) -> Result<(), CliError>
where
    B: NotesBackend,
    S: PinnedStore,
    W: Write,
{
    let id = parse_note_id(id)?;
    if let Err(error) = board.toggle_archive(id).await {
        return Err(board_failure(board, error));
    }
    writeln!(out, "{id}")?;
    Ok(())
}
