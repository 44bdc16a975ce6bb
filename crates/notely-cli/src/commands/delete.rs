use std::io::Write;

use notely_core::{NoteBoard, NotesBackend, PinnedStore};

use crate::commands::common::{board_failure, parse_note_id};
use crate::error::CliError;

pub async fn run_delete<B, S, W>(
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
    if let Err(error) = board.delete_note(id).await {
        return Err(board_failure(board, error));
    }
    writeln!(out, "{id}")?;
    Ok(())
}
