use std::io::Write;

use notely_core::{NewNote, NoteBoard, NotesBackend, PinnedStore};

use crate::cli::NoteArgs;
use crate::commands::common::{board_failure, resolve_title};
use crate::error::CliError;

/// Creates a note from already resolved content and prints its id.
pub async fn run_add<B, S, W>(
    board: &mut NoteBoard<B, S>,
    note: NoteArgs,
    content: String,
    out: &mut W,
) -> Result<(), CliError>
where
    B: NotesBackend,
    S: PinnedStore,
    W: Write,
{
    let title = resolve_title(note.title.as_deref(), &content)?;
    let new_note = NewNote {
        title,
        content,
        categories: note.categories,
    };

    match board.add_note(new_note).await {
        Ok(created) => {
            writeln!(out, "{}", created.id)?;
            Ok(())
        }
        Err(error) => Err(board_failure(board, error)),
    }
}
