use std::io::Write;

use notely_core::{NoteBoard, NotesBackend, PinnedStore};

use crate::commands::common::{
    board_failure, format_note_detail, note_to_list_item, parse_note_id, write_lines,
};
use crate::error::CliError;

pub async fn run_show<B, S, W>(
    board: &mut NoteBoard<B, S>,
    id: &str,
    as_json: bool,
    out: &mut W,
) -> Result<(), CliError>
where
    B: NotesBackend,
    S: PinnedStore,
    W: Write,
{
    let id = parse_note_id(id)?;
    let note = match board.open_note(id).await {
        Ok(note) => note,
        Err(error) => return Err(board_failure(board, error)),
    };

    if as_json {
        let item = note_to_list_item(&note, board.categories());
        writeln!(out, "{}", serde_json::to_string_pretty(&item)?)?;
    } else {
        write_lines(out, &format_note_detail(&note, board.categories()))?;
    }
    Ok(())
}
