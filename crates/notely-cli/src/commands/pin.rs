use std::io::Write;

use notely_core::{NoteBoard, NotesBackend, PinnedStore};

use crate::commands::common::parse_note_id;
use crate::error::CliError;

/// Pins are local, so this never talks to the notes service.
pub fn run_pin<B, S, W>(board: &mut NoteBoard<B, S>, id: &str, out: &mut W) -> Result<(), CliError>
where
    B: NotesBackend,
    S: PinnedStore,
    W: Write,
{
    let id = parse_note_id(id)?;
    if board.toggle_pin(id) {
        writeln!(out, "Pinned #{id}")?;
    } else {
        writeln!(out, "Unpinned #{id}")?;
    }
    Ok(())
}
