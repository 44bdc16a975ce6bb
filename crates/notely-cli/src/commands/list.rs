use std::io::Write;

use notely_core::{NoteBoard, NotesBackend, PinnedStore, ViewMode, ViewSettings};

use crate::cli::ViewArgs;
use crate::commands::common::{
    board_failure, format_note_lines, format_page_footer, normalize_search_query,
    note_to_list_item, page_index, resolve_category, write_lines, NoteListItem,
};
use crate::error::CliError;

pub async fn run_list<B, S, W>(
    board: &mut NoteBoard<B, S>,
    view: ViewArgs,
    as_json: bool,
    out: &mut W,
) -> Result<(), CliError>
where
    B: NotesBackend,
    S: PinnedStore,
    W: Write,
{
    let settings = view_settings(board, view)?;
    if let Err(error) = board.set_view(settings).await {
        return Err(board_failure(board, error));
    }

    if as_json {
        let json_items = board
            .notes()
            .into_iter()
            .map(|note| note_to_list_item(note, board.categories()))
            .collect::<Vec<NoteListItem>>();
        writeln!(out, "{}", serde_json::to_string_pretty(&json_items)?)?;
    } else {
        print_page(board, out)?;
    }

    Ok(())
}

/// Prints the loaded page, pinned notes first, followed by a paging footer.
pub fn print_page<B, S, W>(board: &NoteBoard<B, S>, out: &mut W) -> Result<(), CliError>
where
    B: NotesBackend,
    S: PinnedStore,
    W: Write,
{
    let notes = board.notes();
    write_lines(out, &format_note_lines(&notes, board.categories()))?;
    writeln!(
        out,
        "{}",
        format_page_footer(
            board.current_page(),
            board.total_pages(),
            board.total_elements()
        )
    )?;
    Ok(())
}

fn view_settings<B, S>(board: &NoteBoard<B, S>, view: ViewArgs) -> Result<ViewSettings, CliError>
where
    B: NotesBackend,
    S: PinnedStore,
{
    let selected_category_id = view
        .category
        .as_deref()
        .map(|name| resolve_category(board.categories(), name))
        .transpose()?;
    let search_query = view
        .search
        .as_deref()
        .map(normalize_search_query)
        .transpose()?
        .unwrap_or_default();

    Ok(ViewSettings {
        view_mode: if view.archived {
            ViewMode::Archived
        } else {
            ViewMode::Active
        },
        selected_category_id,
        search_query,
        sort_option: view.sort.into(),
        page: page_index(view.page)?,
    })
}
