pub mod add;
pub mod archive;
pub mod common;
pub mod completions;
pub mod config;
pub mod counts;
pub mod delete;
pub mod edit;
pub mod list;
pub mod pin;
pub mod shell;
pub mod show;
pub mod tag;

use std::io::{self, Write};

use notely_core::{NoteBoard, NotesBackend, PinnedStore};

use crate::cli::Commands;
use crate::commands::common::resolve_note_content;
use crate::error::CliError;

/// Runs a command that needs a note board.
pub async fn run_board_command<B, S, W>(
    command: Commands,
    board: &mut NoteBoard<B, S>,
    out: &mut W,
) -> Result<(), CliError>
where
    B: NotesBackend,
    S: PinnedStore,
    W: Write,
{
    match command {
        Commands::List { view, json } => list::run_list(board, view, json, out).await,
        Commands::Show { id, json } => show::run_show(board, &id, json, out).await,
        Commands::Add { note, content } => {
            let content = resolve_note_content(&content)?;
            add::run_add(board, note, content, out).await
        }
        Commands::Edit { id, note, content } => {
            edit::run_edit(board, &id, note, content, out).await
        }
        Commands::Delete { id } => delete::run_delete(board, &id, out).await,
        Commands::Archive { id } => archive::run_archive(board, &id, out).await,
        Commands::Pin { id } => pin::run_pin(board, &id, out),
        Commands::Tag { id, categories } => tag::run_tag(board, &id, &categories, out).await,
        Commands::Untag { id, category } => tag::run_untag(board, &id, &category, out).await,
        Commands::Counts { json } => counts::run_counts(board, json, out).await,
        Commands::Categories => counts::run_categories(board, out).await,
        Commands::Shell => shell::run_shell(board, io::stdin().lock(), out).await,
        Commands::Completions { .. } | Commands::Config { .. } => Err(CliError::Config(
            "command does not use the notes service".to_string(),
        )),
    }
}
