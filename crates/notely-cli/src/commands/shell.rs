//! Interactive session over a single board.
//!
//! Each input line is tokenized and parsed with [`ShellLine`]. The board keeps
//! its view between commands, and categories created here last until the
//! session ends.

use std::io::{BufRead, Write};

use clap::Parser;
use notely_core::{CategoryUpdate, NoteBoard, NotesBackend, PinnedStore};

use crate::cli::{CategoryCommand, ShellCommand, ShellLine};
use crate::commands::add::run_add;
use crate::commands::archive::run_archive;
use crate::commands::common::{
    board_failure, format_category_lines, page_index, resolve_category,
    resolve_interactive_content, write_lines,
};
use crate::commands::counts::run_counts;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::list::print_page;
use crate::commands::pin::run_pin;
use crate::commands::show::run_show;
use crate::commands::tag::{run_tag, run_untag};
use crate::error::CliError;

enum ShellFlow {
    Continue,
    Quit,
}

pub async fn run_shell<B, S, R, W>(
    board: &mut NoteBoard<B, S>,
    input: R,
    out: &mut W,
) -> Result<(), CliError>
where
    B: NotesBackend,
    S: PinnedStore,
    R: BufRead,
    W: Write,
{
    let result = board.refresh().await;
    if let Err(error) = show_page(board, result, out) {
        writeln!(out, "Error: {error}")?;
    }

    let mut lines = input.lines();
    loop {
        write!(out, "{} ", prompt(board))?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let tokens = match split_command_line(&line?) {
            Ok(tokens) => tokens,
            Err(message) => {
                writeln!(out, "Error: {message}")?;
                continue;
            }
        };
        if tokens.is_empty() {
            continue;
        }

        let command = match ShellLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed.command,
            Err(error) => {
                write!(out, "{}", error.render())?;
                continue;
            }
        };

        match execute(board, command, out).await {
            Ok(ShellFlow::Continue) => {}
            Ok(ShellFlow::Quit) => break,
            Err(error) => writeln!(out, "Error: {error}")?,
        }
    }

    Ok(())
}

async fn execute<B, S, W>(
    board: &mut NoteBoard<B, S>,
    command: ShellCommand,
    out: &mut W,
) -> Result<ShellFlow, CliError>
where
    B: NotesBackend,
    S: PinnedStore,
    W: Write,
{
    match command {
        ShellCommand::List => print_page(board, out)?,
        ShellCommand::Refresh => {
            let result = board.refresh().await;
            show_page(board, result, out)?;
        }
        ShellCommand::View { mode } => {
            let result = board.set_view_mode(mode.into()).await;
            show_page(board, result, out)?;
        }
        ShellCommand::Select { name } => {
            let id = name
                .as_deref()
                .map(|name| resolve_category(board.categories(), name))
                .transpose()?;
            let result = board.set_selected_category(id).await;
            show_page(board, result, out)?;
        }
        ShellCommand::Search { query } => {
            let result = board.set_search_query(query.join(" ")).await;
            show_page(board, result, out)?;
        }
        ShellCommand::Sort { sort } => {
            let result = board.set_sort_option(sort.into()).await;
            show_page(board, result, out)?;
        }
        ShellCommand::Page { page } => {
            let result = board.set_current_page(page_index(page)?).await;
            show_page(board, result, out)?;
        }
        ShellCommand::Next => match board.next_page().await {
            Ok(true) => print_page(board, out)?,
            Ok(false) => writeln!(out, "Already on the last page")?,
            Err(error) => return Err(board_failure(board, error)),
        },
        ShellCommand::Prev => match board.previous_page().await {
            Ok(true) => print_page(board, out)?,
            Ok(false) => writeln!(out, "Already on the first page")?,
            Err(error) => return Err(board_failure(board, error)),
        },
        ShellCommand::Show { id } => run_show(board, &id, false, out).await?,
        ShellCommand::Add { note, content } => {
            let content = resolve_interactive_content(&content)?;
            run_add(board, note, content, out).await?;
            print_page(board, out)?;
        }
        ShellCommand::Edit { id, note, content } => {
            run_edit(board, &id, note, content, out).await?;
            print_page(board, out)?;
        }
        ShellCommand::Delete { id } => {
            run_delete(board, &id, out).await?;
            print_page(board, out)?;
        }
        ShellCommand::Archive { id } => {
            run_archive(board, &id, out).await?;
            print_page(board, out)?;
        }
        ShellCommand::Pin { id } => {
            run_pin(board, &id, out)?;
            print_page(board, out)?;
        }
        ShellCommand::Tag { id, categories } => {
            run_tag(board, &id, &categories, out).await?;
            print_page(board, out)?;
        }
        ShellCommand::Untag { id, category } => {
            run_untag(board, &id, &category, out).await?;
            print_page(board, out)?;
        }
        ShellCommand::Counts => run_counts(board, false, out).await?,
        ShellCommand::Category { command } => run_category(board, command, out).await?,
        ShellCommand::Quit => return Ok(ShellFlow::Quit),
    }
    Ok(ShellFlow::Continue)
}

async fn run_category<B, S, W>(
    board: &mut NoteBoard<B, S>,
    command: CategoryCommand,
    out: &mut W,
) -> Result<(), CliError>
where
    B: NotesBackend,
    S: PinnedStore,
    W: Write,
{
    match command {
        CategoryCommand::List => {}
        CategoryCommand::Add { name, color } => {
            let category = board.add_category(&name, color.into()).await?;
            writeln!(out, "Added category {} ({})", category.name, category.id)?;
        }
        CategoryCommand::Rename { name, new_name } => {
            let id = resolve_category(board.categories(), &name)?;
            let update = CategoryUpdate {
                name: Some(new_name),
                color: None,
            };
            let category = board.update_category(&id, update).await?;
            writeln!(out, "Renamed category to {}", category.name)?;
        }
        CategoryCommand::Recolor { name, color } => {
            let id = resolve_category(board.categories(), &name)?;
            let update = CategoryUpdate {
                name: None,
                color: Some(color.into()),
            };
            let category = board.update_category(&id, update).await?;
            writeln!(out, "Category {} is now {}", category.name, category.color)?;
        }
        CategoryCommand::Delete { name } => {
            let id = resolve_category(board.categories(), &name)?;
            let category = board.delete_category(&id).await?;
            writeln!(out, "Deleted category {}", category.name)?;
        }
    }
    write_lines(
        out,
        &format_category_lines(board.note_counts(), board.categories()),
    )
}

fn show_page<B, S, W>(
    board: &NoteBoard<B, S>,
    result: notely_core::Result<()>,
    out: &mut W,
) -> Result<(), CliError>
where
    B: NotesBackend,
    S: PinnedStore,
    W: Write,
{
    if let Err(error) = result {
        return Err(board_failure(board, error));
    }
    print_page(board, out)
}

fn prompt<B, S>(board: &NoteBoard<B, S>) -> String
where
    B: NotesBackend,
    S: PinnedStore,
{
    let mut scope = board.view_mode().to_string();
    if let Some(category) = board.selected_category() {
        scope.push('/');
        scope.push_str(&category.name);
    }
    let search = board.search_query().trim();
    if !search.is_empty() {
        scope.push_str(&format!(" \"{search}\""));
    }
    format!("notely[{scope}]>")
}

/// Splits a shell line into arguments. Single and double quotes group words;
/// a backslash escapes the next character outside single quotes.
pub fn split_command_line(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(open), c) if c == open => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_token = true;
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(ch);
                in_token = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err("unterminated quote".to_string());
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
