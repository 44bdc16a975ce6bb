use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use notely_core::{CategoryColor, SortOption, ViewMode};

#[derive(Parser)]
#[command(name = "notely")]
#[command(about = "Create, pin, archive, and search notes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Notes service base URL (overrides config and NOTELY_API_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List notes, pinned first
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        view: ViewArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single note
    Show {
        /// Note ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new note
    #[command(alias = "new")]
    Add {
        #[command(flatten)]
        note: NoteArgs,
        /// Note content (falls back to stdin, then $EDITOR)
        content: Vec<String>,
    },
    /// Edit an existing note
    Edit {
        /// Note ID
        id: String,
        #[command(flatten)]
        note: NoteArgs,
        /// Replacement content (opens $EDITOR when neither title nor content is given)
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note ID
        id: String,
    },
    /// Archive or unarchive a note
    Archive {
        /// Note ID
        id: String,
    },
    /// Pin or unpin a note (stored locally)
    Pin {
        /// Note ID
        id: String,
    },
    /// Add categories to a note
    Tag {
        /// Note ID
        id: String,
        /// Category names
        #[arg(required = true)]
        categories: Vec<String>,
    },
    /// Remove a category from a note
    Untag {
        /// Note ID
        id: String,
        /// Category name
        category: String,
    },
    /// Show active, archived, and per-category counts
    Counts {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List categories with their colors and counts
    Categories,
    /// Start an interactive session
    Shell,
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Show or change CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Board view selection shared by `list` and the shell
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Show archived notes instead of active ones
    #[arg(long)]
    pub archived: bool,
    /// Only notes in this category
    #[arg(short, long, value_name = "NAME")]
    pub category: Option<String>,
    /// Search title and content
    #[arg(short, long, value_name = "QUERY")]
    pub search: Option<String>,
    /// Sort order
    #[arg(long, value_enum, default_value_t = SortArg::Newest)]
    pub sort: SortArg,
    /// Page number, starting at 1
    #[arg(short, long, default_value = "1")]
    pub page: u32,
}

/// Editable note fields
#[derive(clap::Args, Debug, Clone, Default)]
pub struct NoteArgs {
    /// Note title
    #[arg(short, long)]
    pub title: Option<String>,
    /// Category name (repeatable)
    #[arg(short = 'c', long = "category", value_name = "NAME")]
    pub categories: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SortArg {
    #[default]
    Newest,
    Oldest,
    Title,
    Updated,
}

impl From<SortArg> for SortOption {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Newest => Self::Newest,
            SortArg::Oldest => Self::Oldest,
            SortArg::Title => Self::Title,
            SortArg::Updated => Self::Updated,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ViewArg {
    Active,
    Archived,
}

impl From<ViewArg> for ViewMode {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::Active => Self::Active,
            ViewArg::Archived => Self::Archived,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ColorArg {
    Personal,
    Work,
    Ideas,
    Tasks,
}

impl From<ColorArg> for CategoryColor {
    fn from(value: ColorArg) -> Self {
        match value {
            ColorArg::Personal => Self::Personal,
            ColorArg::Work => Self::Work,
            ColorArg::Ideas => Self::Ideas,
            ColorArg::Tasks => Self::Tasks,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Update the stored configuration
    Set {
        /// Notes service base URL
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,
        /// Notes per page
        #[arg(long, value_name = "N")]
        page_size: Option<u32>,
        /// Where pinned note ids are stored
        #[arg(long, value_name = "PATH")]
        pinned_path: Option<PathBuf>,
    },
}

/// Commands accepted inside `notely shell`
#[derive(Parser)]
#[command(name = "notely", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand)]
pub enum ShellCommand {
    /// Reprint the current page
    #[command(alias = "ls")]
    List,
    /// Refetch the current page and counts
    Refresh,
    /// Switch between active and archived notes
    View {
        #[arg(value_enum)]
        mode: ViewArg,
    },
    /// Filter by category; without a name the filter is cleared
    Select { name: Option<String> },
    /// Search title and content; without words the search is cleared
    Search { query: Vec<String> },
    /// Change the sort order
    Sort {
        #[arg(value_enum)]
        sort: SortArg,
    },
    /// Jump to a page, starting at 1
    Page { page: u32 },
    /// Next page
    Next,
    /// Previous page
    Prev,
    /// Show a single note
    Show { id: String },
    /// Create a note
    Add {
        #[command(flatten)]
        note: NoteArgs,
        content: Vec<String>,
    },
    /// Edit a note
    Edit {
        id: String,
        #[command(flatten)]
        note: NoteArgs,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a note
    #[command(alias = "rm")]
    Delete { id: String },
    /// Archive or unarchive a note
    Archive { id: String },
    /// Pin or unpin a note
    Pin { id: String },
    /// Add categories to a note
    Tag {
        id: String,
        #[arg(required = true)]
        categories: Vec<String>,
    },
    /// Remove a category from a note
    Untag { id: String, category: String },
    /// Show counts
    Counts,
    /// Manage local categories
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    /// List categories
    List,
    /// Add a category
    Add {
        name: String,
        #[arg(value_enum)]
        color: ColorArg,
    },
    /// Rename a category
    Rename { name: String, new_name: String },
    /// Change a category's color
    Recolor {
        name: String,
        #[arg(value_enum)]
        color: ColorArg,
    },
    /// Delete a category; notes keep the name
    Delete { name: String },
}
