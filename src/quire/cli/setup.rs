use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quire", bin_name = "quire", version)]
#[command(about = "Local-first pages with autosave, import and export", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $QUIRE_HOME or the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    Toggle,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Html,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List pages
    #[command(alias = "ls")]
    List,

    /// Create a new page and make it active
    #[command(alias = "n")]
    New {
        /// Title words (defaults to a placeholder)
        #[arg(num_args = 0..)]
        title: Vec<String>,

        /// Page icon
        #[arg(short, long, default_value = "")]
        icon: String,
    },

    /// Make the page at INDEX (as shown by `list`) active
    #[command(alias = "s")]
    Select { index: usize },

    /// Print the active page
    Show,

    /// Rename the active page
    Rename {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Replace the active page's content (reads stdin when omitted)
    Write { content: Option<String> },

    /// Delete the active page
    #[command(alias = "rm")]
    Delete,

    /// Duplicate the active page
    #[command(alias = "dup")]
    Duplicate,

    /// Search titles and content
    Search {
        #[arg(num_args = 0..)]
        term: Vec<String>,
    },

    /// Page, word and character counts
    Stats,

    /// Show or change the theme
    Theme { mode: Option<ThemeArg> },

    /// Export all pages (prompts for a path when omitted)
    Export {
        #[arg(value_enum)]
        format: FormatArg,
        path: Option<PathBuf>,
    },

    /// Replace all pages with a JSON export (prompts for a path when omitted)
    Import {
        path: Option<PathBuf>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (autosave-secs, data-file, confirm-import)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Type into the active page from stdin with autosave running
    Session {
        /// Autosave period in seconds (overrides config)
        #[arg(long, value_name = "SECS")]
        autosave: Option<u64>,
    },
}
