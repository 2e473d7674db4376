//! # CLI Layer
//!
//! One possible host for the quire core. This is the only place that knows
//! about the terminal: argument parsing, prompts, colors, exit codes.
//!
//! Each invocation opens the stored collection, runs one operation through
//! `QuireApi` (which persists on change) and prints the `CmdResult`. The
//! `session` subcommand keeps the process alive with autosave running.
//!
//! - `setup`: clap definitions
//! - `commands`: `run()`, context setup and per-command handlers
//! - `render`: output formatting
//! - `terminal`: prompt-based file dialogs and confirmations

mod commands;
mod render;
mod setup;
mod terminal;

pub use commands::run;
