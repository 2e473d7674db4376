//! # Storage Layer
//!
//! Two capabilities the core consumes but does not implement itself:
//!
//! - [`StorageBackend`]: persists and retrieves the serialized
//!   [`DocumentCollection`](crate::model::DocumentCollection) as one document.
//! - [`FileAccess`]: reads and writes arbitrary files for import and export,
//!   and asks the host to pick a path.
//!
//! ## Implementations
//!
//! - [`fs::FsBackend`] / [`fs::FsFileAccess`]: production, on the local filesystem.
//!   The backend keeps a single pretty-printed JSON file and replaces it
//!   atomically (write to a temp file, then rename).
//! - [`memory::MemBackend`] / [`memory::MemFileAccess`]: in-memory, with switches
//!   to simulate read and write failures.
//!
//! Both traits take `&self`. The in-memory versions use `RefCell` since the
//! core runs on a single execution context.

use crate::error::Result;
use std::path::{Path, PathBuf};

pub mod fs;
pub mod memory;

pub trait StorageBackend {
    /// Replace the stored document with `serialized`.
    fn save(&self, serialized: &str) -> Result<()>;

    /// Read the stored document. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> Result<Option<String>>;

    /// Where the document lives, for display purposes.
    fn location(&self) -> String;
}

pub trait FileAccess {
    fn write_file(&self, path: &Path, content: &str) -> Result<()>;

    fn read_file(&self, path: &Path) -> Result<String>;

    /// Ask the host for a destination. `None` means the user cancelled.
    fn pick_save_path(&self, suggested_name: &str) -> Option<PathBuf>;

    /// Ask the host for a file to open. `None` means the user cancelled.
    fn pick_open_path(&self) -> Option<PathBuf>;
}
