use super::{FileAccess, StorageBackend};
use crate::error::{QuireError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// In-memory storage backend for testing. Does NOT persist data.
#[derive(Default)]
pub struct MemBackend {
    document: RefCell<Option<String>>,
    writes: Cell<usize>,
    simulate_read_error: Cell<bool>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(serialized: &str) -> Self {
        let backend = Self::new();
        *backend.document.borrow_mut() = Some(serialized.to_string());
        backend
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn stored(&self) -> Option<String> {
        self.document.borrow().clone()
    }
}

impl StorageBackend for MemBackend {
    fn save(&self, serialized: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(QuireError::StorageUnavailable(
                "Simulated write error".to_string(),
            ));
        }
        *self.document.borrow_mut() = Some(serialized.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn load(&self) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(QuireError::StorageUnavailable(
                "Simulated read error".to_string(),
            ));
        }
        Ok(self.document.borrow().clone())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// In-memory files plus scripted dialog answers.
#[derive(Default)]
pub struct MemFileAccess {
    files: RefCell<HashMap<PathBuf, String>>,
    save_answer: RefCell<Option<PathBuf>>,
    open_answer: RefCell<Option<PathBuf>>,
    simulate_write_error: Cell<bool>,
}

impl MemFileAccess {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, content: &str) {
        self.files
            .borrow_mut()
            .insert(path.into(), content.to_string());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// The path the next save dialog "chooses". `None` simulates cancel.
    pub fn answer_save_dialog(&self, path: Option<PathBuf>) {
        *self.save_answer.borrow_mut() = path;
    }

    /// The path the next open dialog "chooses". `None` simulates cancel.
    pub fn answer_open_dialog(&self, path: Option<PathBuf>) {
        *self.open_answer.borrow_mut() = path;
    }

    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }
}

impl FileAccess for MemFileAccess {
    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(QuireError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "Simulated write error",
            )));
        }
        self.insert(path, content);
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        self.get(path).ok_or_else(|| {
            QuireError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("No such file: {}", path.display()),
            ))
        })
    }

    fn pick_save_path(&self, _suggested_name: &str) -> Option<PathBuf> {
        self.save_answer.borrow().clone()
    }

    fn pick_open_path(&self) -> Option<PathBuf> {
        self.open_answer.borrow().clone()
    }
}
