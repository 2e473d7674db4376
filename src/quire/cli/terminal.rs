use console::Term;
use quire::api::ImportPreview;
use quire::error::Result;
use quire::store::fs::FsFileAccess;
use quire::store::FileAccess;
use std::path::{Path, PathBuf};

/// Filesystem access whose "dialogs" are line prompts on stderr. When stderr
/// is not a terminal every dialog is treated as cancelled.
pub(super) struct TerminalFileAccess {
    inner: FsFileAccess,
    term: Term,
}

impl TerminalFileAccess {
    pub(super) fn new() -> Self {
        Self {
            inner: FsFileAccess::new(),
            term: Term::stderr(),
        }
    }

    fn prompt(&self, question: &str) -> Option<String> {
        if !self.term.is_term() {
            return None;
        }
        self.term.write_str(question).ok()?;
        self.term.read_line().ok().map(|s| s.trim().to_string())
    }
}

impl FileAccess for TerminalFileAccess {
    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        self.inner.write_file(path, content)
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        self.inner.read_file(path)
    }

    fn pick_save_path(&self, suggested_name: &str) -> Option<PathBuf> {
        let answer = self.prompt(&format!("Save to [{}]: ", suggested_name))?;
        if answer.is_empty() {
            Some(PathBuf::from(suggested_name))
        } else {
            Some(PathBuf::from(answer))
        }
    }

    fn pick_open_path(&self) -> Option<PathBuf> {
        let answer = self.prompt("Open file: ")?;
        (!answer.is_empty()).then(|| PathBuf::from(answer))
    }
}

/// Asks before an import replaces everything. Declines when not interactive.
pub(super) fn confirm_import(preview: &ImportPreview) -> bool {
    let term = Term::stderr();
    if !term.is_term() {
        return false;
    }
    let question = format!(
        "Replace {} current page(s) with {} page(s) from {}? [y/N] ",
        preview.current_pages,
        preview.incoming_pages,
        preview.path.display()
    );
    if term.write_str(&question).is_err() {
        return false;
    }
    matches!(
        term.read_line().map(|s| s.trim().to_ascii_lowercase()).as_deref(),
        Ok("y") | Ok("yes")
    )
}
