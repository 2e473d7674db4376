//! The seam between the core and whatever renders pages.
//!
//! The core never looks inside page content. A UI hands back the title and
//! content it currently displays through [`EditorSurface::capture`], and the
//! core asks it to show a page through [`EditorSurface::present`]. Formatting
//! and block insertion are forwarded untouched.

use crate::model::Page;

/// Title and content as currently shown by the editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub title: String,
    pub content: String,
}

impl Captured {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

pub trait EditorSurface {
    /// What the user is looking at right now, or `None` if nothing is loaded.
    fn capture(&self) -> Option<Captured>;

    /// Load a page into the surface.
    fn present(&mut self, page: &Page);

    fn apply_format(&mut self, _command: &str) {}

    fn insert_block(&mut self, _kind: &str) {}
}

/// A surface with nothing attached. Captures nothing, shows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedSurface;

impl EditorSurface for DetachedSurface {
    fn capture(&self) -> Option<Captured> {
        None
    }

    fn present(&mut self, _page: &Page) {}
}

/// A surface that keeps the presented page in memory and records forwarded
/// commands. Used by headless hosts and tests.
#[derive(Debug, Default, Clone)]
pub struct BufferSurface {
    pub shown: Option<Captured>,
    pub commands: Vec<String>,
}

impl BufferSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the user typing into the surface.
    pub fn edit(&mut self, title: &str, content: &str) {
        self.shown = Some(Captured::new(title, content));
    }
}

impl EditorSurface for BufferSurface {
    fn capture(&self) -> Option<Captured> {
        self.shown.clone()
    }

    fn present(&mut self, page: &Page) {
        self.shown = Some(Captured::new(page.title.clone(), page.content.clone()));
    }

    fn apply_format(&mut self, command: &str) {
        self.commands.push(format!("format:{}", command));
    }

    fn insert_block(&mut self, kind: &str) {
        self.commands.push(format!("block:{}", kind));
    }
}
