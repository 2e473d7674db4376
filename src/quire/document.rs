//! # Document Store
//!
//! Sole owner of the live [`DocumentCollection`]. All mutators run
//! synchronously and keep two invariants:
//!
//! - `pages` is never empty; the last page cannot be deleted
//! - `current_page_id` always names a member of `pages`
//!
//! Mutations do not write anything. They set a dirty flag that the API layer
//! reads to issue a persistence request after the call returns.

use crate::error::{QuireError, Result};
use crate::model::{title_or_placeholder, DocumentCollection, Page, Theme, COPY_SUFFIX};
use crate::surface::Captured;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid markup regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub page_count: usize,
    pub total_words: usize,
    pub total_characters: usize,
}

#[derive(Debug)]
pub struct DocumentStore {
    doc: DocumentCollection,
    dirty: bool,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(DocumentCollection::seeded())
    }
}

impl DocumentStore {
    pub fn new(mut doc: DocumentCollection) -> Self {
        if doc.pages.is_empty() {
            doc = DocumentCollection::seeded();
        }
        doc.ensure_current();
        Self { doc, dirty: false }
    }

    pub fn collection(&self) -> &DocumentCollection {
        &self.doc
    }

    pub fn pages(&self) -> &[Page] {
        &self.doc.pages
    }

    pub fn theme(&self) -> Theme {
        self.doc.theme
    }

    pub fn active_index(&self) -> usize {
        self.doc.position_of(&self.doc.current_page_id).unwrap_or(0)
    }

    pub fn active_page(&self) -> &Page {
        &self.doc.pages[self.active_index()]
    }

    fn active_page_mut(&mut self) -> &mut Page {
        let idx = self.active_index();
        &mut self.doc.pages[idx]
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn request_save(&mut self) {
        self.dirty = true;
    }

    /// Swaps in a whole new collection. Used by import; nothing is merged.
    pub fn replace(&mut self, doc: DocumentCollection) {
        *self = Self::new(doc);
        self.request_save();
    }

    pub fn create_page(&mut self, title: &str, icon: &str) -> &Page {
        let page = Page::new(title, icon, String::new());
        self.push_active(page)
    }

    fn push_active(&mut self, page: Page) -> &Page {
        self.doc.current_page_id = page.id.clone();
        self.doc.pages.push(page);
        self.request_save();
        let last = self.doc.pages.len() - 1;
        &self.doc.pages[last]
    }

    /// Writes what the editing surface shows back into the active page.
    /// `updated_at` only moves when the title or content actually changed.
    pub fn capture(&mut self, captured: Captured) -> bool {
        let title = title_or_placeholder(&captured.title);
        let page = self.active_page_mut();
        if page.title == title && page.content == captured.content {
            return false;
        }
        page.title = title;
        page.content = captured.content;
        page.touch();
        self.request_save();
        true
    }

    pub fn select_page(&mut self, index: usize) -> Result<&Page> {
        let page = self
            .doc
            .pages
            .get(index)
            .ok_or(QuireError::InvalidSelection(index))?;
        if page.id != self.doc.current_page_id {
            self.doc.current_page_id = page.id.clone();
            self.request_save();
        }
        Ok(&self.doc.pages[index])
    }

    pub fn update_active_title(&mut self, title: &str) -> &Page {
        let page = self.active_page_mut();
        page.title = title_or_placeholder(title);
        page.touch();
        self.request_save();
        self.active_page()
    }

    pub fn update_active_content(&mut self, content: String) -> &Page {
        let page = self.active_page_mut();
        page.content = content;
        page.touch();
        self.request_save();
        self.active_page()
    }

    /// Removes the active page and activates its successor, or its predecessor
    /// when the removed page was last. Refused when only one page is left.
    pub fn delete_active_page(&mut self) -> Result<Page> {
        if self.doc.pages.len() <= 1 {
            return Err(QuireError::CannotDeleteLastPage);
        }
        let idx = self.active_index();
        let removed = self.doc.pages.remove(idx);
        let next = idx.min(self.doc.pages.len() - 1);
        self.doc.current_page_id = self.doc.pages[next].id.clone();
        self.request_save();
        Ok(removed)
    }

    pub fn duplicate_active_page(&mut self) -> &Page {
        let source = self.active_page();
        let title = format!("{}{}", source.title, COPY_SUFFIX);
        let copy = Page::new(&title, &source.icon, source.content.clone());
        self.push_active(copy)
    }

    /// Case-insensitive substring filter over title and raw content. A blank
    /// query returns every page. Matches keep collection order and carry their
    /// position in it.
    pub fn search_pages(&self, query: &str) -> Vec<(usize, &Page)> {
        let needle = query.trim().to_lowercase();
        self.doc
            .pages
            .iter()
            .enumerate()
            .filter(|(_, page)| {
                needle.is_empty()
                    || page.title.to_lowercase().contains(&needle)
                    || page.content.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.doc.theme = self.doc.theme.toggled();
        self.request_save();
        self.doc.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.doc.theme = theme;
        self.request_save();
    }

    pub fn compute_stats(&self) -> Stats {
        self.doc.pages.iter().fold(
            Stats {
                page_count: self.doc.pages.len(),
                ..Stats::default()
            },
            |mut acc, page| {
                acc.total_words += MARKUP_TAG
                    .replace_all(&page.content, " ")
                    .split_whitespace()
                    .count();
                acc.total_characters += MARKUP_TAG.replace_all(&page.content, "").chars().count();
                acc
            },
        )
    }
}
