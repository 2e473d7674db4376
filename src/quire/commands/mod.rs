use crate::config::QuireConfig;
use crate::document::Stats;
use crate::model::{Page, Theme};
use std::path::PathBuf;

pub mod config;
pub mod export;
pub mod import;
pub mod pages;
pub mod search;
pub mod stats;
pub mod theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A page as shown in a listing: its 1-based position and whether it is active.
#[derive(Debug, Clone)]
pub struct ListedPage {
    pub index: usize,
    pub page: Page,
    pub active: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_pages: Vec<Page>,
    pub listed_pages: Vec<ListedPage>,
    pub stats: Option<Stats>,
    pub theme: Option<Theme>,
    pub output_path: Option<PathBuf>,
    pub config: Option<QuireConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_pages(mut self, pages: Vec<Page>) -> Self {
        self.affected_pages = pages;
        self
    }

    pub fn with_listed_pages(mut self, pages: Vec<ListedPage>) -> Self {
        self.listed_pages = pages;
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }

    pub fn with_config(mut self, config: QuireConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// True when any message was reported at error level.
    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
