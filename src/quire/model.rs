use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SCHEMA_VERSION: &str = "1.0";
pub const PLACEHOLDER_TITLE: &str = "Untitled";
pub const DEFAULT_ICON: &str = "📄";
pub const COPY_SUFFIX: &str = " (Copy)";

const WELCOME_TITLE: &str = "Welcome";
const WELCOME_ICON: &str = "👋";
const WELCOME_CONTENT: &str = "<h1>Welcome to Quire</h1>\
<p>Pages are saved automatically. Create a new page to get started.</p>\
<ul class=\"todo-list\"><li data-checked=\"false\">Write something</li></ul>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    pub fn new(title: &str, icon: &str, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: new_page_id(),
            title: title_or_placeholder(title),
            icon: icon_or_default(icon),
            content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// The aggregate root: every page plus the active pointer, theme and schema tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCollection {
    pub pages: Vec<Page>,
    pub current_page_id: String,
    pub theme: Theme,
    pub version: String,
}

impl DocumentCollection {
    /// The first-run collection: a single welcome page.
    pub fn seeded() -> Self {
        let page = Page::new(WELCOME_TITLE, WELCOME_ICON, WELCOME_CONTENT.to_string());
        Self {
            current_page_id: page.id.clone(),
            pages: vec![page],
            theme: Theme::default(),
            version: SCHEMA_VERSION.to_string(),
        }
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.id == id)
    }

    /// Points `current_page_id` at the first page when it does not resolve.
    /// Returns true if a correction was made.
    pub fn ensure_current(&mut self) -> bool {
        if self.position_of(&self.current_page_id).is_some() {
            return false;
        }
        match self.pages.first() {
            Some(first) => {
                self.current_page_id = first.id.clone();
                true
            }
            None => false,
        }
    }
}

pub fn new_page_id() -> String {
    Uuid::now_v7().to_string()
}

pub fn title_or_placeholder(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        PLACEHOLDER_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn icon_or_default(icon: &str) -> String {
    let trimmed = icon.trim();
    if trimmed.is_empty() {
        DEFAULT_ICON.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_collection_has_one_active_page() {
        let doc = DocumentCollection::seeded();
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.current_page_id, doc.pages[0].id);
        assert_eq!(doc.pages[0].title, "Welcome");
        assert_eq!(doc.theme, Theme::Light);
        assert_eq!(doc.version, SCHEMA_VERSION);
    }

    #[test]
    fn blank_title_and_icon_get_defaults() {
        let page = Page::new("   ", "", String::new());
        assert_eq!(page.title, PLACEHOLDER_TITLE);
        assert_eq!(page.icon, DEFAULT_ICON);
        assert_eq!(page.created_at, page.updated_at);
    }

    #[test]
    fn new_ids_are_distinct() {
        let a = Page::new("a", "", String::new());
        let b = Page::new("b", "", String::new());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn ensure_current_falls_back_to_first_page() {
        let mut doc = DocumentCollection::seeded();
        doc.current_page_id = "missing".into();
        assert!(doc.ensure_current());
        assert_eq!(doc.current_page_id, doc.pages[0].id);
        assert!(!doc.ensure_current());
    }

    #[test]
    fn theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
