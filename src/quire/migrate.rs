//! # Schema Migrator
//!
//! Turns whatever JSON was stored or imported into a canonical
//! [`DocumentCollection`]. `normalize` is total: it never fails, it fills
//! defaults instead. Structural validation of imports happens before this
//! stage (see [`crate::codec::json`]); payloads loaded from the storage backend
//! are trusted to be ours and only repaired here.
//!
//! Rules, in order:
//! 1. missing `version` (or legacy `schemaVersion`) becomes [`SCHEMA_VERSION`]
//! 2. missing or unknown `theme` becomes `light`
//! 3. every page is rebuilt field by field, defaulting `title`, `icon`,
//!    `content` and both timestamps
//!
//! Running `normalize` on its own serialized output changes nothing.

use crate::model::{
    icon_or_default, new_page_id, title_or_placeholder, DocumentCollection, Page, Theme,
    SCHEMA_VERSION,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn normalize(raw: &Value) -> DocumentCollection {
    let Some(obj) = raw.as_object() else {
        tracing::debug!("payload is not an object, seeding default collection");
        return DocumentCollection::seeded();
    };

    let version = obj
        .get("version")
        .or_else(|| obj.get("schemaVersion"))
        .and_then(Value::as_str)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(SCHEMA_VERSION)
        .to_string();

    let theme = obj
        .get("theme")
        .and_then(Value::as_str)
        .and_then(|t| t.parse::<Theme>().ok())
        .unwrap_or_default();

    let pages: Vec<Page> = obj
        .get("pages")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_object)
                .map(normalize_page)
                .collect()
        })
        .unwrap_or_default();

    if pages.is_empty() {
        tracing::debug!("payload has no pages, seeding default collection");
        let mut seeded = DocumentCollection::seeded();
        seeded.theme = theme;
        seeded.version = version;
        return seeded;
    }

    let current_page_id = obj
        .get("currentPageId")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut doc = DocumentCollection {
        pages,
        current_page_id,
        theme,
        version,
    };
    doc.ensure_current();
    doc
}

fn normalize_page(entry: &Map<String, Value>) -> Page {
    let id = match entry.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => new_page_id(),
    };

    let now = Utc::now();
    let created_at = entry.get("createdAt").and_then(parse_timestamp).unwrap_or(now);
    let updated_at = entry.get("updatedAt").and_then(parse_timestamp).unwrap_or(now);

    Page {
        id,
        title: title_or_placeholder(str_field(entry, "title")),
        icon: icon_or_default(str_field(entry, "icon")),
        content: str_field(entry, "content").to_string(),
        created_at,
        updated_at,
    }
}

fn str_field<'a>(entry: &'a Map<String, Value>, key: &str) -> &'a str {
    entry.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Accepts RFC 3339 strings, naive `YYYY-MM-DD HH:MM:SS` strings (read as UTC),
/// and epoch milliseconds as either a number or a numeric string.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    s.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis)
}
