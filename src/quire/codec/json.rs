//! JSON export and the validating import parse.
//!
//! Imported text starts life as an [`UnknownPayload`]. It only becomes a
//! [`DocumentCollection`] after [`UnknownPayload::validate`] accepts it and the
//! migrator has filled in defaults. Validation is all-or-nothing: one bad page
//! rejects the whole payload.

use crate::error::{QuireError, Result};
use crate::migrate;
use crate::model::DocumentCollection;
use serde_json::Value;
use std::collections::HashSet;

pub fn export_json(doc: &DocumentCollection) -> Result<String> {
    serde_json::to_string_pretty(doc).map_err(QuireError::Serialization)
}

/// Parsed but untrusted JSON.
#[derive(Debug, Clone)]
pub struct UnknownPayload(Value);

/// A payload that passed structural validation.
#[derive(Debug, Clone)]
pub struct ValidatedPayload(Value);

impl UnknownPayload {
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map(UnknownPayload)
            .map_err(|e| QuireError::MalformedImport(format!("not valid JSON: {}", e)))
    }

    pub fn validate(self) -> Result<ValidatedPayload> {
        let obj = match &self.0 {
            Value::Object(obj) if !obj.is_empty() => obj,
            _ => return Err(malformed("payload must be a non-empty object")),
        };

        let pages = match obj.get("pages") {
            Some(Value::Array(pages)) if !pages.is_empty() => pages,
            _ => return Err(malformed("`pages` must be a non-empty list")),
        };

        let mut seen = HashSet::new();
        for (i, page) in pages.iter().enumerate() {
            let Some(page) = page.as_object() else {
                return Err(malformed(format!("page {} is not an object", i + 1)));
            };

            let id = match page.get("id") {
                Some(Value::String(id)) if !id.trim().is_empty() => id,
                _ => return Err(malformed(format!("page {} has no id", i + 1))),
            };
            if !seen.insert(id.as_str()) {
                return Err(malformed(format!("duplicate page id `{}`", id)));
            }

            // A missing or blank title is filled in by the migrator.
            match page.get("title") {
                None | Some(Value::Null) | Some(Value::String(_)) => {}
                Some(_) => return Err(malformed(format!("page {} title is not text", i + 1))),
            }

            if !matches!(page.get("content"), Some(Value::String(_))) {
                return Err(malformed(format!("page {} content is not text", i + 1)));
            }
        }

        Ok(ValidatedPayload(self.0))
    }
}

impl ValidatedPayload {
    pub fn page_count(&self) -> usize {
        self.0
            .get("pages")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or_default()
    }

    pub fn into_collection(self) -> DocumentCollection {
        migrate::normalize(&self.0)
    }
}

/// Parse, validate and migrate in one go.
pub fn import_json(text: &str) -> Result<DocumentCollection> {
    Ok(UnknownPayload::parse(text)?.validate()?.into_collection())
}

fn malformed(reason: impl Into<String>) -> QuireError {
    QuireError::MalformedImport(reason.into())
}
