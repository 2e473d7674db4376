//! # Import/Export Codec
//!
//! - [`json`]: canonical pretty JSON out, and the validating parse path in
//! - [`html`]: a static, self-contained rendering for reading and printing
//!
//! Only JSON is importable. HTML exports are one-way artifacts.

use crate::error::QuireError;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub mod html;
pub mod json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Html,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
        }
    }

    pub fn suggested_file_name(self) -> String {
        format!("quire-export.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = QuireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "html" | "htm" => Ok(ExportFormat::Html),
            other => Err(QuireError::Config(format!("Unknown export format: {}", other))),
        }
    }
}

/// Lower-cased extension of `path` without the dot, or empty.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}

pub fn is_importable(extension: &str) -> bool {
    extension.trim_start_matches('.').eq_ignore_ascii_case("json")
}
