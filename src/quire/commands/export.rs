use crate::codec::html::export_html;
use crate::codec::json::export_json;
use crate::codec::ExportFormat;
use crate::commands::{CmdMessage, CmdResult};
use crate::document::DocumentStore;
use crate::error::Result;
use crate::store::FileAccess;
use std::path::PathBuf;

/// Writes the whole collection to `path`, or to wherever the save dialog
/// points when no path is given. Write failures are reported as messages.
pub fn run<F: FileAccess>(
    store: &DocumentStore,
    files: &F,
    format: ExportFormat,
    path: Option<PathBuf>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let Some(path) = path.or_else(|| files.pick_save_path(&format.suggested_file_name())) else {
        result.add_message(CmdMessage::info("Export cancelled."));
        return Ok(result);
    };

    let rendered = match format {
        ExportFormat::Json => export_json(store.collection())?,
        ExportFormat::Html => export_html(store.collection()),
    };

    if let Err(e) = files.write_file(&path, &rendered) {
        tracing::warn!("export to {} failed: {}", path.display(), e);
        result.add_message(CmdMessage::error(format!(
            "Failed to export to {}: {}",
            path.display(),
            e
        )));
        return Ok(result);
    }

    tracing::info!(
        "exported {} page(s) as {} to {}",
        store.pages().len(),
        format,
        path.display()
    );
    result.add_message(CmdMessage::success(format!(
        "Exported {} page(s) to {}",
        store.pages().len(),
        path.display()
    )));
    Ok(result.with_output_path(path))
}
