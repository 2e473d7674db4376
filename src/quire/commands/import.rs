use crate::codec::json::UnknownPayload;
use crate::codec::{extension_of, is_importable};
use crate::commands::{CmdMessage, CmdResult};
use crate::document::DocumentStore;
use crate::error::Result;
use crate::store::FileAccess;
use std::path::{Path, PathBuf};

/// What the user is asked to confirm before an import replaces everything.
#[derive(Debug, Clone)]
pub struct ImportPreview {
    pub path: PathBuf,
    pub incoming_pages: usize,
    pub current_pages: usize,
}

/// Replaces the whole collection with a JSON file.
///
/// The file is validated before `confirm` is asked. Any validation failure
/// returns `MalformedImport` with the store untouched. Unsupported extensions,
/// unreadable files, a cancelled dialog and a declined confirmation are all
/// no-ops reported through messages.
pub fn run<F, C>(
    store: &mut DocumentStore,
    files: &F,
    path: Option<PathBuf>,
    confirm: C,
) -> Result<CmdResult>
where
    F: FileAccess,
    C: FnOnce(&ImportPreview) -> bool,
{
    let mut result = CmdResult::default();

    let Some(path) = path.or_else(|| files.pick_open_path()) else {
        result.add_message(CmdMessage::info("Import cancelled."));
        return Ok(result);
    };

    let content = match files.read_file(&path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("failed to read {}: {}", path.display(), e);
            result.add_message(CmdMessage::error(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )));
            return Ok(result);
        }
    };

    import_content(store, &path, &content, &extension_of(&path), confirm)
}

/// The structured import step once the file has been read.
pub fn import_content<C>(
    store: &mut DocumentStore,
    path: &Path,
    content: &str,
    extension: &str,
    confirm: C,
) -> Result<CmdResult>
where
    C: FnOnce(&ImportPreview) -> bool,
{
    let mut result = CmdResult::default();

    if !is_importable(extension) {
        result.add_message(CmdMessage::warning(format!(
            "Only .json files can be imported: {}",
            path.display()
        )));
        return Ok(result);
    }

    let payload = UnknownPayload::parse(content)
        .and_then(UnknownPayload::validate)
        .map_err(|e| {
            tracing::warn!("rejected import from {}: {}", path.display(), e);
            e
        })?;

    let preview = ImportPreview {
        path: path.to_path_buf(),
        incoming_pages: payload.page_count(),
        current_pages: store.pages().len(),
    };
    if !confirm(&preview) {
        result.add_message(CmdMessage::info("Import cancelled."));
        return Ok(result);
    }

    store.replace(payload.into_collection());
    tracing::info!(
        "imported {} page(s) from {}",
        store.pages().len(),
        path.display()
    );
    result.add_message(CmdMessage::success(format!(
        "Imported {} page(s) from {}",
        store.pages().len(),
        path.display()
    )));
    Ok(result.with_affected_pages(store.pages().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuireError;
    use crate::model::PLACEHOLDER_TITLE;
    use crate::store::memory::MemFileAccess;

    const VALID: &str = r#"{
        "pages": [
            {"id": "p1", "title": "Imported", "content": "<p>hi</p>"},
            {"id": "p2", "content": ""}
        ],
        "currentPageId": "p2",
        "theme": "dark"
    }"#;

    fn always(_: &ImportPreview) -> bool {
        true
    }

    #[test]
    fn valid_import_replaces_collection() {
        let mut store = DocumentStore::default();
        let files = MemFileAccess::new();
        files.insert("/in.json", VALID);

        let result = run(&mut store, &files, Some("/in.json".into()), always).unwrap();

        assert_eq!(result.affected_pages.len(), 2);
        assert_eq!(store.pages().len(), 2);
        assert_eq!(store.active_page().id, "p2");
        assert_eq!(store.pages()[1].title, PLACEHOLDER_TITLE);
        assert!(store.is_dirty());
    }

    #[test]
    fn empty_pages_rejected_without_mutation() {
        let mut store = DocumentStore::default();
        let before = store.collection().clone();
        let files = MemFileAccess::new();
        files.insert("/empty.json", r#"{"pages": []}"#);

        let err = run(&mut store, &files, Some("/empty.json".into()), always).unwrap_err();
        assert!(matches!(err, QuireError::MalformedImport(_)));
        assert_eq!(store.collection(), &before);
    }

    #[test]
    fn null_pages_rejected_without_mutation() {
        let mut store = DocumentStore::default();
        let before = store.collection().clone();
        let err = import_content(
            &mut store,
            Path::new("/n.json"),
            r#"{"pages": null}"#,
            "json",
            always,
        )
        .unwrap_err();
        assert!(matches!(err, QuireError::MalformedImport(_)));
        assert_eq!(store.collection(), &before);
    }

    #[test]
    fn non_json_extension_is_a_no_op() {
        let mut store = DocumentStore::default();
        let before = store.collection().clone();
        let result =
            import_content(&mut store, Path::new("/page.html"), VALID, "html", always).unwrap();
        assert_eq!(result.messages[0].level, crate::commands::MessageLevel::Warning);
        assert_eq!(store.collection(), &before);
    }

    #[test]
    fn declined_confirmation_keeps_state() {
        let mut store = DocumentStore::default();
        let before = store.collection().clone();
        let mut seen = None;
        let result = import_content(&mut store, Path::new("/in.json"), VALID, "json", |p| {
            seen = Some((p.incoming_pages, p.current_pages));
            false
        })
        .unwrap();

        assert_eq!(seen, Some((2, 1)));
        assert_eq!(result.messages[0].content, "Import cancelled.");
        assert_eq!(store.collection(), &before);
    }

    #[test]
    fn unreadable_file_is_reported() {
        let mut store = DocumentStore::default();
        let files = MemFileAccess::new();
        let result = run(&mut store, &files, Some("/missing.json".into()), always).unwrap();
        assert!(result.has_errors());
    }

    #[test]
    fn cancelled_open_dialog_is_a_no_op() {
        let mut store = DocumentStore::default();
        let files = MemFileAccess::new();
        let result = run(&mut store, &files, None, always).unwrap();
        assert_eq!(result.messages[0].content, "Import cancelled.");
    }
}
