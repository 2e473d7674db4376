//! # API Facade
//!
//! The single entry point UI callbacks talk to. A `QuireApi` is an explicit
//! value, constructed once and handed to whoever needs it; there is no global
//! state.
//!
//! Each operation:
//! 1. captures the editing surface into the active page when the operation
//!    could switch away from it or read its content
//! 2. dispatches to the command layer
//! 3. presents the (possibly new) active page back to the surface
//! 4. issues a persistence request if the store was changed
//!
//! Persistence requests and autosaves report through [`SaveReport`]; a failed
//! background save is logged and kept as [`QuireApi::last_save`], it never
//! turns into an error for the caller.

use crate::codec::ExportFormat;
use crate::commands;
use crate::document::DocumentStore;
use crate::error::Result;
use crate::model::Theme;
use crate::persistence::{LoadSource, PersistenceCoordinator, SaveReport};
use crate::store::{FileAccess, StorageBackend};
use crate::surface::EditorSurface;
use std::path::PathBuf;

pub struct QuireApi<B: StorageBackend, F: FileAccess, S: EditorSurface> {
    store: DocumentStore,
    persistence: PersistenceCoordinator<B>,
    files: F,
    surface: S,
    load_source: LoadSource,
    last_save: Option<SaveReport>,
}

impl<B: StorageBackend, F: FileAccess, S: EditorSurface> QuireApi<B, F, S> {
    /// Loads the stored collection (or seeds one) and shows the active page.
    pub fn open(backend: B, files: F, surface: S) -> Self {
        let persistence = PersistenceCoordinator::new(backend);
        let loaded = persistence.load_on_startup();
        let mut api = Self {
            store: DocumentStore::new(loaded.collection),
            persistence,
            files,
            surface,
            load_source: loaded.source,
            last_save: None,
        };
        api.present_active();
        api
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn persistence(&self) -> &PersistenceCoordinator<B> {
        &self.persistence
    }

    pub fn files(&self) -> &F {
        &self.files
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn load_source(&self) -> &LoadSource {
        &self.load_source
    }

    pub fn last_save(&self) -> Option<&SaveReport> {
        self.last_save.as_ref()
    }

    fn capture(&mut self) {
        if let Some(captured) = self.surface.capture() {
            self.store.capture(captured);
        }
    }

    fn present_active(&mut self) {
        self.surface.present(self.store.active_page());
    }

    fn persist_if_dirty(&mut self) {
        if self.store.is_dirty() {
            self.write_now();
        }
    }

    fn write_now(&mut self) -> SaveReport {
        let report = self.persistence.save(self.store.collection());
        if report.success {
            self.store.mark_clean();
        }
        self.last_save = Some(report.clone());
        report
    }

    /// Capture, then write the collection regardless of the dirty flag.
    pub fn save(&mut self) -> SaveReport {
        self.capture();
        self.write_now()
    }

    /// The autosave tick. Same as [`save`](Self::save); kept separate so the
    /// log shows which path wrote.
    pub fn autosave(&mut self) -> SaveReport {
        tracing::debug!("autosave tick");
        self.save()
    }

    pub fn create_page(&mut self, title: &str, icon: &str) -> Result<commands::CmdResult> {
        self.capture();
        let result = commands::pages::create(&mut self.store, title, icon)?;
        self.present_active();
        self.persist_if_dirty();
        Ok(result)
    }

    pub fn select_page(&mut self, index: usize) -> Result<commands::CmdResult> {
        self.capture();
        let result = commands::pages::select(&mut self.store, index)?;
        if !result.affected_pages.is_empty() {
            self.present_active();
        }
        self.persist_if_dirty();
        Ok(result)
    }

    pub fn update_title(&mut self, title: &str) -> Result<commands::CmdResult> {
        self.capture();
        let result = commands::pages::rename(&mut self.store, title)?;
        self.present_active();
        self.persist_if_dirty();
        Ok(result)
    }

    /// Replaces the active page's content, as if typed into the surface.
    pub fn write_content(&mut self, content: String) -> Result<commands::CmdResult> {
        self.capture();
        let result = commands::pages::write(&mut self.store, content)?;
        self.present_active();
        self.persist_if_dirty();
        Ok(result)
    }

    pub fn delete_page(&mut self) -> Result<commands::CmdResult> {
        let result = commands::pages::delete(&mut self.store)?;
        self.present_active();
        self.persist_if_dirty();
        Ok(result)
    }

    pub fn duplicate_page(&mut self) -> Result<commands::CmdResult> {
        self.capture();
        let result = commands::pages::duplicate(&mut self.store)?;
        self.present_active();
        self.persist_if_dirty();
        Ok(result)
    }

    pub fn list_pages(&self) -> Result<commands::CmdResult> {
        commands::pages::list(&self.store)
    }

    pub fn search(&mut self, query: &str) -> Result<commands::CmdResult> {
        self.capture();
        commands::search::run(&self.store, query)
    }

    pub fn stats(&mut self) -> Result<commands::CmdResult> {
        self.capture();
        commands::stats::run(&self.store)
    }

    pub fn toggle_theme(&mut self) -> Result<commands::CmdResult> {
        let result = commands::theme::toggle(&mut self.store)?;
        self.persist_if_dirty();
        Ok(result)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<commands::CmdResult> {
        let result = commands::theme::set(&mut self.store, theme)?;
        self.persist_if_dirty();
        Ok(result)
    }

    /// Forwarded to the surface untouched.
    pub fn format(&mut self, command: &str) {
        self.surface.apply_format(command);
    }

    /// Forwarded to the surface untouched.
    pub fn insert_block(&mut self, kind: &str) {
        self.surface.insert_block(kind);
    }

    pub fn export(
        &mut self,
        format: ExportFormat,
        path: Option<PathBuf>,
    ) -> Result<commands::CmdResult> {
        self.capture();
        commands::export::run(&self.store, &self.files, format, path)
    }

    pub fn import<C>(&mut self, path: Option<PathBuf>, confirm: C) -> Result<commands::CmdResult>
    where
        C: FnOnce(&ImportPreview) -> bool,
    {
        self.capture();
        let result = commands::import::run(&mut self.store, &self.files, path, confirm)?;
        // Only a completed import replaces what the surface shows.
        if !result.affected_pages.is_empty() {
            self.present_active();
        }
        self.persist_if_dirty();
        Ok(result)
    }

    pub fn config(
        &self,
        config_dir: &std::path::Path,
        action: ConfigAction,
    ) -> Result<commands::CmdResult> {
        commands::config::run(config_dir, action)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::import::ImportPreview;
pub use crate::commands::{CmdMessage, CmdResult, ListedPage, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuireError;
    use crate::store::memory::{MemBackend, MemFileAccess};
    use crate::surface::BufferSurface;

    type TestApi = QuireApi<MemBackend, MemFileAccess, BufferSurface>;

    fn fresh() -> TestApi {
        QuireApi::open(MemBackend::new(), MemFileAccess::new(), BufferSurface::new())
    }

    #[test]
    fn open_presents_welcome_page() {
        let api = fresh();
        assert_eq!(api.load_source(), &LoadSource::FirstRun);
        assert_eq!(api.surface().shown.as_ref().unwrap().title, "Welcome");
    }

    #[test]
    fn create_page_scenario() {
        let mut api = fresh();
        let result = api.create_page("Notes", "📝").unwrap();
        let new_id = result.affected_pages[0].id.clone();

        assert_eq!(api.store().pages().len(), 2);
        assert_eq!(api.store().active_page().id, new_id);
        assert_eq!(api.store().collection().current_page_id, new_id);
        assert_eq!(api.persistence().backend().writes(), 1);
        assert!(api.last_save().unwrap().success);
    }

    #[test]
    fn switching_pages_captures_surface_edits() {
        let mut api = fresh();
        api.create_page("Notes", "").unwrap();
        api.surface_mut().edit("Notes", "<p>typed</p>");

        api.select_page(0).unwrap();
        assert_eq!(api.store().pages()[1].content, "<p>typed</p>");
        assert_eq!(api.surface().shown.as_ref().unwrap().title, "Welcome");
    }

    #[test]
    fn invalid_selection_is_ignored() {
        let mut api = fresh();
        let writes = api.persistence().backend().writes();
        let result = api.select_page(42).unwrap();
        assert!(result.affected_pages.is_empty());
        assert_eq!(api.persistence().backend().writes(), writes);
    }

    #[test]
    fn delete_last_page_is_refused_and_nothing_written() {
        let mut api = fresh();
        assert!(matches!(
            api.delete_page(),
            Err(QuireError::CannotDeleteLastPage)
        ));
        assert_eq!(api.persistence().backend().writes(), 0);
    }

    #[test]
    fn duplicate_scenario() {
        let mut api = fresh();
        api.create_page("Notes", "").unwrap();
        api.surface_mut().edit("Notes", "<p>same</p>");
        let original = api.store().active_page().id.clone();

        let copy = api.duplicate_page().unwrap().affected_pages[0].clone();
        assert_eq!(copy.title, "Notes (Copy)");
        assert_eq!(copy.content, "<p>same</p>");
        assert_ne!(copy.id, original);
    }

    #[test]
    fn failed_background_save_keeps_memory_state() {
        let mut api = fresh();
        api.persistence().backend().set_simulate_write_error(true);

        let result = api.create_page("Kept", "").unwrap();
        assert!(!result.has_errors());
        assert_eq!(api.store().active_page().title, "Kept");
        assert!(!api.last_save().unwrap().success);
        assert!(api.store().is_dirty());

        api.persistence().backend().set_simulate_write_error(false);
        assert!(api.save().success);
        assert!(!api.store().is_dirty());
    }

    fn draft_after_failed_save() -> TestApi {
        let mut api = fresh();
        api.persistence().backend().set_simulate_write_error(true);
        api.create_page("Draft", "").unwrap();
        assert!(api.store().is_dirty());
        api.surface_mut().edit("Draft", "<p>typed</p>");
        api
    }

    fn assert_typed_text_kept(api: &mut TestApi) {
        assert_eq!(
            api.surface().shown.as_ref().unwrap().content,
            "<p>typed</p>"
        );
        api.persistence().backend().set_simulate_write_error(false);
        assert!(api.save().success);
        assert_eq!(api.store().active_page().content, "<p>typed</p>");
    }

    #[test]
    fn cancelled_import_keeps_surface_edits() {
        let mut api = draft_after_failed_save();
        let result = api.import(None, |_| true).unwrap();
        assert_eq!(result.messages[0].content, "Import cancelled.");
        assert_typed_text_kept(&mut api);
    }

    #[test]
    fn declined_import_keeps_surface_edits() {
        let mut api = draft_after_failed_save();
        api.files().insert(
            "/in.json",
            r#"{"pages": [{"id": "x", "title": "From file", "content": ""}]}"#,
        );
        api.import(Some("/in.json".into()), |_| false).unwrap();
        assert_typed_text_kept(&mut api);
    }

    #[test]
    fn unsupported_or_rejected_import_keeps_surface_edits() {
        let mut api = draft_after_failed_save();
        api.files().insert("/notes.txt", "plain text");
        api.import(Some("/notes.txt".into()), |_| true).unwrap();
        assert_eq!(
            api.surface().shown.as_ref().unwrap().content,
            "<p>typed</p>"
        );

        api.files().insert("/bad.json", r#"{"pages": []}"#);
        assert!(matches!(
            api.import(Some("/bad.json".into()), |_| true),
            Err(QuireError::MalformedImport(_))
        ));
        assert_typed_text_kept(&mut api);
    }

    #[test]
    fn write_content_keeps_title_edited_in_surface() {
        let mut api = fresh();
        api.create_page("Draft", "").unwrap();
        api.surface_mut().edit("Renamed in editor", "<p>old</p>");

        api.write_content("<p>new</p>".to_string()).unwrap();
        let page = api.store().active_page();
        assert_eq!(page.title, "Renamed in editor");
        assert_eq!(page.content, "<p>new</p>");
        assert_eq!(
            api.surface().shown.as_ref().unwrap().title,
            "Renamed in editor"
        );
    }

    #[test]
    fn format_and_blocks_pass_through() {
        let mut api = fresh();
        api.format("bold");
        api.insert_block("todo");
        assert_eq!(api.surface().commands, vec!["format:bold", "block:todo"]);
    }

    #[test]
    fn import_replaces_and_presents() {
        let mut api = fresh();
        api.files().insert(
            "/in.json",
            r#"{"pages": [{"id": "x", "title": "From file", "content": "<p>x</p>"}]}"#,
        );
        api.import(Some("/in.json".into()), |_| true).unwrap();

        assert_eq!(api.store().pages().len(), 1);
        assert_eq!(api.surface().shown.as_ref().unwrap().title, "From file");
        assert_eq!(api.persistence().backend().writes(), 1);
    }

    #[test]
    fn export_includes_unsaved_surface_edits() {
        let mut api = fresh();
        api.surface_mut().edit("Welcome", "<p>fresh</p>");
        api.export(ExportFormat::Json, Some("/out.json".into()))
            .unwrap();
        assert!(api.files().get("/out.json").unwrap().contains("<p>fresh</p>"));
    }

    #[test]
    fn config_goes_through_the_facade() {
        let api = fresh();
        let dir = tempfile::tempdir().unwrap();
        api.config(
            dir.path(),
            ConfigAction::Set("autosave-secs".into(), "0".into()),
        )
        .unwrap();
        let result = api
            .config(dir.path(), ConfigAction::ShowKey("autosave-secs".into()))
            .unwrap();
        assert_eq!(result.messages[0].content, "0");
    }

    #[test]
    fn reopen_restores_saved_state() {
        let mut api = fresh();
        api.create_page("Persisted", "").unwrap();
        api.set_theme(Theme::Dark).unwrap();
        let stored = api.persistence().backend().stored().unwrap();

        let reopened: TestApi = QuireApi::open(
            MemBackend::with_document(&stored),
            MemFileAccess::new(),
            BufferSurface::new(),
        );
        assert_eq!(reopened.load_source(), &LoadSource::Stored);
        assert_eq!(reopened.store().collection(), api.store().collection());
    }
}
