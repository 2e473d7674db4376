use quire::api::QuireApi;
use quire::codec::ExportFormat;
use quire::model::Theme;
use quire::persistence::LoadSource;
use quire::session::EditorSession;
use quire::store::fs::{FsBackend, FsFileAccess};
use quire::surface::BufferSurface;
use std::path::Path;
use std::time::Duration;
use tokio::task::LocalSet;

type FsApi = QuireApi<FsBackend, FsFileAccess, BufferSurface>;

fn open(home: &Path) -> FsApi {
    QuireApi::open(
        FsBackend::new(home.to_path_buf()),
        FsFileAccess::new(),
        BufferSurface::new(),
    )
}

#[test]
fn test_state_survives_reopen() {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut api = open(temp_dir.path());
    assert_eq!(api.load_source(), &LoadSource::FirstRun);
    api.create_page("Groceries", "🛒").unwrap();
    api.surface_mut().edit("Groceries", "<ul><li>eggs</li></ul>");
    api.set_theme(Theme::Dark).unwrap();
    assert!(api.save().success);
    let saved = api.store().collection().clone();
    drop(api);

    let reopened = open(temp_dir.path());
    assert_eq!(reopened.load_source(), &LoadSource::Stored);
    assert_eq!(reopened.store().collection(), &saved);
    assert_eq!(reopened.store().active_page().title, "Groceries");
    assert_eq!(
        reopened.surface().shown.as_ref().unwrap().content,
        "<ul><li>eggs</li></ul>"
    );
}

#[test]
fn test_corrupt_store_recovers_with_default_page() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("quire.json"), "{ not json").unwrap();

    let api = open(temp_dir.path());
    assert!(matches!(api.load_source(), LoadSource::Recovered(_)));
    assert_eq!(api.store().pages().len(), 1);
    assert_eq!(api.store().active_page().title, "Welcome");
}

#[test]
fn test_legacy_document_is_normalized_on_load() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        temp_dir.path().join("quire.json"),
        r#"{"pages": [{"title": "Old", "content": "<p>kept</p>", "createdAt": 1700000000000}]}"#,
    )
    .unwrap();

    let api = open(temp_dir.path());
    let doc = api.store().collection();
    assert_eq!(doc.version, "1.0");
    assert_eq!(doc.theme, Theme::Light);
    assert_eq!(doc.pages.len(), 1);
    assert!(!doc.pages[0].id.is_empty());
    assert_eq!(doc.current_page_id, doc.pages[0].id);
    assert_eq!(doc.pages[0].created_at.timestamp_millis(), 1_700_000_000_000);
}

#[test]
fn test_export_then_import_into_fresh_home() {
    let source = tempfile::tempdir().unwrap();
    let target = tempfile::tempdir().unwrap();
    let export_path = source.path().join("pages.json");

    let mut api = open(source.path());
    api.create_page("Travel", "✈️").unwrap();
    api.write_content("<p>Lisbon in May</p>".to_string()).unwrap();
    let result = api
        .export(ExportFormat::Json, Some(export_path.clone()))
        .unwrap();
    assert!(!result.has_errors());

    let mut fresh = open(target.path());
    fresh.import(Some(export_path), |preview| {
        assert_eq!(preview.incoming_pages, 2);
        assert_eq!(preview.current_pages, 1);
        true
    })
    .unwrap();

    assert_eq!(fresh.store().collection(), api.store().collection());
    let stored = std::fs::read_to_string(target.path().join("quire.json")).unwrap();
    assert!(stored.contains("Lisbon in May"));
}

#[tokio::test(start_paused = true)]
async fn test_autosave_writes_surface_to_disk() {
    let temp_dir = tempfile::tempdir().unwrap();
    let data_file = temp_dir.path().join("quire.json");

    LocalSet::new()
        .run_until(async {
            let mut session = EditorSession::new(open(temp_dir.path()), Some(Duration::from_secs(30)));
            session.start();
            session
                .handle()
                .borrow_mut()
                .surface_mut()
                .edit("Welcome", "<p>drafted</p>");
            assert!(!data_file.exists());

            tokio::time::sleep(Duration::from_secs(31)).await;
            let stored = std::fs::read_to_string(&data_file).unwrap();
            assert!(stored.contains("<p>drafted</p>"));

            session
                .handle()
                .borrow_mut()
                .surface_mut()
                .edit("Welcome", "<p>final</p>");
            assert!(session.shutdown().success);
        })
        .await;

    let stored = std::fs::read_to_string(&data_file).unwrap();
    assert!(stored.contains("<p>final</p>"));
}
