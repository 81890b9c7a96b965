//! End-to-end browse scenarios against a real temporary vault.
//!
//! These drive the engine exactly the way the binary does: intent, then
//! pump `process_op_events` until the busy period settles, then assert on
//! the page and view state.

use std::fs;
use std::time::Duration;

use slurp_engine::{App, PreviewBody, Row, SlurpConfig, Vault};
use slurp_types::FileKind;

fn vault_fixture() -> (tempfile::TempDir, App) {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("photos/raw")).unwrap();
    fs::create_dir(dir.path().join("music")).unwrap();
    fs::write(dir.path().join("readme.md"), "# drop folder\nput files here\n").unwrap();
    fs::write(dir.path().join("photos/cat.png"), [137u8, 80, 78, 71]).unwrap();
    fs::write(dir.path().join("photos/notes.txt"), "shot list\n").unwrap();
    fs::write(dir.path().join("music/track.mp3"), [0u8; 64]).unwrap();
    let vault = Vault::open(dir.path()).unwrap();
    let app = App::new(vault, &SlurpConfig::default());
    (dir, app)
}

async fn settle(app: &mut App) {
    for _ in 0..500 {
        app.process_op_events();
        if !app.is_busy() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("operation never settled");
}

fn select_named(app: &mut App, name: &str) {
    app.select_top();
    let position = app
        .page()
        .rows()
        .iter()
        .position(|row| matches!(row, Row::Entry(e) if e.name == name))
        .unwrap_or_else(|| panic!("no row named {name}"));
    for _ in 0..position {
        app.select_down();
    }
}

fn kind_of(app: &App, name: &str) -> FileKind {
    app.page()
        .rows()
        .iter()
        .find_map(|row| match row {
            Row::Entry(e) if e.name == name => Some(e.kind),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no row named {name}"))
}

fn row_names(app: &App) -> Vec<String> {
    app.page()
        .rows()
        .iter()
        .map(|row| match row {
            Row::Parent(_) => "..".to_string(),
            Row::Entry(e) => e.name.clone(),
        })
        .collect()
}

#[tokio::test]
async fn listing_navigate_and_back_round_trip() {
    let (_dir, mut app) = vault_fixture();

    app.refresh();
    settle(&mut app).await;
    // Directories first, then files, case-insensitive.
    assert_eq!(row_names(&app), vec!["music", "photos", "readme.md"]);

    select_named(&mut app, "photos");
    app.activate_selected();
    assert!(app.is_busy());
    settle(&mut app).await;
    assert_eq!(app.page().path().to_string(), "/photos");
    assert_eq!(row_names(&app), vec!["..", "raw", "cat.png", "notes.txt"]);
    assert_eq!(kind_of(&app, "cat.png"), FileKind::Image);
    assert_eq!(kind_of(&app, "notes.txt"), FileKind::Text);

    // Back restores the cached root page without a fresh request, and the
    // indicator's backing node is gone until the next listing load.
    app.back();
    assert!(!app.is_busy());
    assert!(app.page().path().is_root());
    assert_eq!(row_names(&app), vec!["music", "photos", "readme.md"]);
    assert!(!app.view().indicator.is_present());

    select_named(&mut app, "music");
    app.activate_selected();
    settle(&mut app).await;
    assert!(app.view().indicator.is_present());
    assert!(!app.view().indicator.is_visible());
}

#[tokio::test]
async fn back_restores_the_selection_snapshot() {
    let (_dir, mut app) = vault_fixture();
    app.refresh();
    settle(&mut app).await;

    select_named(&mut app, "photos");
    let selected_before = app.page().selected();
    app.activate_selected();
    settle(&mut app).await;

    app.back();
    assert_eq!(app.page().selected(), selected_before);
}

#[tokio::test]
async fn text_preview_opens_inline_and_media_gets_a_card() {
    let (_dir, mut app) = vault_fixture();
    app.refresh();
    settle(&mut app).await;
    select_named(&mut app, "photos");
    app.activate_selected();
    settle(&mut app).await;

    select_named(&mut app, "notes.txt");
    app.activate_selected();
    settle(&mut app).await;
    let pane = app.view().preview.as_ref().unwrap();
    assert_eq!(pane.title(), "notes.txt");
    match pane.body() {
        PreviewBody::Text { content, truncated } => {
            assert_eq!(content, "shot list\n");
            assert!(!truncated);
        }
        PreviewBody::InfoCard { .. } => panic!("expected inline text"),
    }

    app.close_overlay();
    select_named(&mut app, "cat.png");
    app.activate_selected();
    settle(&mut app).await;
    match app.view().preview.as_ref().unwrap().body() {
        PreviewBody::InfoCard { size_display, .. } => assert_eq!(size_display, "4 B"),
        PreviewBody::Text { .. } => panic!("expected info card"),
    }
}

#[tokio::test]
async fn delete_refreshes_the_listing() {
    let (dir, mut app) = vault_fixture();
    app.refresh();
    settle(&mut app).await;

    select_named(&mut app, "readme.md");
    app.request_delete();
    app.confirm_delete();
    settle(&mut app).await;

    assert!(!dir.path().join("readme.md").exists());
    assert_eq!(row_names(&app), vec!["music", "photos"]);
}

#[tokio::test]
async fn deleting_a_directory_takes_its_contents() {
    let (dir, mut app) = vault_fixture();
    app.refresh();
    settle(&mut app).await;

    select_named(&mut app, "photos");
    app.request_delete();
    let confirm = app.view().confirm.as_ref().unwrap();
    assert!(confirm.is_dir);
    app.confirm_delete();
    settle(&mut app).await;

    assert!(!dir.path().join("photos").exists());
    assert_eq!(row_names(&app), vec!["music", "readme.md"]);
}

#[tokio::test]
async fn files_created_behind_the_apps_back_show_up_on_refresh() {
    let (dir, mut app) = vault_fixture();
    app.refresh();
    settle(&mut app).await;

    fs::write(dir.path().join("incoming.bin"), [1u8, 2, 3]).unwrap();
    app.refresh();
    settle(&mut app).await;

    assert!(row_names(&app).contains(&"incoming.bin".to_string()));
}
