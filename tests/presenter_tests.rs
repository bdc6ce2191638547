use std::path::{Path, PathBuf};
use std::sync::mpsc;

use filetime::{FileTime, set_file_mtime};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use slides::core::action::{Action, update};
use slides::core::config::{ResolvedConfig, ThemeChoice};
use slides::core::deck::{self, DeckError};
use slides::core::state::{App, Metadata};
use slides::core::watch::{FileSource, Watcher};
use slides::tui::component::Component;
use slides::tui::markdown::MarkdownRenderer;
use slides::tui::theme::Theme;
use slides::tui::{PresentError, run, run_loop};

// ============================================================================
// Helper Functions
// ============================================================================

fn write(path: &Path, content: &str, mtime_secs: i64) {
    std::fs::write(path, content).unwrap();
    set_file_mtime(path, FileTime::from_unix_time(mtime_secs, 0)).unwrap();
}

fn scratch(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("talk.md");
    write(&path, content, 1_000_000);
    (dir, path)
}

fn open_app(path: &Path) -> App {
    let (watcher, deck) = Watcher::open(FileSource::new(path)).unwrap();
    let metadata = Metadata {
        author: "Ada".to_string(),
        date: "01-02-2024".to_string(),
    };
    App::new(deck, watcher, metadata)
}

/// Run `actions` through the event loop, drawing into a test terminal.
/// Returns the rows of the last frame drawn.
fn present(app: &mut App, actions: &[Action], width: u16, height: u16) -> Vec<String> {
    let (tx, rx) = mpsc::channel();
    tx.send(Action::Resize { width, height }).unwrap();
    for action in actions {
        tx.send(*action).unwrap();
    }
    drop(tx);

    let renderer = MarkdownRenderer::new(Theme::default());
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    run_loop(app, &renderer, &rx, |composition| {
        terminal.draw(|f| composition.render(f, f.area())).unwrap();
        Ok(())
    })
    .unwrap();

    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(width as usize)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect()
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn title_and_body_navigate_to_second_slide() {
    let (_dir, path) = scratch("Title\n---\nBody text");
    let mut app = open_app(&path);
    assert_eq!(app.deck.slides(), ["Title", "Body text"]);
    assert_eq!(app.cursor.index(), 0);

    let rows = present(&mut app, &[Action::Next], 40, 12);
    assert_eq!(app.cursor.index(), 1);
    assert!(rows.iter().any(|r| r.contains("Body text")), "rows: {rows:#?}");
    assert!(rows[10].trim_end().ends_with("2 / 2"), "status: {:?}", rows[10]);
}

#[test]
fn single_slide_ignores_navigation() {
    let (_dir, path) = scratch("# Only slide\n\nNo delimiter here.");
    let mut app = open_app(&path);
    assert_eq!(app.deck.len(), 1);

    let rows = present(&mut app, &[Action::Next, Action::Previous, Action::Next], 40, 12);
    assert_eq!(app.cursor.index(), 0);
    assert!(rows[10].trim_end().ends_with("1 / 1"));
    assert!(rows.iter().any(|r| r.contains("Only slide")));
}

#[test]
fn edited_file_shrinks_deck_and_clamps_cursor() {
    let (_dir, path) = scratch("one\n---\ntwo\n---\nthree");
    let mut app = open_app(&path);
    update(&mut app, Action::Next).unwrap();
    update(&mut app, Action::Next).unwrap();
    assert_eq!(app.cursor.index(), 2);

    // Same mtime: no reload even though content changed
    write(&path, "one\n---\ntwo", 1_000_000);
    update(&mut app, Action::Tick).unwrap();
    assert_eq!(app.deck.len(), 3);

    set_file_mtime(&path, FileTime::from_unix_time(1_000_060, 0)).unwrap();
    update(&mut app, Action::Tick).unwrap();
    assert_eq!(app.deck.len(), 2);
    assert_eq!(app.cursor.index(), 1);
    assert_eq!(app.current_slide(), "two");
}

#[test]
fn directory_target_fails_before_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let config = ResolvedConfig {
        document: dir.path().to_path_buf(),
        author: "Ada".to_string(),
        date_format: "%d-%m-%Y".to_string(),
        theme: ThemeChoice::Builtin,
    };
    let err = run(config).unwrap_err();
    assert!(
        matches!(err, PresentError::Deck(DeckError::InvalidTarget(_))),
        "got {err:?}"
    );
}

#[test]
fn file_turning_into_directory_is_fatal() {
    let (_dir, path) = scratch("one\n---\ntwo");
    let mut app = open_app(&path);

    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();
    set_file_mtime(&path, FileTime::from_unix_time(2_000_000, 0)).unwrap();

    let (tx, rx) = mpsc::channel();
    tx.send(Action::Tick).unwrap();
    drop(tx);
    let renderer = MarkdownRenderer::new(Theme::default());
    let result = run_loop(&mut app, &renderer, &rx, |_| Ok(()));
    assert!(matches!(result, Err(PresentError::Deck(DeckError::InvalidTarget(_)))));
}

#[test]
fn loading_twice_is_stable() {
    let (_dir, path) = scratch("\r\n# A\r\n---\n\n## B\n\n---\nC\n");
    let first = deck::load(&path).unwrap();
    let second = deck::load(&path).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.slides(), ["# A", "## B", "C"]);
}
