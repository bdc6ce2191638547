//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, SystemTime};

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::text::Text;

use crate::core::deck::{Deck, DeckError};
use crate::core::state::{App, Metadata};
use crate::core::watch::{DeckSource, Watcher};
use crate::tui::component::Component;
use crate::tui::markdown::{RenderError, SlideRenderer};

/// Write `content` to `deck.md` inside a fresh temp dir.
///
/// Keep the returned `TempDir` alive for as long as the file is needed.
pub fn write_deck(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.md");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

#[derive(Default)]
struct FakeState {
    content: RefCell<String>,
    mtime: Cell<u64>,
    loads: Cell<usize>,
    stat_failing: Cell<bool>,
    load_failing: Cell<bool>,
}

/// In-memory document with a controllable modification time.
///
/// Clones share state, so a test can keep a handle after moving one into a
/// `Watcher`.
#[derive(Clone, Default)]
pub struct FakeSource {
    state: Rc<FakeState>,
}

impl FakeSource {
    pub fn new(content: &str) -> Self {
        let source = Self::default();
        source.state.content.replace(content.to_string());
        source.state.mtime.set(1);
        source
    }

    /// Replace the content and bump the modification time.
    pub fn edit(&self, content: &str) {
        self.state.content.replace(content.to_string());
        self.state.mtime.set(self.state.mtime.get() + 1);
    }

    pub fn mtime(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(self.state.mtime.get())
    }

    pub fn load_count(&self) -> usize {
        self.state.loads.get()
    }

    pub fn set_stat_failing(&self, failing: bool) {
        self.state.stat_failing.set(failing);
    }

    pub fn set_load_failing(&self, failing: bool) {
        self.state.load_failing.set(failing);
    }
}

impl DeckSource for FakeSource {
    fn describe(&self) -> String {
        "fake".to_string()
    }

    fn modified(&self) -> io::Result<SystemTime> {
        if self.state.stat_failing.get() {
            return Err(io::Error::other("stat failed"));
        }
        Ok(self.mtime())
    }

    fn load(&self) -> Result<Deck, DeckError> {
        self.state.loads.set(self.state.loads.get() + 1);
        if self.state.load_failing.get() {
            return Err(DeckError::InvalidTarget(PathBuf::from("fake")));
        }
        Ok(Deck::parse(&self.state.content.borrow()))
    }
}

pub fn test_metadata() -> Metadata {
    Metadata {
        author: "Ada".to_string(),
        date: "01-02-2024".to_string(),
    }
}

/// Creates a test App backed by a `FakeSource` holding `content`.
pub fn test_app(content: &str) -> (App, FakeSource) {
    let source = FakeSource::new(content);
    let (watcher, deck) = Watcher::open(source.clone()).unwrap();
    (App::new(deck, watcher, test_metadata()), source)
}

/// Renders slide text verbatim, one line per input line.
pub struct PlainRenderer;

impl SlideRenderer for PlainRenderer {
    fn render(&self, markdown: &str, _width: u16) -> Result<Text<'static>, RenderError> {
        Ok(Text::from(markdown.to_string()))
    }
}

/// Always fails, for exercising the fatal render path.
pub struct FailingRenderer;

impl SlideRenderer for FailingRenderer {
    fn render(&self, _markdown: &str, _width: u16) -> Result<Text<'static>, RenderError> {
        Err(RenderError::Highlight("boom".to_string()))
    }
}

/// Draw a component into a `width`×`height` test terminal and return its rows.
pub fn render_rows(component: &mut dyn Component, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|f| component.render(f, f.area()))
        .unwrap();
    buffer_rows(terminal.backend().buffer())
}

pub fn buffer_rows(buffer: &ratatui::buffer::Buffer) -> Vec<String> {
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect()
}
