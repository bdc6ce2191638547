//! # Frame Composer
//!
//! Builds one full-screen frame from the current slide and the status bar.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ (padding)                                │
//! │  rendered slide, top-aligned             │  height − status height
//! │  ...                                     │
//! │                                          │
//! ├──────────────────────────────────────────┤
//! │ (padding)                                │
//! │   Author date                     2 / 5  │  status bar, pinned to bottom
//! │ (padding)                                │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Rendering the markdown is the only fallible step, so it happens in
//! [`compose`], before the terminal is touched. The returned [`Composition`]
//! then draws infallibly inside `Terminal::draw`.
//!
//! ## Status bar overflow
//!
//! The page counter always gets its columns first and sits flush right. The
//! author/date segment gets whatever is left and is cut off at that edge.
//! On a terminal too narrow for the counter itself, the counter is cut too.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::state::{App, Metadata, Viewport};
use crate::tui::component::Component;
use crate::tui::markdown::{RenderError, SlideRenderer};

/// Padding on every side of the slide body.
const SLIDE_PADDING: u16 = 1;
/// Padding on every side of the status line.
const STATUS_PADDING: u16 = 1;
const AUTHOR_MARGIN_LEFT: usize = 2;
const DATE_MARGIN: usize = 1;
const PAGE_MARGIN_RIGHT: usize = 3;

/// What the composer needs to know about the current slide.
#[derive(Debug, Clone, Copy)]
pub struct SlideView<'a> {
    pub slide: &'a str,
    pub index: usize,
    pub total: usize,
    pub metadata: &'a Metadata,
}

impl<'a> SlideView<'a> {
    pub fn from_app(app: &'a App) -> Self {
        Self {
            slide: app.current_slide(),
            index: app.cursor.index(),
            total: app.deck.len(),
            metadata: &app.metadata,
        }
    }
}

/// Render the slide and lay it out with the status bar for `viewport`.
pub fn compose<R>(
    view: &SlideView<'_>,
    renderer: &R,
    viewport: Viewport,
) -> Result<Composition, RenderError>
where
    R: SlideRenderer + ?Sized,
{
    let body_width = viewport.width.saturating_sub(2 * SLIDE_PADDING);
    let body = renderer.render(view.slide, body_width)?;
    Ok(Composition {
        body,
        status: StatusBar::new(view),
    })
}

/// A fully rendered frame, ready to draw.
pub struct Composition {
    body: Text<'static>,
    status: StatusBar,
}

impl Composition {
    pub fn status(&self) -> &StatusBar {
        &self.status
    }
}

impl Component for Composition {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let status_height = StatusBar::HEIGHT.min(area.height);
        let [body_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(status_height)]).areas(area);

        let body = Paragraph::new(self.body.clone())
            .block(Block::default().padding(Padding::uniform(SLIDE_PADDING)));
        frame.render_widget(body, body_area);

        self.status.render(frame, status_area);
    }
}

/// Bottom line: author and date on the left, page counter on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBar {
    pub author: String,
    pub date: String,
    /// `"<index+1> / <total>"`
    pub page: String,
}

impl StatusBar {
    /// One line of text plus its padding.
    pub const HEIGHT: u16 = 1 + 2 * STATUS_PADDING;

    pub fn new(view: &SlideView<'_>) -> Self {
        Self {
            author: view.metadata.author.clone(),
            date: view.metadata.date.clone(),
            page: format!("{} / {}", view.index + 1, view.total),
        }
    }

    fn left(&self) -> Line<'static> {
        let date_margin = " ".repeat(DATE_MARGIN);
        Line::from(vec![
            Span::raw(" ".repeat(AUTHOR_MARGIN_LEFT)),
            Span::raw(self.author.clone()),
            Span::raw(date_margin.clone()),
            Span::styled(self.date.clone(), Style::default().add_modifier(Modifier::DIM)),
            Span::raw(date_margin),
        ])
    }

    fn right(&self) -> (Line<'static>, u16) {
        let width = self.page.width() + PAGE_MARGIN_RIGHT;
        let line = Line::from(vec![
            Span::raw(self.page.clone()),
            Span::raw(" ".repeat(PAGE_MARGIN_RIGHT)),
        ]);
        (line, u16::try_from(width).unwrap_or(u16::MAX))
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner = Block::default()
            .padding(Padding::uniform(STATUS_PADDING))
            .inner(area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let (right, right_width) = self.right();
        let right_width = right_width.min(inner.width);
        let left_area = Rect {
            width: inner.width - right_width,
            height: 1,
            ..inner
        };
        let right_area = Rect {
            x: inner.x + left_area.width,
            width: right_width,
            height: 1,
            ..inner
        };

        frame.render_widget(Paragraph::new(self.left()), left_area);
        frame.render_widget(Paragraph::new(right), right_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingRenderer, PlainRenderer, render_rows, test_metadata};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn view<'a>(slide: &'a str, index: usize, total: usize, metadata: &'a Metadata) -> SlideView<'a> {
        SlideView {
            slide,
            index,
            total,
            metadata,
        }
    }

    fn compose_rows(slide: &str, index: usize, total: usize, width: u16, height: u16) -> Vec<String> {
        let metadata = test_metadata();
        let mut composition = compose(
            &view(slide, index, total, &metadata),
            &PlainRenderer,
            Viewport { width, height },
        )
        .unwrap();
        render_rows(&mut composition, width, height)
    }

    #[test]
    fn test_status_bar_page_counter() {
        let metadata = test_metadata();
        let status = StatusBar::new(&view("x", 1, 2, &metadata));
        assert_eq!(status.page, "2 / 2");
    }

    #[test]
    fn test_body_is_padded_and_top_aligned() {
        let rows = compose_rows("Title\nline two", 0, 1, 30, 10);
        assert_eq!(rows[0].trim(), "");
        assert!(rows[1].starts_with(" Title"), "row 1: {:?}", rows[1]);
        assert!(rows[2].starts_with(" line two"), "row 2: {:?}", rows[2]);
    }

    #[test]
    fn test_status_pinned_to_bottom_and_flush_right() {
        let rows = compose_rows("Body", 1, 2, 40, 12);
        assert_eq!(rows.len(), 12);
        let status = &rows[10];
        assert!(status.starts_with("   Ada 01-02-2024"), "status: {:?}", status);
        assert!(status.ends_with("2 / 2    "), "status: {:?}", status);
        assert_eq!(rows[9].trim(), "");
        assert_eq!(rows[11].trim(), "");
    }

    #[test]
    fn test_date_is_faint() {
        let metadata = test_metadata();
        let mut composition = compose(
            &view("Body", 0, 1, &metadata),
            &PlainRenderer,
            Viewport { width: 40, height: 8 },
        )
        .unwrap();
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        terminal.draw(|f| composition.render(f, f.area())).unwrap();
        let buffer = terminal.backend().buffer();

        // Status text row is 6; padding 1 + margin 2 + "Ada" + margin 1 puts the date at column 7
        assert_eq!(buffer[(7, 6)].symbol(), "0");
        assert!(buffer[(7, 6)].modifier.contains(Modifier::DIM));
        assert!(!buffer[(4, 6)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_long_author_is_truncated_not_overlapping() {
        let metadata = Metadata {
            author: "A very long author name that cannot possibly fit".to_string(),
            date: "01-02-2024".to_string(),
        };
        let mut composition = compose(
            &view("Body", 2, 10, &metadata),
            &PlainRenderer,
            Viewport { width: 24, height: 6 },
        )
        .unwrap();
        let rows = render_rows(&mut composition, 24, 6);
        let status = &rows[4];
        assert!(status.ends_with("3 / 10    "), "status: {:?}", status);
        assert!(status.starts_with("   A very long"), "status: {:?}", status);
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        for (w, h) in [(1, 1), (3, 2), (5, 3), (12, 4)] {
            let metadata = test_metadata();
            let mut composition = compose(
                &view("Body", 0, 1, &metadata),
                &PlainRenderer,
                Viewport { width: w, height: h },
            )
            .unwrap();
            let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
            terminal.draw(|f| composition.render(f, f.area())).unwrap();
        }
    }

    #[test]
    fn test_render_error_propagates() {
        let metadata = test_metadata();
        let result = compose(
            &view("Body", 0, 1, &metadata),
            &FailingRenderer,
            Viewport { width: 40, height: 10 },
        );
        assert!(matches!(result, Err(RenderError::Highlight(_))));
    }
}
