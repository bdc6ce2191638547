use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the screen that knows how to draw itself.
///
/// Components receive their data up front (struct fields) and render into
/// whatever `Rect` the parent hands them, so the same component can be
/// drawn into the real terminal or into a `TestBackend` in tests.
///
/// # Mutability
///
/// `render` takes `&mut self` so a component may cache layout results
/// during the render pass. This aligns with Ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
