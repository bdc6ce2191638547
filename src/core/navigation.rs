//! Slide cursor. Every operation saturates at the deck edges.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to the next slide unless already on the last one.
    pub fn advance(&mut self, len: usize) {
        if self.index + 1 < len {
            self.index += 1;
        }
    }

    /// Move to the previous slide unless already on the first one.
    pub fn retreat(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Pull the index back inside a deck that shrank to `len` slides.
    pub fn clamp(&mut self, len: usize) {
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
    }
}
