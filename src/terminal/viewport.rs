//! Scrolling window over the entry list

use crate::navigation::Viewport;
use crate::reader::EntryRef;

/// Rows kept above an entry scrolled to the top
const SCROLL_MARGIN: usize = 1;

/// The rows of the entry list that fit on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalViewport {
    /// First visible row
    pub top: usize,

    /// Number of rows available for entries
    pub height: usize,

    /// Entry holding input focus
    pub focused: Option<i64>,
}

impl TerminalViewport {
    pub fn new(height: usize) -> Self {
        Self {
            top: 0,
            height: height.max(1),
            focused: None,
        }
    }

    /// Update the height when the terminal is resized
    pub fn resize(&mut self, height: usize) {
        self.height = height.max(1);
    }

    /// Rows to draw for a list of `count` entries
    pub fn rows(&self, count: usize) -> std::ops::Range<usize> {
        let start = self.top.min(count);
        start..(start + self.height).min(count)
    }
}

impl Viewport<EntryRef> for TerminalViewport {
    fn is_in_view(&self, item: &EntryRef) -> bool {
        item.row >= self.top && item.row < self.top + self.height
    }

    fn scroll_to(&mut self, item: &EntryRef) {
        self.top = item.row.saturating_sub(SCROLL_MARGIN);
    }

    fn focus(&mut self, item: &EntryRef) {
        self.focused = Some(item.id);
    }
}
