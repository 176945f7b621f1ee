//! List navigation
//!
//! Tracks which item of an ordered, filterable list is "current" and moves
//! that designation with wraparound. The list is queried fresh on every
//! move; the navigator never caches it. Scrolling and focus go through an
//! injected `Viewport` so the selection logic runs without a renderer.

use log::debug;
use std::fmt::Debug;

/// Offset meaning "jump to the first item"
pub const TOP: i64 = 9999;

/// Offset meaning "jump to the last item"
pub const BOTTOM: i64 = -9999;

/// Direction of a relative move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn offset(&self) -> i64 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Source of the items currently visible to the user, in display order
pub trait ItemSource {
    type Item: Clone + PartialEq + Debug;

    /// Visible items only, freshly computed
    fn visible_items(&self) -> Vec<Self::Item>;
}

/// Scroll and focus primitives of whatever displays the items
pub trait Viewport<I> {
    /// The item is entirely on screen
    fn is_in_view(&self, item: &I) -> bool;

    /// Scroll so the item is at the top of the view
    fn scroll_to(&mut self, item: &I);

    /// Move input focus to the item
    fn focus(&mut self, item: &I);
}

/// Current-item tracker over an item source
pub struct ListNavigator<S: ItemSource, V: Viewport<S::Item>> {
    source: S,
    viewport: V,
    current: Option<S::Item>,
}

impl<S: ItemSource, V: Viewport<S::Item>> ListNavigator<S, V> {
    pub fn new(source: S, viewport: V) -> Self {
        Self {
            source,
            viewport,
            current: None,
        }
    }

    /// Move the current item by `offset`, wrapping around both ends
    ///
    /// `TOP` and `BOTTOM` jump to the first and last item. With no current
    /// item (or one that is no longer visible) the first item is selected
    /// whatever the offset. Returns the index of the current item.
    pub fn move_by(&mut self, offset: i64) -> Option<usize> {
        let items = self.source.visible_items();
        if items.is_empty() {
            return None;
        }

        let index = match self.current.as_ref() {
            None => return Some(self.select_first(&items)),
            Some(current) => match items.iter().position(|item| item == current) {
                Some(index) => index,
                None => {
                    debug!("Current item {:?} is gone, restarting at the top", current);
                    return Some(self.select_first(&items));
                }
            },
        };

        let target = target_index(index, offset, items.len())?;
        if target == index {
            return Some(index);
        }

        debug!("Moving current item {} -> {}", index, target);
        let item = items[target].clone();
        self.scroll_into_view(&item, false);
        self.viewport.focus(&item);
        self.current = Some(item);
        Some(target)
    }

    /// Scroll to the current item even if it is already on screen
    pub fn scroll_to_current(&mut self) {
        if let Some(item) = self.current.clone() {
            self.scroll_into_view(&item, true);
        }
    }

    fn select_first(&mut self, items: &[S::Item]) -> usize {
        let item = items[0].clone();
        self.viewport.focus(&item);
        self.scroll_into_view(&item, false);
        self.current = Some(item);
        0
    }

    fn scroll_into_view(&mut self, item: &S::Item, force: bool) {
        if force || !self.viewport.is_in_view(item) {
            self.viewport.scroll_to(item);
        }
    }

    /// The current item, if one has been selected
    ///
    /// It may have become invisible since; see `current_index`.
    pub fn current(&self) -> Option<&S::Item> {
        self.current.as_ref()
    }

    /// Position of the current item in the visible list
    pub fn current_index(&self) -> Option<usize> {
        let current = self.current.as_ref()?;
        self.source.visible_items().iter().position(|item| item == current)
    }

    /// Forget the current item
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }
}

/// Index reached from `index` by `offset` in a list of `count` items
///
/// Always within `0..count`, including for negative offsets. An empty
/// list has no target.
pub fn target_index(index: usize, offset: i64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let target = match offset {
        TOP => 0,
        BOTTOM => count - 1,
        _ => {
            let count = count as i64;
            (index as i64 + offset.rem_euclid(count)).rem_euclid(count) as usize
        }
    };
    Some(target)
}
