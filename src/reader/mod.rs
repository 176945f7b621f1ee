//! Feed reader session
//!
//! `ReaderSession` is the context shortcut actions run against: it owns the
//! entry list (through the navigator), the host page, the entry service and
//! the unread counter, and implements every `KeyAction`.

pub mod entry;
pub mod host;
pub mod service;
pub mod status;

pub use entry::{Entry, EntryList, EntryRef, EntryStatus};
pub use host::{LinkTarget, Modal, Page, ReaderHost};
pub use service::{EntryService, InMemoryEntryService};
pub use status::{EntriesStatusRequest, UnreadCounter};

use crate::input::{KeyAction, KeyEvent, ShortcutDispatcher};
use crate::navigation::{Direction, ListNavigator, Viewport, BOTTOM, TOP};
use crate::Result;
use log::debug;

/// Something shortcut actions can be executed on
pub trait ActionTarget {
    fn execute(&mut self, action: KeyAction) -> Result<()>;
}

/// Bind one sequence to an action of the dispatcher's context
pub fn bind_action<C: ActionTarget + 'static>(
    dispatcher: &mut ShortcutDispatcher<C>,
    sequence: &str,
    action: KeyAction,
) -> Result<()> {
    dispatcher.register(sequence, move |_: &KeyEvent, ctx: &mut C| ctx.execute(action))
}

/// Bind a whole keymap, stopping at the first invalid or conflicting sequence
pub fn bind_keymap<C, I, K>(dispatcher: &mut ShortcutDispatcher<C>, keymap: I) -> Result<()>
where
    C: ActionTarget + 'static,
    I: IntoIterator<Item = (K, KeyAction)>,
    K: AsRef<str>,
{
    for (sequence, action) in keymap {
        bind_action(dispatcher, sequence.as_ref(), action)?;
    }
    Ok(())
}

/// State of one reader page
pub struct ReaderSession<H, S, V>
where
    H: ReaderHost,
    S: EntryService,
    V: Viewport<EntryRef>,
{
    /// Current-entry tracking over the page's entries
    pub navigator: ListNavigator<EntryList, V>,

    /// The page we run in
    pub host: H,

    /// Backend for status changes, bookmarks, etc.
    pub service: S,

    /// Unread count shown in the header
    pub counter: UnreadCounter,
}

impl<H, S, V> ReaderSession<H, S, V>
where
    H: ReaderHost,
    S: EntryService,
    V: Viewport<EntryRef>,
{
    /// Create a session; the unread counter starts at the number of
    /// unread entries listed
    pub fn new(entries: EntryList, viewport: V, host: H, service: S) -> Self {
        let unread = entries
            .entries()
            .iter()
            .filter(|e| e.status == EntryStatus::Unread)
            .count() as i64;

        Self {
            navigator: ListNavigator::new(entries, viewport),
            host,
            service,
            counter: UnreadCounter::new(unread),
        }
    }

    pub fn entries(&self) -> &EntryList {
        self.navigator.source()
    }

    /// The entry marked current in list view
    pub fn current_entry(&self) -> Option<&Entry> {
        let current = self.navigator.current()?;
        self.entries().get(current.id)
    }

    /// The entry an action applies to: the current one in list view,
    /// the displayed one in entry view
    fn target_entry(&self) -> Option<&Entry> {
        if self.host.is_list_view() {
            self.current_entry()
        } else {
            self.host.displayed_entry().and_then(|id| self.entries().get(id))
        }
    }

    fn go_to_previous(&mut self, offset: i64) -> Result<()> {
        if self.host.is_list_view() {
            self.navigator.move_by(offset);
        } else {
            self.host.go_to_page(Page::Previous, false)?;
        }
        Ok(())
    }

    fn go_to_next(&mut self, offset: i64) -> Result<()> {
        if self.host.is_list_view() {
            self.navigator.move_by(offset);
        } else {
            self.host.go_to_page(Page::Next, false)?;
        }
        Ok(())
    }

    /// Send a status change and update the unread counter by the count
    /// the service reports
    pub fn update_entries_status(&mut self, entry_ids: Vec<i64>, status: EntryStatus) -> Result<u64> {
        let request = EntriesStatusRequest::new(entry_ids, status);
        let count = self.service.update_entries_status(&request)?;

        let entries = self.navigator.source_mut();
        for id in &request.entry_ids {
            if let Some(entry) = entries.get_mut(*id) {
                entry.status = status;
            }
        }

        self.counter.apply(status, count);
        debug!("{} entries marked {}", count, status);
        Ok(count)
    }

    fn toggle_status(&mut self, direction: Direction) -> Result<()> {
        let Some((id, status)) = self.target_entry().map(|e| (e.id, e.status)) else {
            return Ok(());
        };

        let new_status = status.toggled();
        self.update_entries_status(vec![id], new_status)?;
        self.host.notify(&format!("Entry marked as {}", new_status));

        let is_current = self.navigator.current().map(|r| r.id) == Some(id);
        if self.host.is_list_view() && is_current {
            self.navigator.move_by(direction.offset());
        }
        Ok(())
    }

    fn mark_entry_as_read(&mut self, id: i64) -> Result<()> {
        let unread = self
            .entries()
            .get(id)
            .map_or(false, |e| e.status == EntryStatus::Unread);
        if unread {
            self.update_entries_status(vec![id], EntryStatus::Read)?;
        }
        Ok(())
    }

    fn mark_page_as_read(&mut self) -> Result<()> {
        let ids: Vec<i64> = self.entries().visible().map(|e| e.id).collect();
        if ids.is_empty() {
            return Ok(());
        }

        self.update_entries_status(ids, EntryStatus::Read)?;
        if self.host.show_only_unread() {
            self.host.reload()
        } else {
            self.host.go_to_page(Page::Next, true).map(|_| ())
        }
    }

    fn open_selected(&mut self) -> Result<()> {
        if !self.host.is_list_view() {
            return Ok(());
        }
        match self.current_entry().cloned() {
            Some(entry) => self.host.open_entry(&entry),
            None => Ok(()),
        }
    }

    fn open_original(&mut self, current_tab: bool) -> Result<()> {
        if !self.host.is_list_view() {
            if let Some(url) = self.target_entry().map(|e| e.url.clone()) {
                let target = if current_tab {
                    LinkTarget::CurrentTab
                } else {
                    LinkTarget::NewTab
                };
                self.host.open_url(&url, target)?;
            }
            return Ok(());
        }

        // List view always opens in a new tab and moves on
        let Some((id, url)) = self.current_entry().map(|e| (e.id, e.url.clone())) else {
            return Ok(());
        };
        self.host.open_url(&url, LinkTarget::NewTab)?;
        if self.host.current_page() != Some(Page::Starred) {
            self.navigator.move_by(1);
        }
        self.mark_entry_as_read(id)
    }

    fn open_comments(&mut self, current_tab: bool) -> Result<()> {
        let list_view = self.host.is_list_view();
        let Some(url) = self.target_entry().and_then(|e| e.comments_url.clone()) else {
            return Ok(());
        };

        let target = if current_tab && !list_view {
            LinkTarget::CurrentTab
        } else {
            LinkTarget::NewTab
        };
        self.host.open_url(&url, target)
    }

    fn save_entry(&mut self) -> Result<()> {
        let Some((id, saved)) = self.target_entry().map(|e| (e.id, e.saved)) else {
            return Ok(());
        };
        if saved {
            return Ok(());
        }

        self.service.save_entry(id)?;
        if let Some(entry) = self.navigator.source_mut().get_mut(id) {
            entry.saved = true;
        }
        self.host.notify("Entry saved");
        Ok(())
    }

    fn toggle_bookmark(&mut self) -> Result<()> {
        let Some(id) = self.target_entry().map(|e| e.id) else {
            return Ok(());
        };

        let starred = self.service.toggle_bookmark(id)?;
        if let Some(entry) = self.navigator.source_mut().get_mut(id) {
            entry.starred = starred;
        }
        self.host
            .notify(if starred { "Entry starred" } else { "Entry unstarred" });
        Ok(())
    }

    fn fetch_original_content(&mut self) -> Result<()> {
        if self.host.is_list_view() {
            return Ok(());
        }
        match self.host.displayed_entry() {
            Some(id) => self.service.fetch_original_content(id),
            None => Ok(()),
        }
    }

    fn go_to_feed(&mut self) -> Result<()> {
        match self.target_entry().map(|e| e.feed_id) {
            Some(feed_id) => self.host.go_to_feed(feed_id),
            None => Ok(()),
        }
    }

    fn unsubscribe(&mut self) -> Result<()> {
        let Some(feed_id) = self.host.current_feed() else {
            return Ok(());
        };
        self.service.unsubscribe(feed_id)?;
        self.host.go_to_page(Page::Feeds, true).map(|_| ())
    }
}

impl<H, S, V> ActionTarget for ReaderSession<H, S, V>
where
    H: ReaderHost,
    S: EntryService,
    V: Viewport<EntryRef>,
{
    /// Execute a reader action
    fn execute(&mut self, action: KeyAction) -> Result<()> {
        use KeyAction::*;

        debug!("Executing {}", action);
        match action {
            GoToPage(page) => self.host.go_to_page(page, false).map(|_| ()),
            GoToFeed => self.go_to_feed(),
            GoToFeedOrFeeds => {
                if self.host.is_list_view() {
                    self.host.go_to_page(Page::Feeds, false).map(|_| ())
                } else {
                    self.go_to_feed()
                }
            }

            PreviousItem => self.go_to_previous(Direction::Previous.offset()),
            NextItem => self.go_to_next(Direction::Next.offset()),
            FirstItem => self.go_to_previous(TOP),
            LastItem => self.go_to_next(BOTTOM),
            ScrollToCurrent => {
                self.navigator.scroll_to_current();
                Ok(())
            }

            OpenSelected => self.open_selected(),
            OpenOriginal { current_tab } => self.open_original(current_tab),
            OpenComments { current_tab } => self.open_comments(current_tab),
            ToggleStatus(direction) => self.toggle_status(direction),
            SaveEntry => self.save_entry(),
            ToggleBookmark => self.toggle_bookmark(),
            FetchOriginalContent => self.fetch_original_content(),
            ToggleEnclosures => self.host.toggle_enclosures(),

            MarkPageAsRead => self.mark_page_as_read(),
            RefreshAllFeeds => {
                self.service.refresh_all_feeds()?;
                self.host.notify("Refreshing all feeds");
                Ok(())
            }
            Unsubscribe => self.unsubscribe(),

            ShowShortcuts => self.host.open_modal(Modal::KeyboardShortcuts),
            CloseModal => self.host.close_modal(),
        }
    }
}
