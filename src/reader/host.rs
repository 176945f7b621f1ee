//! The page hosting the reader: pages, links, dialogs

use std::fmt;
use std::str::FromStr;

use super::Entry;
use crate::{FeedkeysError, Result};

/// Pages reachable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Unread,
    Starred,
    History,
    Feeds,
    Categories,
    Settings,
    Search,
    AddSubscription,
    /// Previous page of a paginated listing, or previous entry
    Previous,
    /// Next page of a paginated listing, or next entry
    Next,
}

impl Page {
    pub fn name(&self) -> &'static str {
        match self {
            Page::Unread => "unread",
            Page::Starred => "starred",
            Page::History => "history",
            Page::Feeds => "feeds",
            Page::Categories => "categories",
            Page::Settings => "settings",
            Page::Search => "search",
            Page::AddSubscription => "add_subscription",
            Page::Previous => "previous",
            Page::Next => "next",
        }
    }
}

impl FromStr for Page {
    type Err = FeedkeysError;

    fn from_str(s: &str) -> Result<Self> {
        let page = match s {
            "unread" => Page::Unread,
            "starred" => Page::Starred,
            "history" => Page::History,
            "feeds" => Page::Feeds,
            "categories" => Page::Categories,
            "settings" => Page::Settings,
            "search" => Page::Search,
            "add_subscription" => Page::AddSubscription,
            "previous" => Page::Previous,
            "next" => Page::Next,
            other => return Err(FeedkeysError::Other(format!("unknown page: {}", other))),
        };
        Ok(page)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Dialogs the reader can open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    KeyboardShortcuts,
}

/// Where to open a link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    CurrentTab,
    NewTab,
}

/// Capabilities of the page the reader runs in
///
/// Everything here is a side effect on the surrounding page; the reader
/// decides when to call them.
pub trait ReaderHost {
    /// Showing a list of entries (as opposed to a single entry)
    fn is_list_view(&self) -> bool;

    /// The page being shown, when it is one of the named pages
    fn current_page(&self) -> Option<Page>;

    /// The entry shown in entry view
    fn displayed_entry(&self) -> Option<i64>;

    /// The feed whose entries are listed, on a feed page
    fn current_feed(&self) -> Option<i64>;

    /// Only unread entries are listed
    fn show_only_unread(&self) -> bool {
        false
    }

    /// Navigate to a named page
    ///
    /// Returns false when the page has no link to it; with `fallback_reload`
    /// the current page is reloaded instead.
    fn go_to_page(&mut self, page: Page, fallback_reload: bool) -> Result<bool>;

    fn go_to_feed(&mut self, feed_id: i64) -> Result<()>;

    fn open_entry(&mut self, entry: &Entry) -> Result<()>;

    fn open_url(&mut self, url: &str, target: LinkTarget) -> Result<()>;

    fn open_modal(&mut self, modal: Modal) -> Result<()>;

    fn close_modal(&mut self) -> Result<()>;

    fn toggle_enclosures(&mut self) -> Result<()>;

    fn reload(&mut self) -> Result<()>;

    /// Short confirmation message (toast)
    fn notify(&mut self, _message: &str) {}
}
