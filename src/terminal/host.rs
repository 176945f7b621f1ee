//! Reader host backed by the terminal
//!
//! Stands in for the browser page: there is one entry list, pages other
//! than the list are reported in the status line, and the search page is
//! a prompt that filters the list.

use crate::input::{FocusTarget, PromptBuffer};
use crate::reader::{Entry, LinkTarget, Modal, Page, ReaderHost};
use crate::Result;
use log::debug;

/// Terminal side of the reader
pub struct TerminalHost {
    /// Page the listing belongs to
    page: Page,

    /// Feed being listed, on a feed page
    feed: Option<i64>,

    /// Entry shown full screen (entry view)
    pub detail: Option<Entry>,

    /// Open dialog, drawn over the list
    pub modal: Option<Modal>,

    /// Open text prompt; has focus while present
    pub prompt: Option<PromptBuffer>,

    /// Status line message
    pub message: Option<String>,

    /// Enclosure list expanded in entry view
    pub enclosures_open: bool,

    /// Links opened so far, most recent last
    pub opened: Vec<(String, LinkTarget)>,

    show_only_unread: bool,
}

impl TerminalHost {
    pub fn new(page: Page, show_only_unread: bool) -> Self {
        Self {
            page,
            feed: None,
            detail: None,
            modal: None,
            prompt: None,
            message: None,
            enclosures_open: false,
            opened: Vec::new(),
            show_only_unread,
        }
    }

    /// Where key events should be reported as landing
    pub fn focus_target(&self) -> FocusTarget {
        if self.prompt.is_some() {
            FocusTarget::TextInput
        } else if self.detail.is_some() {
            FocusTarget::Document
        } else {
            FocusTarget::Element
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    fn set_message(&mut self, message: String) {
        debug!("Status: {}", message);
        self.message = Some(message);
    }
}

impl ReaderHost for TerminalHost {
    fn is_list_view(&self) -> bool {
        self.detail.is_none()
    }

    fn current_page(&self) -> Option<Page> {
        Some(self.page)
    }

    fn displayed_entry(&self) -> Option<i64> {
        self.detail.as_ref().map(|e| e.id)
    }

    fn current_feed(&self) -> Option<i64> {
        self.feed
    }

    fn show_only_unread(&self) -> bool {
        self.show_only_unread
    }

    fn go_to_page(&mut self, page: Page, fallback_reload: bool) -> Result<bool> {
        match page {
            Page::Search => {
                self.prompt = Some(PromptBuffer::new("Search"));
                Ok(true)
            }
            // A single list has no neighbouring pages
            Page::Previous | Page::Next => {
                if fallback_reload {
                    self.reload()?;
                } else {
                    self.set_message(format!("No {} page", page));
                }
                Ok(false)
            }
            _ => {
                self.page = page;
                self.feed = None;
                self.detail = None;
                self.set_message(format!("Go to {}", page));
                Ok(true)
            }
        }
    }

    fn go_to_feed(&mut self, feed_id: i64) -> Result<()> {
        self.feed = Some(feed_id);
        self.detail = None;
        self.set_message(format!("Go to feed {}", feed_id));
        Ok(())
    }

    fn open_entry(&mut self, entry: &Entry) -> Result<()> {
        self.enclosures_open = false;
        self.detail = Some(entry.clone());
        Ok(())
    }

    fn open_url(&mut self, url: &str, target: LinkTarget) -> Result<()> {
        let how = match target {
            LinkTarget::CurrentTab => "Open",
            LinkTarget::NewTab => "Open in new tab",
        };
        self.set_message(format!("{}: {}", how, url));
        self.opened.push((url.to_string(), target));
        Ok(())
    }

    fn open_modal(&mut self, modal: Modal) -> Result<()> {
        self.modal = Some(modal);
        Ok(())
    }

    /// Closes the dialog, or leaves entry view when no dialog is open
    fn close_modal(&mut self) -> Result<()> {
        if self.modal.take().is_none() {
            self.detail = None;
        }
        Ok(())
    }

    fn toggle_enclosures(&mut self) -> Result<()> {
        self.enclosures_open = !self.enclosures_open;
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        self.detail = None;
        self.set_message("Reloaded".to_string());
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        self.set_message(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_opens_prompt() {
        let mut host = TerminalHost::new(Page::Unread, false);
        assert_eq!(host.focus_target(), FocusTarget::Element);

        assert!(host.go_to_page(Page::Search, false).unwrap());
        assert_eq!(host.focus_target(), FocusTarget::TextInput);
    }

    #[test]
    fn test_escape_closes_modal_then_entry() {
        let mut host = TerminalHost::new(Page::Unread, false);
        host.detail = Some(Entry {
            id: 1,
            feed_id: 1,
            title: "t".into(),
            url: "u".into(),
            comments_url: None,
            status: crate::reader::EntryStatus::Unread,
            starred: false,
            saved: false,
            has_enclosures: false,
            hidden: false,
        });
        host.open_modal(Modal::KeyboardShortcuts).unwrap();

        host.close_modal().unwrap();
        assert!(host.modal.is_none());
        assert!(!host.is_list_view());

        host.close_modal().unwrap();
        assert!(host.is_list_view());
    }

    #[test]
    fn test_neighbour_pages() {
        let mut host = TerminalHost::new(Page::Unread, false);
        assert!(!host.go_to_page(Page::Next, false).unwrap());
        assert_eq!(host.message.as_deref(), Some("No next page"));
        host.go_to_page(Page::Next, true).unwrap();
        assert_eq!(host.message.as_deref(), Some("Reloaded"));
    }
}
