//! Entry service: the server side of the reader's actions

use std::collections::{HashMap, HashSet};

use super::{EntriesStatusRequest, Entry, EntryStatus};
use crate::{FeedkeysError, Result};
use log::debug;

/// Requests the reader sends to its backend
pub trait EntryService {
    /// Change the status of entries, returning how many actually changed
    fn update_entries_status(&mut self, request: &EntriesStatusRequest) -> Result<u64>;

    /// Flip the starred flag, returning the new value
    fn toggle_bookmark(&mut self, entry_id: i64) -> Result<bool>;

    /// Send the entry to the configured third-party integrations
    fn save_entry(&mut self, entry_id: i64) -> Result<()>;

    /// Download the original web page content for the entry
    fn fetch_original_content(&mut self, entry_id: i64) -> Result<()>;

    fn refresh_all_feeds(&mut self) -> Result<()>;

    fn unsubscribe(&mut self, feed_id: i64) -> Result<()>;
}

/// Entry service holding its state in memory
///
/// Backs the terminal host and the tests.
#[derive(Debug, Default)]
pub struct InMemoryEntryService {
    statuses: HashMap<i64, EntryStatus>,
    starred: HashSet<i64>,
    saved: HashSet<i64>,
    fetched: HashSet<i64>,
    feeds: HashSet<i64>,
    refreshes: usize,
}

impl InMemoryEntryService {
    pub fn new(entries: &[Entry]) -> Self {
        Self {
            statuses: entries.iter().map(|e| (e.id, e.status)).collect(),
            starred: entries.iter().filter(|e| e.starred).map(|e| e.id).collect(),
            saved: entries.iter().filter(|e| e.saved).map(|e| e.id).collect(),
            feeds: entries.iter().map(|e| e.feed_id).collect(),
            ..Default::default()
        }
    }

    pub fn status(&self, entry_id: i64) -> Option<EntryStatus> {
        self.statuses.get(&entry_id).copied()
    }

    pub fn is_starred(&self, entry_id: i64) -> bool {
        self.starred.contains(&entry_id)
    }

    pub fn is_saved(&self, entry_id: i64) -> bool {
        self.saved.contains(&entry_id)
    }

    pub fn is_fetched(&self, entry_id: i64) -> bool {
        self.fetched.contains(&entry_id)
    }

    pub fn is_subscribed(&self, feed_id: i64) -> bool {
        self.feeds.contains(&feed_id)
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    fn known(&self, entry_id: i64) -> Result<()> {
        if self.statuses.contains_key(&entry_id) {
            Ok(())
        } else {
            Err(FeedkeysError::Service(format!("entry {} not found", entry_id)))
        }
    }
}

impl EntryService for InMemoryEntryService {
    fn update_entries_status(&mut self, request: &EntriesStatusRequest) -> Result<u64> {
        debug!("POST entries status: {}", serde_json::to_string(request)?);

        let mut count = 0;
        for id in &request.entry_ids {
            if let Some(status) = self.statuses.get_mut(id) {
                if *status != request.status {
                    *status = request.status;
                    count += 1;
                }
            }
        }
        Ok(count)
    }

    fn toggle_bookmark(&mut self, entry_id: i64) -> Result<bool> {
        self.known(entry_id)?;
        if self.starred.remove(&entry_id) {
            Ok(false)
        } else {
            self.starred.insert(entry_id);
            Ok(true)
        }
    }

    fn save_entry(&mut self, entry_id: i64) -> Result<()> {
        self.known(entry_id)?;
        self.saved.insert(entry_id);
        Ok(())
    }

    fn fetch_original_content(&mut self, entry_id: i64) -> Result<()> {
        self.known(entry_id)?;
        self.fetched.insert(entry_id);
        Ok(())
    }

    fn refresh_all_feeds(&mut self) -> Result<()> {
        self.refreshes += 1;
        Ok(())
    }

    fn unsubscribe(&mut self, feed_id: i64) -> Result<()> {
        if self.feeds.remove(&feed_id) {
            Ok(())
        } else {
            Err(FeedkeysError::Service(format!("feed {} not found", feed_id)))
        }
    }
}
