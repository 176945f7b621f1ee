//! Feed entries and the list the navigator walks

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::navigation::ItemSource;
use crate::Result;
use log::debug;

/// Read status of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Unread,
    Read,
    Removed,
}

impl EntryStatus {
    /// Status a toggle switches to
    pub fn toggled(&self) -> Self {
        match self {
            EntryStatus::Read => EntryStatus::Unread,
            _ => EntryStatus::Read,
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryStatus::Unread => "unread",
            EntryStatus::Read => "read",
            EntryStatus::Removed => "removed",
        };
        write!(f, "{}", name)
    }
}

/// A feed entry as listed on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub feed_id: i64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub comments_url: Option<String>,
    pub status: EntryStatus,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub saved: bool,
    #[serde(default)]
    pub has_enclosures: bool,
    /// Filtered out of the visible list
    #[serde(default)]
    pub hidden: bool,
}

/// Handle to a visible entry
///
/// `row` is the entry's position among visible entries when the handle
/// was made; two handles are equal when they name the same entry.
#[derive(Debug, Clone, Copy)]
pub struct EntryRef {
    pub id: i64,
    pub row: usize,
}

impl PartialEq for EntryRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Entries of the current page, in display order
#[derive(Debug, Clone, Default)]
pub struct EntryList {
    entries: Vec<Entry>,
}

impl EntryList {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Load entries from a JSON array
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let entries: Vec<Entry> = serde_json::from_str(&data)?;
        debug!("Loaded {} entries from {:?}", entries.len(), path);
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: i64) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Visible entries, in display order
    pub fn visible(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| !e.hidden)
    }

    /// Hide entries whose title does not contain `query` (case insensitive)
    ///
    /// An empty query shows everything again. Returns the number of
    /// visible entries.
    pub fn apply_filter(&mut self, query: &str) -> usize {
        let query = query.to_lowercase();
        for entry in &mut self.entries {
            entry.hidden = !query.is_empty() && !entry.title.to_lowercase().contains(&query);
        }
        self.visible().count()
    }

    /// Drop an entry from the page entirely
    pub fn remove(&mut self, id: i64) -> Option<Entry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ItemSource for EntryList {
    type Item = EntryRef;

    fn visible_items(&self) -> Vec<EntryRef> {
        self.visible()
            .enumerate()
            .map(|(row, e)| EntryRef { id: e.id, row })
            .collect()
    }
}
