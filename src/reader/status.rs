//! Entry status requests and the unread counter

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::EntryStatus;

/// "Unread (12)" style page titles
static TITLE_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\((\d+)\)(.*)$").expect("valid title regex"));

/// Body of a status change request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntriesStatusRequest {
    pub entry_ids: Vec<i64>,
    pub status: EntryStatus,
}

impl EntriesStatusRequest {
    pub fn new(entry_ids: Vec<i64>, status: EntryStatus) -> Self {
        Self { entry_ids, status }
    }
}

/// Unread entry count shown in the page header and title
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnreadCounter {
    value: i64,
}

impl UnreadCounter {
    pub fn new(value: i64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Apply the count a status request reported as affected
    pub fn apply(&mut self, status: EntryStatus, count: u64) {
        let count = count as i64;
        match status {
            EntryStatus::Read => self.value -= count,
            _ => self.value += count,
        }
    }

    /// Rewrite the "(N)" part of a page title with the current value
    ///
    /// Titles without a count are returned unchanged.
    pub fn retitle(&self, title: &str) -> String {
        match TITLE_COUNT.captures(title) {
            Some(caps) => format!("{}({}){}", &caps[1], self.value, &caps[3]),
            None => title.to_string(),
        }
    }

    /// Read the count out of a "(N)" page title
    pub fn from_title(title: &str) -> Option<Self> {
        let caps = TITLE_COUNT.captures(title)?;
        caps[2].parse().ok().map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let body = serde_json::to_string(&EntriesStatusRequest::new(vec![1, 2], EntryStatus::Read)).unwrap();
        assert_eq!(body, r#"{"entry_ids":[1,2],"status":"read"}"#);
    }

    #[test]
    fn test_counter_apply() {
        let mut counter = UnreadCounter::new(10);
        counter.apply(EntryStatus::Read, 3);
        assert_eq!(counter.value(), 7);
        counter.apply(EntryStatus::Unread, 1);
        assert_eq!(counter.value(), 8);
    }

    #[test]
    fn test_retitle() {
        let counter = UnreadCounter::new(4);
        assert_eq!(counter.retitle("Unread (12) - Miniflux"), "Unread (4) - Miniflux");
        assert_eq!(counter.retitle("Starred"), "Starred");
    }

    #[test]
    fn test_from_title() {
        assert_eq!(UnreadCounter::from_title("Unread (12)"), Some(UnreadCounter::new(12)));
        assert_eq!(UnreadCounter::from_title("Unread"), None);
    }
}
