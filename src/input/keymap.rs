//! Default key bindings for the feed reader

use std::fmt;
use std::str::FromStr;

use super::Key;
use crate::navigation::Direction;
use crate::reader::Page;
use crate::{FeedkeysError, Result};

/// Longest chord a binding may use
pub const MAX_SEQUENCE_LEN: usize = 2;

/// Ordered list of one or two keys
///
/// Parsed from a space-separated string such as `"g u"` or `"ArrowLeft"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeySequence(Vec<Key>);

impl KeySequence {
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First key of the sequence
    pub fn first(&self) -> &Key {
        // Parsing guarantees at least one key
        &self.0[0]
    }

    /// Every key equals the buffered key at the same index
    pub fn is_prefix_of(&self, buffer: &[Key]) -> bool {
        self.0.len() <= buffer.len() && self.0.iter().zip(buffer).all(|(a, b)| a == b)
    }
}

impl FromStr for KeySequence {
    type Err = FeedkeysError;

    fn from_str(s: &str) -> Result<Self> {
        let keys = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<Key>>>()?;

        if keys.is_empty() || keys.len() > MAX_SEQUENCE_LEN {
            return Err(FeedkeysError::InvalidShortcut(format!(
                "{:?} must name 1 to {} keys",
                s, MAX_SEQUENCE_LEN
            )));
        }

        Ok(Self(keys))
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(Key::to_string).collect();
        write!(f, "{}", names.join(" "))
    }
}

/// Action identifier for key bindings
///
/// Each variant is a feed reader command a shortcut can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Pages
    GoToPage(Page),
    GoToFeed,
    GoToFeedOrFeeds,

    // List navigation
    PreviousItem,
    NextItem,
    FirstItem,
    LastItem,
    ScrollToCurrent,

    // Current entry
    OpenSelected,
    OpenOriginal { current_tab: bool },
    OpenComments { current_tab: bool },
    ToggleStatus(Direction),
    SaveEntry,
    ToggleBookmark,
    FetchOriginalContent,
    ToggleEnclosures,

    // Page wide
    MarkPageAsRead,
    RefreshAllFeeds,
    Unsubscribe,

    // Dialogs
    ShowShortcuts,
    CloseModal,
}

impl KeyAction {
    /// Stable name used in the configuration file
    pub fn name(&self) -> String {
        use KeyAction::*;

        match self {
            GoToPage(page) => format!("go_to_{}", page.name()),
            GoToFeed => "go_to_feed".into(),
            GoToFeedOrFeeds => "go_to_feed_or_feeds".into(),
            PreviousItem => "previous_item".into(),
            NextItem => "next_item".into(),
            FirstItem => "first_item".into(),
            LastItem => "last_item".into(),
            ScrollToCurrent => "scroll_to_current".into(),
            OpenSelected => "open_selected".into(),
            OpenOriginal { current_tab: false } => "open_original".into(),
            OpenOriginal { current_tab: true } => "open_original_current_tab".into(),
            OpenComments { current_tab: false } => "open_comments".into(),
            OpenComments { current_tab: true } => "open_comments_current_tab".into(),
            ToggleStatus(Direction::Next) => "toggle_status_next".into(),
            ToggleStatus(Direction::Previous) => "toggle_status_previous".into(),
            SaveEntry => "save_entry".into(),
            ToggleBookmark => "toggle_bookmark".into(),
            FetchOriginalContent => "fetch_original_content".into(),
            ToggleEnclosures => "toggle_enclosures".into(),
            MarkPageAsRead => "mark_page_as_read".into(),
            RefreshAllFeeds => "refresh_all_feeds".into(),
            Unsubscribe => "unsubscribe".into(),
            ShowShortcuts => "show_shortcuts".into(),
            CloseModal => "close_modal".into(),
        }
    }
}

impl FromStr for KeyAction {
    type Err = FeedkeysError;

    fn from_str(s: &str) -> Result<Self> {
        use KeyAction::*;

        let action = match s {
            "go_to_feed" => GoToFeed,
            "go_to_feed_or_feeds" => GoToFeedOrFeeds,
            "previous_item" => PreviousItem,
            "next_item" => NextItem,
            "first_item" => FirstItem,
            "last_item" => LastItem,
            "scroll_to_current" => ScrollToCurrent,
            "open_selected" => OpenSelected,
            "open_original" => OpenOriginal { current_tab: false },
            "open_original_current_tab" => OpenOriginal { current_tab: true },
            "open_comments" => OpenComments { current_tab: false },
            "open_comments_current_tab" => OpenComments { current_tab: true },
            "toggle_status_next" => ToggleStatus(Direction::Next),
            "toggle_status_previous" => ToggleStatus(Direction::Previous),
            "save_entry" => SaveEntry,
            "toggle_bookmark" => ToggleBookmark,
            "fetch_original_content" => FetchOriginalContent,
            "toggle_enclosures" => ToggleEnclosures,
            "mark_page_as_read" => MarkPageAsRead,
            "refresh_all_feeds" => RefreshAllFeeds,
            "unsubscribe" => Unsubscribe,
            "show_shortcuts" => ShowShortcuts,
            "close_modal" => CloseModal,
            other => {
                let page = other
                    .strip_prefix("go_to_")
                    .and_then(|name| name.parse::<Page>().ok())
                    .ok_or_else(|| FeedkeysError::UnknownAction(other.to_string()))?;
                GoToPage(page)
            }
        };

        Ok(action)
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Create the default keymap
///
/// Order matters only for display. No single key here is also the first
/// key of a chord; a chord's second key may be bound on its own.
pub fn create_default_keymap() -> Vec<(&'static str, KeyAction)> {
    use KeyAction::*;

    vec![
        // Page chords (g + letter)
        ("g u", GoToPage(Page::Unread)),
        ("g b", GoToPage(Page::Starred)),
        ("g h", GoToPage(Page::History)),
        ("g f", GoToFeedOrFeeds),
        ("g c", GoToPage(Page::Categories)),
        ("g s", GoToPage(Page::Settings)),
        ("g g", FirstItem),
        ("G", LastItem),
        // Item navigation
        ("ArrowLeft", PreviousItem),
        ("ArrowRight", NextItem),
        ("k", PreviousItem),
        ("p", PreviousItem),
        ("j", NextItem),
        ("n", NextItem),
        ("h", GoToPage(Page::Previous)),
        ("l", GoToPage(Page::Next)),
        ("z t", ScrollToCurrent),
        // Current entry
        ("o", OpenSelected),
        ("Enter", OpenSelected),
        ("v", OpenOriginal { current_tab: false }),
        ("V", OpenOriginal { current_tab: true }),
        ("c", OpenComments { current_tab: false }),
        ("C", OpenComments { current_tab: true }),
        ("m", ToggleStatus(Direction::Next)),
        ("M", ToggleStatus(Direction::Previous)),
        ("A", MarkPageAsRead),
        ("s", SaveEntry),
        ("d", FetchOriginalContent),
        ("f", ToggleBookmark),
        ("F", GoToFeed),
        ("R", RefreshAllFeeds),
        ("?", ShowShortcuts),
        ("+", GoToPage(Page::AddSubscription)),
        ("#", Unsubscribe),
        ("/", GoToPage(Page::Search)),
        ("a", ToggleEnclosures),
        ("Escape", CloseModal),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_parsing() {
        let seq: KeySequence = "g u".parse().unwrap();
        assert_eq!(seq.keys(), &[Key::Char('g'), Key::Char('u')]);
        assert_eq!(seq.to_string(), "g u");

        let seq: KeySequence = "ArrowLeft".parse().unwrap();
        assert_eq!(seq.keys(), &[Key::ArrowLeft]);

        // Extra whitespace is tolerated
        let seq: KeySequence = "  z   t ".parse().unwrap();
        assert_eq!(seq.to_string(), "z t");
    }

    #[test]
    fn test_sequence_length_limits() {
        assert!("".parse::<KeySequence>().is_err());
        assert!("   ".parse::<KeySequence>().is_err());
        assert!("g u x".parse::<KeySequence>().is_err());
    }

    #[test]
    fn test_prefix_match() {
        let seq: KeySequence = "g u".parse().unwrap();
        assert!(seq.is_prefix_of(&[Key::Char('g'), Key::Char('u')]));
        assert!(!seq.is_prefix_of(&[Key::Char('g')]));
        assert!(!seq.is_prefix_of(&[Key::Char('g'), Key::Char('b')]));
    }

    #[test]
    fn test_action_names_round_trip() {
        for (_, action) in create_default_keymap() {
            let parsed: KeyAction = action.name().parse().unwrap();
            assert_eq!(parsed, action);
        }
        assert!("fly_away".parse::<KeyAction>().is_err());
        assert!("go_to_nowhere".parse::<KeyAction>().is_err());
    }

    #[test]
    fn test_no_default_single_key_starts_a_chord() {
        let sequences: Vec<KeySequence> = create_default_keymap()
            .iter()
            .map(|(s, _)| s.parse().unwrap())
            .collect();

        for single in sequences.iter().filter(|s| s.len() == 1) {
            assert!(
                !sequences
                    .iter()
                    .any(|chord| chord.len() == 2 && chord.first() == single.first()),
                "{} is also a chord prefix",
                single
            );
        }
    }
}
