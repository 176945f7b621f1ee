//! Key symbols and key-down events
//!
//! Keys are symbolic names rather than raw scan codes. Event labels coming
//! from a host are normalized (e.g. "Esc" becomes "Escape") before they are
//! matched against registered shortcuts; registration strings must already
//! use the canonical names.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::{FeedkeysError, Result};

/// Legacy or platform specific key labels and their canonical names
static KEY_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("Esc", "Escape");
    m.insert("Up", "ArrowUp");
    m.insert("Down", "ArrowDown");
    m.insert("Left", "ArrowLeft");
    m.insert("Right", "ArrowRight");
    m.insert("Del", "Delete");
    m.insert("Spacebar", " ");
    m
});

/// A symbolic key name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character, case sensitive ("g" and "G" differ)
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    /// Any other named key ("F1", "Shift", ...)
    Named(String),
}

impl Key {
    /// Build a key from a canonical name
    ///
    /// A single character is a `Char`, "Space" is the space bar,
    /// known names map to their variants and anything else is `Named`.
    pub fn from_name(name: &str) -> Self {
        let mut chars = name.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Key::Char(ch);
        }

        match name {
            "Space" => Key::Char(' '),
            "Enter" => Key::Enter,
            "Escape" => Key::Escape,
            "Tab" => Key::Tab,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            other => Key::Named(other.to_string()),
        }
    }

    /// Build a key from an event label, normalizing platform variants
    pub fn from_label(label: &str) -> Self {
        let canonical = KEY_ALIASES.get(label).copied().unwrap_or(label);
        Self::from_name(canonical)
    }
}

impl FromStr for Key {
    type Err = FeedkeysError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(FeedkeysError::InvalidShortcut(format!(
                "invalid key name {:?}",
                s
            )));
        }
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(' ') => write!(f, "Space"),
            Key::Char(ch) => write!(f, "{}", ch),
            Key::Enter => write!(f, "Enter"),
            Key::Escape => write!(f, "Escape"),
            Key::Tab => write!(f, "Tab"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Delete => write!(f, "Delete"),
            Key::ArrowUp => write!(f, "ArrowUp"),
            Key::ArrowDown => write!(f, "ArrowDown"),
            Key::ArrowLeft => write!(f, "ArrowLeft"),
            Key::ArrowRight => write!(f, "ArrowRight"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::PageUp => write!(f, "PageUp"),
            Key::PageDown => write!(f, "PageDown"),
            Key::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    /// Ctrl, Alt or Meta is held
    ///
    /// Shift is not a command modifier: it only changes the key symbol.
    pub fn has_command_modifier(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Where keyboard focus was when the key was pressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusTarget {
    /// Nothing in particular has focus
    #[default]
    Document,
    /// A non-editable element (list item, link, button)
    Element,
    /// A single-line text field
    TextInput,
    /// A multi-line text field
    TextArea,
}

impl FocusTarget {
    /// Keys typed here belong to the field, not to shortcuts
    pub fn is_text_entry(&self) -> bool {
        matches!(self, FocusTarget::TextInput | FocusTarget::TextArea)
    }
}

/// A single key-down event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub target: FocusTarget,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            target: FocusTarget::Document,
        }
    }

    /// Event for a raw host label such as "Esc" or "g"
    pub fn from_label(label: &str) -> Self {
        Self::new(Key::from_label(label))
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn in_target(mut self, target: FocusTarget) -> Self {
        self.target = target;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_normalization() {
        assert_eq!(Key::from_label("Esc"), Key::Escape);
        assert_eq!(Key::from_label("Left"), Key::ArrowLeft);
        assert_eq!(Key::from_label("Right"), Key::ArrowRight);
        assert_eq!(Key::from_label("Up"), Key::ArrowUp);
        assert_eq!(Key::from_label("Down"), Key::ArrowDown);
        assert_eq!(Key::from_label("Spacebar"), Key::Char(' '));

        // Canonical labels pass through
        assert_eq!(Key::from_label("Escape"), Key::Escape);
        assert_eq!(Key::from_label("G"), Key::Char('G'));
    }

    #[test]
    fn test_canonical_names_are_not_aliased() {
        // "Esc" is a label variant, not a canonical name
        assert_eq!(Key::from_name("Esc"), Key::Named("Esc".to_string()));
        assert_ne!(Key::from_name("Esc"), Key::from_label("Esc"));
    }

    #[test]
    fn test_parse_and_display() {
        let key: Key = "ArrowLeft".parse().unwrap();
        assert_eq!(key, Key::ArrowLeft);
        assert_eq!(key.to_string(), "ArrowLeft");

        let space: Key = "Space".parse().unwrap();
        assert_eq!(space, Key::Char(' '));
        assert_eq!(space.to_string(), "Space");

        assert_eq!("Esc".parse::<Key>().unwrap(), Key::Named("Esc".to_string()));
        assert!("".parse::<Key>().is_err());
    }

    #[test]
    fn test_command_modifiers() {
        let event = KeyEvent::from_label("a").with_shift();
        assert!(!event.modifiers.has_command_modifier());

        assert!(KeyEvent::from_label("a").with_ctrl().modifiers.has_command_modifier());
        assert!(KeyEvent::from_label("a").with_alt().modifiers.has_command_modifier());
        assert!(KeyEvent::from_label("a").with_meta().modifiers.has_command_modifier());
    }

    #[test]
    fn test_text_entry_targets() {
        assert!(FocusTarget::TextInput.is_text_entry());
        assert!(FocusTarget::TextArea.is_text_entry());
        assert!(!FocusTarget::Document.is_text_entry());
        assert!(!FocusTarget::Element.is_text_entry());
    }
}
