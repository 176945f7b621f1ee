//! Prompt buffer for collecting text input
//!
//! Used when the host needs a line of text from the user (e.g. a search
//! query). While a prompt is open the host reports text-field focus, so
//! shortcuts stay out of the way.

use super::{Key, KeyEvent};
use log::debug;

/// What a key did to the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    /// Input changed or the key was swallowed
    Editing,
    /// Enter pressed; carries the collected text
    Accepted(String),
    /// Escape pressed; input discarded
    Cancelled,
}

/// Single-line text field
pub struct PromptBuffer {
    /// Label shown before the input
    label: String,

    /// Accumulated input buffer
    buffer: String,
}

impl PromptBuffer {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            buffer: String::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the current buffer contents
    pub fn contents(&self) -> &str {
        &self.buffer
    }

    /// Feed one key event to the prompt
    pub fn process(&mut self, event: &KeyEvent) -> PromptAction {
        match &event.key {
            Key::Enter => {
                debug!("Prompt: accepting input '{}'", self.buffer);
                PromptAction::Accepted(std::mem::take(&mut self.buffer))
            }
            Key::Escape => {
                debug!("Prompt: cancelled");
                self.buffer.clear();
                PromptAction::Cancelled
            }
            Key::Backspace => {
                self.buffer.pop();
                PromptAction::Editing
            }
            Key::Char(ch) if !event.modifiers.has_command_modifier() => {
                self.buffer.push(*ch);
                PromptAction::Editing
            }
            _ => PromptAction::Editing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(prompt: &mut PromptBuffer, labels: &[&str]) -> PromptAction {
        let mut last = PromptAction::Editing;
        for label in labels {
            last = prompt.process(&KeyEvent::from_label(label));
        }
        last
    }

    #[test]
    fn test_accept() {
        let mut prompt = PromptBuffer::new("Search");
        assert_eq!(feed(&mut prompt, &["r", "u", "x", "Backspace", "s", "t"]), PromptAction::Editing);
        assert_eq!(prompt.contents(), "rust");
        assert_eq!(feed(&mut prompt, &["Enter"]), PromptAction::Accepted("rust".to_string()));
        assert!(prompt.contents().is_empty());
    }

    #[test]
    fn test_cancel_and_modifiers() {
        let mut prompt = PromptBuffer::new("Search");
        prompt.process(&KeyEvent::from_label("a"));
        prompt.process(&KeyEvent::from_label("b").with_ctrl());
        assert_eq!(prompt.contents(), "a");

        assert_eq!(feed(&mut prompt, &["Esc"]), PromptAction::Cancelled);
        assert!(prompt.contents().is_empty());
    }
}
