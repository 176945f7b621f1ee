//! Shortcut dispatcher
//!
//! Accumulates key presses into a short sequence buffer and fires the
//! binding whose keys match it. Single-key bindings fire immediately;
//! two-key chords fire on the second key. There is no timeout: a chord
//! attempt is abandoned as soon as the buffer holds two keys that match
//! nothing.

use std::collections::HashSet;

use super::{Key, KeyEvent, KeySequence};
use crate::{FeedkeysError, Result};
use log::{debug, trace, warn};

/// Callback bound to a key sequence
///
/// `C` is whatever context the host hands to the dispatcher on each key.
pub type ShortcutAction<C> = Box<dyn FnMut(&KeyEvent, &mut C) -> Result<()>>;

/// What happened to a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Not for us: text field focus, command modifier, or not a trigger
    Ignored,
    /// Buffered, waiting for the second key of a chord
    Pending,
    /// A binding fired
    Handled,
    /// Two keys buffered that match nothing; buffer cleared
    Abandoned,
}

/// Result of handling one key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub dispatch: Dispatch,
    /// The host should suppress its own handling of the key
    pub default_prevented: bool,
}

impl DispatchOutcome {
    fn ignored() -> Self {
        Self {
            dispatch: Dispatch::Ignored,
            default_prevented: false,
        }
    }
}

struct Binding<C> {
    sequence: KeySequence,
    action: ShortcutAction<C>,
}

/// Keyboard shortcut dispatcher
///
/// A binding whose whole sequence equals the typed keys wins over a
/// single-key binding on the last key, whatever the registration order.
/// Overlapping a single key with the first key of a chord is rejected at
/// registration.
pub struct ShortcutDispatcher<C> {
    /// Registered bindings, in registration order
    bindings: Vec<Binding<C>>,

    /// First keys of all bindings
    triggers: HashSet<Key>,

    /// Keys pressed so far in the current sequence
    queue: Vec<Key>,

    /// Set by `start`; events are ignored until then
    listening: bool,

    /// Let Enter keep its default handling in the host
    enter_passthrough: bool,
}

impl<C> ShortcutDispatcher<C> {
    /// Create a dispatcher with no bindings
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            triggers: HashSet::new(),
            queue: Vec::new(),
            listening: false,
            enter_passthrough: false,
        }
    }

    /// Let Enter fall through to the host's default handling
    pub fn set_enter_passthrough(&mut self, enabled: bool) {
        self.enter_passthrough = enabled;
    }

    /// Bind a space-separated key sequence to an action
    ///
    /// Registering the same sequence again replaces the earlier action.
    /// A single key that is also the first key of a chord (or the reverse)
    /// is rejected.
    pub fn register<F>(&mut self, sequence: &str, action: F) -> Result<()>
    where
        F: FnMut(&KeyEvent, &mut C) -> Result<()> + 'static,
    {
        let sequence: KeySequence = sequence.parse()?;

        if let Some(existing) = self.bindings.iter_mut().find(|b| b.sequence == sequence) {
            debug!("Replacing binding for \"{}\"", sequence);
            existing.action = Box::new(action);
            return Ok(());
        }

        if let Some(existing) = self.bindings.iter().find(|b| overlaps(&b.sequence, &sequence)) {
            return Err(FeedkeysError::ShortcutConflict {
                sequence: sequence.to_string(),
                existing: existing.sequence.to_string(),
            });
        }

        trace!("Registering binding \"{}\"", sequence);
        self.triggers.insert(sequence.first().clone());
        self.bindings.push(Binding {
            sequence,
            action: Box::new(action),
        });
        Ok(())
    }

    /// Start accepting key events
    pub fn start(&mut self) {
        if self.listening {
            warn!("Shortcut dispatcher already started");
            return;
        }
        debug!(
            "Shortcut dispatcher listening with {} bindings",
            self.bindings.len()
        );
        self.listening = true;
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Process one key-down event
    ///
    /// Fires at most one action. Errors from the action are returned as-is;
    /// the buffer has already been cleared by then.
    pub fn handle_key(&mut self, event: &KeyEvent, ctx: &mut C) -> Result<DispatchOutcome> {
        if !self.listening || self.is_ignored(event) {
            trace!("Ignoring key {}", event.key);
            return Ok(DispatchOutcome::ignored());
        }

        let default_prevented = !(self.enter_passthrough && event.key == Key::Enter);
        self.queue.push(event.key.clone());

        let matched = self.find_binding(&event.key);

        let dispatch = match matched {
            Some(idx) => {
                self.queue.clear();
                let binding = &mut self.bindings[idx];
                debug!("Shortcut \"{}\" triggered", binding.sequence);
                (binding.action)(event, ctx)?;
                Dispatch::Handled
            }
            None if self.queue.len() >= 2 => {
                trace!("No binding for {:?}, clearing buffer", self.queue);
                self.queue.clear();
                Dispatch::Abandoned
            }
            None => Dispatch::Pending,
        };

        Ok(DispatchOutcome {
            dispatch,
            default_prevented,
        })
    }

    /// A binding whose whole sequence equals the buffer, else a single-key
    /// binding on the key just pressed
    fn find_binding(&self, pressed: &Key) -> Option<usize> {
        let queue = &self.queue;
        self.bindings
            .iter()
            .position(|b| b.sequence.len() == queue.len() && b.sequence.is_prefix_of(queue))
            .or_else(|| {
                self.bindings
                    .iter()
                    .position(|b| b.sequence.len() == 1 && b.sequence.first() == pressed)
            })
    }

    fn is_ignored(&self, event: &KeyEvent) -> bool {
        event.target.is_text_entry()
            || event.modifiers.has_command_modifier()
            || (self.queue.is_empty() && !self.triggers.contains(&event.key))
    }

    /// Drop any partially typed chord
    pub fn reset(&mut self) {
        self.queue.clear();
    }

    /// Keys buffered for an unfinished chord
    pub fn pending_keys(&self) -> &[Key] {
        &self.queue
    }

    /// Registered sequences, in registration order
    pub fn sequences(&self) -> impl Iterator<Item = &KeySequence> {
        self.bindings.iter().map(|b| &b.sequence)
    }

    pub fn is_trigger(&self, key: &Key) -> bool {
        self.triggers.contains(key)
    }

    /// Get the number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<C> Default for ShortcutDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// A single key that also starts a chord
fn overlaps(a: &KeySequence, b: &KeySequence) -> bool {
    a.len() != b.len() && a.first() == b.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::FocusTarget;

    fn recorder(name: &'static str) -> impl FnMut(&KeyEvent, &mut Vec<&'static str>) -> Result<()> {
        move |_: &KeyEvent, fired: &mut Vec<&'static str>| {
            fired.push(name);
            Ok(())
        }
    }

    fn started() -> ShortcutDispatcher<Vec<&'static str>> {
        let mut dispatcher = ShortcutDispatcher::new();
        dispatcher.register("g u", recorder("unread")).unwrap();
        dispatcher.register("u", recorder("update")).unwrap();
        dispatcher.register("j", recorder("next")).unwrap();
        dispatcher.start();
        dispatcher
    }

    fn press(
        d: &mut ShortcutDispatcher<Vec<&'static str>>,
        fired: &mut Vec<&'static str>,
        label: &str,
    ) -> Dispatch {
        d.handle_key(&KeyEvent::from_label(label), fired).unwrap().dispatch
    }

    #[test]
    fn test_not_listening_before_start() {
        let mut dispatcher: ShortcutDispatcher<Vec<&'static str>> = ShortcutDispatcher::new();
        dispatcher.register("j", recorder("next")).unwrap();
        let mut fired = Vec::new();

        assert_eq!(press(&mut dispatcher, &mut fired, "j"), Dispatch::Ignored);
        assert!(fired.is_empty());

        dispatcher.start();
        dispatcher.start();
        assert!(dispatcher.is_listening());
        assert_eq!(press(&mut dispatcher, &mut fired, "j"), Dispatch::Handled);
        assert_eq!(fired, vec!["next"]);
    }

    #[test]
    fn test_chord_then_single() {
        let mut dispatcher = started();
        let mut fired = Vec::new();

        assert_eq!(press(&mut dispatcher, &mut fired, "g"), Dispatch::Pending);
        assert_eq!(dispatcher.pending_keys(), &[Key::Char('g')]);
        assert_eq!(press(&mut dispatcher, &mut fired, "u"), Dispatch::Handled);
        assert_eq!(fired, vec!["unread"]);
        assert!(dispatcher.pending_keys().is_empty());

        assert_eq!(press(&mut dispatcher, &mut fired, "u"), Dispatch::Handled);
        assert_eq!(fired, vec!["unread", "update"]);
    }

    #[test]
    fn test_chord_wins_over_earlier_single_key() {
        let mut dispatcher: ShortcutDispatcher<Vec<&'static str>> = ShortcutDispatcher::new();
        dispatcher.register("u", recorder("update")).unwrap();
        dispatcher.register("g u", recorder("unread")).unwrap();
        dispatcher.start();
        let mut fired = Vec::new();

        press(&mut dispatcher, &mut fired, "g");
        assert_eq!(press(&mut dispatcher, &mut fired, "u"), Dispatch::Handled);
        assert_eq!(fired, vec!["unread"]);

        press(&mut dispatcher, &mut fired, "u");
        assert_eq!(fired, vec!["unread", "update"]);
    }

    #[test]
    fn test_single_key_completes_after_unfinished_chord() {
        let mut dispatcher = started();
        let mut fired = Vec::new();

        press(&mut dispatcher, &mut fired, "g");
        assert_eq!(press(&mut dispatcher, &mut fired, "j"), Dispatch::Handled);
        assert_eq!(fired, vec!["next"]);
        assert!(dispatcher.pending_keys().is_empty());
    }

    #[test]
    fn test_abandoned_chord() {
        let mut dispatcher = started();
        let mut fired = Vec::new();

        press(&mut dispatcher, &mut fired, "g");
        assert_eq!(press(&mut dispatcher, &mut fired, "x"), Dispatch::Abandoned);
        assert!(fired.is_empty());
        assert!(dispatcher.pending_keys().is_empty());
    }

    #[test]
    fn test_text_field_and_modifiers_leave_buffer_alone() {
        let mut dispatcher = started();
        let mut fired = Vec::new();
        press(&mut dispatcher, &mut fired, "g");

        let in_field = KeyEvent::from_label("u").in_target(FocusTarget::TextArea);
        let outcome = dispatcher.handle_key(&in_field, &mut fired).unwrap();
        assert_eq!(outcome.dispatch, Dispatch::Ignored);
        assert!(!outcome.default_prevented);

        let with_ctrl = KeyEvent::from_label("u").with_ctrl();
        assert_eq!(
            dispatcher.handle_key(&with_ctrl, &mut fired).unwrap().dispatch,
            Dispatch::Ignored
        );

        assert_eq!(dispatcher.pending_keys(), &[Key::Char('g')]);
        assert!(fired.is_empty());
    }

    #[test]
    fn test_replace_and_conflict() {
        let mut dispatcher = started();
        let mut fired = Vec::new();

        dispatcher.register("j", recorder("replaced")).unwrap();
        assert_eq!(dispatcher.len(), 3);
        press(&mut dispatcher, &mut fired, "j");
        assert_eq!(fired, vec!["replaced"]);

        let err = dispatcher.register("g", recorder("g")).unwrap_err();
        assert!(matches!(err, FeedkeysError::ShortcutConflict { .. }));
        let err = dispatcher.register("j k", recorder("jk")).unwrap_err();
        assert!(matches!(err, FeedkeysError::ShortcutConflict { .. }));
        assert_eq!(dispatcher.len(), 3);
    }

    #[test]
    fn test_enter_passthrough() {
        let mut dispatcher: ShortcutDispatcher<Vec<&'static str>> = ShortcutDispatcher::new();
        dispatcher.register("Enter", recorder("open")).unwrap();
        dispatcher.start();
        let mut fired = Vec::new();

        let outcome = dispatcher.handle_key(&KeyEvent::from_label("Enter"), &mut fired).unwrap();
        assert!(outcome.default_prevented);

        dispatcher.set_enter_passthrough(true);
        let outcome = dispatcher.handle_key(&KeyEvent::from_label("Enter"), &mut fired).unwrap();
        assert_eq!(outcome.dispatch, Dispatch::Handled);
        assert!(!outcome.default_prevented);
        assert_eq!(fired, vec!["open", "open"]);
    }
}
