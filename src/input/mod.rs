//! Input handling and key bindings
//!
//! Key events flow from the host into the `ShortcutDispatcher`, which
//! matches them against registered sequences and runs the bound action.
//! Text prompts take over while they have focus.

pub mod dispatcher;
pub mod key;
pub mod keymap;
pub mod prompt;
pub mod terminal_keys;

pub use dispatcher::{Dispatch, DispatchOutcome, ShortcutAction, ShortcutDispatcher};
pub use key::{FocusTarget, Key, KeyEvent, Modifiers};
pub use keymap::{create_default_keymap, KeyAction, KeySequence, MAX_SEQUENCE_LEN};
pub use prompt::{PromptAction, PromptBuffer};
pub use terminal_keys::decode_keys;
