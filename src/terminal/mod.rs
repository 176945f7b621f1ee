//! Terminal front end for the reader

pub mod host;
pub mod render;
pub mod util;
pub mod viewport;

pub use host::TerminalHost;
pub use util::{get_terminal_size, restore_termios, set_raw_mode, TermiosGuard};
pub use viewport::TerminalViewport;

use crate::reader::{InMemoryEntryService, ReaderSession};

/// Reader session as run in the terminal
pub type TerminalSession = ReaderSession<TerminalHost, InMemoryEntryService, TerminalViewport>;
