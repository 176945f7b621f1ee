//! feedkeys main entry point
//!
//! Lists feed entries in the terminal and drives them with the reader's
//! keyboard shortcuts. The main loop monitors two sources:
//! 1. stdin (user keyboard input) - decoded and dispatched
//! 2. Signals (SIGWINCH for resize) - updates the viewport

use anyhow::{anyhow, Context};
use feedkeys::config::Config;
use feedkeys::input::{
    create_default_keymap, decode_keys, Dispatch, Key, KeyEvent, KeySequence, PromptAction,
    ShortcutDispatcher,
};
use feedkeys::reader::{
    bind_action, bind_keymap, EntryList, InMemoryEntryService, Page, ReaderHost, ReaderSession,
};
use feedkeys::terminal::{
    get_terminal_size, render, TerminalHost, TerminalSession, TerminalViewport, TermiosGuard,
};
use log::{debug, error, info, warn};
use mio::{Events, Interest, Poll, Token};
use nix::libc;
use nix::sys::signal::{self, SigHandler, Signal};
use std::io::{self, Read};
use std::os::unix::io::AsRawFd;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Token for stdin in mio poll
const STDIN: Token = Token(0);

/// Rows taken by the header and the status line
const CHROME_ROWS: u16 = 2;

/// Global flag set by SIGWINCH handler
static RESIZE_PENDING: AtomicBool = AtomicBool::new(false);

/// SIGWINCH handler - sets flag when terminal is resized
extern "C" fn handle_sigwinch(_: libc::c_int) {
    RESIZE_PENDING.store(true, Ordering::Relaxed);
}

/// Whether the main loop keeps going after a chunk of input
enum Flow {
    Continue,
    Quit,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Raw mode owns the terminal, so debug output goes to a file
    if debug_mode {
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("feedkeys.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: could not open feedkeys.log: {}", e);
                env_logger::Builder::from_default_env()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "feedkeys version {} starting (debug mode, logging to feedkeys.log)",
            feedkeys::VERSION
        );
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    if let Err(e) = run() {
        error!("Fatal error: {:#}", e);
        eprintln!("{}: {:#}", feedkeys::APP_NAME, e);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let stdin_fd = io::stdin().as_raw_fd();
    if unsafe { libc::isatty(stdin_fd) } == 0 {
        eprintln!("Error: feedkeys requires an interactive terminal (stdin is not a TTY)");
        eprintln!("Usage: feedkeys [--debug] [entries.json]");
        process::exit(1);
    }

    let config = Config::load().context("loading configuration")?;
    info!("Configuration loaded from {:?}", config.path());

    // Entries file: first positional argument, else the config setting
    let entries_path = std::env::args()
        .skip(1)
        .find(|arg| arg != "--debug" && arg != "-d")
        .map(PathBuf::from)
        .or_else(|| config.entries_file())
        .ok_or_else(|| anyhow!("no entries file given and none configured"))?;
    let entries = EntryList::load(&entries_path)
        .with_context(|| format!("loading entries from {}", entries_path.display()))?;
    info!("{} entries loaded", entries.len());

    let (mut cols, mut rows) = get_terminal_size(stdin_fd)?;
    info!("Terminal size: {}x{}", cols, rows);

    let service = InMemoryEntryService::new(entries.entries());
    let host = TerminalHost::new(Page::Unread, config.show_only_unread());
    let viewport = TerminalViewport::new(rows.saturating_sub(CHROME_ROWS) as usize);
    let mut session = ReaderSession::new(entries, viewport, host, service);

    let mut dispatcher: ShortcutDispatcher<TerminalSession> = ShortcutDispatcher::new();
    dispatcher.set_enter_passthrough(config.enter_passthrough());
    bind_keymap(&mut dispatcher, create_default_keymap())?;
    for (sequence, action) in &config.shortcuts {
        if let Err(e) = bind_action(&mut dispatcher, &sequence.to_string(), *action) {
            warn!("Skipping shortcut override: {}", e);
        }
    }
    if config.keyboard_shortcuts() {
        dispatcher.start();
    } else {
        info!("Keyboard shortcuts disabled in configuration");
    }
    let bindings: Vec<KeySequence> = dispatcher.sequences().cloned().collect();
    let title = config.title();

    unsafe {
        signal::signal(Signal::SIGWINCH, SigHandler::Handler(handle_sigwinch))
            .context("installing SIGWINCH handler")?;
    }

    let mut poll = Poll::new()?;
    let mut events = Events::with_capacity(16);
    poll.registry()
        .register(&mut mio::unix::SourceFd(&stdin_fd), STDIN, Interest::READABLE)?;

    let _guard = TermiosGuard::raw(stdin_fd)?;
    let mut stdout = io::stdout();
    render::draw(&mut stdout, &session, &title, &bindings, cols, rows)?;

    info!("feedkeys ready - entering event loop");
    loop {
        if RESIZE_PENDING.swap(false, Ordering::Relaxed) {
            (cols, rows) = get_terminal_size(stdin_fd)?;
            info!("Terminal resized to {}x{}", cols, rows);
            session
                .navigator
                .viewport_mut()
                .resize(rows.saturating_sub(CHROME_ROWS) as usize);
            render::draw(&mut stdout, &session, &title, &bindings, cols, rows)?;
        }

        if let Err(e) = poll.poll(&mut events, Some(Duration::from_millis(100))) {
            if e.kind() == io::ErrorKind::Interrupted {
                debug!("poll() interrupted by signal");
                continue;
            }
            return Err(e.into());
        }

        for event in events.iter() {
            if event.token() != STDIN {
                continue;
            }
            if let Flow::Quit = handle_stdin(&mut session, &mut dispatcher)? {
                info!("Quit requested");
                return Ok(());
            }
            render::draw(&mut stdout, &session, &title, &bindings, cols, rows)?;
        }
    }
}

/// Handle user input from stdin
///
/// Keys go to the shortcut dispatcher first; keys it ignores while the
/// search prompt has focus are typed into the prompt.
fn handle_stdin(
    session: &mut TerminalSession,
    dispatcher: &mut ShortcutDispatcher<TerminalSession>,
) -> anyhow::Result<Flow> {
    let mut buf = [0u8; 1024];

    let n = io::stdin().read(&mut buf)?;
    if n == 0 {
        return Ok(Flow::Quit);
    }

    for event in decode_keys(&buf[..n]) {
        if event.modifiers.ctrl && event.key == Key::Char('c') {
            return Ok(Flow::Quit);
        }

        let event = event.in_target(session.host.focus_target());
        let dispatch = match dispatcher.handle_key(&event, session) {
            Ok(outcome) => outcome.dispatch,
            Err(e) => {
                // A failing action must not stop the loop
                error!("Shortcut action failed: {}", e);
                session.host.notify(&e.to_string());
                continue;
            }
        };

        if dispatch == Dispatch::Ignored && session.host.prompt.is_some() {
            handle_prompt_key(session, &event);
        }
    }

    Ok(Flow::Continue)
}

fn handle_prompt_key(session: &mut TerminalSession, event: &KeyEvent) {
    let Some(prompt) = session.host.prompt.as_mut() else {
        return;
    };

    match prompt.process(event) {
        PromptAction::Editing => {}
        PromptAction::Accepted(query) => {
            session.host.prompt = None;
            let shown = session.navigator.source_mut().apply_filter(&query);
            session.host.notify(&format!("{} entries match \"{}\"", shown, query));
        }
        PromptAction::Cancelled => {
            session.host.prompt = None;
        }
    }
}
