//! Drawing the reader on an ANSI terminal

use std::io::Write;

use unicode_width::UnicodeWidthChar;

use super::TerminalSession;
use crate::input::KeySequence;
use crate::reader::{Entry, EntryStatus, Modal, ReaderHost};
use crate::Result;

const CLEAR: &str = "\x1b[2J\x1b[H";
const REVERSE: &str = "\x1b[7m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Cut `text` to at most `width` terminal columns
pub fn fit(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::with_capacity(text.len().min(width * 4));
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// One list row for an entry
fn entry_line(entry: &Entry) -> String {
    let status = match entry.status {
        EntryStatus::Unread => '*',
        EntryStatus::Read => ' ',
        EntryStatus::Removed => 'x',
    };
    let star = if entry.starred { '+' } else { ' ' };
    format!("{}{} {}", status, star, entry.title)
}

/// Redraw the whole screen
///
/// `title` may carry a "(N)" unread count; it is rewritten from the
/// session's counter. `bindings` feeds the shortcuts dialog.
pub fn draw<W: Write>(
    out: &mut W,
    session: &TerminalSession,
    title: &str,
    bindings: &[KeySequence],
    cols: u16,
    rows: u16,
) -> Result<()> {
    let width = cols as usize;
    let mut lines: Vec<String> = Vec::with_capacity(rows as usize);

    let host = &session.host;
    let header = format!(
        "{} | {}",
        session.counter.retitle(title),
        host.current_feed()
            .map(|id| format!("feed {}", id))
            .unwrap_or_else(|| host.page().to_string())
    );
    lines.push(format!("{}{}{}", BOLD, fit(&header, width), RESET));

    if let Some(Modal::KeyboardShortcuts) = host.modal {
        lines.push("Keyboard shortcuts (Escape to close)".to_string());
        lines.extend(bindings.iter().map(|seq| fit(&format!("  {}", seq), width)));
    } else if let Some(entry) = &host.detail {
        lines.push(fit(&entry.title, width));
        lines.push(fit(&entry.url, width));
        if let Some(comments) = &entry.comments_url {
            lines.push(fit(&format!("Comments: {}", comments), width));
        }
        if entry.has_enclosures {
            let state = if host.enclosures_open { "open" } else { "closed" };
            lines.push(format!("Enclosures: {}", state));
        }
    } else {
        let visible: Vec<&Entry> = session.entries().visible().collect();
        let current = session.navigator.current().map(|r| r.id);
        for row in session.navigator.viewport().rows(visible.len()) {
            let entry = visible[row];
            let line = fit(&entry_line(entry), width.saturating_sub(2));
            if Some(entry.id) == current {
                lines.push(format!("{}> {}{}", REVERSE, line, RESET));
            } else {
                lines.push(format!("  {}", line));
            }
        }
    }

    let body_rows = (rows as usize).saturating_sub(1);
    lines.truncate(body_rows);
    lines.resize(body_rows, String::new());

    let status = match (&host.prompt, &host.message) {
        (Some(prompt), _) => format!("{}: {}", prompt.label(), prompt.contents()),
        (None, Some(message)) => message.clone(),
        (None, None) => String::new(),
    };
    lines.push(fit(&status, width));

    write!(out, "{}{}", CLEAR, lines.join("\r\n"))?;
    out.flush()?;
    Ok(())
}
