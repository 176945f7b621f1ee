//! Decoding raw terminal input into key events
//!
//! A single read from a raw-mode terminal may hold several keys, escape
//! sequences for arrows and editing keys, ESC-prefixed Alt combinations
//! and control bytes. This turns such a chunk into `KeyEvent`s.

use super::{Key, KeyEvent};

/// CSI / SS3 sequences and the keys they stand for
const ESCAPE_SEQUENCES: &[(&[u8], Key)] = &[
    (b"\x1b[A", Key::ArrowUp),
    (b"\x1b[B", Key::ArrowDown),
    (b"\x1b[C", Key::ArrowRight),
    (b"\x1b[D", Key::ArrowLeft),
    (b"\x1bOA", Key::ArrowUp),
    (b"\x1bOB", Key::ArrowDown),
    (b"\x1bOC", Key::ArrowRight),
    (b"\x1bOD", Key::ArrowLeft),
    (b"\x1b[H", Key::Home),
    (b"\x1b[F", Key::End),
    (b"\x1bOH", Key::Home),
    (b"\x1bOF", Key::End),
    (b"\x1b[1~", Key::Home),
    (b"\x1b[4~", Key::End),
    (b"\x1b[3~", Key::Delete),
    (b"\x1b[5~", Key::PageUp),
    (b"\x1b[6~", Key::PageDown),
];

/// Decode a chunk of terminal input into key events
///
/// Unknown escape sequences are dropped whole rather than leaking their
/// trailing bytes as printable keys.
pub fn decode_keys(input: &[u8]) -> Vec<KeyEvent> {
    let mut events = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        let (event, used) = decode_one(rest);
        if let Some(event) = event {
            events.push(event);
        }
        rest = &rest[used.max(1)..];
    }

    events
}

fn decode_one(input: &[u8]) -> (Option<KeyEvent>, usize) {
    if let Some((seq, key)) = ESCAPE_SEQUENCES.iter().find(|(seq, _)| input.starts_with(seq)) {
        return (Some(KeyEvent::new(key.clone())), seq.len());
    }

    match input[0] {
        0x1b => decode_escape(input),
        b'\r' | b'\n' => (Some(KeyEvent::new(Key::Enter)), 1),
        b'\t' => (Some(KeyEvent::new(Key::Tab)), 1),
        0x08 | 0x7f => (Some(KeyEvent::new(Key::Backspace)), 1),
        // Ctrl+A .. Ctrl+Z
        byte @ 0x01..=0x1a => {
            let letter = (b'a' + byte - 1) as char;
            (Some(KeyEvent::new(Key::Char(letter)).with_ctrl()), 1)
        }
        _ => decode_char(input),
    }
}

fn decode_escape(input: &[u8]) -> (Option<KeyEvent>, usize) {
    match input.get(1) {
        None => (Some(KeyEvent::new(Key::Escape)), 1),
        // Unrecognized CSI: skip to its final byte
        Some(b'[') => {
            let end = input[2..]
                .iter()
                .position(|b| (0x40..=0x7e).contains(b))
                .map(|pos| pos + 3)
                .unwrap_or(input.len());
            (None, end)
        }
        Some(0x1b) => (Some(KeyEvent::new(Key::Escape)), 1),
        Some(_) => {
            let (event, used) = decode_char(&input[1..]);
            (event.map(KeyEvent::with_alt), used + 1)
        }
    }
}

fn decode_char(input: &[u8]) -> (Option<KeyEvent>, usize) {
    let len = utf8_len(input[0]).min(input.len());
    match std::str::from_utf8(&input[..len]).ok().and_then(|s| s.chars().next()) {
        Some(ch) => {
            let mut event = KeyEvent::new(Key::Char(ch));
            if ch.is_uppercase() {
                event = event.with_shift();
            }
            (Some(event), len)
        }
        None => (None, len),
    }
}

fn utf8_len(first: u8) -> usize {
    match first {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => 1,
    }
}
