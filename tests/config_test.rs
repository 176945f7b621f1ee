//! Configuration tests
//!
//! Tests config file creation, settings and shortcut overrides

use std::fs;

use feedkeys::config::Config;
use feedkeys::input::{KeyAction, KeySequence};
use feedkeys::reader::Page;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("feedkeys.cfg");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_missing_file_is_created_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("feedkeys.cfg");

    let config = Config::load_from(&path).unwrap();

    assert!(path.exists());
    assert!(config.keyboard_shortcuts());
    assert!(!config.enter_passthrough());
    assert!(!config.show_only_unread());
    assert_eq!(config.entries_file(), None);
    assert_eq!(config.title(), "Unread (0)");
    assert!(config.shortcuts.is_empty());

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("keyboard_shortcuts"));
}

#[test]
fn test_general_settings() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "[general]\n\
         keyboard_shortcuts = false\n\
         enter_passthrough = true\n\
         show_only_unread = true\n\
         entries_file = /tmp/entries.json\n\
         title = Inbox (12) - reader\n",
    );

    let config = Config::load_from(&path).unwrap();

    assert!(!config.keyboard_shortcuts());
    assert!(config.enter_passthrough());
    assert!(config.show_only_unread());
    assert_eq!(
        config.entries_file(),
        Some(std::path::PathBuf::from("/tmp/entries.json"))
    );
    assert_eq!(config.title(), "Inbox (12) - reader");
}

#[test]
fn test_bad_boolean_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[general]\nkeyboard_shortcuts = maybe\n");

    let config = Config::load_from(&path).unwrap();
    assert!(config.keyboard_shortcuts());
}

#[test]
fn test_shortcut_overrides() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "[shortcuts]\n\
         next_item = J, Down\n\
         go_to_starred = g s\n\
         toggle_bookmark = *\n",
    );

    let config = Config::load_from(&path).unwrap();

    let expected: Vec<(KeySequence, KeyAction)> = vec![
        ("J".parse().unwrap(), KeyAction::NextItem),
        ("ArrowDown".parse().unwrap(), KeyAction::NextItem),
        ("g s".parse().unwrap(), KeyAction::GoToPage(Page::Starred)),
        ("*".parse().unwrap(), KeyAction::ToggleBookmark),
    ];
    assert_eq!(config.shortcuts, expected);
}

#[test]
fn test_override_labels_are_normalized() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "[shortcuts]\n\
         close_modal = Esc\n\
         next_item = g Spacebar\n",
    );

    let config = Config::load_from(&path).unwrap();

    let expected: Vec<(KeySequence, KeyAction)> = vec![
        ("Escape".parse().unwrap(), KeyAction::CloseModal),
        ("g Space".parse().unwrap(), KeyAction::NextItem),
    ];
    assert_eq!(config.shortcuts, expected);
}

#[test]
fn test_invalid_overrides_are_skipped() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "[shortcuts]\n\
         launch_rockets = r\n\
         previous_item = a b c, K\n\
         refresh_all_feeds = ,\n",
    );

    let config = Config::load_from(&path).unwrap();

    let expected: Vec<(KeySequence, KeyAction)> =
        vec![("K".parse().unwrap(), KeyAction::PreviousItem)];
    assert_eq!(config.shortcuts, expected);
}

#[test]
fn test_set_and_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("feedkeys.cfg");

    let mut config = Config::load_from(&path).unwrap();
    config.set("general", "enter_passthrough", "true");
    config.save().unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert!(reloaded.enter_passthrough());
}
