//! Configuration management

use crate::input::{Key, KeyAction, KeySequence};
use crate::{FeedkeysError, Result};
use ini::Ini;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Application configuration
///
/// Holds keyboard settings and shortcut overrides, persisted in an INI
/// file (~/.feedkeys.cfg by default).
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path
    path: PathBuf,

    /// Shortcut overrides (sequence -> action), in file order
    pub shortcuts: Vec<(KeySequence, KeyAction)>,
}

impl Config {
    /// Load configuration from the default path, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, creating it with defaults if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(path)
                .map_err(|e| FeedkeysError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(path)
                .map_err(|e| FeedkeysError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        let mut config = Self {
            ini,
            path: path.to_path_buf(),
            shortcuts: Vec::new(),
        };
        config.parse_shortcuts();

        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| FeedkeysError::Config(format!("Failed to save config: {}", e)))
    }

    /// Get config file path (~/.feedkeys.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".feedkeys.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("general"))
            .set("keyboard_shortcuts", "true")
            .set("enter_passthrough", "false")
            .set("show_only_unread", "false")
            .set("title", "Unread (0)");

        ini.with_section(Some("shortcuts"));

        ini
    }

    /// Parse `action = seq, seq` lines from the [shortcuts] section
    ///
    /// Unknown actions and malformed sequences are skipped with a warning.
    fn parse_shortcuts(&mut self) {
        if let Some(section) = self.ini.section(Some("shortcuts")) {
            for (name, sequences) in section.iter() {
                let action: KeyAction = match name.parse() {
                    Ok(action) => action,
                    Err(e) => {
                        warn!("Ignoring shortcut override: {}", e);
                        continue;
                    }
                };

                for sequence in sequences.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    match Self::normalize_sequence(sequence).parse::<KeySequence>() {
                        Ok(seq) => self.shortcuts.push((seq, action)),
                        Err(e) => warn!("Ignoring shortcut for {}: {}", name, e),
                    }
                }
            }
        }
        debug!("Loaded {} shortcut overrides", self.shortcuts.len());
    }

    /// Rewrite label variants such as `Down` or `Esc` to canonical key names
    fn normalize_sequence(sequence: &str) -> String {
        sequence
            .split_whitespace()
            .map(|label| Key::from_label(label).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Get a boolean value from config
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// Are keyboard shortcuts enabled at all?
    /// When false the dispatcher is never started
    pub fn keyboard_shortcuts(&self) -> bool {
        self.get_bool("general", "keyboard_shortcuts", true)
    }

    /// Should Enter keep its default handling?
    pub fn enter_passthrough(&self) -> bool {
        self.get_bool("general", "enter_passthrough", false)
    }

    /// Is the listing restricted to unread entries?
    /// Marking the page as read then reloads instead of paging forward
    pub fn show_only_unread(&self) -> bool {
        self.get_bool("general", "show_only_unread", false)
    }

    /// JSON file with the entries to list
    pub fn entries_file(&self) -> Option<PathBuf> {
        self.ini
            .get_from(Some("general"), "entries_file")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    /// Page title; a "(N)" in it tracks the unread count
    pub fn title(&self) -> String {
        self.get_string("general", "title", "Unread (0)")
    }
}
