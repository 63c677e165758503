//! TOML config file support.
//!
//! Config location: `~/.config/grv/config.toml`

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Custom keybinding: maps a keystring to an action name or to another keystring.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct KeybindingEntry {
    /// Keystring (e.g., "gg", "<C-w>v", "<Enter>")
    pub keys: String,
    /// Action name (e.g., "<grv-next-line>")
    #[serde(default)]
    pub action: Option<String>,
    /// Keystring substituted for `keys` (e.g., "<grv-filter-prompt>author=me<Enter>")
    #[serde(default)]
    pub keystring: Option<String>,
    /// View scope (e.g., "Commit"); applies to all views when absent
    #[serde(default)]
    pub view: Option<String>,
}

/// User-facing config parsed from TOML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Enable mouse support.
    pub mouse: bool,
    /// Rows scrolled per mouse wheel event.
    pub mouse_scroll_rows: i64,
    /// Tab width used when displaying file content.
    pub tab_width: i64,
    /// Color theme name.
    pub theme: String,
    /// Pre-fill the prompt with keys typed after a prompt action.
    pub input_prompt_after_keys: bool,
    /// Number of prompt entries kept in history.
    pub prompt_history_size: i64,
    /// View shown at startup.
    pub default_view: String,
    /// Custom keybindings (override defaults).
    #[serde(default)]
    pub keybindings: Vec<KeybindingEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mouse: false,
            mouse_scroll_rows: crate::constants::mouse::DEFAULT_SCROLL_ROWS,
            tab_width: crate::constants::display::DEFAULT_TAB_WIDTH,
            theme: "solarized".to_string(),
            input_prompt_after_keys: true,
            prompt_history_size: crate::constants::prompt::DEFAULT_HISTORY_SIZE,
            default_view: String::new(),
            keybindings: Vec::new(),
        }
    }
}

/// Default config file content with comments (generated on first launch).
const DEFAULT_CONFIG: &str = r#"# GRV Configuration

# Enable mouse support (click to select, wheel to scroll)
mouse = false

# Rows scrolled per mouse wheel event
mouse-scroll-rows = 3

# Tab width used when displaying file content
tab-width = 8

# Color theme
theme = "solarized"

# Pre-fill the prompt with keys typed after a prompt action
input-prompt-after-keys = true

# Number of prompt entries kept in history
prompt-history-size = 1000

# View shown at startup (empty for the default history view)
# default-view = ""

# Custom keybindings (override defaults)
# [[keybindings]]
# keys = "<C-n>"
# action = "<grv-next-line>"
#
# [[keybindings]]
# view = "Commit"
# keys = "ma"
# keystring = "<grv-filter-prompt>authorname=me<Enter>"
"#;

/// Return the config file path.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("grv").join("config.toml"))
}

/// Write the commented default config to `path` unless a file is already there.
///
/// Returns whether a file was written.
pub fn write_default_config(path: &Path) -> bool {
    if path.exists() {
        return false;
    }
    let written = path
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|()| std::fs::write(path, DEFAULT_CONFIG));
    match written {
        Ok(()) => {
            tracing::info!("Created default config at {}", path.display());
            true
        }
        Err(e) => {
            tracing::warn!("Failed to write default config: {}", e);
            false
        }
    }
}

/// Load and parse the user config file, creating it on first launch.
/// Returns default on any error.
pub fn load_config() -> Config {
    match config_path() {
        Some(path) => {
            write_default_config(&path);
            load_config_from(&path)
        }
        None => Config::default(),
    }
}

/// Load and parse a config file at `path`. Returns default on any error.
pub fn load_config_from(path: &Path) -> Config {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to read config: {}", e);
            }
            return Config::default();
        }
    };

    // Size guard
    if content.len() > crate::constants::settings::MAX_FILE_SIZE as usize {
        tracing::warn!(
            "Config file too large ({} bytes), using defaults",
            content.len()
        );
        return Config::default();
    }

    match toml::from_str::<Config>(&content) {
        Ok(mut cfg) => {
            cfg.truncate_strings();
            cfg
        }
        Err(e) => {
            tracing::warn!("Failed to parse config.toml: {}", e);
            Config::default()
        }
    }
}

impl Config {
    fn truncate_strings(&mut self) {
        let max = crate::constants::settings::MAX_STRING_LENGTH;
        for value in [&mut self.theme, &mut self.default_view] {
            if value.len() > max {
                let mut end = max;
                while !value.is_char_boundary(end) {
                    end -= 1;
                }
                value.truncate(end);
            }
        }
    }
}
