use actions::{ActionType, ViewHierarchy};
use keymap::{BoundKeyString, KeyBindings, KeymapError};
use parking_lot::{RwLock, RwLockReadGuard};
use settings::ConfigVariable;
use window_view::Config;

/// Settings from the config file plus the live key binding table.
pub struct AppConfig {
    settings: settings::Config,
    bindings: RwLock<KeyBindings>,
}

impl AppConfig {
    /// Apply the configured keybindings over the defaults.
    ///
    /// Returns one error per rejected keybinding entry; the remaining entries
    /// are applied.
    pub fn new(settings: settings::Config) -> (Self, Vec<KeymapError>) {
        let mut bindings = KeyBindings::with_defaults();
        let errors = bindings.apply_entries(&settings.keybindings);
        for err in &errors {
            tracing::warn!("Invalid keybinding: {}", err);
        }
        let config = Self {
            settings,
            bindings: RwLock::new(bindings),
        };
        (config, errors)
    }

    /// Load from the user config file.
    pub fn load() -> (Self, Vec<KeymapError>) {
        Self::new(settings::load_config())
    }

    pub fn settings(&self) -> &settings::Config {
        &self.settings
    }

    pub fn bindings(&self) -> RwLockReadGuard<'_, KeyBindings> {
        self.bindings.read()
    }

    /// Modify the binding table, e.g. from a command prompt.
    pub fn update_bindings<R>(&self, update: impl FnOnce(&mut KeyBindings) -> R) -> R {
        update(&mut self.bindings.write())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(settings::Config::default()).0
    }
}

impl Config for AppConfig {
    fn get_int(&self, variable: ConfigVariable) -> i64 {
        self.settings.get_int(variable)
    }

    fn get_bool(&self, variable: ConfigVariable) -> bool {
        self.settings.get_bool(variable)
    }

    fn get_string(&self, variable: ConfigVariable) -> String {
        self.settings.get_string(variable)
    }

    fn key_strings(
        &self,
        action_type: ActionType,
        hierarchy: &ViewHierarchy,
    ) -> Vec<BoundKeyString> {
        self.bindings.read().key_strings(action_type, hierarchy)
    }
}
