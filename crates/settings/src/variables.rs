use crate::constants;
use crate::file::Config;

/// Config variables readable by views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigVariable {
    Mouse,
    MouseScrollRows,
    TabWidth,
    Theme,
    InputPromptAfterKeys,
    PromptHistorySize,
    DefaultView,
}

/// Value of a config variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigValue {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl ConfigVariable {
    pub const ALL: &'static [ConfigVariable] = &[
        ConfigVariable::Mouse,
        ConfigVariable::MouseScrollRows,
        ConfigVariable::TabWidth,
        ConfigVariable::Theme,
        ConfigVariable::InputPromptAfterKeys,
        ConfigVariable::PromptHistorySize,
        ConfigVariable::DefaultView,
    ];

    /// Name of the variable as written in config.toml.
    pub fn name(self) -> &'static str {
        match self {
            ConfigVariable::Mouse => "mouse",
            ConfigVariable::MouseScrollRows => "mouse-scroll-rows",
            ConfigVariable::TabWidth => "tab-width",
            ConfigVariable::Theme => "theme",
            ConfigVariable::InputPromptAfterKeys => "input-prompt-after-keys",
            ConfigVariable::PromptHistorySize => "prompt-history-size",
            ConfigVariable::DefaultView => "default-view",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|var| var.name() == name)
    }
}

impl Config {
    /// Current value of `variable`, with integers clamped to their documented bounds.
    pub fn value(&self, variable: ConfigVariable) -> ConfigValue {
        match variable {
            ConfigVariable::Mouse => ConfigValue::Bool(self.mouse),
            ConfigVariable::MouseScrollRows => ConfigValue::Int(self.mouse_scroll_rows.clamp(
                constants::mouse::MIN_SCROLL_ROWS,
                constants::mouse::MAX_SCROLL_ROWS,
            )),
            ConfigVariable::TabWidth => ConfigValue::Int(self.tab_width.clamp(
                constants::display::MIN_TAB_WIDTH,
                constants::display::MAX_TAB_WIDTH,
            )),
            ConfigVariable::Theme => ConfigValue::Str(self.theme.clone()),
            ConfigVariable::InputPromptAfterKeys => ConfigValue::Bool(self.input_prompt_after_keys),
            ConfigVariable::PromptHistorySize => ConfigValue::Int(self.prompt_history_size.clamp(
                constants::prompt::MIN_HISTORY_SIZE,
                constants::prompt::MAX_HISTORY_SIZE,
            )),
            ConfigVariable::DefaultView => ConfigValue::Str(self.default_view.clone()),
        }
    }

    pub fn get_int(&self, variable: ConfigVariable) -> i64 {
        match self.value(variable) {
            ConfigValue::Int(value) => value,
            other => {
                tracing::warn!("{} is not an integer variable: {:?}", variable.name(), other);
                0
            }
        }
    }

    pub fn get_bool(&self, variable: ConfigVariable) -> bool {
        match self.value(variable) {
            ConfigValue::Bool(value) => value,
            other => {
                tracing::warn!("{} is not a boolean variable: {:?}", variable.name(), other);
                false
            }
        }
    }

    pub fn get_string(&self, variable: ConfigVariable) -> String {
        match self.value(variable) {
            ConfigValue::Str(value) => value,
            ConfigValue::Int(value) => value.to_string(),
            ConfigValue::Bool(value) => value.to_string(),
        }
    }
}
