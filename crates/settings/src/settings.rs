//! Configuration system for GRV.
//!
//! Provides compile-time constants, the TOML config file and typed access
//! to individual config variables.

pub mod constants;
pub mod file;
mod variables;

pub use file::{
    config_path, load_config, load_config_from, write_default_config, Config, KeybindingEntry,
};
pub use variables::{ConfigValue, ConfigVariable};
