//! Configuration module.
//!
//! - `loader`: TOML config file, environment and CLI precedence
//! - `keybindings`: key → [`KeyAction`](crate::model::KeyAction) map

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    ConfigError, ConfigFile, ResolvedConfig, apply_cli_overrides, apply_env_overrides,
    default_log_path, load_config_with_precedence, merge_config,
};
