//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::view_state::layout_params::{HOUR_MILLIS, MINUTE_MILLIS};
use crate::view_state::{GridGeometry, GuideParams, ScrollTuning, TimeWindow};

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/epgview/config.toml`:
///
/// ```toml
/// log_file_path = "/tmp/epgview.log"
/// no_color = false
///
/// [window]
/// back_hours = 72
/// forward_hours = 72
/// viewport_minutes = 120
/// tick_minutes = 30
///
/// [layout]
/// row_height = 3
/// channel_column_width = 14
///
/// [scroll]
/// fling_friction = 0.2
/// reset_animation_ms = 600
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Disable colors.
    #[serde(default)]
    pub no_color: Option<bool>,

    /// Time window section.
    #[serde(default)]
    pub window: Option<WindowSection>,

    /// Grid geometry section, in terminal cells.
    #[serde(default)]
    pub layout: Option<LayoutSection>,

    /// Scroll physics section.
    #[serde(default)]
    pub scroll: Option<ScrollSection>,
}

/// `[window]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WindowSection {
    pub back_hours: Option<u32>,
    pub forward_hours: Option<u32>,
    pub viewport_minutes: Option<u32>,
    pub tick_minutes: Option<u32>,
}

/// `[layout]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LayoutSection {
    pub row_height: Option<u16>,
    pub row_margin: Option<u16>,
    pub row_padding: Option<u16>,
    pub channel_column_width: Option<u16>,
    pub column_margin: Option<u16>,
    pub time_bar_height: Option<u16>,
    pub now_line_width: Option<u16>,
    pub reset_button_size: Option<u16>,
    pub reset_button_margin: Option<u16>,
    pub reset_threshold_divisor: Option<u16>,
}

/// `[scroll]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScrollSection {
    pub fling_friction: Option<f32>,
    pub pixels_per_inch: Option<f32>,
    pub reset_animation_ms: Option<u64>,
    pub nudge_step: Option<u16>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Engine parameters.
    pub params: GuideParams,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Disable colors.
    pub no_color: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            params: GuideParams::default(),
            log_file_path: default_log_path(),
            no_color: false,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/epgview/epgview.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("epgview").join("epgview.log")
    } else {
        PathBuf::from("epgview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/epgview/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("epgview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `EPGVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/epgview/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns `InvalidPath` for an empty `EPGVIEW_CONFIG`, otherwise errors
/// only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("EPGVIEW_CONFIG") {
        if env_path.trim().is_empty() {
            return Err(ConfigError::InvalidPath(
                "EPGVIEW_CONFIG is set but empty".to_string(),
            ));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `EPGVIEW_LOG_FILE`: Override log file path
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(path) = std::env::var("EPGVIEW_LOG_FILE") {
        if !path.is_empty() {
            config.log_file_path = PathBuf::from(path);
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let params = GuideParams {
        window: merge_window(config.window.unwrap_or_default(), defaults.params.window),
        geometry: merge_layout(config.layout.unwrap_or_default(), defaults.params.geometry),
        scroll: merge_scroll(config.scroll.unwrap_or_default(), defaults.params.scroll),
    };

    ResolvedConfig {
        params,
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        no_color: config.no_color.unwrap_or(defaults.no_color),
    }
}

fn merge_window(section: WindowSection, defaults: TimeWindow) -> TimeWindow {
    let scaled = |value: Option<u32>, unit: i64, default: i64| {
        value.map_or(default, |v| i64::from(v) * unit)
    };
    TimeWindow {
        back_millis: scaled(section.back_hours, HOUR_MILLIS, defaults.back_millis),
        forward_millis: scaled(section.forward_hours, HOUR_MILLIS, defaults.forward_millis),
        // A zero-length viewport has no pixel scale.
        viewport_millis: scaled(
            section.viewport_minutes.map(|m| m.max(1)),
            MINUTE_MILLIS,
            defaults.viewport_millis,
        ),
        tick_interval_millis: scaled(
            section.tick_minutes,
            MINUTE_MILLIS,
            defaults.tick_interval_millis,
        ),
    }
}

fn merge_layout(section: LayoutSection, defaults: GridGeometry) -> GridGeometry {
    let cells = |value: Option<u16>, default: i32| value.map_or(default, i32::from);
    GridGeometry {
        row_height: cells(section.row_height, defaults.row_height).max(1),
        row_margin: cells(section.row_margin, defaults.row_margin),
        row_padding: cells(section.row_padding, defaults.row_padding),
        channel_column_width: cells(section.channel_column_width, defaults.channel_column_width),
        column_margin: cells(section.column_margin, defaults.column_margin),
        time_bar_height: cells(section.time_bar_height, defaults.time_bar_height),
        now_line_width: cells(section.now_line_width, defaults.now_line_width),
        reset_button_size: cells(section.reset_button_size, defaults.reset_button_size),
        reset_button_margin: cells(section.reset_button_margin, defaults.reset_button_margin),
        reset_threshold_divisor: cells(
            section.reset_threshold_divisor,
            defaults.reset_threshold_divisor,
        )
        .max(1),
    }
}

fn merge_scroll(section: ScrollSection, defaults: ScrollTuning) -> ScrollTuning {
    ScrollTuning {
        fling_friction: section.fling_friction.unwrap_or(defaults.fling_friction),
        pixels_per_inch: section.pixels_per_inch.unwrap_or(defaults.pixels_per_inch),
        reset_animation: section
            .reset_animation_ms
            .map_or(defaults.reset_animation, Duration::from_millis),
        nudge_step: section.nudge_step.map_or(defaults.nudge_step, i32::from),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    no_color: bool,
    log_file_override: Option<PathBuf>,
) -> ResolvedConfig {
    if no_color {
        config.no_color = true;
    }

    if let Some(path) = log_file_override {
        config.log_file_path = path;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
