//! Guide color scheme.
//!
//! Maps the renderer's semantic [`Paint`] roles onto terminal styles, with a
//! monochrome fallback that uses shade glyphs instead of colors.

use crate::view_state::Paint;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag (or `no_color` in the config file)
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on or off regardless of the environment.
    pub fn fixed(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== GuideStyles =====

/// How one paint role looks in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPaint {
    pub style: Style,
    /// Symbol used when the role fills an area.
    pub fill: &'static str,
}

/// Per-role cell styling for the guide grid and the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideStyles {
    colors: bool,
    background: CellPaint,
    channel_background: CellPaint,
    event: CellPaint,
    event_current: CellPaint,
    event_selected: CellPaint,
    text: CellPaint,
    time_line: CellPaint,
    status: Style,
}

impl GuideStyles {
    pub fn with_color_config(config: ColorConfig) -> Self {
        let fill = |style: Style, fill: &'static str| CellPaint { style, fill };
        if config.colors_enabled() {
            Self {
                colors: true,
                background: fill(Style::default().bg(Color::Black).fg(Color::Gray), " "),
                channel_background: fill(Style::default().bg(Color::DarkGray).fg(Color::White), " "),
                event: fill(Style::default().bg(Color::Blue).fg(Color::White), " "),
                event_current: fill(Style::default().bg(Color::LightBlue).fg(Color::Black), " "),
                event_selected: fill(Style::default().bg(Color::Yellow).fg(Color::Black), " "),
                text: fill(Style::default().fg(Color::White), " "),
                time_line: fill(Style::default().bg(Color::Red).fg(Color::White), " "),
                status: Style::default().bg(Color::DarkGray).fg(Color::White),
            }
        } else {
            Self {
                colors: false,
                background: fill(Style::default(), " "),
                channel_background: fill(Style::default(), " "),
                event: fill(Style::default(), "░"),
                event_current: fill(Style::default(), "▒"),
                event_selected: fill(Style::default().add_modifier(Modifier::REVERSED), " "),
                text: fill(Style::default(), " "),
                time_line: fill(Style::default(), "█"),
                status: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }

    pub fn colors_enabled(&self) -> bool {
        self.colors
    }

    pub fn paint(&self, paint: Paint) -> CellPaint {
        match paint {
            Paint::Background => self.background,
            Paint::ChannelBackground => self.channel_background,
            Paint::Event => self.event,
            Paint::EventCurrent => self.event_current,
            Paint::EventSelected => self.event_selected,
            Paint::Text => self.text,
            Paint::TimeLine => self.time_line,
        }
    }

    /// Reset-icon glyph drawn on top of the time-line fill.
    pub fn icon(&self) -> Style {
        if self.colors {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        }
    }

    pub fn status(&self) -> Style {
        self.status
    }
}

impl Default for GuideStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
