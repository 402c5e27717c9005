//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Directional nudges
    /// Scroll one step towards the first channel. Default: k/↑
    MoveUp,
    /// Scroll one step towards the last channel. Default: j/↓
    MoveDown,
    /// Scroll one step back in time. Default: h/←
    MoveLeft,
    /// Scroll one step forward in time. Default: l/→
    MoveRight,

    // Guide
    /// Animated scroll back to the current time. Default: n/Home
    ResetToNow,
    /// Drop the highlighted event. Default: Esc
    ClearSelection,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Nudge direction as `(dx, dy)` unit steps, for the four move actions.
    pub fn nudge_direction(self) -> Option<(i32, i32)> {
        match self {
            KeyAction::MoveUp => Some((0, -1)),
            KeyAction::MoveDown => Some((0, 1)),
            KeyAction::MoveLeft => Some((-1, 0)),
            KeyAction::MoveRight => Some((1, 0)),
            _ => None,
        }
    }
}
