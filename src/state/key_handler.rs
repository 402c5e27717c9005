//! Keyboard action handler.
//!
//! Maps domain key actions onto widget operations.

use crate::model::{Clock, KeyAction};
use crate::state::widget::EpgWidget;

/// Whether the host loop should keep running after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Apply a key action to the widget.
pub fn handle_key_action<C: Clock>(widget: &mut EpgWidget<C>, action: KeyAction) -> KeyOutcome {
    match action {
        KeyAction::MoveUp => widget.move_up(),
        KeyAction::MoveDown => widget.move_down(),
        KeyAction::MoveLeft => widget.move_left(),
        KeyAction::MoveRight => widget.move_right(),
        KeyAction::ResetToNow => widget.recalculate_and_redraw(true),
        KeyAction::ClearSelection => widget.clear_selection(),
        KeyAction::Quit => return KeyOutcome::Quit,
    }
    KeyOutcome::Continue
}
