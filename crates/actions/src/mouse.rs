use crate::{Action, ActionArg, ActionType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseEventType {
    Select,
    ScrollDown,
    ScrollUp,
}

/// A mouse event in cell coordinates, relative to the view receiving it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub event_type: MouseEventType,
    pub row: usize,
    pub col: usize,
}

impl MouseEvent {
    pub fn new(event_type: MouseEventType, row: usize, col: usize) -> Self {
        Self {
            event_type,
            row,
            col,
        }
    }

    /// Build the action carrying this event.
    pub fn action(self) -> Action {
        let action_type = match self.event_type {
            MouseEventType::Select => ActionType::MouseSelect,
            MouseEventType::ScrollDown => ActionType::MouseScrollDown,
            MouseEventType::ScrollUp => ActionType::MouseScrollUp,
        };
        Action::with_arg(action_type, ActionArg::Mouse(self))
    }
}
