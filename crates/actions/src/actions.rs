//! Shared action definitions for GRV.
//!
//! Every action the UI can perform is defined here so that the keymap,
//! view and workspace crates can exchange actions without depending on
//! each other.

mod mouse;
mod view_id;

use smallvec::SmallVec;
use thiserror::Error;

pub use mouse::{MouseEvent, MouseEventType};
pub use view_id::{ViewHierarchy, ViewId};

/// Errors raised while building or inspecting actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{action} expected an argument of type {expected}")]
    MissingArgument {
        action: ActionType,
        expected: &'static str,
    },
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("unknown view: {0}")]
    UnknownView(String),
}

macro_rules! define_actions {
    ($($variant:ident => $name:literal, $description:literal;)*) => {
        /// Closed set of actions understood by the view tree.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ActionType {
            $($variant,)*
        }

        impl ActionType {
            /// Every action type, in declaration order.
            pub const ALL: &'static [ActionType] = &[$(ActionType::$variant,)*];

            /// Canonical keystring name of the action, e.g. `<grv-next-line>`.
            pub fn name(self) -> &'static str {
                match self {
                    $(ActionType::$variant => $name,)*
                }
            }

            /// Short human readable description used by help views.
            pub fn description(self) -> &'static str {
                match self {
                    $(ActionType::$variant => $description,)*
                }
            }
        }
    };
}

define_actions! {
    None => "<grv-nop>", "Do nothing";
    Exit => "<grv-exit>", "Exit GRV";
    Suspend => "<grv-suspend>", "Suspend GRV";
    Prompt => "<grv-prompt>", "GRV command prompt";
    SearchPrompt => "<grv-search-prompt>", "Search forwards";
    ReverseSearchPrompt => "<grv-reverse-search-prompt>", "Search backwards";
    FilterPrompt => "<grv-filter-prompt>", "Add filter";
    SearchFind => "<grv-search-find>", "Perform search";
    SearchFindNext => "<grv-search-find-next>", "Move to next search match";
    SearchFindPrev => "<grv-search-find-prev>", "Move to previous search match";
    ClearSearch => "<grv-clear-search>", "Clear search";
    ShowStatus => "<grv-show-status>", "Show status message";
    PrevLine => "<grv-prev-line>", "Move up one line";
    NextLine => "<grv-next-line>", "Move down one line";
    PrevPage => "<grv-prev-page>", "Move one page up";
    NextPage => "<grv-next-page>", "Move one page down";
    PrevHalfPage => "<grv-prev-half-page>", "Move half page up";
    NextHalfPage => "<grv-next-half-page>", "Move half page down";
    ScrollRight => "<grv-scroll-right>", "Scroll right";
    ScrollLeft => "<grv-scroll-left>", "Scroll left";
    FirstLine => "<grv-first-line>", "Move to first line";
    LastLine => "<grv-last-line>", "Move to last line";
    Select => "<grv-select>", "Select item (opens listener view if none exists)";
    NextView => "<grv-next-view>", "Move to next view";
    PrevView => "<grv-prev-view>", "Move to previous view";
    FullScreenView => "<grv-full-screen-view>", "Toggle current view full screen";
    ToggleViewLayout => "<grv-toggle-view-layout>", "Toggle view layout";
    CenterView => "<grv-center-view>", "Center view";
    ScrollCursorTop => "<grv-scroll-cursor-top>", "Scroll the screen so cursor is at the top";
    ScrollCursorBottom => "<grv-scroll-cursor-bottom>", "Scroll the screen so cursor is at the bottom";
    CursorTopView => "<grv-cursor-top-view>", "Move to the first line of the page";
    CursorMiddleView => "<grv-cursor-middle-view>", "Move to the middle line of the page";
    CursorBottomView => "<grv-cursor-bottom-view>", "Move to the last line of the page";
    AddView => "<grv-add-view>", "Add a new view";
    SplitView => "<grv-split-view>", "Split the current view";
    RemoveView => "<grv-remove-view>", "Close view";
    MouseSelect => "<grv-mouse-select>", "Mouse select";
    MouseScrollDown => "<grv-mouse-scroll-down>", "Mouse scroll down";
    MouseScrollUp => "<grv-mouse-scroll-up>", "Mouse scroll up";
}

impl ActionType {
    /// Look up an action by its canonical name.
    pub fn from_name(name: &str) -> Result<Self, ActionError> {
        Self::ALL
            .iter()
            .copied()
            .find(|action_type| action_type.name() == name)
            .ok_or_else(|| ActionError::UnknownAction(name.to_string()))
    }

    /// Actions that open an input prompt and may consume buffered text as the answer.
    pub fn is_prompt(self) -> bool {
        matches!(
            self,
            ActionType::Prompt
                | ActionType::SearchPrompt
                | ActionType::ReverseSearchPrompt
                | ActionType::FilterPrompt
        )
    }

    pub fn is_mouse(self) -> bool {
        matches!(
            self,
            ActionType::MouseSelect | ActionType::MouseScrollDown | ActionType::MouseScrollUp
        )
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Orientation requested when splitting a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplitOrientation {
    /// Side-by-side columns.
    Vertical,
    /// Stacked rows.
    Horizontal,
}

/// Describes a view to be created by a view factory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateViewArgs {
    pub view_id: ViewId,
    pub view_args: Vec<String>,
}

impl CreateViewArgs {
    pub fn new(view_id: ViewId) -> Self {
        Self {
            view_id,
            view_args: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitViewArgs {
    pub orientation: SplitOrientation,
    pub create_view: CreateViewArgs,
}

/// Input taken from the buffer for a prompt action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptInput {
    pub text: String,
    /// The input ended with `<Enter>`, so the prompt is answered without
    /// being shown.
    pub submitted: bool,
}

/// Action specific payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionArg {
    Mouse(MouseEvent),
    Text(String),
    Prompt(PromptInput),
    CreateView(CreateViewArgs),
    SplitView(SplitViewArgs),
}

/// An immutable action passed down the view tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub action_type: ActionType,
    pub args: SmallVec<[ActionArg; 1]>,
}

impl Action {
    pub fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            args: SmallVec::new(),
        }
    }

    pub fn none() -> Self {
        Self::new(ActionType::None)
    }

    pub fn with_arg(action_type: ActionType, arg: ActionArg) -> Self {
        let mut args = SmallVec::new();
        args.push(arg);
        Self { action_type, args }
    }

    pub fn is_none(&self) -> bool {
        self.action_type == ActionType::None
    }

    /// Extract the mouse event carried by a mouse action.
    pub fn mouse_event(&self) -> Result<MouseEvent, ActionError> {
        self.args
            .iter()
            .find_map(|arg| match arg {
                ActionArg::Mouse(event) => Some(*event),
                _ => None,
            })
            .ok_or(ActionError::MissingArgument {
                action: self.action_type,
                expected: "MouseEvent",
            })
    }

    /// Copy of this action with its mouse event replaced.
    ///
    /// Used when a container translates a click into a child's coordinate space.
    pub fn with_mouse_event(&self, event: MouseEvent) -> Self {
        let mut action = self.clone();
        action.args.retain(|arg| !matches!(arg, ActionArg::Mouse(_)));
        action.args.insert(0, ActionArg::Mouse(event));
        action
    }

    pub fn text(&self) -> Option<&str> {
        self.args.iter().find_map(|arg| match arg {
            ActionArg::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn prompt_input(&self) -> Option<&PromptInput> {
        self.args.iter().find_map(|arg| match arg {
            ActionArg::Prompt(input) => Some(input),
            _ => None,
        })
    }

    pub fn create_view_args(&self) -> Result<&CreateViewArgs, ActionError> {
        self.args
            .iter()
            .find_map(|arg| match arg {
                ActionArg::CreateView(args) => Some(args),
                _ => None,
            })
            .ok_or(ActionError::MissingArgument {
                action: self.action_type,
                expected: "CreateViewArgs",
            })
    }

    pub fn split_view_args(&self) -> Result<&SplitViewArgs, ActionError> {
        self.args
            .iter()
            .find_map(|arg| match arg {
                ActionArg::SplitView(args) => Some(args),
                _ => None,
            })
            .ok_or(ActionError::MissingArgument {
                action: self.action_type,
                expected: "SplitViewArgs",
            })
    }
}

impl From<ActionType> for Action {
    fn from(action_type: ActionType) -> Self {
        Self::new(action_type)
    }
}
