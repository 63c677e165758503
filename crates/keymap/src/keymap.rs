//! Keystring input and key binding resolution for GRV.
//!
//! Raw input is accumulated as a keystring in an [`InputBuffer`]. Special keys
//! and action names are written as angle-bracket tokens (`<Enter>`, `<C-w>`,
//! `<grv-filter-prompt>`) and are never split. [`KeyBindings`] maps keystrings
//! to actions or to other keystrings, scoped by [`actions::ViewId`].

mod bindings;
mod defaults;
mod input_buffer;
pub mod keystring;

use thiserror::Error;

pub use bindings::{Binding, BoundKeyString, KeyBindings};
pub use defaults::DEFAULT_BINDINGS;
pub use input_buffer::InputBuffer;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
    #[error("keystring must not be empty")]
    EmptyKeystring,
    #[error("binding for {keys} must specify exactly one of action or keystring")]
    AmbiguousBinding { keys: String },
    #[error(transparent)]
    Action(#[from] actions::ActionError),
}
