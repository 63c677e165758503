//! Pane contracts and the generic navigation dispatcher.
//!
//! Every scrollable pane owns a [`ViewPosition`] and exposes it through
//! [`ChildWindowView`], which lets [`AbstractWindowView`] implement movement,
//! paging and mouse handling once for all panes. Panes never draw directly;
//! they write into a [`RenderWindow`] positioned by their container.

mod abstract_view;
mod collaborators;
mod dimension;
mod render_window;
mod ticker;
mod view_position;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

use actions::{Action, ViewId};
use thiserror::Error;

pub use abstract_view::{AbstractWindowView, ChildWindowView};
pub use collaborators::{Channels, Config};
pub use dimension::{ChildViewPosition, ViewDimension};
pub use render_window::{RenderWindow, SharedWindow, WindowFactory};
pub use ticker::{Ticker, TickerSlot};
pub use view_position::ViewPosition;

/// Panic in debug builds, log error with backtrace in release.
///
/// Use for broken invariants that must not take down a running UI.
#[macro_export]
macro_rules! debug_panic {
    ( $($fmt_arg:tt)* ) => {
        if cfg!(debug_assertions) {
            panic!( $($fmt_arg)* );
        } else {
            let backtrace = std::backtrace::Backtrace::capture();
            tracing::error!("{}\n{:?}", format_args!($($fmt_arg)*), backtrace);
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("no view factory is registered")]
    NoViewFactory,
    #[error("cannot create a view of type {0}")]
    UnknownView(ViewId),
    #[error("row {row} is out of range ({rows} rows)")]
    InvalidRow { row: usize, rows: usize },
}

/// Focus state pushed from a container to its children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewState {
    #[default]
    Active,
    /// Shown but not focused; panes draw a dimmed selection.
    InactiveAndVisible,
    InactiveAndInvisible,
}

/// Events broadcast through the view tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    /// A pane was removed from its container.
    ViewRemoved { view_id: ViewId },
}

/// A node of the view tree: a content pane or a container of panes.
///
/// Implementations guard their mutable state with their own lock and take
/// it only for the duration of each call.
pub trait WindowView: Send + Sync {
    fn view_id(&self) -> ViewId;

    fn title(&self) -> String {
        self.view_id().to_string()
    }

    fn render(&self, win: &mut dyn RenderWindow) -> anyhow::Result<()>;

    /// Returns `Ok(false)` when the action is not supported by this view.
    fn handle_action(&self, action: &Action) -> anyhow::Result<bool>;

    fn handle_event(&self, _event: &ViewEvent) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_state_change(&self, state: ViewState);
}
