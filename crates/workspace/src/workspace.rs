//! Pane tree and top-level loop for GRV.
//!
//! The [`Workspace`] owns the root [`ContainerView`], resolves buffered input
//! into actions and applies messages posted by views and background tasks.

mod app_config;
mod channels;
mod container;
mod workspace_view;

pub use app_config::AppConfig;
pub use channels::{UiChannels, UiMessage};
pub use container::{
    calculate_child_view_positions, ContainerOrientation, ContainerView, PaneNode, ViewContext,
    ViewFactory, ViewRemovalListener,
};
pub use workspace_view::{MessageOutcome, Workspace};
