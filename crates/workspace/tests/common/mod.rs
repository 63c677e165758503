//! Shared test utilities for integration tests.
//!
//! Builds a workspace over mock windows with a real message channel, so
//! tests drive it the way a terminal frontend would.

// Not every helper is used by every test module
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use actions::{CreateViewArgs, ViewId};
use grv_workspace::{
    AppConfig, ContainerOrientation, ContainerView, UiChannels, UiMessage, ViewContext,
    ViewFactory, Workspace,
};
use keymap::InputBuffer;
use tokio::sync::mpsc;
use window_view::test_support::{ListPane, MockWindowFactory};
use window_view::{ViewDimension, ViewError, WindowView};

pub use tempfile::{tempdir, TempDir};

/// Terminal size used unless a test resizes.
pub const SCREEN: ViewDimension = ViewDimension::new(24, 80);

/// Rows in every pane created by the harness.
pub const PANE_ROWS: usize = 100;

// ============================================================================
// Config files
// ============================================================================

/// Temporary config directory holding a `config.toml`.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestEnv {
    pub fn with_config(content: &str) -> Self {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, content).expect("Failed to write config");
        Self {
            temp_dir,
            config_path,
        }
    }

    pub fn settings(&self) -> settings::Config {
        settings::load_config_from(&self.config_path)
    }
}

// ============================================================================
// View factory
// ============================================================================

/// Creates list panes and remembers them by view id.
pub struct PaneFactory {
    context: ViewContext,
    created: parking_lot::Mutex<Vec<Arc<ListPane>>>,
}

impl PaneFactory {
    pub fn new(context: ViewContext) -> Self {
        Self {
            context,
            created: parking_lot::Mutex::new(Vec::new()),
        }
    }

    pub fn created(&self) -> Vec<Arc<ListPane>> {
        self.created.lock().clone()
    }
}

impl ViewFactory for PaneFactory {
    fn create_view(&self, args: &CreateViewArgs) -> anyhow::Result<Arc<dyn WindowView>> {
        if args.view_id == ViewId::All {
            return Err(ViewError::UnknownView(args.view_id).into());
        }
        let pane = Arc::new(ListPane::with_rows(
            args.view_id,
            PANE_ROWS,
            self.context.channels.clone(),
            self.context.config.clone(),
        ));
        self.created.lock().push(pane.clone());
        Ok(pane)
    }
}

// ============================================================================
// Harness
// ============================================================================

/// A workspace with a History pane and a Commit pane side by side.
pub struct Harness {
    pub workspace: Workspace,
    pub receiver: mpsc::UnboundedReceiver<UiMessage>,
    pub channels: Arc<UiChannels>,
    pub windows: Arc<MockWindowFactory>,
    pub factory: Arc<PaneFactory>,
    pub history: Arc<ListPane>,
    pub commit: Arc<ListPane>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_settings(settings::Config::default())
    }

    pub fn with_settings(settings: settings::Config) -> Self {
        let (config, errors) = AppConfig::new(settings);
        let harness = Self::build(config);
        harness.workspace.report_config_errors(errors);
        harness
    }

    fn build(config: AppConfig) -> Self {
        let (channels, receiver) = UiChannels::new();
        let config = Arc::new(config);
        let windows = Arc::new(MockWindowFactory::new());
        let base = ViewContext::new(channels.clone(), config.clone(), windows.clone());
        let factory = Arc::new(PaneFactory::new(base.clone()));
        let context = base.with_view_factory(factory.clone());

        let root = Arc::new(ContainerView::with_view_id(
            context.clone(),
            ViewId::Main,
            ContainerOrientation::Vertical,
        ));
        let history = Arc::new(ListPane::with_rows(
            ViewId::History,
            PANE_ROWS,
            context.channels.clone(),
            context.config.clone(),
        ));
        let commit = Arc::new(ListPane::with_rows(
            ViewId::Commit,
            PANE_ROWS,
            context.channels.clone(),
            context.config.clone(),
        ));
        root.add_view(history.clone());
        root.add_view(commit.clone());

        let workspace = Workspace::new(root, Arc::new(InputBuffer::new()), config, channels.clone());
        workspace.resize(SCREEN);

        Self {
            workspace,
            receiver,
            channels,
            windows,
            factory,
            history,
            commit,
        }
    }

    /// Push keys and process them as the input reader would.
    pub fn type_keys(&self, keys: &str) {
        self.workspace.input().push_key(keys);
        self.workspace.process_input();
    }

    /// Render and return `(position, dimension, title)` of every visible window.
    pub fn frame(&self) -> Vec<((usize, usize), ViewDimension, String)> {
        let windows = self.workspace.render().expect("render failed");
        windows
            .iter()
            .map(|window| {
                let window = window.lock();
                let title = self
                    .windows
                    .window(window.id())
                    .map(|state| state.title)
                    .unwrap_or_default();
                (window.position(), window.dimension(), title)
            })
            .collect()
    }

    pub fn active_view(&self) -> Option<ViewId> {
        self.workspace.root().active_view().map(|view| view.view_id())
    }

    /// Drain queued messages without applying them.
    pub fn drain(&mut self) -> Vec<UiMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = self.receiver.try_recv() {
            messages.push(message);
        }
        messages
    }

    /// Apply every queued message to the workspace.
    pub fn pump(&mut self) {
        for message in self.drain() {
            self.workspace.handle_message(message);
        }
    }
}
