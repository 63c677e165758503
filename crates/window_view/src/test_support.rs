//! Test doubles for the view collaborators.
//!
//! Enabled for downstream crates with the `test-support` feature.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use actions::{Action, ActionType, ViewHierarchy, ViewId};
use keymap::{BoundKeyString, KeyBindings};
use parking_lot::Mutex;
use settings::ConfigVariable;

use crate::{
    AbstractWindowView, Channels, ChildWindowView, Config, RenderWindow, SharedWindow,
    ViewDimension, ViewError, ViewEvent, ViewPosition, ViewState, WindowFactory, WindowView,
};

// ============================================================================
// Channels
// ============================================================================

/// Records every signal sent by views.
#[derive(Default)]
pub struct RecordingChannels {
    display_updates: AtomicUsize,
    errors: Mutex<Vec<String>>,
    statuses: Mutex<Vec<String>>,
    actions: Mutex<Vec<Action>>,
    exited: AtomicBool,
}

impl RecordingChannels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_updates(&self) -> usize {
        self.display_updates.load(Ordering::SeqCst)
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.statuses.lock().clone()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().clone()
    }

    pub fn exit_requested(&self) -> bool {
        self.exited.load(Ordering::SeqCst)
    }
}

impl Channels for RecordingChannels {
    fn update_display(&self) {
        self.display_updates.fetch_add(1, Ordering::SeqCst);
    }

    fn report_error(&self, err: anyhow::Error) {
        self.errors.lock().push(err.to_string());
    }

    fn report_status(&self, status: fmt::Arguments<'_>) {
        self.statuses.lock().push(status.to_string());
    }

    fn do_action(&self, action: Action) {
        self.actions.lock().push(action);
    }

    fn exit(&self) -> bool {
        !self.exited.swap(true, Ordering::SeqCst)
    }
}

// ============================================================================
// Config
// ============================================================================

/// Config backed by a fixed settings value and binding table.
pub struct StaticConfig {
    settings: settings::Config,
    bindings: KeyBindings,
}

impl StaticConfig {
    pub fn from_settings(settings: settings::Config) -> Self {
        Self {
            settings,
            bindings: KeyBindings::with_defaults(),
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self::from_settings(settings::Config::default())
    }
}

impl Config for StaticConfig {
    fn get_int(&self, variable: ConfigVariable) -> i64 {
        self.settings.get_int(variable)
    }

    fn get_bool(&self, variable: ConfigVariable) -> bool {
        self.settings.get_bool(variable)
    }

    fn get_string(&self, variable: ConfigVariable) -> String {
        self.settings.get_string(variable)
    }

    fn key_strings(
        &self,
        action_type: ActionType,
        hierarchy: &ViewHierarchy,
    ) -> Vec<BoundKeyString> {
        self.bindings.key_strings(action_type, hierarchy)
    }
}

// ============================================================================
// Render windows
// ============================================================================

/// Everything drawn into a [`MockWindow`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MockWindowState {
    pub dimension: ViewDimension,
    pub position: (usize, usize),
    pub rows: Vec<String>,
    pub selected_row: Option<(usize, ViewState)>,
    pub border: bool,
    pub title: String,
    pub footer: String,
    pub highlight: Option<String>,
}

pub struct MockWindow {
    id: String,
    state: Arc<Mutex<MockWindowState>>,
}

impl MockWindow {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            state: Arc::default(),
        }
    }

    pub fn with_dimension(id: &str, dimension: ViewDimension) -> Self {
        let window = Self::new(id);
        window.state.lock().dimension = dimension;
        window
    }

    pub fn snapshot(&self) -> MockWindowState {
        self.state.lock().clone()
    }
}

impl RenderWindow for MockWindow {
    fn id(&self) -> &str {
        &self.id
    }

    fn rows(&self) -> usize {
        self.state.lock().dimension.rows
    }

    fn cols(&self) -> usize {
        self.state.lock().dimension.cols
    }

    fn resize(&mut self, dimension: ViewDimension) {
        self.state.lock().dimension = dimension;
    }

    fn set_position(&mut self, start_row: usize, start_col: usize) {
        self.state.lock().position = (start_row, start_col);
    }

    fn position(&self) -> (usize, usize) {
        self.state.lock().position
    }

    fn clear(&mut self) {
        let mut state = self.state.lock();
        state.rows.clear();
        state.selected_row = None;
        state.border = false;
    }

    fn set_row(&mut self, row: usize, start_col: usize, text: &str) -> anyhow::Result<()> {
        let mut state = self.state.lock();
        if row >= state.dimension.rows {
            anyhow::bail!("row {row} is outside window {}", self.id);
        }
        if state.rows.len() <= row {
            state.rows.resize(row + 1, String::new());
        }
        state.rows[row] = text.chars().skip(start_col).collect();
        Ok(())
    }

    fn set_selected_row(&mut self, row: usize, view_state: ViewState) -> anyhow::Result<()> {
        self.state.lock().selected_row = Some((row, view_state));
        Ok(())
    }

    fn draw_border(&mut self) {
        self.state.lock().border = true;
    }

    fn set_title(&mut self, title: &str) -> anyhow::Result<()> {
        self.state.lock().title = title.to_string();
        Ok(())
    }

    fn set_footer(&mut self, footer: &str) -> anyhow::Result<()> {
        self.state.lock().footer = footer.to_string();
        Ok(())
    }

    fn highlight(&mut self, pattern: &str) -> anyhow::Result<()> {
        self.state.lock().highlight = Some(pattern.to_string());
        Ok(())
    }
}

/// Creates [`MockWindow`]s and keeps a handle to each one for inspection.
#[derive(Default)]
pub struct MockWindowFactory {
    windows: Mutex<Vec<(String, Arc<Mutex<MockWindowState>>)>>,
}

impl MockWindowFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> usize {
        self.windows.lock().len()
    }

    /// Snapshot of the window created with `id`.
    pub fn window(&self, id: &str) -> Option<MockWindowState> {
        self.windows
            .lock()
            .iter()
            .find(|(window_id, _)| window_id == id)
            .map(|(_, state)| state.lock().clone())
    }
}

impl WindowFactory for MockWindowFactory {
    fn create_window(&self, id: &str) -> SharedWindow {
        let window = MockWindow::new(id);
        self.windows
            .lock()
            .push((id.to_string(), window.state.clone()));
        let window: Box<dyn RenderWindow> = Box::new(window);
        Arc::new(Mutex::new(window))
    }
}

// ============================================================================
// Content pane
// ============================================================================

struct ListPaneState {
    lines: Vec<String>,
    view_pos: ViewPosition,
    dimension: ViewDimension,
    view_state: ViewState,
    selected: Vec<usize>,
    received: Vec<Action>,
    events: Vec<ViewEvent>,
}

impl ChildWindowView for ListPaneState {
    fn view_pos(&mut self) -> &mut ViewPosition {
        &mut self.view_pos
    }

    fn rows(&self) -> usize {
        self.lines.len()
    }

    fn view_dimension(&self) -> ViewDimension {
        self.dimension
    }

    fn on_row_selected(&mut self, row_index: usize) -> anyhow::Result<()> {
        if row_index >= self.lines.len() {
            return Err(ViewError::InvalidRow {
                row: row_index,
                rows: self.lines.len(),
            }
            .into());
        }
        self.selected.push(row_index);
        Ok(())
    }
}

/// A minimal content pane listing lines of text.
pub struct ListPane {
    view_id: ViewId,
    abstract_view: AbstractWindowView,
    state: Mutex<ListPaneState>,
}

impl ListPane {
    pub fn new(
        view_id: ViewId,
        lines: Vec<String>,
        channels: Arc<dyn Channels>,
        config: Arc<dyn Config>,
    ) -> Self {
        Self {
            view_id,
            abstract_view: AbstractWindowView::new(channels, config),
            state: Mutex::new(ListPaneState {
                lines,
                view_pos: ViewPosition::new(),
                dimension: ViewDimension::new(24, 80),
                view_state: ViewState::InactiveAndInvisible,
                selected: Vec::new(),
                received: Vec::new(),
                events: Vec::new(),
            }),
        }
    }

    pub fn with_rows(
        view_id: ViewId,
        rows: usize,
        channels: Arc<dyn Channels>,
        config: Arc<dyn Config>,
    ) -> Self {
        let lines = (0..rows).map(|row| format!("line {row}")).collect();
        Self::new(view_id, lines, channels, config)
    }

    pub fn set_lines(&self, lines: Vec<String>) {
        self.state.lock().lines = lines;
    }

    pub fn view_position(&self) -> ViewPosition {
        self.state.lock().view_pos
    }

    pub fn view_state(&self) -> ViewState {
        self.state.lock().view_state
    }

    pub fn selected_rows(&self) -> Vec<usize> {
        self.state.lock().selected.clone()
    }

    /// Every action passed to this pane, handled or not.
    pub fn received_actions(&self) -> Vec<Action> {
        self.state.lock().received.clone()
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.state.lock().events.clone()
    }
}

impl WindowView for ListPane {
    fn view_id(&self) -> ViewId {
        self.view_id
    }

    fn render(&self, win: &mut dyn RenderWindow) -> anyhow::Result<()> {
        let mut state = self.state.lock();
        let border_width = self.abstract_view.border_width();
        state.dimension = win.dimension();

        let page_rows = state.dimension.content_rows(border_width);
        let rows = state.lines.len();
        state.view_pos.determine_view_start_row(page_rows, rows);

        win.clear();
        let start = state.view_pos.view_start_row_index();
        let start_col = state.view_pos.view_start_column();
        for (offset, line) in state.lines.iter().skip(start).take(page_rows).enumerate() {
            win.set_row(offset + 1, start_col, line)?;
        }
        if rows > 0 {
            win.set_selected_row(state.view_pos.selected_row_index() + 1, state.view_state)?;
        }
        win.draw_border();
        win.set_title(&self.title())?;
        win.set_footer(&format!(
            "{} {} of {}",
            self.title(),
            state.view_pos.active_row_index() + usize::from(rows > 0),
            rows
        ))
    }

    fn handle_action(&self, action: &Action) -> anyhow::Result<bool> {
        let mut state = self.state.lock();
        state.received.push(action.clone());
        self.abstract_view.handle_action(action, &mut *state)
    }

    fn handle_event(&self, event: &ViewEvent) -> anyhow::Result<()> {
        self.state.lock().events.push(event.clone());
        Ok(())
    }

    fn on_state_change(&self, view_state: ViewState) {
        self.state.lock().view_state = view_state;
    }
}
