//! Recursive pane container.
//!
//! A [`ContainerView`] lays out its children side by side or stacked and
//! routes actions to the active one. Children are content panes or nested
//! containers, which is how split layouts of any depth are built:
//!
//! ```text
//! Container (Vertical)
//! ├── Leaf (History)
//! └── Container (Horizontal)
//!     ├── Leaf (Commit)
//!     └── Leaf (Diff)
//! ```
//!
//! Each container guards its state with its own lock and releases it before
//! calling into a child.

use std::sync::Arc;

use actions::{
    Action, ActionType, CreateViewArgs, MouseEvent, SplitOrientation, ViewHierarchy, ViewId,
};
use anyhow::Context as _;
use parking_lot::Mutex;
use settings::constants::layout::TERMINAL_ASPECT_RATIO;
use uuid::Uuid;
use window_view::{
    debug_panic, Channels, ChildViewPosition, Config, RenderWindow, SharedWindow, ViewDimension,
    ViewError, ViewEvent, ViewState, WindowFactory, WindowView,
};

/// Creates panes for `AddView` and `SplitView` actions.
pub trait ViewFactory: Send + Sync {
    fn create_view(&self, args: &CreateViewArgs) -> anyhow::Result<Arc<dyn WindowView>>;
}

/// Notified after a pane has been removed from a container.
pub trait ViewRemovalListener: Send + Sync {
    fn on_view_removed(&self, view: &Arc<dyn WindowView>);
}

/// Collaborators shared by every container in a tree.
#[derive(Clone)]
pub struct ViewContext {
    pub channels: Arc<dyn Channels>,
    pub config: Arc<dyn Config>,
    pub window_factory: Arc<dyn WindowFactory>,
    pub view_factory: Option<Arc<dyn ViewFactory>>,
}

impl ViewContext {
    pub fn new(
        channels: Arc<dyn Channels>,
        config: Arc<dyn Config>,
        window_factory: Arc<dyn WindowFactory>,
    ) -> Self {
        Self {
            channels,
            config,
            window_factory,
            view_factory: None,
        }
    }

    pub fn with_view_factory(mut self, view_factory: Arc<dyn ViewFactory>) -> Self {
        self.view_factory = Some(view_factory);
        self
    }
}

/// How a container arranges its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerOrientation {
    /// Side-by-side columns.
    Vertical,
    /// Stacked rows.
    Horizontal,
    /// Chosen per render from the aspect ratio of the region.
    Dynamic,
}

impl ContainerOrientation {
    /// Orientation used to lay out a region of size `dimension`.
    pub fn resolve(self, dimension: ViewDimension) -> SplitOrientation {
        match self {
            ContainerOrientation::Vertical => SplitOrientation::Vertical,
            ContainerOrientation::Horizontal => SplitOrientation::Horizontal,
            ContainerOrientation::Dynamic => {
                if dimension.rows == 0 {
                    return SplitOrientation::Vertical;
                }
                let aspect_ratio = dimension.cols as f64 / dimension.rows as f64;
                if aspect_ratio < TERMINAL_ASPECT_RATIO {
                    SplitOrientation::Horizontal
                } else {
                    SplitOrientation::Vertical
                }
            }
        }
    }
}

impl From<SplitOrientation> for ContainerOrientation {
    fn from(orientation: SplitOrientation) -> Self {
        match orientation {
            SplitOrientation::Vertical => ContainerOrientation::Vertical,
            SplitOrientation::Horizontal => ContainerOrientation::Horizontal,
        }
    }
}

/// Split `dimension` between `child_count` children.
///
/// Every child gets `total / child_count` cells along the split axis and the
/// last child absorbs the remainder. With `full_screen_index` set, that child
/// gets the whole region and every other child a zero size.
pub fn calculate_child_view_positions(
    orientation: SplitOrientation,
    dimension: ViewDimension,
    child_count: usize,
    full_screen_index: Option<usize>,
) -> Vec<ChildViewPosition> {
    if let Some(active) = full_screen_index {
        return (0..child_count)
            .map(|index| {
                if index == active {
                    ChildViewPosition {
                        view_dimension: dimension,
                        start_row: 0,
                        start_col: 0,
                    }
                } else {
                    ChildViewPosition::default()
                }
            })
            .collect();
    }

    if child_count == 0 {
        return Vec::new();
    }

    let total = match orientation {
        SplitOrientation::Vertical => dimension.cols,
        SplitOrientation::Horizontal => dimension.rows,
    };
    let size = total / child_count;

    (0..child_count)
        .map(|index| {
            let offset = index * size;
            let length = if index + 1 == child_count {
                total - offset
            } else {
                size
            };
            match orientation {
                SplitOrientation::Vertical => ChildViewPosition {
                    view_dimension: ViewDimension::new(dimension.rows, length),
                    start_row: 0,
                    start_col: offset,
                },
                SplitOrientation::Horizontal => ChildViewPosition {
                    view_dimension: ViewDimension::new(length, dimension.cols),
                    start_row: offset,
                    start_col: 0,
                },
            }
        })
        .collect()
}

/// A child slot: a content pane with its render surface, or a nested container.
#[derive(Clone)]
pub enum PaneNode {
    Leaf {
        id: Uuid,
        view: Arc<dyn WindowView>,
        window: SharedWindow,
    },
    Split(Arc<ContainerView>),
}

impl PaneNode {
    pub fn view(&self) -> Arc<dyn WindowView> {
        match self {
            PaneNode::Leaf { view, .. } => Arc::clone(view),
            PaneNode::Split(container) => Arc::clone(container) as Arc<dyn WindowView>,
        }
    }

    pub fn as_container(&self) -> Option<&Arc<ContainerView>> {
        match self {
            PaneNode::Leaf { .. } => None,
            PaneNode::Split(container) => Some(container),
        }
    }
}

struct ContainerState {
    children: Vec<PaneNode>,
    active: usize,
    orientation: ContainerOrientation,
    effective_orientation: SplitOrientation,
    full_screen: bool,
    view_state: ViewState,
    /// Size of the region from the last layout.
    dimension: Option<ViewDimension>,
    removal_listeners: Vec<Arc<dyn ViewRemovalListener>>,
}

impl ContainerState {
    fn active_node(&self) -> Option<PaneNode> {
        if self.children.is_empty() {
            return None;
        }
        if self.active >= self.children.len() {
            debug_panic!(
                "active index {} out of range for {} children",
                self.active,
                self.children.len()
            );
        }
        self.children
            .get(self.active.min(self.children.len() - 1))
            .cloned()
    }

    fn layout(&mut self, dimension: ViewDimension) -> Vec<ChildViewPosition> {
        self.effective_orientation = self.orientation.resolve(dimension);
        self.dimension = Some(dimension);
        let full_screen_index = self.full_screen.then_some(self.active);
        calculate_child_view_positions(
            self.effective_orientation,
            dimension,
            self.children.len(),
            full_screen_index,
        )
    }

    fn remove_child(&mut self, matches: impl Fn(&PaneNode) -> bool) -> bool {
        let Some(index) = self.children.iter().position(matches) else {
            return false;
        };
        self.children.remove(index);
        if self.active >= self.children.len() {
            self.active = self.children.len().saturating_sub(1);
        }
        true
    }
}

enum SplitTarget {
    Nested(Arc<ContainerView>),
    Grow,
    Wrap(usize, PaneNode),
}

/// A node of the pane tree holding panes and nested containers.
pub struct ContainerView {
    view_id: ViewId,
    context: ViewContext,
    state: Mutex<ContainerState>,
}

impl ContainerView {
    pub fn new(context: ViewContext, orientation: ContainerOrientation) -> Self {
        Self::with_view_id(context, ViewId::Container, orientation)
    }

    pub fn with_view_id(
        context: ViewContext,
        view_id: ViewId,
        orientation: ContainerOrientation,
    ) -> Self {
        Self {
            view_id,
            context,
            state: Mutex::new(ContainerState {
                children: Vec::new(),
                active: 0,
                orientation,
                effective_orientation: orientation.resolve(ViewDimension::default()),
                full_screen: false,
                view_state: ViewState::Active,
                dimension: None,
                removal_listeners: Vec::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().children.len()
    }

    /// An empty container renders a placeholder and ignores navigation.
    pub fn is_empty(&self) -> bool {
        self.state.lock().children.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.state.lock().active
    }

    pub fn orientation(&self) -> ContainerOrientation {
        self.state.lock().orientation
    }

    pub fn is_full_screen(&self) -> bool {
        self.state.lock().full_screen
    }

    pub fn view_state(&self) -> ViewState {
        self.state.lock().view_state
    }

    pub fn children(&self) -> Vec<PaneNode> {
        self.state.lock().children.clone()
    }

    pub fn register_view_removal_listener(&self, listener: Arc<dyn ViewRemovalListener>) {
        self.state.lock().removal_listeners.push(listener);
    }

    /// Append a content pane, allocating its render surface.
    pub fn add_view(&self, view: Arc<dyn WindowView>) -> usize {
        let leaf = self.new_leaf(view);
        self.add_node(leaf)
    }

    pub fn add_container(&self, container: Arc<ContainerView>) -> usize {
        self.add_node(PaneNode::Split(container))
    }

    fn new_leaf(&self, view: Arc<dyn WindowView>) -> PaneNode {
        let id = Uuid::new_v4();
        let window = self.context.window_factory.create_window(&id.to_string());
        PaneNode::Leaf { id, view, window }
    }

    fn add_node(&self, node: PaneNode) -> usize {
        let child_view_id = node.view().view_id();
        let (index, view_state) = {
            let mut state = self.state.lock();
            state.children.push(node);
            (state.children.len() - 1, state.view_state)
        };
        tracing::debug!("{} added {} at index {}", self.view_id, child_view_id, index);
        self.on_state_change(view_state);
        index
    }

    pub fn set_active_child(&self, index: usize) -> bool {
        let view_state = {
            let mut state = self.state.lock();
            if index >= state.children.len() || index == state.active {
                return false;
            }
            state.active = index;
            state.view_state
        };
        self.on_state_change(view_state);
        true
    }

    /// The deepest active content pane.
    pub fn active_view(&self) -> Option<Arc<dyn WindowView>> {
        let node = self.state.lock().active_node()?;
        match node {
            PaneNode::Leaf { view, .. } => Some(view),
            PaneNode::Split(nested) => nested.active_view(),
        }
    }

    /// View ids from `ViewId::All` through every container on the active path
    /// down to the active pane.
    pub fn active_view_hierarchy(&self) -> ViewHierarchy {
        let mut hierarchy = ViewHierarchy::from([ViewId::All]);
        self.extend_active_hierarchy(&mut hierarchy);
        hierarchy
    }

    fn extend_active_hierarchy(&self, hierarchy: &mut ViewHierarchy) {
        hierarchy.push(self.view_id);
        let node = self.state.lock().active_node();
        match node {
            Some(PaneNode::Leaf { view, .. }) => hierarchy.push(view.view_id()),
            Some(PaneNode::Split(nested)) => nested.extend_active_hierarchy(hierarchy),
            None => {}
        }
    }

    /// Split the active pane, placing `view` next to it.
    ///
    /// A container with at most one child grows in place and takes the
    /// requested orientation. Otherwise the active pane and `view` are wrapped
    /// in a new nested container. Splits inside an active nested container are
    /// delegated to it.
    pub fn split_view(&self, orientation: SplitOrientation, view: Arc<dyn WindowView>) {
        let target = {
            let state = self.state.lock();
            match state.active_node() {
                Some(PaneNode::Split(nested)) => SplitTarget::Nested(nested),
                Some(leaf) if state.children.len() > 1 => SplitTarget::Wrap(state.active, leaf),
                _ => SplitTarget::Grow,
            }
        };

        match target {
            SplitTarget::Nested(nested) => return nested.split_view(orientation, view),
            SplitTarget::Grow => {
                let leaf = self.new_leaf(view);
                let mut state = self.state.lock();
                state.orientation = orientation.into();
                state.children.push(leaf);
                state.active = state.children.len() - 1;
            }
            SplitTarget::Wrap(index, leaf) => {
                let nested = Arc::new(ContainerView::new(self.context.clone(), orientation.into()));
                nested.add_node(leaf);
                let new_index = nested.add_view(view);
                nested.set_active_child(new_index);

                let mut state = self.state.lock();
                if let Some(slot) = state.children.get_mut(index) {
                    *slot = PaneNode::Split(nested);
                }
            }
        }

        tracing::debug!("{} split {:?}", self.view_id, orientation);
        let view_state = self.view_state();
        self.on_state_change(view_state);
    }

    /// Remove the active pane, collapsing nested containers left empty.
    ///
    /// Removal listeners run after the lock is released, then the remaining
    /// panes receive a [`ViewEvent::ViewRemoved`] for each removed pane.
    pub fn remove_active(&self) -> anyhow::Result<Vec<Arc<dyn WindowView>>> {
        let removed = self.remove_active_child();
        for view in &removed {
            self.handle_event(&ViewEvent::ViewRemoved {
                view_id: view.view_id(),
            })?;
        }
        Ok(removed)
    }

    fn remove_active_child(&self) -> Vec<Arc<dyn WindowView>> {
        let Some(node) = self.state.lock().active_node() else {
            return Vec::new();
        };

        let removed = match node {
            PaneNode::Split(nested) => {
                let removed = nested.remove_active_child();
                if nested.is_empty() {
                    self.state.lock().remove_child(|node| {
                        node.as_container()
                            .is_some_and(|container| Arc::ptr_eq(container, &nested))
                    });
                    tracing::debug!("{} collapsed empty nested container", self.view_id);
                }
                removed
            }
            PaneNode::Leaf { id, view, .. } => {
                self.state.lock().remove_child(
                    |node| matches!(node, PaneNode::Leaf { id: other, .. } if *other == id),
                );
                vec![view]
            }
        };

        let (listeners, view_state) = {
            let state = self.state.lock();
            (state.removal_listeners.clone(), state.view_state)
        };
        for view in &removed {
            tracing::debug!("{} removed {}", self.view_id, view.view_id());
            for listener in &listeners {
                listener.on_view_removed(view);
            }
        }
        self.on_state_change(view_state);
        removed
    }

    /// Move focus to the next pane. Returns `true` when focus wrapped past the
    /// last pane back to the first.
    pub fn next_view(&self) -> bool {
        let Some(node) = self.state.lock().active_node() else {
            return true;
        };
        if let PaneNode::Split(nested) = &node {
            if !nested.next_view() {
                return false;
            }
        }

        let (entered, wrapped, view_state) = {
            let mut state = self.state.lock();
            let wrapped = state.active + 1 >= state.children.len();
            state.active = if wrapped { 0 } else { state.active + 1 };
            (state.active_node(), wrapped, state.view_state)
        };
        if let Some(PaneNode::Split(nested)) = entered {
            nested.focus_first();
        }
        self.on_state_change(view_state);
        wrapped
    }

    /// Move focus to the previous pane. Returns `true` when focus wrapped past
    /// the first pane back to the last.
    pub fn prev_view(&self) -> bool {
        let Some(node) = self.state.lock().active_node() else {
            return true;
        };
        if let PaneNode::Split(nested) = &node {
            if !nested.prev_view() {
                return false;
            }
        }

        let (entered, wrapped, view_state) = {
            let mut state = self.state.lock();
            let wrapped = state.active == 0;
            state.active = if wrapped {
                state.children.len().saturating_sub(1)
            } else {
                state.active - 1
            };
            (state.active_node(), wrapped, state.view_state)
        };
        if let Some(PaneNode::Split(nested)) = entered {
            nested.focus_last();
        }
        self.on_state_change(view_state);
        wrapped
    }

    fn focus_first(&self) {
        let (entered, view_state) = {
            let mut state = self.state.lock();
            state.active = 0;
            (state.active_node(), state.view_state)
        };
        if let Some(PaneNode::Split(nested)) = entered {
            nested.focus_first();
        }
        self.on_state_change(view_state);
    }

    fn focus_last(&self) {
        let (entered, view_state) = {
            let mut state = self.state.lock();
            state.active = state.children.len().saturating_sub(1);
            (state.active_node(), state.view_state)
        };
        if let Some(PaneNode::Split(nested)) = entered {
            nested.focus_last();
        }
        self.on_state_change(view_state);
    }

    pub fn toggle_full_screen(&self) {
        let full_screen = !self.is_full_screen();
        self.set_full_screen(full_screen);
    }

    fn set_full_screen(&self, full_screen: bool) {
        let nested: Vec<Arc<ContainerView>> = {
            let mut state = self.state.lock();
            state.full_screen = full_screen;
            state
                .children
                .iter()
                .filter_map(|node| node.as_container().cloned())
                .collect()
        };
        tracing::debug!("{} full screen: {}", self.view_id, full_screen);
        for container in nested {
            container.set_full_screen(full_screen);
        }
    }

    /// Flip the orientation of the container holding the active pane.
    pub fn toggle_view_layout(&self) {
        let node = self.state.lock().active_node();
        if let Some(PaneNode::Split(nested)) = node {
            return nested.toggle_view_layout();
        }

        let mut state = self.state.lock();
        let current = match state.orientation {
            ContainerOrientation::Vertical => SplitOrientation::Vertical,
            ContainerOrientation::Horizontal => SplitOrientation::Horizontal,
            ContainerOrientation::Dynamic => state.effective_orientation,
        };
        state.orientation = match current {
            SplitOrientation::Vertical => ContainerOrientation::Horizontal,
            SplitOrientation::Horizontal => ContainerOrientation::Vertical,
        };
        tracing::debug!("{} orientation: {:?}", self.view_id, state.orientation);
    }

    /// Compute child positions for a region of size `dimension`.
    pub fn layout(&self, dimension: ViewDimension) -> Vec<ChildViewPosition> {
        self.state.lock().layout(dimension)
    }

    /// Lay out and render every visible pane at the given absolute position.
    ///
    /// Returns the rendered windows. Zero-size children are skipped and an
    /// empty container renders nothing.
    pub fn render_at(
        &self,
        dimension: ViewDimension,
        start_row: usize,
        start_col: usize,
    ) -> anyhow::Result<Vec<SharedWindow>> {
        let (children, positions) = {
            let mut state = self.state.lock();
            let positions = state.layout(dimension);
            (state.children.clone(), positions)
        };

        if children.is_empty() {
            tracing::trace!("{} has no children to render", self.view_id);
            return Ok(Vec::new());
        }

        let mut windows = Vec::new();
        for (child, position) in children.iter().zip(&positions) {
            if position.view_dimension.is_empty() {
                continue;
            }
            let row = start_row + position.start_row;
            let col = start_col + position.start_col;

            match child {
                PaneNode::Leaf { view, window, .. } => {
                    {
                        let mut win = window.lock();
                        win.resize(position.view_dimension);
                        win.set_position(row, col);
                        view.render(&mut **win)
                            .with_context(|| format!("failed to render {}", view.view_id()))?;
                    }
                    windows.push(Arc::clone(window));
                }
                PaneNode::Split(nested) => {
                    windows.extend(nested.render_at(position.view_dimension, row, col)?);
                }
            }
        }

        Ok(windows)
    }

    fn create_view(&self, args: &CreateViewArgs) -> anyhow::Result<Arc<dyn WindowView>> {
        let factory = self
            .context
            .view_factory
            .as_ref()
            .ok_or(ViewError::NoViewFactory)?;
        factory
            .create_view(args)
            .with_context(|| format!("failed to create {} view", args.view_id))
    }

    fn handle_mouse_select(&self, action: &Action) -> anyhow::Result<bool> {
        let event = action.mouse_event()?;
        // The tree may have changed since the last render.
        let hit = {
            let mut state = self.state.lock();
            let dimension = state.dimension;
            dimension.and_then(|dimension| {
                let positions = state.layout(dimension);
                let index = positions
                    .iter()
                    .position(|position| position.contains(event.row, event.col))?;
                let child = state.children.get(index)?.clone();
                Some((index, positions[index], child))
            })
        };

        let Some((index, position, child)) = hit else {
            return Ok(false);
        };

        self.set_active_child(index);
        let translated = MouseEvent {
            row: event.row - position.start_row,
            col: event.col - position.start_col,
            ..event
        };
        child.view().handle_action(&action.with_mouse_event(translated))
    }
}

impl WindowView for ContainerView {
    fn view_id(&self) -> ViewId {
        self.view_id
    }

    fn title(&self) -> String {
        self.active_view()
            .map_or_else(|| self.view_id.to_string(), |view| view.title())
    }

    fn render(&self, win: &mut dyn RenderWindow) -> anyhow::Result<()> {
        let (start_row, start_col) = win.position();
        self.render_at(win.dimension(), start_row, start_col)?;
        Ok(())
    }

    fn handle_action(&self, action: &Action) -> anyhow::Result<bool> {
        match action.action_type {
            ActionType::NextView => {
                if self.next_view() {
                    tracing::trace!("{} wrapped to first view", self.view_id);
                }
            }
            ActionType::PrevView => {
                if self.prev_view() {
                    tracing::trace!("{} wrapped to last view", self.view_id);
                }
            }
            ActionType::FullScreenView => self.toggle_full_screen(),
            ActionType::ToggleViewLayout => self.toggle_view_layout(),
            ActionType::AddView => {
                let view = self.create_view(action.create_view_args()?)?;
                let index = self.add_view(view);
                self.set_active_child(index);
            }
            ActionType::SplitView => {
                let args = action.split_view_args()?;
                let view = self.create_view(&args.create_view)?;
                self.split_view(args.orientation, view);
            }
            ActionType::RemoveView => {
                self.remove_active()?;
            }
            ActionType::MouseSelect => return self.handle_mouse_select(action),
            _ => {
                let node = self.state.lock().active_node();
                return match node {
                    Some(node) => node.view().handle_action(action),
                    None => Ok(false),
                };
            }
        }

        self.context.channels.update_display();
        Ok(true)
    }

    fn handle_event(&self, event: &ViewEvent) -> anyhow::Result<()> {
        for child in self.children() {
            child.view().handle_event(event)?;
        }
        Ok(())
    }

    /// The active child receives `view_state` as is; the others are shown as
    /// inactive, and hidden only when this container is hidden.
    fn on_state_change(&self, view_state: ViewState) {
        let (children, active) = {
            let mut state = self.state.lock();
            state.view_state = view_state;
            (state.children.clone(), state.active)
        };

        for (index, child) in children.iter().enumerate() {
            let child_state = if index == active {
                view_state
            } else if view_state == ViewState::InactiveAndInvisible {
                ViewState::InactiveAndInvisible
            } else {
                ViewState::InactiveAndVisible
            };
            child.view().on_state_change(child_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actions::{ActionArg, MouseEventType, SplitViewArgs};
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use window_view::test_support::{ListPane, MockWindowFactory, RecordingChannels, StaticConfig};

    struct Fixture {
        channels: Arc<RecordingChannels>,
        factory: Arc<MockWindowFactory>,
        context: ViewContext,
    }

    impl Fixture {
        fn new() -> Self {
            let channels = Arc::new(RecordingChannels::new());
            let factory = Arc::new(MockWindowFactory::new());
            let context = ViewContext::new(
                channels.clone(),
                Arc::new(StaticConfig::default()),
                factory.clone(),
            );
            Self {
                channels,
                factory,
                context,
            }
        }

        fn pane(&self, view_id: ViewId) -> Arc<ListPane> {
            Arc::new(ListPane::with_rows(
                view_id,
                50,
                self.context.channels.clone(),
                self.context.config.clone(),
            ))
        }

        fn container(&self, orientation: ContainerOrientation, panes: &[ViewId]) -> ContainerView {
            let container = ContainerView::new(self.context.clone(), orientation);
            for view_id in panes {
                container.add_view(self.pane(*view_id));
            }
            container
        }
    }

    fn active_id(container: &ContainerView) -> Option<ViewId> {
        container.active_view().map(|view| view.view_id())
    }

    fn widths(positions: &[ChildViewPosition]) -> Vec<usize> {
        positions.iter().map(|p| p.view_dimension.cols).collect()
    }

    #[test]
    fn vertical_layout_gives_remainder_to_last_child() {
        let positions = calculate_child_view_positions(
            SplitOrientation::Vertical,
            ViewDimension::new(24, 80),
            3,
            None,
        );
        assert_eq!(widths(&positions), vec![26, 26, 28]);
        assert_eq!(
            positions.iter().map(|p| p.start_col).collect::<Vec<_>>(),
            vec![0, 26, 52]
        );
        assert!(positions.iter().all(|p| p.view_dimension.rows == 24));
    }

    #[test]
    fn horizontal_layout_splits_rows() {
        let positions = calculate_child_view_positions(
            SplitOrientation::Horizontal,
            ViewDimension::new(25, 80),
            2,
            None,
        );
        assert_eq!(
            positions,
            vec![
                ChildViewPosition {
                    view_dimension: ViewDimension::new(12, 80),
                    start_row: 0,
                    start_col: 0,
                },
                ChildViewPosition {
                    view_dimension: ViewDimension::new(13, 80),
                    start_row: 12,
                    start_col: 0,
                },
            ]
        );
    }

    #[test]
    fn full_screen_layout_gives_active_child_everything() {
        let dimension = ViewDimension::new(24, 80);
        let positions =
            calculate_child_view_positions(SplitOrientation::Vertical, dimension, 3, Some(1));
        assert_eq!(positions[0].view_dimension, ViewDimension::new(0, 0));
        assert_eq!(positions[1].view_dimension, dimension);
        assert_eq!(positions[2].view_dimension, ViewDimension::new(0, 0));
    }

    #[test_case(24, 80, SplitOrientation::Vertical ; "standard terminal")]
    #[test_case(60, 80, SplitOrientation::Horizontal ; "tall terminal")]
    #[test_case(24, 200, SplitOrientation::Vertical ; "wide terminal")]
    #[test_case(0, 80, SplitOrientation::Vertical ; "degenerate height")]
    fn dynamic_orientation_follows_aspect_ratio(rows: usize, cols: usize, expected: SplitOrientation) {
        assert_eq!(
            ContainerOrientation::Dynamic.resolve(ViewDimension::new(rows, cols)),
            expected
        );
    }

    #[test]
    fn full_screen_toggle_applies_to_nested_containers() {
        let fixture = Fixture::new();
        let root = fixture.container(ContainerOrientation::Vertical, &[ViewId::History]);
        let nested = Arc::new(fixture.container(
            ContainerOrientation::Horizontal,
            &[ViewId::Commit, ViewId::Diff],
        ));
        root.add_container(nested.clone());

        root.toggle_full_screen();
        assert!(root.is_full_screen());
        assert!(nested.is_full_screen());

        root.toggle_full_screen();
        assert!(!nested.is_full_screen());
    }

    #[test]
    fn split_grows_flat_container_then_nests() {
        let fixture = Fixture::new();
        let root = fixture.container(ContainerOrientation::Vertical, &[ViewId::History]);

        root.split_view(SplitOrientation::Horizontal, fixture.pane(ViewId::Commit));
        assert_eq!(root.len(), 2);
        assert_eq!(root.orientation(), ContainerOrientation::Horizontal);
        assert_eq!(active_id(&root), Some(ViewId::Commit));

        root.split_view(SplitOrientation::Vertical, fixture.pane(ViewId::Diff));
        assert_eq!(root.len(), 2);
        let nested = root.children()[1].as_container().cloned().unwrap();
        assert_eq!(nested.len(), 2);
        assert_eq!(nested.orientation(), ContainerOrientation::Vertical);
        assert_eq!(active_id(&root), Some(ViewId::Diff));
        assert_eq!(
            root.active_view_hierarchy(),
            ViewHierarchy::from([ViewId::All, ViewId::Container, ViewId::Container, ViewId::Diff])
        );
    }

    #[test]
    fn split_inside_nested_container_is_delegated() {
        let fixture = Fixture::new();
        let root = fixture.container(ContainerOrientation::Vertical, &[ViewId::History]);
        root.split_view(SplitOrientation::Vertical, fixture.pane(ViewId::Commit));
        root.split_view(SplitOrientation::Horizontal, fixture.pane(ViewId::Diff));
        root.split_view(SplitOrientation::Horizontal, fixture.pane(ViewId::Status));

        let nested = root.children()[1].as_container().cloned().unwrap();
        assert_eq!(root.len(), 2);
        assert_eq!(nested.len(), 2);
        let deepest = nested.children()[1].as_container().cloned().unwrap();
        assert_eq!(deepest.len(), 2);
        assert_eq!(active_id(&root), Some(ViewId::Status));
    }

    #[test]
    fn remove_clamps_active_index() {
        let fixture = Fixture::new();
        let root = fixture.container(
            ContainerOrientation::Vertical,
            &[ViewId::History, ViewId::Commit, ViewId::Diff],
        );
        root.set_active_child(2);

        let removed = root.remove_active().unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].view_id(), ViewId::Diff);
        assert_eq!(root.active_index(), 1);
        assert_eq!(active_id(&root), Some(ViewId::Commit));
    }

    struct RecordingListener {
        removed: Mutex<Vec<ViewId>>,
    }

    impl ViewRemovalListener for RecordingListener {
        fn on_view_removed(&self, view: &Arc<dyn WindowView>) {
            self.removed.lock().push(view.view_id());
        }
    }

    #[test]
    fn removing_last_nested_pane_collapses_container() {
        let fixture = Fixture::new();
        let root = fixture.container(ContainerOrientation::Vertical, &[ViewId::History]);
        let nested = Arc::new(fixture.container(ContainerOrientation::Horizontal, &[ViewId::Commit]));
        root.add_container(nested);
        root.set_active_child(1);
        let listener = Arc::new(RecordingListener {
            removed: Mutex::new(Vec::new()),
        });
        root.register_view_removal_listener(listener.clone());

        root.remove_active().unwrap();

        assert_eq!(root.len(), 1);
        assert_eq!(active_id(&root), Some(ViewId::History));
        assert_eq!(*listener.removed.lock(), vec![ViewId::Commit]);
    }

    #[test]
    fn remaining_panes_receive_removal_event() {
        let fixture = Fixture::new();
        let root = ContainerView::new(fixture.context.clone(), ContainerOrientation::Vertical);
        let history = fixture.pane(ViewId::History);
        root.add_view(history.clone());
        root.add_view(fixture.pane(ViewId::Commit));
        root.set_active_child(1);

        root.remove_active().unwrap();

        assert_eq!(
            history.events(),
            vec![ViewEvent::ViewRemoved {
                view_id: ViewId::Commit
            }]
        );
    }

    #[test]
    fn remove_on_empty_container_is_noop() {
        let fixture = Fixture::new();
        let root = fixture.container(ContainerOrientation::Vertical, &[]);
        assert!(root.remove_active().unwrap().is_empty());
        assert!(root.next_view());
        assert_eq!(root.active_view_hierarchy(), ViewHierarchy::from([ViewId::All, ViewId::Container]));
    }

    #[test]
    fn flat_container_wraps_once_per_traversal() {
        let fixture = Fixture::new();
        let root = fixture.container(ContainerOrientation::Vertical, &[ViewId::History, ViewId::Commit]);

        let wraps: Vec<bool> = (0..4).map(|_| root.next_view()).collect();
        assert_eq!(wraps, vec![false, true, false, true]);

        let wraps: Vec<bool> = (0..2).map(|_| root.prev_view()).collect();
        assert_eq!(wraps, vec![true, false]);
    }

    #[test]
    fn nested_container_wraps_after_inner_and_outer_indices() {
        let fixture = Fixture::new();
        let root = fixture.container(ContainerOrientation::Vertical, &[ViewId::History]);
        let nested = Arc::new(fixture.container(
            ContainerOrientation::Horizontal,
            &[ViewId::Commit, ViewId::Diff],
        ));
        root.add_container(nested);

        let mut visited = Vec::new();
        let mut wraps = Vec::new();
        for _ in 0..3 {
            wraps.push(root.next_view());
            visited.push(active_id(&root).unwrap());
        }

        assert_eq!(wraps, vec![false, false, true]);
        assert_eq!(visited, vec![ViewId::Commit, ViewId::Diff, ViewId::History]);
    }

    #[test]
    fn prev_view_enters_nested_container_at_last_pane() {
        let fixture = Fixture::new();
        let root = fixture.container(ContainerOrientation::Vertical, &[ViewId::History]);
        let nested = Arc::new(fixture.container(
            ContainerOrientation::Horizontal,
            &[ViewId::Commit, ViewId::Diff],
        ));
        root.add_container(nested);

        assert!(root.prev_view());
        assert_eq!(active_id(&root), Some(ViewId::Diff));
        assert!(!root.prev_view());
        assert_eq!(active_id(&root), Some(ViewId::Commit));
        assert!(!root.prev_view());
        assert_eq!(active_id(&root), Some(ViewId::History));
    }

    #[test]
    fn state_change_marks_inactive_children_visible() {
        let fixture = Fixture::new();
        let root = ContainerView::new(fixture.context.clone(), ContainerOrientation::Vertical);
        let history = fixture.pane(ViewId::History);
        let commit = fixture.pane(ViewId::Commit);
        root.add_view(history.clone());
        root.add_view(commit.clone());

        root.on_state_change(ViewState::Active);
        assert_eq!(history.view_state(), ViewState::Active);
        assert_eq!(commit.view_state(), ViewState::InactiveAndVisible);

        root.next_view();
        assert_eq!(history.view_state(), ViewState::InactiveAndVisible);
        assert_eq!(commit.view_state(), ViewState::Active);

        root.on_state_change(ViewState::InactiveAndInvisible);
        assert_eq!(history.view_state(), ViewState::InactiveAndInvisible);
        assert_eq!(commit.view_state(), ViewState::InactiveAndInvisible);
    }

    #[test]
    fn toggle_layout_applies_to_deepest_container() {
        let fixture = Fixture::new();
        let root = fixture.container(ContainerOrientation::Vertical, &[ViewId::History]);
        let nested = Arc::new(fixture.container(
            ContainerOrientation::Horizontal,
            &[ViewId::Commit, ViewId::Diff],
        ));
        root.add_container(nested.clone());
        root.set_active_child(1);

        root.toggle_view_layout();
        assert_eq!(root.orientation(), ContainerOrientation::Vertical);
        assert_eq!(nested.orientation(), ContainerOrientation::Vertical);
    }

    #[test]
    fn toggle_layout_fixes_dynamic_orientation_to_opposite() {
        let fixture = Fixture::new();
        let root = fixture.container(ContainerOrientation::Dynamic, &[ViewId::History, ViewId::Commit]);
        root.layout(ViewDimension::new(60, 80));

        root.toggle_view_layout();
        assert_eq!(root.orientation(), ContainerOrientation::Vertical);
    }

    #[test]
    fn render_positions_windows_and_skips_hidden_children() {
        let fixture = Fixture::new();
        let root = fixture.container(
            ContainerOrientation::Vertical,
            &[ViewId::History, ViewId::Commit, ViewId::Diff],
        );

        let windows = root.render_at(ViewDimension::new(24, 80), 1, 0).unwrap();
        let placed: Vec<((usize, usize), ViewDimension)> = windows
            .iter()
            .map(|win| {
                let win = win.lock();
                (win.position(), win.dimension())
            })
            .collect();
        assert_eq!(
            placed,
            vec![
                ((1, 0), ViewDimension::new(24, 26)),
                ((1, 26), ViewDimension::new(24, 26)),
                ((1, 52), ViewDimension::new(24, 28)),
            ]
        );

        root.set_active_child(1);
        root.toggle_full_screen();
        let windows = root.render_at(ViewDimension::new(24, 80), 0, 0).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].lock().dimension(), ViewDimension::new(24, 80));
        let title = fixture.factory.window(windows[0].lock().id()).unwrap().title;
        assert_eq!(title, "Commit");
    }

    #[test]
    fn empty_container_renders_nothing() {
        let fixture = Fixture::new();
        let root = fixture.container(ContainerOrientation::Dynamic, &[]);
        assert!(root.render_at(ViewDimension::new(24, 80), 0, 0).unwrap().is_empty());
        assert!(root.is_empty());
        assert_eq!(fixture.factory.created(), 0);
    }

    #[test]
    fn mouse_click_activates_child_and_translates_coordinates() {
        let fixture = Fixture::new();
        let root = ContainerView::new(fixture.context.clone(), ContainerOrientation::Vertical);
        let history = fixture.pane(ViewId::History);
        let commit = fixture.pane(ViewId::Commit);
        root.add_view(history.clone());
        root.add_view(commit.clone());
        root.render_at(ViewDimension::new(24, 80), 0, 0).unwrap();

        let click = MouseEvent::new(MouseEventType::Select, 5, 50).action();
        assert!(root.handle_action(&click).unwrap());

        assert_eq!(root.active_index(), 1);
        let received = commit.received_actions();
        assert_eq!(received.len(), 1);
        let event = received[0].mouse_event().unwrap();
        assert_eq!((event.row, event.col), (5, 10));
        assert_eq!(commit.view_position().active_row_index(), 4);
        assert!(history.received_actions().is_empty());
    }

    #[test]
    fn mouse_click_after_remove_hits_current_layout() {
        let fixture = Fixture::new();
        let root = ContainerView::new(fixture.context.clone(), ContainerOrientation::Vertical);
        let commit = fixture.pane(ViewId::Commit);
        let diff = fixture.pane(ViewId::Diff);
        root.add_view(fixture.pane(ViewId::History));
        root.add_view(commit.clone());
        root.add_view(diff.clone());
        root.render_at(ViewDimension::new(24, 80), 0, 0).unwrap();
        root.remove_active().unwrap();

        // Column 30 was in the middle pane before the removal.
        let click = MouseEvent::new(MouseEventType::Select, 5, 30).action();
        assert!(root.handle_action(&click).unwrap());

        assert_eq!(active_id(&root), Some(ViewId::Commit));
        let clicks: Vec<_> = commit
            .received_actions()
            .iter()
            .filter_map(|action| action.mouse_event().ok())
            .map(|event| (event.row, event.col))
            .collect();
        assert_eq!(clicks, vec![(5, 30)]);
        assert!(diff.received_actions().iter().all(|action| action.action_type != ActionType::MouseSelect));
    }

    #[test]
    fn mouse_click_before_first_render_is_not_handled() {
        let fixture = Fixture::new();
        let root = fixture.container(ContainerOrientation::Vertical, &[ViewId::History]);

        let click = MouseEvent::new(MouseEventType::Select, 1, 1).action();
        assert!(!root.handle_action(&click).unwrap());
    }

    #[test]
    fn mouse_click_outside_children_is_not_handled() {
        let fixture = Fixture::new();
        let root = fixture.container(ContainerOrientation::Vertical, &[ViewId::History]);
        root.render_at(ViewDimension::new(10, 40), 0, 0).unwrap();

        let click = MouseEvent::new(MouseEventType::Select, 30, 5).action();
        assert!(!root.handle_action(&click).unwrap());
    }

    #[test]
    fn other_actions_are_forwarded_to_active_pane() {
        let fixture = Fixture::new();
        let root = ContainerView::new(fixture.context.clone(), ContainerOrientation::Vertical);
        let history = fixture.pane(ViewId::History);
        root.add_view(history.clone());

        assert!(root.handle_action(&ActionType::NextLine.into()).unwrap());
        assert_eq!(history.view_position().active_row_index(), 1);
        assert!(!root.handle_action(&ActionType::Select.into()).unwrap());
    }

    #[test]
    fn add_view_without_factory_is_an_error() {
        let fixture = Fixture::new();
        let root = fixture.container(ContainerOrientation::Vertical, &[ViewId::History]);
        let action = Action::with_arg(
            ActionType::AddView,
            ActionArg::CreateView(CreateViewArgs::new(ViewId::Diff)),
        );

        let err = root.handle_action(&action).unwrap_err();
        assert_eq!(err.downcast_ref::<ViewError>(), Some(&ViewError::NoViewFactory));
        assert_eq!(fixture.channels.display_updates(), 0);
    }

    struct PaneFactory {
        context: ViewContext,
    }

    impl ViewFactory for PaneFactory {
        fn create_view(&self, args: &CreateViewArgs) -> anyhow::Result<Arc<dyn WindowView>> {
            if args.view_id == ViewId::Error {
                return Err(ViewError::UnknownView(args.view_id).into());
            }
            Ok(Arc::new(ListPane::with_rows(
                args.view_id,
                10,
                self.context.channels.clone(),
                self.context.config.clone(),
            )))
        }
    }

    #[test]
    fn split_action_creates_view_through_factory() {
        let fixture = Fixture::new();
        let context = fixture.context.clone().with_view_factory(Arc::new(PaneFactory {
            context: fixture.context.clone(),
        }));
        let root = ContainerView::new(context, ContainerOrientation::Vertical);
        root.add_view(fixture.pane(ViewId::History));

        let split = Action::with_arg(
            ActionType::SplitView,
            ActionArg::SplitView(SplitViewArgs {
                orientation: SplitOrientation::Horizontal,
                create_view: CreateViewArgs::new(ViewId::Diff),
            }),
        );
        assert!(root.handle_action(&split).unwrap());
        assert_eq!(active_id(&root), Some(ViewId::Diff));
        assert_eq!(fixture.channels.display_updates(), 1);

        let failing = Action::with_arg(
            ActionType::AddView,
            ActionArg::CreateView(CreateViewArgs::new(ViewId::Error)),
        );
        let err = root.handle_action(&failing).unwrap_err();
        assert_eq!(err.to_string(), "failed to create Error view");
        assert_eq!(root.len(), 2);
    }
}
