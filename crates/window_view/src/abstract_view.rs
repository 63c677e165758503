use std::sync::Arc;

use actions::{Action, ActionType, MouseEvent};
use settings::constants::layout::BORDER_WIDTH;
use settings::ConfigVariable;

use crate::{Channels, Config, ViewDimension, ViewPosition};

/// The capability a content pane exposes so [`AbstractWindowView`] can
/// navigate it without knowing what it renders.
pub trait ChildWindowView {
    fn view_pos(&mut self) -> &mut ViewPosition;

    /// Total number of rows the pane can display.
    fn rows(&self) -> usize;

    /// Dimension of the window the pane was last rendered into, border included.
    fn view_dimension(&self) -> ViewDimension;

    /// Called after the active row moved. Errors propagate to the caller of
    /// [`AbstractWindowView::handle_action`].
    fn on_row_selected(&mut self, row_index: usize) -> anyhow::Result<()>;
}

/// Implements movement, paging, scrolling and mouse actions for any
/// [`ChildWindowView`].
pub struct AbstractWindowView {
    channels: Arc<dyn Channels>,
    config: Arc<dyn Config>,
    border_width: usize,
}

impl AbstractWindowView {
    pub fn new(channels: Arc<dyn Channels>, config: Arc<dyn Config>) -> Self {
        Self {
            channels,
            config,
            border_width: BORDER_WIDTH,
        }
    }

    pub fn channels(&self) -> &Arc<dyn Channels> {
        &self.channels
    }

    pub fn config(&self) -> &Arc<dyn Config> {
        &self.config
    }

    pub fn border_width(&self) -> usize {
        self.border_width
    }

    /// Apply `action` to `child`.
    ///
    /// Returns `Ok(false)` for actions outside the navigation set so the
    /// pane can handle them itself.
    pub fn handle_action(
        &self,
        action: &Action,
        child: &mut impl ChildWindowView,
    ) -> anyhow::Result<bool> {
        let rows = child.rows();
        let dimension = child.view_dimension();
        let page_rows = dimension.content_rows(self.border_width);
        let page_cols = dimension.content_cols(self.border_width);

        match action.action_type {
            ActionType::PrevLine => self.cursor_moved(child, |pos| pos.move_line_up())?,
            ActionType::NextLine => self.cursor_moved(child, |pos| pos.move_line_down(rows))?,
            ActionType::PrevPage => self.cursor_moved(child, |pos| pos.move_page_up(page_rows))?,
            ActionType::NextPage => {
                self.cursor_moved(child, |pos| pos.move_page_down(page_rows, rows))?
            }
            ActionType::PrevHalfPage => {
                self.cursor_moved(child, |pos| pos.move_half_page_up(page_rows))?
            }
            ActionType::NextHalfPage => {
                self.cursor_moved(child, |pos| pos.move_half_page_down(page_rows, rows))?
            }
            ActionType::FirstLine => self.cursor_moved(child, |pos| pos.move_to_first_line())?,
            ActionType::LastLine => self.cursor_moved(child, |pos| pos.move_to_last_line(rows))?,
            ActionType::CursorTopView => {
                self.cursor_moved(child, |pos| pos.move_cursor_top_page())?
            }
            ActionType::CursorMiddleView => {
                self.cursor_moved(child, |pos| pos.move_cursor_middle_page(page_rows, rows))?
            }
            ActionType::CursorBottomView => {
                self.cursor_moved(child, |pos| pos.move_cursor_bottom_page(page_rows, rows))?
            }
            ActionType::ScrollRight => self.scrolled(child, |pos| pos.move_page_right(page_cols)),
            ActionType::ScrollLeft => self.scrolled(child, |pos| pos.move_page_left(page_cols)),
            ActionType::CenterView => self.scrolled(child, |pos| pos.center_active_row(page_rows)),
            ActionType::ScrollCursorTop => self.scrolled(child, |pos| pos.scroll_active_row_top()),
            ActionType::ScrollCursorBottom => {
                self.scrolled(child, |pos| pos.scroll_active_row_bottom(page_rows))
            }
            ActionType::MouseSelect => self.mouse_select(action.mouse_event()?, child, rows)?,
            ActionType::MouseScrollDown => {
                let scroll_rows = self.scroll_rows();
                self.cursor_moved(child, |pos| pos.scroll_down(rows, page_rows, scroll_rows))?
            }
            ActionType::MouseScrollUp => {
                let scroll_rows = self.scroll_rows();
                self.cursor_moved(child, |pos| pos.scroll_up(page_rows, scroll_rows))?
            }
            _ => return Ok(false),
        }

        Ok(true)
    }

    fn cursor_moved<C: ChildWindowView>(
        &self,
        child: &mut C,
        op: impl FnOnce(&mut ViewPosition) -> bool,
    ) -> anyhow::Result<()> {
        if op(child.view_pos()) {
            let row_index = child.view_pos().active_row_index();
            child.on_row_selected(row_index)?;
            self.channels.update_display();
        }
        Ok(())
    }

    fn scrolled<C: ChildWindowView>(&self, child: &mut C, op: impl FnOnce(&mut ViewPosition) -> bool) {
        if op(child.view_pos()) {
            self.channels.update_display();
        }
    }

    fn mouse_select<C: ChildWindowView>(
        &self,
        event: MouseEvent,
        child: &mut C,
        rows: usize,
    ) -> anyhow::Result<()> {
        let window_rows = child.view_dimension().rows;
        if event.row == 0 || event.row + 1 >= window_rows {
            return Ok(());
        }

        let row_index = child.view_pos().view_start_row_index() + event.row - 1;
        if row_index >= rows {
            return Ok(());
        }

        self.cursor_moved(child, |pos| pos.set_active_row_index(row_index))
    }

    fn scroll_rows(&self) -> usize {
        usize::try_from(self.config.get_int(ConfigVariable::MouseScrollRows)).unwrap_or(1)
    }
}
