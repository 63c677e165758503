//! Cursor and viewport state for a scrollable pane.
//!
//! Every operation returns whether the state changed. Callers rely on a
//! `false` result to skip redisplay, so it must be exact.

/// Scroll and cursor state for one navigable context.
///
/// `active_row_index` is the logical cursor row. `view_start_row_index` is the
/// first visible row and never exceeds the active row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewPosition {
    active_row_index: usize,
    view_start_row_index: usize,
    view_start_column: usize,
}

impl ViewPosition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_row_index(&self) -> usize {
        self.active_row_index
    }

    pub fn view_start_row_index(&self) -> usize {
        self.view_start_row_index
    }

    pub fn view_start_column(&self) -> usize {
        self.view_start_column
    }

    /// Index of the active row relative to the first visible row.
    pub fn selected_row_index(&self) -> usize {
        self.active_row_index
            .saturating_sub(self.view_start_row_index)
    }

    fn update(&mut self, op: impl FnOnce(&mut Self)) -> bool {
        let before = *self;
        op(self);
        *self != before
    }

    /// Set the active row without bounds checks. Used by search and mouse handlers.
    pub fn set_active_row_index(&mut self, row_index: usize) -> bool {
        self.update(|pos| pos.active_row_index = row_index)
    }

    /// Repair the viewport after a resize or a change in row count.
    ///
    /// Leaves the active row inside the visible window and fills the window
    /// from the top when rows below it are missing. Calling it twice with the
    /// same arguments changes nothing the second time.
    pub fn determine_view_start_row(&mut self, view_rows: usize, rows: usize) -> bool {
        if view_rows == 0 {
            return false;
        }

        self.update(|pos| {
            pos.active_row_index = if rows == 0 {
                0
            } else {
                pos.active_row_index.min(rows - 1)
            };

            if pos.view_start_row_index > pos.active_row_index {
                pos.view_start_row_index = pos.active_row_index;
            }

            let row_diff = pos.active_row_index - pos.view_start_row_index;
            if row_diff >= view_rows {
                pos.view_start_row_index += row_diff + 1 - view_rows;
            }

            let visible_rows = rows.saturating_sub(pos.view_start_row_index);
            if visible_rows < view_rows && pos.view_start_row_index > 0 {
                pos.view_start_row_index -= pos
                    .view_start_row_index
                    .min(view_rows - visible_rows);
            }
        })
    }

    pub fn move_line_up(&mut self) -> bool {
        self.update(|pos| {
            if pos.active_row_index > 0 {
                pos.active_row_index -= 1;
                pos.view_start_row_index = pos.view_start_row_index.min(pos.active_row_index);
            }
        })
    }

    pub fn move_line_down(&mut self, rows: usize) -> bool {
        self.update(|pos| {
            if pos.active_row_index + 1 < rows {
                pos.active_row_index += 1;
            }
        })
    }

    pub fn move_page_up(&mut self, page_rows: usize) -> bool {
        self.update(|pos| pos.move_rows_up(page_rows))
    }

    pub fn move_page_down(&mut self, page_rows: usize, rows: usize) -> bool {
        self.update(|pos| pos.move_rows_down(page_rows, rows))
    }

    pub fn move_half_page_up(&mut self, page_rows: usize) -> bool {
        self.update(|pos| pos.move_rows_up((page_rows / 2).max(1)))
    }

    pub fn move_half_page_down(&mut self, page_rows: usize, rows: usize) -> bool {
        self.update(|pos| pos.move_rows_down((page_rows / 2).max(1), rows))
    }

    // Cursor and viewport move together so the cursor keeps its place on screen.
    fn move_rows_up(&mut self, count: usize) {
        let delta = count.min(self.active_row_index);
        self.active_row_index -= delta;
        self.view_start_row_index = self
            .view_start_row_index
            .saturating_sub(delta)
            .min(self.active_row_index);
    }

    fn move_rows_down(&mut self, count: usize, rows: usize) {
        if self.active_row_index + 1 < rows {
            let delta = count.min(rows - (self.active_row_index + 1));
            self.active_row_index += delta;
            self.view_start_row_index += delta;
        }
    }

    pub fn move_to_first_line(&mut self) -> bool {
        self.update(|pos| {
            pos.active_row_index = 0;
            pos.view_start_row_index = 0;
        })
    }

    pub fn move_to_last_line(&mut self, rows: usize) -> bool {
        self.update(|pos| {
            if rows > 0 {
                pos.active_row_index = rows - 1;
                pos.view_start_row_index = pos.view_start_row_index.min(pos.active_row_index);
            }
        })
    }

    pub fn move_page_right(&mut self, view_cols: usize) -> bool {
        self.update(|pos| pos.view_start_column += view_cols)
    }

    pub fn move_page_left(&mut self, view_cols: usize) -> bool {
        self.update(|pos| pos.view_start_column -= view_cols.min(pos.view_start_column))
    }

    /// Scroll so the active row sits in the middle of the page.
    pub fn center_active_row(&mut self, page_rows: usize) -> bool {
        self.update(|pos| {
            pos.view_start_row_index = pos.active_row_index.saturating_sub(page_rows / 2);
        })
    }

    pub fn scroll_active_row_top(&mut self) -> bool {
        self.update(|pos| pos.view_start_row_index = pos.active_row_index)
    }

    pub fn scroll_active_row_bottom(&mut self, page_rows: usize) -> bool {
        self.update(|pos| {
            pos.view_start_row_index = pos
                .active_row_index
                .saturating_sub(page_rows.saturating_sub(1));
        })
    }

    pub fn move_cursor_top_page(&mut self) -> bool {
        self.update(|pos| pos.active_row_index = pos.view_start_row_index)
    }

    pub fn move_cursor_middle_page(&mut self, page_rows: usize, rows: usize) -> bool {
        self.update(|pos| {
            let visible_rows = pos.visible_rows(page_rows, rows);
            if visible_rows > 0 {
                pos.active_row_index = pos.view_start_row_index + (visible_rows - 1) / 2;
            }
        })
    }

    pub fn move_cursor_bottom_page(&mut self, page_rows: usize, rows: usize) -> bool {
        self.update(|pos| {
            let visible_rows = pos.visible_rows(page_rows, rows);
            if visible_rows > 0 {
                pos.active_row_index = pos.view_start_row_index + visible_rows - 1;
            }
        })
    }

    fn visible_rows(&self, page_rows: usize, rows: usize) -> usize {
        page_rows.min(rows.saturating_sub(self.view_start_row_index))
    }

    /// Scroll the viewport down by `scroll_rows`, dragging the cursor along if
    /// it leaves the top of the window.
    pub fn scroll_down(&mut self, rows: usize, page_rows: usize, scroll_rows: usize) -> bool {
        if page_rows == 0 {
            return false;
        }

        self.update(|pos| {
            let view_end = pos.view_start_row_index + page_rows;
            if view_end < rows {
                pos.view_start_row_index += scroll_rows.min(rows - view_end);
                pos.active_row_index = pos.active_row_index.max(pos.view_start_row_index);
            }
        })
    }

    pub fn scroll_up(&mut self, page_rows: usize, scroll_rows: usize) -> bool {
        self.update(|pos| {
            if pos.view_start_row_index > 0 {
                pos.view_start_row_index -= scroll_rows.min(pos.view_start_row_index);
                if page_rows > 0 {
                    let last_visible = pos.view_start_row_index + page_rows - 1;
                    pos.active_row_index = pos.active_row_index.min(last_visible);
                }
            }
        })
    }
}
