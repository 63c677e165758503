/// Size of a rectangular terminal region in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ViewDimension {
    pub rows: usize,
    pub cols: usize,
}

impl ViewDimension {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Rows left for content once `border_width` rows are reserved.
    pub fn content_rows(&self, border_width: usize) -> usize {
        self.rows.saturating_sub(border_width)
    }

    pub fn content_cols(&self, border_width: usize) -> usize {
        self.cols.saturating_sub(border_width)
    }
}

/// Layout result for one child of a container, relative to the container's origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChildViewPosition {
    pub view_dimension: ViewDimension,
    pub start_row: usize,
    pub start_col: usize,
}

impl ChildViewPosition {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.start_row
            && row < self.start_row + self.view_dimension.rows
            && col >= self.start_col
            && col < self.start_col + self.view_dimension.cols
    }
}
