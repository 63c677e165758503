use std::sync::Arc;

use parking_lot::Mutex;

use crate::{ViewDimension, ViewState};

/// A rectangular drawing surface owned by a terminal backend.
///
/// Row and column arguments are relative to the window, with row 0 and the
/// last row reserved for the border.
pub trait RenderWindow: Send {
    fn id(&self) -> &str;

    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    fn dimension(&self) -> ViewDimension {
        ViewDimension::new(self.rows(), self.cols())
    }

    fn resize(&mut self, dimension: ViewDimension);

    /// Absolute screen position of the top left cell.
    fn set_position(&mut self, start_row: usize, start_col: usize);

    fn position(&self) -> (usize, usize);

    fn clear(&mut self);

    fn set_row(&mut self, row: usize, start_col: usize, text: &str) -> anyhow::Result<()>;

    fn set_selected_row(&mut self, row: usize, state: ViewState) -> anyhow::Result<()>;

    fn draw_border(&mut self);

    fn set_title(&mut self, title: &str) -> anyhow::Result<()>;

    fn set_footer(&mut self, footer: &str) -> anyhow::Result<()>;

    /// Highlight every occurrence of `pattern` in the rendered rows.
    fn highlight(&mut self, pattern: &str) -> anyhow::Result<()>;
}

pub type SharedWindow = Arc<Mutex<Box<dyn RenderWindow>>>;

/// Allocates backing surfaces for content panes.
pub trait WindowFactory: Send + Sync {
    fn create_window(&self, id: &str) -> SharedWindow;
}
