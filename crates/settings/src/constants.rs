//! Centralized configuration constants for GRV.
//!
//! Compile-time constants for layout, input handling and settings limits,
//! organized by the component that consumes them.

/// Pane layout configuration.
pub mod layout {
    /// Aspect ratio (cols / rows) of a standard 80x24 terminal.
    /// Dynamic containers stack their children when the region is narrower than this.
    pub const TERMINAL_ASPECT_RATIO: f64 = 80.0 / 24.0;

    /// Rows/columns reserved for a pane border (one on each edge).
    pub const BORDER_WIDTH: usize = 2;
}

/// Mouse configuration.
pub mod mouse {
    /// Rows scrolled per mouse wheel event.
    pub const DEFAULT_SCROLL_ROWS: i64 = 3;
    pub const MIN_SCROLL_ROWS: i64 = 1;
    pub const MAX_SCROLL_ROWS: i64 = 100;
}

/// Keystring input configuration.
pub mod input {
    /// Upper bound on keystring macro expansions performed while resolving one action.
    /// Guarantees progress when a mapping expands (directly or indirectly) to itself.
    pub const MAX_KEYSTRING_EXPANSIONS: usize = 32;

    /// Terminator that completes prompt input embedded in a keystring.
    pub const PROMPT_TERMINATOR: &str = "<Enter>";
}

/// Text display configuration.
pub mod display {
    pub const DEFAULT_TAB_WIDTH: i64 = 8;
    pub const MIN_TAB_WIDTH: i64 = 1;
    pub const MAX_TAB_WIDTH: i64 = 32;
}

/// Prompt configuration.
pub mod prompt {
    pub const DEFAULT_HISTORY_SIZE: i64 = 1000;
    pub const MIN_HISTORY_SIZE: i64 = 0;
    pub const MAX_HISTORY_SIZE: i64 = 100_000;
}

/// Timing configuration.
pub mod timing {
    use std::time::Duration;

    /// Redisplay interval of the "still loading" ticker.
    pub const LOADING_TICK_INTERVAL: Duration = Duration::from_millis(250);
}

/// Settings file validation limits.
pub mod settings {
    /// Maximum settings file size in bytes (64 KB).
    /// Settings files should be tiny; anything larger is suspicious.
    pub const MAX_FILE_SIZE: u64 = 64 * 1024;

    /// Maximum length for string fields (theme name, default view).
    pub const MAX_STRING_LENGTH: usize = 256;
}

#[cfg(test)]
#[allow(clippy::assertions_on_constants)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_matches_standard_terminal() {
        assert!((layout::TERMINAL_ASPECT_RATIO * 24.0 - 80.0).abs() < f64::EPSILON * 100.0);
    }

    #[test]
    fn test_default_scroll_rows_within_bounds() {
        assert!(
            (mouse::MIN_SCROLL_ROWS..=mouse::MAX_SCROLL_ROWS).contains(&mouse::DEFAULT_SCROLL_ROWS),
            "DEFAULT_SCROLL_ROWS ({}) should be within [{}, {}]",
            mouse::DEFAULT_SCROLL_ROWS,
            mouse::MIN_SCROLL_ROWS,
            mouse::MAX_SCROLL_ROWS
        );
    }

    #[test]
    fn test_default_tab_width_within_bounds() {
        assert!(
            (display::MIN_TAB_WIDTH..=display::MAX_TAB_WIDTH).contains(&display::DEFAULT_TAB_WIDTH)
        );
    }

    #[test]
    fn test_expansion_limit_allows_nested_macros() {
        assert!(input::MAX_KEYSTRING_EXPANSIONS >= 2);
    }

    #[test]
    fn test_border_fits_in_minimum_pane() {
        // A pane needs at least one content row inside its border.
        assert!(layout::BORDER_WIDTH < 3);
    }
}
