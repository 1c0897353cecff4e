/// Visible window of the document.
///
/// `rows` excludes the status and message bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub offset_line: usize,
    pub offset_col: usize,
    pub rows: usize,
    pub cols: usize,
}

/// Lines reserved below the text area for the status and message bars.
pub const RESERVED_ROWS: usize = 2;

impl Viewport {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            offset_line: 0,
            offset_col: 0,
            rows,
            cols,
        }
    }

    /// Build from a full terminal size, reserving the bar lines.
    pub fn for_window(window_rows: usize, window_cols: usize) -> Self {
        Self::new(window_rows.saturating_sub(RESERVED_ROWS), window_cols)
    }

    pub fn resize(&mut self, window_rows: usize, window_cols: usize) {
        self.rows = window_rows.saturating_sub(RESERVED_ROWS);
        self.cols = window_cols;
    }

    /// Move the offsets just enough to make (`cursor_line`, `cursor_rx`) visible.
    pub fn scroll_to_cursor(&mut self, cursor_line: usize, cursor_rx: usize) {
        if cursor_line < self.offset_line {
            self.offset_line = cursor_line;
        }
        if self.rows > 0 && cursor_line >= self.offset_line + self.rows {
            self.offset_line = cursor_line + 1 - self.rows;
        }
        if cursor_rx < self.offset_col {
            self.offset_col = cursor_rx;
        }
        if self.cols > 0 && cursor_rx >= self.offset_col + self.cols {
            self.offset_col = cursor_rx + 1 - self.cols;
        }
    }
}
