/// Cursor position in document coordinates.
///
/// `col` is a byte column into the row content; `desired_col` is the render
/// column vertical movement tries to return to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub line: usize,
    pub col: usize,
    pub desired_col: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            desired_col: 0,
        }
    }

    pub fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            desired_col: col,
        }
    }
}
