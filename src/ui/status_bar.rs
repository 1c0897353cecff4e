// ui/status_bar.rs - Status line text

use crate::buffer::Document;
use crate::cursor::Cursor;

const MAX_NAME_LEN: usize = 20;

/// Status bar showing file name, dirty state, syntax profile and position.
pub struct StatusBar<'a> {
    pub doc: &'a Document,
    pub cursor: &'a Cursor,
}

impl<'a> StatusBar<'a> {
    pub fn new(doc: &'a Document, cursor: &'a Cursor) -> Self {
        Self { doc, cursor }
    }

    pub fn left(&self) -> String {
        let name = self
            .doc
            .filename()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[No Name]".to_string());
        let name: String = name.chars().take(MAX_NAME_LEN).collect();
        format!(
            "{} - {} lines{}",
            name,
            self.doc.num_rows(),
            if self.doc.is_dirty() { " (modified)" } else { "" }
        )
    }

    pub fn right(&self) -> String {
        format!(
            "{} | {}/{}",
            self.doc.syntax().map(|s| s.name).unwrap_or("no ft"),
            self.cursor.line + 1,
            self.doc.num_rows()
        )
    }

    /// Left text, then the right text flush against the edge when it fits,
    /// padded to exactly `width` bytes.
    pub fn text(&self, width: usize) -> String {
        let mut line: String = self.left().chars().take(width).collect();
        let right = self.right();
        let used = line.chars().count();
        if used + right.len() <= width {
            line.push_str(&" ".repeat(width - used - right.len()));
            line.push_str(&right);
        } else {
            line.push_str(&" ".repeat(width - used));
        }
        line
    }
}
