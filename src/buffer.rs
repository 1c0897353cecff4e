// buffer.rs - The document: ordered rows, structural edits, load and save

use crate::row::Row;
use crate::syntax::{HighlightKind, SyntaxProfile, select_profile};
use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct Document {
    rows: Vec<Row>,
    /// Edits since the last load or save
    dirty: usize,
    filename: Option<PathBuf>,
    syntax: Option<&'static SyntaxProfile>,
    tab_stop: usize,
}

impl Document {
    /// A new untitled document holding one empty row.
    pub fn new(tab_stop: usize) -> Self {
        Self::from_bytes(b"", tab_stop)
    }

    /// Split `bytes` on `\n`. A trailing newline does not produce an extra row.
    pub fn from_bytes(bytes: &[u8], tab_stop: usize) -> Self {
        let mut lines: Vec<&[u8]> = bytes.split(|&b| b == b'\n').collect();
        if bytes.ends_with(b"\n") {
            lines.pop();
        }
        let rows = lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                let mut row = Row::new(index, line.to_vec());
                row.update_render(tab_stop);
                row
            })
            .collect();

        let mut doc = Self {
            rows,
            dirty: 0,
            filename: None,
            syntax: None,
            tab_stop: tab_stop.max(1),
        };
        doc.rehighlight_from(0);
        doc
    }

    /// Load `path`. A missing file opens as an empty document bound to that name.
    pub fn open<P: AsRef<Path>>(path: P, tab_stop: usize) -> io::Result<Self> {
        let path = path.as_ref();
        let mut doc = match fs::read(path) {
            Ok(bytes) => {
                info!("Opened {} ({} bytes)", path.display(), bytes.len());
                Self::from_bytes(&bytes, tab_stop)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("{} does not exist, starting a new file", path.display());
                Self::new(tab_stop)
            }
            Err(e) => return Err(e),
        };
        doc.set_filename(path);
        Ok(doc)
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn row_size(&self, at: usize) -> usize {
        self.rows.get(at).map_or(0, Row::size)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn syntax(&self) -> Option<&'static SyntaxProfile> {
        self.syntax
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    /// Bind the document to `path` and select the syntax profile for it.
    pub fn set_filename<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref();
        self.filename = Some(path.to_path_buf());
        self.set_syntax(select_profile(&path.to_string_lossy()));
    }

    pub fn set_syntax(&mut self, syntax: Option<&'static SyntaxProfile>) {
        self.syntax = syntax;
        for row in &mut self.rows {
            row.invalidate_highlight();
        }
        self.rehighlight_from(0);
    }

    /// Mutable view of a row's highlight, for temporary overrides. The length is fixed.
    pub fn highlight_mut(&mut self, at: usize) -> Option<&mut [HighlightKind]> {
        self.rows.get_mut(at).map(|row| row.highlight.as_mut_slice())
    }

    pub fn insert_row(&mut self, at: usize, content: Vec<u8>) -> bool {
        if at > self.rows.len() {
            return false;
        }
        self.rows.insert(at, Row::new(at, content));
        self.reindex_from(at);
        self.dirty += 1;
        self.refresh_row(at);
        true
    }

    pub fn delete_row(&mut self, at: usize) -> bool {
        if at >= self.rows.len() {
            return false;
        }
        self.rows.remove(at);
        self.reindex_from(at);
        self.dirty += 1;
        // The row that moved up now starts from a different predecessor
        self.rehighlight_from(at);
        true
    }

    /// Insert `byte` at (`row`, `col`). `row == num_rows` appends a new row first.
    pub fn insert_char(&mut self, row: usize, col: usize, byte: u8) -> bool {
        if row == self.rows.len() {
            self.insert_row(row, Vec::new());
        }
        let Some(target) = self.rows.get_mut(row) else {
            return false;
        };
        if col > target.size() {
            return false;
        }
        target.content.insert(col, byte);
        self.dirty += 1;
        self.refresh_row(row);
        true
    }

    /// Delete the byte before `col`, joining with the previous row at column 0.
    ///
    /// Returns the cursor position after the deletion, or `None` if nothing changed.
    pub fn delete_char(&mut self, row: usize, col: usize) -> Option<(usize, usize)> {
        if row >= self.rows.len() || (row == 0 && col == 0) {
            return None;
        }
        if col > self.rows[row].size() {
            return None;
        }

        if col == 0 {
            let joined_at = self.rows[row - 1].size();
            let tail = std::mem::take(&mut self.rows[row].content);
            self.rows[row - 1].content.extend_from_slice(&tail);
            self.rows.remove(row);
            self.reindex_from(row);
            self.dirty += 1;
            self.refresh_row(row - 1);
            Some((row - 1, joined_at))
        } else {
            self.rows[row].content.remove(col - 1);
            self.dirty += 1;
            self.refresh_row(row);
            Some((row, col - 1))
        }
    }

    /// Split `row` at `col`; the tail becomes row `row + 1`.
    pub fn insert_newline(&mut self, row: usize, col: usize) -> bool {
        if row == self.rows.len() {
            return self.insert_row(row, Vec::new());
        }
        let Some(target) = self.rows.get_mut(row) else {
            return false;
        };
        let col = col.min(target.size());
        let tail = target.content.split_off(col);
        self.refresh_row(row);
        self.insert_row(row + 1, tail)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|r| r.size() + 1).sum();
        let mut bytes = Vec::with_capacity(total);
        for row in &self.rows {
            bytes.extend_from_slice(&row.content);
            bytes.push(b'\n');
        }
        bytes
    }

    /// Write to the bound filename. On failure the document stays dirty.
    pub fn save(&mut self) -> io::Result<usize> {
        let path = self
            .filename
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no filename"))?;
        let bytes = self.to_bytes();
        fs::write(&path, &bytes)?;
        self.dirty = 0;
        info!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(bytes.len())
    }

    /// Write to `path`, binding the document to it only once the write succeeded.
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> io::Result<usize> {
        let path = path.as_ref();
        let bytes = self.to_bytes();
        fs::write(path, &bytes)?;
        self.dirty = 0;
        self.set_filename(path);
        info!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(bytes.len())
    }

    fn reindex_from(&mut self, at: usize) {
        for (index, row) in self.rows.iter_mut().enumerate().skip(at) {
            row.index = index;
        }
    }

    /// Content of `at` changed: re-render it and cascade highlighting downward.
    fn refresh_row(&mut self, at: usize) {
        if let Some(row) = self.rows.get_mut(at) {
            row.update_render(self.tab_stop);
            self.rehighlight_from(at);
        }
    }

    /// Recompute highlights from `start`, continuing only while a row's start
    /// state differs from the one its highlight was computed with.
    fn rehighlight_from(&mut self, start: usize) {
        let mut at = start;
        while at < self.rows.len() {
            let starts_in_comment = at > 0 && self.rows[at - 1].open_comment;
            if !self.rows[at].needs_highlight(starts_in_comment) {
                break;
            }
            self.rows[at].apply_highlight(starts_in_comment, self.syntax);
            at += 1;
        }
        if at > start + 1 {
            debug!("Rehighlighted rows {}..{}", start, at);
        }
    }
}
