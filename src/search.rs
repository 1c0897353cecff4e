// search.rs - Incremental substring search with a temporary match highlight

use crate::buffer::Document;
use crate::cursor::Cursor;
use crate::syntax::HighlightKind;
use crate::viewport::Viewport;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

fn occurrences<'a>(
    haystack: &'a [u8],
    needle: &'a [u8],
) -> impl DoubleEndedIterator<Item = usize> + 'a {
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(move |(_, window)| *window == needle)
        .map(|(col, _)| col)
}

/// Find `query` relative to `anchor`, wrapping around the document once.
///
/// With no anchor the whole document is scanned from the start (forward) or
/// the end (backward). `include_anchor` lets a match exactly at the anchor
/// count as the first candidate instead of the last.
pub fn find_match(
    doc: &Document,
    query: &[u8],
    anchor: Option<(usize, usize)>,
    direction: Direction,
    include_anchor: bool,
) -> Option<(usize, usize)> {
    if query.is_empty() {
        return None;
    }
    let rows = doc.rows();
    let n = rows.len();
    let in_row = |r: usize| occurrences(&rows[r].content, query);

    let Some((row, col)) = anchor.filter(|(row, _)| *row < n) else {
        return match direction {
            Direction::Forward => (0..n).find_map(|r| in_row(r).next().map(|c| (r, c))),
            Direction::Backward => (0..n).rev().find_map(|r| in_row(r).next_back().map(|c| (r, c))),
        };
    };

    match direction {
        Direction::Forward => {
            let leading = |c: usize| if include_anchor { c >= col } else { c > col };
            in_row(row)
                .find(|&c| leading(c))
                .map(|c| (row, c))
                .or_else(|| {
                    (row + 1..n)
                        .chain(0..row)
                        .find_map(|r| in_row(r).next().map(|c| (r, c)))
                })
                .or_else(|| in_row(row).find(|&c| !leading(c)).map(|c| (row, c)))
        }
        Direction::Backward => {
            let leading = |c: usize| if include_anchor { c <= col } else { c < col };
            in_row(row)
                .filter(|&c| leading(c))
                .next_back()
                .map(|c| (row, c))
                .or_else(|| {
                    (0..row)
                        .rev()
                        .chain((row + 1..n).rev())
                        .find_map(|r| in_row(r).next_back().map(|c| (r, c)))
                })
                .or_else(|| {
                    in_row(row)
                        .filter(|&c| !leading(c))
                        .next_back()
                        .map(|c| (row, c))
                })
        }
    }
}

/// State of one search session, from Ctrl-F until confirm or cancel.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub query: Vec<u8>,
    last_match: Option<(usize, usize)>,
    /// Row whose highlight is overridden, with its original highlight
    saved_highlight: Option<(usize, Vec<HighlightKind>)>,
    pub saved_cursor: Cursor,
    pub saved_viewport: Viewport,
}

impl SearchState {
    pub fn new(cursor: Cursor, viewport: Viewport) -> Self {
        Self {
            query: Vec::new(),
            last_match: None,
            saved_highlight: None,
            saved_cursor: cursor,
            saved_viewport: viewport,
        }
    }

    pub fn last_match(&self) -> Option<(usize, usize)> {
        self.last_match
    }

    /// Re-run after the query changed, keeping the current match if it still fits.
    pub fn refine(&mut self, doc: &mut Document) -> Option<(usize, usize)> {
        self.run(doc, Direction::Forward, true)
    }

    /// Move to the next or previous match.
    pub fn advance(&mut self, doc: &mut Document, direction: Direction) -> Option<(usize, usize)> {
        self.run(doc, direction, false)
    }

    fn run(
        &mut self,
        doc: &mut Document,
        direction: Direction,
        include_anchor: bool,
    ) -> Option<(usize, usize)> {
        self.restore_highlight(doc);
        let found = find_match(doc, &self.query, self.last_match, direction, include_anchor);
        debug!(
            "Search {:?} {:?} from {:?}: {:?}",
            String::from_utf8_lossy(&self.query),
            direction,
            self.last_match,
            found
        );
        self.last_match = found;
        if let Some((row, col)) = found {
            self.highlight_match(doc, row, col);
        }
        found
    }

    fn highlight_match(&mut self, doc: &mut Document, row: usize, col: usize) {
        let tab_stop = doc.tab_stop();
        let Some(target) = doc.row(row) else {
            return;
        };
        let start = target.cx_to_rx(col, tab_stop);
        let end = target.cx_to_rx(col + self.query.len(), tab_stop);
        let original = target.highlight.clone();
        if let Some(highlight) = doc.highlight_mut(row) {
            let end = end.min(highlight.len());
            highlight[start.min(end)..end].fill(HighlightKind::Match);
            self.saved_highlight = Some((row, original));
        }
    }

    /// Put back the highlight the current match overrode.
    pub fn restore_highlight(&mut self, doc: &mut Document) {
        if let Some((row, original)) = self.saved_highlight.take()
            && let Some(highlight) = doc.highlight_mut(row)
            && highlight.len() == original.len()
        {
            highlight.copy_from_slice(&original);
        }
    }
}
