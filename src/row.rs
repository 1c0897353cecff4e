// row.rs - One line of the document and its derived render/highlight state

use crate::syntax::{HighlightKind, SyntaxProfile, highlight_row};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Position in the document, kept equal to the row's offset
    pub index: usize,
    pub content: Vec<u8>,
    /// `content` with tabs expanded
    pub render: Vec<u8>,
    /// One entry per byte of `render`
    pub highlight: Vec<HighlightKind>,
    /// Row ends inside an unterminated multi-line comment
    pub open_comment: bool,
    /// Start state the current highlight was computed from; `None` when stale
    highlighted_from: Option<bool>,
}

/// Expand tabs to the next multiple of `tab_stop`.
pub fn expand_tabs(content: &[u8], tab_stop: usize) -> Vec<u8> {
    let tab_stop = tab_stop.max(1);
    let tabs = content.iter().filter(|&&b| b == b'\t').count();
    let mut render = Vec::with_capacity(content.len() + tabs * (tab_stop - 1));
    for &byte in content {
        if byte == b'\t' {
            render.push(b' ');
            while render.len() % tab_stop != 0 {
                render.push(b' ');
            }
        } else {
            render.push(byte);
        }
    }
    render
}

impl Row {
    pub fn new(index: usize, content: Vec<u8>) -> Self {
        Self {
            index,
            content,
            render: Vec::new(),
            highlight: Vec::new(),
            open_comment: false,
            highlighted_from: None,
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn render_len(&self) -> usize {
        self.render.len()
    }

    /// Re-derive `render` from `content` and mark the highlight stale.
    pub fn update_render(&mut self, tab_stop: usize) {
        self.render = expand_tabs(&self.content, tab_stop);
        self.highlight = vec![HighlightKind::Normal; self.render.len()];
        self.highlighted_from = None;
    }

    pub fn invalidate_highlight(&mut self) {
        self.highlighted_from = None;
    }

    /// Whether the highlight must be recomputed for this start state.
    pub fn needs_highlight(&self, starts_in_comment: bool) -> bool {
        self.highlighted_from != Some(starts_in_comment)
    }

    pub fn apply_highlight(&mut self, starts_in_comment: bool, profile: Option<&SyntaxProfile>) {
        let result = highlight_row(&self.render, starts_in_comment, profile);
        self.highlight = result.highlight;
        self.open_comment = result.open_comment;
        self.highlighted_from = Some(starts_in_comment);
    }

    /// Render column of content column `cx`.
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut rx = 0;
        for &byte in self.content.iter().take(cx) {
            if byte == b'\t' {
                rx += (tab_stop - 1) - (rx % tab_stop);
            }
            rx += 1;
        }
        rx
    }

    /// Content column whose rendering covers render column `rx`.
    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut cur_rx = 0;
        for (cx, &byte) in self.content.iter().enumerate() {
            if byte == b'\t' {
                cur_rx += (tab_stop - 1) - (cur_rx % tab_stop);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.content.len()
    }
}
