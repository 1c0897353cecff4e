// ui/renderer.rs - Builds one full screen refresh as a single byte stream

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::row::Row;
use crate::syntax::is_non_printable;
use crate::ui::status_bar::StatusBar;
use crate::ui::theme::Theme;
use crate::viewport::Viewport;

pub const WELCOME: &str = concat!("scribe editor -- version ", env!("CARGO_PKG_VERSION"));

pub struct Renderer {
    theme: Theme,
    message_ttl: Duration,
    show_welcome: bool,
}

fn screen_coord(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

impl Renderer {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            theme: Theme::default(),
            message_ttl: config.message_ttl(),
            show_welcome: config.show_welcome,
        }
    }

    /// Adjust the viewport offsets so the cursor is on screen. The cursor never moves.
    pub fn scroll(editor: &mut Editor) {
        let rx = editor
            .doc
            .row(editor.cursor.line)
            .map_or(0, |row| row.cx_to_rx(editor.cursor.col, editor.doc.tab_stop()));
        editor.viewport.scroll_to_cursor(editor.cursor.line, rx);
    }

    /// Produce the complete output for one refresh: hide cursor, draw text,
    /// status and message bars, then place and show the cursor.
    pub fn refresh(&self, editor: &mut Editor, now: Instant) -> io::Result<Vec<u8>> {
        Self::scroll(editor);

        let mut out = Vec::new();
        queue!(out, cursor::Hide, cursor::MoveTo(0, 0))?;
        self.draw_rows(&mut out, editor)?;
        self.draw_status_bar(&mut out, editor)?;
        self.draw_message_bar(&mut out, editor, now)?;

        let viewport = &editor.viewport;
        let rx = editor
            .doc
            .row(editor.cursor.line)
            .map_or(0, |row| row.cx_to_rx(editor.cursor.col, editor.doc.tab_stop()));
        queue!(
            out,
            cursor::MoveTo(
                screen_coord(rx.saturating_sub(viewport.offset_col)),
                screen_coord(editor.cursor.line.saturating_sub(viewport.offset_line)),
            ),
            cursor::Show
        )?;
        Ok(out)
    }

    fn draw_rows(&self, out: &mut Vec<u8>, editor: &Editor) -> io::Result<()> {
        let viewport = &editor.viewport;
        let welcome_line = self.shows_welcome(editor).then_some(viewport.rows / 3);

        for y in 0..viewport.rows {
            let file_row = viewport.offset_line + y;
            if welcome_line == Some(y) && y > 0 {
                self.draw_welcome(out, viewport.cols)?;
            } else if let Some(row) = editor.doc.row(file_row) {
                self.draw_row(out, row, viewport)?;
            } else {
                out.push(b'~');
            }
            queue!(out, Clear(ClearType::UntilNewLine))?;
            out.extend_from_slice(b"\r\n");
        }
        Ok(())
    }

    fn shows_welcome(&self, editor: &Editor) -> bool {
        let doc = &editor.doc;
        self.show_welcome
            && doc.filename().is_none()
            && !doc.is_dirty()
            && doc.num_rows() == 1
            && doc.row_size(0) == 0
    }

    fn draw_welcome(&self, out: &mut Vec<u8>, cols: usize) -> io::Result<()> {
        let text = &WELCOME[..WELCOME.len().min(cols)];
        let mut padding = (cols - text.len()) / 2;
        if padding > 0 {
            out.push(b'~');
            padding -= 1;
        }
        out.extend(std::iter::repeat_n(b' ', padding));
        out.extend_from_slice(text.as_bytes());
        Ok(())
    }

    /// Visible slice of one row, switching colors only where the highlight changes.
    fn draw_row(&self, out: &mut Vec<u8>, row: &Row, viewport: &Viewport) -> io::Result<()> {
        let start = viewport.offset_col.min(row.render_len());
        let end = (start + viewport.cols).min(row.render_len());
        let mut current: Option<Color> = None;

        for (&byte, &kind) in row.render[start..end].iter().zip(&row.highlight[start..end]) {
            if is_non_printable(byte) {
                let symbol = if byte <= 26 { b'@' + byte } else { b'?' };
                queue!(
                    out,
                    SetAttribute(Attribute::Reverse),
                    Print(symbol as char),
                    SetAttribute(Attribute::Reset)
                )?;
                if let Some(color) = current {
                    queue!(out, SetForegroundColor(color))?;
                }
                continue;
            }

            let color = self.theme.color_for(kind);
            if color != current {
                queue!(out, SetForegroundColor(color.unwrap_or(Color::Reset)))?;
                current = color;
            }
            out.push(byte);
        }

        queue!(out, ResetColor)?;
        Ok(())
    }

    fn draw_status_bar(&self, out: &mut Vec<u8>, editor: &Editor) -> io::Result<()> {
        let text = StatusBar::new(&editor.doc, &editor.cursor).text(editor.viewport.cols);
        queue!(
            out,
            Clear(ClearType::UntilNewLine),
            SetAttribute(Attribute::Reverse),
            Print(text),
            SetAttribute(Attribute::Reset)
        )?;
        out.extend_from_slice(b"\r\n");
        Ok(())
    }

    fn draw_message_bar(&self, out: &mut Vec<u8>, editor: &Editor, now: Instant) -> io::Result<()> {
        queue!(out, Clear(ClearType::UntilNewLine))?;
        if let Some(text) = editor
            .status_message
            .as_ref()
            .and_then(|m| m.visible_text(now, self.message_ttl))
        {
            let visible: String = text.chars().take(editor.viewport.cols).collect();
            out.write_all(visible.as_bytes())?;
        }
        Ok(())
    }
}
