// src/editor.rs - Editor controller: mode state machine over the document

use crate::buffer::Document;
use crate::command::{Command, key_to_command};
use crate::config::EditorConfig;
use crate::cursor::Cursor;
use crate::error::{EditorError, TerminalError};
use crate::key::{Key, KeyAction};
use crate::mode::Mode;
use crate::search::{Direction, SearchState};
use crate::terminal::Terminal;
use crate::ui::{Renderer, StatusMessage};
use crate::viewport::Viewport;
use log::{debug, info, warn};
use std::time::Instant;

pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

pub struct Editor {
    pub doc: Document,
    pub cursor: Cursor,
    pub viewport: Viewport,
    pub mode: Mode,
    pub config: EditorConfig,
    pub status_message: Option<StatusMessage>,
    /// Filename being typed in the save-as prompt
    pub prompt: Vec<u8>,
    pub search: Option<SearchState>,
    quit_presses_left: usize,
}

impl Editor {
    /// `window_rows`/`window_cols` are the full terminal size; the bars are reserved here.
    pub fn new(
        doc: Document,
        config: EditorConfig,
        window_rows: usize,
        window_cols: usize,
    ) -> Self {
        Self {
            doc,
            cursor: Cursor::new(),
            viewport: Viewport::for_window(window_rows, window_cols),
            mode: Mode::Editing,
            quit_presses_left: config.quit_times,
            config,
            status_message: None,
            prompt: Vec::new(),
            search: None,
        }
    }

    pub fn set_status_message(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage::new(text, Instant::now()));
    }

    /// Drive the session until the user quits: refresh, read one key, apply it.
    pub fn run<T: Terminal>(&mut self, terminal: &mut T) -> Result<(), EditorError> {
        let renderer = Renderer::new(&self.config);
        loop {
            let (rows, cols) = terminal.window_size()?;
            self.viewport.resize(rows, cols);

            let frame = renderer
                .refresh(self, Instant::now())
                .map_err(TerminalError::from)?;
            terminal.write_frame(&frame)?;

            let key = terminal.read_key()?;
            if self.process_key(key) {
                info!("Quit requested");
                return Ok(());
            }
        }
    }

    /// Apply one key in the current mode. Returns true when the editor should exit.
    pub fn process_key(&mut self, key: Key) -> bool {
        match self.mode {
            Mode::Editing | Mode::ConfirmQuit => {
                if self.mode == Mode::ConfirmQuit && key != Key::Action(KeyAction::Quit) {
                    self.mode = Mode::Editing;
                    self.quit_presses_left = self.config.quit_times;
                    self.set_status_message("");
                }
                match key_to_command(key) {
                    Some(cmd) => self.execute_command(cmd),
                    None => false,
                }
            }
            Mode::PromptSaveAs => {
                self.process_save_as_key(key);
                false
            }
            Mode::PromptSearch => {
                self.process_search_key(key);
                false
            }
        }
    }

    pub fn execute_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Quit => return self.quit_pressed(),
            Command::MoveLeft => {
                if self.cursor.col > 0 {
                    self.cursor.col -= 1;
                } else if self.cursor.line > 0 {
                    self.cursor.line -= 1;
                    self.cursor.col = self.doc.row_size(self.cursor.line);
                }
            }
            Command::MoveRight => {
                if self.cursor.col < self.doc.row_size(self.cursor.line) {
                    self.cursor.col += 1;
                } else if self.cursor.line + 1 < self.doc.num_rows() {
                    self.cursor.line += 1;
                    self.cursor.col = 0;
                }
            }
            Command::MoveUp => {
                self.move_vertically(-1);
                return false;
            }
            Command::MoveDown => {
                self.move_vertically(1);
                return false;
            }
            Command::MoveLineStart => self.cursor.col = 0,
            Command::MoveLineEnd => self.cursor.col = self.doc.row_size(self.cursor.line),
            Command::PageUp => {
                self.cursor.line = self.viewport.offset_line;
                self.move_vertically(-(self.viewport.rows as isize));
                return false;
            }
            Command::PageDown => {
                let bottom = self.viewport.offset_line + self.viewport.rows.saturating_sub(1);
                self.cursor.line = bottom.min(self.doc.num_rows().saturating_sub(1));
                self.move_vertically(self.viewport.rows as isize);
                return false;
            }
            Command::InsertChar(byte) => {
                if self.doc.insert_char(self.cursor.line, self.cursor.col, byte) {
                    self.cursor.col += 1;
                }
            }
            Command::InsertNewline => {
                if self.doc.insert_newline(self.cursor.line, self.cursor.col) {
                    self.cursor.line += 1;
                    self.cursor.col = 0;
                }
            }
            Command::DeleteChar => {
                if let Some((line, col)) = self.doc.delete_char(self.cursor.line, self.cursor.col) {
                    self.cursor.line = line;
                    self.cursor.col = col;
                }
            }
            Command::DeleteCharForward => {
                let at_end = self.cursor.line + 1 >= self.doc.num_rows()
                    && self.cursor.col >= self.doc.row_size(self.cursor.line);
                if !at_end {
                    self.execute_command(Command::MoveRight);
                    self.execute_command(Command::DeleteChar);
                }
            }
            Command::Save => {
                if self.doc.filename().is_some() {
                    self.save();
                } else {
                    self.enter_save_as_prompt();
                }
            }
            Command::Find => self.enter_search_prompt(),
            Command::Refresh => {}
        }
        self.clamp_cursor();
        self.cursor.desired_col = self.cursor_rx();
        false
    }

    fn quit_pressed(&mut self) -> bool {
        if !self.doc.is_dirty() {
            return true;
        }
        if self.mode != Mode::ConfirmQuit {
            self.mode = Mode::ConfirmQuit;
            self.quit_presses_left = self.config.quit_times;
            debug!("Entering quit confirmation");
        }
        self.quit_presses_left = self.quit_presses_left.saturating_sub(1);
        if self.quit_presses_left == 0 {
            return true;
        }
        self.set_status_message(format!(
            "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
            self.quit_presses_left
        ));
        false
    }

    /// Move `delta` rows, landing on the render column the cursor last settled on.
    fn move_vertically(&mut self, delta: isize) {
        let last = self.doc.num_rows().saturating_sub(1);
        self.cursor.line = self.cursor.line.saturating_add_signed(delta).min(last);
        self.cursor.col = self
            .doc
            .row(self.cursor.line)
            .map_or(0, |row| row.rx_to_cx(self.cursor.desired_col, self.doc.tab_stop()));
    }

    fn clamp_cursor(&mut self) {
        let last = self.doc.num_rows().saturating_sub(1);
        self.cursor.line = self.cursor.line.min(last);
        self.cursor.col = self.cursor.col.min(self.doc.row_size(self.cursor.line));
    }

    fn cursor_rx(&self) -> usize {
        self.doc
            .row(self.cursor.line)
            .map_or(0, |row| row.cx_to_rx(self.cursor.col, self.doc.tab_stop()))
    }

    fn save(&mut self) {
        match self.doc.save() {
            Ok(bytes) => self.set_status_message(format!("{} bytes written to disk", bytes)),
            Err(e) => {
                warn!("Save failed: {}", e);
                self.set_status_message(format!("Can't save! I/O error: {}", e));
            }
        }
    }

    fn enter_save_as_prompt(&mut self) {
        self.mode = Mode::PromptSaveAs;
        self.prompt.clear();
        self.show_save_as_prompt();
    }

    fn show_save_as_prompt(&mut self) {
        let text = format!(
            "Save as: {} (ESC to cancel)",
            String::from_utf8_lossy(&self.prompt)
        );
        self.set_status_message(text);
    }

    fn process_save_as_key(&mut self, key: Key) {
        match key {
            Key::Action(KeyAction::Cancel | KeyAction::Interrupt) => {
                self.mode = Mode::Editing;
                self.prompt.clear();
                self.set_status_message("Save aborted");
                return;
            }
            Key::Action(KeyAction::Enter) => {
                if self.prompt.is_empty() {
                    return;
                }
                let path = String::from_utf8_lossy(&self.prompt).into_owned();
                self.mode = Mode::Editing;
                self.prompt.clear();
                match self.doc.save_as(&path) {
                    Ok(bytes) => {
                        self.set_status_message(format!("{} bytes written to disk", bytes))
                    }
                    Err(e) => {
                        warn!("Save as {} failed: {}", path, e);
                        self.set_status_message(format!("Can't save! I/O error: {}", e));
                    }
                }
                return;
            }
            Key::Action(KeyAction::Backspace | KeyAction::Delete) => {
                self.prompt.pop();
            }
            key if key.is_printable() => {
                if let Key::Literal(byte) = key {
                    self.prompt.push(byte);
                }
            }
            _ => {}
        }
        self.show_save_as_prompt();
    }

    fn enter_search_prompt(&mut self) {
        self.mode = Mode::PromptSearch;
        self.search = Some(SearchState::new(self.cursor, self.viewport));
        self.show_search_prompt(b"");
    }

    fn show_search_prompt(&mut self, query: &[u8]) {
        let text = format!(
            "Search: {} (Use ESC/Arrows/Enter)",
            String::from_utf8_lossy(query)
        );
        self.set_status_message(text);
    }

    fn process_search_key(&mut self, key: Key) {
        let Some(mut search) = self.search.take() else {
            self.mode = Mode::Editing;
            return;
        };

        let found = match key {
            Key::Action(KeyAction::Cancel | KeyAction::Interrupt) => {
                search.restore_highlight(&mut self.doc);
                self.cursor = search.saved_cursor;
                self.viewport = search.saved_viewport;
                self.mode = Mode::Editing;
                self.set_status_message("");
                return;
            }
            Key::Action(KeyAction::Enter) => {
                search.restore_highlight(&mut self.doc);
                self.mode = Mode::Editing;
                self.set_status_message("");
                return;
            }
            Key::Action(KeyAction::ArrowRight | KeyAction::ArrowDown) => {
                search.advance(&mut self.doc, Direction::Forward)
            }
            Key::Action(KeyAction::ArrowLeft | KeyAction::ArrowUp) => {
                search.advance(&mut self.doc, Direction::Backward)
            }
            Key::Action(KeyAction::Backspace | KeyAction::Delete) => {
                search.query.pop();
                search.refine(&mut self.doc)
            }
            key if key.is_printable() => {
                if let Key::Literal(byte) = key {
                    search.query.push(byte);
                }
                search.refine(&mut self.doc)
            }
            _ => search.last_match(),
        };

        if let Some((line, col)) = found {
            self.cursor = Cursor::at(line, col);
            self.cursor.desired_col = self.cursor_rx();
            // Put the match row at the top of the screen
            self.viewport.offset_line = line;
            self.viewport.offset_col = 0;
        }
        self.show_search_prompt(&search.query);
        self.search = Some(search);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(text: &str) -> Editor {
        Editor::new(
            Document::from_bytes(text.as_bytes(), 8),
            EditorConfig::default(),
            12,
            40,
        )
    }

    fn press(editor: &mut Editor, action: KeyAction) -> bool {
        editor.process_key(Key::Action(action))
    }

    fn type_text(editor: &mut Editor, text: &str) {
        for byte in text.bytes() {
            editor.process_key(Key::Literal(byte));
        }
    }

    fn lines(editor: &Editor) -> Vec<String> {
        editor
            .doc
            .rows()
            .iter()
            .map(|r| String::from_utf8_lossy(&r.content).into_owned())
            .collect()
    }

    #[test]
    fn test_typing_and_newline() {
        let mut e = editor("");
        type_text(&mut e, "ab");
        press(&mut e, KeyAction::Enter);
        type_text(&mut e, "c");
        assert_eq!(lines(&e), vec!["ab", "c"]);
        assert_eq!(e.cursor, Cursor { line: 1, col: 1, desired_col: 1 });
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut e = editor("ab\ncd\n");
        e.cursor = Cursor::at(1, 0);
        press(&mut e, KeyAction::Backspace);
        assert_eq!(lines(&e), vec!["abcd"]);
        assert_eq!((e.cursor.line, e.cursor.col), (0, 2));
    }

    #[test]
    fn test_delete_forward() {
        let mut e = editor("ab\ncd\n");
        e.cursor = Cursor::at(0, 2);
        press(&mut e, KeyAction::Delete);
        assert_eq!(lines(&e), vec!["abcd"]);
        e.cursor = Cursor::at(0, 4);
        press(&mut e, KeyAction::Delete);
        assert_eq!(lines(&e), vec!["abcd"]);
    }

    #[test]
    fn test_horizontal_movement_wraps_lines() {
        let mut e = editor("ab\ncd\n");
        e.cursor = Cursor::at(0, 2);
        press(&mut e, KeyAction::ArrowRight);
        assert_eq!((e.cursor.line, e.cursor.col), (1, 0));
        press(&mut e, KeyAction::ArrowLeft);
        assert_eq!((e.cursor.line, e.cursor.col), (0, 2));
    }

    #[test]
    fn test_vertical_movement_keeps_render_column() {
        let mut e = editor("abcdefghij\n\tx\nabcdefghij\n");
        e.cursor = Cursor::at(0, 9);
        e.cursor.desired_col = 9;
        press(&mut e, KeyAction::ArrowDown);
        // Render column 9 falls on the 'x' after the tab
        assert_eq!((e.cursor.line, e.cursor.col), (1, 2));
        press(&mut e, KeyAction::ArrowDown);
        assert_eq!((e.cursor.line, e.cursor.col), (2, 9));
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut e = editor("a\n");
        for action in [KeyAction::ArrowUp, KeyAction::ArrowLeft, KeyAction::PageUp] {
            press(&mut e, action);
            assert_eq!((e.cursor.line, e.cursor.col), (0, 0));
        }
        for action in [KeyAction::ArrowDown, KeyAction::PageDown, KeyAction::End] {
            press(&mut e, action);
            assert_eq!(e.cursor.line, 0);
            assert!(e.cursor.col <= 1);
        }
    }

    #[test]
    fn test_page_down_moves_a_screenful() {
        let text: String = (0..100).map(|i| format!("{}\n", i)).collect();
        let mut e = editor(&text);
        press(&mut e, KeyAction::PageDown);
        // 10 text rows: bottom of screen (9) plus one screenful
        assert_eq!(e.cursor.line, 19);
    }

    #[test]
    fn test_quit_clean_document_exits_immediately() {
        let mut e = editor("x\n");
        assert!(press(&mut e, KeyAction::Quit));
    }

    #[test]
    fn test_quit_dirty_document_needs_confirmation() {
        let mut e = editor("x\n");
        type_text(&mut e, "y");
        assert!(!press(&mut e, KeyAction::Quit));
        assert_eq!(e.mode, Mode::ConfirmQuit);
        assert!(!press(&mut e, KeyAction::Quit));
        assert!(press(&mut e, KeyAction::Quit));
    }

    #[test]
    fn test_other_key_resets_quit_confirmation() {
        let mut e = editor("x\n");
        type_text(&mut e, "y");
        press(&mut e, KeyAction::Quit);
        press(&mut e, KeyAction::Quit);
        press(&mut e, KeyAction::ArrowLeft);
        assert_eq!(e.mode, Mode::Editing);
        assert!(!press(&mut e, KeyAction::Quit));
        assert!(!press(&mut e, KeyAction::Quit));
        assert!(press(&mut e, KeyAction::Quit));
    }

    #[test]
    fn test_save_without_name_opens_prompt_and_cancel_returns() {
        let mut e = editor("x\n");
        press(&mut e, KeyAction::Save);
        assert_eq!(e.mode, Mode::PromptSaveAs);
        type_text(&mut e, "out.c");
        assert_eq!(e.prompt, b"out.c");
        press(&mut e, KeyAction::Cancel);
        assert_eq!(e.mode, Mode::Editing);
        assert!(e.prompt.is_empty());
        assert!(e.doc.filename().is_none());
    }

    #[test]
    fn test_search_moves_cursor_and_cancel_restores() {
        let mut e = editor("bar\nfoobar\nbaz\n");
        e.cursor = Cursor::at(2, 1);
        press(&mut e, KeyAction::Find);
        assert_eq!(e.mode, Mode::PromptSearch);
        type_text(&mut e, "foo");
        assert_eq!((e.cursor.line, e.cursor.col), (1, 0));
        press(&mut e, KeyAction::ArrowDown);
        assert_eq!((e.cursor.line, e.cursor.col), (1, 0));

        press(&mut e, KeyAction::Cancel);
        assert_eq!(e.mode, Mode::Editing);
        assert_eq!((e.cursor.line, e.cursor.col), (2, 1));
        assert!(e
            .doc
            .rows()
            .iter()
            .all(|r| r.highlight.iter().all(|k| *k != crate::syntax::HighlightKind::Match)));
    }

    #[test]
    fn test_search_confirm_keeps_match_position() {
        let mut e = editor("one\ntwo\nthree\n");
        press(&mut e, KeyAction::Find);
        type_text(&mut e, "hre");
        press(&mut e, KeyAction::Enter);
        assert_eq!(e.mode, Mode::Editing);
        assert_eq!((e.cursor.line, e.cursor.col), (2, 1));
        assert!(e.search.is_none());
    }
}
