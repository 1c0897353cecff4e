// Common test utilities: a scripted terminal and editor builders

#![allow(dead_code)]

use scribe::buffer::Document;
use scribe::config::EditorConfig;
use scribe::editor::Editor;
use scribe::error::TerminalError;
use scribe::key::Key;
use scribe::terminal::{ScriptedSource, Terminal, read_key};

pub const CTRL_F: u8 = 6;
pub const CTRL_Q: u8 = 17;
pub const CTRL_S: u8 = 19;
pub const ENTER: u8 = 13;
pub const BACKSPACE: u8 = 127;
pub const ESC: u8 = 0x1b;

/// Terminal fed from a byte script, recording every frame written.
pub struct ScriptedTerminal {
    pub source: ScriptedSource,
    pub frames: Vec<Vec<u8>>,
    pub size: (usize, usize),
}

impl ScriptedTerminal {
    pub fn new(script: &[u8], rows: usize, cols: usize) -> Self {
        Self {
            source: ScriptedSource::new(script),
            frames: Vec::new(),
            size: (rows, cols),
        }
    }

    pub fn last_frame(&self) -> String {
        self.frames
            .last()
            .map(|f| String::from_utf8_lossy(f).into_owned())
            .unwrap_or_default()
    }
}

pub fn any_frame_contains(term: &ScriptedTerminal, text: &str) -> bool {
    term.frames
        .iter()
        .any(|f| String::from_utf8_lossy(f).contains(text))
}

impl Terminal for ScriptedTerminal {
    fn read_key(&mut self) -> Result<Key, TerminalError> {
        Ok(read_key(&mut self.source)?)
    }

    fn window_size(&mut self) -> Result<(usize, usize), TerminalError> {
        Ok(self.size)
    }

    fn write_frame(&mut self, bytes: &[u8]) -> Result<(), TerminalError> {
        self.frames.push(bytes.to_vec());
        Ok(())
    }
}

pub fn editor_with_text(text: &str) -> Editor {
    Editor::new(
        Document::from_bytes(text.as_bytes(), 8),
        EditorConfig::default(),
        24,
        80,
    )
}

pub fn contents(editor: &Editor) -> Vec<String> {
    editor
        .doc
        .rows()
        .iter()
        .map(|r| String::from_utf8_lossy(&r.content).into_owned())
        .collect()
}
