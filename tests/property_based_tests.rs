// tests/property_based_tests.rs - Invariants that must hold after any key sequence

mod common;

use common::contents;
use proptest::prelude::*;
use scribe::buffer::Document;
use scribe::config::EditorConfig;
use scribe::editor::Editor;
use scribe::key::{Key, KeyAction};
use scribe::row::expand_tabs;

fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        4 => prop::sample::select(b"ab /*\"'\\\t0123x;".to_vec()).prop_map(Key::Literal),
        1 => Just(Key::Action(KeyAction::Enter)),
        1 => Just(Key::Action(KeyAction::Backspace)),
        1 => Just(Key::Action(KeyAction::Delete)),
        1 => prop::sample::select(vec![
            KeyAction::ArrowUp,
            KeyAction::ArrowDown,
            KeyAction::ArrowLeft,
            KeyAction::ArrowRight,
            KeyAction::Home,
            KeyAction::End,
            KeyAction::PageUp,
            KeyAction::PageDown,
        ])
        .prop_map(Key::Action),
    ]
}

fn c_editor(text: &str) -> Editor {
    let mut doc = Document::from_bytes(text.as_bytes(), 4);
    doc.set_filename("prop.c");
    Editor::new(doc, EditorConfig::default(), 8, 20)
}

fn assert_invariants(editor: &Editor) -> Result<(), TestCaseError> {
    let doc = &editor.doc;
    prop_assert!(doc.num_rows() >= 1);
    prop_assert!(editor.cursor.line < doc.num_rows());
    prop_assert!(editor.cursor.col <= doc.row_size(editor.cursor.line));
    for (i, row) in doc.rows().iter().enumerate() {
        prop_assert_eq!(row.index, i);
        prop_assert_eq!(&row.render, &expand_tabs(&row.content, doc.tab_stop()));
        prop_assert_eq!(row.highlight.len(), row.render.len());
    }
    Ok(())
}

proptest! {
    #[test]
    fn cursor_and_rows_stay_consistent(keys in prop::collection::vec(key_strategy(), 0..120)) {
        let mut editor = c_editor("int a;\n/* x\ny */\n");
        for key in keys {
            prop_assert!(!editor.process_key(key));
            assert_invariants(&editor)?;
        }
    }

    #[test]
    fn incremental_highlight_matches_fresh_load(
        keys in prop::collection::vec(key_strategy(), 0..80)
    ) {
        let mut editor = c_editor("/* a\nb */ int c = 1;\n\"s\" 2\n");
        for key in keys {
            editor.process_key(key);
        }
        let mut fresh = Document::from_bytes(&editor.doc.to_bytes(), 4);
        fresh.set_filename("prop.c");
        for (edited, loaded) in editor.doc.rows().iter().zip(fresh.rows()) {
            prop_assert_eq!(&edited.highlight, &loaded.highlight);
            prop_assert_eq!(edited.open_comment, loaded.open_comment);
        }
    }

    #[test]
    fn saved_bytes_reload_to_same_rows(keys in prop::collection::vec(key_strategy(), 0..60)) {
        let mut editor = c_editor("x\n");
        for key in keys {
            editor.process_key(key);
        }
        let reloaded = Document::from_bytes(&editor.doc.to_bytes(), 4);
        let expected = contents(&editor);
        let actual: Vec<String> = reloaded
            .rows()
            .iter()
            .map(|r| String::from_utf8_lossy(&r.content).into_owned())
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn typed_text_lands_in_document(text in "[a-z ]{1,40}") {
        let mut editor = Editor::new(Document::new(8), EditorConfig::default(), 10, 30);
        for byte in text.bytes() {
            editor.process_key(Key::Literal(byte));
        }
        prop_assert_eq!(contents(&editor), vec![text.clone()]);
        prop_assert_eq!(editor.cursor.col, text.len());
        prop_assert!(editor.doc.is_dirty());
    }
}
