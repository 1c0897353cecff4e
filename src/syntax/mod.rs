pub mod highlighter;
pub mod profile;

pub use highlighter::{HighlightResult, highlight_row, is_non_printable, is_separator};
pub use profile::{HighlightFlags, SyntaxProfile, builtin_profiles, select_profile};

/// Per-byte classification of rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighlightKind {
    #[default]
    Normal,
    NonPrintable,
    Comment,
    MultiLineComment,
    Keyword,
    Type,
    String,
    Number,
    /// Current search match, applied as a temporary override
    Match,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_kind_default() {
        assert_eq!(HighlightKind::default(), HighlightKind::Normal);
        assert_ne!(HighlightKind::Keyword, HighlightKind::Type);
    }
}
