// ui/theme.rs - Highlight colors

use crate::syntax::HighlightKind;
use crossterm::style::Color;

/// Foreground color per highlight class. `Normal` text uses the terminal default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub comment: Color,
    pub keyword: Color,
    pub r#type: Color,
    pub string: Color,
    pub number: Color,
    pub search_match: Color,
    pub non_printable: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            comment: Color::Rgb { r: 98, g: 114, b: 164 },    // Dark blue
            keyword: Color::Rgb { r: 255, g: 121, b: 198 },   // Pink
            r#type: Color::Rgb { r: 139, g: 233, b: 253 },    // Cyan
            string: Color::Rgb { r: 241, g: 250, b: 140 },    // Yellow
            number: Color::Rgb { r: 189, g: 147, b: 249 },    // Purple
            search_match: Color::Rgb { r: 80, g: 250, b: 123 }, // Green
            non_printable: Color::Rgb { r: 255, g: 85, b: 85 },
        }
    }
}

impl Theme {
    pub fn color_for(&self, kind: HighlightKind) -> Option<Color> {
        match kind {
            HighlightKind::Normal => None,
            HighlightKind::NonPrintable => Some(self.non_printable),
            HighlightKind::Comment | HighlightKind::MultiLineComment => Some(self.comment),
            HighlightKind::Keyword => Some(self.keyword),
            HighlightKind::Type => Some(self.r#type),
            HighlightKind::String => Some(self.string),
            HighlightKind::Number => Some(self.number),
            HighlightKind::Match => Some(self.search_match),
        }
    }
}
