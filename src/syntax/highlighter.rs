// syntax/highlighter.rs - Single-pass line highlighter with multi-line comment state

use crate::syntax::{HighlightKind, SyntaxProfile};
use log::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightResult {
    pub highlight: Vec<HighlightKind>,
    /// An unterminated multi-line comment is still open at end of row
    pub open_comment: bool,
}

pub fn is_separator(byte: u8) -> bool {
    byte == 0 || byte.is_ascii_whitespace() || b",.()+-/*=~%[];{}<>:&|!^".contains(&byte)
}

/// Control bytes drawn as a reverse-video symbol.
pub fn is_non_printable(byte: u8) -> bool {
    byte < 0x20 || byte == 0x7f
}

/// Classify every byte of `render`.
///
/// `starts_in_comment` is the previous row's trailing open-comment state.
/// Without a profile the whole row is `Normal` and never leaves a comment open.
pub fn highlight_row(
    render: &[u8],
    starts_in_comment: bool,
    profile: Option<&SyntaxProfile>,
) -> HighlightResult {
    let Some(profile) = profile else {
        return HighlightResult {
            highlight: vec![HighlightKind::Normal; render.len()],
            open_comment: false,
        };
    };

    let mut highlight: Vec<HighlightKind> = render
        .iter()
        .map(|&b| {
            if is_non_printable(b) {
                HighlightKind::NonPrintable
            } else {
                HighlightKind::Normal
            }
        })
        .collect();

    let len = render.len();
    let mut i = 0;
    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = starts_in_comment && profile.multiline_comment.is_some();

    while i < len {
        let byte = render[i];
        let rest = &render[i..];

        if let Some((start, end)) = profile.multiline_comment {
            if in_comment {
                if rest.starts_with(end.as_bytes()) {
                    highlight[i..i + end.len()].fill(HighlightKind::MultiLineComment);
                    i += end.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    highlight[i] = HighlightKind::MultiLineComment;
                    i += 1;
                }
                continue;
            }
            if in_string.is_none() && rest.starts_with(start.as_bytes()) {
                highlight[i..i + start.len()].fill(HighlightKind::MultiLineComment);
                i += start.len();
                in_comment = true;
                continue;
            }
        }

        if in_string.is_none()
            && let Some(marker) = profile.singleline_comment
            && rest.starts_with(marker.as_bytes())
        {
            highlight[i..].fill(HighlightKind::Comment);
            break;
        }

        if profile.flags.strings {
            if let Some(quote) = in_string {
                highlight[i] = HighlightKind::String;
                if byte == b'\\' && i + 1 < len {
                    highlight[i + 1] = HighlightKind::String;
                    i += 2;
                    continue;
                }
                if byte == quote {
                    in_string = None;
                }
                i += 1;
                continue;
            }
            if byte == b'"' || byte == b'\'' {
                in_string = Some(byte);
                highlight[i] = HighlightKind::String;
                i += 1;
                prev_sep = false;
                continue;
            }
        }

        if highlight[i] == HighlightKind::NonPrintable {
            i += 1;
            prev_sep = false;
            continue;
        }

        if profile.flags.numbers {
            let after_number = i > 0 && highlight[i - 1] == HighlightKind::Number;
            let signed = (byte == b'-' || byte == b'+')
                && prev_sep
                && render.get(i + 1).is_some_and(u8::is_ascii_digit);
            if (byte.is_ascii_digit() && (prev_sep || after_number))
                || (byte == b'.' && after_number)
                || signed
            {
                highlight[i] = HighlightKind::Number;
                i += 1;
                prev_sep = false;
                continue;
            }
        }

        if prev_sep && let Some((word_len, kind)) = match_keyword(profile, rest) {
            highlight[i..i + word_len].fill(kind);
            i += word_len;
            prev_sep = false;
            continue;
        }

        prev_sep = is_separator(byte);
        i += 1;
    }

    trace!("Highlighted {} bytes, open comment: {}", len, in_comment);
    HighlightResult {
        highlight,
        open_comment: in_comment,
    }
}

/// Longest keyword or type at the start of `rest` that ends on a separator.
fn match_keyword(profile: &SyntaxProfile, rest: &[u8]) -> Option<(usize, HighlightKind)> {
    let keywords = profile.keywords.iter().map(|k| (k, HighlightKind::Keyword));
    let types = profile.types.iter().map(|k| (k, HighlightKind::Type));

    let mut best: Option<(usize, HighlightKind)> = None;
    for (word, kind) in keywords.chain(types) {
        let word = word.as_bytes();
        let bounded = rest
            .get(word.len())
            .is_none_or(|&next| is_separator(next));
        if rest.starts_with(word) && bounded && best.is_none_or(|(len, _)| word.len() > len) {
            best = Some((word.len(), kind));
        }
    }
    best
}
