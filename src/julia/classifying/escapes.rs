//! Escape sequences inside quoted spans

use super::span::Span;
use std::ops::Range;

/// Byte ranges of backslash escapes inside string, command and char literal spans.
///
/// Recognized forms: `\xHH`, `\uHHHH`, `\UHHHHHHHH`, octal `\nnn`, and `\c` for any other
/// character. Hex and octal escapes take as many digits as are present, up to their width.
pub fn escapes(text: &str, spans: &[Span]) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    for span in spans.iter().filter(|span| span.kind.is_literal()) {
        let body = &text[span.range()];
        let mut chars = body.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c != '\\' {
                continue;
            }
            let Some((_, escaped)) = chars.next() else {
                found.push(span.start + i..span.end);
                break;
            };
            let (radix, max) = match escaped {
                'x' => (16, 2),
                'u' => (16, 4),
                'U' => (16, 8),
                '0'..='7' => (8, 2),
                _ => (10, 0),
            };
            let mut end = i + 1 + escaped.len_utf8();
            for _ in 0..max {
                match chars.peek() {
                    Some(&(j, d)) if d.is_digit(radix) => {
                        end = j + d.len_utf8();
                        chars.next();
                    }
                    _ => break,
                }
            }
            found.push(span.start + i..span.start + end);
        }
    }
    found
}
