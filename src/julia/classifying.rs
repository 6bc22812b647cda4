//! Region Classifier
//!
//!     Splits Julia source into spans of code, comments, strings, commands and character
//!     literals, in one linear pass. Everything downstream (tokens, nesting, indentation,
//!     definitions) only ever looks inside code spans, so a keyword or bracket in a string
//!     or comment can never be mistaken for structure.
//!
//! Rules
//!
//!     At each position that is not inside an open construct, in priority order:
//!
//!         1. `\` escapes the next character; the pair opens nothing.
//!         2. `#` starts a comment to the end of the line (newline excluded); `#=` starts a
//!            nestable block comment closed by `=#`.
//!         3. `"""` opens a triple-quoted string, closed by the last three quotes of the next
//!            unescaped run of three or more.
//!         4. `"` opens a string closed by the next unescaped `"`, on any line.
//!         5. and 6. Backticks, as 3 and 4, for commands.
//!         7. `'` opens a char literal in value position; right after an identifier, a
//!            closing bracket, a `.`, a `'` or another literal it is the transpose operator.
//!         8. Everything else is code.
//!
//!     Unterminated constructs run to the end of the text. The classifier never fails.
//!
//! Invariants
//!
//!     Spans are sorted, contiguous and non-overlapping, cover `[0, len)` exactly once, and
//!     adjacent code runs are merged. They depend on nothing but the text, which is what
//!     lets [ClassificationCache] reuse a validated prefix.

mod cache;
mod escapes;
mod scanner;
mod span;

pub use cache::ClassificationCache;
pub use escapes::escapes;
pub use span::{span_at, Span, SpanKind};

use scanner::RegionScanner;

/// Classify the whole text.
pub fn classify(text: &str) -> Vec<Span> {
    let spans = RegionScanner::new(text).run();
    tracing::trace!(bytes = text.len(), spans = spans.len(), "classified text");
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers(text: &str, spans: &[Span]) {
        let mut expected_start = 0;
        for span in spans {
            assert_eq!(span.start, expected_start, "gap or overlap in {spans:?}");
            assert!(span.start < span.end, "empty span in {spans:?}");
            expected_start = span.end;
        }
        assert_eq!(expected_start, text.len());
    }

    #[test]
    fn test_spans_cover_text() {
        for text in [
            "",
            "x",
            "f(x) = \"a\" * 'b' # c",
            "\"\"\"\nif\n\"\"\"\nend",
            "a = [1 2]'\n`ls`\n#= x =#",
            "s = \"unterminated\nmore",
        ] {
            assert_covers(text, &classify(text));
        }
    }

    #[test]
    fn test_keywords_in_strings_and_comments() {
        let text = "x = \"if\" # end\ny = `for`";
        let spans = classify(text);
        let code: Vec<&str> = spans
            .iter()
            .filter(|span| span.kind.is_code())
            .map(|span| &text[span.range()])
            .collect();
        assert_eq!(code, vec!["x = ", " ", "\ny = "]);
    }

    #[test]
    fn test_multiline_string_spans_lines() {
        let text = "s = \"\"\"\n    if x\n    \"\"\"\nend";
        let spans = classify(text);
        let string = spans
            .iter()
            .find(|span| span.kind == SpanKind::TripleString)
            .unwrap();
        assert_eq!(&text[string.range()], "\"\"\"\n    if x\n    \"\"\"");
    }
}
