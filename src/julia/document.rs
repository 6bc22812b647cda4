//! Analyzed document
//!
//!     The indentation calculator and the defun locator both replay the tracker over the
//!     same material: the spans, the tokens as one flat sequence, and a handful of per-line
//!     facts (blank, verbatim, where the significant content ends). A [Document] computes
//!     all of it once, in a single pass over the text, so the replays that follow are plain
//!     walks over vectors.
//!
//! Columns
//!
//!     Tokens remember their column relative to the indentation of their own line. A replay
//!     places a token at `indent + relative`, where `indent` is whatever indentation the
//!     replay decided for that line: the current one when computing a single line, the new
//!     one while reindenting.

use crate::julia::classifying::{classify, span_at, Span, SpanKind};
use crate::julia::lines::LineIndex;
use crate::julia::scanning::{tokens, Token};
use crate::julia::tracking::{Neighbours, Placement};
use std::ops::Range;

/// Facts about one line that do not depend on any replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineFacts {
    /// Indices of the tokens that start on this line.
    pub first_token: usize,
    pub end_token: usize,
    /// Current width of the leading whitespace.
    pub indent: usize,
    pub blank: bool,
    /// The line starts inside a string, command or block comment opened on an earlier line.
    pub verbatim: bool,
    /// The line holds something besides whitespace and comments.
    pub significant: bool,
    /// The last significant content of the line is an operator that continues the
    /// expression onto the next line.
    pub trailing_operator: bool,
    /// The first token starts where the line's content starts.
    pub leads_with_token: bool,
    /// A string, command or block comment is still open at the end of the line.
    pub ends_open: bool,
    /// The last significant line before this one ends with a continuation operator.
    /// Blank and comment-only lines in between are skipped.
    pub continued: bool,
}

/// A text with its spans, tokens and line facts.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    pub text: &'a str,
    pub spans: Vec<Span>,
    pub lines: LineIndex,
    pub tokens: Vec<Token<'a>>,
    token_lines: Vec<usize>,
    /// Column of each token minus the indentation of its line.
    token_offsets: Vec<usize>,
    /// For opening brackets, the same relative column of the first content after them on
    /// their line.
    follower_offsets: Vec<Option<usize>>,
    facts: Vec<LineFacts>,
}

impl<'a> Document<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_spans(text, classify(text))
    }

    /// Build from spans classified elsewhere, such as a [ClassificationCache].
    ///
    /// [ClassificationCache]: crate::julia::classifying::ClassificationCache
    pub fn with_spans(text: &'a str, spans: Vec<Span>) -> Self {
        let lines = LineIndex::new(text);
        let scanned: Vec<Token<'a>> = tokens(text, &spans).collect();

        let mut token_lines = Vec::with_capacity(scanned.len());
        let mut token_offsets = Vec::with_capacity(scanned.len());
        let mut follower_offsets = Vec::with_capacity(scanned.len());
        for token in &scanned {
            let line = lines.line_of(token.start);
            let indent = lines.indentation(text, line);
            let relative = |offset: usize| lines.column(text, offset).saturating_sub(indent);
            token_lines.push(line);
            token_offsets.push(relative(token.start));
            follower_offsets.push(if token.lexeme.is_open_bracket() {
                first_content(text, &spans, token.end, lines.line_end(line)).map(relative)
            } else {
                None
            });
        }

        let mut document = Self {
            text,
            spans,
            lines,
            tokens: scanned,
            token_lines,
            token_offsets,
            follower_offsets,
            facts: Vec::new(),
        };
        document.facts = (0..document.lines.line_count())
            .map(|line| document.compute_facts(line))
            .collect();

        let mut carried = false;
        for facts in &mut document.facts {
            facts.continued = carried;
            if facts.significant {
                carried = facts.trailing_operator;
            }
        }
        document
    }

    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    pub fn facts(&self, line: usize) -> LineFacts {
        self.facts.get(line).copied().unwrap_or_default()
    }

    /// Token indices of `line`.
    pub fn line_tokens(&self, line: usize) -> Range<usize> {
        let facts = self.facts(line);
        facts.first_token..facts.end_token
    }

    pub fn token_line(&self, index: usize) -> usize {
        self.token_lines[index]
    }

    pub fn neighbours(&self, index: usize) -> Neighbours {
        let line = self.token_lines[index];
        let prev = index
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|token| token.lexeme);
        let next = self.tokens.get(index + 1).map(|token| token.lexeme);
        let range = self.line_tokens(line);
        let gap_start = index
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(0, |token| token.end);
        Neighbours {
            prev,
            next,
            alone_on_line: range.len() == 1,
            after_literal: self.has_literal(gap_start, self.tokens[index].start),
        }
    }

    /// Whether a string, command or char literal lies in `start..end`.
    fn has_literal(&self, start: usize, end: usize) -> bool {
        let first = self.spans.partition_point(|span| span.end <= start);
        self.spans[first..]
            .iter()
            .take_while(|span| span.start < end)
            .any(|span| span.kind.is_literal())
    }

    /// Where token `index` sits when its line is indented to `line_indent`.
    pub fn placement(&self, index: usize, line_indent: usize) -> Placement {
        Placement {
            line: self.token_lines[index],
            column: line_indent + self.token_offsets[index],
            line_indent,
            follower_column: self.follower_offsets[index].map(|offset| line_indent + offset),
        }
    }

    fn compute_facts(&self, line: usize) -> LineFacts {
        let text = self.text;
        let start = self.lines.line_start(line);
        let end = self.lines.line_end(line);
        let first_token = self.tokens.partition_point(|token| token.start < start);
        let end_token = self.tokens.partition_point(|token| token.start < end);
        let content_start = self.lines.content_start(text, line);

        let verbatim = span_at(&self.spans, start)
            .map_or(false, |span| span.kind.is_verbatim() && span.start < start);

        // Last byte of the line that is neither whitespace nor comment.
        let last_content = text[start..end]
            .char_indices()
            .rev()
            .map(|(i, c)| (start + i, c))
            .find(|&(offset, c)| {
                !c.is_whitespace()
                    && span_at(&self.spans, offset)
                        .map_or(true, |span| span.kind != SpanKind::Comment)
            });

        let trailing_operator = last_content.map_or(false, |(offset, c)| {
            self.tokens[first_token..end_token]
                .last()
                .map_or(false, |token| {
                    token.end == offset + c.len_utf8() && token.continues_line()
                })
        });

        LineFacts {
            first_token,
            end_token,
            indent: self.lines.indentation(text, line),
            blank: self.lines.is_blank(text, line),
            verbatim,
            significant: last_content.is_some(),
            trailing_operator,
            leads_with_token: self
                .tokens
                .get(first_token)
                .map_or(false, |token| first_token < end_token && token.start == content_start),
            ends_open: span_at(&self.spans, end).map_or(false, |span| !span.kind.is_code()),
            continued: false,
        }
    }
}

/// First byte in `from..line_end` that is neither whitespace nor comment.
fn first_content(text: &str, spans: &[Span], from: usize, line_end: usize) -> Option<usize> {
    text.get(from..line_end)?
        .char_indices()
        .map(|(i, c)| (from + i, c))
        .find(|&(offset, c)| {
            !c.is_whitespace()
                && span_at(spans, offset).map_or(true, |span| span.kind != SpanKind::Comment)
        })
        .map(|(offset, _)| offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_tokens() {
        let doc = Document::new("if x\n    y(1)\nend");
        assert_eq!(doc.line_tokens(0), 0..2);
        assert_eq!(doc.line_tokens(1), 2..6);
        assert_eq!(doc.line_tokens(2), 6..7);
        assert_eq!(doc.token_line(6), 2);
    }

    #[test]
    fn test_trailing_operator_skips_comments() {
        let doc = Document::new("x = a +  # more\n\n# note\n    b");
        assert!(doc.facts(0).trailing_operator);
        assert!(!doc.facts(1).significant);
        assert!(!doc.facts(2).significant);
        assert!(doc.facts(3).continued);
    }

    #[test]
    fn test_string_content_is_not_an_operator() {
        let doc = Document::new("x = \"a +\"\ny");
        assert!(doc.facts(0).significant);
        assert!(!doc.facts(0).trailing_operator);
        assert!(!doc.facts(1).continued);
    }

    #[test]
    fn test_verbatim_lines() {
        let doc = Document::new("s = \"\"\"\n  body\n  \"\"\"\n#= a\n b =#\nx");
        assert!(!doc.facts(0).verbatim);
        assert!(doc.facts(1).verbatim);
        assert!(doc.facts(2).verbatim);
        assert!(!doc.facts(3).verbatim);
        assert!(doc.facts(4).verbatim);
        assert!(!doc.facts(5).verbatim);
        assert!(doc.facts(0).ends_open);
        assert!(!doc.facts(2).ends_open);
        assert!(doc.facts(3).ends_open);
    }

    #[test]
    fn test_leading_token() {
        let doc = Document::new("  end\n  # c\n  \"s\" * x");
        assert!(doc.facts(0).leads_with_token);
        assert!(!doc.facts(1).leads_with_token);
        assert!(!doc.facts(2).leads_with_token);
    }

    #[test]
    fn test_placement_uses_given_indent() {
        let doc = Document::new("  foo(a,\n      b)");
        let placement = doc.placement(1, 8);
        assert_eq!(placement.column, 11);
        assert_eq!(placement.line_indent, 8);
        assert_eq!(placement.follower_column, Some(12));
        assert_eq!(doc.placement(3, 0).follower_column, None);
    }

    #[test]
    fn test_literals_follow_brackets() {
        let doc = Document::new("println(\"hi\",\nxs = [`ls`  # c\nf( # c\n");
        assert_eq!(doc.placement(1, 0).follower_column, Some(8));
        assert_eq!(doc.placement(5, 0).follower_column, Some(6));
        assert_eq!(doc.placement(7, 0).follower_column, None);
    }

    #[test]
    fn test_neighbours_see_literals_between_tokens() {
        let doc = Document::new("(\"a\" for i in xs)");
        assert!(doc.neighbours(1).after_literal);
        assert!(!doc.neighbours(2).after_literal);
    }
}
