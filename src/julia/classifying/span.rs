//! Span definitions

use serde::Serialize;
use std::ops::Range;

/// What a region of Julia source is.
///
/// Kinds are mutually exclusive: every byte of a text belongs to exactly one span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpanKind {
    Code,
    Comment,
    String,
    TripleString,
    Command,
    TripleCommand,
    CharLiteral,
}

impl SpanKind {
    pub fn is_code(self) -> bool {
        matches!(self, SpanKind::Code)
    }

    /// String, command and character literals (everything quoted).
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SpanKind::String
                | SpanKind::TripleString
                | SpanKind::Command
                | SpanKind::TripleCommand
                | SpanKind::CharLiteral
        )
    }

    /// Kinds whose interior lines are left alone by the indentation engine.
    pub fn is_verbatim(self) -> bool {
        !self.is_code()
    }

    pub fn label(self) -> &'static str {
        match self {
            SpanKind::Code => "code",
            SpanKind::Comment => "comment",
            SpanKind::String => "string",
            SpanKind::TripleString => "triple-string",
            SpanKind::Command => "command",
            SpanKind::TripleCommand => "triple-command",
            SpanKind::CharLiteral => "char-literal",
        }
    }
}

/// A maximal run of uniformly classified text, as a half-open byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
}

impl Span {
    pub fn new(kind: SpanKind, start: usize, end: usize) -> Self {
        Self { start, end, kind }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// The span covering `offset`, if any.
pub fn span_at(spans: &[Span], offset: usize) -> Option<&Span> {
    let idx = spans.partition_point(|span| span.end <= offset);
    spans.get(idx).filter(|span| span.contains(offset))
}

/// Accumulates spans, merging adjacent code runs and dropping empty ones.
#[derive(Debug, Default)]
pub(crate) struct SpanBuilder {
    spans: Vec<Span>,
}

impl SpanBuilder {
    pub(crate) fn with_prefix(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub(crate) fn push(&mut self, kind: SpanKind, start: usize, end: usize) {
        if start >= end {
            return;
        }
        if let Some(last) = self.spans.last_mut() {
            if last.kind.is_code() && kind.is_code() && last.end == start {
                last.end = end;
                return;
            }
        }
        self.spans.push(Span::new(kind, start, end));
    }

    pub(crate) fn finish(self) -> Vec<Span> {
        self.spans
    }
}
