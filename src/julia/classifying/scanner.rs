//! Region scanner
//!
//! A single forward pass over the bytes of the text. All delimiters are ASCII, so
//! scanning bytes never splits a multi-byte character except after a backslash, where the
//! escaped character is consumed whole.

use super::span::{Span, SpanBuilder, SpanKind};

pub(crate) struct RegionScanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// Offset where the last string, command or char literal closed.
    literal_end: Option<usize>,
    builder: SpanBuilder,
}

impl<'a> RegionScanner<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self::resume(text, 0, Vec::new())
    }

    /// Continue scanning at `start`, which must begin a code span. `prefix` holds the
    /// already-classified spans before it.
    pub(crate) fn resume(text: &'a str, start: usize, prefix: Vec<Span>) -> Self {
        let literal_end = prefix
            .last()
            .filter(|span| span.kind.is_literal() && span.end == start)
            .map(|span| span.end);
        Self {
            text,
            bytes: text.as_bytes(),
            pos: start,
            literal_end,
            builder: SpanBuilder::with_prefix(prefix),
        }
    }

    pub(crate) fn run(mut self) -> Vec<Span> {
        let len = self.bytes.len();
        let mut code_start = self.pos;

        while self.pos < len {
            let start = self.pos;
            let (kind, end) = match self.bytes[start] {
                b'\\' => {
                    self.pos = self.skip_escape(start);
                    continue;
                }
                b'#' => (SpanKind::Comment, self.scan_comment(start)),
                b'"' if self.starts_with(start, b"\"\"\"") => {
                    (SpanKind::TripleString, self.scan_triple(start, b'"'))
                }
                b'"' => (SpanKind::String, self.scan_quoted(start, b'"')),
                b'`' if self.starts_with(start, b"```") => {
                    (SpanKind::TripleCommand, self.scan_triple(start, b'`'))
                }
                b'`' => (SpanKind::Command, self.scan_quoted(start, b'`')),
                b'\'' if self.opens_char_literal(start) => {
                    (SpanKind::CharLiteral, self.scan_quoted(start, b'\''))
                }
                _ => {
                    self.pos += 1;
                    continue;
                }
            };
            self.builder.push(SpanKind::Code, code_start, start);
            self.builder.push(kind, start, end);
            if kind.is_literal() {
                self.literal_end = Some(end);
            }
            self.pos = end;
            code_start = end;
        }

        self.builder.push(SpanKind::Code, code_start, len);
        self.builder.finish()
    }

    fn starts_with(&self, at: usize, pattern: &[u8]) -> bool {
        self.bytes[at..].starts_with(pattern)
    }

    /// Offset just past a backslash and the character it escapes.
    fn skip_escape(&self, at: usize) -> usize {
        let next = at + 1;
        let width = self.text[next..].chars().next().map_or(0, char::len_utf8);
        next + width
    }

    /// A `'` in value position opens a char literal; after a value it is the transpose
    /// operator.
    fn opens_char_literal(&self, at: usize) -> bool {
        if self.literal_end == Some(at) {
            return false;
        }
        match self.text[..at].chars().next_back() {
            None => true,
            Some(prev) => {
                !(prev.is_alphanumeric()
                    || prev == '_'
                    || matches!(prev, ')' | ']' | '}' | '\'' | '.'))
            }
        }
    }

    /// Line comments stop before the newline; `#=` block comments nest.
    fn scan_comment(&self, at: usize) -> usize {
        if !self.starts_with(at, b"#=") {
            return self.bytes[at..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(self.bytes.len(), |i| at + i);
        }

        let mut depth = 1;
        let mut pos = at + 2;
        while pos < self.bytes.len() {
            if self.starts_with(pos, b"#=") {
                depth += 1;
                pos += 2;
            } else if self.starts_with(pos, b"=#") {
                depth -= 1;
                pos += 2;
                if depth == 0 {
                    return pos;
                }
            } else {
                pos += 1;
            }
        }
        self.bytes.len()
    }

    /// `"..."`, `` `...` `` and `'...'`: closed by the next unescaped delimiter.
    fn scan_quoted(&self, at: usize, delimiter: u8) -> usize {
        let mut pos = at + 1;
        while pos < self.bytes.len() {
            match self.bytes[pos] {
                b'\\' => pos = self.skip_escape(pos),
                b if b == delimiter => return pos + 1,
                _ => pos += 1,
            }
        }
        self.bytes.len()
    }

    /// Triple-quoted forms close on a run of three or more delimiters; the closing
    /// delimiter is the last three of the run.
    fn scan_triple(&self, at: usize, delimiter: u8) -> usize {
        let mut pos = at + 3;
        while pos < self.bytes.len() {
            match self.bytes[pos] {
                b'\\' => pos = self.skip_escape(pos),
                b if b == delimiter => {
                    let run = self.bytes[pos..]
                        .iter()
                        .take_while(|&&b| b == delimiter)
                        .count();
                    pos += run;
                    if run >= 3 {
                        return pos;
                    }
                }
                _ => pos += 1,
            }
        }
        self.bytes.len()
    }
}
