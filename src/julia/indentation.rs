//! Indentation Calculator
//!
//!     Computes the column a line of Julia should start at, from the tracker state at the
//!     start of that line and the line's own first token.
//!
//! Algorithm
//!
//!     1. A line that starts inside a multi-line string, command or block comment keeps its
//!        current indentation.
//!     2. The tracker is replayed over every earlier line.
//!     3. A line whose first token is a mid keyword, an `end` that closes a block, or a
//!        closing bracket returns to the base of the frame it belongs to.
//!     4. Any other line goes to the innermost anchor (0 at top level), plus one unit when
//!        the previous significant line ends with a continuation operator and the innermost
//!        frame is not a bracket. Chains of continued lines all get the same single unit.
//!
//!     Blank and comment-only lines are indented like code, but they never count as the
//!     previous significant line.
//!
//! Reindenting
//!
//!     [reindent] runs the same computation once, top to bottom, feeding each line to the
//!     tracker at its *new* indentation so that bracket anchors follow the lines they were
//!     computed from. Blank lines and lines inside multi-line literals are copied verbatim.
//!     Applying it twice gives the same text as applying it once.

mod indenter;
mod pass;

pub use indenter::Indenter;

use crate::julia::document::Document;
use pass::IndentPass;
use serde::Serialize;
use std::ops::Range;

/// How the indentation of a line came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LineContext {
    pub line: usize,
    /// Open frames at the start of the line.
    pub indent_depth: usize,
    /// Columns added because the previous line continues into this one.
    pub continuation_offset: usize,
    /// The resulting indentation.
    pub column: usize,
    /// The line starts inside a literal or block comment and is left alone.
    pub verbatim: bool,
}

/// Expected indentation column of `line` (0-based). Lines past the end get 0.
pub fn compute_indent(text: &str, line: usize, indent_unit: usize) -> usize {
    line_context(text, line, indent_unit).column
}

/// The full context behind [compute_indent].
pub fn line_context(text: &str, line: usize, indent_unit: usize) -> LineContext {
    context_in(&Document::new(text), line, indent_unit)
}

/// Reindent every line of `text`.
pub fn reindent(text: &str, indent_unit: usize) -> String {
    let document = Document::new(text);
    reindent_in(&document, 0..document.line_count(), indent_unit)
}

/// Reindent the lines in `lines`, leaving the others as they are.
pub fn reindent_lines(text: &str, lines: Range<usize>, indent_unit: usize) -> String {
    reindent_in(&Document::new(text), lines, indent_unit)
}

pub(crate) fn context_in(document: &Document, line: usize, indent_unit: usize) -> LineContext {
    if line >= document.line_count() {
        return LineContext {
            line,
            ..LineContext::default()
        };
    }
    IndentPass::replay_to(document, line, indent_unit).context(line)
}

pub(crate) fn reindent_in(document: &Document, lines: Range<usize>, indent_unit: usize) -> String {
    let text = document.text;
    let index = &document.lines;
    let last = lines.end.min(document.line_count());

    let mut pass = IndentPass::new(document, indent_unit);
    let mut out = String::with_capacity(text.len());
    let mut changed = 0;

    for line in 0..document.line_count() {
        let facts = document.facts(line);
        let start = index.line_start(line);
        let end = index.line_end(line);

        let keep = line < lines.start || line >= last || facts.blank || facts.verbatim;
        if keep {
            out.push_str(&text[start..end]);
        } else {
            let column = pass.context(line).column;
            if column != facts.indent {
                changed += 1;
            }
            out.extend(std::iter::repeat(' ').take(column));
            out.push_str(&text[start + facts.indent..end]);
            pass.feed(line, column);
        }
        if keep && line < last {
            pass.feed(line, facts.indent);
        }
        if end < text.len() {
            out.push('\n');
        }
    }

    tracing::debug!(
        lines = last.saturating_sub(lines.start),
        changed,
        "reindented"
    );
    out
}
