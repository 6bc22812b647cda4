//! Forward indentation pass
//!
//! One tracker replay that moves down the document a line at a time. Before a line is fed,
//! [IndentPass::context] answers what its indentation should be; feeding it then places
//! its tokens at whatever indentation the caller settled on.

use super::LineContext;
use crate::julia::document::Document;
use crate::julia::tracking::Tracker;

pub(crate) struct IndentPass<'d, 'a> {
    document: &'d Document<'a>,
    tracker: Tracker,
    unit: usize,
}

impl<'d, 'a> IndentPass<'d, 'a> {
    pub(crate) fn new(document: &'d Document<'a>, indent_unit: usize) -> Self {
        Self {
            document,
            tracker: Tracker::new(indent_unit),
            unit: indent_unit,
        }
    }

    /// Feed the lines before `line` at their current indentation.
    pub(crate) fn replay_to(document: &'d Document<'a>, line: usize, indent_unit: usize) -> Self {
        let mut pass = Self::new(document, indent_unit);
        for earlier in 0..line.min(document.line_count()) {
            pass.feed(earlier, document.facts(earlier).indent);
        }
        tracing::trace!(line, depth = pass.tracker.depth(), "replayed tracker");
        pass
    }

    /// Indentation of `line`, given every earlier line has been fed.
    pub(crate) fn context(&self, line: usize) -> LineContext {
        let document = self.document;
        let facts = document.facts(line);
        let depth = self.tracker.depth();

        if facts.verbatim {
            return LineContext {
                line,
                indent_depth: depth,
                continuation_offset: 0,
                column: facts.indent,
                verbatim: true,
            };
        }

        if facts.leads_with_token {
            let first = facts.first_token;
            let closing = self
                .tracker
                .closing_column(&document.tokens[first], &document.neighbours(first));
            if let Some(column) = closing {
                return LineContext {
                    line,
                    indent_depth: depth,
                    continuation_offset: 0,
                    column,
                    verbatim: false,
                };
            }
        }

        let in_bracket = self
            .tracker
            .innermost()
            .map_or(false, |frame| frame.is_paren());
        let continuation_offset = if facts.continued && !in_bracket {
            self.unit
        } else {
            0
        };
        LineContext {
            line,
            indent_depth: depth,
            continuation_offset,
            column: self.tracker.anchor() + continuation_offset,
            verbatim: false,
        }
    }

    pub(crate) fn feed(&mut self, line: usize, indent: usize) {
        self.tracker.feed_line(self.document, line, indent);
    }
}
