//! Configured indenter
//!
//! Binds the indentation functions to a configuration and keeps a classification cache
//! across calls, for callers that reindent the same text repeatedly while it is edited.

use super::{context_in, reindent_in, LineContext};
use crate::julia::classifying::ClassificationCache;
use crate::julia::config::JlindentConfig;
use crate::julia::document::Document;
use std::ops::Range;

#[derive(Debug, Clone)]
pub struct Indenter {
    config: JlindentConfig,
    cache: ClassificationCache,
}

impl Indenter {
    pub fn new(config: JlindentConfig) -> Self {
        Self {
            config,
            cache: ClassificationCache::new(),
        }
    }

    pub fn config(&self) -> &JlindentConfig {
        &self.config
    }

    pub fn indent_unit(&self) -> usize {
        self.config.indent_unit()
    }

    /// Report an edit at `offset` made since the last call.
    pub fn invalidate(&mut self, offset: usize) {
        self.cache.invalidate(offset);
    }

    pub fn compute_indent(&mut self, text: &str, line: usize) -> usize {
        self.line_context(text, line).column
    }

    pub fn line_context(&mut self, text: &str, line: usize) -> LineContext {
        let unit = self.indent_unit();
        context_in(&self.document(text), line, unit)
    }

    pub fn reindent(&mut self, text: &str) -> String {
        let unit = self.indent_unit();
        let document = self.document(text);
        reindent_in(&document, 0..document.line_count(), unit)
    }

    pub fn reindent_lines(&mut self, text: &str, lines: Range<usize>) -> String {
        let unit = self.indent_unit();
        reindent_in(&self.document(text), lines, unit)
    }

    fn document<'a>(&mut self, text: &'a str) -> Document<'a> {
        Document::with_spans(text, self.cache.classify(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julia::config::Loader;
    use crate::julia::indentation::reindent;

    fn indenter(unit: i64) -> Indenter {
        let config = Loader::new()
            .set_override("indent.unit", unit)
            .expect("override to apply")
            .build()
            .expect("config to build");
        Indenter::new(config)
    }

    #[test]
    fn test_uses_configured_unit() {
        let mut indenter = indenter(2);
        assert_eq!(indenter.reindent("if x\ny\nend"), "if x\n  y\nend");
        assert_eq!(indenter.compute_indent("if x\ny\nend", 1), 2);
    }

    #[test]
    fn test_follows_edits() {
        let mut indenter = indenter(4);
        let before = "begin\nx = \"a\"\ny\nend";
        assert_eq!(indenter.reindent(before), reindent(before, 4));

        // Open a triple-quoted string on line 1.
        let after = "begin\nx = \"\"\"a\"\ny\nend";
        indenter.invalidate(before.find('"').unwrap_or(0));
        assert_eq!(indenter.reindent(after), reindent(after, 4));
    }
}
