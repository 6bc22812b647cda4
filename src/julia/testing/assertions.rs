//! Fluent assertions over spans and indentation

use crate::julia::classifying::{classify, span_at, Span, SpanKind};
use crate::julia::indentation::{compute_indent, reindent};

/// Assert on the spans of `text`.
pub fn assert_spans(text: &str) -> SpansAssertion<'_> {
    SpansAssertion {
        text,
        spans: classify(text),
    }
}

pub struct SpansAssertion<'a> {
    text: &'a str,
    spans: Vec<Span>,
}

impl<'a> SpansAssertion<'a> {
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Spans are contiguous, non-empty and cover the whole text.
    pub fn covers_text(self) -> Self {
        let mut expected = 0;
        for span in &self.spans {
            assert_eq!(
                span.start, expected,
                "spans leave a gap or overlap at {} in {:?}:\n{}",
                expected, self.text, self.render()
            );
            assert!(span.start < span.end, "empty span in:\n{}", self.render());
            expected = span.end;
        }
        assert_eq!(expected, self.text.len(), "spans stop short:\n{}", self.render());
        self
    }

    pub fn count(self, expected: usize) -> Self {
        assert_eq!(
            self.spans.len(),
            expected,
            "span count differs:\n{}",
            self.render()
        );
        self
    }

    pub fn kind_at(self, offset: usize, expected: SpanKind) -> Self {
        let actual = span_at(&self.spans, offset).map(|span| span.kind);
        assert_eq!(
            actual,
            Some(expected),
            "kind at offset {} differs:\n{}",
            offset,
            self.render()
        );
        self
    }

    /// The kind of the span containing the first occurrence of `needle`.
    pub fn kind_of(self, needle: &str, expected: SpanKind) -> Self {
        let offset = self
            .text
            .find(needle)
            .unwrap_or_else(|| panic!("{:?} does not occur in {:?}", needle, self.text));
        self.kind_at(offset, expected)
    }

    /// Texts of the code spans, in order.
    pub fn code_texts(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .spans
            .iter()
            .filter(|span| span.kind.is_code())
            .map(|span| &self.text[span.range()])
            .collect();
        assert_eq!(actual, expected, "code spans differ:\n{}", self.render());
        self
    }

    fn render(&self) -> String {
        self.spans
            .iter()
            .map(|span| {
                format!(
                    "  {:>5}..{:<5} {:<14} {:?}",
                    span.start,
                    span.end,
                    span.kind.label(),
                    &self.text[span.range()]
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Assert on the indentation of `text` with the given unit.
pub fn assert_indent(text: &str, indent_unit: usize) -> IndentAssertion<'_> {
    IndentAssertion { text, indent_unit }
}

pub struct IndentAssertion<'a> {
    text: &'a str,
    indent_unit: usize,
}

impl<'a> IndentAssertion<'a> {
    pub fn line(self, line: usize, expected: usize) -> Self {
        let actual = compute_indent(self.text, line, self.indent_unit);
        assert_eq!(
            actual, expected,
            "indent of line {} differs in:\n{}",
            line, self.text
        );
        self
    }

    /// Computed columns of every line.
    pub fn columns(self, expected: &[usize]) -> Self {
        let lines = self.text.split('\n').count();
        let actual: Vec<usize> = (0..lines)
            .map(|line| compute_indent(self.text, line, self.indent_unit))
            .collect();
        assert_eq!(actual, expected, "columns differ for:\n{}", self.text);
        self
    }

    pub fn reindents_to(self, expected: &str) -> Self {
        assert_text_eq(expected, &reindent(self.text, self.indent_unit));
        self
    }

    /// Reindenting leaves the text as it is.
    pub fn is_fixed_point(self) -> Self {
        assert_text_eq(self.text, &reindent(self.text, self.indent_unit));
        self
    }

    /// Reindenting twice is the same as reindenting once.
    pub fn is_idempotent(self) -> Self {
        let once = reindent(self.text, self.indent_unit);
        assert_text_eq(&once, &reindent(&once, self.indent_unit));
        self
    }
}

/// Compare texts line by line, showing each differing line with its indentation visible.
pub fn assert_text_eq(expected: &str, actual: &str) {
    if expected == actual {
        return;
    }
    let expected_lines: Vec<&str> = expected.split('\n').collect();
    let actual_lines: Vec<&str> = actual.split('\n').collect();

    let mut report = Vec::new();
    for i in 0..expected_lines.len().max(actual_lines.len()) {
        match (expected_lines.get(i), actual_lines.get(i)) {
            (Some(exp), Some(act)) if exp == act => {}
            (exp, act) => {
                report.push(format!("line {}:", i));
                report.push(format!("  expected: {}", visible(exp.copied())));
                report.push(format!("  actual:   {}", visible(act.copied())));
            }
        }
    }
    panic!(
        "\n\ntexts differ:\n{}\n\nexpected:\n{}\n\nactual:\n{}\n",
        report.join("\n"),
        expected,
        actual
    );
}

fn visible(line: Option<&str>) -> String {
    match line {
        Some(line) => format!("{:?}", line.replace(' ', "·")),
        None => "<missing>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_assertions_chain() {
        assert_spans("x = \"s\" # c")
            .covers_text()
            .count(4)
            .kind_at(5, SpanKind::String)
            .kind_of("# c", SpanKind::Comment)
            .code_texts(&["x = ", " "]);
    }

    #[test]
    fn test_indent_assertions_chain() {
        assert_indent("if x\ny\nend", 4)
            .line(1, 4)
            .columns(&[0, 4, 0])
            .reindents_to("if x\n    y\nend")
            .is_idempotent();
        assert_indent("if x\n  y\nend", 2).is_fixed_point();
    }

    #[test]
    #[should_panic(expected = "texts differ")]
    fn test_text_mismatch_reports() {
        assert_text_eq("a\n  b", "a\n b");
    }
}
