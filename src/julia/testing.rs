//! Testing utilities for the Julia engine
//!
//! Test Content
//!
//!     Julia that is hand-typed into a test is easy to get subtly wrong: a missing `end`, a
//!     tab where spaces were meant, a string that quietly swallows the rest of the snippet.
//!     Short inline snippets are fine for focused rules; anything larger should come from
//!     the curated files under `samples/`, loaded through [Samples]. Every sample is kept
//!     in its canonical indentation (unit 4), so reindenting one must return it unchanged.
//!
//! Fluent Assertions
//!
//!     [assert_spans] and [assert_indent] wrap the engine's outputs and check several facts
//!     in one chain, reporting the whole picture on failure instead of a bare mismatch:
//!
//!         assert_indent("if x\ny\nend", 4)
//!             .columns(&[0, 4, 0])
//!             .reindents_to("if x\n    y\nend")
//!             .is_fixed_point();
//!
//!         assert_spans("x = \"s\" # c")
//!             .covers_text()
//!             .kind_at(5, SpanKind::String)
//!             .code_texts(&["x = ", " "]);

mod assertions;
mod samples;

pub use assertions::{assert_indent, assert_spans, assert_text_eq, IndentAssertion, SpansAssertion};
pub use samples::Samples;
