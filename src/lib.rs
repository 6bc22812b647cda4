//! # julia-indent
//!
//! Region classification, indentation and definition navigation for Julia source.
//!
//! File Layout
//!
//!     The engine is a one-way pipeline, leaves first:
//!
//!         src/julia/classifying   text -> spans (code, comment, strings, commands, chars)
//!         src/julia/scanning      spans -> lazy tokens confined to code
//!         src/julia/tracking      tokens -> nesting stack of block and bracket frames
//!         src/julia/indentation   stack -> indentation column of any line
//!         src/julia/defun         stack -> boundaries of function definitions
//!
//!     Configuration, errors and the test helpers live beside them. Every core operation is
//!     a pure function of the text; nothing here raises on malformed Julia.
//!
//! For the testing conventions, see the [testing module](julia::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod julia;

pub use julia::classifying::{classify, escapes, ClassificationCache, Span, SpanKind};
pub use julia::config::{load_defaults, JlindentConfig, Loader};
pub use julia::defun::{
    definitions, find_defun_end, find_defun_start, Definition, DefinitionForm,
};
pub use julia::document::Document;
pub use julia::error::IndentError;
pub use julia::indentation::{
    compute_indent, line_context, reindent, reindent_lines, Indenter, LineContext,
};
pub use julia::scanning::{tokens, Category, Lexeme, Token, Tokens};
pub use julia::tracking::{Arm, BlockKind, Bracket, Frame, FrameKind, Tracker};
