//! Token Scanner
//!
//!     Produces the structurally meaningful tokens of a classified text: keywords, brackets,
//!     operators, terminators and plain words. Only code spans are lexed, by running the
//!     logos lexer over each one in turn, so the sequence is lazy and every token lies
//!     entirely inside one code span.
//!
//! Context the lexer cannot see
//!
//!     Two refinements need a look behind the current lexeme, and the stream applies them
//!     as tokens are produced:
//!
//!         - A keyword directly after `:` is a quoted symbol (`:end`) or the right side of a
//!           range (`1:end`); it becomes a plain identifier.
//!         - `type` after `abstract` or `primitive` opens a block like the other type
//!           definitions.

mod lexeme;
mod token;

pub use lexeme::{is_continuation_operator, Category, Lexeme};
pub use token::Token;

use crate::julia::classifying::Span;
use logos::Logos;

/// Lazy token stream over the code spans of a text.
///
/// Restart it by building a new one, either from the beginning with [tokens] or from
/// any offset with [Tokens::starting_at].
pub struct Tokens<'t, 's> {
    text: &'t str,
    spans: &'s [Span],
    next_span: usize,
    floor: usize,
    current: Option<(logos::Lexer<'t, Lexeme>, usize)>,
    previous: Option<Token<'t>>,
}

/// Tokens of every code span of `text`, in order.
pub fn tokens<'t, 's>(text: &'t str, spans: &'s [Span]) -> Tokens<'t, 's> {
    Tokens::starting_at(text, spans, 0)
}

impl<'t, 's> Tokens<'t, 's> {
    /// Tokens from `offset` on. An offset in the middle of a word starts lexing there.
    pub fn starting_at(text: &'t str, spans: &'s [Span], offset: usize) -> Self {
        let next_span = spans.partition_point(|span| span.end <= offset);
        Self {
            text,
            spans,
            next_span,
            floor: offset,
            current: None,
            previous: None,
        }
    }

    fn refine(&self, lexeme: Lexeme, start: usize, end: usize) -> Token<'t> {
        let text = self.text;
        let word = &text[start..end];

        if lexeme.is_keyword() && text[..start].ends_with(':') {
            return Token::new(Lexeme::Identifier, start, end, word);
        }

        if lexeme == Lexeme::Identifier && word == "type" {
            if let Some(prev) = self.previous.filter(|prev| prev.is(Lexeme::Identifier)) {
                let gap = &text[prev.end..start];
                let same_line = !gap.is_empty() && gap.bytes().all(|b| b == b' ' || b == b'\t');
                match (prev.text, same_line) {
                    ("abstract", true) => {
                        return Token::new(Lexeme::AbstractType, start, end, word)
                    }
                    ("primitive", true) => {
                        return Token::new(Lexeme::PrimitiveType, start, end, word)
                    }
                    _ => {}
                }
            }
        }

        Token::new(lexeme, start, end, word)
    }

    fn open_next_span(&mut self) -> bool {
        let text = self.text;
        while let Some(span) = self.spans.get(self.next_span).copied() {
            self.next_span += 1;
            if !span.kind.is_code() {
                continue;
            }
            let start = span.start.max(self.floor);
            if let Some(slice) = text.get(start..span.end) {
                self.current = Some((Lexeme::lexer(slice), start));
                return true;
            }
        }
        false
    }
}

impl<'t, 's> Iterator for Tokens<'t, 's> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Token<'t>> {
        loop {
            if let Some((lexer, base)) = self.current.as_mut() {
                let base = *base;
                match lexer.next() {
                    Some(Ok(lexeme)) => {
                        let range = lexer.span();
                        let token = self.refine(lexeme, base + range.start, base + range.end);
                        self.previous = Some(token);
                        return Some(token);
                    }
                    // Stray characters (a lone `@`, a backslash-escaped quote) carry no
                    // structure.
                    Some(Err(())) => continue,
                    None => self.current = None,
                }
            }
            if !self.open_next_span() {
                return None;
            }
        }
    }
}
