//! Token type

use super::lexeme::{is_continuation_operator, Category, Lexeme};
use serde::Serialize;
use std::ops::Range;

/// A lexeme located in the source, with its structural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
    pub lexeme: Lexeme,
    pub category: Category,
}

impl<'a> Token<'a> {
    pub fn new(lexeme: Lexeme, start: usize, end: usize, text: &'a str) -> Self {
        Self {
            start,
            end,
            text,
            lexeme,
            category: lexeme.category(),
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is(&self, lexeme: Lexeme) -> bool {
        self.lexeme == lexeme
    }

    /// A trailing operator that carries the expression onto the next line.
    pub fn continues_line(&self) -> bool {
        self.category == Category::Operator && is_continuation_operator(self.text)
    }
}
