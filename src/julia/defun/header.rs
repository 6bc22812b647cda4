//! Assignment-form headers
//!
//! Matches `name(args) = ...` at a given token, with everything that may sit between the
//! name and the `=`:
//!
//!     @inline Base.show{T}(io, x::T)::Nothing where {T<:Real} = ...
//!
//! The match is purely on tokens; the arguments are only checked for balanced brackets.

use crate::julia::scanning::{Lexeme, Token};
use std::ops::Range;

/// Byte range of the defined name, when the tokens from `start` on are a definition header.
pub(crate) fn assignment_header(tokens: &[Token], start: usize) -> Option<Range<usize>> {
    let mut i = start;
    while tokens.get(i)?.is(Lexeme::MacroCall) {
        i += 1;
    }

    let name_start = tokens.get(i)?.start;
    let mut i = dotted_name(tokens, i)?;
    let name = name_start..tokens[i - 1].end;

    if adjacent(tokens, i, Lexeme::OpenBrace) {
        i = skip_balanced(tokens, i)?;
    }
    if !adjacent(tokens, i, Lexeme::OpenParen) {
        return None;
    }
    i = skip_balanced(tokens, i)?;

    if is_operator(tokens, i, "::") {
        i = type_expr(tokens, i + 1)?;
    }
    while is_word(tokens, i, "where") {
        i = where_clause(tokens, i + 1)?;
    }

    is_definition_assign(tokens.get(i)?).then_some(name)
}

/// `=` of a definition: a lone `=`, or `=` glued to a prefix operator of the right side.
fn is_definition_assign(token: &Token) -> bool {
    token.is(Lexeme::Operator)
        && token.text.starts_with('=')
        && !token.text.starts_with("==")
        && !token.text.starts_with("=>")
}

/// `a.b.c`; returns the index past the last identifier.
fn dotted_name(tokens: &[Token], mut i: usize) -> Option<usize> {
    if !tokens.get(i)?.is(Lexeme::Identifier) {
        return None;
    }
    i += 1;
    while is_operator(tokens, i, ".")
        && tokens.get(i + 1).map_or(false, |t| t.is(Lexeme::Identifier))
    {
        i += 2;
    }
    Some(i)
}

/// A type after `::` or `<:`: a dotted name with optional parameters.
fn type_expr(tokens: &[Token], i: usize) -> Option<usize> {
    let i = dotted_name(tokens, i)?;
    if adjacent(tokens, i, Lexeme::OpenBrace) {
        return skip_balanced(tokens, i);
    }
    Some(i)
}

/// `{T, S<:U}` or `T` or `T<:U`, after `where`.
fn where_clause(tokens: &[Token], i: usize) -> Option<usize> {
    if tokens.get(i)?.is(Lexeme::OpenBrace) {
        return skip_balanced(tokens, i);
    }
    let i = dotted_name(tokens, i)?;
    if is_operator(tokens, i, "<:") {
        return type_expr(tokens, i + 1);
    }
    Some(i)
}

/// Index past the bracket matching the one at `i`.
fn skip_balanced(tokens: &[Token], i: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, token) in tokens[i..].iter().enumerate() {
        if token.lexeme.is_open_bracket() {
            depth += 1;
        } else if token.lexeme.is_close_bracket() {
            depth -= 1;
            if depth == 0 {
                return Some(i + offset + 1);
            }
        }
    }
    None
}

fn adjacent(tokens: &[Token], i: usize, lexeme: Lexeme) -> bool {
    match (i.checked_sub(1).and_then(|p| tokens.get(p)), tokens.get(i)) {
        (Some(prev), Some(token)) => token.is(lexeme) && token.start == prev.end,
        _ => false,
    }
}

fn is_operator(tokens: &[Token], i: usize, text: &str) -> bool {
    tokens
        .get(i)
        .map_or(false, |t| t.is(Lexeme::Operator) && t.text == text)
}

fn is_word(tokens: &[Token], i: usize, text: &str) -> bool {
    tokens
        .get(i)
        .map_or(false, |t| t.is(Lexeme::Identifier) && t.text == text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julia::classifying::classify;
    use crate::julia::scanning::tokens;

    fn header(text: &str) -> Option<String> {
        let spans = classify(text);
        let scanned: Vec<Token> = tokens(text, &spans).collect();
        assignment_header(&scanned, 0).map(|name| text[name].to_string())
    }

    #[test]
    fn test_plain_assignment_forms() {
        assert_eq!(header("f(x) = x"), Some("f".into()));
        assert_eq!(header("f(x)=x"), Some("f".into()));
        assert_eq!(header("Base.show(io, x) = print(io, x)"), Some("Base.show".into()));
        assert_eq!(header("g(a, (b, c)) = a"), Some("g".into()));
    }

    #[test]
    fn test_annotated_forms() {
        assert_eq!(header("f(x)::Int = 1"), Some("f".into()));
        assert_eq!(header("f(x::T) where T = x"), Some("f".into()));
        assert_eq!(
            header("f(x::T)::Vector{T} where {T<:Real} = [x]"),
            Some("f".into())
        );
        assert_eq!(header("f(x) where T<:Number where S = x"), Some("f".into()));
        assert_eq!(header("@inline @inbounds f(x) = x"), Some("f".into()));
        assert_eq!(header("Point{T}(x) = x"), Some("Point".into()));
    }

    #[test]
    fn test_non_definitions() {
        assert_eq!(header("x = 1"), None);
        assert_eq!(header("f(x) == 1"), None);
        assert_eq!(header("f (x) = 1"), None);
        assert_eq!(header("d(x) => 1"), None);
        assert_eq!(header("f(x)"), None);
        assert_eq!(header("f(x"), None);
        assert_eq!(header("a[i] = 1"), None);
    }
}
