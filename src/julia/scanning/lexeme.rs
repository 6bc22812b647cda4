//! Lexeme definitions for Julia code
//!
//! This module defines every lexeme the scanner can produce from a code span.
//! The lexemes are defined using the logos derive macro; keywords are plain tokens, which
//! logos prefers over the identifier regex for equal-length matches, so `end` is a keyword
//! while `endswith` stays an identifier.
use logos::Logos;
use serde::Serialize;

/// All lexemes recognized inside code spans
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[logos(skip r"[ \t\r\n\f]+")]
#[serde(rename_all = "kebab-case")]
pub enum Lexeme {
    // Block openers
    #[token("if")]
    If,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("function")]
    Function,
    #[token("struct")]
    Struct,
    #[token("module")]
    Module,
    #[token("baremodule")]
    Baremodule,
    #[token("begin")]
    Begin,
    #[token("quote")]
    Quote,
    #[token("try")]
    Try,
    #[token("macro")]
    Macro,
    #[token("let")]
    Let,
    #[token("do")]
    Do,
    // `abstract type` and `primitive type`: produced by the token stream, which rewrites
    // the `type` of such a word pair.
    AbstractType,
    PrimitiveType,

    // Mid keywords
    #[token("else")]
    Else,
    #[token("elseif")]
    Elseif,
    #[token("catch")]
    Catch,
    #[token("finally")]
    Finally,

    #[token("end")]
    End,

    // Brackets
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,

    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,

    // A `'` that reaches the lexer is always postfix transpose; char literals are
    // classified out of code spans before lexing.
    #[token("'")]
    Transpose,

    #[regex(r"@[_a-zA-Z\x{80}-\x{10FFFF}][_a-zA-Z0-9!\x{80}-\x{10FFFF}]*")]
    #[token("@.")]
    MacroCall,

    #[regex(r"[_a-zA-Z\x{80}-\x{10FFFF}][_a-zA-Z0-9!\x{80}-\x{10FFFF}]*")]
    Identifier,

    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eEf][+\-]?[0-9]+)?")]
    #[regex(r"0x[0-9a-fA-F_]+")]
    #[regex(r"0b[01_]+")]
    #[regex(r"0o[0-7_]+")]
    Number,

    // Runs of operator characters, e.g. `=`, `|>`, `.+=`, `::`, `<:`, `...`
    #[regex(r"[=+\-*/\\^%<>!&|~?:$.]+")]
    Operator,
}

/// Structural role of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    KeywordOpen,
    KeywordMid,
    KeywordClose,
    BracketOpen,
    BracketClose,
    Operator,
    Terminator,
    Other,
}

impl Lexeme {
    /// Lexical category, before any context is applied.
    pub fn category(self) -> Category {
        use Lexeme::*;
        match self {
            If | For | While | Function | Struct | Module | Baremodule | Begin | Quote | Try
            | Macro | Let | Do | AbstractType | PrimitiveType => Category::KeywordOpen,
            Else | Elseif | Catch | Finally => Category::KeywordMid,
            End => Category::KeywordClose,
            OpenParen | OpenBracket | OpenBrace => Category::BracketOpen,
            CloseParen | CloseBracket | CloseBrace => Category::BracketClose,
            Operator => Category::Operator,
            Semicolon => Category::Terminator,
            Comma | Transpose | MacroCall | Identifier | Number => Category::Other,
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self.category(),
            Category::KeywordOpen | Category::KeywordMid | Category::KeywordClose
        )
    }

    pub fn is_open_bracket(self) -> bool {
        matches!(
            self,
            Lexeme::OpenParen | Lexeme::OpenBracket | Lexeme::OpenBrace
        )
    }

    pub fn is_close_bracket(self) -> bool {
        matches!(
            self,
            Lexeme::CloseParen | Lexeme::CloseBracket | Lexeme::CloseBrace
        )
    }
}

/// Whether an operator left dangling at the end of a line continues the expression
/// onto the next line.
///
/// Everything is a continuation except postfix and prefix-only forms: splat `...`, field
/// access `.`, negation `!`, interpolation `$` and bare type annotation `::`.
pub fn is_continuation_operator(text: &str) -> bool {
    !matches!(text, "..." | "." | "!" | "$" | "::")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<(Lexeme, &str)> {
        let mut lexer = Lexeme::lexer(source);
        let mut out = Vec::new();
        while let Some(result) = lexer.next() {
            if let Ok(lexeme) = result {
                out.push((lexeme, lexer.slice()));
            }
        }
        out
    }

    #[test]
    fn test_keywords_need_whole_words() {
        assert_eq!(
            lex("end endswith ends_at"),
            vec![
                (Lexeme::End, "end"),
                (Lexeme::Identifier, "endswith"),
                (Lexeme::Identifier, "ends_at"),
            ]
        );
        assert_eq!(lex("iffy"), vec![(Lexeme::Identifier, "iffy")]);
    }

    #[test]
    fn test_index_expression() {
        assert_eq!(
            lex("a[end-4:end]"),
            vec![
                (Lexeme::Identifier, "a"),
                (Lexeme::OpenBracket, "["),
                (Lexeme::End, "end"),
                (Lexeme::Operator, "-"),
                (Lexeme::Number, "4"),
                (Lexeme::Operator, ":"),
                (Lexeme::End, "end"),
                (Lexeme::CloseBracket, "]"),
            ]
        );
    }

    #[test]
    fn test_operators_and_numbers() {
        assert_eq!(
            lex("x |> f .+ 1.5e-3 :: Int"),
            vec![
                (Lexeme::Identifier, "x"),
                (Lexeme::Operator, "|>"),
                (Lexeme::Identifier, "f"),
                (Lexeme::Operator, ".+"),
                (Lexeme::Number, "1.5e-3"),
                (Lexeme::Operator, "::"),
                (Lexeme::Identifier, "Int"),
            ]
        );
        assert_eq!(lex("0xff_ff")[0], (Lexeme::Number, "0xff_ff"));
    }

    #[test]
    fn test_macros_and_unicode_identifiers() {
        assert_eq!(
            lex("@inbounds α′ push! @."),
            vec![
                (Lexeme::MacroCall, "@inbounds"),
                (Lexeme::Identifier, "α′"),
                (Lexeme::Identifier, "push!"),
                (Lexeme::MacroCall, "@."),
            ]
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(Lexeme::Function.category(), Category::KeywordOpen);
        assert_eq!(Lexeme::Elseif.category(), Category::KeywordMid);
        assert_eq!(Lexeme::End.category(), Category::KeywordClose);
        assert_eq!(Lexeme::OpenBrace.category(), Category::BracketOpen);
        assert_eq!(Lexeme::CloseParen.category(), Category::BracketClose);
        assert_eq!(Lexeme::Semicolon.category(), Category::Terminator);
        assert_eq!(Lexeme::Comma.category(), Category::Other);
    }

    #[test]
    fn test_continuation_operators() {
        for op in ["=", "|>", "+", "*", "&&", "||", "==", "->", "=>", "\\", "+=", "?", ":"] {
            assert!(is_continuation_operator(op), "{op}");
        }
        for op in ["...", ".", "!", "$", "::"] {
            assert!(!is_continuation_operator(op), "{op}");
        }
    }
}
