//! Frames of the nesting stack

use crate::julia::scanning::Lexeme;
use serde::Serialize;

/// Which keyword opened a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    If,
    For,
    While,
    Function,
    Struct,
    /// `module` and `baremodule`.
    Module,
    Begin,
    Quote,
    Try,
    Macro,
    Let,
    Do,
    AbstractType,
    PrimitiveType,
}

impl BlockKind {
    pub fn from_lexeme(lexeme: Lexeme) -> Option<Self> {
        let kind = match lexeme {
            Lexeme::If => BlockKind::If,
            Lexeme::For => BlockKind::For,
            Lexeme::While => BlockKind::While,
            Lexeme::Function => BlockKind::Function,
            Lexeme::Struct => BlockKind::Struct,
            Lexeme::Module | Lexeme::Baremodule => BlockKind::Module,
            Lexeme::Begin => BlockKind::Begin,
            Lexeme::Quote => BlockKind::Quote,
            Lexeme::Try => BlockKind::Try,
            Lexeme::Macro => BlockKind::Macro,
            Lexeme::Let => BlockKind::Let,
            Lexeme::Do => BlockKind::Do,
            Lexeme::AbstractType => BlockKind::AbstractType,
            Lexeme::PrimitiveType => BlockKind::PrimitiveType,
            _ => return None,
        };
        Some(kind)
    }

    /// Blocks that hold a definition body.
    pub fn is_definition(self) -> bool {
        matches!(self, BlockKind::Function | BlockKind::Macro)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bracket {
    Round,
    Square,
    Curly,
}

impl Bracket {
    /// The bracket a lexeme opens or closes.
    pub fn from_lexeme(lexeme: Lexeme) -> Option<Self> {
        match lexeme {
            Lexeme::OpenParen | Lexeme::CloseParen => Some(Bracket::Round),
            Lexeme::OpenBracket | Lexeme::CloseBracket => Some(Bracket::Square),
            Lexeme::OpenBrace | Lexeme::CloseBrace => Some(Bracket::Curly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "frame", content = "kind", rename_all = "kebab-case")]
pub enum FrameKind {
    Block(BlockKind),
    Paren(Bracket),
}

/// The part of a block the tracker is in: the body, or the arm of the last mid keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arm {
    #[default]
    Body,
    Else,
    Elseif,
    Catch,
    Finally,
}

impl Arm {
    pub fn from_lexeme(lexeme: Lexeme) -> Option<Self> {
        match lexeme {
            Lexeme::Else => Some(Arm::Else),
            Lexeme::Elseif => Some(Arm::Elseif),
            Lexeme::Catch => Some(Arm::Catch),
            Lexeme::Finally => Some(Arm::Finally),
            _ => None,
        }
    }
}

/// One open construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub kind: FrameKind,
    /// Byte range of the opening token.
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    /// Column that closers and mid keywords return to.
    pub base: usize,
    /// Column of the frame's contents.
    pub anchor: usize,
    pub arm: Arm,
}

impl Frame {
    pub fn is_block(&self) -> bool {
        matches!(self.kind, FrameKind::Block(_))
    }

    pub fn is_paren(&self) -> bool {
        matches!(self.kind, FrameKind::Paren(_))
    }

    pub fn block(&self) -> Option<BlockKind> {
        match self.kind {
            FrameKind::Block(kind) => Some(kind),
            FrameKind::Paren(_) => None,
        }
    }

    pub fn bracket(&self) -> Option<Bracket> {
        match self.kind {
            FrameKind::Paren(bracket) => Some(bracket),
            FrameKind::Block(_) => None,
        }
    }
}
