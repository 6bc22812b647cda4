//! The nesting stack and the rules that move it

use super::frame::{Arm, BlockKind, Bracket, Frame, FrameKind};
use crate::julia::document::Document;
use crate::julia::scanning::{Category, Lexeme, Token};

/// Lexemes directly around a token in the flat token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbours {
    pub prev: Option<Lexeme>,
    pub next: Option<Lexeme>,
    /// The token is the only code on its line.
    pub alone_on_line: bool,
    /// A string, command or char literal sits between the previous token and this one.
    pub after_literal: bool,
}

/// Where a token sits, in the columns of the replay feeding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    pub line: usize,
    pub column: usize,
    /// Indentation of the token's line.
    pub line_indent: usize,
    /// For an opening bracket, column of the first code or literal after it on the same
    /// line.
    pub follower_column: Option<usize>,
}

/// What a token does to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Open(FrameKind),
    /// Switch the innermost block to another arm, dropping brackets left open inside it.
    Arm(Arm),
    /// Pop every frame from this index up.
    Close(usize),
    /// Plain content of the innermost frame.
    Item,
    /// A closer with nothing to close.
    Ignore,
}

/// What [Tracker::advance] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Pushed,
    /// The frame that was closed, and how many unclosed frames above it went with it.
    Popped { frame: Frame, discarded: usize },
    Arm(Arm),
    Item,
    Ignored,
}

/// Stack of open blocks and brackets, innermost last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracker {
    frames: Vec<Frame>,
    unit: usize,
}

impl Tracker {
    pub fn new(indent_unit: usize) -> Self {
        Self {
            frames: Vec::new(),
            unit: indent_unit,
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn innermost(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn innermost_block(&self) -> Option<&Frame> {
        self.frames.iter().rev().find(|frame| frame.is_block())
    }

    /// Column of the innermost frame's contents; 0 at top level.
    pub fn anchor(&self) -> usize {
        self.innermost().map_or(0, |frame| frame.anchor)
    }

    fn innermost_bracket(&self) -> Option<Bracket> {
        self.innermost().and_then(Frame::bracket)
    }

    /// Decide what `token` does, without changing anything.
    pub fn resolve(&self, token: &Token, neighbours: &Neighbours) -> Effect {
        let innermost = self.innermost();
        match token.category {
            Category::KeywordOpen => {
                let Some(kind) = BlockKind::from_lexeme(token.lexeme) else {
                    return Effect::Item;
                };
                match (kind, innermost) {
                    // `a[begin:end]`, `a[(begin + 1):end]`
                    (BlockKind::Begin, _) if self.is_first_index(neighbours) => Effect::Item,
                    // Generator and comprehension clauses: `(f(x) for x in xs if p(x))`
                    (BlockKind::For | BlockKind::If, Some(frame))
                        if frame.is_paren() && ends_value(neighbours) =>
                    {
                        Effect::Item
                    }
                    _ => Effect::Open(FrameKind::Block(kind)),
                }
            }
            Category::KeywordMid => {
                match (Arm::from_lexeme(token.lexeme), self.innermost_block()) {
                    (Some(arm), Some(_)) => Effect::Arm(arm),
                    _ => Effect::Item,
                }
            }
            Category::KeywordClose => self.resolve_end(neighbours),
            Category::BracketOpen => match Bracket::from_lexeme(token.lexeme) {
                Some(bracket) => Effect::Open(FrameKind::Paren(bracket)),
                None => Effect::Item,
            },
            Category::BracketClose => self.resolve_close_bracket(token.lexeme),
            Category::Operator | Category::Terminator | Category::Other => Effect::Item,
        }
    }

    fn resolve_end(&self, neighbours: &Neighbours) -> Effect {
        let Some(block) = self.frames.iter().rposition(Frame::is_block) else {
            return match self.innermost_bracket() {
                Some(_) => Effect::Item,
                None => Effect::Ignore,
            };
        };
        match self.innermost_bracket() {
            None => Effect::Close(block),
            Some(Bracket::Square) => Effect::Item,
            Some(_) if !neighbours.alone_on_line && is_index_end(neighbours) => Effect::Item,
            // An unclosed bracket inside a block that `end` terminates.
            Some(_) => Effect::Close(block),
        }
    }

    fn is_first_index(&self, neighbours: &Neighbours) -> bool {
        match self.innermost_bracket() {
            Some(Bracket::Square) => true,
            Some(_) => !neighbours.alone_on_line && is_index_end(neighbours),
            None => false,
        }
    }

    fn resolve_close_bracket(&self, lexeme: Lexeme) -> Effect {
        match self.innermost() {
            None => Effect::Ignore,
            Some(frame) if frame.is_paren() => Effect::Close(self.frames.len() - 1),
            Some(_) => {
                let bracket = Bracket::from_lexeme(lexeme);
                self.frames
                    .iter()
                    .rposition(|frame| frame.is_paren() && frame.bracket() == bracket)
                    .map_or(Effect::Ignore, Effect::Close)
            }
        }
    }

    /// Column a line starting with `token` returns to, when the token is a closer or a mid
    /// keyword of an open frame.
    pub fn closing_column(&self, token: &Token, neighbours: &Neighbours) -> Option<usize> {
        match self.resolve(token, neighbours) {
            Effect::Close(index) => Some(self.frames[index].base),
            Effect::Arm(_) => self.innermost_block().map(|frame| frame.base),
            Effect::Open(_) | Effect::Item | Effect::Ignore => None,
        }
    }

    /// Apply one token.
    pub fn advance(
        &mut self,
        token: &Token,
        neighbours: Neighbours,
        placement: Placement,
    ) -> Transition {
        let effect = self.resolve(token, &neighbours);

        match effect {
            Effect::Open(kind) => {
                let frame = self.open(kind, token, placement);
                tracing::trace!(?kind, line = placement.line, anchor = frame.anchor, "opened frame");
                self.frames.push(frame);
                Transition::Pushed
            }
            Effect::Arm(arm) => {
                if let Some(block) = self.frames.iter().rposition(Frame::is_block) {
                    let discarded = self.frames.len() - block - 1;
                    if discarded > 0 {
                        tracing::debug!(
                            line = placement.line,
                            discarded,
                            "mid keyword skipped over unclosed brackets"
                        );
                    }
                    self.frames.truncate(block + 1);
                    self.frames[block].arm = arm;
                }
                Transition::Arm(arm)
            }
            Effect::Close(index) => {
                let discarded = self.frames.len() - index - 1;
                let frame = self.frames[index];
                self.frames.truncate(index);
                if discarded > 0 {
                    tracing::debug!(
                        line = placement.line,
                        discarded,
                        "closer skipped over unclosed frames"
                    );
                }
                Transition::Popped { frame, discarded }
            }
            Effect::Item => Transition::Item,
            Effect::Ignore => {
                tracing::debug!(line = placement.line, token = token.text, "unmatched closer");
                Transition::Ignored
            }
        }
    }

    fn open(&self, kind: FrameKind, token: &Token, placement: Placement) -> Frame {
        let base = placement.line_indent;
        let anchor = match kind {
            // Module bodies stay at the level of the module itself.
            FrameKind::Block(BlockKind::Module) => self.anchor(),
            FrameKind::Block(_) => base + self.unit,
            FrameKind::Paren(_) => placement
                .follower_column
                .unwrap_or(base + self.unit),
        };
        Frame {
            kind,
            start: token.start,
            end: token.end,
            line: placement.line,
            column: placement.column,
            base,
            anchor,
            arm: Arm::Body,
        }
    }

    /// Feed every token of `line`, placing the line at `indent`.
    pub fn feed_line(&mut self, document: &Document, line: usize, indent: usize) {
        for index in document.line_tokens(line) {
            let token = document.tokens[index];
            self.advance(
                &token,
                document.neighbours(index),
                document.placement(index, indent),
            );
        }
    }
}

/// The previous token ends a value, so a following `for` or `if` continues the expression.
fn ends_value(neighbours: &Neighbours) -> bool {
    neighbours.after_literal
        || matches!(
            neighbours.prev,
            Some(
                Lexeme::Identifier
                    | Lexeme::Number
                    | Lexeme::CloseParen
                    | Lexeme::CloseBracket
                    | Lexeme::CloseBrace
                    | Lexeme::Transpose
            )
        )
}

/// `end` or `begin` used as an index: `x[(end - 1)]`, `f(a, end+1)`, `(end)`.
fn is_index_end(neighbours: &Neighbours) -> bool {
    let index_like = |lexeme: Option<Lexeme>| {
        matches!(lexeme, Some(Lexeme::Operator) | Some(Lexeme::Number))
    };
    let sole_content = neighbours.prev.map_or(false, Lexeme::is_open_bracket)
        && neighbours.next.map_or(false, Lexeme::is_close_bracket);
    index_like(neighbours.prev) || index_like(neighbours.next) || sole_content
}
