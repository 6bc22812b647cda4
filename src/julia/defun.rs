//! Defun Locator
//!
//!     Finds function definitions and the boundaries around a position, for navigation
//!     commands that move to the start or end of the current definition.
//!
//! Definition Forms
//!
//!     Keyword form: `function name(...) ... end`, the anonymous `function(...) ... end`,
//!     and `macro name(...) ... end`. The definition starts at the keyword, or at the start
//!     of the line when only macro calls precede it (`@inline function f`), and ends just
//!     past its `end`.
//!
//!     Assignment form: `name(...) = expr` at the start of a line, with optional `::T`
//!     return annotation, `where` clauses and leading macro calls. It ends at the end of the
//!     first line where every bracket and block opened by the right side is closed and no
//!     continuation operator carries the expression on.
//!
//! Navigation
//!
//!     Backward moves visit the innermost enclosing definition first, then earlier
//!     definitions at the same or a shallower level: siblings of the enclosing ones and top
//!     level definitions. Forward moves visit following definitions at the level of the
//!     position. Running out of candidates stops at the last one found; finding none leaves
//!     the position unchanged.

mod header;

use crate::julia::document::Document;
use crate::julia::scanning::Lexeme;
use crate::julia::tracking::{Effect, FrameKind, Tracker};
use header::assignment_header;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefinitionForm {
    Keyword,
    Assignment,
}

/// One function or macro definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub start: usize,
    pub end: usize,
    pub form: DefinitionForm,
    /// `None` for anonymous functions.
    pub name: Option<String>,
    /// Index of the enclosing definition in the same list.
    pub parent: Option<usize>,
    /// Frames open where the definition starts.
    pub depth: usize,
}

impl Definition {
    /// Whether `position` lies inside the definition. With `prefer_end`, the position just
    /// past its end counts as inside.
    pub fn contains(&self, position: usize, prefer_end: bool) -> bool {
        self.start <= position && (position < self.end || (prefer_end && position == self.end))
    }
}

/// Every definition in `text`, ordered by start.
pub fn definitions(text: &str) -> Vec<Definition> {
    collect(&Document::new(text))
}

/// Start of a definition, `count` definitions away from `position`.
///
/// A positive count moves backward, a negative one forward; zero returns `position`.
pub fn find_defun_start(text: &str, position: usize, count: isize, prefer_end: bool) -> usize {
    if count == 0 {
        return position;
    }
    start_among(&definitions(text), position, count, prefer_end)
}

/// End of the innermost definition containing `position`, or `position` outside of all.
pub fn find_defun_end(text: &str, position: usize) -> usize {
    end_among(&definitions(text), position)
}

pub(crate) fn start_among(
    defs: &[Definition],
    position: usize,
    count: isize,
    prefer_end: bool,
) -> usize {
    if count == 0 {
        return position;
    }
    let enclosing: Vec<usize> = (0..defs.len())
        .filter(|&i| defs[i].contains(position, prefer_end))
        .collect();
    let innermost = enclosing.iter().copied().max_by_key(|&i| defs[i].start);
    let steps = count.unsigned_abs();

    let chosen = if count > 0 {
        let mut candidates: Vec<&Definition> = defs
            .iter()
            .enumerate()
            .filter(|&(i, def)| {
                def.start < position
                    && (enclosing.contains(&i)
                        || def.parent.map_or(true, |p| {
                            enclosing.contains(&p) && Some(p) != innermost
                        }))
            })
            .map(|(_, def)| def)
            .collect();
        candidates.sort_by(|a, b| b.start.cmp(&a.start));
        candidates.get(steps - 1).or(candidates.last()).map(|def| def.start)
    } else {
        let mut candidates: Vec<&Definition> = defs
            .iter()
            .filter(|def| {
                def.start > position && def.parent.map_or(true, |p| enclosing.contains(&p))
            })
            .collect();
        candidates.sort_by_key(|def| def.start);
        candidates.get(steps - 1).or(candidates.last()).map(|def| def.start)
    };
    chosen.unwrap_or(position)
}

pub(crate) fn end_among(defs: &[Definition], position: usize) -> usize {
    defs.iter()
        .filter(|def| def.contains(position, false))
        .max_by_key(|def| def.start)
        .map_or(position, |def| def.end)
}

/// A definition still waiting for its end.
struct Pending {
    index: usize,
    form: DefinitionForm,
    depth: usize,
}

fn collect(document: &Document) -> Vec<Definition> {
    let text = document.text;
    let mut tracker = Tracker::new(1);
    let mut defs: Vec<Definition> = Vec::new();
    let mut pending: Vec<Pending> = Vec::new();

    for line in 0..document.line_count() {
        let facts = document.facts(line);
        let range = document.line_tokens(line);

        let in_bracket = tracker.innermost().map_or(false, |frame| frame.is_paren());
        if facts.leads_with_token && !facts.continued && !in_bracket {
            if let Some(name) = assignment_header(&document.tokens, range.start) {
                defs.push(Definition {
                    start: document.tokens[range.start].start,
                    end: text.len(),
                    form: DefinitionForm::Assignment,
                    name: Some(text[name].to_string()),
                    parent: pending.last().map(|p| p.index),
                    depth: tracker.depth(),
                });
                pending.push(Pending {
                    index: defs.len() - 1,
                    form: DefinitionForm::Assignment,
                    depth: tracker.depth(),
                });
            }
        }

        for index in range.clone() {
            let token = document.tokens[index];
            let neighbours = document.neighbours(index);
            let effect = tracker.resolve(&token, &neighbours);
            let depth_before = tracker.depth();
            tracker.advance(&token, neighbours, document.placement(index, facts.indent));

            if let Effect::Open(FrameKind::Block(kind)) = effect {
                if kind.is_definition() {
                    defs.push(Definition {
                        start: keyword_start(document, range.start, index),
                        end: text.len(),
                        form: DefinitionForm::Keyword,
                        name: keyword_name(document, index),
                        parent: pending.last().map(|p| p.index),
                        depth: depth_before,
                    });
                    pending.push(Pending {
                        index: defs.len() - 1,
                        form: DefinitionForm::Keyword,
                        depth: depth_before,
                    });
                }
            }

            // Closers end keyword definitions with their frame, and cut short assignment
            // definitions whose enclosing block ends.
            while let Some(top) = pending.last() {
                let end = match top.form {
                    DefinitionForm::Keyword if tracker.depth() <= top.depth => token.end,
                    DefinitionForm::Assignment if tracker.depth() < top.depth => token.start,
                    _ => break,
                };
                defs[top.index].end = end;
                pending.pop();
            }
        }

        if facts.significant && !facts.trailing_operator && !facts.ends_open {
            while let Some(top) = pending.last() {
                if top.form != DefinitionForm::Assignment || tracker.depth() > top.depth {
                    break;
                }
                defs[top.index].end = document.lines.line_end(line);
                pending.pop();
            }
        }
    }

    tracing::trace!(definitions = defs.len(), "collected definitions");
    defs
}

/// Keyword offset, or the start of the line when only macro calls precede the keyword.
fn keyword_start(document: &Document, line_first: usize, keyword: usize) -> usize {
    let tokens = &document.tokens;
    let only_macros = tokens[line_first..keyword]
        .iter()
        .all(|token| token.is(Lexeme::MacroCall));
    if only_macros {
        tokens[line_first].start
    } else {
        tokens[keyword].start
    }
}

/// `f`, `Base.show` or an operator name such as `+`; `None` when anonymous.
fn keyword_name(document: &Document, keyword: usize) -> Option<String> {
    let tokens = &document.tokens;
    let first = tokens.get(keyword + 1)?;
    match first.lexeme {
        Lexeme::Identifier => {
            let mut last = keyword + 1;
            while tokens
                .get(last + 1)
                .map_or(false, |t| t.is(Lexeme::Operator) && t.text == ".")
                && tokens
                    .get(last + 2)
                    .map_or(false, |t| t.is(Lexeme::Identifier))
            {
                last += 2;
            }
            Some(document.text[first.start..tokens[last].end].to_string())
        }
        Lexeme::Operator if tokens.get(keyword + 2).map_or(false, |t| t.is(Lexeme::OpenParen)) => {
            Some(first.text.to_string())
        }
        _ => None,
    }
}
