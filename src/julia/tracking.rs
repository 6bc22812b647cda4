//! Block/Paren Tracker
//!
//!     Keeps the stack of open blocks and brackets while tokens are fed to it in order, and
//!     knows, for every open frame, the column its contents line up at (the anchor) and the
//!     column its closer and mid keywords return to (the base).
//!
//! Frames
//!
//!     Block frames are opened by block keywords. Their base is the indentation of the
//!     opener's line and their anchor one unit deeper, except for `module` and
//!     `baremodule`, whose anchor is the enclosing anchor: a module body is not indented.
//!
//!     Bracket frames take the column of the first code or literal after the bracket as
//!     anchor when there is one on the same line, and one unit past the line's indentation
//!     when only whitespace or a comment follows the bracket.
//!
//! Keywords That Are Not Structure
//!
//!     Inside brackets a few keywords mean something else:
//!
//!         - `end` in `[...]` is the last index and never closes anything.
//!         - `end` in `(...)` or `{...}` is the last index when it looks like one: next to an
//!           operator or a number, or the only thing between the brackets. Otherwise (and
//!           always when it stands alone on its line) it closes the innermost block, and
//!           the brackets left open inside that block are discarded with it.
//!         - `begin` is the first index in `[...]`, and in `(...)` or `{...}` under the same
//!           conditions as `end`.
//!         - `for` and `if` in a bracket are generator clauses when they follow a value (a
//!           name, number, literal or closing bracket), and open blocks otherwise.
//!
//!     Mid keywords, like `end`, belong to the innermost block even when brackets are still
//!     open inside it; those brackets are dropped. Closers with nothing to close are
//!     ignored, so excess `end`s and brackets can never push the stack below empty.

mod frame;
mod tracker;

pub use frame::{Arm, BlockKind, Bracket, Frame, FrameKind};
pub use tracker::{Effect, Neighbours, Placement, Tracker, Transition};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julia::document::Document;

    /// Replay every line of `text` at its current indentation.
    fn replay(text: &str) -> Tracker {
        let doc = Document::new(text);
        let mut tracker = Tracker::new(4);
        for line in 0..doc.line_count() {
            tracker.feed_line(&doc, line, doc.facts(line).indent);
        }
        tracker
    }

    fn kinds(tracker: &Tracker) -> Vec<FrameKind> {
        tracker.frames().iter().map(|frame| frame.kind).collect()
    }

    #[test]
    fn test_blocks_nest_and_close() {
        let tracker = replay("function f(x)\n    if x\n        for i in x\n");
        assert_eq!(
            kinds(&tracker),
            vec![
                FrameKind::Block(BlockKind::Function),
                FrameKind::Block(BlockKind::If),
                FrameKind::Block(BlockKind::For),
            ]
        );
        assert_eq!(tracker.anchor(), 12);

        let closed = replay("function f(x)\n    if x\n    end\nend\n");
        assert_eq!(closed.depth(), 0);
    }

    #[test]
    fn test_index_end_closes_nothing() {
        assert_eq!(
            kinds(&replay("if a == a[end-4:end]\n")),
            vec![FrameKind::Block(BlockKind::If)]
        );
        assert_eq!(
            kinds(&replay("if arr[1: end - 1] > 0\n")),
            vec![FrameKind::Block(BlockKind::If)]
        );
        assert_eq!(
            kinds(&replay("while x[(end - 1)] > 0 && f(end)\n")),
            vec![FrameKind::Block(BlockKind::While)]
        );
        assert_eq!(replay("x = a[begin:end]\n").depth(), 0);
        assert_eq!(replay("x = a[(begin + 1):(end - 1)]\n").depth(), 0);
    }

    #[test]
    fn test_bare_end_recovers_from_unclosed_bracket() {
        let open = replay("begin\n    if x\n        foo(a,\n");
        assert!(open.innermost().map_or(false, Frame::is_paren));
        assert_eq!(
            open.innermost_block().and_then(Frame::block),
            Some(BlockKind::If)
        );

        let tracker = replay("begin\n    if x\n        foo(a,\n    end\n");
        assert_eq!(kinds(&tracker), vec![FrameKind::Block(BlockKind::Begin)]);
    }

    #[test]
    fn test_module_keeps_enclosing_anchor() {
        let tracker = replay("module M\nbegin\n");
        assert_eq!(tracker.frames()[0].anchor, 0);
        assert_eq!(tracker.frames()[1].anchor, 4);
    }

    #[test]
    fn test_bracket_anchors() {
        let aligned = replay("foobar(bar,\n");
        assert_eq!(aligned.anchor(), 7);

        let hanging = replay("  x = foo(\n");
        assert_eq!(hanging.anchor(), 6);
        assert_eq!(hanging.innermost().map(|frame| frame.base), Some(2));
    }

    #[test]
    fn test_generator_clauses_open_nothing() {
        let tracker = replay("total = sum(f(x) for x in xs if x > 0\n");
        assert_eq!(kinds(&tracker), vec![FrameKind::Paren(Bracket::Round)]);

        let block_in_bracket = replay("v = [if a\n");
        assert_eq!(
            kinds(&block_in_bracket),
            vec![
                FrameKind::Paren(Bracket::Square),
                FrameKind::Block(BlockKind::If)
            ]
        );
    }

    #[test]
    fn test_block_arguments_are_not_clauses() {
        let tracker = replay("function f()\n    push!(xs, if c\n");
        assert_eq!(
            kinds(&tracker),
            vec![
                FrameKind::Block(BlockKind::Function),
                FrameKind::Paren(Bracket::Round),
                FrameKind::Block(BlockKind::If),
            ]
        );

        let after_string = replay("x = (\"a\" for i in 1:3\n");
        assert_eq!(kinds(&after_string), vec![FrameKind::Paren(Bracket::Round)]);
    }

    #[test]
    fn test_mid_keyword_drops_unclosed_brackets() {
        let tracker = replay("if x\n    foo(a,\nelse\n");
        assert_eq!(kinds(&tracker), vec![FrameKind::Block(BlockKind::If)]);
        assert_eq!(tracker.innermost().map(|frame| frame.arm), Some(Arm::Else));
    }

    #[test]
    fn test_mid_keywords_set_arm() {
        let tracker = replay("try\n    f()\ncatch err\n");
        assert_eq!(tracker.innermost().map(|frame| frame.arm), Some(Arm::Catch));
    }

    #[test]
    fn test_excess_closers_are_ignored() {
        let tracker = replay("end\n)\n]\nend\nif x\n");
        assert_eq!(kinds(&tracker), vec![FrameKind::Block(BlockKind::If)]);
    }

    #[test]
    fn test_abstract_type_is_a_block() {
        assert_eq!(replay("abstract type Shape end\n").depth(), 0);
        assert_eq!(
            kinds(&replay("primitive type Byte 8\n")),
            vec![FrameKind::Block(BlockKind::PrimitiveType)]
        );
    }

    #[test]
    fn test_closing_column() {
        let text = "if a\n    foo(x,\n        y)\nelse\n";
        let doc = Document::new(text);
        let mut tracker = Tracker::new(4);
        tracker.feed_line(&doc, 0, 0);
        tracker.feed_line(&doc, 1, 4);

        // `)` of line 2 returns to the base of `foo(`.
        let close = doc.line_tokens(2).end - 1;
        assert_eq!(
            tracker.closing_column(&doc.tokens[close], &doc.neighbours(close)),
            Some(4)
        );
        tracker.feed_line(&doc, 2, 8);

        let first = doc.line_tokens(3).start;
        assert_eq!(
            tracker.closing_column(&doc.tokens[first], &doc.neighbours(first)),
            Some(0)
        );
    }

    #[test]
    fn test_advance_reports_transitions() {
        let doc = Document::new("(x end)");
        let mut tracker = Tracker::new(4);
        let transitions: Vec<Transition> = doc
            .line_tokens(0)
            .map(|index| {
                tracker.advance(
                    &doc.tokens[index],
                    doc.neighbours(index),
                    doc.placement(index, 0),
                )
            })
            .collect();
        assert_eq!(transitions[0], Transition::Pushed);
        assert_eq!(transitions[1], Transition::Item);
        // With no block open, `end` inside brackets is plain content.
        assert_eq!(transitions[2], Transition::Item);
        assert!(matches!(transitions[3], Transition::Popped { discarded: 0, .. }));
    }
}
