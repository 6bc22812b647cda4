//! Indentation scenarios
//!
//! Each case is an unindented (or badly indented) snippet and the text the engine must turn
//! it into. The expected outputs are fixed points: reindenting them changes nothing.

use julia_indent::julia::testing::{assert_indent, assert_text_eq};
use julia_indent::{compute_indent, line_context, reindent, reindent_lines};
use rstest::rstest;

#[rstest]
#[case::if_block("if foo\nbar\nend", "if foo\n    bar\nend")]
#[case::hanging_alignment("foobar(bar,\nbaz)", "foobar(bar,\n       baz)")]
#[case::index_end_in_condition(
    "if a == a[end-4:end]\nr = 1\nend",
    "if a == a[end-4:end]\n    r = 1\nend"
)]
#[case::continuation_chain("f(x) =\nx*\nx", "f(x) =\n    x*\n    x")]
#[case::anonymous_module_body(
    "module\nbegin\na = 1\nend\nend",
    "module\nbegin\n    a = 1\nend\nend"
)]
#[case::hanging_bracket("x = foo(\na,\nb\n)", "x = foo(\n    a,\n    b\n)")]
#[case::try_arms(
    "try\nf()\ncatch e\ng(e)\nfinally\nh()\nend",
    "try\n    f()\ncatch e\n    g(e)\nfinally\n    h()\nend"
)]
#[case::comment_keywords_are_inert("# if x =\ny = 1", "# if x =\ny = 1")]
#[case::excess_closers("end\n)\nx", "end\n)\nx")]
#[case::string_after_paren("println(\"hello\",\nworld)", "println(\"hello\",\n        world)")]
#[case::string_after_square("xs = [\"a\"\n\"b\"]", "xs = [\"a\"\n      \"b\"]")]
#[case::char_after_paren("f('a', x,\ny)", "f('a', x,\n  y)")]
#[case::command_after_paren("run(`ls`,\ndir)", "run(`ls`,\n    dir)")]
#[case::block_as_argument(
    "function f()\npush!(xs, if c\ny\nelse\nz\nend)\nw = 1\nend",
    "function f()\n    push!(xs, if c\n        y\n    else\n        z\n    end)\n    w = 1\nend"
)]
#[case::else_after_unclosed_call("if x\nfoo(a,\nelse\nz\nend", "if x\n    foo(a,\nelse\n    z\nend")]
fn test_reindent_unit_four(#[case] input: &str, #[case] expected: &str) {
    assert_text_eq(expected, &reindent(input, 4));
    assert_indent(expected, 4).is_fixed_point();
}

#[rstest]
#[case(1, "function f()\n if x\n  y\n else\n  z\n end\nend")]
#[case(2, "function f()\n  if x\n    y\n  else\n    z\n  end\nend")]
#[case(3, "function f()\n   if x\n      y\n   else\n      z\n   end\nend")]
fn test_unit_scales_nesting(#[case] unit: usize, #[case] expected: &str) {
    let flat = "function f()\nif x\ny\nelse\nz\nend\nend";
    assert_indent(flat, unit).reindents_to(expected);
}

#[test]
fn test_single_line_queries() {
    let text = "while true\n    xs = [a,\n          b]\nend";
    assert_eq!(compute_indent(text, 0, 4), 0);
    assert_eq!(compute_indent(text, 1, 4), 4);
    assert_eq!(compute_indent(text, 2, 4), 10);
    assert_eq!(compute_indent(text, 3, 4), 0);
    assert_eq!(compute_indent(text, 42, 4), 0);

    let argument = "function f()\n    push!(xs, if c\n        y\n    else\n        z\n    end)\n    w = 1\nend";
    assert_eq!(compute_indent(argument, 6, 4), 4);

    let context = line_context(text, 2, 4);
    assert_eq!(context.column, 10);
    assert_eq!(context.indent_depth, 2);
    assert!(!context.verbatim);
}

#[test]
fn test_reindent_lines_leaves_the_rest() {
    let text = "if a\nb\nc\nend";
    assert_text_eq("if a\n    b\nc\nend", &reindent_lines(text, 1..2, 4));
}

#[test]
fn test_string_interiors_survive_reindent() {
    let text = "x = \"\"\"\n  if\n      end\n\"\"\"\nif y\nz\nend";
    assert_indent(text, 4)
        .line(1, 2)
        .line(2, 6)
        .reindents_to("x = \"\"\"\n  if\n      end\n\"\"\"\nif y\n    z\nend")
        .is_idempotent();
}
