use crate::parser::{parse_source, render_snippet, Diagnostic, ParseError, ParseErrorKind};

#[test]
fn snippet_points_at_offending_token() {
    let source = "f(x) = { x = 1: 2, 3, 4 }";
    let err = parse_source(source).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::ElseNotLast);

    let snippet = render_snippet(&err, source);
    assert!(snippet.starts_with("error: the else clause must be the last item"));
    assert!(snippet.contains(" --> line 1, col 21"));
    assert!(snippet.contains("1 | f(x) = { x = 1: 2, 3, 4 }"));
    assert!(snippet.contains(&format!("  | {}^", " ".repeat(20))));
    assert!(snippet.contains("help:"));
}

#[test]
fn snippet_on_second_line() {
    let source = "let a = 1\ng(x) = { y < x }";
    let err = parse_source(source).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::SetBuilderMissingPipe);

    let snippet = render_snippet(&err, source);
    assert!(snippet.contains(" --> line 2, col 10"));
    assert!(snippet.contains("2 | g(x) = { y < x }"));
}

#[test]
fn multi_character_tokens_are_underlined() {
    let source = "eval 1 <= 2";
    let err = parse_source(source).unwrap_err();
    let snippet = render_snippet(&err, source);
    assert!(snippet.contains("~~"));
}

#[test]
fn snippet_without_location() {
    let err = ParseError::new(ParseErrorKind::UnexpectedEof, None);
    assert_eq!(render_snippet(&err, ""), "error: unexpected end of input\n");
}

#[test]
fn diagnostic_carries_help() {
    let err = ParseError::new(ParseErrorKind::TrailingComma, None);
    let diag = Diagnostic::from(&err);
    assert_eq!(diag.help.as_deref(), Some("Remove the ',' before '}'"));
}
