use molt_lexer::Location;

use super::error::{ParseError, ParseErrorKind};

/// A user-facing description of a syntax error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub location: Option<Location>,
    /// Number of characters to underline
    pub width: usize,
    pub help: Option<String>,
}

impl From<&ParseError> for Diagnostic {
    fn from(err: &ParseError) -> Self {
        Self {
            message: err.kind.to_string(),
            location: err.location,
            width: err.width.max(1),
            help: help_for_kind(&err.kind),
        }
    }
}

/// Provide a help message for the common mistakes
fn help_for_kind(kind: &ParseErrorKind) -> Option<String> {
    use ParseErrorKind::*;
    match kind {
        AmbiguousForm => Some(
            "Set-builder sets look like '{ y | y < x }' and piecewise definitions like '{ x = 2: 1, 0 }'"
                .to_string(),
        ),
        UnmatchedBrace => Some("Did you forget a closing '}'?".to_string()),
        UnmatchedParen => Some("Did you forget a closing ')'?".to_string()),
        SetBuilderMissingPipe => Some("Write the bound variable first, e.g. '{ y | y > 0 }'".to_string()),
        SetBuilderNotVariable { .. } => {
            Some("Only a plain name can be bound on the left of '|'".to_string())
        }
        TrailingComma => Some("Remove the ',' before '}'".to_string()),
        ElseNotLast => Some("A value without a condition must be the final branch".to_string()),
        MissingColon => Some("Piecewise branches look like 'condition: value'".to_string()),
        MissingSeparator => {
            Some("Separate piecewise branches with ',' even across lines".to_string())
        }
        ExpectedComparison { .. } => Some("Conditions compare two expressions, e.g. 'x < 3'".to_string()),
        _ => None,
    }
}

/// Render a diagnostic with a source excerpt and an underline, e.g.
///
/// ```text
/// error: the else clause must be the last item
///  --> line 1, col 21
/// 1 | f(x) = { x = 1: 2, 3, 4 }
///   |                     ^
/// ```
pub fn render_snippet(err: &ParseError, source: &str) -> String {
    let diag = Diagnostic::from(err);
    let mut out = format!("error: {}\n", diag.message);

    let Some(location) = diag.location else {
        return out;
    };
    out.push_str(&format!(" --> line {}, col {}\n", location.line, location.column));

    let line_text = source
        .lines()
        .nth(location.line.saturating_sub(1))
        .unwrap_or("");
    let line_label = location.line.to_string();
    let gutter = " ".repeat(line_label.len());
    out.push_str(&format!("{line_label} | {line_text}\n"));

    let pad = " ".repeat(location.column.saturating_sub(1));
    let marks = if diag.width <= 1 {
        "^".to_string()
    } else {
        "~".repeat(diag.width)
    };
    out.push_str(&format!("{gutter} | {pad}{marks}\n"));

    if let Some(help) = diag.help {
        out.push_str(&format!("help: {help}\n"));
    }
    out
}
