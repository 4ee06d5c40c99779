//! Line classification for `.pcs` documents.
//!
//! The format is line oriented, so the lexer hands out one [`Line`] per
//! source line rather than character tokens. Classification only looks at the
//! shape of a line; the declaration builder and the clause parser do the
//! actual validation.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::ast::{DeclSyntax, Line, LineKind, ParamKind};

const LINE_END: &str = r"\s*(?:#.*)?$";

static CURRENT_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s\[{|]+\s+(?P<kind>real|integer|categorical|ordinal)\s*[\[{]").unwrap()
});

static LEGACY_NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^[^\s\[{{|]+\s*\[[^\]]*,[^\]]*\]\s*\[[^\]]*\]\s*(?P<suffix>il|li|l|i)?{LINE_END}"
    ))
    .unwrap()
});

static LEGACY_CATEGORICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^[^\s\[{{|]+\s*\{{[^}}]+\}}\s*\[[^\]]+\]{LINE_END}")).unwrap()
});

static CONDITIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s|{}#]+\s*\|[^|].*(?:==|!=|<|>|\sin\s)").unwrap()
});

static FORBIDDEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^\{{.+\}}{LINE_END}")).unwrap());

/// Classifies a single line.
///
/// ```
/// use pcs_lang::ast::{DeclSyntax, LineKind, ParamKind};
/// use pcs_lang::lexer::classify;
///
/// assert_eq!(
///     classify("DEPTH integer [1, 64] [8]"),
///     LineKind::Parameter(ParamKind::Integer, DeclSyntax::Current)
/// );
/// assert_eq!(classify("{A=1, B=2}"), LineKind::Forbidden);
/// ```
pub fn classify(text: &str) -> LineKind {
    let text = text.trim();

    if text.is_empty() {
        return LineKind::Blank;
    }
    if text.starts_with('#') {
        return LineKind::Comment;
    }
    if text.starts_with('{') {
        return if FORBIDDEN.is_match(text) {
            LineKind::Forbidden
        } else {
            LineKind::Unrecognized
        };
    }
    if let Some(caps) = CURRENT_DECLARATION.captures(text)
        && let Some(kind) = ParamKind::from_keyword(&caps["kind"])
    {
        return LineKind::Parameter(kind, DeclSyntax::Current);
    }
    if let Some(caps) = LEGACY_NUMERIC.captures(text) {
        let kind = match caps.name("suffix").map(|m| m.as_str()) {
            Some("i" | "il" | "li") => ParamKind::Integer,
            _ => ParamKind::Real,
        };
        return LineKind::Parameter(kind, DeclSyntax::Legacy);
    }
    if LEGACY_CATEGORICAL.is_match(text) {
        return LineKind::Parameter(ParamKind::Categorical, DeclSyntax::Legacy);
    }
    if CONDITIONAL.is_match(text) {
        return LineKind::Conditional;
    }

    LineKind::Unrecognized
}

/// Splits `text` at the first `#`, returning the code part and the comment
/// text (without the `#`).
pub fn split_comment(text: &str) -> (&str, Option<&str>) {
    match text.split_once('#') {
        Some((code, comment)) => (code.trim_end(), Some(comment)),
        None => (text, None),
    }
}

/// Produces classified lines from a whole document.
pub struct Lexer<'a> {
    lines: std::str::Lines<'a>,
    number: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            lines: input.lines(),
            number: 0,
        }
    }

    pub fn next_line(&mut self) -> Option<Line> {
        let raw = self.lines.next()?;
        self.number += 1;

        let text = raw.trim().to_string();
        let kind = classify(&text);
        trace!(line = self.number, ?kind, "classified line");

        Some(Line {
            number: self.number,
            text,
            kind,
        })
    }
}

impl Iterator for Lexer<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        self.next_line()
    }
}
