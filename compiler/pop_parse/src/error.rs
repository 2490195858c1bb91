//! Compile error types.

use std::fmt;

use pop_ir::Span;
use pop_lexer::{LexError, LexErrorKind};

/// Longest fragment of source quoted in an error message.
const MAX_FRAGMENT_CHARS: usize = 60;

/// Stable codes for every compile error.
///
/// Format: E1### (the compile phase); lexing and tree-building failures
/// share the range since both surface from `compile()`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Tag without closing `>` or `/>`
    E1001,
    /// Malformed or unterminated attribute
    E1002,
    /// Opening tag never closed
    E1003,
    /// Closing tag does not match the innermost open tag
    E1004,
    /// Closing tag with no open tag
    E1005,
    /// Empty or invalid tag name
    E1006,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A template that cannot be compiled.
///
/// Carries the offending source fragment so the message is useful without
/// the template at hand.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("[{code}] {message} on line {line}: `{fragment}`")]
pub struct CompileError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    /// 1-based line of `span.start`.
    pub line: u32,
    pub fragment: String,
}

impl CompileError {
    pub(crate) fn new(code: ErrorCode, message: impl Into<String>, span: Span, source: &str) -> Self {
        CompileError {
            code,
            message: message.into(),
            span,
            line: line_of(source, span.start as usize),
            fragment: fragment_of(source, span),
        }
    }

    pub(crate) fn from_lex(err: LexError, source: &str) -> Self {
        let code = match err.kind {
            LexErrorKind::UnterminatedTag | LexErrorKind::UnterminatedCloseTag => ErrorCode::E1001,
            LexErrorKind::UnterminatedAttribute | LexErrorKind::MalformedAttribute => {
                ErrorCode::E1002
            }
            LexErrorKind::EmptyTagName => ErrorCode::E1006,
        };
        CompileError::new(code, err.kind.to_string(), err.span, source)
    }
}

fn line_of(source: &str, offset: usize) -> u32 {
    let offset = offset.min(source.len());
    let newlines = source.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count();
    u32::try_from(newlines).map_or(u32::MAX, |n| n.saturating_add(1))
}

fn fragment_of(source: &str, span: Span) -> String {
    let range = span.range();
    let text = source.get(range).unwrap_or_default();
    let mut fragment: String = text.chars().take(MAX_FRAGMENT_CHARS).collect();
    if text.chars().nth(MAX_FRAGMENT_CHARS).is_some() {
        fragment.push_str("...");
    }
    fragment
}
