//! Lexer errors.

use std::fmt;

use pop_ir::Span;

/// What went wrong while scanning a tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    /// An opening tag reached end of input before `>` or `/>`.
    UnterminatedTag,
    /// A quoted attribute value was never closed.
    UnterminatedAttribute,
    /// Something other than `name="value"`, `>` or `/>` inside a tag.
    MalformedAttribute,
    /// `<pop:` or `</pop:` not followed by a name.
    EmptyTagName,
    /// `</pop:name` not followed by `>`.
    UnterminatedCloseTag,
}

/// A lexing failure with the span of the offending tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    /// From the start of the tag to where scanning stopped.
    pub span: Span,
}

impl LexError {
    pub(crate) fn new(kind: LexErrorKind, start: usize, end: usize) -> Self {
        LexError {
            kind,
            span: Span::from_offsets(start, end),
        }
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LexErrorKind::UnterminatedTag => "tag is missing its closing `>` or `/>`",
            LexErrorKind::UnterminatedAttribute => "attribute value is missing its closing quote",
            LexErrorKind::MalformedAttribute => "expected `name=\"value\"`, `>` or `/>` inside tag",
            LexErrorKind::EmptyTagName => "tag has no name",
            LexErrorKind::UnterminatedCloseTag => "closing tag is missing its `>`",
        })
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for LexError {}
