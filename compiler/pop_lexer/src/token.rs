//! Tokens produced by the lexer.
//!
//! Tokens borrow from the template source; the parser copies what it keeps.

use pop_ir::Span;

/// A lexed token with its source span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind<'src> {
    /// A run of literal text containing no tag markers.
    Text(&'src str),
    /// A complete `<!-- ... -->` comment, passed through untouched.
    Comment(&'src str),
    /// `<pop:name attr="v" ...>` or `<pop:name ... />`.
    TagOpen(OpenTag<'src>),
    /// `</pop:name>`.
    TagClose { name: &'src str },
}

/// The pieces of an opening tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenTag<'src> {
    /// Raw name after `pop:`, e.g. `ext:title` or `content.title`.
    pub name: &'src str,
    pub attributes: Vec<RawAttribute<'src>>,
    pub self_closing: bool,
}

/// An attribute exactly as written, quotes stripped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawAttribute<'src> {
    pub name: &'src str,
    pub value: &'src str,
    /// Span of `value` (inside the quotes).
    pub value_span: Span,
}

impl TokenKind<'_> {
    /// Short human-readable description, used in trace output.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Text(_) => "text",
            TokenKind::Comment(_) => "comment",
            TokenKind::TagOpen(open) if open.self_closing => "self-closing tag",
            TokenKind::TagOpen(_) => "opening tag",
            TokenKind::TagClose { .. } => "closing tag",
        }
    }
}
