//! Pop Lexer - tokenizer for pop templates.
//!
//! Splits template text into four token kinds:
//!
//! - `Text` - everything that is not a tag marker, verbatim
//! - `Comment` - a whole `<!-- ... -->`, so tags inside comments stay text
//! - `TagOpen` - `<pop:name attr="value" ...>` or the self-closing form
//! - `TagClose` - `</pop:name>`
//!
//! Any other `<` (ordinary HTML) is text. Attribute values are returned
//! raw; the parser decides whether they need compiling.
//!
//! Attribute values may embed tags whose own attributes are quoted:
//! `default='<pop:greet name="x"/>'`. Embedded tags are skipped as a unit
//! while looking for the closing quote.

mod cursor;
mod lex_error;
mod token;

pub use cursor::Cursor;
pub use lex_error::{LexError, LexErrorKind};
pub use token::{OpenTag, RawAttribute, Token, TokenKind};

use pop_ir::Span;
use tracing::trace;

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";
const OPEN_MARKER: &str = "<pop:";
const CLOSE_MARKER: &str = "</pop:";

/// Bytes allowed in a tag name: identifiers plus `:` (namespace), `.`
/// (path) and `-`.
#[inline]
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b':')
}

#[inline]
fn is_attribute_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b':')
}

/// Streaming tokenizer over a window of template source.
///
/// Spans are absolute offsets into the full source, also when lexing a
/// sub-range (an attribute value), so errors always point into the text the
/// caller handed to the compiler.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    failed: bool,
}

impl<'src> Lexer<'src> {
    /// Lex the whole of `source`.
    pub fn new(source: &'src str) -> Self {
        Self::with_range(source, 0..source.len())
    }

    /// Lex only `source[range]`.
    pub fn with_range(source: &'src str, range: std::ops::Range<usize>) -> Self {
        Lexer {
            cursor: Cursor::new(source, range.start, range.end),
            failed: false,
        }
    }

    fn at_marker(&self) -> bool {
        self.cursor.starts_with(OPEN_MARKER)
            || self.cursor.starts_with(CLOSE_MARKER)
            || self.cursor.starts_with(COMMENT_OPEN)
    }

    fn lex_text(&mut self) -> Token<'src> {
        let start = self.cursor.pos();
        // The first byte may be a `<` that starts no marker; it is text.
        self.cursor.advance();
        loop {
            match self.cursor.find_byte(b'<') {
                Some(at) => {
                    self.cursor.seek(at);
                    if self.at_marker() {
                        break;
                    }
                    self.cursor.advance();
                }
                None => {
                    self.cursor.seek(self.cursor.end());
                    break;
                }
            }
        }
        let end = self.cursor.pos();
        Token {
            kind: TokenKind::Text(self.cursor.slice(start, end)),
            span: Span::from_offsets(start, end),
        }
    }

    fn lex_comment(&mut self) -> Token<'src> {
        let start = self.cursor.pos();
        self.cursor.advance_n(COMMENT_OPEN.len());
        match self.cursor.find(COMMENT_CLOSE) {
            Some(at) => self.cursor.seek(at + COMMENT_CLOSE.len()),
            // An unterminated comment is just text up to end of input.
            None => self.cursor.seek(self.cursor.end()),
        }
        let end = self.cursor.pos();
        Token {
            kind: TokenKind::Comment(self.cursor.slice(start, end)),
            span: Span::from_offsets(start, end),
        }
    }

    fn lex_name(&mut self, tag_start: usize) -> Result<&'src str, LexError> {
        let name_start = self.cursor.pos();
        self.cursor.eat_while(is_name_byte);
        let name_end = self.cursor.pos();
        if name_start == name_end {
            return Err(LexError::new(LexErrorKind::EmptyTagName, tag_start, name_end));
        }
        Ok(self.cursor.slice(name_start, name_end))
    }

    fn lex_close(&mut self) -> Result<Token<'src>, LexError> {
        let start = self.cursor.pos();
        self.cursor.advance_n(CLOSE_MARKER.len());
        let name = self.lex_name(start)?;
        self.cursor.eat_whitespace();
        if self.cursor.current() != b'>' {
            return Err(LexError::new(
                LexErrorKind::UnterminatedCloseTag,
                start,
                self.cursor.pos(),
            ));
        }
        self.cursor.advance();
        Ok(Token {
            kind: TokenKind::TagClose { name },
            span: Span::from_offsets(start, self.cursor.pos()),
        })
    }

    fn lex_open(&mut self) -> Result<Token<'src>, LexError> {
        let start = self.cursor.pos();
        self.cursor.advance_n(OPEN_MARKER.len());
        let name = self.lex_name(start)?;
        let mut attributes = Vec::new();

        let self_closing = loop {
            self.cursor.eat_whitespace();
            if self.cursor.is_eof() {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedTag,
                    start,
                    self.cursor.pos(),
                ));
            }
            if self.cursor.starts_with("/>") {
                self.cursor.advance_n(2);
                break true;
            }
            if self.cursor.current() == b'>' {
                self.cursor.advance();
                break false;
            }
            attributes.push(self.lex_attribute(start)?);
        };

        Ok(Token {
            kind: TokenKind::TagOpen(OpenTag {
                name,
                attributes,
                self_closing,
            }),
            span: Span::from_offsets(start, self.cursor.pos()),
        })
    }

    fn lex_attribute(&mut self, tag_start: usize) -> Result<RawAttribute<'src>, LexError> {
        let malformed = |cursor: &Cursor<'_>| {
            LexError::new(LexErrorKind::MalformedAttribute, tag_start, cursor.pos())
        };

        let first = self.cursor.current();
        if !(first.is_ascii_alphabetic() || first == b'_') {
            return Err(malformed(&self.cursor));
        }
        let name_start = self.cursor.pos();
        self.cursor.eat_while(is_attribute_name_byte);
        let name = self.cursor.slice(name_start, self.cursor.pos());

        self.cursor.eat_whitespace();
        if self.cursor.current() != b'=' {
            return Err(malformed(&self.cursor));
        }
        self.cursor.advance();
        self.cursor.eat_whitespace();

        let quote = self.cursor.current();
        if quote != b'"' && quote != b'\'' {
            return Err(malformed(&self.cursor));
        }
        self.cursor.advance();
        let value_start = self.cursor.pos();
        self.skip_quoted(quote)
            .ok_or_else(|| {
                LexError::new(
                    LexErrorKind::UnterminatedAttribute,
                    tag_start,
                    self.cursor.pos(),
                )
            })?;
        let value_end = self.cursor.pos();
        // Closing quote.
        self.cursor.advance();

        Ok(RawAttribute {
            name,
            value: self.cursor.slice(value_start, value_end),
            value_span: Span::from_offsets(value_start, value_end),
        })
    }

    /// Advance to the closing `quote`, stepping over embedded tags.
    ///
    /// Leaves the cursor on the quote. Returns `None` at end of input.
    fn skip_quoted(&mut self, quote: u8) -> Option<()> {
        loop {
            if self.cursor.is_eof() {
                return None;
            }
            if self.cursor.current() == quote {
                return Some(());
            }
            if self.cursor.starts_with(OPEN_MARKER) || self.cursor.starts_with(CLOSE_MARKER) {
                self.skip_embedded_tag()?;
            } else {
                self.cursor.advance();
            }
        }
    }

    /// Step over one embedded `<pop:...>` / `</pop:...>` up to its `>`,
    /// honouring quoted attribute values inside it.
    fn skip_embedded_tag(&mut self) -> Option<()> {
        // Past the `<`; the name and attributes follow.
        self.cursor.advance();
        loop {
            match self.cursor.current() {
                _ if self.cursor.is_eof() => return None,
                b'>' => {
                    self.cursor.advance();
                    return Some(());
                }
                q @ (b'"' | b'\'') => {
                    self.cursor.advance();
                    self.skip_quoted(q)?;
                    self.cursor.advance();
                }
                _ => self.cursor.advance(),
            }
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor.is_eof() {
            return None;
        }
        let result = if self.cursor.starts_with(COMMENT_OPEN) {
            Ok(self.lex_comment())
        } else if self.cursor.starts_with(CLOSE_MARKER) {
            self.lex_close()
        } else if self.cursor.starts_with(OPEN_MARKER) {
            self.lex_open()
        } else {
            Ok(self.lex_text())
        };
        match &result {
            Ok(token) => trace!(kind = token.kind.describe(), span = %token.span, "token"),
            Err(err) => {
                trace!(error = %err, "lex error");
                self.failed = true;
            }
        }
        Some(result)
    }
}
