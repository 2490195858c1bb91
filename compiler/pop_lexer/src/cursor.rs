//! Byte cursor over a bounded window of template source.
//!
//! The cursor walks bytes, not chars. Every marker the lexer looks for
//! (`<`, `>`, quotes, `=`, whitespace) is ASCII, so any position the cursor
//! stops at between markers is a valid UTF-8 boundary.

/// Cursor over `source[..end]`.
///
/// The cursor is [`Copy`], so the lexer can snapshot it to remember where a
/// token started.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    /// Cursor over the byte range `start..end` of `source`.
    pub(crate) fn new(source: &'a str, start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end <= source.len(), "window out of bounds");
        Cursor {
            source,
            pos: start,
            end,
        }
    }

    /// Byte at the current position, `0` at end of window.
    #[inline]
    pub fn current(&self) -> u8 {
        if self.is_eof() {
            0
        } else {
            self.source.as_bytes()[self.pos]
        }
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.end
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn advance(&mut self) {
        if !self.is_eof() {
            self.pos += 1;
        }
    }

    #[inline]
    pub fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.end);
    }

    /// Whether the remaining window starts with `needle`.
    #[inline]
    pub fn starts_with(&self, needle: &str) -> bool {
        self.remaining().starts_with(needle.as_bytes())
    }

    /// Bytes from the current position to the end of the window.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.source.as_bytes()[self.pos..self.end]
    }

    /// Source text between two absolute offsets.
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    /// Advance while `pred` holds.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Skip ASCII whitespace, including newlines (tags may span lines).
    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(|b| b.is_ascii_whitespace());
    }

    /// Absolute offset of the next `byte` at or after the current position.
    #[inline]
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        memchr::memchr(byte, self.remaining()).map(|i| self.pos + i)
    }

    /// Absolute offset of the next occurrence of `needle`.
    #[inline]
    pub fn find(&self, needle: &str) -> Option<usize> {
        memchr::memmem::find(self.remaining(), needle.as_bytes()).map(|i| self.pos + i)
    }

    /// Jump to an absolute offset inside the window.
    #[inline]
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.end);
    }
}
