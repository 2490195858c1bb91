//! Source location spans.
//!
//! Compact 8-byte byte-range into the template source, used by compile
//! errors to point at the offending fragment.

use std::fmt;

/// Byte range into template source.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from the start of the template
/// - end: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create a span from `usize` offsets, saturating at `u32::MAX`.
    ///
    /// Templates larger than 4 GiB are not a supported input; saturation
    /// keeps error reporting total instead of panicking.
    #[inline]
    pub fn from_offsets(start: usize, end: usize) -> Self {
        let clamp = |v: usize| u32::try_from(v).unwrap_or(u32::MAX);
        Span {
            start: clamp(start),
            end: clamp(end),
        }
    }

    /// The byte range as `usize` bounds, for slicing the source.
    #[inline]
    pub fn range(self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
