//! Position-tracked cursor over the lexed bytes.
//!
//! A cursor is `Copy`: forking one for a speculative attempt is a plain
//! copy, and backtracking is assigning the saved copy back. All forks of a
//! session share one farthest-offset cell, so an attempt that fails after
//! reading far into the input still moves the point where the next
//! diagnostic is placed.

use std::cell::Cell;

use idl_ir::{ByteOffset, Span};

/// Cursor over `bytes` with a shared farthest-offset counter.
///
/// # Invariant
///
/// `bytes.len() <= u32::MAX`. The lexer facade rejects larger inputs
/// before creating a cursor.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: ByteOffset,
    farthest: &'a Cell<ByteOffset>,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at offset 0. `farthest` is shared by every fork.
    pub fn new(bytes: &'a [u8], farthest: &'a Cell<ByteOffset>) -> Self {
        debug_assert!(
            u32::try_from(bytes.len()).is_ok(),
            "input exceeds u32::MAX bytes"
        );
        Cursor {
            bytes,
            pos: 0,
            farthest,
        }
    }

    /// A child cursor at the same position, sharing the farthest counter.
    #[inline]
    #[must_use]
    pub fn fork(&self) -> Self {
        *self
    }

    /// Byte at the current position, `None` at end of input.
    #[inline]
    pub fn current(&self) -> Option<u8> {
        self.bytes.get(self.pos as usize).copied()
    }

    /// Byte `n` positions ahead of current.
    #[inline]
    pub fn peek_at(&self, n: u32) -> Option<u8> {
        self.bytes.get((self.pos + n) as usize).copied()
    }

    #[inline]
    pub fn advance(&mut self) {
        self.advance_n(1);
    }

    /// Advance by `n` bytes, clamped to the end of input.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos = (self.pos + n).min(self.len());
        if self.pos > self.farthest.get() {
            self.farthest.set(self.pos);
        }
    }

    /// Consume and return the current byte.
    #[inline]
    pub fn bump(&mut self) -> Option<u8> {
        let byte = self.current()?;
        self.advance();
        Some(byte)
    }

    /// Consume `byte` if it is next.
    #[inline]
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.current() == Some(byte) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume bytes while `pred` holds; returns how many were consumed.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "bounded by the u32 input length"
    )]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> u32 {
        let count = self.rest().iter().take_while(|&&b| pred(b)).count() as u32;
        self.advance_n(count);
        count
    }

    /// Skip one whole UTF-8 character (or one stray byte).
    pub fn skip_char(&mut self) {
        if self.bump().is_some() {
            self.eat_while(|b| (0x80..=0xBF).contains(&b));
        }
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos as usize >= self.bytes.len()
    }

    #[inline]
    pub fn pos(&self) -> ByteOffset {
        self.pos
    }

    /// Farthest offset any fork of this session has reached.
    #[inline]
    pub fn farthest(&self) -> ByteOffset {
        self.farthest.get()
    }

    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "bounded by the u32 input length"
    )]
    pub fn len(&self) -> ByteOffset {
        self.bytes.len() as ByteOffset
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Unconsumed input.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos as usize..]
    }

    pub fn slice(&self, span: Span) -> &'a [u8] {
        &self.bytes[span.to_range()]
    }

    /// Span from `start` to the current position.
    #[inline]
    pub fn span_from(&self, start: ByteOffset) -> Span {
        Span::new(start, self.pos)
    }

    /// Text from `start` to the current position.
    pub fn text_from(&self, start: ByteOffset) -> String {
        String::from_utf8_lossy(self.slice(self.span_from(start))).into_owned()
    }

    /// The byte at the farthest offset, or a point span at end of input.
    pub fn farthest_span(&self) -> Span {
        let at = self.farthest();
        Span::new(at, (at + 1).min(self.len()))
    }

    /// Returns `true` if only spaces and tabs separate the current position
    /// from the previous line break (or the start of input).
    pub fn at_line_start(&self) -> bool {
        self.bytes[..self.pos as usize]
            .iter()
            .rev()
            .take_while(|&&b| b != b'\n')
            .all(|&b| matches!(b, b' ' | b'\t' | b'\r'))
    }
}
