//! Line and column lookup for diagnostic spans.
//!
//! Offsets are byte offsets into the lexed input; columns count bytes,
//! since the input is not required to be UTF-8 outside literals.

use idl_ir::{ByteOffset, Span};

/// Pre-computed line start table for O(log L) line/column lookup.
///
/// ```
/// use idl_diagnostic::span_utils::LineOffsetTable;
///
/// let table = LineOffsetTable::build(b"line1\nline2\nline3");
/// assert_eq!(table.offset_to_line_col(0), (1, 1));
/// assert_eq!(table.offset_to_line_col(6), (2, 1));
/// assert_eq!(table.offset_to_line_col(14), (3, 3));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<ByteOffset>,
}

impl LineOffsetTable {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "lexed inputs are bounded by u32::MAX bytes"
    )]
    pub fn build(source: &[u8]) -> Self {
        let mut offsets = vec![0];
        offsets.extend(
            source
                .iter()
                .enumerate()
                .filter(|(_, &byte)| byte == b'\n')
                .map(|(i, _)| (i + 1) as ByteOffset),
        );
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "line count is bounded by the u32 input length"
    )]
    pub fn line_from_offset(&self, offset: ByteOffset) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        (line_idx as u32) + 1
    }

    /// 1-based `(line, column)` of `offset`.
    pub fn offset_to_line_col(&self, offset: ByteOffset) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0);
        (line, offset - line_start + 1)
    }

    /// `(line, column)` of a span's start.
    pub fn span_start(&self, span: Span) -> (u32, u32) {
        self.offset_to_line_col(span.start)
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

#[cfg(test)]
mod tests;
