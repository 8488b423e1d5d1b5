//! Whitespace, comments, and doc comment capture.
//!
//! Comments are `#` to end of line, or `/* ... */` (non-nesting). A run of
//! comments that each start their own line, with no blank line between
//! them or after the last one, is the doc comment of whatever statement
//! follows. A comment trailing code on the same line is never a doc.

use idl_ir::Orphanage;
use memchr::{memchr, memmem};

use crate::cursor::Cursor;
use crate::lex_error::LexErrorKind;
use crate::productions::Productions;

/// Whitespace recognized between tokens: space, tab, CR, LF, VT, FF.
#[inline]
pub(crate) const fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C)
}

impl<O: Orphanage> Productions<'_, O> {
    /// Skip whitespace and comments. Always succeeds.
    pub fn empty_space(&mut self, cursor: &mut Cursor<'_>) {
        self.trivia(cursor, false);
    }

    /// Skip whitespace and comments, returning the doc comment that sits
    /// directly above the next byte.
    pub(crate) fn doc_space(&mut self, cursor: &mut Cursor<'_>) -> Option<String> {
        let collect = self.grammar.doc_comments;
        self.trivia(cursor, collect)
    }

    fn trivia(&mut self, cursor: &mut Cursor<'_>, collect: bool) -> Option<String> {
        let mut doc: Option<String> = None;
        // Line breaks since the last comment.
        let mut breaks = 0u32;
        loop {
            let own_line = match cursor.current() {
                Some(b'\n') => {
                    cursor.advance();
                    breaks += 1;
                    if breaks > 1 {
                        doc = None;
                    }
                    continue;
                }
                Some(byte) if is_whitespace(byte) => {
                    cursor.advance();
                    continue;
                }
                Some(b'#') | Some(b'/') if is_comment_start(cursor) => cursor.at_line_start(),
                _ => break,
            };
            let text = self.comment(cursor);
            breaks = 0;
            if !collect {
                continue;
            }
            if own_line {
                let lines = doc.get_or_insert_with(String::new);
                lines.push_str(&text);
                lines.push('\n');
            } else {
                doc = None;
            }
        }
        doc
    }

    /// Consume one comment and return its text with the markers removed.
    fn comment(&mut self, cursor: &mut Cursor<'_>) -> String {
        let start = cursor.pos();
        if cursor.eat(b'#') {
            let line = cursor.rest();
            let len = memchr(b'\n', line).unwrap_or(line.len());
            let mut text = &line[..len];
            text = text.strip_prefix(b" ").unwrap_or(text);
            text = text.strip_suffix(b"\r").unwrap_or(text);
            let text = String::from_utf8_lossy(text).into_owned();
            cursor.advance_n(u32::try_from(len).unwrap_or(u32::MAX));
            return text;
        }

        cursor.advance_n(2);
        let body = cursor.rest();
        let len = memmem::find(body, b"*/").unwrap_or(body.len());
        let text = String::from_utf8_lossy(body[..len].trim_ascii()).into_owned();
        cursor.advance_n(u32::try_from(len).unwrap_or(u32::MAX));
        tracing::trace!(start, end = cursor.pos(), "block comment");
        self.if_error_or(
            cursor,
            LexErrorKind::UnterminatedBlockComment,
            || (),
            |_, c| {
                let closed = c.rest().starts_with(b"*/");
                c.advance_n(2);
                closed.then_some(())
            },
        );
        text
    }
}

fn is_comment_start(cursor: &Cursor<'_>) -> bool {
    match cursor.current() {
        Some(b'#') => true,
        Some(b'/') => cursor.peek_at(1) == Some(b'*'),
        _ => false,
    }
}
