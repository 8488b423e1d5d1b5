//! String and data literals.
//!
//! Both are closed by `"` and implicitly closed, with a diagnostic, by a
//! raw line break or end of input.

use idl_ir::{Orphan, Orphanage, Token, TokenKind};

use crate::cursor::Cursor;
use crate::lex_error::LexErrorKind;
use crate::productions::Productions;

impl<O: Orphanage> Productions<'_, O> {
    pub(crate) fn string_literal(&mut self, cursor: &mut Cursor<'_>) -> Option<Orphan<Token>> {
        let start = cursor.pos();
        if !cursor.eat(b'"') {
            return None;
        }
        let mut bytes = Vec::new();
        loop {
            match cursor.current() {
                None | Some(b'"' | b'\n') => break,
                Some(b'\\') => {
                    cursor.advance();
                    self.escape(cursor, &mut bytes);
                }
                Some(byte) => {
                    bytes.push(byte);
                    cursor.advance();
                }
            }
        }
        self.expect_or_recover(cursor, b'"', LexErrorKind::UnterminatedString);

        let text = String::from_utf8(bytes).unwrap_or_else(|err| {
            self.staged.stage_recovered(cursor, LexErrorKind::InvalidUtf8);
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        });
        Some(
            self.orphanage
                .new_token(cursor.span_from(start), TokenKind::StringLiteral(text)),
        )
    }

    /// Decode the escape after a `\` into `out`.
    fn escape(&mut self, cursor: &mut Cursor<'_>, out: &mut Vec<u8>) {
        let Some(byte) = cursor.current() else {
            // The unterminated-string diagnostic covers this.
            return;
        };
        let simple = match byte {
            b'a' => Some(0x07),
            b'b' => Some(0x08),
            b'f' => Some(0x0C),
            b'n' => Some(b'\n'),
            b'r' => Some(b'\r'),
            b't' => Some(b'\t'),
            b'v' => Some(0x0B),
            b'\\' | b'\'' | b'"' | b'?' => Some(byte),
            _ => None,
        };
        if let Some(decoded) = simple {
            cursor.advance();
            out.push(decoded);
            return;
        }

        match byte {
            b'x' => {
                cursor.advance();
                let mut value = 0u8;
                let mut digits = 0;
                while digits < 2 {
                    let Some(digit) = cursor.current().and_then(hex_value) else {
                        break;
                    };
                    value = (value << 4) | digit;
                    digits += 1;
                    cursor.advance();
                }
                if digits < 2 {
                    self.staged
                        .stage_recovered(cursor, LexErrorKind::MalformedHexEscape);
                }
                if digits > 0 {
                    out.push(value);
                }
            }
            b'0'..=b'7' => {
                let mut value = 0u32;
                let mut digits = 0;
                while digits < 3 {
                    match cursor.current() {
                        Some(digit @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(digit - b'0');
                            digits += 1;
                            cursor.advance();
                        }
                        _ => break,
                    }
                }
                let decoded = u8::try_from(value).unwrap_or_else(|_| {
                    self.staged
                        .stage_recovered(cursor, LexErrorKind::OctalEscapeOutOfRange);
                    u8::MAX
                });
                out.push(decoded);
            }
            b'\n' => {
                // Leave the line break to close the literal.
                self.staged.stage_recovered(
                    cursor,
                    LexErrorKind::InvalidEscape { escape: '\n' },
                );
            }
            other => {
                cursor.advance();
                self.staged.stage_recovered(
                    cursor,
                    LexErrorKind::InvalidEscape {
                        escape: char::from(other),
                    },
                );
                out.push(other);
            }
        }
    }

    /// `0x"..."`: pairs of hex digits, whitespace allowed between digits.
    pub(crate) fn data_literal(&mut self, cursor: &mut Cursor<'_>) -> Option<Orphan<Token>> {
        let start = cursor.pos();
        let opens = cursor.current() == Some(b'0')
            && matches!(cursor.peek_at(1), Some(b'x' | b'X'))
            && cursor.peek_at(2) == Some(b'"');
        if !opens {
            return None;
        }
        cursor.advance_n(3);

        let mut bytes = Vec::new();
        let mut high: Option<u8> = None;
        loop {
            match cursor.current() {
                None | Some(b'"' | b'\n') => break,
                Some(b' ' | b'\t' | b'\r') => cursor.advance(),
                Some(byte) => {
                    cursor.advance();
                    if let Some(digit) = hex_value(byte) {
                        match high.take() {
                            Some(h) => bytes.push((h << 4) | digit),
                            None => high = Some(digit),
                        }
                    } else {
                        self.staged.stage_recovered(
                            cursor,
                            LexErrorKind::InvalidDataCharacter {
                                found: char::from(byte),
                            },
                        );
                    }
                }
            }
        }
        if high.is_some() {
            self.staged.stage_recovered(cursor, LexErrorKind::OddHexDigits);
        }
        self.expect_or_recover(cursor, b'"', LexErrorKind::UnterminatedData);
        Some(
            self.orphanage
                .new_token(cursor.span_from(start), TokenKind::DataLiteral(bytes)),
        )
    }
}

#[allow(clippy::cast_possible_truncation, reason = "hex digits are < 16")]
fn hex_value(byte: u8) -> Option<u8> {
    char::from(byte).to_digit(16).map(|d| d as u8)
}
