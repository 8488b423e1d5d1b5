//! Integer and float literals.
//!
//! Integers are decimal, hex (`0x1F`), or octal (`017`). A float needs a
//! fraction, an exponent, or both: `1.5`, `2e10`, `3.0e-2`. `1.` is the
//! integer `1` followed by the operator `.`.

use idl_ir::{ByteOffset, Orphan, Orphanage, Token, TokenKind};
use tracing::trace;

use crate::cursor::Cursor;
use crate::lex_error::LexErrorKind;
use crate::productions::Productions;

impl<O: Orphanage> Productions<'_, O> {
    pub(crate) fn numeric_literal(&mut self, cursor: &mut Cursor<'_>) -> Option<Orphan<Token>> {
        let start = cursor.pos();
        if !cursor.current()?.is_ascii_digit() {
            return None;
        }
        if cursor.current() == Some(b'0') && matches!(cursor.peek_at(1), Some(b'x' | b'X')) {
            if cursor.peek_at(2) == Some(b'"') {
                // Data literal.
                return None;
            }
            return self.if_error(cursor, LexErrorKind::EmptyHexLiteral, |s, c| {
                s.hex_literal(c, start)
            });
        }

        cursor.eat_while(|b| b.is_ascii_digit());
        let has_fraction =
            cursor.current() == Some(b'.') && cursor.peek_at(1).is_some_and(|b| b.is_ascii_digit());
        if has_fraction {
            cursor.advance();
            cursor.eat_while(|b| b.is_ascii_digit());
        }
        if has_fraction || matches!(cursor.current(), Some(b'e' | b'E')) {
            return Some(self.float_literal(cursor, start));
        }
        Some(self.integer_literal(cursor, start))
    }

    /// `0x` followed by at least one hex digit.
    fn hex_literal(&mut self, cursor: &mut Cursor<'_>, start: ByteOffset) -> Option<Orphan<Token>> {
        cursor.advance_n(2);
        let digits_start = cursor.pos();
        if cursor.eat_while(|b| b.is_ascii_hexdigit()) == 0 {
            return None;
        }
        let digits = cursor.slice(cursor.span_from(digits_start));
        let value = self.digits_value(cursor, digits, 16);
        let span = cursor.span_from(start);
        let text = cursor.text_from(start);
        Some(self.orphanage.new_token(span, TokenKind::IntegerLiteral { value, text }))
    }

    fn integer_literal(&mut self, cursor: &mut Cursor<'_>, start: ByteOffset) -> Orphan<Token> {
        let span = cursor.span_from(start);
        let digits = cursor.slice(span);
        let value = match digits {
            [b'0', octal @ ..] if !octal.is_empty() => {
                if let Some(&bad) = octal.iter().find(|&&b| b >= b'8') {
                    self.staged.stage_recovered(
                        cursor,
                        LexErrorKind::InvalidOctalDigit {
                            digit: char::from(bad),
                        },
                    );
                    self.digits_value(cursor, digits, 10)
                } else {
                    self.digits_value(cursor, octal, 8)
                }
            }
            _ => self.digits_value(cursor, digits, 10),
        };
        let text = cursor.text_from(start);
        self.orphanage.new_token(span, TokenKind::IntegerLiteral { value, text })
    }

    /// Value of ASCII `digits` in `radix`. Saturates to `u64::MAX` with a
    /// diagnostic on overflow.
    fn digits_value(&mut self, cursor: &Cursor<'_>, digits: &[u8], radix: u32) -> u64 {
        let value = digits.iter().try_fold(0u64, |acc, &b| {
            let digit = u64::from(char::from(b).to_digit(radix).unwrap_or(0));
            acc.checked_mul(u64::from(radix))?.checked_add(digit)
        });
        value.unwrap_or_else(|| {
            self.staged.stage_recovered(cursor, LexErrorKind::IntegerOverflow);
            u64::MAX
        })
    }

    /// Mantissa is already consumed; handles the optional exponent.
    fn float_literal(&mut self, cursor: &mut Cursor<'_>, start: ByteOffset) -> Orphan<Token> {
        let mantissa_end = cursor.pos();
        let mut value_end = mantissa_end;
        if matches!(cursor.current(), Some(b'e' | b'E')) {
            cursor.advance();
            if matches!(cursor.current(), Some(b'+' | b'-')) {
                cursor.advance();
            }
            let has_digits = self.if_error_or(
                cursor,
                LexErrorKind::MalformedExponent,
                || false,
                |_, c| (c.eat_while(|b| b.is_ascii_digit()) > 0).then_some(true),
            );
            if has_digits {
                value_end = cursor.pos();
            }
        }

        let span = cursor.span_from(start);
        let value_text = cursor.slice(idl_ir::Span::new(start, value_end));
        let value = std::str::from_utf8(value_text)
            .ok()
            .and_then(|text| text.parse::<f64>().ok())
            .unwrap_or_default();
        let text = cursor.text_from(start);
        trace!(%text, value, "float literal");
        self.orphanage.new_token(span, TokenKind::FloatLiteral { value, text })
    }
}

#[cfg(test)]
mod tests;
