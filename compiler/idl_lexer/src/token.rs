//! Token dispatch, identifiers, operators, and grouped lists.

use idl_ir::{ByteOffset, Delimiter, Orphan, Orphanage, Token, TokenKind, TokenSequence};
use idl_stack::ensure_sufficient_stack;
use smallvec::SmallVec;
use tracing::trace;

use crate::cursor::Cursor;
use crate::lex_error::LexErrorKind;
use crate::productions::Productions;
use crate::staging::one_of;

/// Scratch buffer for the tokens of one header or list item.
pub type TokenBuf = SmallVec<[Orphan<Token>; 8]>;

/// Bytes that end a list item: separator, closers, and enclosing terminators.
#[inline]
const fn ends_list_item(byte: u8) -> bool {
    matches!(byte, b',' | b')' | b']' | b';' | b'{' | b'}')
}

impl<O: Orphanage> Productions<'_, O> {
    /// One token, after skipping leading whitespace and comments.
    pub fn token(&mut self, cursor: &mut Cursor<'_>) -> Option<Orphan<Token>> {
        self.empty_space(cursor);
        one_of!(
            self,
            cursor,
            self.identifier(cursor),
            self.numeric_literal(cursor),
            self.string_literal(cursor),
            self.data_literal(cursor),
            self.operator(cursor),
            self.grouped_list(cursor),
        )
    }

    /// Zero or more tokens, stopping before the first byte that starts none.
    pub fn token_sequence(&mut self, cursor: &mut Cursor<'_>) -> Orphan<TokenSequence> {
        let mut sequence = self.orphanage.new_sequence();
        for token in self.token_run(cursor) {
            sequence.adopt(token);
        }
        sequence
    }

    pub(crate) fn token_run(&mut self, cursor: &mut Cursor<'_>) -> TokenBuf {
        let mut tokens = TokenBuf::new();
        while let Some(token) = self.token(cursor) {
            tokens.push(token);
        }
        tokens
    }

    /// Token mode: token runs separated by skipped bytes. Each iteration is
    /// a recovery point.
    pub(crate) fn token_stream(&mut self, cursor: &mut Cursor<'_>) -> Vec<Orphan<Token>> {
        let mut tokens = Vec::new();
        loop {
            let done = self.no_error(|s| {
                tokens.extend(s.token_run(cursor));
                let Some(byte) = cursor.current() else {
                    s.staged.clear_staged();
                    return true;
                };
                s.staged
                    .recover_with(cursor, LexErrorKind::unexpected(byte));
                cursor.skip_char();
                false
            });
            self.drain();
            if done {
                return tokens;
            }
        }
    }

    fn identifier(&mut self, cursor: &mut Cursor<'_>) -> Option<Orphan<Token>> {
        let start = cursor.pos();
        if !matches!(cursor.current()?, b'a'..=b'z' | b'A'..=b'Z' | b'_') {
            return None;
        }
        cursor.eat_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        let kind = TokenKind::Identifier(cursor.text_from(start));
        Some(self.orphanage.new_token(cursor.span_from(start), kind))
    }

    fn operator(&mut self, cursor: &mut Cursor<'_>) -> Option<Orphan<Token>> {
        let start = cursor.pos();
        let len = self.grammar.match_operator(cursor.rest())?;
        cursor.advance_n(len);
        let kind = TokenKind::Operator(cursor.text_from(start));
        Some(self.orphanage.new_token(cursor.span_from(start), kind))
    }

    /// `( ... )` or `[ ... ]` with comma-separated items.
    fn grouped_list(&mut self, cursor: &mut Cursor<'_>) -> Option<Orphan<Token>> {
        let delimiter = Delimiter::from_open(cursor.current()?)?;
        let start = cursor.pos();
        cursor.advance();
        Some(ensure_sufficient_stack(|| {
            self.group_items(cursor, delimiter, start)
        }))
    }

    fn group_items(
        &mut self,
        cursor: &mut Cursor<'_>,
        delimiter: Delimiter,
        start: ByteOffset,
    ) -> Orphan<Token> {
        let open = char::from(delimiter.open());
        let close = char::from(delimiter.close());
        trace!(start, %open, "grouped list");

        let mut items: SmallVec<[Orphan<TokenSequence>; 4]> = SmallVec::new();
        self.empty_space(cursor);
        if !cursor.eat(delimiter.close()) {
            loop {
                let item = self.list_item(cursor);
                if item.get().is_empty() {
                    self.staged
                        .stage_recovered(cursor, LexErrorKind::EmptyListItem { open, close });
                }
                items.push(item);
                if cursor.eat(b',') {
                    continue;
                }
                self.expect_or_recover(
                    cursor,
                    delimiter.close(),
                    LexErrorKind::UnclosedGroup { open, close },
                );
                break;
            }
        }

        let mut group = self.orphanage.new_group(cursor.span_from(start), delimiter);
        for item in items {
            group.adopt(item);
        }
        group.into_token()
    }

    /// Tokens up to the next `,`, closer, or enclosing terminator. Bytes
    /// that start no token are skipped with a diagnostic.
    fn list_item(&mut self, cursor: &mut Cursor<'_>) -> Orphan<TokenSequence> {
        let mut item = self.orphanage.new_sequence();
        loop {
            for token in self.token_run(cursor) {
                item.adopt(token);
            }
            match cursor.current() {
                Some(byte) if !ends_list_item(byte) => {
                    self.staged
                        .recover_with(cursor, LexErrorKind::unexpected(byte));
                    cursor.skip_char();
                }
                _ => return item,
            }
        }
    }
}
