//! Statements and statement sequences.
//!
//! A statement is a header of tokens ended by `;`, or followed by a
//! `{ ... }` block of child statements. Every iteration of a statement
//! sequence is a recovery point: a statement that fails to lex is skipped
//! up to the next boundary and its diagnostic is forwarded.

use idl_ir::{BodyKind, Orphan, Orphanage, Statement};
use idl_stack::ensure_sufficient_stack;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::lex_error::LexErrorKind;
use crate::productions::Productions;

pub type StatementBuf = SmallVec<[Orphan<Statement>; 8]>;

/// Where a statement sequence sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nesting {
    /// The whole input. A `}` here is unmatched.
    TopLevel,
    /// Inside `{ ... }`. A `}` ends the sequence.
    Block,
}

enum Body {
    Line,
    Block(StatementBuf),
}

impl<O: Orphanage> Productions<'_, O> {
    /// One statement, after skipping leading whitespace and comments.
    /// `doc_comment` is attached to it on success.
    pub fn statement(
        &mut self,
        cursor: &mut Cursor<'_>,
        doc_comment: Option<String>,
    ) -> Option<Orphan<Statement>> {
        self.empty_space(cursor);
        let start = cursor.pos();
        let header = self.token_run(cursor);

        if header.is_empty() && cursor.current() == Some(b';') {
            self.staged
                .stage_failure(cursor, LexErrorKind::ExpectedStatement);
            return None;
        }
        let body = self.if_error(cursor, LexErrorKind::ExpectedStatementEnd, |s, c| {
            s.statement_end(c)
        })?;

        let kind = match body {
            Body::Line => BodyKind::Line,
            Body::Block(_) => BodyKind::Block,
        };
        let mut statement = self.orphanage.new_statement(cursor.span_from(start), kind);
        statement.get_mut().doc_comment = doc_comment;
        for token in header {
            statement.adopt(token);
        }
        if let Body::Block(children) = body {
            for child in children {
                statement.adopt(child);
            }
        }
        Some(statement)
    }

    /// `;` or a block.
    fn statement_end(&mut self, cursor: &mut Cursor<'_>) -> Option<Body> {
        if cursor.eat(b';') {
            return Some(Body::Line);
        }
        if !cursor.eat(b'{') {
            return None;
        }
        trace!(start = cursor.pos() - 1, "block");
        // The header is committed once `{` is eaten; forward its report
        // before the children stage their own.
        self.staged.clear_staged();
        self.drain();
        let children = ensure_sufficient_stack(|| {
            let children = self.statement_sequence(cursor, Nesting::Block);
            self.empty_space(cursor);
            self.expect_or_recover(cursor, b'}', LexErrorKind::UnterminatedBlock);
            children
        });
        Some(Body::Block(children))
    }

    /// Statements until end of input, or until `}` inside a block.
    pub fn statement_sequence(&mut self, cursor: &mut Cursor<'_>, nesting: Nesting) -> StatementBuf {
        let mut statements = StatementBuf::new();
        loop {
            let done = self.no_error(|s| {
                let doc_comment = s.doc_space(cursor);
                match cursor.current() {
                    None => true,
                    Some(b'}') if nesting == Nesting::Block => true,
                    Some(b'}') => {
                        s.staged
                            .recover_with(cursor, LexErrorKind::UnmatchedCloseBrace);
                        cursor.advance();
                        false
                    }
                    Some(_) => {
                        let mut attempt = cursor.fork();
                        if let Some(statement) = s.statement(&mut attempt, doc_comment) {
                            *cursor = attempt;
                            // Leftovers from alternatives that lost.
                            s.staged.clear_staged();
                            statements.push(statement);
                        } else {
                            s.staged
                                .recover_with(&attempt, LexErrorKind::ExpectedStatement);
                            s.skip_statement(cursor, nesting);
                        }
                        false
                    }
                }
            });
            self.drain();
            if done {
                break;
            }
        }
        statements
    }

    /// Skip past the statement starting at `cursor`: through the next `;`
    /// at depth zero, or a whole `{ ... }`. Stops before a `}` that closes
    /// the enclosing block.
    fn skip_statement(&mut self, cursor: &mut Cursor<'_>, nesting: Nesting) {
        let start = cursor.pos();
        self.with_scratch_slot(|s| {
            let mut depth = 0u32;
            loop {
                s.empty_space(cursor);
                match cursor.current() {
                    None => break,
                    Some(b';') if depth == 0 => {
                        cursor.advance();
                        break;
                    }
                    Some(b'{') => {
                        cursor.advance();
                        depth += 1;
                    }
                    Some(b'}') if depth == 0 => break,
                    Some(b'}') => {
                        cursor.advance();
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    Some(_) => {
                        if s.token(cursor).is_none() {
                            cursor.skip_char();
                        }
                    }
                }
            }
        });
        debug_assert!(cursor.pos() > start, "recovery made no progress");
        debug!(start, end = cursor.pos(), "skipped malformed statement");
        trace!(?nesting, "resuming statement sequence");
    }
}
