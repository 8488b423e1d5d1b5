//! Statement trees.

use std::mem;

use crate::orphan::{Adopt, Orphan};
use crate::{Span, Token, TokenSequence};

/// A header of tokens terminated by `;` or followed by a `{ ... }` block.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    /// From the first header token (or `{`) through the `;` or `}`.
    pub span: Span,
    /// Header tokens. Empty only when the statement is a bare block.
    pub tokens: TokenSequence,
    /// Comment lines directly above the statement.
    pub doc_comment: Option<String>,
    pub body: StatementBody,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StatementBody {
    /// Terminated by `;`.
    Line,
    /// Child statements between matching braces.
    Block(Vec<Statement>),
}

/// Blocks are released from a work list rather than recursively.
impl Drop for StatementBody {
    fn drop(&mut self) {
        let StatementBody::Block(children) = self else {
            return;
        };
        let mut pending = mem::take(children);
        while let Some(mut statement) = pending.pop() {
            if let StatementBody::Block(children) = &mut statement.body {
                pending.append(children);
            }
        }
    }
}

/// Body variant requested when allocating a [`Statement`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Line,
    Block,
}

impl Statement {
    pub fn new(span: Span, body: BodyKind) -> Self {
        Statement {
            span,
            tokens: TokenSequence::new(),
            doc_comment: None,
            body: match body {
                BodyKind::Line => StatementBody::Line,
                BodyKind::Block => StatementBody::Block(Vec::new()),
            },
        }
    }

    /// Child statements, or `None` for a `;`-terminated statement.
    pub fn block(&self) -> Option<&[Statement]> {
        match &self.body {
            StatementBody::Line => None,
            StatementBody::Block(children) => Some(children),
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self.body, StatementBody::Block(_))
    }
}

impl Adopt<Token> for Statement {
    fn adopt(&mut self, child: Orphan<Token>) {
        self.tokens.push(child.into_node());
    }
}

impl Adopt<Statement> for Statement {
    /// Attaching a child turns a line statement into a block.
    fn adopt(&mut self, child: Orphan<Statement>) {
        let child = child.into_node();
        match &mut self.body {
            StatementBody::Block(children) => children.push(child),
            body @ StatementBody::Line => *body = StatementBody::Block(vec![child]),
        }
    }
}

/// Destination of statement mode: the top-level statement sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LexedStatements {
    pub statements: Vec<Statement>,
}

impl Adopt<Statement> for LexedStatements {
    fn adopt(&mut self, child: Orphan<Statement>) {
        self.statements.push(child.into_node());
    }
}
