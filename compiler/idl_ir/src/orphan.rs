//! Detached-node allocation.
//!
//! The lexer writes its output through two operations: allocate a detached
//! node ([`Orphanage`]) and attach it under a parent ([`Adopt`]). An
//! [`Orphan`] is move-only, so a node has exactly one owner at a time and
//! attaching it is the single point where ownership moves into the tree.
//!
//! ```text
//! let mut stmt = orphanage.new_statement(span, BodyKind::Line);
//! stmt.adopt(orphanage.new_token(span, kind));
//! destination.adopt(stmt);
//! ```

use crate::{BodyKind, Delimiter, Group, Span, Statement, Token, TokenKind, TokenSequence};

/// A node that has been allocated but not yet attached to a tree.
#[derive(Debug, PartialEq)]
#[must_use = "an orphan is lost unless a parent adopts it"]
pub struct Orphan<T> {
    node: T,
}

impl<T> Orphan<T> {
    /// Wrap a freshly allocated node. Only orphanages should call this.
    pub fn detached(node: T) -> Self {
        Orphan { node }
    }

    pub fn get(&self) -> &T {
        &self.node
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.node
    }

    /// Attach `child` under this (still detached) node.
    pub fn adopt<C>(&mut self, child: Orphan<C>)
    where
        T: Adopt<C>,
    {
        self.node.adopt(child);
    }

    /// Convert the detached node without attaching it.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Orphan<U> {
        Orphan { node: f(self.node) }
    }

    pub(crate) fn into_node(self) -> T {
        self.node
    }
}

/// Parent side of the attach operation.
pub trait Adopt<C> {
    /// Take ownership of `child`, appending it after any earlier children.
    fn adopt(&mut self, child: Orphan<C>);
}

/// Allocator of detached output nodes.
pub trait Orphanage {
    fn new_token(&mut self, span: Span, kind: TokenKind) -> Orphan<Token>;

    /// An empty grouped list; items are adopted in source order.
    fn new_group(&mut self, span: Span, delimiter: Delimiter) -> Orphan<Group>;

    /// An empty token sequence (one item of a grouped list).
    fn new_sequence(&mut self) -> Orphan<TokenSequence>;

    fn new_statement(&mut self, span: Span, body: BodyKind) -> Orphan<Statement>;
}

/// Counters kept by [`Arena`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ArenaStats {
    pub tokens: usize,
    pub groups: usize,
    pub sequences: usize,
    pub statements: usize,
}

impl ArenaStats {
    pub fn total(&self) -> usize {
        self.tokens + self.groups + self.sequences + self.statements
    }
}

/// Default heap-backed orphanage.
///
/// Nodes live on the heap and are owned by whichever tree adopts them; the
/// arena itself only keeps allocation counts.
#[derive(Debug, Default)]
pub struct Arena {
    stats: ArenaStats,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> ArenaStats {
        self.stats
    }
}

impl Orphanage for Arena {
    fn new_token(&mut self, span: Span, kind: TokenKind) -> Orphan<Token> {
        self.stats.tokens += 1;
        Orphan::detached(Token { span, kind })
    }

    fn new_group(&mut self, span: Span, delimiter: Delimiter) -> Orphan<Group> {
        self.stats.groups += 1;
        Orphan::detached(Group {
            span,
            delimiter,
            items: Vec::new(),
        })
    }

    fn new_sequence(&mut self) -> Orphan<TokenSequence> {
        self.stats.sequences += 1;
        Orphan::detached(TokenSequence::new())
    }

    fn new_statement(&mut self, span: Span, body: BodyKind) -> Orphan<Statement> {
        self.stats.statements += 1;
        Orphan::detached(Statement::new(span, body))
    }
}
