//! Output trees of the schema lexer.
//!
//! The lexer never owns the trees it builds. Every node is handed out
//! detached by an [`Orphanage`] and then attached exactly once under a
//! parent through [`Adopt`]. The shapes here are the whole contract with
//! the semantic parser that runs next:
//!
//! - [`Token`]: identifiers, literals, operators, and grouped lists
//! - [`Statement`]: a header of tokens plus an optional block of statements
//! - [`LexedTokens`] / [`LexedStatements`]: destinations for the two entry points

mod orphan;
mod span;
mod statement;
mod token;

pub use orphan::{Adopt, Arena, ArenaStats, Orphan, Orphanage};
pub use span::{ByteOffset, Span, SpanError};
pub use statement::{BodyKind, LexedStatements, Statement, StatementBody};
pub use token::{Delimiter, Group, LexedTokens, Token, TokenKind, TokenSequence};
