//! Token and statement lexer for schema files.
//!
//! Turns raw bytes into either a flat [`LexedTokens`] list or a tree of
//! [`LexedStatements`]. Lexing never stops at the first error: malformed
//! input is recovered from locally, and every recovery forwards at most one
//! diagnostic to a [`DiagnosticSink`].
//!
//! # Example
//!
//! ```
//! use idl_ir::LexedStatements;
//! use idl_lexer::lex_statements;
//!
//! let mut sink = Vec::new();
//! let mut lexed = LexedStatements::default();
//! assert!(lex_statements(b"struct Foo { x @0 :Int32; }", &mut sink, &mut lexed));
//! assert_eq!(lexed.statements.len(), 1);
//! assert!(sink.is_empty());
//! ```

mod cursor;
mod grammar;
mod lex_error;
mod literal;
mod number;
mod productions;
mod staging;
mod statement;
mod token;
mod trivia;

use std::cell::Cell;
use std::sync::Once;

use idl_diagnostic::DiagnosticSink;
use idl_ir::{Adopt, Arena, LexedStatements, LexedTokens, Orphanage, Span};
use tracing::{debug, warn};

pub use cursor::Cursor;
pub use grammar::{is_operator_byte, LexerConfig, DEFAULT_OPERATORS};
pub use lex_error::{ErrorCategory, ErrorReport, LexErrorKind};
pub use productions::Productions;
pub use staging::StagedDiagnostic;
pub use statement::{Nesting, StatementBuf};
pub use token::TokenBuf;

use grammar::Grammar;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Lexer facade: owns the compiled grammar and the staged diagnostic slot,
/// and allocates nodes from a caller-supplied [`Orphanage`].
///
/// The grammar is built once in the constructor and reused by every call.
pub struct Lexer<'o, O: Orphanage> {
    orphanage: &'o mut O,
    grammar: Grammar,
    staged: StagedDiagnostic,
}

impl<'o, O: Orphanage> Lexer<'o, O> {
    pub fn new(orphanage: &'o mut O) -> Self {
        Self::with_config(orphanage, &LexerConfig::default())
    }

    pub fn with_config(orphanage: &'o mut O, config: &LexerConfig) -> Self {
        Lexer {
            orphanage,
            grammar: Grammar::compile(config),
            staged: StagedDiagnostic::new(),
        }
    }

    /// Lex `input` as a sequence of statements into `destination`.
    ///
    /// Returns `true` iff no diagnostic was forwarded to `sink`.
    #[tracing::instrument(level = "debug", skip_all, fields(len = input.len()))]
    pub fn lex_statements(
        &mut self,
        input: &[u8],
        sink: &mut dyn DiagnosticSink,
        destination: &mut LexedStatements,
    ) -> bool {
        if !accepts_len(input, sink) {
            return false;
        }
        self.staged = StagedDiagnostic::new();
        let farthest = Cell::new(0);
        let mut cursor = Cursor::new(input, &farthest);

        let mut productions = self.productions(sink);
        let statements = productions.statement_sequence(&mut cursor, Nesting::TopLevel);
        productions.drain();
        let forwarded = productions.forwarded();

        for statement in statements {
            destination.adopt(statement);
        }
        debug!(
            statements = destination.statements.len(),
            forwarded, "lexed statements"
        );
        forwarded == 0
    }

    /// Lex `input` as a flat token list into `destination`.
    ///
    /// Bytes that start no token (including `;`, `{` and `}`) are skipped
    /// one character at a time, each run reported once. Returns `true` iff
    /// no diagnostic was forwarded to `sink`.
    #[tracing::instrument(level = "debug", skip_all, fields(len = input.len()))]
    pub fn lex_tokens(
        &mut self,
        input: &[u8],
        sink: &mut dyn DiagnosticSink,
        destination: &mut LexedTokens,
    ) -> bool {
        if !accepts_len(input, sink) {
            return false;
        }
        self.staged = StagedDiagnostic::new();
        let farthest = Cell::new(0);
        let mut cursor = Cursor::new(input, &farthest);

        let mut productions = self.productions(sink);
        let tokens = productions.token_stream(&mut cursor);
        productions.drain();
        let forwarded = productions.forwarded();

        for token in tokens {
            destination.adopt(token);
        }
        debug!(tokens = destination.tokens.len(), forwarded, "lexed tokens");
        forwarded == 0
    }

    /// Bind the grammar's productions to `sink` for direct use.
    pub fn productions<'s>(&'s mut self, sink: &'s mut dyn DiagnosticSink) -> Productions<'s, O> {
        Productions::new(&self.grammar, &mut *self.orphanage, &mut self.staged, sink)
    }

    /// Remove the staged report without forwarding it.
    pub fn take_error_report(&mut self) -> Option<ErrorReport> {
        self.staged.take()
    }
}

/// [`Lexer::lex_statements`] with an [`Arena`] and the default config.
pub fn lex_statements(
    input: &[u8],
    sink: &mut dyn DiagnosticSink,
    destination: &mut LexedStatements,
) -> bool {
    let mut arena = Arena::new();
    Lexer::new(&mut arena).lex_statements(input, sink, destination)
}

/// [`Lexer::lex_tokens`] with an [`Arena`] and the default config.
pub fn lex_tokens(input: &[u8], sink: &mut dyn DiagnosticSink, destination: &mut LexedTokens) -> bool {
    let mut arena = Arena::new();
    Lexer::new(&mut arena).lex_tokens(input, sink, destination)
}

/// Offsets are `u32`; longer inputs are rejected with one diagnostic.
fn accepts_len(input: &[u8], sink: &mut dyn DiagnosticSink) -> bool {
    if u32::try_from(input.len()).is_ok() {
        return true;
    }
    let kind = LexErrorKind::InputTooLarge { len: input.len() };
    warn!(len = input.len(), "input too large to lex");
    sink.report(Span::DUMMY, &kind.to_string());
    false
}

#[cfg(test)]
mod test_helpers;
