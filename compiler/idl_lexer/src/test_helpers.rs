//! Shorthands shared by the unit tests.

use idl_diagnostic::Diagnostic;
use idl_ir::{LexedStatements, LexedTokens, Statement, Token, TokenKind};

/// Token mode over `input`: tokens and forwarded diagnostics.
pub(crate) fn lex_tokens(input: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    lex_token_bytes(input.as_bytes())
}

pub(crate) fn lex_token_bytes(input: &[u8]) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut sink = Vec::new();
    let mut lexed = LexedTokens::default();
    let ok = crate::lex_tokens(input, &mut sink, &mut lexed);
    assert_eq!(ok, sink.is_empty());
    (lexed.tokens, sink)
}

/// Kinds only, for inputs that must lex cleanly.
pub(crate) fn kinds(input: &str) -> Vec<TokenKind> {
    let (tokens, diagnostics) = lex_tokens(input);
    assert!(diagnostics.is_empty(), "{input:?}: {diagnostics:?}");
    tokens.into_iter().map(|token| token.kind).collect()
}

/// Statement mode over `input`: statements and forwarded diagnostics.
pub(crate) fn lex_statements(input: &str) -> (Vec<Statement>, Vec<Diagnostic>) {
    let mut sink = Vec::new();
    let mut lexed = LexedStatements::default();
    let ok = crate::lex_statements(input.as_bytes(), &mut sink, &mut lexed);
    assert_eq!(ok, sink.is_empty());
    (lexed.statements, sink)
}

/// Diagnostic messages only.
pub(crate) fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.message.as_str()).collect()
}

pub(crate) fn ident(name: &str) -> TokenKind {
    TokenKind::Identifier(name.to_owned())
}

pub(crate) fn op(symbol: &str) -> TokenKind {
    TokenKind::Operator(symbol.to_owned())
}

pub(crate) fn int(value: u64, text: &str) -> TokenKind {
    TokenKind::IntegerLiteral {
        value,
        text: text.to_owned(),
    }
}
