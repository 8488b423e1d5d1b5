//! Token trees.

use std::{fmt, mem};

use crate::orphan::{Adopt, Orphan};
use crate::Span;

/// An ordered run of tokens: one item of a grouped list, a statement
/// header, or the whole output of token mode.
pub type TokenSequence = Vec<Token>;

/// One lexical unit with its byte span.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub span: Span,
    pub kind: TokenKind,
}

/// Payload of a [`Token`].
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Identifier(String),
    /// Parsed value plus the source text it came from.
    IntegerLiteral {
        value: u64,
        text: String,
    },
    FloatLiteral {
        value: f64,
        text: String,
    },
    /// Decoded contents of a `"..."` literal.
    StringLiteral(String),
    /// Decoded bytes of a `0x"..."` literal. No UTF-8 requirement.
    DataLiteral(Vec<u8>),
    Operator(String),
    /// `( a, b, ... )`. An empty `()` holds no items.
    ParenthesizedList(Vec<TokenSequence>),
    /// `[ a, b, ... ]`. An empty `[]` holds no items.
    BracketedList(Vec<TokenSequence>),
}

impl TokenKind {
    /// Short human-readable name for diagnostics and debug dumps.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Identifier(_) => "identifier",
            TokenKind::IntegerLiteral { .. } => "integer literal",
            TokenKind::FloatLiteral { .. } => "float literal",
            TokenKind::StringLiteral(_) => "string literal",
            TokenKind::DataLiteral(_) => "data literal",
            TokenKind::Operator(_) => "operator",
            TokenKind::ParenthesizedList(_) => "parenthesized list",
            TokenKind::BracketedList(_) => "bracketed list",
        }
    }

    /// Items of a grouped list, or `None` for a leaf token.
    pub fn list_items(&self) -> Option<&[TokenSequence]> {
        match self {
            TokenKind::ParenthesizedList(items) | TokenKind::BracketedList(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` for an identifier with exactly this text.
    pub fn is_identifier(&self, name: &str) -> bool {
        matches!(self, TokenKind::Identifier(text) if text == name)
    }

    /// Returns `true` for an operator with exactly this symbol.
    pub fn is_operator(&self, symbol: &str) -> bool {
        matches!(self, TokenKind::Operator(text) if text == symbol)
    }
}

/// Grouped lists can nest far deeper than the native stack allows a
/// recursive drop to go, so nested items are released from a work list.
impl Drop for TokenKind {
    fn drop(&mut self) {
        let (TokenKind::ParenthesizedList(items) | TokenKind::BracketedList(items)) = self else {
            return;
        };
        let mut pending = mem::take(items);
        while let Some(sequence) = pending.pop() {
            for mut token in sequence {
                if let TokenKind::ParenthesizedList(items) | TokenKind::BracketedList(items) =
                    &mut token.kind
                {
                    pending.append(items);
                }
            }
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(text) | TokenKind::Operator(text) => f.write_str(text),
            TokenKind::IntegerLiteral { text, .. } | TokenKind::FloatLiteral { text, .. } => {
                f.write_str(text)
            }
            TokenKind::StringLiteral(text) => write!(f, "{text:?}"),
            TokenKind::DataLiteral(bytes) => {
                f.write_str("0x\"")?;
                for (i, byte) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{byte:02x}")?;
                }
                f.write_str("\"")
            }
            TokenKind::ParenthesizedList(items) => write_items(f, items, Delimiter::Paren),
            TokenKind::BracketedList(items) => write_items(f, items, Delimiter::Bracket),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[TokenSequence], delimiter: Delimiter) -> fmt::Result {
    write!(f, "{}", char::from(delimiter.open()))?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        for (j, token) in item.iter().enumerate() {
            if j > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", token.kind)?;
        }
    }
    write!(f, "{}", char::from(delimiter.close()))
}

/// Bracket pair of a grouped list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Delimiter {
    Paren,
    Bracket,
}

impl Delimiter {
    /// Delimiter opened by `byte`, if any.
    #[inline]
    pub fn from_open(byte: u8) -> Option<Self> {
        match byte {
            b'(' => Some(Delimiter::Paren),
            b'[' => Some(Delimiter::Bracket),
            _ => None,
        }
    }

    #[inline]
    pub const fn open(self) -> u8 {
        match self {
            Delimiter::Paren => b'(',
            Delimiter::Bracket => b'[',
        }
    }

    #[inline]
    pub const fn close(self) -> u8 {
        match self {
            Delimiter::Paren => b')',
            Delimiter::Bracket => b']',
        }
    }
}

/// A grouped list while it is still being filled.
///
/// Allocated detached by [`Orphanage::new_group`](crate::Orphanage::new_group),
/// filled through `Adopt<TokenSequence>`, then turned into a [`Token`]
/// with [`Orphan::into_token`].
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub span: Span,
    pub delimiter: Delimiter,
    pub items: Vec<TokenSequence>,
}

impl From<Group> for Token {
    fn from(group: Group) -> Self {
        let kind = match group.delimiter {
            Delimiter::Paren => TokenKind::ParenthesizedList(group.items),
            Delimiter::Bracket => TokenKind::BracketedList(group.items),
        };
        Token {
            span: group.span,
            kind,
        }
    }
}

impl Orphan<Group> {
    /// Finish a detached group as a detached token.
    pub fn into_token(self) -> Orphan<Token> {
        self.map(Token::from)
    }
}

impl Adopt<Token> for TokenSequence {
    fn adopt(&mut self, child: Orphan<Token>) {
        self.push(child.into_node());
    }
}

impl Adopt<TokenSequence> for Group {
    fn adopt(&mut self, child: Orphan<TokenSequence>) {
        self.items.push(child.into_node());
    }
}

/// Destination of token mode: a bare token sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LexedTokens {
    pub tokens: TokenSequence,
}

impl Adopt<Token> for LexedTokens {
    fn adopt(&mut self, child: Orphan<Token>) {
        self.tokens.push(child.into_node());
    }
}
