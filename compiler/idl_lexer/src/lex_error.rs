//! Lexer error kinds and the report staged for them.
//!
//! Every kind maps onto one of three failure categories: malformed
//! literals (recovered locally, a token is still produced), unterminated
//! constructs (closed implicitly), and unexpected input (the enclosing
//! statement or token run is skipped).

use idl_ir::Span;
use thiserror::Error;

/// What went wrong. The `Display` text is the message forwarded to the sink.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexErrorKind {
    // === Numeric Errors ===
    /// Integer does not fit in `u64`.
    #[error("integer literal is too large; the maximum is {}", u64::MAX)]
    IntegerOverflow,
    /// `0x` with nothing after it.
    #[error("hex literal has no digits after `0x`")]
    EmptyHexLiteral,
    /// `8` or `9` in a literal with a leading zero.
    #[error("invalid digit `{digit}` in octal literal")]
    InvalidOctalDigit { digit: char },
    /// `1e`, `2.5e+`.
    #[error("float exponent has no digits")]
    MalformedExponent,

    // === String and Data Errors ===
    #[error("unknown escape sequence `\\{escape}`")]
    InvalidEscape { escape: char },
    #[error("`\\x` escape needs two hex digits")]
    MalformedHexEscape,
    #[error("octal escape value exceeds 255")]
    OctalEscapeOutOfRange,
    #[error("string literal is not valid UTF-8")]
    InvalidUtf8,
    #[error("data literal has an odd number of hex digits")]
    OddHexDigits,
    #[error("invalid character `{found}` in data literal; expected hex digits")]
    InvalidDataCharacter { found: char },

    // === Unterminated Constructs ===
    #[error("string literal is missing its closing `\"`")]
    UnterminatedString,
    #[error("data literal is missing its closing `\"`")]
    UnterminatedData,
    #[error("block comment is missing its closing `*/`")]
    UnterminatedBlockComment,
    #[error("missing `{close}` to close `{open}`")]
    UnclosedGroup { open: char, close: char },
    #[error("block is missing its closing `}}`")]
    UnterminatedBlock,

    // === Unexpected Input ===
    /// `(a,,b)`: kept as an empty item.
    #[error("empty item in `{open}{close}` list")]
    EmptyListItem { open: char, close: char },
    /// A stray `;` with no header.
    #[error("expected a statement")]
    ExpectedStatement,
    #[error("expected `;` or `{{` to end the statement")]
    ExpectedStatementEnd,
    #[error("unmatched `}}`")]
    UnmatchedCloseBrace,
    #[error("unexpected `{found}`")]
    UnexpectedCharacter { found: char },
    /// Non-printable or non-ASCII byte that starts no token.
    #[error("unexpected byte 0x{byte:02X}")]
    InvalidByte { byte: u8 },
    #[error("source is {len} bytes; at most {} bytes can be lexed", u32::MAX)]
    InputTooLarge { len: usize },
}

/// The three recovery categories of [`LexErrorKind`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorCategory {
    MalformedLiteral,
    Unterminated,
    UnexpectedInput,
}

impl LexErrorKind {
    /// Diagnostic for a byte that cannot start a token.
    pub fn unexpected(byte: u8) -> Self {
        if byte.is_ascii_graphic() {
            LexErrorKind::UnexpectedCharacter {
                found: char::from(byte),
            }
        } else {
            LexErrorKind::InvalidByte { byte }
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            LexErrorKind::IntegerOverflow
            | LexErrorKind::EmptyHexLiteral
            | LexErrorKind::InvalidOctalDigit { .. }
            | LexErrorKind::MalformedExponent
            | LexErrorKind::InvalidEscape { .. }
            | LexErrorKind::MalformedHexEscape
            | LexErrorKind::OctalEscapeOutOfRange
            | LexErrorKind::InvalidUtf8
            | LexErrorKind::OddHexDigits
            | LexErrorKind::InvalidDataCharacter { .. } => ErrorCategory::MalformedLiteral,
            LexErrorKind::UnterminatedString
            | LexErrorKind::UnterminatedData
            | LexErrorKind::UnterminatedBlockComment
            | LexErrorKind::UnclosedGroup { .. }
            | LexErrorKind::UnterminatedBlock => ErrorCategory::Unterminated,
            LexErrorKind::EmptyListItem { .. }
            | LexErrorKind::ExpectedStatement
            | LexErrorKind::ExpectedStatementEnd
            | LexErrorKind::UnmatchedCloseBrace
            | LexErrorKind::UnexpectedCharacter { .. }
            | LexErrorKind::InvalidByte { .. }
            | LexErrorKind::InputTooLarge { .. } => ErrorCategory::UnexpectedInput,
        }
    }
}

/// A located error, as held by the staging slot.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ErrorReport {
    pub span: Span,
    pub kind: LexErrorKind,
}

impl ErrorReport {
    pub fn new(span: Span, kind: LexErrorKind) -> Self {
        ErrorReport { span, kind }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
