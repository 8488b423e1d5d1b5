//! Lexer configuration and the compiled operator table.

use rustc_hash::FxHashSet;
use tracing::warn;

/// Multi-character operators recognized by default.
pub const DEFAULT_OPERATORS: &[&str] = &[
    "->", "::", "==", "!=", "<=", ">=", "&&", "||", "<<", ">>", "..",
];

/// Bytes that form operators. Every single one is an operator by itself.
#[inline]
pub const fn is_operator_byte(byte: u8) -> bool {
    matches!(
        byte,
        b'!' | b'$'
            | b'%'
            | b'&'
            | b'*'
            | b'+'
            | b'-'
            | b'.'
            | b'/'
            | b':'
            | b'<'
            | b'='
            | b'>'
            | b'?'
            | b'@'
            | b'^'
            | b'|'
            | b'~'
    )
}

/// Options fixed when a [`Lexer`](crate::Lexer) is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexerConfig {
    /// Attach comment blocks directly above a statement as its doc comment.
    pub doc_comments: bool,
    /// Extra multi-character operators, matched longest first together
    /// with [`DEFAULT_OPERATORS`]. Entries containing non-operator bytes
    /// are ignored.
    pub extra_operators: Vec<String>,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            doc_comments: true,
            extra_operators: Vec::new(),
        }
    }
}

/// Immutable tables built once from a [`LexerConfig`].
#[derive(Clone, Debug)]
pub(crate) struct Grammar {
    /// Multi-character operators, longest first.
    operators: Box<[Box<[u8]>]>,
    pub(crate) doc_comments: bool,
}

impl Grammar {
    pub(crate) fn compile(config: &LexerConfig) -> Self {
        let mut seen = FxHashSet::default();
        let mut operators: Vec<Box<[u8]>> = DEFAULT_OPERATORS
            .iter()
            .copied()
            .chain(config.extra_operators.iter().map(String::as_str))
            .filter(|op| {
                let valid = op.len() > 1 && op.bytes().all(is_operator_byte);
                if !valid {
                    warn!(operator = %op, "ignoring extra operator");
                }
                valid
            })
            .filter(|op| seen.insert(*op))
            .map(|op| Box::from(op.as_bytes()))
            .collect();
        // Stable: equal lengths keep table order.
        operators.sort_by(|a, b| b.len().cmp(&a.len()));
        Grammar {
            operators: operators.into_boxed_slice(),
            doc_comments: config.doc_comments,
        }
    }

    /// Length of the longest operator at the start of `rest`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "operators are a few bytes long"
    )]
    pub(crate) fn match_operator(&self, rest: &[u8]) -> Option<u32> {
        self.operators
            .iter()
            .find(|op| rest.starts_with(op))
            .map(|op| op.len() as u32)
            .or_else(|| rest.first().filter(|&&b| is_operator_byte(b)).map(|_| 1))
    }
}
