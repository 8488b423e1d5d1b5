//! Diagnostics produced while lexing schema files.
//!
//! The lexer forwards each recovered error to a [`DiagnosticSink`] as a
//! `(span, message)` pair, in source order. [`DiagnosticQueue`] is the
//! collecting sink used by embedders and tests; anything else (terminal
//! rendering, LSP publishing) implements the trait itself.

mod diagnostic;
pub mod queue;
pub mod span_utils;

pub use diagnostic::{Diagnostic, DiagnosticSink};
pub use queue::{DiagnosticConfig, DiagnosticQueue};
