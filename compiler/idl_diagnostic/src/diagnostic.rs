use std::fmt;

use idl_ir::Span;

/// A located error message.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Diagnostic {
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Diagnostic {
            span,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span, self.message)
    }
}

/// Receiver of recovered errors.
pub trait DiagnosticSink {
    fn report(&mut self, span: Span, message: &str);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, span: Span, message: &str) {
        self.push(Diagnostic::new(span, message));
    }
}
