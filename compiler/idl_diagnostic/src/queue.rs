//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.

use idl_ir::Span;

use crate::{Diagnostic, DiagnosticSink};

/// Configuration for diagnostic collection.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of diagnostics kept (0 = unlimited).
    pub error_limit: usize,
    /// Drop a diagnostic identical in span and message to the previous one.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 100,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Collecting [`DiagnosticSink`].
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// let ok = lexer.lex_statements(source, &mut queue, &mut out);
/// for diag in queue.flush() { ... }
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    /// Every report received, including ones the limit or dedup dropped.
    received: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            received: 0,
            config,
        }
    }

    /// Add a diagnostic. Returns `true` if it was kept.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        self.received += 1;

        if self.limit_reached() {
            return false;
        }

        if self.config.deduplicate && self.diagnostics.last() == Some(&diag) {
            return false;
        }

        self.diagnostics.push(diag);
        true
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.diagnostics.len() >= self.config.error_limit
    }

    /// Number of reports received, kept or not.
    pub fn received(&self) -> usize {
        self.received
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Sort diagnostics by position and return them, clearing the queue.
    ///
    /// The sort is stable, so diagnostics at the same offset keep their
    /// arrival order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let already_sorted = self
            .diagnostics
            .windows(2)
            .all(|w| w[0].span.start <= w[1].span.start);
        if !already_sorted {
            self.diagnostics.sort_by_key(|d| d.span.start);
        }
        self.received = 0;
        std::mem::take(&mut self.diagnostics)
    }

    /// Get diagnostics without clearing the queue.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

impl DiagnosticSink for DiagnosticQueue {
    fn report(&mut self, span: Span, message: &str) {
        self.add(Diagnostic::new(span, message));
    }
}
