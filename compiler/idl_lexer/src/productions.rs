//! Per-call lexing state and the error-handling combinators.
//!
//! [`Productions`] bundles what every production needs for one top-level
//! call: the compiled grammar, the node allocator, the staged diagnostic
//! slot, and the sink that recovery points drain into. The grammar rules
//! themselves are `impl` blocks spread over the `trivia`, `token`,
//! `number`, `literal` and `statement` modules.

use idl_diagnostic::DiagnosticSink;
use idl_ir::Orphanage;
use tracing::trace;

use crate::cursor::Cursor;
use crate::grammar::Grammar;
use crate::lex_error::{ErrorReport, LexErrorKind};
use crate::staging::StagedDiagnostic;

/// The grammar's productions, bound to one lexing call.
///
/// Obtained from [`Lexer::productions`](crate::Lexer::productions) to drive
/// individual productions over a [`Cursor`].
pub struct Productions<'s, O: Orphanage> {
    pub(crate) grammar: &'s Grammar,
    pub(crate) orphanage: &'s mut O,
    pub(crate) staged: &'s mut StagedDiagnostic,
    sink: &'s mut dyn DiagnosticSink,
    forwarded: u32,
}

impl<'s, O: Orphanage> Productions<'s, O> {
    pub(crate) fn new(
        grammar: &'s Grammar,
        orphanage: &'s mut O,
        staged: &'s mut StagedDiagnostic,
        sink: &'s mut dyn DiagnosticSink,
    ) -> Self {
        Productions {
            grammar,
            orphanage,
            staged,
            sink,
            forwarded: 0,
        }
    }

    /// Diagnostics forwarded to the sink so far.
    pub fn forwarded(&self) -> u32 {
        self.forwarded
    }

    /// Remove the pending report without forwarding it.
    pub fn take_error_report(&mut self) -> Option<ErrorReport> {
        self.staged.take()
    }

    /// Recovery point: forward the staged report, if any, to the sink.
    pub(crate) fn drain(&mut self) {
        if let Some(report) = self.staged.take() {
            trace!(
                span = %report.span,
                category = ?report.kind.category(),
                kind = ?report.kind,
                "forwarding diagnostic"
            );
            self.sink.report(report.span, &report.message());
            self.forwarded += 1;
        }
    }

    /// Run `production` on a fork. On failure stage `kind` as tentative and
    /// propagate the failure; the cursor is left where it was.
    pub(crate) fn if_error<'a, T>(
        &mut self,
        cursor: &mut Cursor<'a>,
        kind: LexErrorKind,
        production: impl FnOnce(&mut Self, &mut Cursor<'a>) -> Option<T>,
    ) -> Option<T> {
        let mut fork = cursor.fork();
        let outcome = production(self, &mut fork);
        match outcome {
            Some(_) => *cursor = fork,
            None => self.staged.stage_failure(&fork, kind),
        }
        outcome
    }

    /// Run `production` on a fork. On failure stage `kind` as recovered and
    /// return `placeholder()` without consuming input.
    pub(crate) fn if_error_or<'a, T>(
        &mut self,
        cursor: &mut Cursor<'a>,
        kind: LexErrorKind,
        placeholder: impl FnOnce() -> T,
        production: impl FnOnce(&mut Self, &mut Cursor<'a>) -> Option<T>,
    ) -> T {
        let mut fork = cursor.fork();
        if let Some(value) = production(self, &mut fork) {
            *cursor = fork;
            return value;
        }
        self.staged.stage_recovered(&fork, kind);
        placeholder()
    }

    /// Run `production` with tentative reports cleared first.
    pub(crate) fn no_error<R>(&mut self, production: impl FnOnce(&mut Self) -> R) -> R {
        self.staged.clear_staged();
        production(self)
    }

    /// Expect `byte`; if it is missing, stage `kind` and carry on as if it
    /// had been there.
    pub(crate) fn expect_or_recover(&mut self, cursor: &mut Cursor<'_>, byte: u8, kind: LexErrorKind) {
        self.if_error_or(cursor, kind, || (), |_, c| c.eat(byte).then_some(()));
    }

    /// Run `production` with a scratch slot, so reports staged while
    /// skipping never displace the one that caused the skip.
    pub(crate) fn with_scratch_slot<R>(&mut self, production: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::take(&mut *self.staged);
        let result = production(self);
        *self.staged = saved;
        result
    }
}

#[cfg(test)]
mod tests;
