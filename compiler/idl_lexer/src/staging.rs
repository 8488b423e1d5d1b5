//! The staged diagnostic slot.
//!
//! Productions never write to the sink directly. A failure or a recovery
//! stages one report here; recovery points drain it. The slot holds at
//! most one report, in one of two states:
//!
//! - **Tentative**: an alternative failed. A later success discards it.
//!   Among tentative reports the one whose attempt reached farther wins,
//!   ties going to the latest.
//! - **Recovered**: a placeholder was substituted and lexing went on.
//!   Survives until drained. Only another recovery replaces it.

use idl_ir::ByteOffset;

use crate::cursor::Cursor;
use crate::lex_error::{ErrorReport, LexErrorKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    /// Attempt position the failure was observed at.
    Tentative { reached: ByteOffset },
    Recovered,
}

/// Single-slot holder of the pending diagnostic.
#[derive(Clone, Debug, Default)]
pub struct StagedDiagnostic {
    slot: Option<(ErrorReport, Stage)>,
}

impl StagedDiagnostic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a failed alternative, located at the farthest offset reached.
    ///
    /// No-op if a recovered report is pending or a tentative report from an
    /// attempt that got farther than `cursor` is already staged.
    pub fn stage_failure(&mut self, cursor: &Cursor<'_>, kind: LexErrorKind) {
        let reached = cursor.pos();
        match self.slot {
            Some((_, Stage::Recovered)) => return,
            Some((_, Stage::Tentative { reached: staged })) if staged > reached => return,
            _ => {}
        }
        self.slot = Some((
            ErrorReport::new(cursor.farthest_span(), kind),
            Stage::Tentative { reached },
        ));
    }

    /// Stage a diagnostic for a substituted placeholder. Always overwrites.
    pub fn stage_recovered(&mut self, cursor: &Cursor<'_>, kind: LexErrorKind) {
        self.slot = Some((
            ErrorReport::new(cursor.farthest_span(), kind),
            Stage::Recovered,
        ));
    }

    /// Settle the slot at a recovery point that is skipping input.
    ///
    /// A tentative report explains the skip and becomes recovered. An empty
    /// slot gets `fallback`. A recovered report is kept.
    pub fn recover_with(&mut self, cursor: &Cursor<'_>, fallback: LexErrorKind) {
        match &mut self.slot {
            Some((_, stage @ Stage::Tentative { .. })) => *stage = Stage::Recovered,
            Some((_, Stage::Recovered)) => {}
            None => self.stage_recovered(cursor, fallback),
        }
    }

    /// Discard a tentative report. Recovered reports stay.
    pub fn clear_staged(&mut self) {
        if self.has_tentative() {
            self.slot = None;
        }
    }

    pub fn has_tentative(&self) -> bool {
        matches!(self.slot, Some((_, Stage::Tentative { .. })))
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn peek(&self) -> Option<&ErrorReport> {
        self.slot.as_ref().map(|(report, _)| report)
    }

    /// Remove and return the staged report.
    pub fn take(&mut self) -> Option<ErrorReport> {
        self.slot.take().map(|(report, _)| report)
    }
}

/// Try alternatives in order from the same start; the first success wins.
///
/// Each alternative is an expression evaluating to `Option<T>` that reads
/// `$cursor`. The cursor is reset before every attempt and restored if all
/// fail. A success clears tentative reports left by earlier attempts.
macro_rules! one_of {
    ($session:expr, $cursor:expr, $($alternative:expr),+ $(,)?) => {{
        let start = $cursor.fork();
        let mut outcome = None;
        $(
            if outcome.is_none() {
                *$cursor = start;
                outcome = $alternative;
            }
        )+
        match outcome {
            Some(_) => $session.staged.clear_staged(),
            None => *$cursor = start,
        }
        outcome
    }};
}

pub(crate) use one_of;
