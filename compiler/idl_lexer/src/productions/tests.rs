use std::cell::Cell;

use idl_diagnostic::Diagnostic;
use idl_ir::{Arena, Span};
use pretty_assertions::assert_eq;

use super::*;
use crate::grammar::LexerConfig;

fn with_productions<R>(f: impl FnOnce(&mut Productions<'_, Arena>) -> R) -> (R, Vec<Diagnostic>) {
    let grammar = Grammar::compile(&LexerConfig::default());
    let mut arena = Arena::new();
    let mut staged = StagedDiagnostic::new();
    let mut sink = Vec::new();
    let result = {
        let mut productions = Productions::new(&grammar, &mut arena, &mut staged, &mut sink);
        f(&mut productions)
    };
    (result, sink)
}

#[test]
fn if_error_success_advances() {
    let farthest = Cell::new(0);
    let ((value, pos), sink) = with_productions(|p| {
        let mut cursor = Cursor::new(b"ab", &farthest);
        let value = p.if_error(&mut cursor, LexErrorKind::ExpectedStatement, |_, c| {
            c.eat(b'a').then_some(7)
        });
        (value, cursor.pos())
    });
    assert_eq!(value, Some(7));
    assert_eq!(pos, 1);
    assert!(sink.is_empty());
}

#[test]
fn if_error_failure_stages_and_restores() {
    let farthest = Cell::new(0);
    let ((value, pos, staged), _) = with_productions(|p| {
        let mut cursor = Cursor::new(b"ab", &farthest);
        let value: Option<()> = p.if_error(&mut cursor, LexErrorKind::ExpectedStatement, |_, c| {
            c.advance();
            None
        });
        (value, cursor.pos(), p.take_error_report())
    });
    assert_eq!(value, None);
    assert_eq!(pos, 0);
    assert_eq!(
        staged,
        Some(ErrorReport::new(Span::new(1, 2), LexErrorKind::ExpectedStatement))
    );
}

#[test]
fn if_error_or_substitutes_placeholder() {
    let farthest = Cell::new(0);
    let ((value, pos), sink) = with_productions(|p| {
        let mut cursor = Cursor::new(b"x", &farthest);
        let value = p.if_error_or(
            &mut cursor,
            LexErrorKind::UnterminatedString,
            || 0,
            |_, c| c.eat(b'"').then_some(1),
        );
        // Recovered reports survive no_error.
        p.no_error(|p| p.drain());
        (value, cursor.pos())
    });
    assert_eq!(value, 0);
    assert_eq!(pos, 0);
    assert_eq!(
        sink,
        vec![Diagnostic::new(
            Span::new(0, 1),
            "string literal is missing its closing `\"`"
        )]
    );
}

#[test]
fn no_error_clears_tentative() {
    let farthest = Cell::new(0);
    let (forwarded, sink) = with_productions(|p| {
        let cursor = Cursor::new(b"x", &farthest);
        p.staged.stage_failure(&cursor, LexErrorKind::ExpectedStatementEnd);
        p.no_error(|p| p.drain());
        p.forwarded()
    });
    assert_eq!(forwarded, 0);
    assert!(sink.is_empty());
}

#[test]
fn scratch_slot_isolates_reports() {
    let farthest = Cell::new(0);
    let (report, _) = with_productions(|p| {
        let cursor = Cursor::new(b"x", &farthest);
        p.staged.stage_recovered(&cursor, LexErrorKind::UnmatchedCloseBrace);
        p.with_scratch_slot(|p| {
            p.staged.stage_recovered(&cursor, LexErrorKind::OddHexDigits);
        });
        p.take_error_report()
    });
    assert_eq!(report.map(|r| r.kind), Some(LexErrorKind::UnmatchedCloseBrace));
}

#[test]
fn drain_forwards_at_most_once() {
    let farthest = Cell::new(0);
    let (forwarded, sink) = with_productions(|p| {
        let cursor = Cursor::new(b"x", &farthest);
        p.staged.stage_recovered(&cursor, LexErrorKind::UnmatchedCloseBrace);
        p.drain();
        p.drain();
        p.forwarded()
    });
    assert_eq!(forwarded, 1);
    assert_eq!(sink.len(), 1);
}
