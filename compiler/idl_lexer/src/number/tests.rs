use idl_diagnostic::Diagnostic;
use idl_ir::{Span, TokenKind};
use pretty_assertions::assert_eq;

use crate::test_helpers::{ident, int, kinds, lex_tokens, messages, op};

fn float(value: f64, text: &str) -> TokenKind {
    TokenKind::FloatLiteral {
        value,
        text: text.to_owned(),
    }
}

// === Integers ===

#[test]
fn decimal_hex_and_octal() {
    assert_eq!(kinds("42"), vec![int(42, "42")]);
    assert_eq!(kinds("0"), vec![int(0, "0")]);
    assert_eq!(kinds("0x1F"), vec![int(31, "0x1F")]);
    assert_eq!(kinds("0XfF"), vec![int(255, "0XfF")]);
    assert_eq!(kinds("017"), vec![int(15, "017")]);
}

#[test]
fn u64_max_fits() {
    assert_eq!(
        kinds("18446744073709551615"),
        vec![int(u64::MAX, "18446744073709551615")]
    );
    assert_eq!(
        kinds("0xFFFFFFFFFFFFFFFF"),
        vec![int(u64::MAX, "0xFFFFFFFFFFFFFFFF")]
    );
}

#[test]
fn overflow_saturates_with_diagnostic() {
    let (tokens, diagnostics) = lex_tokens("18446744073709551616");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, int(u64::MAX, "18446744073709551616"));
    assert_eq!(
        messages(&diagnostics),
        vec!["integer literal is too large; the maximum is 18446744073709551615"]
    );
}

#[test]
fn eight_or_nine_after_leading_zero() {
    let (tokens, diagnostics) = lex_tokens("09");
    assert_eq!(tokens[0].kind, int(9, "09"));
    assert_eq!(
        diagnostics,
        vec![Diagnostic::new(
            Span::point(2),
            "invalid digit `9` in octal literal"
        )]
    );
}

#[test]
fn empty_hex_is_reported_and_skipped() {
    let (tokens, diagnostics) = lex_tokens("0x");
    assert_eq!(
        diagnostics,
        vec![Diagnostic::new(
            Span::point(2),
            "hex literal has no digits after `0x`"
        )]
    );
    // The `0` is skipped; the `x` still lexes.
    let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![ident("x")]);
}

#[test]
fn digits_then_letters_are_two_tokens() {
    assert_eq!(kinds("123abc"), vec![int(123, "123"), ident("abc")]);
}

// === Floats ===

#[test]
fn fraction_and_exponent_forms() {
    assert_eq!(kinds("1.5"), vec![float(1.5, "1.5")]);
    assert_eq!(kinds("2e10"), vec![float(2e10, "2e10")]);
    assert_eq!(kinds("3.0e-2"), vec![float(0.03, "3.0e-2")]);
    assert_eq!(kinds("4E+3"), vec![float(4000.0, "4E+3")]);
}

#[test]
fn trailing_dot_is_an_operator() {
    assert_eq!(kinds("1."), vec![int(1, "1"), op(".")]);
    assert_eq!(kinds("1..2"), vec![int(1, "1"), op(".."), int(2, "2")]);
}

#[test]
fn exponent_without_digits() {
    let (tokens, diagnostics) = lex_tokens("1e");
    assert_eq!(tokens[0].kind, float(1.0, "1e"));
    assert_eq!(
        diagnostics,
        vec![Diagnostic::new(Span::point(2), "float exponent has no digits")]
    );

    let (tokens, diagnostics) = lex_tokens("2.5e+ x");
    let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![float(2.5, "2.5e+"), ident("x")]);
    assert_eq!(messages(&diagnostics), vec!["float exponent has no digits"]);
}

#[test]
fn literal_spans_cover_source_text() {
    let (tokens, _) = lex_tokens("  0x10 7.25 ");
    assert_eq!(tokens[0].span, Span::new(2, 6));
    assert_eq!(tokens[1].span, Span::new(7, 11));
}
