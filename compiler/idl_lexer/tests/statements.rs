//! Statement mode over schema-shaped input.

use idl_diagnostic::span_utils::LineOffsetTable;
use idl_diagnostic::Diagnostic;
use idl_ir::{LexedStatements, Span, Statement, TokenKind};
use idl_lexer::lex_statements;
use pretty_assertions::assert_eq;

fn lex(input: &str) -> (bool, Vec<Statement>, Vec<Diagnostic>) {
    let mut sink = Vec::new();
    let mut lexed = LexedStatements::default();
    let ok = lex_statements(input.as_bytes(), &mut sink, &mut lexed);
    (ok, lexed.statements, sink)
}

fn first_word(statement: &Statement) -> String {
    statement
        .tokens
        .first()
        .map(|t| t.kind.to_string())
        .unwrap_or_default()
}

const SCHEMA: &str = r#"@0xdbb9ad1f14bf0b36;

using Cxx = import "/capnp/c++.capnp";

# A person in the address book.
struct Person {
  name @0 :Text;
  email @1 :Text;
  phones @2 :List(PhoneNumber);

  struct PhoneNumber {
    number @0 :Text;
    type @1 :Type = mobile;
  }

  employment :union {
    unemployed @3 :Void;
    school @4 :Text;
  }

  avatar @5 :Data = 0x"89 50 4e 47";
  ratio @6 :Float64 = 2.5e-3;
}

const defaults :List(Int32) = [1, 2, 3];
"#;

#[test]
fn well_formed_schema() {
    let (ok, statements, diagnostics) = lex(SCHEMA);
    assert!(ok, "{diagnostics:?}");
    let words: Vec<_> = statements.iter().map(first_word).collect();
    assert_eq!(words, vec!["@", "using", "struct", "const"]);

    let person = &statements[2];
    assert_eq!(
        person.doc_comment.as_deref(),
        Some("A person in the address book.\n")
    );
    let fields: Vec<_> = person.block().unwrap_or_default().iter().map(first_word).collect();
    assert_eq!(
        fields,
        vec!["name", "email", "phones", "struct", "employment", "avatar", "ratio"]
    );

    let avatar = &person.block().unwrap_or_default()[5];
    assert!(avatar
        .tokens
        .iter()
        .any(|t| t.kind == TokenKind::DataLiteral(vec![0x89, 0x50, 0x4E, 0x47])));
}

#[test]
fn stray_semicolon_is_reported_once() {
    let input = "foo @0 { bar @1 ;; baz @2; }";
    let (ok, statements, diagnostics) = lex(input);
    assert!(!ok);
    assert_eq!(diagnostics.len(), 1);
    let stray = input.rfind(";;").map(|i| i + 1).unwrap_or_default();
    assert_eq!(diagnostics[0].span.start as usize, stray);
    assert_eq!(&input[diagnostics[0].span.to_range()], ";");

    assert_eq!(statements.len(), 1);
    let children = statements[0].block().unwrap_or_default();
    let rendered: Vec<String> = children
        .iter()
        .map(|c| {
            c.tokens
                .iter()
                .map(|t| t.kind.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    assert_eq!(rendered, vec!["bar @ 1", "baz @ 2"]);
    assert!(children.iter().all(|c| !c.is_block()));
}

#[test]
fn doc_comment_needs_adjacency() {
    let (_, attached, _) = lex("# Foo docs.\nstruct Foo {}");
    assert_eq!(attached[0].doc_comment.as_deref(), Some("Foo docs.\n"));

    let (_, detached, _) = lex("# Foo docs.\n\nstruct Foo {}");
    assert_eq!(detached[0].doc_comment, None);
}

#[test]
fn comment_after_previous_statement_is_not_a_doc() {
    let (_, statements, _) = lex("a;\n# between\nb;");
    // Own-line comment right above `b`: attached.
    assert_eq!(statements[1].doc_comment.as_deref(), Some("between\n"));

    let (_, statements, _) = lex("a; # trailing\nb;");
    assert_eq!(statements[1].doc_comment, None);
}

#[test]
fn independent_errors_each_report() {
    let input = "a ,;\nb \"x\\q\";\nc ];\nstruct S { d; \n";
    let (ok, statements, diagnostics) = lex(input);
    assert!(!ok);
    let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "expected `;` or `{` to end the statement",
            "unknown escape sequence `\\q`",
            "expected `;` or `{` to end the statement",
            "block is missing its closing `}`",
        ]
    );
    let words: Vec<_> = statements.iter().map(first_word).collect();
    assert_eq!(words, vec!["b", "struct"]);
}

#[test]
fn diagnostics_arrive_in_source_order() {
    let input = "x ,; } y \\; z;";
    let (_, _, diagnostics) = lex(input);
    assert_eq!(diagnostics.len(), 3);
    assert!(diagnostics
        .windows(2)
        .all(|pair| pair[0].span.start <= pair[1].span.start));
}

#[test]
fn partial_tree_survives_unterminated_constructs() {
    let (ok, statements, diagnostics) = lex("struct Foo {\n  a @0 :List(Text;\n  b @1;\n");
    assert!(!ok);
    assert_eq!(statements.len(), 1);
    let children = statements[0].block().unwrap_or_default();
    assert_eq!(children.len(), 2);
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(
        diagnostics[1],
        Diagnostic::new(Span::point(40), "block is missing its closing `}`")
    );
}

#[test]
fn diagnostics_map_to_line_and_column() {
    let input = "a;\nb ,;\n  c \\;\n";
    let (_, _, diagnostics) = lex(input);
    let table = LineOffsetTable::build(input.as_bytes());
    let positions: Vec<_> = diagnostics.iter().map(|d| table.span_start(d.span)).collect();
    assert_eq!(positions, vec![(2, 3), (3, 5)]);
}
