use super::*;

#[test]
fn test_single_line() {
    let table = LineOffsetTable::build(b"struct Foo {}");
    assert_eq!(table.line_count(), 1);
    assert_eq!(table.offset_to_line_col(7), (1, 8));
}

#[test]
fn test_offset_at_newline_belongs_to_its_line() {
    let table = LineOffsetTable::build(b"a;\nb;\n");
    assert_eq!(table.offset_to_line_col(2), (1, 3));
    assert_eq!(table.offset_to_line_col(3), (2, 1));
    assert_eq!(table.offset_to_line_col(6), (3, 1));
}

#[test]
fn test_span_start() {
    let table = LineOffsetTable::build(b"x\n  y");
    assert_eq!(table.span_start(Span::new(4, 5)), (2, 3));
}
