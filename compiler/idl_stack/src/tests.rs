use super::*;

/// Depth of the deepest bracket, recursing once per opening byte the way
/// grouped lists do.
fn bracket_depth(input: &[u8]) -> usize {
    fn nested(input: &[u8], pos: &mut usize) -> usize {
        ensure_sufficient_stack(|| {
            let mut deepest = 0;
            while let Some(&byte) = input.get(*pos) {
                *pos += 1;
                match byte {
                    b'(' | b'[' => deepest = deepest.max(nested(input, pos) + 1),
                    b')' | b']' => break,
                    _ => {}
                }
            }
            deepest
        })
    }
    nested(input, &mut 0)
}

#[test]
fn shallow_nesting() {
    assert_eq!(bracket_depth(b"f(a, [b], (c, (d)))"), 3);
    assert_eq!(bracket_depth(b"no brackets"), 0);
}

#[test]
fn deep_nesting_grows_the_stack() {
    let depth = 200_000;
    let input = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    assert_eq!(bracket_depth(input.as_bytes()), depth);
}

#[test]
fn result_passes_through() {
    let result: Result<u32, &str> = ensure_sufficient_stack(|| Ok(7));
    assert_eq!(result, Ok(7));
}
