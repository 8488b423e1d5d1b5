//! Stack growth for the schema lexer's recursive productions.
//!
//! Schema text can nest without limit: default values such as
//! `[[[...]]]` become grouped lists inside grouped lists, and every
//! `{ ... }` block lexes its children with a nested statement sequence.
//! The lexer places no depth limit on either, so `grouped_list` and the
//! block body each run inside [`ensure_sufficient_stack`] and a hostile or
//! generated file grows the stack instead of aborting the process.
//!
//! Only lexing recurses. The output trees in `idl_ir` release nested
//! children from a work list, so dropping them needs no extra stack.
//!
//! On wasm32 the call is a passthrough; `stacker` cannot switch stacks there.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first moving to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
