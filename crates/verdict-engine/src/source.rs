//! Prepare solution bytes for compilation.

use std::path::Path;

use verdict_rustc::invoke::is_assembly;

/// Language-feature prelude prepended verbatim to every Rust solution.
///
/// Outside debug builds the translation unit opts out of the standard
/// runtime support library; judge artifacts must not depend on it.
pub const PRELUDE: &[u8] = b"#![feature(proc_macro_hygiene)]\n\
#![feature(main)]\n\
#![cfg_attr(not(debug_assertions), no_std)]\n";

/// Prepare raw solution bytes for the compiler's standard input.
///
/// Assembly sources (the second-stage artifact of a release build) are
/// re-encoded as a C translation unit; everything else gets the prelude
/// prepended, unmodified and never truncated.
pub fn prepare_source(raw: &[u8], filename: &Path) -> Vec<u8> {
    if is_assembly(filename) {
        return escape_asm(raw);
    }
    let mut prepared = Vec::with_capacity(PRELUDE.len() + raw.len());
    prepared.extend_from_slice(PRELUDE);
    prepared.extend_from_slice(raw);
    prepared
}

/// Re-encode assembly as an escaped literal inside a C translation unit.
///
/// Each assembly line becomes one string segment of a top-level `__asm__`
/// statement, with backslashes and quotes escaped and the newline rendered
/// as `\n`, so the output is valid input for a C compiler as-is.
pub fn escape_asm(raw: &[u8]) -> Vec<u8> {
    let mut out = b"__asm__(\n".to_vec();
    for line in raw.split(|&b| b == b'\n') {
        out.extend_from_slice(b"\"");
        for &byte in line {
            match byte {
                b'\\' => out.extend_from_slice(b"\\\\"),
                b'"' => out.extend_from_slice(b"\\\""),
                b'\r' => {}
                _ => out.push(byte),
            }
        }
        out.extend_from_slice(b"\\n\"\n");
    }
    out.extend_from_slice(b");\n");
    out
}
