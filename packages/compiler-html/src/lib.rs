//! # Email HTML Compiler
//!
//! Renders a block document into a table-based HTML email with every style
//! inlined, and derives the plain-text part sent alongside it.
//!
//! Output is deterministic: the same blocks always produce byte-identical
//! HTML.

mod compiler;
mod plain_text;

#[cfg(test)]
mod tests;

pub use compiler::{compile_to_html, serialize, CompileOptions, BLOCK_MARKER};
pub use plain_text::{html_to_plain_text, EMPTY_TEXT_FALLBACK};
