// src/extract/mod.rs
// =============================================================================
// This module turns wiki markdown into copy-pasteable shell snippets.
//
// Submodules:
// - markdown: finds fenced bash/shell/sh blocks
// - filter: drops lines that start with an excluded prefix
// =============================================================================

mod filter;
mod markdown;

pub use filter::filter_blocks;
pub use markdown::extract_shell_blocks;
