// src/pipeline/mod.rs
// =============================================================================
// Wires fetching, extraction and filtering together.
//
// Submodules:
// - aggregate: many pages at once, errors collected inline
// - single: one page, errors returned to the caller
// =============================================================================

pub mod aggregate;
pub mod single;
