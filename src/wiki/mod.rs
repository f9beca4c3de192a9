// src/wiki/mod.rs
// =============================================================================
// This module downloads raw wiki page sources from GitHub and GitLab.
//
// Currently implements:
// - The set of supported providers ("github", "gitlab")
// - Building the raw-markdown URL for a (owner, repo, page) tuple
// - A single fallback URL for GitHub wikis that the raw host does not serve
//
// Nothing here caches or retries beyond that one fallback.
// =============================================================================

mod error;
mod fetch;

pub use error::{Result, WikiError};
pub use fetch::{WikiFetcher, WikiHosts};
