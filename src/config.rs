// src/config.rs
// =============================================================================
// This file turns configuration strings into typed values.
//
// Two inputs arrive from the outside world (CLI flags or env vars):
// - WIKI_PAGES: JSON array like
//     [{"type": "github", "owner": "user", "repo": "repo", "pages": ["Home"]}]
// - EXCLUDE_PREFIXES: comma-separated list like "sudo, rm ,"
//
// Nothing here is global: callers parse what they need and pass the values
// down to the pipelines.
//
// Rust concepts:
// - serde derive: JSON objects map straight onto structs
// - #[serde(rename)]: "type" is a Rust keyword, so the field is `provider`
// - impl Iterator return types: lazily expand pages into targets
// =============================================================================

use crate::wiki::Result;
use serde::Deserialize;

// One wiki and the pages we want from it
//
// `provider` is the raw "type" string. An unknown type parses fine here and
// only fails the fetches for its own pages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WikiPageConfig {
    #[serde(rename = "type")]
    pub provider: String,
    pub owner: String,
    pub repo: String,
    pub pages: Vec<String>,
}

// One unit of fetch work: a single page of a single wiki
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    pub provider: String,
    pub owner: String,
    pub repo: String,
    pub page: String,
}

impl FetchTarget {
    // "owner/repo/page", used in section headers and error lines
    pub fn label(&self) -> String {
        format!("{}/{}/{}", self.owner, self.repo, self.page)
    }
}

impl WikiPageConfig {
    // Expands this config into one FetchTarget per page, in page order
    //
    // The '_ says the iterator borrows `self`; nothing is cloned until a
    // target is actually pulled out of it.
    pub fn targets(&self) -> impl Iterator<Item = FetchTarget> + '_ {
        self.pages.iter().map(move |page| FetchTarget {
            provider: self.provider.clone(),
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            page: page.clone(),
        })
    }
}

// Parses the WIKI_PAGES JSON
//
// A blank string counts as "no pages" rather than a syntax error.
pub fn parse_wiki_pages(json: &str) -> Result<Vec<WikiPageConfig>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }

    // serde_json::Error converts into WikiError::Config through ?
    Ok(serde_json::from_str(json)?)
}

// Splits the EXCLUDE_PREFIXES list on commas, trimming each entry and
// dropping the empty ones
//
// Example:
//   " sudo, rm ,, #" -> ["sudo", "rm", "#"]
pub fn parse_exclude_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|prefix| !prefix.is_empty())
        .map(str::to_string)
        .collect()
}

// Expands every config into its targets: config order first, then page order
//
// Example:
//   [a/one: [Home, Setup], b/two: [Install]]
//   -> [a/one/Home, a/one/Setup, b/two/Install]
pub fn expand_targets(configs: &[WikiPageConfig]) -> Vec<FetchTarget> {
    configs.iter().flat_map(|config| config.targets()).collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is flat_map?
//    - map turns each config into an iterator of targets
//    - flat_map then chains those iterators into one long sequence
//    - Order is preserved: all of config 1, then all of config 2, ...
//
// 2. Why does parse_wiki_pages return a Result but
//    parse_exclude_prefixes does not?
//    - JSON can be malformed; a comma-separated list cannot
//    - Any string splits on commas just fine
// -----------------------------------------------------------------------------
