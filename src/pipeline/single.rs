// src/pipeline/single.rs
// =============================================================================
// Ad-hoc lookup of one wiki page (the /fetch endpoint and `wikibash fetch`).
//
// Same steps as the batch pipeline, minus the bookkeeping:
// 1. Fetch the page (GitHub may fall back once, see wiki/fetch.rs)
// 2. Extract the bash/shell/sh blocks
// 3. Drop excluded lines and emptied blocks
// 4. Join what is left with newlines
//
// There are no labels or section headers, and a fetch error is returned to
// the caller as-is instead of being turned into a comment line.
//
// Rust concepts:
// - The ? operator: a WikiError from the fetch ends the function right there
// =============================================================================

use crate::extract::{extract_shell_blocks, filter_blocks};
use crate::wiki::{Result, WikiFetcher};
use tracing::debug;

// Fetches one page and returns its filtered shell blocks joined by newlines
//
// Parameters:
//   fetcher: shared HTTP client + upstream hosts
//   provider: "github" or "gitlab"
//   owner, repo, page: which wiki page to read
//   exclude_prefixes: line prefixes to drop (may be empty)
//
// Returns: the snippet text, possibly empty if the page had no shell blocks
pub async fn run(
    fetcher: &WikiFetcher,
    provider: &str,
    owner: &str,
    repo: &str,
    page: &str,
    exclude_prefixes: &[String],
) -> Result<String> {
    // Any fetch failure goes straight back to the caller
    let content = fetcher.fetch(provider, owner, repo, page).await?;

    let blocks = filter_blocks(extract_shell_blocks(&content), exclude_prefixes);
    debug!("{}/{}/{}: {} block(s) after filtering", owner, repo, page, blocks.len());

    Ok(blocks.join("\n"))
}
