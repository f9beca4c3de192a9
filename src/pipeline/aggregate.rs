// src/pipeline/aggregate.rs
// =============================================================================
// This module builds the combined script for a whole batch of wiki pages.
//
// How it works:
// 1. Expand each wiki config into one FetchTarget per page
// 2. Fetch every target at the same time and wait for ALL of them
// 3. Extract + filter shell blocks from each page that arrived
// 4. Print error lines first, then one labelled section per page
//
// A failing page never hides the others: it just becomes a
// "# Error fetching ..." line at the top of the output.
//
// Rust concepts:
// - join_all: run many futures concurrently, results in input order
// - Enums with data: FetchOutcome is either content or an error message
// =============================================================================

use crate::config::{expand_targets, FetchTarget, WikiPageConfig};
use crate::extract::{extract_shell_blocks, filter_blocks};
use crate::wiki::WikiFetcher;
use futures::future::join_all;
use tracing::{info, warn};

// What happened to one FetchTarget. Exactly one per target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched { label: String, content: String },
    Failed { label: String, message: String },
}

impl FetchOutcome {
    pub fn label(&self) -> &str {
        match self {
            FetchOutcome::Fetched { label, .. } | FetchOutcome::Failed { label, .. } => label,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FetchOutcome::Failed { .. })
    }
}

// Fetches every target concurrently
//
// There is no concurrency limit and no early exit: this only returns once
// every fetch has finished. The returned Vec lines up index-for-index with
// `targets`, whatever order the responses came back in.
pub async fn fetch_all(fetcher: &WikiFetcher, targets: &[FetchTarget]) -> Vec<FetchOutcome> {
    let fetches = targets.iter().map(|target| async move {
        let label = target.label();
        match fetcher
            .fetch(&target.provider, &target.owner, &target.repo, &target.page)
            .await
        {
            Ok(content) => FetchOutcome::Fetched { label, content },
            Err(e) => {
                warn!("Could not fetch {}: {}", label, e);
                FetchOutcome::Failed {
                    label,
                    message: e.to_string(),
                }
            }
        }
    });

    join_all(fetches).await
}

// Turns fetch outcomes into the final text
//
// Layout:
//   # Error fetching a/b/Broken: Failed to fetch: 404 Not Found
//   <blank line, only when there were errors>
//   # === Source: a/b/Home ===
//   <block 1>
//   <block 2>
//   <blank line>
//
// A page that arrived but has no shell blocks left after filtering adds
// nothing at all.
pub fn assemble(outcomes: &[FetchOutcome], exclude_prefixes: &[String]) -> String {
    let mut errors = Vec::new();
    let mut sections = Vec::new();

    for outcome in outcomes {
        match outcome {
            FetchOutcome::Failed { label, message } => {
                errors.push(format!("# Error fetching {}: {}", label, message));
            }
            FetchOutcome::Fetched { label, content } => {
                let blocks = filter_blocks(extract_shell_blocks(content), exclude_prefixes);
                if blocks.is_empty() {
                    continue;
                }
                sections.push(format!("# === Source: {} ===", label));
                sections.extend(blocks);
                sections.push(String::new());
            }
        }
    }

    // Errors go on top, followed by one blank line whenever there are any.
    // This holds even when no section follows, so the errors-only output
    // still ends with "\n\n".
    let mut text = errors.join("\n");
    if !errors.is_empty() {
        text.push_str("\n\n");
    }
    text.push_str(&sections.join("\n"));
    text
}

// The assembled text plus the labels of the targets that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub text: String,
    pub failed: Vec<String>,
}

// Runs the whole batch: expand, fetch, extract, filter, assemble
//
// Both the HTTP handler and the `bash` subcommand call this, and the
// summary line is logged here once per batch.
pub async fn run(
    fetcher: &WikiFetcher,
    configs: &[WikiPageConfig],
    exclude_prefixes: &[String],
) -> BatchReport {
    let targets = expand_targets(configs);
    let outcomes = fetch_all(fetcher, &targets).await;

    // Labels of the failed targets, in target order
    let failed: Vec<String> = outcomes
        .iter()
        .filter(|o| o.is_failure())
        .map(|o| o.label().to_string())
        .collect();
    info!(
        "Fetched {} page(s), {} failed",
        outcomes.len() - failed.len(),
        failed.len()
    );

    BatchReport {
        text: assemble(&outcomes, exclude_prefixes),
        failed,
    }
}
